mod compactness;
mod report;
mod reward;
mod weights;

pub use compactness::CompactnessMeasure;
pub use report::{
    ser, ser_by_population, ser_by_region, vna, vna_by_population, vna_by_region, ReportError, SeatTarget,
};
pub use reward::{breakdown, continuity_term, county_boundary_term, reward, reward_with, ser_term, RewardBreakdown};
pub use weights::RewardWeights;

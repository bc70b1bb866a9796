#![doc = "Constituency boundary search public API"]
mod graph;
mod objective;
mod partition;
mod search;
mod types;

#[doc(inline)]
pub use types::{
    parse_county_list, AdjacencyList, AdjacencySource, InputDocument, InputUnit, ReferenceTable, RegionReference,
    UnitRecord,
};

#[doc(inline)]
pub use graph::{build_graph, build_graph_with, BuildOptions, GraphError, UnitGraph};

#[doc(inline)]
pub use partition::{flip, is_contiguous, Configuration, Flip, FlipError, UnitView};

#[doc(inline)]
pub use objective::{
    breakdown, continuity_term, county_boundary_term, reward, reward_with, ser, ser_by_population, ser_by_region,
    ser_term, vna, vna_by_population, vna_by_region, CompactnessMeasure, ReportError, RewardBreakdown, RewardWeights, SeatTarget,
};

#[doc(inline)]
pub use search::{evolve, SearchConfig, SearchError, SearchOutcome, Termination, TREE_DEPTH};

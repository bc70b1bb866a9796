use crate::partition::Configuration;

/// A per-region compactness score that [`reward_with`](super::reward_with) can add to the reward.
///
/// Scores are summed over the regions present and scaled by `a_compact`.
pub trait CompactnessMeasure {
    fn region_score(&self, configuration: &Configuration, region: u32) -> f64;
}

impl<F> CompactnessMeasure for F
where
    F: Fn(&Configuration, u32) -> f64,
{
    fn region_score(&self, configuration: &Configuration, region: u32) -> f64 {
        self(configuration, region)
    }
}

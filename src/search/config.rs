use std::fmt;

use serde::{Deserialize, Serialize};

use crate::objective::RewardWeights;

/// Parameters of a generational search.
///
/// Missing fields fall back to their defaults when deserialized, so a config
/// file only needs the values it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Sequential flips applied to each offspring.
    pub flips_per_offspring: usize,
    /// Offspring produced from each parent.
    pub offspring_per_generation: usize,
    /// Offspring retained from each batch, by reward.
    pub survivors_per_generation: usize,
    /// Size of the best-so-far set returned by the search.
    pub keep: usize,
    /// Seed of the search's random stream.
    pub seed: u64,
    /// Build and score the offspring of each parent on the rayon pool.
    pub parallel: bool,
    /// Stop before the next batch once this many flips have been applied.
    pub max_flips: Option<u64>,
    /// Stop before the next batch once this much wall-clock time has elapsed.
    pub time_limit_secs: Option<f64>,
    pub weights: RewardWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            flips_per_offspring: 5,
            offspring_per_generation: 10,
            survivors_per_generation: 4,
            keep: 3,
            seed: 0,
            parallel: false,
            max_flips: None,
            time_limit_secs: None,
            weights: RewardWeights::default(),
        }
    }
}

impl SearchConfig {
    pub fn new(flips_per_offspring: usize, offspring_per_generation: usize, survivors_per_generation: usize) -> Self {
        Self { flips_per_offspring, offspring_per_generation, survivors_per_generation, ..Default::default() }
    }

    pub fn with_keep(mut self, keep: usize) -> Self { self.keep = keep; self }

    pub fn with_seed(mut self, seed: u64) -> Self { self.seed = seed; self }

    pub fn with_parallel(mut self, parallel: bool) -> Self { self.parallel = parallel; self }

    pub fn with_max_flips(mut self, max_flips: u64) -> Self { self.max_flips = Some(max_flips); self }

    pub fn with_time_limit(mut self, secs: f64) -> Self { self.time_limit_secs = Some(secs); self }

    pub fn with_weights(mut self, weights: RewardWeights) -> Self { self.weights = weights; self }

    /// Check the parameters for consistency.
    pub fn validate(&self) -> Result<(), SearchError> {
        let invalid = |message: String| Err(SearchError::InvalidConfig(message));

        if self.flips_per_offspring == 0 { return invalid("flips_per_offspring must be at least 1".into()) }
        if self.offspring_per_generation == 0 { return invalid("offspring_per_generation must be at least 1".into()) }
        if self.survivors_per_generation == 0 { return invalid("survivors_per_generation must be at least 1".into()) }
        if self.keep == 0 { return invalid("keep must be at least 1".into()) }
        if self.survivors_per_generation > self.offspring_per_generation {
            return invalid(format!(
                "survivors_per_generation ({}) exceeds offspring_per_generation ({})",
                self.survivors_per_generation, self.offspring_per_generation,
            ))
        }
        if let Some(secs) = self.time_limit_secs {
            if !(secs.is_finite() && secs > 0.0) { return invalid(format!("time_limit_secs must be positive, got {secs}")) }
        }
        self.weights.validate().map_err(SearchError::InvalidConfig)
    }
}

/// Errors raised before a search starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchError {
    InvalidConfig(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidConfig(message) => write!(f, "invalid search config: {message}"),
        }
    }
}

impl std::error::Error for SearchError {}

#[cfg(test)]
mod tests {
    use super::{SearchConfig, SearchError};

    #[test]
    fn defaults_are_valid() {
        let config = SearchConfig::default();
        assert_eq!(config.flips_per_offspring, 5);
        assert_eq!(config.offspring_per_generation, 10);
        assert_eq!(config.survivors_per_generation, 4);
        assert_eq!(config.keep, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_counts() {
        assert!(SearchConfig::new(0, 4, 2).validate().is_err());
        assert!(SearchConfig::new(1, 0, 0).validate().is_err());
        assert!(SearchConfig::new(1, 4, 0).validate().is_err());
        assert!(SearchConfig::new(1, 4, 2).with_keep(0).validate().is_err());
    }

    #[test]
    fn validate_rejects_more_survivors_than_offspring() {
        let err = SearchConfig::new(1, 2, 3).validate().unwrap_err();
        assert_eq!(err, SearchError::InvalidConfig(
            "survivors_per_generation (3) exceeds offspring_per_generation (2)".into(),
        ));
    }

    #[test]
    fn validate_rejects_bad_time_limit() {
        assert!(SearchConfig::default().with_time_limit(0.0).validate().is_err());
        assert!(SearchConfig::default().with_time_limit(f64::NAN).validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SearchConfig = serde_json::from_str(
            r#"{ "seed": 42, "keep": 1, "weights": { "a_ser": 2.0 } }"#,
        ).unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.keep, 1);
        assert_eq!(config.flips_per_offspring, 5);
        assert_eq!(config.weights.a_ser, 2.0);
        assert_eq!(config.weights.national_ratio, 29_800.0);
    }
}

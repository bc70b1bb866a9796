use serde::{Deserialize, Serialize};

/// Weights and constants of the reward function.
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardWeights {
    /// Scale of the summed SER bump term.
    pub a_ser: f64,
    /// Population coefficient of the county-boundary decay.
    pub a_cb: f64,
    /// Unit-count coefficient of the county-boundary decay.
    pub b_cb: f64,
    /// Population coefficient of the continuity decay.
    pub a_cont: f64,
    /// Unit-count coefficient of the continuity decay.
    pub b_cont: f64,
    /// Population represented by one seat.
    pub national_ratio: f64,
    /// Width `d` of the SER bump, `1 - exp(-d / |s - round(s)|)`.
    pub bump_width: f64,
    /// Scale of the optional compactness term.
    pub a_compact: f64,
}

impl Default for RewardWeights {
    fn default() -> Self {
        Self {
            a_ser: 3.0,
            a_cb: 1e-10,
            b_cb: 1e-4,
            a_cont: 1e-3,
            b_cont: 0.01,
            national_ratio: 29_800.0,
            bump_width: 0.03,
            a_compact: 0.0,
        }
    }
}

impl RewardWeights {
    /// Check that the weights describe a usable reward.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.national_ratio.is_finite() && self.national_ratio > 0.0) {
            return Err(format!("national_ratio must be positive, got {}", self.national_ratio));
        }
        if !(self.bump_width.is_finite() && self.bump_width > 0.0) {
            return Err(format!("bump_width must be positive, got {}", self.bump_width));
        }
        let coefficients = [
            ("a_ser", self.a_ser), ("a_cb", self.a_cb), ("b_cb", self.b_cb),
            ("a_cont", self.a_cont), ("b_cont", self.b_cont), ("a_compact", self.a_compact),
        ];
        match coefficients.iter().find(|(_, value)| !(value.is_finite() && *value >= 0.0)) {
            Some((name, value)) => Err(format!("{name} must be finite and non-negative, got {value}")),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RewardWeights;

    #[test]
    fn missing_fields_take_defaults() {
        let weights: RewardWeights = serde_json::from_str(r#"{ "a_ser": 5.0 }"#).unwrap();
        assert_eq!(weights.a_ser, 5.0);
        assert_eq!(weights.national_ratio, 29_800.0);
        assert_eq!(weights.b_cont, 0.01);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_constants() {
        let weights = RewardWeights { national_ratio: 0.0, ..Default::default() };
        assert!(weights.validate().is_err());
        let weights = RewardWeights { b_cb: -1.0, ..Default::default() };
        assert!(weights.validate().unwrap_err().contains("b_cb"));
    }
}

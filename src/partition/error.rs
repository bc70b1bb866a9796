use std::fmt;

/// Errors raised by the flip operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlipError {
    /// No unit is currently eligible for a flip.
    NoEligibleUnit,
    /// The named unit does not exist.
    UnknownUnit(String),
    /// The named region does not exist.
    UnknownRegion(String),
    /// The unit exists but is not eligible (interior, already changed, or empty).
    Ineligible(String),
    /// The target region does not neighbour the unit.
    NotAdjacent { unit: String, region: String },
}

impl fmt::Display for FlipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlipError::NoEligibleUnit => write!(f, "no unit is eligible for a flip"),
            FlipError::UnknownUnit(unit) => write!(f, "unknown unit '{unit}'"),
            FlipError::UnknownRegion(region) => write!(f, "unknown region '{region}'"),
            FlipError::Ineligible(unit) => write!(f, "unit '{unit}' is not eligible for a flip"),
            FlipError::NotAdjacent { unit, region } =>
                write!(f, "region '{region}' does not neighbour unit '{unit}'"),
        }
    }
}

impl std::error::Error for FlipError {}

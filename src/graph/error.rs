use std::fmt;

/// Errors raised while building a [`UnitGraph`](crate::UnitGraph).
/// All of them are fatal: the search cannot start from malformed input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphError {
    /// The adjacency source could not derive neighbours for a unit.
    InvalidGeometry { unit: String },
    /// Two units share the same id.
    DuplicateId(String),
    /// A unit carries a negative population.
    NegativePopulation { unit: String, population: i64 },
    /// A unit lists a neighbour id that does not exist.
    DanglingNeighbor { unit: String, neighbor: String },
    /// `unit` lists `neighbor`, but not the other way around.
    AsymmetricAdjacency { unit: String, neighbor: String },
    /// A unit lists itself as a neighbour.
    SelfNeighbor(String),
    /// A region in the input has no entry in the reference table.
    MissingCountyLink(String),
    /// No units remain after exclusions.
    Empty,
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::InvalidGeometry { unit } =>
                write!(f, "adjacency could not be derived for unit '{unit}'"),
            GraphError::DuplicateId(id) =>
                write!(f, "duplicate unit id '{id}'"),
            GraphError::NegativePopulation { unit, population } =>
                write!(f, "unit '{unit}' has negative population {population}"),
            GraphError::DanglingNeighbor { unit, neighbor } =>
                write!(f, "unit '{unit}' lists unknown neighbour '{neighbor}'"),
            GraphError::AsymmetricAdjacency { unit, neighbor } =>
                write!(f, "unit '{unit}' lists '{neighbor}' as a neighbour, but not vice versa"),
            GraphError::SelfNeighbor(unit) =>
                write!(f, "unit '{unit}' lists itself as a neighbour"),
            GraphError::MissingCountyLink(region) =>
                write!(f, "region '{region}' has no entry in the reference table"),
            GraphError::Empty =>
                write!(f, "no units to build a graph from"),
        }
    }
}

impl std::error::Error for GraphError {}

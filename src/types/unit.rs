use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// One base geographic record as supplied by the external data source.
///
/// `geometry` is opaque to the search: it is only handed to an
/// [`AdjacencySource`] while the graph is built, and never read again.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub id: String,
    pub region: String,
    pub county: String,
    pub population: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,
}

impl UnitRecord {
    pub fn new(id: impl Into<String>, region: impl Into<String>, county: impl Into<String>, population: i64) -> Self {
        Self { id: id.into(), region: region.into(), county: county.into(), population, geometry: None }
    }
}

/// Supplier of the geometric "touches" relation between units.
pub trait AdjacencySource {
    /// Ids of the units whose geometry touches `unit`, or `None` if they cannot be derived.
    fn touching(&self, unit: &UnitRecord) -> Option<Vec<String>>;
}

/// Precomputed adjacency lists keyed by unit id.
#[derive(Clone, Debug, Default)]
pub struct AdjacencyList {
    neighbors: AHashMap<String, Vec<String>>,
}

impl AdjacencyList {
    pub fn new() -> Self { Self::default() }

    /// Set the neighbours of `id`, replacing any previous entry.
    pub fn insert(&mut self, id: impl Into<String>, neighbors: impl IntoIterator<Item = impl Into<String>>) {
        self.neighbors.insert(id.into(), neighbors.into_iter().map(Into::into).collect());
    }

    /// Build a symmetric adjacency list from undirected edges.
    /// Every id mentioned gets an entry, even with no neighbours.
    pub fn from_edges<'a>(ids: impl IntoIterator<Item = &'a str>, edges: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut neighbors: AHashMap<String, Vec<String>> = ids.into_iter()
            .map(|id| (id.to_string(), Vec::new()))
            .collect();
        for (a, b) in edges {
            neighbors.entry(a.to_string()).or_default().push(b.to_string());
            neighbors.entry(b.to_string()).or_default().push(a.to_string());
        }
        Self { neighbors }
    }

    #[inline] pub fn len(&self) -> usize { self.neighbors.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.neighbors.is_empty() }
}

impl AdjacencySource for AdjacencyList {
    fn touching(&self, unit: &UnitRecord) -> Option<Vec<String>> {
        self.neighbors.get(&unit.id).cloned()
    }
}

impl<S: std::hash::BuildHasher> AdjacencySource for std::collections::HashMap<String, Vec<String>, S> {
    fn touching(&self, unit: &UnitRecord) -> Option<Vec<String>> {
        self.get(&unit.id).cloned()
    }
}

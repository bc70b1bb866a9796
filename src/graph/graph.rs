use std::sync::Arc;

use ahash::AHashMap;
use smallvec::SmallVec;

/// Immutable-shape model of the base units and their adjacency.
///
/// Adjacency is stored in compressed sparse row format with neighbours sorted
/// by unit index. Regions and counties are interned to dense `u32` indices;
/// the per-unit attributes that never change during a search (population,
/// county, the assignment supplied at construction) live here and are shared
/// by every [`Configuration`](crate::Configuration) through an `Arc`.
#[derive(Debug)]
pub struct UnitGraph {
    pub(super) ids: Vec<Arc<str>>,
    pub(super) index: AHashMap<Arc<str>, usize>,
    pub(super) offsets: Vec<u32>,
    pub(super) edges: Vec<u32>,
    pub(super) populations: Vec<u64>,
    pub(super) counties: Vec<u32>,
    pub(super) county_names: Vec<Arc<str>>,
    pub(super) region_names: Vec<Arc<str>>,
    pub(super) region_index: AHashMap<Arc<str>, u32>,
    pub(super) home_counties: Vec<SmallVec<[u32; 2]>>, // indexed by region
    pub(super) seats: Vec<Option<u32>>,                // indexed by region
    pub(super) initial_regions: Vec<u32>,
    pub(super) total_population: u64,
}

impl UnitGraph {
    /// Number of units.
    #[inline] pub fn node_count(&self) -> usize { self.ids.len() }

    /// Number of directed adjacency entries (twice the number of undirected edges).
    #[inline] pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Number of distinct regions known to the graph.
    #[inline] pub fn region_count(&self) -> usize { self.region_names.len() }

    /// Sum of population over all units.
    #[inline] pub fn total_population(&self) -> u64 { self.total_population }

    #[inline]
    fn range(&self, node: usize) -> std::ops::Range<usize> {
        self.offsets[node] as usize .. self.offsets[node + 1] as usize
    }

    /// Number of neighbours of a unit.
    #[inline] pub fn degree(&self, node: usize) -> usize { self.range(node).len() }

    /// Iterator over the neighbours of a unit, in increasing index order.
    #[inline]
    pub fn edges(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.range(node).map(move |v| self.edges[v] as usize)
    }

    /// True if `a` and `b` are adjacent (binary search over the sorted row).
    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        self.edges[self.range(a)].binary_search(&(b as u32)).is_ok()
    }

    /// Look up the index of a unit by id in O(1).
    #[inline] pub fn unit_index(&self, id: &str) -> Option<usize> { self.index.get(id).copied() }

    /// Id of the unit at `node`.
    #[inline] pub fn unit_id(&self, node: usize) -> &str { &self.ids[node] }

    #[inline] pub fn population(&self, node: usize) -> u64 { self.populations[node] }

    /// County index of the unit at `node`.
    #[inline] pub fn county(&self, node: usize) -> u32 { self.counties[node] }

    #[inline] pub fn county_name(&self, county: u32) -> &str { &self.county_names[county as usize] }

    #[inline] pub fn region_name(&self, region: u32) -> &str { &self.region_names[region as usize] }

    /// Look up the index of a region by name.
    #[inline] pub fn region_index(&self, name: &str) -> Option<u32> { self.region_index.get(name).copied() }

    /// Interned home counties of a region.
    #[inline] pub fn home_counties(&self, region: u32) -> &[u32] { &self.home_counties[region as usize] }

    /// True if `county` is one of the nominal home counties of `region`.
    #[inline]
    pub fn is_home_county(&self, region: u32, county: u32) -> bool {
        self.home_counties[region as usize].contains(&county)
    }

    /// Current seat count of a region, when the reference table carries one.
    #[inline] pub fn seats(&self, region: u32) -> Option<u32> { self.seats[region as usize] }

    /// Region assignment supplied at construction.
    #[inline] pub fn initial_region(&self, node: usize) -> u32 { self.initial_regions[node] }

    #[inline] pub(crate) fn initial_regions(&self) -> &[u32] { &self.initial_regions }
}

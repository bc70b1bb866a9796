use std::sync::Arc;

use smallvec::SmallVec;

use crate::{
    graph::UnitGraph,
    partition::{Flip, IndexSet, RegionSet},
};

/// Inline set of region indices, kept sorted.
pub(crate) type RegionList = SmallVec<[u32; 4]>;

/// A complete assignment of regions to all units of a [`UnitGraph`], with the
/// adjacency metadata the flip operator maintains incrementally.
///
/// Configurations are values: cloning one yields an independent copy that
/// shares only the immutable graph.
#[derive(Clone, Debug)]
pub struct Configuration {
    graph: Arc<UnitGraph>,
    pub(super) regions: RegionSet,               // Units in each region
    pub(super) region_populations: Vec<u64>,     // Population total of each region
    pub(super) neighbor_regions: Vec<RegionList>, // Adjacent regions of each unit, excluding its own
    pub(super) boundary: Vec<bool>,              // neighbor_regions[u] is non-empty
    pub(super) change_counts: Vec<u8>,           // Times each unit changed region in this lineage
    pub(super) eligible: IndexSet,               // Units that may be selected for a flip
    pub(super) changed: Vec<usize>,              // Units with change_count > 0, in order of first change
    pub(super) history: Vec<Flip>,               // Flips applied since the initial assignment
}

impl Configuration {
    /// Construct the initial configuration of a graph from its supplied assignment.
    pub fn new(graph: impl Into<Arc<UnitGraph>>) -> Self {
        let graph: Arc<UnitGraph> = graph.into();
        let num_units = graph.node_count();
        let regions = RegionSet::new(graph.region_count(), graph.initial_regions());

        let mut region_populations = vec![0; graph.region_count()];
        for node in 0..num_units {
            region_populations[regions.find(node) as usize] += graph.population(node);
        }

        let neighbor_regions = (0..num_units)
            .map(|node| derive_neighbor_regions(&graph, &regions, node))
            .collect::<Vec<_>>();
        let boundary = neighbor_regions.iter().map(|set| !set.is_empty()).collect::<Vec<_>>();

        let mut configuration = Self {
            regions,
            region_populations,
            neighbor_regions,
            boundary,
            change_counts: vec![0; num_units],
            eligible: IndexSet::new(num_units),
            changed: Vec::new(),
            history: Vec::new(),
            graph,
        };
        for node in 0..num_units { configuration.refresh_eligibility(node) }
        configuration
    }

    /// Get a reference to the underlying graph.
    #[inline] pub fn graph(&self) -> &UnitGraph { &self.graph }

    /// Get the shared handle of the underlying graph.
    #[inline] pub fn graph_arc(&self) -> &Arc<UnitGraph> { &self.graph }

    #[inline] pub fn num_units(&self) -> usize { self.graph.node_count() }

    /// Region index of a unit.
    #[inline] pub fn region(&self, node: usize) -> u32 { self.regions.find(node) }

    /// Region name of a unit.
    #[inline] pub fn region_name(&self, node: usize) -> &str { self.graph.region_name(self.region(node)) }

    /// Units currently assigned to a region.
    #[inline] pub fn members(&self, region: u32) -> &[usize] { self.regions.get(region) }

    /// Total population of a region.
    #[inline] pub fn region_population(&self, region: u32) -> u64 { self.region_populations[region as usize] }

    /// Regions adjacent to a unit, excluding its own, in increasing index order.
    #[inline] pub fn neighbor_regions(&self, node: usize) -> &[u32] { &self.neighbor_regions[node] }

    #[inline] pub fn is_boundary(&self, node: usize) -> bool { self.boundary[node] }

    #[inline] pub fn change_count(&self, node: usize) -> u8 { self.change_counts[node] }

    /// True if the unit may currently be selected by [`Configuration::flip`].
    #[inline]
    pub fn is_eligible(&self, node: usize) -> bool {
        self.boundary[node] && self.change_counts[node] < 1 && self.graph.population(node) > 0
    }

    /// Number of units currently eligible for a flip.
    #[inline] pub fn eligible_count(&self) -> usize { self.eligible.len() }

    /// Units with a non-zero change count, in order of their first change.
    #[inline] pub fn changed(&self) -> &[usize] { &self.changed }

    /// Flips applied since the initial configuration, in order.
    #[inline] pub fn history(&self) -> &[Flip] { &self.history }

    /// Regions with at least one unit, in index order.
    pub fn regions_present(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.regions.num_regions() as u32).filter(|&region| !self.members(region).is_empty())
    }

    /// Look up a unit by id in O(1).
    pub fn unit(&self, id: &str) -> Option<UnitView<'_>> {
        self.graph.unit_index(id).map(|node| UnitView { configuration: self, node })
    }

    /// Ids of the units currently in the named region, or `None` if the region is unknown.
    pub fn units_in_region(&self, region: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let region = self.graph.region_index(region)?;
        Some(self.members(region).iter().map(|&node| self.graph.unit_id(node)))
    }

    /// `(unit id, region name)` pairs in input order.
    pub fn assignments(&self) -> Vec<(&str, &str)> {
        (0..self.num_units())
            .map(|node| (self.graph.unit_id(node), self.region_name(node)))
            .collect()
    }

    /// Ids of units whose region differs from the initial assignment.
    pub fn changed_units(&self) -> Vec<&str> {
        self.changed.iter().copied()
            .filter(|&node| self.region(node) != self.graph.initial_region(node))
            .map(|node| self.graph.unit_id(node))
            .collect()
    }

    /// Recompute every derived field from scratch and report the first mismatch.
    pub fn audit(&self) -> Result<(), String> {
        for node in 0..self.num_units() {
            let id = self.graph.unit_id(node);
            let expected = derive_neighbor_regions(&self.graph, &self.regions, node);
            if self.neighbor_regions[node] != expected {
                return Err(format!("unit '{id}': neighbour regions {:?}, expected {:?}",
                    self.neighbor_regions[node], expected));
            }
            if self.neighbor_regions[node].contains(&self.region(node)) {
                return Err(format!("unit '{id}' lists its own region as a neighbour"));
            }
            if self.boundary[node] != !expected.is_empty() {
                return Err(format!("unit '{id}': boundary flag {} is stale", self.boundary[node]));
            }
            if self.eligible.contains(node) != self.is_eligible(node) {
                return Err(format!("unit '{id}': eligible pool membership is stale"));
            }
            if self.change_counts[node] > 0 && !self.changed.contains(&node) {
                return Err(format!("unit '{id}' changed but is not tracked"));
            }
        }

        let mut totals = vec![0u64; self.regions.num_regions()];
        for node in 0..self.num_units() { totals[self.region(node) as usize] += self.graph.population(node) }
        if totals != self.region_populations {
            return Err(format!("region populations {:?}, expected {totals:?}", self.region_populations));
        }
        if totals.iter().sum::<u64>() != self.graph.total_population() {
            return Err("total population is not conserved".to_string());
        }
        Ok(())
    }

    /// Re-derive the boundary flag and pool membership of a unit from its neighbour regions.
    pub(super) fn refresh_eligibility(&mut self, node: usize) {
        self.boundary[node] = !self.neighbor_regions[node].is_empty();
        let eligible = self.is_eligible(node);
        self.eligible.set(node, eligible);
    }
}

/// Distinct regions among the neighbours of `node`, excluding its own, sorted.
fn derive_neighbor_regions(graph: &UnitGraph, regions: &RegionSet, node: usize) -> RegionList {
    let own = regions.find(node);
    let mut set = graph.edges(node)
        .map(|v| regions.find(v))
        .filter(|&region| region != own)
        .collect::<RegionList>();
    set.sort_unstable();
    set.dedup();
    set
}

/// Read-only view of one unit within a configuration.
#[derive(Clone, Copy)]
pub struct UnitView<'a> {
    configuration: &'a Configuration,
    node: usize,
}

impl<'a> UnitView<'a> {
    #[inline] pub fn index(&self) -> usize { self.node }

    #[inline] pub fn id(&self) -> &'a str { self.configuration.graph.unit_id(self.node) }

    #[inline] pub fn region(&self) -> &'a str { self.configuration.region_name(self.node) }

    #[inline]
    pub fn county(&self) -> &'a str {
        let graph = &self.configuration.graph;
        graph.county_name(graph.county(self.node))
    }

    #[inline] pub fn population(&self) -> u64 { self.configuration.graph.population(self.node) }

    pub fn neighbor_ids(&self) -> impl Iterator<Item = &'a str> + 'a {
        let graph = &self.configuration.graph;
        graph.edges(self.node).map(move |v| graph.unit_id(v))
    }

    pub fn neighbor_regions(&self) -> impl Iterator<Item = &'a str> + 'a {
        let configuration = self.configuration;
        configuration.neighbor_regions(self.node).iter().map(move |&region| configuration.graph.region_name(region))
    }

    #[inline] pub fn is_boundary(&self) -> bool { self.configuration.is_boundary(self.node) }

    #[inline] pub fn change_count(&self) -> u8 { self.configuration.change_count(self.node) }

    #[inline] pub fn is_eligible(&self) -> bool { self.configuration.is_eligible(self.node) }
}

impl std::fmt::Debug for UnitView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unit")
            .field("id", &self.id())
            .field("region", &self.region())
            .field("county", &self.county())
            .field("population", &self.population())
            .field("is_boundary", &self.is_boundary())
            .field("change_count", &self.change_count())
            .finish()
    }
}

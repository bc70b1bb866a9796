use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use smallvec::SmallVec;

use crate::{
    graph::{GraphError, UnitGraph},
    types::{AdjacencySource, ReferenceTable, UnitRecord},
};

/// Units to leave out of the graph before it is built.
///
/// Neighbour references to excluded units are dropped rather than reported
/// as dangling, so a dataset can be searched without, say, its island units
/// or one dense county. [`crate::InputDocument::full_assignments`] merges them back.
#[derive(Clone, Debug, Default)]
pub struct BuildOptions {
    pub exclude_units: Vec<String>,
    pub exclude_counties: Vec<String>,
}

/// Build a graph from unit records, an adjacency source and the region reference table.
pub fn build_graph(units: &[UnitRecord], adjacency: &impl AdjacencySource, reference: &ReferenceTable)
-> Result<UnitGraph, GraphError> {
    build_graph_with(units, adjacency, reference, &BuildOptions::default())
}

/// Build a graph, applying the exclusions in `options` first.
pub fn build_graph_with(units: &[UnitRecord], adjacency: &impl AdjacencySource, reference: &ReferenceTable,
    options: &BuildOptions,
) -> Result<UnitGraph, GraphError> {
    let excluded_ids = options.exclude_units.iter().map(String::as_str).collect::<AHashSet<_>>();
    let excluded_counties = options.exclude_counties.iter().map(String::as_str).collect::<AHashSet<_>>();
    let is_excluded = |unit: &UnitRecord| {
        excluded_ids.contains(unit.id.as_str()) || excluded_counties.contains(unit.county.as_str())
    };

    // Ids of every excluded record, so references to them can be pruned.
    let dropped = units.iter()
        .filter(|&unit| is_excluded(unit))
        .map(|unit| unit.id.as_str())
        .chain(excluded_ids.iter().copied())
        .collect::<AHashSet<_>>();

    let units = units.iter().filter(|&unit| !is_excluded(unit)).collect::<Vec<_>>();
    if units.is_empty() { return Err(GraphError::Empty) }

    // Intern unit ids, rejecting duplicates and negative populations.
    let mut ids = Vec::with_capacity(units.len());
    let mut index = AHashMap::with_capacity(units.len());
    let mut populations = Vec::with_capacity(units.len());
    for (node, unit) in units.iter().enumerate() {
        let id: Arc<str> = Arc::from(unit.id.as_str());
        if index.insert(id.clone(), node).is_some() { return Err(GraphError::DuplicateId(unit.id.clone())) }
        if unit.population < 0 {
            return Err(GraphError::NegativePopulation { unit: unit.id.clone(), population: unit.population })
        }
        ids.push(id);
        populations.push(unit.population as u64);
    }

    // Resolve neighbour ids to indices, sorted and deduplicated per unit.
    let mut adjacency_lists = Vec::with_capacity(units.len());
    for (node, unit) in units.iter().enumerate() {
        let touching = adjacency.touching(unit)
            .ok_or_else(|| GraphError::InvalidGeometry { unit: unit.id.clone() })?;

        let mut neighbors = Vec::with_capacity(touching.len());
        for neighbor in touching {
            match index.get(neighbor.as_str()) {
                Some(&v) if v == node => return Err(GraphError::SelfNeighbor(unit.id.clone())),
                Some(&v) => neighbors.push(v as u32),
                None if dropped.contains(neighbor.as_str()) => {}
                None => return Err(GraphError::DanglingNeighbor { unit: unit.id.clone(), neighbor }),
            }
        }
        neighbors.sort_unstable();
        neighbors.dedup();
        adjacency_lists.push(neighbors);
    }

    // Adjacency must be undirected.
    for (node, neighbors) in adjacency_lists.iter().enumerate() {
        for &v in neighbors {
            if adjacency_lists[v as usize].binary_search(&(node as u32)).is_err() {
                return Err(GraphError::AsymmetricAdjacency {
                    unit: ids[node].to_string(),
                    neighbor: ids[v as usize].to_string(),
                })
            }
        }
    }

    // Intern regions in order of first appearance, then counties.
    let mut region_names: Vec<Arc<str>> = Vec::new();
    let mut region_index: AHashMap<Arc<str>, u32> = AHashMap::new();
    let initial_regions = units.iter()
        .map(|unit| intern(&mut region_names, &mut region_index, &unit.region))
        .collect::<Vec<_>>();

    let mut county_names: Vec<Arc<str>> = Vec::new();
    let mut county_index: AHashMap<Arc<str>, u32> = AHashMap::new();
    let counties = units.iter()
        .map(|unit| intern(&mut county_names, &mut county_index, &unit.county))
        .collect::<Vec<_>>();

    // Resolve the reference table for every region present in the input.
    let mut home_counties = Vec::with_capacity(region_names.len());
    let mut seats = Vec::with_capacity(region_names.len());
    for name in &region_names {
        let entry = reference.get(name).ok_or_else(|| GraphError::MissingCountyLink(name.to_string()))?;
        let mut homes = entry.home_counties.iter()
            .map(|county| intern(&mut county_names, &mut county_index, county))
            .collect::<SmallVec<[u32; 2]>>();
        homes.sort_unstable();
        homes.dedup();
        home_counties.push(homes);
        seats.push(entry.seats);
    }

    let offsets = std::iter::once(0u32).chain(
        adjacency_lists.iter()
            .map(|v| v.len() as u32)
            .scan(0u32, |acc, len| { *acc += len; Some(*acc) })
    ).collect::<Vec<u32>>();

    Ok(UnitGraph {
        total_population: populations.iter().sum(),
        ids,
        index,
        offsets,
        edges: adjacency_lists.into_iter().flatten().collect(),
        populations,
        counties,
        county_names,
        region_names,
        region_index,
        home_counties,
        seats,
        initial_regions,
    })
}

fn intern(names: &mut Vec<Arc<str>>, index: &mut AHashMap<Arc<str>, u32>, name: &str) -> u32 {
    if let Some(&i) = index.get(name) { return i }
    let i = names.len() as u32;
    let name: Arc<str> = Arc::from(name);
    names.push(name.clone());
    index.insert(name, i);
    i
}

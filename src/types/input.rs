use std::{collections::BTreeMap, io::Read};

use serde::{Deserialize, Serialize};

use crate::{
    graph::{build_graph_with, BuildOptions, GraphError, UnitGraph},
    partition::Configuration,
    types::{AdjacencyList, ReferenceTable, RegionReference, UnitRecord},
};

/// One unit of an input document: the record plus its precomputed "touches" list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputUnit {
    #[serde(flatten)]
    pub record: UnitRecord,
    #[serde(default)]
    pub neighbors: Vec<String>,
}

/// A complete search input: units with adjacency, the region reference table,
/// and the units or counties to leave out.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputDocument {
    pub units: Vec<InputUnit>,
    pub regions: Vec<RegionReference>,
    #[serde(default)]
    pub exclude_units: Vec<String>,
    #[serde(default)]
    pub exclude_counties: Vec<String>,
}

impl InputDocument {
    pub fn from_reader<R: Read>(reader: R) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn reference_table(&self) -> ReferenceTable {
        self.regions.iter().cloned().collect()
    }

    pub fn adjacency(&self) -> AdjacencyList {
        let mut adjacency = AdjacencyList::new();
        for unit in &self.units { adjacency.insert(unit.record.id.as_str(), unit.neighbors.iter().map(String::as_str)) }
        adjacency
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions { exclude_units: self.exclude_units.clone(), exclude_counties: self.exclude_counties.clone() }
    }

    fn is_excluded(&self, record: &UnitRecord) -> bool {
        self.exclude_units.iter().any(|id| *id == record.id)
            || self.exclude_counties.iter().any(|county| *county == record.county)
    }

    /// Units left out of the graph, in input order, still in their input regions.
    pub fn excluded_units(&self) -> impl Iterator<Item = &UnitRecord> + '_ {
        self.units.iter().map(|unit| &unit.record).filter(|&record| self.is_excluded(record))
    }

    /// Seat count of a region from the reference entries.
    pub fn seats(&self, region: &str) -> Option<u32> {
        self.regions.iter().find(|entry| entry.region == region).and_then(|entry| entry.seats)
    }

    /// Every unit's region: the searched units as `configuration` has them,
    /// followed by the excluded units in their input regions.
    pub fn full_assignments<'a>(&'a self, configuration: &'a Configuration) -> Vec<(&'a str, &'a str)> {
        let mut assignments = configuration.assignments();
        assignments.extend(self.excluded_units().map(|record| (record.id.as_str(), record.region.as_str())));
        assignments
    }

    /// Population of every region with the excluded units merged back in.
    pub fn full_populations(&self, configuration: &Configuration) -> BTreeMap<String, u64> {
        let mut populations = configuration.regions_present()
            .map(|region| (configuration.graph().region_name(region).to_string(), configuration.region_population(region)))
            .collect::<BTreeMap<_, _>>();
        for record in self.excluded_units() {
            *populations.entry(record.region.clone()).or_default() += record.population.max(0) as u64;
        }
        populations
    }

    /// Validate the document and build its unit graph.
    pub fn build_graph(&self) -> Result<UnitGraph, GraphError> {
        let records = self.units.iter().map(|unit| unit.record.clone()).collect::<Vec<_>>();
        build_graph_with(&records, &self.adjacency(), &self.reference_table(), &self.build_options())
    }
}

use rand::{seq::IndexedRandom, Rng};

use crate::partition::{Configuration, FlipError};

/// One applied flip: `unit` moved from region `from` to region `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Flip {
    pub unit: usize,
    pub from: u32,
    pub to: u32,
}

/// Copy `configuration` and apply one random flip to the copy.
pub fn flip<R: Rng + ?Sized>(configuration: &Configuration, rng: &mut R) -> Result<Configuration, FlipError> {
    let mut next = configuration.clone();
    next.flip(rng)?;
    Ok(next)
}

impl Configuration {
    /// Move one uniformly chosen eligible unit to a uniformly chosen neighbouring region.
    pub fn flip<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Flip, FlipError> {
        let &node = self.eligible.as_slice().choose(rng).ok_or(FlipError::NoEligibleUnit)?;
        // Eligible units are boundary units, so the choice below always succeeds.
        let &region = self.neighbor_regions[node].choose(rng).ok_or(FlipError::NoEligibleUnit)?;
        Ok(self.move_unit(node, region))
    }

    /// Flip a named unit into a named neighbouring region.
    /// The unit must be eligible, exactly as for a random flip.
    pub fn flip_to(&mut self, unit: &str, region: &str) -> Result<Flip, FlipError> {
        let node = self.graph().unit_index(unit).ok_or_else(|| FlipError::UnknownUnit(unit.to_string()))?;
        let to = self.graph().region_index(region).ok_or_else(|| FlipError::UnknownRegion(region.to_string()))?;
        if !self.is_eligible(node) { return Err(FlipError::Ineligible(unit.to_string())) }
        if self.neighbor_regions[node].binary_search(&to).is_err() {
            return Err(FlipError::NotAdjacent { unit: unit.to_string(), region: region.to_string() })
        }
        Ok(self.move_unit(node, to))
    }

    /// Reassign `node` to `region` and repair the metadata of `node` and its neighbours.
    /// Only `node` and its neighbours can see their neighbour-region sets change,
    /// so boundary flags and pool membership are refreshed for those units alone.
    pub(crate) fn move_unit(&mut self, node: usize, region: u32) -> Flip {
        let graph = self.graph_arc().clone();
        let prev = self.region(node);
        debug_assert!(prev != region, "unit {node} is already in region {region}");

        // Commit assignment and population totals.
        self.regions.move_to(node, region);
        self.region_populations[prev as usize] -= graph.population(node);
        self.region_populations[region as usize] += graph.population(node);

        // Record the change.
        if self.change_counts[node] == 0 { self.changed.push(node) }
        self.change_counts[node] = if self.change_counts[node] == 1 { 2 } else { 1 };

        // The unit no longer neighbours its new region, and still neighbours
        // its old one if any neighbour remains there.
        remove_region(&mut self.neighbor_regions[node], region);
        if graph.edges(node).any(|v| self.regions.find(v) == prev) {
            insert_region(&mut self.neighbor_regions[node], prev);
        }

        for y in graph.edges(node) {
            let own = self.regions.find(y);
            if own != region { insert_region(&mut self.neighbor_regions[y], region) }
            if own == prev || !graph.edges(y).any(|z| self.regions.find(z) == prev) {
                remove_region(&mut self.neighbor_regions[y], prev);
            }
        }

        self.refresh_eligibility(node);
        for y in graph.edges(node) { self.refresh_eligibility(y) }

        let flip = Flip { unit: node, from: prev, to: region };
        self.history.push(flip);
        flip
    }
}

#[inline]
fn insert_region(set: &mut crate::partition::RegionList, region: u32) {
    if let Err(i) = set.binary_search(&region) { set.insert(i, region) }
}

#[inline]
fn remove_region(set: &mut crate::partition::RegionList, region: u32) {
    if let Ok(i) = set.binary_search(&region) { set.remove(i); }
}

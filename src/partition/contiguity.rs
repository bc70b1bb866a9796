use std::collections::VecDeque;

use crate::partition::Configuration;

/// Check that every region a flip could have affected is a single connected component.
/// See [`Configuration::regions_to_check`] for the regions covered.
pub fn is_contiguous(configuration: &Configuration) -> bool {
    configuration.is_contiguous()
}

impl Configuration {
    /// Regions whose contiguity a flip could have affected: the regions of all
    /// changed units, plus every region listed among their neighbour regions.
    /// Sorted and deduplicated.
    pub fn regions_to_check(&self) -> Vec<u32> {
        let mut regions = self.changed().iter()
            .flat_map(|&node| std::iter::once(self.region(node)).chain(self.neighbor_regions(node).iter().copied()))
            .collect::<Vec<_>>();
        regions.sort_unstable();
        regions.dedup();
        regions
    }

    /// Check that every region a flip could have affected is a single connected component.
    pub fn is_contiguous(&self) -> bool {
        let mut visited = vec![false; self.num_units()];
        self.regions_to_check().into_iter().all(|region| self.region_is_connected(region, &mut visited))
    }

    /// Check every non-empty region, ignoring the change history.
    pub fn is_globally_contiguous(&self) -> bool {
        let mut visited = vec![false; self.num_units()];
        (0..self.graph().region_count() as u32)
            .all(|region| self.region_is_connected(region, &mut visited))
    }

    /// Check whether `region` induces a connected subgraph.
    ///
    /// A member with no same-region neighbour fails immediately, so a region of
    /// one unit counts as disconnected. An empty region passes.
    /// `visited` must be all-false on entry and is all-false again on return.
    fn region_is_connected(&self, region: u32, visited: &mut [bool]) -> bool {
        let members = self.members(region);
        if members.is_empty() { return true }

        // Any isolated member disconnects the region.
        if members.iter().any(|&u| !self.graph().edges(u).any(|v| self.region(v) == region)) { return false }

        // BFS from the first member within `region`.
        let mut seen = 1;
        let mut queue = VecDeque::from([members[0]]);
        visited[members[0]] = true;
        while let Some(u) = queue.pop_front() {
            for v in self.graph().edges(u) {
                if !visited[v] && self.region(v) == region {
                    visited[v] = true;
                    seen += 1;
                    queue.push_back(v);
                }
            }
        }

        members.iter().for_each(|&u| visited[u] = false);
        seen == members.len()
    }

    /// Connected components (as unit index lists) of a region.
    pub fn region_components(&self, region: u32) -> Vec<Vec<usize>> {
        let mut components = Vec::new();
        let mut visited = vec![false; self.num_units()];
        for &u in self.members(region) {
            if visited[u] { continue }
            visited[u] = true;
            let mut component = Vec::new();
            let mut queue = VecDeque::from([u]);
            while let Some(v) = queue.pop_front() {
                component.push(v);
                for w in self.graph().edges(v) {
                    if !visited[w] && self.region(w) == region {
                        visited[w] = true;
                        queue.push_back(w);
                    }
                }
            }
            components.push(component);
        }
        components
    }
}

#[cfg(test)]
mod tests {
    use crate::{build_graph, AdjacencyList, Configuration, ReferenceTable, RegionReference, RewardWeights, UnitRecord};

    // Path a - b - c - d - e - f, regions [R1 R1 R1 R2 R2 R2].
    fn make_path() -> Configuration {
        let ids = ["a", "b", "c", "d", "e", "f"];
        let units = ids.iter().enumerate()
            .map(|(i, &id)| UnitRecord::new(id, if i < 3 { "R1" } else { "R2" }, "X", 10))
            .collect::<Vec<_>>();
        let adjacency = AdjacencyList::from_edges(ids, ids.windows(2).map(|w| (w[0], w[1])));
        let reference = [RegionReference::new("R1", ["X"]), RegionReference::new("R2", ["X"])]
            .into_iter().collect::<ReferenceTable>();
        Configuration::new(build_graph(&units, &adjacency, &reference).unwrap())
    }

    #[test]
    fn unchanged_configuration_checks_nothing() {
        let configuration = make_path();
        assert!(configuration.regions_to_check().is_empty());
        assert!(configuration.is_contiguous());
        assert!(configuration.is_globally_contiguous());
    }

    #[test]
    fn flip_at_the_border_stays_contiguous() {
        let mut configuration = make_path();
        configuration.flip_to("c", "R2").unwrap();

        assert_eq!(configuration.regions_to_check(), vec![0, 1]);
        assert!(configuration.is_contiguous());
        assert_eq!(configuration.region_components(1).len(), 1);
    }

    #[test]
    fn single_unit_region_is_disconnected() {
        let mut configuration = make_path();
        configuration.flip_to("c", "R2").unwrap();
        configuration.flip_to("b", "R2").unwrap();

        // R1 = {a}: its only member has no same-region neighbour.
        assert!(!configuration.is_contiguous());
        assert_eq!(configuration.region_components(0), vec![vec![0]]);
    }

    #[test]
    fn split_region_is_detected() {
        // Chain x1 - x2 - m - y1 - y2 in R2, with m also touching r - r2 in R1.
        let units = vec![
            UnitRecord::new("x1", "R2", "X", 10),
            UnitRecord::new("x2", "R2", "X", 10),
            UnitRecord::new("m", "R2", "X", 10),
            UnitRecord::new("y1", "R2", "X", 10),
            UnitRecord::new("y2", "R2", "X", 10),
            UnitRecord::new("r", "R1", "X", 10),
            UnitRecord::new("r2", "R1", "X", 10),
        ];
        let adjacency = AdjacencyList::from_edges(
            ["x1", "x2", "m", "y1", "y2", "r", "r2"],
            [("x1", "x2"), ("x2", "m"), ("m", "y1"), ("y1", "y2"), ("m", "r"), ("r", "r2")],
        );
        let reference = [RegionReference::new("R1", ["X"]), RegionReference::new("R2", ["X"])]
            .into_iter().collect::<ReferenceTable>();
        let mut configuration = Configuration::new(build_graph(&units, &adjacency, &reference).unwrap());

        // Moving m into R1 cuts R2 into {x1, x2} and {y1, y2}; no member is isolated.
        configuration.flip_to("m", "R1").unwrap();
        let r2 = configuration.graph().region_index("R2").unwrap();
        let mut components = configuration.region_components(r2);
        components.iter_mut().for_each(|c| c.sort_unstable());
        components.sort();
        let index = |id| configuration.graph().unit_index(id).unwrap();
        let mut expected = vec![vec![index("x1"), index("x2")], vec![index("y1"), index("y2")]];
        expected.iter_mut().for_each(|c| c.sort_unstable());
        expected.sort();
        assert_eq!(components, expected);
        assert!(!configuration.is_contiguous());
        assert!(!configuration.is_globally_contiguous());
        assert_eq!(crate::reward(&configuration, &RewardWeights::default()), 0.0);
    }

    #[test]
    fn neighbouring_region_is_checked_too() {
        // Star: hub h in R1 connects leaves x, y (R2) which touch nothing else in R2.
        //   x - h - y,  h - z (R1), z - w (R1)
        let units = vec![
            UnitRecord::new("x", "R2", "X", 10),
            UnitRecord::new("h", "R2", "X", 10),
            UnitRecord::new("y", "R2", "X", 10),
            UnitRecord::new("z", "R1", "X", 10),
            UnitRecord::new("w", "R1", "X", 10),
        ];
        let adjacency = AdjacencyList::from_edges(
            ["x", "h", "y", "z", "w"],
            [("x", "h"), ("h", "y"), ("h", "z"), ("z", "w")],
        );
        let reference = [RegionReference::new("R1", ["X"]), RegionReference::new("R2", ["X"])]
            .into_iter().collect::<ReferenceTable>();
        let mut configuration = Configuration::new(build_graph(&units, &adjacency, &reference).unwrap());

        // Moving the hub into R1 keeps R1 connected but strands x and y.
        configuration.flip_to("h", "R1").unwrap();
        let r2 = configuration.graph().region_index("R2").unwrap();
        assert!(configuration.regions_to_check().contains(&r2));
        assert!(!configuration.is_contiguous());
    }
}

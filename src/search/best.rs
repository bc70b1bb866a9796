use crate::partition::Configuration;

/// The `capacity` best `(configuration, reward)` pairs seen so far, sorted by
/// descending reward. Among equal rewards, earlier entries come first.
#[derive(Clone, Debug)]
pub(crate) struct BestSet {
    capacity: usize,
    entries: Vec<(Configuration, f64)>,
}

impl BestSet {
    pub(crate) fn new(capacity: usize) -> Self {
        Self { capacity, entries: Vec::with_capacity(capacity) }
    }

    #[cfg(test)]
    #[inline] pub(crate) fn len(&self) -> usize { self.entries.len() }

    /// Highest reward tracked so far.
    #[inline] pub(crate) fn best(&self) -> Option<f64> { self.entries.first().map(|&(_, reward)| reward) }

    /// Lowest reward tracked so far.
    #[inline] pub(crate) fn worst(&self) -> Option<f64> { self.entries.last().map(|&(_, reward)| reward) }

    /// Offer a candidate. Until the set is full every candidate is taken; after
    /// that a candidate replaces the worst entry only if its reward is strictly greater.
    /// Returns whether the candidate was taken.
    pub(crate) fn offer(&mut self, configuration: &Configuration, reward: f64) -> bool {
        if self.capacity == 0 { return false }
        if self.entries.len() == self.capacity {
            match self.worst() {
                Some(worst) if reward > worst => { self.entries.pop(); }
                _ => return false,
            }
        }
        let at = self.entries.partition_point(|&(_, tracked)| tracked >= reward);
        self.entries.insert(at, (configuration.clone(), reward));
        true
    }

    pub(crate) fn into_vec(self) -> Vec<(Configuration, f64)> { self.entries }
}

#[cfg(test)]
mod tests {
    use super::BestSet;
    use crate::{build_graph, AdjacencyList, Configuration, ReferenceTable, RegionReference, UnitRecord};

    fn make_configuration() -> Configuration {
        let units = vec![UnitRecord::new("a", "R1", "X", 1), UnitRecord::new("b", "R2", "X", 1)];
        let adjacency = AdjacencyList::from_edges(["a", "b"], [("a", "b")]);
        let reference = [RegionReference::new("R1", ["X"]), RegionReference::new("R2", ["X"])]
            .into_iter().collect::<ReferenceTable>();
        Configuration::new(build_graph(&units, &adjacency, &reference).unwrap())
    }

    fn rewards(set: &BestSet) -> Vec<f64> {
        set.clone().into_vec().into_iter().map(|(_, reward)| reward).collect()
    }

    #[test]
    fn fills_then_replaces_the_worst() {
        let configuration = make_configuration();
        let mut set = BestSet::new(3);
        for reward in [2.0, 5.0, 1.0] { assert!(set.offer(&configuration, reward)) }
        assert_eq!(rewards(&set), vec![5.0, 2.0, 1.0]);

        // Better than the worst but not the best still gets in.
        assert!(set.offer(&configuration, 3.0));
        assert_eq!(rewards(&set), vec![5.0, 3.0, 2.0]);
        assert!(!set.offer(&configuration, 0.5));
        assert_eq!(set.len(), 3);
        assert_eq!(set.best(), Some(5.0));
    }

    #[test]
    fn ties_keep_discovery_order() {
        let mut first = make_configuration();
        first.flip_to("a", "R2").unwrap();
        let second = make_configuration();
        let mut set = BestSet::new(1);

        assert!(set.offer(&first, 4.0));
        assert!(!set.offer(&second, 4.0));
        let kept = set.into_vec();
        assert_eq!(kept[0].0.history().len(), 1);
    }

    #[test]
    fn equal_rewards_insert_after_existing() {
        let mut flipped = make_configuration();
        flipped.flip_to("b", "R1").unwrap();
        let plain = make_configuration();
        let mut set = BestSet::new(3);

        set.offer(&plain, 2.0);
        set.offer(&flipped, 2.0);
        let kept = set.into_vec();
        assert!(kept[0].0.history().is_empty());
        assert_eq!(kept[1].0.history().len(), 1);
    }
}

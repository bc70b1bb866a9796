use std::time::Instant;

use log::{debug, info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

use crate::{
    objective::{reward, RewardWeights},
    partition::Configuration,
    search::{best::BestSet, SearchConfig, SearchError, SearchOutcome, Termination},
};

/// Levels of the generation tree below the initial configuration.
pub const TREE_DEPTH: usize = 3;

/// One scored offspring.
#[derive(Clone, Debug)]
pub(crate) struct Offspring {
    pub(crate) configuration: Configuration,
    pub(crate) reward: f64,
    pub(crate) flips: usize,
}

/// Copy `parent` and apply up to `flips` random flips to the copy, then score it.
///
/// If the eligible pool runs dry the offspring keeps the flips applied so far
/// and is scored as it stands.
pub(crate) fn make_offspring(parent: &Configuration, flips: usize, seed: u64, weights: &RewardWeights) -> Offspring {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut configuration = parent.clone();
    let mut applied = 0;
    while applied < flips && configuration.flip(&mut rng).is_ok() { applied += 1 }

    let reward = reward(&configuration, weights);
    Offspring { configuration, reward, flips: applied }
}

/// Keep the `survivors` highest rewards. The sort is stable, so equal rewards
/// keep their discovery order.
pub(crate) fn select(mut offspring: Vec<Offspring>, survivors: usize) -> Vec<Offspring> {
    offspring.sort_by(|a, b| b.reward.total_cmp(&a.reward));
    offspring.truncate(survivors);
    offspring
}

struct Search<'a> {
    config: &'a SearchConfig,
    rng: StdRng,
    best: BestSet,
    flips: u64,
    offspring_evaluated: u64,
    started: Instant,
    termination: Option<Termination>,
}

impl Search<'_> {
    fn budget_exceeded(&self) -> Option<Termination> {
        if self.config.max_flips.is_some_and(|max| self.flips >= max) {
            return Some(Termination::FlipBudget)
        }
        if self.config.time_limit_secs.is_some_and(|secs| self.started.elapsed().as_secs_f64() >= secs) {
            return Some(Termination::TimeLimit)
        }
        None
    }

    /// Build and score the offspring of `parent`.
    /// Seeds are drawn in order from the search stream, so the batch is the same
    /// whether it is built sequentially or in parallel.
    fn reproduce(&mut self, parent: &Configuration, path: &[usize]) -> Vec<Offspring> {
        let seeds = (0..self.config.offspring_per_generation)
            .map(|_| self.rng.random::<u64>())
            .collect::<Vec<_>>();

        let (flips, weights) = (self.config.flips_per_offspring, &self.config.weights);
        let batch = if self.config.parallel {
            seeds.into_par_iter().map(|seed| make_offspring(parent, flips, seed, weights)).collect::<Vec<_>>()
        } else {
            seeds.into_iter().map(|seed| make_offspring(parent, flips, seed, weights)).collect::<Vec<_>>()
        };

        for (i, offspring) in batch.iter().enumerate() {
            if offspring.flips < flips {
                warn!("path={path:?} offspring={i} exhausted eligible units after {} of {flips} flips", offspring.flips);
            }
        }
        self.flips += batch.iter().map(|offspring| offspring.flips as u64).sum::<u64>();
        self.offspring_evaluated += batch.len() as u64;
        batch
    }

    /// Offer every survivor to the best-so-far set.
    fn track(&mut self, survivors: &[Offspring]) {
        for offspring in survivors {
            let previous = self.best.best();
            if self.best.offer(&offspring.configuration, offspring.reward)
                && previous.is_none_or(|best| offspring.reward > best)
            {
                info!("new best reward={:.6} flips={} changed={}",
                    offspring.reward, self.flips, offspring.configuration.changed().len());
            }
        }
    }

    /// Reproduce and select below `parent`, then descend into each survivor.
    fn descend(&mut self, parent: &Configuration, path: &mut Vec<usize>) {
        if path.len() == TREE_DEPTH || self.termination.is_some() { return }
        if let Some(termination) = self.budget_exceeded() {
            warn!("stopping early: {termination:?} after {} flips", self.flips);
            self.termination = Some(termination);
            return
        }

        let batch = self.reproduce(parent, path);
        let survivors = select(batch, self.config.survivors_per_generation);
        debug!("path={path:?} survivors={} top_reward={:.6}",
            survivors.len(), survivors.first().map_or(0.0, |offspring| offspring.reward));
        self.track(&survivors);

        for (i, survivor) in survivors.iter().enumerate() {
            path.push(i);
            self.descend(&survivor.configuration, path);
            path.pop();
            if self.termination.is_some() { break }
        }
    }
}

/// Run the three-level reproduce/select tree from `initial` and return the best
/// configurations seen, highest reward first.
///
/// Each parent produces `offspring_per_generation` offspring of
/// `flips_per_offspring` flips each; the best `survivors_per_generation` are
/// tracked and become parents one level down. Runs with the same seed and
/// parameters return identical outcomes, with or without `parallel`.
pub fn evolve(initial: &Configuration, config: &SearchConfig) -> Result<SearchOutcome, SearchError> {
    config.validate()?;
    info!(
        "evolve units={} flips_per_offspring={} offspring={} survivors={} keep={} seed={} parallel={}",
        initial.num_units(), config.flips_per_offspring, config.offspring_per_generation,
        config.survivors_per_generation, config.keep, config.seed, config.parallel,
    );

    let mut search = Search {
        config,
        rng: StdRng::seed_from_u64(config.seed),
        best: BestSet::new(config.keep),
        flips: 0,
        offspring_evaluated: 0,
        started: Instant::now(),
        termination: None,
    };
    search.descend(initial, &mut Vec::with_capacity(TREE_DEPTH));

    let termination = search.termination.unwrap_or(Termination::Completed);
    info!(
        "evolve finished termination={termination:?} flips={} offspring={} best={:?} elapsed={:.2?}",
        search.flips, search.offspring_evaluated, search.best.best(), search.started.elapsed(),
    );

    Ok(SearchOutcome {
        best: search.best.into_vec(),
        flips: search.flips,
        offspring_evaluated: search.offspring_evaluated,
        termination,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_graph, AdjacencyList, ReferenceTable, RegionReference, UnitRecord};

    // Ring of six split 3/3: every single flip keeps both regions contiguous.
    fn make_ring() -> Configuration {
        let ids = ["a", "b", "c", "d", "e", "f"];
        let units = ids.iter().enumerate()
            .map(|(i, &id)| UnitRecord::new(id, if i < 3 { "R1" } else { "R2" }, "X", 100))
            .collect::<Vec<_>>();
        let edges = (0..6).map(|i| (ids[i], ids[(i + 1) % 6]));
        let adjacency = AdjacencyList::from_edges(ids, edges);
        let reference = [RegionReference::new("R1", ["X"]), RegionReference::new("R2", ["X"])]
            .into_iter().collect::<ReferenceTable>();
        Configuration::new(build_graph(&units, &adjacency, &reference).unwrap())
    }

    fn offspring(rewards: &[f64]) -> Vec<Offspring> {
        let configuration = make_ring();
        rewards.iter().enumerate()
            .map(|(i, &reward)| Offspring { configuration: configuration.clone(), reward, flips: i })
            .collect()
    }

    #[test]
    fn select_keeps_top_rewards_in_discovery_order() {
        let kept = select(offspring(&[1.0, 3.0, 2.0, 3.0, 0.0]), 3);
        assert_eq!(kept.iter().map(|o| o.reward).collect::<Vec<_>>(), vec![3.0, 3.0, 2.0]);
        // The two 3.0 offspring were found at positions 1 and 3.
        assert_eq!(kept.iter().map(|o| o.flips).collect::<Vec<_>>(), vec![1, 3, 2]);
    }

    #[test]
    fn offspring_stops_when_pool_is_exhausted() {
        let parent = make_ring();
        let built = make_offspring(&parent, 100, 9, &RewardWeights::default());
        assert!(built.flips < 100);
        assert_eq!(built.configuration.eligible_count(), 0);
        assert_eq!(built.configuration.history().len(), built.flips);
    }

    #[test]
    fn same_seed_gives_same_offspring() {
        let parent = make_ring();
        let weights = RewardWeights::default();
        let a = make_offspring(&parent, 2, 5, &weights);
        let b = make_offspring(&parent, 2, 5, &weights);
        assert_eq!(a.configuration.history(), b.configuration.history());
        assert_eq!(a.reward, b.reward);
    }

    #[test]
    fn evolve_explores_the_full_tree() {
        let initial = make_ring();
        let config = SearchConfig::new(1, 3, 2).with_keep(2).with_seed(11);
        let outcome = evolve(&initial, &config).unwrap();

        // 1 + 2 + 4 parents, 3 offspring each.
        assert_eq!(outcome.offspring_evaluated, 21);
        assert_eq!(outcome.termination, Termination::Completed);
        assert_eq!(outcome.best.len(), 2);
        assert!(outcome.best[0].1 >= outcome.best[1].1);
        assert!(outcome.best.iter().all(|(configuration, _)| configuration.audit().is_ok()));
    }

    #[test]
    fn evolve_rejects_invalid_config() {
        let initial = make_ring();
        let config = SearchConfig::new(1, 2, 3);
        assert!(matches!(evolve(&initial, &config), Err(SearchError::InvalidConfig(_))));
    }

    #[test]
    fn flip_budget_stops_the_search() {
        let initial = make_ring();
        let config = SearchConfig::new(1, 3, 2).with_max_flips(3);
        let outcome = evolve(&initial, &config).unwrap();

        assert_eq!(outcome.termination, Termination::FlipBudget);
        assert_eq!(outcome.offspring_evaluated, 3);
        assert_eq!(outcome.flips, 3);
        assert!(!outcome.best.is_empty());
    }
}

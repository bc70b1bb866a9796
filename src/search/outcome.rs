use serde::Serialize;

use crate::partition::Configuration;

/// Why a search stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The full generation tree was explored.
    Completed,
    /// The flip budget ran out before the tree was complete.
    FlipBudget,
    /// The time limit ran out before the tree was complete.
    TimeLimit,
}

/// Result of [`evolve`](super::evolve).
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Best `(configuration, reward)` pairs, highest reward first.
    pub best: Vec<(Configuration, f64)>,
    /// Flips applied across all offspring.
    pub flips: u64,
    /// Offspring built and scored.
    pub offspring_evaluated: u64,
    pub termination: Termination,
}

impl SearchOutcome {
    /// The highest-scoring configuration, if any offspring was scored.
    pub fn best_configuration(&self) -> Option<&Configuration> {
        self.best.first().map(|(configuration, _)| configuration)
    }

    pub fn best_reward(&self) -> Option<f64> {
        self.best.first().map(|&(_, reward)| reward)
    }
}

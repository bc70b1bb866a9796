// Flip and time budgets end a search early with the best found so far.
mod common;

use constituency_search::{evolve, SearchConfig, Termination};

#[test]
fn unlimited_search_completes_the_tree() {
    let initial = common::grid(5, 5, 2);
    let outcome = evolve(&initial, &SearchConfig::new(2, 3, 2)).unwrap();

    assert_eq!(outcome.termination, Termination::Completed);
    assert_eq!(outcome.offspring_evaluated, 3 * (1 + 2 + 4));
}

#[test]
fn flip_budget_is_checked_before_each_batch() {
    let initial = common::grid(5, 5, 2);
    let config = SearchConfig::new(2, 3, 2).with_max_flips(10);
    let outcome = evolve(&initial, &config).unwrap();

    assert_eq!(outcome.termination, Termination::FlipBudget);
    // Two batches of six flips: the budget is crossed during the second.
    assert_eq!(outcome.offspring_evaluated, 6);
    assert_eq!(outcome.flips, 12);
    assert_eq!(outcome.best.len(), 3);
}

#[test]
fn expired_time_limit_returns_nothing_scored() {
    let initial = common::grid(5, 5, 2);
    let config = SearchConfig::new(2, 3, 2).with_time_limit(1e-9);
    let outcome = evolve(&initial, &config).unwrap();

    assert_eq!(outcome.termination, Termination::TimeLimit);
    assert_eq!(outcome.offspring_evaluated, 0);
    assert!(outcome.best.is_empty());
}

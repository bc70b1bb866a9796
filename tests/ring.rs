// End-to-end searches over small rings.
mod common;

use constituency_search::{evolve, is_contiguous, reward, RewardWeights, SearchConfig, Termination};

#[test]
fn every_single_flip_on_a_four_ring_is_gated_to_zero() {
    // A-B-C-D-A split 2/2: any flip leaves a region of one unit.
    // The flip budget stops the search after the first generation.
    let initial = common::ring(4, 2, 1_000);
    let config = SearchConfig::new(1, 4, 2).with_keep(3).with_seed(3).with_max_flips(4);
    let outcome = evolve(&initial, &config).unwrap();

    assert_eq!(outcome.termination, Termination::FlipBudget);
    assert_eq!(outcome.offspring_evaluated, 4);
    assert_eq!(outcome.best.len(), 2);
    for (configuration, score) in &outcome.best {
        assert_eq!(*score, 0.0);
        assert!(!is_contiguous(configuration));
    }
}

#[test]
fn four_ring_recovers_contiguity_one_level_down() {
    // From a 1/3 split the only eligible flips either absorb the single unit
    // or restore a 2/2 split, so every second-generation offspring is contiguous.
    let initial = common::ring(4, 2, 1_000);
    let config = SearchConfig::new(1, 4, 2).with_keep(3).with_seed(3);
    let outcome = evolve(&initial, &config).unwrap();

    assert_eq!(outcome.termination, Termination::Completed);
    let (best, score) = &outcome.best[0];
    assert!(*score > 0.0);
    assert!(is_contiguous(best));
    assert_eq!(best.history().len(), 2);
}

#[test]
fn six_ring_search_returns_only_contiguous_configurations() {
    let initial = common::ring(6, 3, 1_000);
    let config = SearchConfig::new(1, 4, 2).with_keep(2).with_seed(17);
    let outcome = evolve(&initial, &config).unwrap();

    assert_eq!(outcome.best.len(), 2);
    for (configuration, score) in &outcome.best {
        assert!(*score > 0.0);
        assert!(is_contiguous(configuration));
        assert!(configuration.is_globally_contiguous());
        assert_eq!(*score, reward(configuration, &config.weights));
    }
    let scores = outcome.best.iter().map(|&(_, score)| score).collect::<Vec<_>>();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn continuity_prefers_fewer_changes() {
    // With SER integral everywhere and no county misalignment, fewer flips score higher.
    let initial = common::ring(6, 3, 29_800);
    let weights = RewardWeights::default();
    let config = SearchConfig::new(1, 4, 2).with_keep(1).with_seed(5).with_weights(weights);
    let outcome = evolve(&initial, &config).unwrap();

    let (best, score) = &outcome.best[0];
    assert_eq!(best.history().len(), 1);
    assert_eq!(*score, reward(best, &weights));
}

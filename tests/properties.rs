// Invariants that must hold after any sequence of flips.
mod common;

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use constituency_search::Configuration;

fn check_invariants(configuration: &Configuration) -> Result<(), TestCaseError> {
    let graph = configuration.graph();
    for node in 0..configuration.num_units() {
        for neighbor in graph.edges(node) {
            prop_assert!(graph.is_adjacent(neighbor, node), "asymmetric edge {node} -> {neighbor}");
        }
        prop_assert!(!configuration.neighbor_regions(node).contains(&configuration.region(node)));
        prop_assert_eq!(configuration.is_boundary(node), !configuration.neighbor_regions(node).is_empty());
        prop_assert!(configuration.change_count(node) <= 1);
    }
    let total = configuration.regions_present().map(|region| configuration.region_population(region)).sum::<u64>();
    prop_assert_eq!(total, graph.total_population());
    prop_assert_eq!(configuration.audit(), Ok(()));
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn flips_preserve_invariants(
        width in 3usize..8,
        height in 2usize..7,
        bands in 2usize..4,
        seed in any::<u64>(),
        flips in 1usize..40,
    ) {
        prop_assume!(bands <= width);
        let mut configuration = common::grid(width, height, bands);
        let mut rng = StdRng::seed_from_u64(seed);
        check_invariants(&configuration)?;

        for _ in 0..flips {
            if configuration.flip(&mut rng).is_err() {
                prop_assert_eq!(configuration.eligible_count(), 0);
                break
            }
            check_invariants(&configuration)?;
            // Bands start contiguous, so the scoped check agrees with the global one.
            prop_assert_eq!(configuration.is_contiguous(), configuration.is_globally_contiguous());
        }
    }

    #[test]
    fn flipped_units_never_flip_again(seed in any::<u64>(), flips in 1usize..30) {
        let mut configuration = common::grid(5, 5, 3);
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..flips {
            if configuration.flip(&mut rng).is_err() { break }
        }
        let mut units = configuration.history().iter().map(|flip| flip.unit).collect::<Vec<_>>();
        let count = units.len();
        units.sort_unstable();
        units.dedup();
        prop_assert_eq!(units.len(), count);
    }
}

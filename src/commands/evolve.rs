use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;

use constituency_search::{
    breakdown, evolve, ser_by_population, vna_by_population, Configuration, InputDocument, RewardBreakdown,
    SearchConfig, SeatTarget, Termination,
};

use crate::cli::EvolveArgs;
use crate::commands::load_configuration;
use crate::io::{assert_not_stdout, read_json, write_json};

#[derive(Serialize)]
struct FlipRecord<'a> {
    unit: &'a str,
    from: &'a str,
    to: &'a str,
}

#[derive(Serialize)]
struct Assignment<'a> {
    unit: &'a str,
    region: &'a str,
}

#[derive(Serialize)]
struct ResultEntry<'a> {
    rank: usize,
    reward: f64,
    breakdown: RewardBreakdown,
    changed_units: Vec<&'a str>,
    flips: Vec<FlipRecord<'a>>,
    ser: BTreeMap<String, f64>,
    vna: BTreeMap<String, f64>,
    assignments: Vec<Assignment<'a>>,
}

#[derive(Serialize)]
struct Output<'a> {
    config: &'a SearchConfig,
    termination: Termination,
    flips: u64,
    offspring_evaluated: u64,
    initial_reward: f64,
    results: Vec<ResultEntry<'a>>,
}

/// Apply command-line overrides on top of the config file (or the defaults).
fn search_config(args: &EvolveArgs) -> Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => read_json::<SearchConfig>(path)?,
        None => SearchConfig::default(),
    };
    if let Some(seed) = args.seed { config.seed = seed }
    if let Some(flips) = args.flips { config.flips_per_offspring = flips }
    if let Some(offspring) = args.offspring { config.offspring_per_generation = offspring }
    if let Some(survivors) = args.survivors { config.survivors_per_generation = survivors }
    if let Some(keep) = args.keep { config.keep = keep }
    if args.parallel { config.parallel = true }
    if let Some(max_flips) = args.max_flips { config.max_flips = Some(max_flips) }
    if let Some(secs) = args.time_limit { config.time_limit_secs = Some(secs) }
    config.validate()?;
    Ok(config)
}

/// One ranked configuration, with excluded units merged back into its SER, VNA and assignments.
fn result_entry<'a>(rank: usize, document: &'a InputDocument, configuration: &'a Configuration, reward: f64,
    config: &SearchConfig,
) -> Result<ResultEntry<'a>> {
    let graph = configuration.graph();
    let populations = document.full_populations(configuration);
    let ratio = config.weights.national_ratio;
    Ok(ResultEntry {
        rank,
        reward,
        breakdown: breakdown(configuration, &config.weights, None),
        changed_units: configuration.changed_units(),
        flips: configuration.history().iter()
            .map(|flip| FlipRecord {
                unit: graph.unit_id(flip.unit),
                from: graph.region_name(flip.from),
                to: graph.region_name(flip.to),
            })
            .collect(),
        ser: ser_by_population(&populations, ratio),
        vna: vna_by_population(&populations, |region| document.seats(region), SeatTarget::Nearest, ratio)?,
        assignments: document.full_assignments(configuration).into_iter()
            .map(|(unit, region)| Assignment { unit, region })
            .collect(),
    })
}

pub fn run(_cli: &crate::cli::Cli, args: &EvolveArgs) -> Result<()> {
    assert_not_stdout(&args.output)?;
    let config = search_config(args)?;
    let (document, initial) = load_configuration(&args.input)?;
    let initial_reward = breakdown(&initial, &config.weights, None).total;

    let outcome = evolve(&initial, &config).context("run search")?;

    let results = outcome.best.iter().enumerate()
        .map(|(rank, (configuration, reward))| result_entry(rank + 1, &document, configuration, *reward, &config))
        .collect::<Result<Vec<_>>>()?;

    for entry in &results {
        println!(
            "#{} reward={:.6} county_boundary={:.6} continuity={:.6} ser={:.6} changed={}",
            entry.rank, entry.reward, entry.breakdown.county_boundary, entry.breakdown.continuity,
            entry.breakdown.ser, entry.changed_units.len(),
        );
    }

    let output = Output {
        config: &config,
        termination: outcome.termination,
        flips: outcome.flips,
        offspring_evaluated: outcome.offspring_evaluated,
        initial_reward,
        results,
    };
    write_json(&args.output, &output, args.force)?;
    println!("Wrote {} configurations (initial reward {:.6}) -> {}",
        output.results.len(), initial_reward, args.output.display());
    Ok(())
}

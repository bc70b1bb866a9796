use serde::Serialize;

use crate::{
    objective::{CompactnessMeasure, RewardWeights},
    partition::Configuration,
};

/// The individual terms of a reward evaluation.
///
/// A non-contiguous configuration scores zero on every term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct RewardBreakdown {
    pub contiguous: bool,
    pub county_boundary: f64,
    pub continuity: f64,
    pub ser: f64,
    pub compactness: f64,
    pub total: f64,
}

/// Two-variable exponential decay, `exp(-a·x - b·y)`.
#[inline]
pub(crate) fn exp_decay(x: f64, y: f64, a: f64, b: f64) -> f64 {
    (-a * x - b * y).exp()
}

/// Bump around the integers: 1 at an integer, falling towards 0 halfway between.
/// `width` is the decay constant `d` in `1 - exp(-d / |s - round(s)|)`.
#[inline]
pub(crate) fn bump(s: f64, width: f64) -> f64 {
    let x = (s - s.round_ties_even()).abs();
    if x == 0.0 { 1.0 } else { 1.0 - (-width / x).exp() }
}

/// Decay over the population and count of units outside their region's home counties.
pub fn county_boundary_term(configuration: &Configuration, weights: &RewardWeights) -> f64 {
    let graph = configuration.graph();
    let (population, count) = (0..configuration.num_units())
        .filter(|&node| !graph.is_home_county(configuration.region(node), graph.county(node)))
        .fold((0u64, 0u64), |(population, count), node| (population + graph.population(node), count + 1));
    exp_decay(population as f64, count as f64, weights.a_cb, weights.b_cb)
}

/// Decay over the population and count of units that have changed region.
pub fn continuity_term(configuration: &Configuration, weights: &RewardWeights) -> f64 {
    let population = configuration.changed().iter()
        .map(|&node| configuration.graph().population(node))
        .sum::<u64>();
    let count = configuration.changed().len();
    exp_decay(population as f64, count as f64, weights.a_cont, weights.b_cont)
}

/// Scaled sum of the SER bump over every region present.
pub fn ser_term(configuration: &Configuration, weights: &RewardWeights) -> f64 {
    let total = configuration.regions_present()
        .map(|region| configuration.region_population(region) as f64 / weights.national_ratio)
        .map(|ser| bump(ser, weights.bump_width))
        .sum::<f64>();
    weights.a_ser * total
}

/// Score a configuration; zero unless every affected region is contiguous.
pub fn reward(configuration: &Configuration, weights: &RewardWeights) -> f64 {
    breakdown(configuration, weights, None).total
}

/// Score a configuration with an additional compactness term.
pub fn reward_with(configuration: &Configuration, weights: &RewardWeights, compactness: &dyn CompactnessMeasure) -> f64 {
    breakdown(configuration, weights, Some(compactness)).total
}

/// Score a configuration and return each term separately.
pub fn breakdown(configuration: &Configuration, weights: &RewardWeights, compactness: Option<&dyn CompactnessMeasure>)
    -> RewardBreakdown
{
    if !configuration.is_contiguous() { return RewardBreakdown::default() }

    let county_boundary = county_boundary_term(configuration, weights);
    let continuity = continuity_term(configuration, weights);
    let ser = ser_term(configuration, weights);
    let compactness = compactness.map_or(0.0, |measure| {
        weights.a_compact * configuration.regions_present()
            .map(|region| measure.region_score(configuration, region))
            .sum::<f64>()
    });

    RewardBreakdown {
        contiguous: true,
        county_boundary,
        continuity,
        ser,
        compactness,
        total: county_boundary + continuity + ser + compactness,
    }
}

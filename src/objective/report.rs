use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::partition::Configuration;

/// Errors raised by the SER/VNA report queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportError {
    /// The region is unknown, or has no units in this configuration.
    RegionNotFound(String),
    /// VNA against the current seats was requested, but the region has no (non-zero) seat count.
    SeatsUnknown(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::RegionNotFound(region) => write!(f, "region '{region}' not found in configuration"),
            ReportError::SeatsUnknown(region) => write!(f, "no current seat count for region '{region}'"),
        }
    }
}

impl std::error::Error for ReportError {}

/// Seat count that VNA measures against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatTarget {
    /// The nearest whole number of seats to the SER, and at least one.
    #[default]
    Nearest,
    /// The seats the region currently holds, from the reference table.
    Current,
}

fn present_region(configuration: &Configuration, region: &str) -> Result<u32, ReportError> {
    configuration.graph().region_index(region)
        .filter(|&index| !configuration.members(index).is_empty())
        .ok_or_else(|| ReportError::RegionNotFound(region.to_string()))
}

#[inline]
fn ser_of(configuration: &Configuration, region: u32, national_ratio: f64) -> f64 {
    configuration.region_population(region) as f64 / national_ratio
}

/// `(SER - seats) / seats`, with `seats` picked by `target`.
fn vna_value(region: &str, ser: f64, current_seats: Option<u32>, target: SeatTarget) -> Result<f64, ReportError> {
    let seats = match target {
        SeatTarget::Nearest => ser.round_ties_even().max(1.0),
        SeatTarget::Current => match current_seats {
            Some(seats) if seats > 0 => seats as f64,
            _ => return Err(ReportError::SeatsUnknown(region.to_string())),
        },
    };
    Ok((ser - seats) / seats)
}

fn vna_of(configuration: &Configuration, region: u32, target: SeatTarget, national_ratio: f64) -> Result<f64, ReportError> {
    let graph = configuration.graph();
    vna_value(graph.region_name(region), ser_of(configuration, region, national_ratio), graph.seats(region), target)
}

/// Seat-Equivalent-Representation of a region: its population over `national_ratio`.
pub fn ser(configuration: &Configuration, region: &str, national_ratio: f64) -> Result<f64, ReportError> {
    let region = present_region(configuration, region)?;
    Ok(ser_of(configuration, region, national_ratio))
}

/// Variance from National Average of a region: `(SER - seats) / seats`.
pub fn vna(configuration: &Configuration, region: &str, target: SeatTarget, national_ratio: f64)
    -> Result<f64, ReportError>
{
    let region = present_region(configuration, region)?;
    vna_of(configuration, region, target, national_ratio)
}

/// SER of every region present, keyed by region name.
pub fn ser_by_region(configuration: &Configuration, national_ratio: f64) -> BTreeMap<String, f64> {
    configuration.regions_present()
        .map(|region| (configuration.graph().region_name(region).to_string(), ser_of(configuration, region, national_ratio)))
        .collect()
}

/// VNA of every region present, keyed by region name.
pub fn vna_by_region(configuration: &Configuration, target: SeatTarget, national_ratio: f64)
    -> Result<BTreeMap<String, f64>, ReportError>
{
    configuration.regions_present()
        .map(|region| Ok((
            configuration.graph().region_name(region).to_string(),
            vna_of(configuration, region, target, national_ratio)?,
        )))
        .collect()
}

/// SER of every region in a population table, such as one that merges excluded units back.
pub fn ser_by_population(populations: &BTreeMap<String, u64>, national_ratio: f64) -> BTreeMap<String, f64> {
    populations.iter().map(|(region, &population)| (region.clone(), population as f64 / national_ratio)).collect()
}

/// VNA of every region in a population table; `seats` supplies the current seat counts.
pub fn vna_by_population(populations: &BTreeMap<String, u64>, seats: impl Fn(&str) -> Option<u32>, target: SeatTarget,
    national_ratio: f64,
) -> Result<BTreeMap<String, f64>, ReportError> {
    populations.iter()
        .map(|(region, &population)| {
            let ser = population as f64 / national_ratio;
            Ok((region.clone(), vna_value(region, ser, seats(region), target)?))
        })
        .collect()
}

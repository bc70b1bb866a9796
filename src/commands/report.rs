use anyhow::Result;

use constituency_search::{ser_by_population, vna_by_population, SearchConfig, SeatTarget};

use crate::cli::ReportArgs;
use crate::commands::load_configuration;
use crate::io::read_json;

/// Population per seat: the flag, else the config file's weights, else the reward default.
fn national_ratio(args: &ReportArgs) -> Result<f64> {
    if let Some(ratio) = args.national_ratio { return Ok(ratio) }
    let config = match &args.config {
        Some(path) => read_json::<SearchConfig>(path)?,
        None => SearchConfig::default(),
    };
    Ok(config.weights.national_ratio)
}

pub fn run(_cli: &crate::cli::Cli, args: &ReportArgs) -> Result<()> {
    let (document, configuration) = load_configuration(&args.input)?;
    let target = if args.current_seats { SeatTarget::Current } else { SeatTarget::Nearest };
    let ratio = national_ratio(args)?;
    let populations = document.full_populations(&configuration);

    println!("{:<24} {:>12} {:>10} {:>10}", "region", "population", "SER", "VNA");
    for (region, ser) in ser_by_population(&populations, ratio) {
        let population = populations[&region];
        let single = [(region.clone(), population)].into_iter().collect();
        // Regions without a usable seat count show "n/a".
        let vna = match vna_by_population(&single, |name| document.seats(name), target, ratio) {
            Ok(values) => format!("{:>10.4}", values[&region]),
            Err(err) => {
                log::warn!("{err}");
                format!("{:>10}", "n/a")
            }
        };
        println!("{region:<24} {population:>12} {ser:>10.4} {vna}");
    }
    Ok(())
}

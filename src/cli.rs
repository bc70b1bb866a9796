use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Stochastic search over constituency boundaries
#[derive(Parser, Debug)]
#[command(name = "constituency-search", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for better boundaries and write the best configurations (forbids stdout)
    Evolve(EvolveArgs),

    /// Print SER and VNA for every region of the input configuration
    Report(ReportArgs),
}

#[derive(Args, Debug)]
pub struct EvolveArgs {
    /// Input document (units, adjacency and region reference table)
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output result file (must be a file path; "-" is rejected)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Search config file (JSON); flags below override its fields
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Seed of the search's random stream
    #[arg(long)]
    pub seed: Option<u64>,

    /// Flips applied to each offspring
    #[arg(long)]
    pub flips: Option<usize>,

    /// Offspring produced from each parent
    #[arg(long)]
    pub offspring: Option<usize>,

    /// Offspring retained from each batch
    #[arg(long)]
    pub survivors: Option<usize>,

    /// Number of best configurations to return
    #[arg(long)]
    pub keep: Option<usize>,

    /// Build and score offspring in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Stop once this many flips have been applied
    #[arg(long)]
    pub max_flips: Option<u64>,

    /// Stop after this many seconds
    #[arg(long)]
    pub time_limit: Option<f64>,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Input document (units, adjacency and region reference table)
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Measure VNA against the seats in the reference table instead of the nearest whole seat count
    #[arg(long)]
    pub current_seats: bool,

    /// Search config file (JSON) whose reward weights supply the national ratio
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Population represented by one seat (overrides the config file)
    #[arg(long)]
    pub national_ratio: Option<f64>,
}

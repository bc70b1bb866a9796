use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod io;

use cli::{Cli, Commands};
use commands::{evolve, report};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match &cli.command {
        Commands::Evolve(args) => evolve::run(&cli, args),
        Commands::Report(args) => report::run(&cli, args),
    }
}

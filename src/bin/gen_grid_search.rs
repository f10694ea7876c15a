//! Prints the scooby grid search build rules: every combination of
//! geometrically spaced `alpha`, `gamma` and `epsilon` levels.
use anyhow::Result;
use clap::Parser;
use log::info;
use scooby_sweep::{GridSweep, SweepConfig, emit, init_logger};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Generate scooby grid search build rules")]
struct Cli {
    /// JSON sweep configuration, the built-in scooby grid when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of levels per parameter
    #[arg(long)]
    levels: Option<usize>,

    /// Write build rules to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

/// Effective configuration: config file or built-in grid, then command line overrides
fn config_from(cli: &Cli) -> Result<SweepConfig> {
    let mut config = match &cli.config {
        Some(path) => SweepConfig::load(path)?,
        None => SweepConfig::grid(),
    };
    if let Some(levels) = cli.levels {
        config = config.n_levels(levels);
    }
    Ok(config)
}

fn main() -> Result<()> {
    init_logger();
    let cli = Cli::parse();

    let config = config_from(&cli)?;
    if cli.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let sweep = GridSweep::new(config)?;
    if let Some(n) = emit(&sweep, cli.output.as_deref())? {
        info!("{n} build rules written");
    }
    Ok(())
}

//! Prints the scooby Latin hypercube exploration build rules.
use anyhow::Result;
use clap::Parser;
use log::info;
use scooby_sweep::{LhsSweep, SweepConfig, emit, init_logger};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Generate scooby Latin hypercube build rules")]
struct Cli {
    /// JSON sweep configuration, the built-in scooby LHS exploration when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of samples
    #[arg(long)]
    samples: Option<usize>,

    /// Random seed for reproducible output, unseeded when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Write build rules to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

/// Effective configuration: config file or built-in LHS exploration, then command line overrides
fn config_from(cli: &Cli) -> Result<SweepConfig> {
    let mut config = match &cli.config {
        Some(path) => SweepConfig::load(path)?,
        None => SweepConfig::lhs(),
    };
    if let Some(samples) = cli.samples {
        config = config.n_samples(samples);
    }
    if let Some(seed) = cli.seed {
        config = config.seed(seed);
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

    let sweep = LhsSweep::new(config)?;
    if let Some(n) = emit(&sweep, cli.output.as_deref())? {
        info!("{n} build rules written");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scooby_sweep::Sweep;

    fn lines(config: SweepConfig) -> Vec<String> {
        LhsSweep::new(config)
            .unwrap()
            .rules()
            .iter()
            .map(|r| r.to_string())
            .collect()
    }

    #[test]
    fn test_no_argument_is_unseeded_scooby_lhs() {
        let cli = Cli::try_parse_from(["gen_exp_lhs"]).unwrap();
        let config = config_from(&cli).unwrap();
        assert_eq!(config, SweepConfig::lhs());
        assert!(config.to_json().unwrap().contains("\"seed\": null"));
    }

    #[test]
    fn test_seed_and_samples_override() {
        let cli = Cli::try_parse_from(["gen_exp_lhs", "--seed", "42", "--samples", "8"]).unwrap();
        let config = config_from(&cli).unwrap();
        assert_eq!(config, SweepConfig::lhs().seed(42).n_samples(8));
        let first = lines(config.clone());
        assert_eq!(first.len(), 8);
        assert_eq!(first, lines(config));
    }

    #[test]
    fn test_dump_config_flag() {
        let cli = Cli::try_parse_from(["gen_exp_lhs", "--dump-config", "--seed", "7"]).unwrap();
        assert!(cli.dump_config);
        let json = config_from(&cli).unwrap().to_json().unwrap();
        let config: SweepConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, SweepConfig::lhs().seed(7));
    }
}

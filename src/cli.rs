use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Wavelet histogram synopses for range-sum estimation.
#[derive(Parser)]
#[command(
    name = "wavesyn",
    version,
    about = "Haar wavelet synopses for approximate range queries"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Build a synopsis and compare it against the exact histogram.
    Run(RunArgs),
    /// Build a synopsis and write it to a sparse JSON file.
    Build(BuildArgs),
    /// Estimate a range count from a saved synopsis.
    Query(QueryArgs),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "wavesyn.toml")]
    pub config: PathBuf,

    /// Override the sample file from config.
    #[arg(short, long)]
    pub samples: Option<PathBuf>,

    /// Override the number of retained coefficients.
    #[arg(short)]
    pub k: Option<usize>,

    /// Override the query lower bound.
    #[arg(long, allow_negative_numbers = true)]
    pub qmin: Option<f64>,

    /// Override the query upper bound.
    #[arg(long, allow_negative_numbers = true)]
    pub qmax: Option<f64>,

    /// Number of comparison rows to print.
    #[arg(long, default_value_t = 20)]
    pub rows: usize,

    /// Write the full comparison report as JSON.
    #[arg(long)]
    pub json: Option<PathBuf>,
}

/// Arguments for the `build` subcommand.
#[derive(clap::Args)]
pub struct BuildArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "wavesyn.toml")]
    pub config: PathBuf,

    /// Override the sample file from config.
    #[arg(short, long)]
    pub samples: Option<PathBuf>,

    /// Override the number of retained coefficients.
    #[arg(short)]
    pub k: Option<usize>,

    /// Path for the synopsis JSON file.
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the `query` subcommand.
#[derive(clap::Args)]
pub struct QueryArgs {
    /// Path to a synopsis written by `build`.
    #[arg(long)]
    pub synopsis: PathBuf,

    /// Query lower bound.
    #[arg(long, allow_negative_numbers = true)]
    pub qmin: f64,

    /// Query upper bound.
    #[arg(long, allow_negative_numbers = true)]
    pub qmax: f64,

    /// Bucket inclusion policy: "contained" or "overlap-weighted".
    #[arg(long, default_value = "contained")]
    pub policy: String,
}

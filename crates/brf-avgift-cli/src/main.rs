mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use brf_avgift_core::types::{current_year, Year};
use commands::analysis::{AnalyzeArgs, SensitivityArgs};
use commands::land_lease::LandLeaseArgs;
use commands::maintenance::{InflateArgs, MaintenanceArgs};
use commands::price_index::KpifArgs;
use commands::rates::RealRateArgs;
use commands::recommendation::RecommendArgs;

/// Long-term fee sustainability analysis for Swedish housing cooperatives
#[derive(Parser)]
#[command(
    name = "brfa",
    version,
    about = "Long-term fee sustainability analysis for Swedish housing cooperatives (BRF)",
    long_about = "Estimates whether a BRF's membership fee covers its long-term costs \
                  (maintenance annuities, real interest, projected ground rent) and \
                  recommends a fee adjustment in one of six tiers."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Evaluation year (defaults to the current calendar year)
    #[arg(long, global = true)]
    year: Option<Year>,

    /// Log calculation steps to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full fee analysis on a cooperative
    Analyze(AnalyzeArgs),
    /// Real interest rate from nominal rate and inflation (Fisher)
    RealRate(RealRateArgs),
    /// Bring a historical cost to today's money
    Inflate(InflateArgs),
    /// Annuitise a maintenance plan
    Maintenance(MaintenanceArgs),
    /// Project statutory ground rent for leased land
    LandLease(LandLeaseArgs),
    /// Classify a surplus/deficit per m² into a fee recommendation
    Recommend(RecommendArgs),
    /// Sweep expected inflation and nominal rate
    Sensitivity(SensitivityArgs),
    /// Print the KPIF price index in use
    Kpif(KpifArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "brf_avgift_core=debug,brfa=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let year = cli.year.unwrap_or_else(current_year);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analysis::run_analyze(args, year),
        Commands::RealRate(args) => commands::rates::run_real_rate(args),
        Commands::Inflate(args) => commands::maintenance::run_inflate(args, year),
        Commands::Maintenance(args) => commands::maintenance::run_maintenance(args, year),
        Commands::LandLease(args) => commands::land_lease::run_land_lease(args, year),
        Commands::Recommend(args) => commands::recommendation::run_recommend(args),
        Commands::Sensitivity(args) => commands::analysis::run_sensitivity(args, year),
        Commands::Kpif(args) => commands::price_index::run_kpif(args),
        Commands::Version => {
            println!("brfa {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

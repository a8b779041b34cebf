//! Realvol CLI - Batch Realized Volatility Reports
//!
//! This is the batch entry point for the realized volatility analytics
//! workspace.
//!
//! # Commands
//!
//! - `realvol analyze AAPL MSFT` - Print trailing-horizon volatility tables
//! - `realvol analyze AAPL --plot` - Also save price/volatility charts
//! - `realvol check` - Verify configuration, credentials, and the estimators
//!
//! # Architecture
//!
//! As part of the service layer, this crate orchestrates the adapter layer
//! (price feeds), the kernel layer (estimators), and the reporting layer
//! (tables, exports, charts) behind a single command line interface.

use clap::{Parser, Subcommand};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::analyze::AnalyzeArgs;
use config::CliConfig;

/// Realized volatility batch reports from end-of-day closes
#[derive(Parser)]
#[command(name = "realvol")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "realvol.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch closes and print trailing-horizon volatility reports
    Analyze(AnalyzeArgs),

    /// Check configuration, credentials, and run an offline self-test
    Check,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up MARKETSTACK_API_KEY and friends from a local .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config = CliConfig::load(Path::new(&cli.config))?;

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(&args, &config).await,
        Commands::Check => commands::check::run(&config).await,
    }
}

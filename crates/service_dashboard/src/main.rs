//! Realvol Dashboard
//!
//! Web dashboard and JSON API for realized volatility analytics.

use clap::Parser;
use service_dashboard::config::{build_config, CliArgs as ConfigCliArgs};
use service_dashboard::server::Server;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Realvol Dashboard - web UI and JSON API for realized volatility
#[derive(Parser, Debug)]
#[command(name = "realvol-dashboard")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long, env = "REALVOL_SERVER_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "REALVOL_SERVER_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "REALVOL_LOG_LEVEL")]
    log_level: Option<String>,

    /// Symbol analyzed when a request does not name one
    #[arg(long, env = "REALVOL_DEFAULT_SYMBOL")]
    symbol: Option<String>,
}

impl From<Args> for ConfigCliArgs {
    fn from(args: Args) -> Self {
        ConfigCliArgs {
            config_file: args.config,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
            symbol: args.symbol,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Pick up MARKETSTACK_API_KEY and friends from a local .env file
    dotenv::dotenv().ok();

    let args = Args::parse();
    let cli_args: ConfigCliArgs = args.into();
    let config = build_config(&cli_args)?;

    // Initialize tracing
    init_tracing(config.log_level.as_filter_str());

    tracing::info!("Realvol dashboard v{}", service_dashboard::VERSION);
    tracing::info!(
        host = %config.host,
        port = %config.port,
        log_level = %config.log_level,
        environment = %config.environment,
        default_symbol = %config.default_symbol,
        default_window = %config.default_window,
        default_years = %config.default_years,
        "Server configuration loaded"
    );

    // Create and start the server
    let server = Server::new(config);
    tracing::info!(address = %server.socket_addr(), "Starting server");

    server.run().await?;

    Ok(())
}

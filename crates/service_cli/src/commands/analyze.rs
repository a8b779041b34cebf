//! Analyze command implementation
//!
//! Fetches end-of-day closes for each requested symbol and prints a
//! trailing-horizon volatility report. A symbol that fails to fetch or
//! render is logged and skipped; the command errors only when every symbol
//! failed. Charts are always rendered in annual terms, whatever
//! `--no-annualize` says about the printed report.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tracing::{error, info};

use adapter_marketstack::client::MarketstackClient;
use adapter_marketstack::csv_file::CsvFileSource;
use adapter_marketstack::source::{DateRange, EodSource};
use adapter_marketstack::synthetic::GbmSource;
use vol_core::vol::horizons::{default_horizons, horizon_report, HorizonReport};
use vol_core::vol::{rolling_volatility, EstimatorConfig, VolMethod};
use vol_report::chart::render_chart;
use vol_report::export::{reports_to_json, write_horizon_csv, SymbolReport};
use vol_report::table::horizon_table;

use crate::{CliError, Result};

/// Arguments for the analyze command
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Ticker symbols to analyze
    #[arg(required_unless_present = "csv")]
    pub symbols: Vec<String>,

    /// Calendar years of history to fetch (default from config: 10)
    #[arg(long)]
    pub years: Option<u32>,

    /// Estimator formula (sum-of-squares, sample-std)
    #[arg(short, long, default_value = "sample-std")]
    pub method: String,

    /// Report daily volatility instead of annualized
    #[arg(long)]
    pub no_annualize: bool,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Directory for charts and CSV exports (default from config: outputs)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Save a price and rolling volatility chart per symbol
    #[arg(long)]
    pub plot: bool,

    /// Rolling window for the chart, in trading days (default from config: 30)
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Analyze seeded synthetic data instead of calling the live feed
    #[arg(long)]
    pub offline: bool,

    /// Read closes from a CSV file (date,close columns) instead of the live feed
    #[arg(long, value_name = "FILE", conflicts_with = "offline")]
    pub csv: Option<PathBuf>,
}

/// How per-symbol results leave the command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

struct OutputOptions {
    format: OutputFormat,
    dir: PathBuf,
    plot: bool,
}

/// Run the analyze command
pub async fn run(args: &AnalyzeArgs, config: &crate::config::CliConfig) -> Result<()> {
    let years = args.years.unwrap_or(config.years);
    if years == 0 || years > 50 {
        return Err(CliError::InvalidArgument(format!(
            "years must be between 1 and 50, got {}",
            years
        )));
    }

    let window = args.window.unwrap_or(config.window);
    if window == 0 || window > 252 {
        return Err(CliError::InvalidArgument(format!(
            "window must be between 1 and 252, got {}",
            window
        )));
    }

    let method: VolMethod = args.method.parse().map_err(CliError::InvalidArgument)?;
    let estimator = EstimatorConfig::new(method).with_annualize(!args.no_annualize);

    let format = match args.format.as_str() {
        "table" => OutputFormat::Table,
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: table, json, csv",
                other
            )));
        }
    };

    let symbols = resolve_symbols(args)?;
    let output = OutputOptions {
        format,
        dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| config.output_dir.clone()),
        plot: args.plot,
    };

    // Charts and CSV exports land on disk; everything else goes to stdout
    if output.plot || output.format == OutputFormat::Csv {
        std::fs::create_dir_all(&output.dir)?;
    }

    // Live and file-backed feeds are shared across symbols; the synthetic
    // feed is seeded per symbol so demo output differs between tickers.
    let shared_source: Option<Arc<dyn EodSource>> = if let Some(path) = &args.csv {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        Some(Arc::new(CsvFileSource::new(path)))
    } else if args.offline {
        None
    } else {
        Some(Arc::new(MarketstackClient::from_env()?))
    };

    let range = DateRange::trailing_years(years);
    info!(
        "Analyzing {} symbol(s) over {} calendar years ({})",
        symbols.len(),
        years,
        range
    );

    let mut reports: Vec<(String, HorizonReport)> = Vec::new();
    let mut failed = 0usize;

    for symbol in &symbols {
        let source: Arc<dyn EodSource> = match &shared_source {
            Some(source) => source.clone(),
            None => Arc::new(GbmSource::new(100.0, 0.05, 0.2, symbol_seed(symbol))),
        };

        match analyze_symbol(&source, symbol, range, &estimator, window, &output).await {
            Ok(report) => reports.push((symbol.clone(), report)),
            Err(err) => {
                error!("{}: {}", symbol, err);
                failed += 1;
            }
        }
    }

    if reports.is_empty() {
        return Err(CliError::AllSymbolsFailed(failed));
    }

    if output.format == OutputFormat::Json {
        let entries: Vec<SymbolReport<'_>> = reports
            .iter()
            .map(|(symbol, report)| SymbolReport::new(symbol, report))
            .collect();
        println!("{}", reports_to_json(&entries)?);
    }

    info!("Analyzed {} of {} symbol(s)", reports.len(), symbols.len());
    Ok(())
}

/// Fetch, estimate, and emit output for one symbol
async fn analyze_symbol(
    source: &Arc<dyn EodSource>,
    symbol: &str,
    range: DateRange,
    estimator: &EstimatorConfig,
    window: usize,
    output: &OutputOptions,
) -> Result<HorizonReport> {
    info!("Fetching {} via {}", symbol, source.name());
    let series = source.eod_closes(symbol, range).await?;
    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        info!(
            "  {} closes from {} to {}",
            series.len(),
            first.date,
            last.date
        );
    }

    let report = horizon_report(&series, &default_horizons(), estimator);

    match output.format {
        OutputFormat::Table => {
            println!("\n{} Volatility:", symbol);
            print!("{}", horizon_table(&report));
        }
        OutputFormat::Csv => {
            let path = output.dir.join(format!("{}.csv", symbol));
            let file = std::fs::File::create(&path)?;
            write_horizon_csv(file, symbol, &report)?;
            info!("  Wrote {}", path.display());
        }
        OutputFormat::Json => {}
    }

    if output.plot {
        let chart_config = estimator.with_annualize(true);
        let returns = series.log_returns();
        let rolling = rolling_volatility(&returns, window, &chart_config);
        let path = output.dir.join(format!("{}.png", symbol));
        render_chart(&path, symbol, &series, &rolling, window)?;
        info!("  Saved chart to {}", path.display());
    }

    Ok(report)
}

/// Normalize requested symbols; with `--csv` the file stem names the series
fn resolve_symbols(args: &AnalyzeArgs) -> Result<Vec<String>> {
    let mut symbols: Vec<String> = args
        .symbols
        .iter()
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();

    if let Some(path) = &args.csv {
        if symbols.len() > 1 {
            return Err(CliError::InvalidArgument(
                "--csv reads a single series; give at most one symbol".to_string(),
            ));
        }
        if symbols.is_empty() {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("SERIES");
            symbols.push(stem.to_uppercase());
        }
    } else if symbols.is_empty() {
        return Err(CliError::InvalidArgument("no symbols given".to_string()));
    }

    Ok(symbols)
}

/// Deterministic per-symbol seed for the synthetic feed
fn symbol_seed(symbol: &str) -> u64 {
    symbol
        .bytes()
        .fold(17u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> AnalyzeArgs {
        AnalyzeArgs {
            symbols: vec!["DEMO".to_string()],
            years: Some(1),
            method: "sample-std".to_string(),
            no_annualize: false,
            format: "table".to_string(),
            output_dir: None,
            plot: false,
            window: None,
            offline: true,
            csv: None,
        }
    }

    #[test]
    fn test_symbol_seed_is_deterministic() {
        assert_eq!(symbol_seed("AAPL"), symbol_seed("AAPL"));
        assert_ne!(symbol_seed("AAPL"), symbol_seed("MSFT"));
    }

    #[test]
    fn test_resolve_symbols_normalizes() {
        let mut args = base_args();
        args.symbols = vec![" aapl ".to_string(), "msft".to_string(), "".to_string()];

        let symbols = resolve_symbols(&args).unwrap();
        assert_eq!(symbols, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_resolve_symbols_requires_symbols_without_csv() {
        let mut args = base_args();
        args.symbols = Vec::new();

        assert!(matches!(
            resolve_symbols(&args),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_resolve_symbols_takes_label_from_csv_stem() {
        let mut args = base_args();
        args.symbols = Vec::new();
        args.csv = Some(PathBuf::from("data/spy_closes.csv"));

        let symbols = resolve_symbols(&args).unwrap();
        assert_eq!(symbols, vec!["SPY_CLOSES"]);
    }

    #[test]
    fn test_resolve_symbols_rejects_multiple_with_csv() {
        let mut args = base_args();
        args.symbols = vec!["AAPL".to_string(), "MSFT".to_string()];
        args.csv = Some(PathBuf::from("closes.csv"));

        assert!(matches!(
            resolve_symbols(&args),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_run_offline_table() {
        let args = base_args();
        let config = crate::config::CliConfig::default();

        run(&args, &config).await.unwrap();
    }

    #[tokio::test]
    async fn test_run_offline_json_multiple_symbols() {
        let mut args = base_args();
        args.symbols = vec!["AAA".to_string(), "BBB".to_string()];
        args.format = "json".to_string();

        let config = crate::config::CliConfig::default();
        run(&args, &config).await.unwrap();
    }

    #[tokio::test]
    async fn test_run_offline_writes_csv_and_chart() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = base_args();
        args.format = "csv".to_string();
        args.plot = true;
        args.output_dir = Some(dir.path().to_path_buf());

        let config = crate::config::CliConfig::default();
        run(&args, &config).await.unwrap();

        let csv = std::fs::read_to_string(dir.path().join("DEMO.csv")).unwrap();
        assert!(csv.starts_with("symbol,horizon,days,volatility"));
        assert!(csv.lines().any(|line| line.starts_with("DEMO,1Y,252,")));

        let png = std::fs::read(dir.path().join("DEMO.png")).unwrap();
        assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn test_run_rejects_unknown_format() {
        let mut args = base_args();
        args.format = "yaml".to_string();

        let config = crate::config::CliConfig::default();
        let err = run(&args, &config).await.unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
        assert!(err.to_string().contains("yaml"));
    }

    #[tokio::test]
    async fn test_run_rejects_unknown_method() {
        let mut args = base_args();
        args.method = "bogus".to_string();

        let config = crate::config::CliConfig::default();
        let err = run(&args, &config).await.unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_run_rejects_out_of_range_window() {
        let mut args = base_args();
        args.window = Some(253);

        let config = crate::config::CliConfig::default();
        let err = run(&args, &config).await.unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_run_missing_csv_file() {
        let mut args = base_args();
        args.offline = false;
        args.csv = Some(PathBuf::from("/nonexistent/closes.csv"));

        let config = crate::config::CliConfig::default();
        let err = run(&args, &config).await.unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_run_fails_when_every_symbol_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "date,close\n").unwrap();

        let mut args = base_args();
        args.offline = false;
        args.csv = Some(path);
        args.symbols = vec!["EMPTY".to_string()];

        let config = crate::config::CliConfig::default();
        let err = run(&args, &config).await.unwrap_err();
        assert!(matches!(err, CliError::AllSymbolsFailed(1)));
    }
}

//! Check command implementation
//!
//! Verifies configuration, feed credentials, and the estimator pipeline
//! without touching the network. The self-test runs the batch estimator over
//! the built-in sample quotes and fails if the result is not finite.

use tracing::info;

use adapter_marketstack::client::API_KEY_VAR;
use adapter_marketstack::source::{DateRange, EodSource};
use adapter_marketstack::synthetic::SampleSource;
use vol_core::vol::{realized_volatility, EstimatorConfig};

use crate::{CliError, Result};

/// Run the check command
pub async fn run(config: &crate::config::CliConfig) -> Result<()> {
    println!("realvol {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Configuration:");
    println!("  years:      {}", config.years);
    println!("  window:     {}", config.window);
    println!("  output dir: {}", config.output_dir.display());
    println!();

    match std::env::var(API_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() => {
            println!("Marketstack:  access key configured ({})", API_KEY_VAR);
        }
        _ => {
            println!(
                "Marketstack:  no access key; set {} or use --offline / --csv",
                API_KEY_VAR
            );
        }
    }
    println!();

    info!("Running estimator self-test on sample quotes");
    let source = SampleSource;
    let series = source
        .eod_closes("SAMPLE", DateRange::trailing_years(1))
        .await?;
    let returns = series.log_returns();

    let daily = realized_volatility(
        returns.values(),
        &EstimatorConfig::sample_std().with_annualize(false),
    );
    let annualized = realized_volatility(returns.values(), &EstimatorConfig::sample_std());

    if !daily.is_finite() || !annualized.is_finite() {
        return Err(CliError::SelfTest(format!(
            "estimates over {} sample returns were not finite",
            returns.len()
        )));
    }

    println!(
        "Self-test:    {} closes, daily {:.4}%, annualized {:.2}%",
        series.len(),
        daily * 100.0,
        annualized * 100.0
    );
    println!();
    println!("All checks passed.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_check_passes_with_defaults() {
        let config = crate::config::CliConfig::default();
        run(&config).await.unwrap();
    }
}

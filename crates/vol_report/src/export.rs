//! CSV and JSON export of kernel outputs.
//!
//! CSV rows only carry defined values; the rolling NaN prefix is dropped
//! here so downstream spreadsheets never see `NaN` cells.

use std::io::Write;

use serde::Serialize;
use vol_core::vol::horizons::HorizonReport;
use vol_core::vol::RollingVolSeries;

use crate::error::Result;

/// One ticker's horizon report with its symbol attached.
///
/// This is the JSON shape for batch output and the dashboard summary
/// endpoint, one object per analyzed symbol.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolReport<'a> {
    /// Ticker the report belongs to.
    pub symbol: &'a str,
    /// Defined horizon estimates.
    pub horizons: &'a HorizonReport,
}

impl<'a> SymbolReport<'a> {
    /// Pairs a symbol with its report.
    pub fn new(symbol: &'a str, horizons: &'a HorizonReport) -> Self {
        Self { symbol, horizons }
    }
}

/// Serializes per-symbol reports as pretty-printed JSON.
pub fn reports_to_json(reports: &[SymbolReport<'_>]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}

/// Writes a horizon report as CSV with a `symbol,horizon,days,volatility`
/// header.
pub fn write_horizon_csv<W: Write>(
    writer: W,
    symbol: &str,
    report: &HorizonReport,
) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["symbol", "horizon", "days", "volatility"])?;
    for entry in report.iter() {
        csv.write_record([
            symbol,
            &entry.label,
            &entry.days.to_string(),
            &entry.volatility.to_string(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes a rolling series as CSV with a `date,volatility` header,
/// skipping undefined entries.
pub fn write_rolling_csv<W: Write>(writer: W, rolling: &RollingVolSeries) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["date", "volatility"])?;
    for (date, value) in rolling.defined() {
        csv.write_record([date.to_string(), value.to_string()])?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vol_core::series::PriceSeries;
    use vol_core::types::Date;
    use vol_core::vol::horizons::HorizonEstimate;
    use vol_core::vol::{rolling_volatility, EstimatorConfig};

    fn report() -> HorizonReport {
        HorizonReport::from_entries(vec![
            HorizonEstimate {
                label: "1Y".to_string(),
                days: 252,
                volatility: 0.245,
            },
            HorizonEstimate {
                label: "2Y".to_string(),
                days: 504,
                volatility: 0.261,
            },
        ])
    }

    #[test]
    fn test_horizon_csv_layout() {
        let mut buf = Vec::new();
        write_horizon_csv(&mut buf, "AAPL", &report()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let expected = "\
symbol,horizon,days,volatility\n\
AAPL,1Y,252,0.245\n\
AAPL,2Y,504,0.261\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_empty_horizon_csv_has_header_only() {
        let mut buf = Vec::new();
        let empty = HorizonReport::from_entries(Vec::new());
        write_horizon_csv(&mut buf, "AAPL", &empty).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "symbol,horizon,days,volatility\n"
        );
    }

    #[test]
    fn test_rolling_csv_drops_nan_prefix() {
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let dates = (0..5u64).map(|i| start.add_days(i)).collect();
        let closes = vec![100.0, 101.0, 99.0, 100.0, 102.0];
        let returns = PriceSeries::from_parts(dates, closes).unwrap().log_returns();
        let rolling = rolling_volatility(&returns, 2, &EstimatorConfig::default());

        let mut buf = Vec::new();
        write_rolling_csv(&mut buf, &rolling).unwrap();
        let text = String::from_utf8(buf).unwrap();

        // Four returns, window two: three defined rows.
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "date,volatility");
        assert!(lines[1].starts_with("2025-01-03,"));
        assert!(!text.contains("NaN"));
    }

    #[test]
    fn test_reports_to_json_shape() {
        let horizon_report = report();
        let reports = vec![SymbolReport::new("AAPL", &horizon_report)];
        let json = reports_to_json(&reports).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["symbol"], "AAPL");
        assert_eq!(value[0]["horizons"][0]["label"], "1Y");
        assert_eq!(value[0]["horizons"][1]["days"], 504);
    }
}

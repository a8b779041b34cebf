//! Terminal tables for batch reports.
//!
//! Output is a Markdown pipe table so it pastes cleanly into notes and
//! issue trackers, with volatility formatted as a percentage.

use vol_core::vol::horizons::HorizonReport;

/// Formats a volatility figure as a percentage with two decimals.
///
/// ```
/// assert_eq!(vol_report::table::format_percent(0.245013), "24.50%");
/// ```
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Renders a horizon report as a Markdown pipe table.
///
/// Labels are left-aligned, numeric columns right-aligned, and column
/// widths grow to fit the content. An empty report yields just the header
/// and separator rows.
pub fn horizon_table(report: &HorizonReport) -> String {
    let headers = ["Horizon", "Days", "Volatility"];
    let rows: Vec<[String; 3]> = report
        .iter()
        .map(|e| {
            [
                e.label.clone(),
                e.days.to_string(),
                format_percent(e.volatility),
            ]
        })
        .collect();

    let mut widths = [headers[0].len(), headers[1].len(), headers[2].len()];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }
    let [lw, dw, vw] = widths;

    let mut out = String::new();
    out.push_str(&format!(
        "| {:<lw$} | {:>dw$} | {:>vw$} |\n",
        headers[0], headers[1], headers[2]
    ));
    out.push_str(&format!(
        "|:{}|{}:|{}:|\n",
        "-".repeat(lw + 1),
        "-".repeat(dw + 1),
        "-".repeat(vw + 1)
    ));
    for row in &rows {
        out.push_str(&format!(
            "| {:<lw$} | {:>dw$} | {:>vw$} |\n",
            row[0], row[1], row[2]
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vol_core::vol::horizons::{HorizonEstimate, HorizonReport};

    fn entry(label: &str, days: usize, volatility: f64) -> HorizonEstimate {
        HorizonEstimate {
            label: label.to_string(),
            days,
            volatility,
        }
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.245013), "24.50%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(1.0), "100.00%");
        assert_eq!(format_percent(0.005), "0.50%");
    }

    #[test]
    fn test_table_layout() {
        let report = HorizonReport::from_entries(vec![
            entry("1Y", 252, 0.245),
            entry("2Y", 504, 0.261),
        ]);
        let table = horizon_table(&report);
        let expected = "\
| Horizon | Days | Volatility |\n\
|:--------|-----:|-----------:|\n\
| 1Y      |  252 |     24.50% |\n\
| 2Y      |  504 |     26.10% |\n";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_empty_report_keeps_header() {
        let report = HorizonReport::from_entries(Vec::new());
        let table = horizon_table(&report);
        assert_eq!(table.lines().count(), 2);
        assert!(table.starts_with("| Horizon |"));
    }

    #[test]
    fn test_wide_label_grows_column() {
        let report = HorizonReport::from_entries(vec![entry("Trailing10Y", 2520, 0.31)]);
        let table = horizon_table(&report);
        let mut lines = table.lines();
        let header = lines.next().unwrap();
        let separator = lines.next().unwrap();
        let row = lines.next().unwrap();
        assert_eq!(header.len(), separator.len());
        assert_eq!(header.len(), row.len());
        assert!(row.contains("| Trailing10Y |"));
        assert!(row.contains("31.00%"));
    }
}

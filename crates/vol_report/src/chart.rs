//! Two-panel PNG charts: closes on top, rolling volatility below.

use std::path::Path;

use plotters::prelude::*;
use vol_core::series::PriceSeries;
use vol_core::vol::RollingVolSeries;

use crate::error::{ReportError, Result};

/// Rendered chart width in pixels.
pub const CHART_WIDTH: u32 = 1200;

/// Rendered chart height in pixels; each panel takes half.
pub const CHART_HEIGHT: u32 = 800;

const PURPLE: RGBColor = RGBColor(128, 0, 128);

fn render_err<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Render(e.to_string())
}

// 10% headroom around the data, clamped at zero.
fn padded_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    let span = (max - min).max(1e-8);
    let padding = span * 0.1;
    Some(((min - padding).max(0.0), max + padding))
}

/// Renders the price and rolling-volatility panels to a PNG file.
///
/// Both panels share the series' date axis. The rolling panel only plots
/// defined values; if every entry is NaN it stays empty with a default
/// axis. At least two closes are required.
pub fn render_chart(
    path: &Path,
    symbol: &str,
    prices: &PriceSeries,
    rolling: &RollingVolSeries,
    window: usize,
) -> Result<()> {
    if prices.len() < 2 {
        return Err(ReportError::InsufficientData {
            needed: 2,
            got: prices.len(),
        });
    }
    let (Some(first), Some(last)) = (prices.first(), prices.last()) else {
        return Err(ReportError::InsufficientData { needed: 2, got: 0 });
    };
    let x_range = first.date.into_inner()..last.date.into_inner();

    let (price_lo, price_hi) = padded_range(prices.points().iter().map(|p| p.close))
        .unwrap_or((0.0, 1.0));
    let (vol_lo, vol_hi) =
        padded_range(rolling.defined().map(|(_, v)| v)).unwrap_or((0.0, 1.0));

    tracing::debug!(symbol, window, path = %path.display(), "rendering chart");

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let (upper, lower) = root.split_vertically(CHART_HEIGHT / 2);

    let mut price_chart = ChartBuilder::on(&upper)
        .caption(format!("{} Close", symbol), ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.clone(), price_lo..price_hi)
        .map_err(render_err)?;
    price_chart
        .configure_mesh()
        .y_desc("Close")
        .draw()
        .map_err(render_err)?;
    price_chart
        .draw_series(LineSeries::new(
            prices.points().iter().map(|p| (p.date.into_inner(), p.close)),
            &BLUE,
        ))
        .map_err(render_err)?;

    let mut vol_chart = ChartBuilder::on(&lower)
        .caption(
            format!("{}-Day Rolling Volatility", window),
            ("sans-serif", 24),
        )
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, vol_lo..vol_hi)
        .map_err(render_err)?;
    vol_chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Annualized Volatility")
        .draw()
        .map_err(render_err)?;
    vol_chart
        .draw_series(LineSeries::new(
            rolling.defined().map(|(d, v)| (d.into_inner(), v)),
            &PURPLE,
        ))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Renders the chart into PNG bytes via a temporary file.
///
/// The bitmap backend wants a file path, so this writes to the system
/// temp directory and reads the result back.
pub fn render_chart_png(
    symbol: &str,
    prices: &PriceSeries,
    rolling: &RollingVolSeries,
    window: usize,
) -> Result<Vec<u8>> {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let path = std::env::temp_dir().join(format!(
        "realvol_chart_{}_{}.png",
        std::process::id(),
        nanos
    ));

    let rendered = render_chart(&path, symbol, prices, rolling, window);
    let bytes = rendered.and_then(|()| Ok(std::fs::read(&path)?));
    let _ = std::fs::remove_file(&path);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use vol_core::types::Date;
    use vol_core::vol::{rolling_volatility, EstimatorConfig};

    const PNG_MAGIC: [u8; 4] = [0x89, b'P', b'N', b'G'];

    fn series(len: usize) -> PriceSeries {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let dates = (0..len).map(|i| start.add_days(i as u64)).collect();
        let closes = (0..len)
            .map(|i| 120.0 + 15.0 * (i as f64 * 0.1).sin())
            .collect();
        PriceSeries::from_parts(dates, closes).unwrap()
    }

    #[test]
    fn test_render_chart_writes_png() {
        let prices = series(300);
        let rolling =
            rolling_volatility(&prices.log_returns(), 63, &EstimatorConfig::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aapl.png");
        render_chart(&path, "AAPL", &prices, &rolling, 63).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.len() > PNG_MAGIC.len());
        assert_eq!(&bytes[..4], &PNG_MAGIC);
    }

    #[test]
    fn test_render_chart_png_bytes() {
        let prices = series(100);
        let rolling =
            rolling_volatility(&prices.log_returns(), 30, &EstimatorConfig::default());

        let bytes = render_chart_png("AAPL", &prices, &rolling, 30).unwrap();
        assert_eq!(&bytes[..4], &PNG_MAGIC);
    }

    #[test]
    fn test_all_nan_rolling_still_renders() {
        // Window larger than the history: the lower panel has no points.
        let prices = series(10);
        let rolling =
            rolling_volatility(&prices.log_returns(), 63, &EstimatorConfig::default());
        assert_eq!(rolling.defined().count(), 0);

        let bytes = render_chart_png("AAPL", &prices, &rolling, 63).unwrap();
        assert_eq!(&bytes[..4], &PNG_MAGIC);
    }

    #[test]
    fn test_too_few_points_is_error() {
        let prices = series(1);
        let rolling =
            rolling_volatility(&prices.log_returns(), 2, &EstimatorConfig::default());

        let err = render_chart_png("AAPL", &prices, &rolling, 2).unwrap_err();
        assert!(matches!(
            err,
            ReportError::InsufficientData { needed: 2, got: 1 }
        ));
    }

    #[test]
    fn test_padded_range() {
        let (lo, hi) = padded_range([100.0, 110.0].into_iter()).unwrap();
        assert!(lo < 100.0 && lo >= 99.0 - 1e-9);
        assert!(hi > 110.0 && hi <= 111.0 + 1e-9);

        assert!(padded_range(std::iter::empty()).is_none());
    }

    #[test]
    fn test_padded_range_clamps_at_zero() {
        let (lo, _) = padded_range([0.001, 0.002].into_iter()).unwrap();
        assert!(lo >= 0.0);
    }
}

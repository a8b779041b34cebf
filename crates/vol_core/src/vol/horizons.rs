//! Trailing-horizon volatility aggregation.
//!
//! Batch reports summarize one ticker as a handful of figures: the realized
//! volatility over the trailing year, two years, five years, and ten years
//! of closes. [`horizon_report`] runs the scalar estimator over the tail of
//! a price series once per requested horizon and collects the defined
//! results.
//!
//! Two silent-omission rules shape the output:
//! - a horizon longer than the available history is skipped, not an error
//! - an estimate that comes back NaN is dropped from the report
//!
//! A [`HorizonReport`] therefore only ever holds finite values, and a
//! sparse report is the expected shape for a recently listed ticker.

use serde::Serialize;

use crate::series::PriceSeries;
use crate::vol::{realized_volatility, EstimatorConfig};

/// A named trailing window measured in price observations.
///
/// `days` counts closes, not returns: a 252-day horizon consumes the last
/// 252 closes and therefore 251 returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Horizon {
    label: String,
    days: usize,
}

impl Horizon {
    /// Creates a horizon with a display label and a length in closes.
    ///
    /// # Panics
    ///
    /// Panics if `days` is zero.
    pub fn new(label: impl Into<String>, days: usize) -> Self {
        assert!(days > 0, "horizon length must be positive");
        Self {
            label: label.into(),
            days,
        }
    }

    /// Display label, e.g. `"1Y"`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of trailing closes the horizon consumes.
    pub fn days(&self) -> usize {
        self.days
    }
}

/// The standard report horizons: 1Y, 2Y, 5Y, and 10Y in trading days.
pub fn default_horizons() -> Vec<Horizon> {
    vec![
        Horizon::new("1Y", 252),
        Horizon::new("2Y", 504),
        Horizon::new("5Y", 1260),
        Horizon::new("10Y", 2520),
    ]
}

/// One defined entry of a [`HorizonReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizonEstimate {
    /// Horizon label carried through from the request.
    pub label: String,

    /// Horizon length in closes.
    pub days: usize,

    /// Realized volatility over the trailing window; always finite.
    pub volatility: f64,
}

/// Horizon estimates for one ticker, in request order.
///
/// Serializes as a JSON array of its entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HorizonReport {
    entries: Vec<HorizonEstimate>,
}

impl HorizonReport {
    /// Builds a report from already-computed entries.
    ///
    /// [`horizon_report`] is the normal constructor; this exists for
    /// callers assembling a report from another source, such as tests or
    /// deserialized payloads.
    pub fn from_entries(entries: Vec<HorizonEstimate>) -> Self {
        Self { entries }
    }

    /// Number of defined entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no horizon produced a defined estimate.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in request order.
    pub fn entries(&self) -> &[HorizonEstimate] {
        &self.entries
    }

    /// Looks up an entry by its label.
    pub fn get(&self, label: &str) -> Option<&HorizonEstimate> {
        self.entries.iter().find(|e| e.label == label)
    }

    /// Iterates entries in request order.
    pub fn iter(&self) -> impl Iterator<Item = &HorizonEstimate> {
        self.entries.iter()
    }
}

/// Computes trailing-horizon volatility estimates for a price series.
///
/// For each horizon in request order, takes the last `days` closes, derives
/// log returns, and applies the configured estimator. Horizons longer than
/// the series are skipped; NaN estimates are dropped. The report inherits
/// whatever method and annualization the config carries.
///
/// # Examples
///
/// ```
/// use vol_core::series::PriceSeries;
/// use vol_core::types::Date;
/// use vol_core::vol::horizons::{horizon_report, Horizon};
/// use vol_core::vol::EstimatorConfig;
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let dates: Vec<Date> = (0..300).map(|i| start.add_days(i)).collect();
/// let closes: Vec<f64> = (0..300).map(|i| 100.0 + (i % 7) as f64).collect();
/// let series = PriceSeries::from_parts(dates, closes).unwrap();
///
/// let horizons = [Horizon::new("1Y", 252), Horizon::new("2Y", 504)];
/// let report = horizon_report(&series, &horizons, &EstimatorConfig::sample_std());
///
/// // 300 closes cover the 1Y horizon but not the 2Y one.
/// assert_eq!(report.len(), 1);
/// assert_eq!(report.entries()[0].label, "1Y");
/// ```
pub fn horizon_report(
    prices: &PriceSeries,
    horizons: &[Horizon],
    config: &EstimatorConfig,
) -> HorizonReport {
    let mut entries = Vec::with_capacity(horizons.len());
    for horizon in horizons {
        if horizon.days() > prices.len() {
            continue;
        }
        let returns = prices.tail(horizon.days()).log_returns();
        let volatility = realized_volatility(returns.values(), config);
        if volatility.is_nan() {
            continue;
        }
        entries.push(HorizonEstimate {
            label: horizon.label.clone(),
            days: horizon.days,
            volatility,
        });
    }
    HorizonReport { entries }
}

//! Realized volatility estimators.
//!
//! This module provides:
//! - [`VolMethod`]: the two formula variants used in this domain
//! - [`EstimatorConfig`]: method, annualization toggle, and scaling factor
//! - [`realized_volatility`]: scalar estimate over a window of returns
//! - [`rolling_volatility`]: sliding-window estimates over a return series
//! - `horizons`: trailing-horizon aggregation for batch reports
//!
//! # Formula variants
//!
//! Realized volatility over a window of log returns comes in two legitimate
//! forms, and they are not numerically equivalent:
//!
//! - **Sum of squares**: `sqrt(Σ rᵢ²)`, treating realized variance as the
//!   plain sum of squared returns without subtracting the mean.
//! - **Sample standard deviation**: `stddev(r)` with the n-1 divisor, the
//!   per-period dispersion of returns around their mean.
//!
//! Both appear at different call sites of this system (the dashboard uses
//! the first, the batch report the second), so they are explicit named
//! options rather than one silently-chosen formula. Switching a call site
//! from one to the other changes its numbers.
//!
//! # Annualization
//!
//! Annualization is a pure multiplicative post-step, identical for both
//! variants: multiply the raw figure by `sqrt(periods_per_year)`. The
//! default factor is [`TRADING_DAYS_PER_YEAR`] for daily closes; any other
//! scaling must be passed explicitly through the config, never assumed.
//!
//! # Insufficient data
//!
//! Estimators return `f64::NAN` when a window holds fewer returns than the
//! variant needs (one for sum-of-squares, two for sample stddev). Short
//! input is a NaN-valued answer here, never a panic or an `Err`.
//!
//! # Examples
//!
//! ```
//! use vol_core::vol::{realized_volatility, EstimatorConfig, VolMethod};
//!
//! let cfg = EstimatorConfig::new(VolMethod::SumOfSquares).with_annualize(false);
//! let vol = realized_volatility(&[0.03, 0.04], &cfg);
//! assert!((vol - 0.05).abs() < 1e-15); // sqrt(0.0009 + 0.0016)
//! ```

pub mod horizons;

use std::fmt;
use std::str::FromStr;

use crate::series::ReturnSeries;
use crate::types::Date;

/// Trading days per year, the standard annualization base for daily closes.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Formula variant for the realized volatility estimate.
///
/// # Variants
/// - `SumOfSquares`: `sqrt(Σ rᵢ²)`, no mean subtraction; defined from one
///   return upward
/// - `SampleStd`: sample standard deviation (n-1 divisor); needs at least
///   two returns
///
/// # Examples
///
/// ```
/// use vol_core::vol::VolMethod;
///
/// assert_eq!(VolMethod::SumOfSquares.name(), "sum-of-squares");
/// assert_eq!("sample-std".parse::<VolMethod>().unwrap(), VolMethod::SampleStd);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolMethod {
    /// `sqrt(Σ rᵢ²)` over the window; realized variance as a plain sum of
    /// squared returns.
    SumOfSquares,

    /// Sample standard deviation of the window with the n-1 divisor,
    /// matching pandas' `.std()` default.
    SampleStd,
}

impl VolMethod {
    /// Returns the canonical name used in CLI flags and query parameters.
    pub fn name(&self) -> &'static str {
        match self {
            VolMethod::SumOfSquares => "sum-of-squares",
            VolMethod::SampleStd => "sample-std",
        }
    }

    /// Minimum number of returns for which the variant yields a value.
    ///
    /// Below this the estimate is NaN: a sum of squares needs one term,
    /// and a sample standard deviation divides by n-1, so one lone return
    /// has undefined dispersion.
    pub fn min_returns(&self) -> usize {
        match self {
            VolMethod::SumOfSquares => 1,
            VolMethod::SampleStd => 2,
        }
    }
}

impl fmt::Display for VolMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for VolMethod {
    type Err = String;

    /// Parses a method name (case-insensitive).
    ///
    /// Accepts several aliases:
    /// - SumOfSquares: "sum-of-squares", "sumofsquares", "sos"
    /// - SampleStd: "sample-std", "samplestd", "std", "stddev"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "sumofsquares" | "sos" => Ok(VolMethod::SumOfSquares),
            "samplestd" | "std" | "stddev" => Ok(VolMethod::SampleStd),
            _ => Err(format!("Unknown volatility method: {}", s)),
        }
    }
}

mod serde_impl {
    use super::VolMethod;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for VolMethod {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for VolMethod {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            VolMethod::from_str(&s).map_err(de::Error::custom)
        }
    }
}

/// Configuration for the volatility estimators.
///
/// Carries the formula variant, the annualization toggle, and the explicit
/// scaling base. There is no ambient default scaling anywhere else; call
/// sites that want something other than trading-day annualization say so
/// here.
///
/// # Examples
///
/// ```
/// use vol_core::vol::{EstimatorConfig, VolMethod, TRADING_DAYS_PER_YEAR};
///
/// // Interactive default: sum-of-squares, annualized by sqrt(252).
/// let cfg = EstimatorConfig::default();
/// assert_eq!(cfg.method, VolMethod::SumOfSquares);
/// assert!(cfg.annualize);
/// assert_eq!(cfg.periods_per_year, TRADING_DAYS_PER_YEAR);
///
/// // Batch report convention: sample standard deviation.
/// let batch = EstimatorConfig::sample_std();
/// assert_eq!(batch.method, VolMethod::SampleStd);
///
/// // Raw (non-annualized) figures.
/// let raw = EstimatorConfig::default().with_annualize(false);
/// assert!(!raw.annualize);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorConfig {
    /// Formula variant to apply.
    pub method: VolMethod,

    /// Whether to scale the raw figure by `sqrt(periods_per_year)`.
    pub annualize: bool,

    /// Annualization base; periods per year for the sampling frequency.
    ///
    /// Daily closes use [`TRADING_DAYS_PER_YEAR`]. Only consulted when
    /// `annualize` is true.
    pub periods_per_year: f64,
}

impl Default for EstimatorConfig {
    /// Sum-of-squares form, annualized on the trading-day base.
    fn default() -> Self {
        Self {
            method: VolMethod::SumOfSquares,
            annualize: true,
            periods_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}

impl EstimatorConfig {
    /// Creates a config for the given variant, annualized on the
    /// trading-day base.
    pub fn new(method: VolMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Sum-of-squares preset; the interactive-mode convention.
    pub fn sum_of_squares() -> Self {
        Self::new(VolMethod::SumOfSquares)
    }

    /// Sample-standard-deviation preset; the batch-report convention.
    pub fn sample_std() -> Self {
        Self::new(VolMethod::SampleStd)
    }

    /// Sets the annualization toggle.
    pub fn with_annualize(mut self, annualize: bool) -> Self {
        self.annualize = annualize;
        self
    }

    /// Sets the annualization base.
    ///
    /// # Panics
    ///
    /// Panics if `periods_per_year` is not finite and positive.
    pub fn with_periods_per_year(mut self, periods_per_year: f64) -> Self {
        assert!(
            periods_per_year.is_finite() && periods_per_year > 0.0,
            "periods_per_year must be finite and positive"
        );
        self.periods_per_year = periods_per_year;
        self
    }

    fn scale(&self) -> f64 {
        if self.annualize {
            self.periods_per_year.sqrt()
        } else {
            1.0
        }
    }
}

/// Scalar realized volatility over a window of log returns.
///
/// Applies the configured variant to the entire slice; callers slice to
/// their window first. Returns NaN when the slice holds fewer returns than
/// the variant's minimum. Pure function, never panics for any input slice.
///
/// # Examples
///
/// ```
/// use vol_core::vol::{realized_volatility, EstimatorConfig, VolMethod};
///
/// let raw = EstimatorConfig::new(VolMethod::SumOfSquares).with_annualize(false);
/// assert!((realized_volatility(&[0.03, 0.04], &raw) - 0.05).abs() < 1e-15);
///
/// // Annualization multiplies by sqrt(252).
/// let annualized = raw.with_annualize(true);
/// let expected = 0.05 * 252.0f64.sqrt();
/// assert!((realized_volatility(&[0.03, 0.04], &annualized) - expected).abs() < 1e-12);
///
/// // One return is too few for the sample-stddev form.
/// let std = EstimatorConfig::sample_std();
/// assert!(realized_volatility(&[0.01], &std).is_nan());
/// ```
pub fn realized_volatility(returns: &[f64], config: &EstimatorConfig) -> f64 {
    if returns.len() < config.method.min_returns() {
        return f64::NAN;
    }
    let raw = match config.method {
        VolMethod::SumOfSquares => returns.iter().map(|r| r * r).sum::<f64>().sqrt(),
        VolMethod::SampleStd => sample_std(returns),
    };
    raw * config.scale()
}

// Sample standard deviation with the n-1 divisor; caller guarantees len >= 2.
fn sample_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let sum_sq_dev = values
        .iter()
        .map(|v| {
            let dev = v - mean;
            dev * dev
        })
        .sum::<f64>();
    (sum_sq_dev / (n - 1.0)).sqrt()
}

/// Rolling realized volatility over a return series.
///
/// Produces one output per input return, aligned by date. Entry `i` is the
/// scalar estimate over the trailing window `returns[i+1-window ..= i]`;
/// the first `window - 1` entries are NaN because the window has not filled
/// yet. A window of zero, or one larger than the series, yields an all-NaN
/// output of the same length; boundary layers validate the window range
/// before calling.
///
/// # Examples
///
/// ```
/// use vol_core::series::PriceSeries;
/// use vol_core::types::Date;
/// use vol_core::vol::{rolling_volatility, EstimatorConfig};
///
/// let series = PriceSeries::from_parts(
///     vec![
///         Date::from_ymd(2025, 7, 22).unwrap(),
///         Date::from_ymd(2025, 7, 23).unwrap(),
///         Date::from_ymd(2025, 7, 24).unwrap(),
///         Date::from_ymd(2025, 7, 25).unwrap(),
///     ],
///     vec![100.0, 101.0, 99.0, 100.0],
/// )
/// .unwrap();
/// let returns = series.log_returns();
///
/// let rolling = rolling_volatility(&returns, 2, &EstimatorConfig::default());
/// assert_eq!(rolling.len(), 3);
/// assert!(rolling.values()[0].is_nan());
/// assert!(rolling.values()[1].is_finite());
/// assert!(rolling.values()[2].is_finite());
/// ```
pub fn rolling_volatility(
    returns: &ReturnSeries,
    window: usize,
    config: &EstimatorConfig,
) -> RollingVolSeries {
    let values = returns.values();
    let mut estimates = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if window == 0 || i + 1 < window {
            estimates.push(f64::NAN);
        } else {
            estimates.push(realized_volatility(&values[i + 1 - window..=i], config));
        }
    }
    RollingVolSeries::new(returns.dates().to_vec(), estimates)
}

/// Rolling volatility estimates aligned 1:1 with a [`ReturnSeries`].
///
/// The first `window - 1` values are NaN. [`RollingVolSeries::defined`]
/// iterates only the dated, non-NaN entries, which is what tables, CSV
/// exports, and charts want.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RollingVolSeries {
    dates: Vec<Date>,
    values: Vec<f64>,
}

impl RollingVolSeries {
    pub(crate) fn new(dates: Vec<Date>, values: Vec<f64>) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        Self { dates, values }
    }

    /// Number of entries; equals the length of the source return series.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series holds no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entry dates, aligned with [`RollingVolSeries::values`].
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Estimates, NaN where the window had not filled.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates all `(date, value)` pairs, NaN entries included.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Iterates only the defined `(date, value)` pairs, skipping the NaN
    /// prefix and any other undefined entries.
    pub fn defined(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.iter().filter(|(_, v)| !v.is_nan())
    }
}

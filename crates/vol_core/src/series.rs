//! Validated price and return series.
//!
//! The adapter layer hands the kernel a [`PriceSeries`]; everything
//! downstream trusts its invariants. Construction rejects non-positive or
//! non-finite closes and out-of-order dates, so the return transform and the
//! estimators never need defensive checks of their own.
//!
//! [`ReturnSeries`] stores dates and values in parallel vectors so the
//! estimators can borrow the raw `&[f64]` without copying.
//!
//! # Examples
//!
//! ```
//! use vol_core::series::PriceSeries;
//! use vol_core::types::Date;
//!
//! let series = PriceSeries::from_parts(
//!     vec![
//!         Date::from_ymd(2025, 7, 22).unwrap(),
//!         Date::from_ymd(2025, 7, 23).unwrap(),
//!     ],
//!     vec![214.39, 214.14],
//! )
//! .unwrap();
//!
//! let returns = series.log_returns();
//! assert_eq!(returns.len(), 1);
//! assert!(returns.values()[0] < 0.0); // price fell
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{Date, SeriesError};

/// A single end-of-day observation: date and close price.
///
/// # Examples
///
/// ```
/// use vol_core::series::PricePoint;
/// use vol_core::types::Date;
///
/// let p = PricePoint::new(Date::from_ymd(2025, 7, 25).unwrap(), 213.88);
/// assert_eq!(p.close, 213.88);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date.
    pub date: Date,
    /// Close price; a valid series holds only finite, positive values.
    pub close: f64,
}

impl PricePoint {
    /// Creates a price point. Validation happens at series construction.
    pub fn new(date: Date, close: f64) -> Self {
        Self { date, close }
    }
}

/// An ordered, validated series of end-of-day close prices.
///
/// Invariants, enforced by every constructor:
/// - dates strictly increasing (duplicates rejected)
/// - closes finite and strictly positive
///
/// Gaps between trading days are expected and fine; the series is ordered
/// by date, not calendar-contiguous. A series may hold fewer than two
/// points, in which case it simply produces no returns.
///
/// # Examples
///
/// ```
/// use vol_core::series::{PricePoint, PriceSeries};
/// use vol_core::types::{Date, SeriesError};
///
/// let err = PriceSeries::new(vec![
///     PricePoint::new(Date::from_ymd(2025, 7, 22).unwrap(), 100.0),
///     PricePoint::new(Date::from_ymd(2025, 7, 23).unwrap(), -1.0),
/// ])
/// .unwrap_err();
/// assert_eq!(err, SeriesError::NonPositivePrice { index: 1, price: -1.0 });
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Creates a series from observation points, validating the invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::NonFinitePrice`], [`SeriesError::NonPositivePrice`],
    /// or [`SeriesError::NonAscendingDate`] naming the first offending index.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, SeriesError> {
        for (index, point) in points.iter().enumerate() {
            if !point.close.is_finite() {
                return Err(SeriesError::NonFinitePrice { index });
            }
            if point.close <= 0.0 {
                return Err(SeriesError::NonPositivePrice {
                    index,
                    price: point.close,
                });
            }
            if index > 0 && point.date <= points[index - 1].date {
                return Err(SeriesError::NonAscendingDate { index });
            }
        }
        Ok(Self { points })
    }

    /// Creates a series from parallel date and close vectors.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::LengthMismatch`] when the vectors differ in
    /// length, otherwise validates as [`PriceSeries::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use vol_core::series::PriceSeries;
    /// use vol_core::types::Date;
    ///
    /// let series = PriceSeries::from_parts(
    ///     vec![
    ///         Date::from_ymd(2025, 7, 22).unwrap(),
    ///         Date::from_ymd(2025, 7, 23).unwrap(),
    ///     ],
    ///     vec![214.39, 214.14],
    /// )
    /// .unwrap();
    /// assert_eq!(series.len(), 2);
    /// ```
    pub fn from_parts(dates: Vec<Date>, closes: Vec<f64>) -> Result<Self, SeriesError> {
        if dates.len() != closes.len() {
            return Err(SeriesError::LengthMismatch {
                dates: dates.len(),
                closes: closes.len(),
            });
        }
        let points = dates
            .into_iter()
            .zip(closes)
            .map(|(date, close)| PricePoint::new(date, close))
            .collect();
        Self::new(points)
    }

    // Invariants hold for any contiguous slice of a valid series, so
    // internal re-slicing can skip validation.
    pub(crate) fn from_points_unchecked(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series holds no observations.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All observations in date order.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Earliest observation, if any.
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Latest observation, if any.
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// The trailing `n` observations as a new series.
    ///
    /// Returns the whole series when `n` exceeds its length. This is the
    /// slicing step of horizon aggregation: "the last 252 closes".
    ///
    /// # Examples
    ///
    /// ```
    /// use vol_core::series::PriceSeries;
    /// use vol_core::types::Date;
    ///
    /// let series = PriceSeries::from_parts(
    ///     vec![
    ///         Date::from_ymd(2025, 7, 22).unwrap(),
    ///         Date::from_ymd(2025, 7, 23).unwrap(),
    ///         Date::from_ymd(2025, 7, 24).unwrap(),
    ///     ],
    ///     vec![100.0, 101.0, 99.0],
    /// )
    /// .unwrap();
    ///
    /// let tail = series.tail(2);
    /// assert_eq!(tail.len(), 2);
    /// assert_eq!(tail.first().unwrap().close, 101.0);
    /// ```
    pub fn tail(&self, n: usize) -> PriceSeries {
        let start = self.points.len().saturating_sub(n);
        Self::from_points_unchecked(self.points[start..].to_vec())
    }

    /// Transforms the series into log returns.
    ///
    /// Each consecutive pair `(p[i-1], p[i])` yields `ln(p[i] / p[i-1])`,
    /// dated at the later observation. A series of length `n` produces
    /// `max(n - 1, 0)` returns; fewer than two points give an empty result,
    /// not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use vol_core::series::PriceSeries;
    /// use vol_core::types::Date;
    ///
    /// let series = PriceSeries::from_parts(
    ///     vec![
    ///         Date::from_ymd(2025, 7, 22).unwrap(),
    ///         Date::from_ymd(2025, 7, 23).unwrap(),
    ///     ],
    ///     vec![100.0, 101.0],
    /// )
    /// .unwrap();
    ///
    /// let returns = series.log_returns();
    /// assert_eq!(returns.len(), 1);
    /// assert!((returns.values()[0] - (1.01f64).ln()).abs() < 1e-15);
    /// ```
    pub fn log_returns(&self) -> ReturnSeries {
        if self.points.len() < 2 {
            return ReturnSeries::new(Vec::new(), Vec::new());
        }
        let dates = self.points[1..].iter().map(|p| p.date).collect();
        let values = self
            .points
            .windows(2)
            .map(|pair| (pair[1].close / pair[0].close).ln())
            .collect();
        ReturnSeries::new(dates, values)
    }
}

/// Log returns derived from a [`PriceSeries`].
///
/// One value per consecutive price pair, dated at the later observation.
/// Dates and values are stored in parallel vectors; [`ReturnSeries::values`]
/// hands estimators a borrowed `&[f64]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSeries {
    dates: Vec<Date>,
    values: Vec<f64>,
}

impl ReturnSeries {
    pub(crate) fn new(dates: Vec<Date>, values: Vec<f64>) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        Self { dates, values }
    }

    /// Number of returns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series holds no returns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Observation dates, aligned with [`ReturnSeries::values`].
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Log-return values, aligned with [`ReturnSeries::dates`].
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates `(date, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}

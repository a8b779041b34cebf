//! Error types for structured error handling.
//!
//! This module provides:
//! - `DateError`: errors from date construction and parsing
//! - `SeriesError`: errors from price-series validation
//!
//! Both describe *invalid input* rejected at a boundary. Insufficient data
//! is never an error in this crate; estimators report it as `f64::NAN`.

use thiserror::Error;

/// Date construction and parsing errors.
///
/// # Variants
/// - `InvalidDate`: impossible calendar components (e.g. February 30th)
/// - `ParseError`: string was not a `YYYY-MM-DD` date
///
/// # Examples
/// ```
/// use vol_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2025, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "invalid date: 2025-02-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Impossible calendar components (e.g. February 30th).
    #[error("invalid date: {year}-{month:02}-{day:02}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse a date string.
    #[error("date parse error: {0}")]
    ParseError(String),
}

/// Price-series validation errors.
///
/// A `PriceSeries` constructor rejects input that would make the log-return
/// transform or the estimators meaningless. The index in each variant is the
/// zero-based position of the offending point in the input.
///
/// # Variants
/// - `NonPositivePrice`: close at `index` is zero or negative
/// - `NonFinitePrice`: close at `index` is NaN or infinite
/// - `NonAscendingDate`: date at `index` does not strictly follow its predecessor
/// - `LengthMismatch`: the date and close vectors differ in length
///
/// # Examples
/// ```
/// use vol_core::types::SeriesError;
///
/// let err = SeriesError::NonPositivePrice { index: 2, price: -1.5 };
/// assert_eq!(format!("{}", err), "price at index 2 is not positive: -1.5");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// Close price is zero or negative; log returns are undefined.
    #[error("price at index {index} is not positive: {price}")]
    NonPositivePrice {
        /// Zero-based position of the offending point
        index: usize,
        /// The rejected close price
        price: f64,
    },

    /// Close price is NaN or infinite.
    #[error("price at index {index} is not finite")]
    NonFinitePrice {
        /// Zero-based position of the offending point
        index: usize,
    },

    /// Dates must be strictly increasing; duplicates are rejected too.
    #[error("dates must be strictly increasing: violation at index {index}")]
    NonAscendingDate {
        /// Zero-based position where ordering breaks
        index: usize,
    },

    /// Parallel date/close vectors differ in length.
    #[error("series parts differ in length: {dates} dates, {closes} closes")]
    LengthMismatch {
        /// Number of dates supplied
        dates: usize,
        /// Number of closes supplied
        closes: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_display() {
        let err = DateError::InvalidDate {
            year: 2025,
            month: 2,
            day: 30,
        };
        assert_eq!(format!("{}", err), "invalid date: 2025-02-30");
    }

    #[test]
    fn test_date_parse_error_display() {
        let err = DateError::ParseError("bad format".to_string());
        assert_eq!(format!("{}", err), "date parse error: bad format");
    }

    #[test]
    fn test_non_positive_price_display() {
        let err = SeriesError::NonPositivePrice {
            index: 0,
            price: 0.0,
        };
        assert_eq!(format!("{}", err), "price at index 0 is not positive: 0");
    }

    #[test]
    fn test_non_finite_price_display() {
        let err = SeriesError::NonFinitePrice { index: 3 };
        assert_eq!(format!("{}", err), "price at index 3 is not finite");
    }

    #[test]
    fn test_non_ascending_date_display() {
        let err = SeriesError::NonAscendingDate { index: 1 };
        assert_eq!(
            format!("{}", err),
            "dates must be strictly increasing: violation at index 1"
        );
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = SeriesError::LengthMismatch {
            dates: 4,
            closes: 3,
        };
        assert_eq!(
            format!("{}", err),
            "series parts differ in length: 4 dates, 3 closes"
        );
    }

    #[test]
    fn test_errors_implement_error_trait() {
        let date_err = DateError::ParseError("x".to_string());
        let _: &dyn std::error::Error = &date_err;

        let series_err = SeriesError::NonFinitePrice { index: 0 };
        let _: &dyn std::error::Error = &series_err;
    }

    #[test]
    fn test_clone_and_equality() {
        let err = SeriesError::NonAscendingDate { index: 1 };
        assert_eq!(err.clone(), err);
    }
}

//! Calendar date type for end-of-day observations.
//!
//! Every price, return, and rolling estimate in this crate is stamped with a
//! [`Date`]: a thin wrapper around `chrono::NaiveDate` with ISO 8601
//! parse/format behaviour and the small amount of arithmetic the volatility
//! pipeline needs (day differences, trailing lookback ranges).
//!
//! # Examples
//!
//! ```
//! use vol_core::types::time::Date;
//!
//! let d = Date::from_ymd(2025, 7, 25).unwrap();
//! assert_eq!(d.to_string(), "2025-07-25");
//!
//! let parsed: Date = "2025-07-22".parse().unwrap();
//! assert_eq!(d - parsed, 3);
//! ```

use chrono::{Datelike, Days, Local, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Calendar date of a single end-of-day observation.
///
/// Wraps `chrono::NaiveDate`, serialises as an ISO 8601 string
/// (`"2025-07-25"`), and orders chronologically. Trading-day gaps are
/// expected between consecutive dates in a series; this type carries no
/// holiday calendar.
///
/// # Examples
///
/// ```
/// use vol_core::types::time::Date;
///
/// let start = Date::from_ymd(2025, 7, 22).unwrap();
/// let end = Date::from_ymd(2025, 7, 25).unwrap();
///
/// assert!(start < end);
/// assert_eq!(end - start, 3);
/// assert_eq!(end.year(), 2025);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a date from year, month, and day components.
    ///
    /// Returns `Err(DateError::InvalidDate)` for impossible combinations
    /// such as February 30th.
    ///
    /// # Examples
    ///
    /// ```
    /// use vol_core::types::time::Date;
    ///
    /// let d = Date::from_ymd(2024, 2, 29).unwrap(); // leap day
    /// assert_eq!(d.day(), 29);
    ///
    /// assert!(Date::from_ymd(2023, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Returns today's date based on local system time.
    pub fn today() -> Self {
        Date(Local::now().date_naive())
    }

    /// Parses an ISO 8601 date string (`YYYY-MM-DD`).
    ///
    /// # Examples
    ///
    /// ```
    /// use vol_core::types::time::Date;
    ///
    /// let d = Date::parse("2025-07-25").unwrap();
    /// assert_eq!(d.month(), 7);
    ///
    /// assert!(Date::parse("25/07/2025").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Returns the underlying `NaiveDate` for access to chrono's full API.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the date `days` calendar days later.
    ///
    /// Clamps at chrono's maximum representable date instead of
    /// overflowing; in practice series spans are a few thousand days.
    ///
    /// # Examples
    ///
    /// ```
    /// use vol_core::types::time::Date;
    ///
    /// let d = Date::from_ymd(2025, 7, 22).unwrap();
    /// assert_eq!(d.add_days(3).to_string(), "2025-07-25");
    /// ```
    pub fn add_days(self, days: u64) -> Self {
        self.0
            .checked_add_days(Days::new(days))
            .map(Date)
            .unwrap_or(Date(NaiveDate::MAX))
    }

    /// Returns the date `days` calendar days earlier.
    ///
    /// Clamps at chrono's minimum representable date instead of
    /// underflowing.
    pub fn sub_days(self, days: u64) -> Self {
        self.0
            .checked_sub_days(Days::new(days))
            .map(Date)
            .unwrap_or(Date(NaiveDate::MIN))
    }

    /// Returns the date `years * 365` calendar days earlier.
    ///
    /// This is the lookback convention used when requesting historical
    /// data: a flat 365-day year, ignoring leap days. The result is a
    /// request-range bound, not an anniversary date.
    ///
    /// # Examples
    ///
    /// ```
    /// use vol_core::types::time::Date;
    ///
    /// let d = Date::from_ymd(2025, 7, 25).unwrap();
    /// assert_eq!(d.years_ago(1).to_string(), "2024-07-25");
    /// ```
    pub fn years_ago(self, years: u32) -> Self {
        self.sub_days(u64::from(years) * 365)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    ///
    /// Positive when `self` is the later date, negative otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use vol_core::types::time::Date;
    ///
    /// let a = Date::from_ymd(2025, 7, 22).unwrap();
    /// let b = Date::from_ymd(2025, 7, 25).unwrap();
    /// assert_eq!(b - a, 3);
    /// assert_eq!(a - b, -3);
    /// ```
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    /// Parses an ISO 8601 date string (`YYYY-MM-DD`).
    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (`YYYY-MM-DD`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(d: NaiveDate) -> Self {
        Date(d)
    }
}

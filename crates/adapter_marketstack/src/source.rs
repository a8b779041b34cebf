//! The async price source abstraction shared by all adapters.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use vol_core::series::PriceSeries;
use vol_core::types::Date;

use crate::error::Result;

/// Inclusive calendar-date window for a price request.
///
/// Trailing ranges use the flat 365-days-per-year convention: the range is
/// a fetch hint, and the estimators later count actual observations rather
/// than calendar time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// First date to include.
    pub start: Date,
    /// Last date to include.
    pub end: Date,
}

impl DateRange {
    /// Creates a range from explicit endpoints.
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// The trailing `years` calendar years ending today.
    pub fn trailing_years(years: u32) -> Self {
        let end = Date::today();
        Self {
            start: end.years_ago(years),
            end,
        }
    }

    /// Whether the given date falls inside the range.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days spanned, zero if the range is inverted.
    pub fn num_days(&self) -> u64 {
        (self.end - self.start).max(0) as u64
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// An async source of end-of-day closes.
///
/// Implementations return a fully validated [`PriceSeries`]: dates strictly
/// ascending, closes finite and positive. A symbol with no data in the
/// range is an error, not an empty series.
#[async_trait]
pub trait EodSource: Send + Sync {
    /// Short source name for logs and the dashboard footer.
    fn name(&self) -> &'static str;

    /// Fetches closes for `symbol` within `range`.
    async fn eod_closes(&self, symbol: &str, range: DateRange) -> Result<PriceSeries>;
}

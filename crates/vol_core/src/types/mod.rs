//! Calendar and error types shared across the kernel.
//!
//! This module provides:
//! - `time`: the `Date` calendar type used to stamp every observation
//! - `error`: structured error types for date handling and series validation
//!
//! # Re-exports
//!
//! Commonly used types are re-exported at this module level:
//! - [`Date`] from `time`
//! - [`DateError`], [`SeriesError`] from `error`

pub mod error;
pub mod time;

// Re-export commonly used types at module level
pub use error::{DateError, SeriesError};
pub use time::Date;

//! Web dashboard for realized volatility analytics
//!
//! This crate serves a browser dashboard and a JSON API on top of the
//! volatility estimators: full-sample, rolling, and trailing-horizon
//! estimates, plus a rendered price/volatility chart. Closes come from the
//! Marketstack feed when an access key is configured, or from a seeded
//! synthetic feed otherwise.

pub mod config;
pub mod routes;
pub mod server;

// Re-export the volatility stack for integration
pub use adapter_marketstack;
pub use vol_core;
pub use vol_report;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

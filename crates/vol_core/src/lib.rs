//! # vol_core: Realized Volatility Kernel
//!
//! ## Layer Role
//!
//! vol_core is the kernel layer of the workspace: a pure computation library
//! that turns an ordered end-of-day price series into log returns and
//! realized volatility figures. It provides:
//! - Validated series types: `PriceSeries`, `ReturnSeries` (`series`)
//! - Volatility estimators with explicit formula variants (`vol`)
//! - Trailing-horizon aggregation for batch reports (`vol::horizons`)
//! - Calendar date and error types (`types`)
//!
//! ## Purity Principle
//!
//! Nothing in this crate performs I/O, reads the environment, or holds
//! ambient state. Every estimate is a function of its explicit arguments:
//! the series, the window, and an [`vol::EstimatorConfig`]. Data fetching,
//! rendering, and export live in the adapter and service crates.
//!
//! Insufficient data is a value, not an error: estimators yield `f64::NAN`
//! when a window holds too few returns, and rolling output carries a NaN
//! prefix until the window fills. Invalid input (non-positive closes,
//! out-of-order dates) is rejected when a `PriceSeries` is constructed, so
//! the estimators themselves stay total.
//!
//! ## Usage Examples
//!
//! ```rust
//! use vol_core::series::PriceSeries;
//! use vol_core::types::Date;
//! use vol_core::vol::{realized_volatility, rolling_volatility, EstimatorConfig};
//!
//! let series = PriceSeries::from_parts(
//!     vec![
//!         Date::from_ymd(2025, 7, 22).unwrap(),
//!         Date::from_ymd(2025, 7, 23).unwrap(),
//!         Date::from_ymd(2025, 7, 24).unwrap(),
//!         Date::from_ymd(2025, 7, 25).unwrap(),
//!     ],
//!     vec![214.39, 214.14, 213.76, 213.88],
//! )
//! .unwrap();
//!
//! let returns = series.log_returns();
//! assert_eq!(returns.len(), 3);
//!
//! // Scalar estimate over the whole series, annualized by default.
//! let vol = realized_volatility(returns.values(), &EstimatorConfig::default());
//! assert!(vol.is_finite() && vol > 0.0);
//!
//! // Rolling estimate: one output per return, NaN until the window fills.
//! let rolling = rolling_volatility(&returns, 2, &EstimatorConfig::default());
//! assert_eq!(rolling.len(), 3);
//! assert!(rolling.values()[0].is_nan());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod series;
pub mod types;
pub mod vol;

//! # adapter_marketstack: Price Feed Adapters
//!
//! ## Layer Role
//!
//! adapter_marketstack is the boundary layer between the outside world and
//! the vol_core kernel. It produces validated `PriceSeries` values from:
//! - the Marketstack end-of-day REST API (`client`)
//! - local CSV files with `date,close` rows (`csv_file`)
//! - built-in offline data: fixed sample quotes and a seeded geometric
//!   Brownian motion generator (`synthetic`)
//!
//! All sources implement the async [`source::EodSource`] trait, so the
//! service layers stay agnostic about where closes come from. Everything a
//! source returns has already passed series validation; downstream code
//! never sees unordered dates or non-positive closes.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use adapter_marketstack::client::MarketstackClient;
//! use adapter_marketstack::source::{DateRange, EodSource};
//!
//! # async fn demo() -> Result<(), adapter_marketstack::error::FeedError> {
//! let client = MarketstackClient::from_env()?;
//! let range = DateRange::trailing_years(10);
//! let series = client.eod_closes("AAPL", range).await?;
//! println!("{} closes", series.len());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod client;
pub mod csv_file;
pub mod error;
pub mod models;
pub mod source;
pub mod synthetic;

//! # vol_report: Presentation Layer
//!
//! ## Layer Role
//!
//! vol_report turns kernel outputs into things people and tools consume:
//! - Markdown-style tables for terminal output (`table`)
//! - CSV and JSON export for files and HTTP responses (`export`)
//! - Two-panel price and rolling-volatility PNG charts (`chart`)
//!
//! The crate never computes volatility itself and never performs network
//! I/O; it renders whatever `vol_core` produced. NaN rolling entries are
//! dropped at this boundary, so exported artifacts only carry defined
//! values.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod chart;
pub mod error;
pub mod export;
pub mod table;

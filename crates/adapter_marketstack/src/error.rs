//! Error types for the price feed adapters.

use thiserror::Error;
use vol_core::types::{DateError, SeriesError};

/// Result type alias for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;

/// Errors raised while fetching or decoding price data.
#[derive(Error, Debug)]
pub enum FeedError {
    /// No API access key was configured.
    #[error("Marketstack access key not configured (set {var})")]
    MissingApiKey {
        /// Environment variable the key is read from.
        var: &'static str,
    },

    /// The HTTP request itself failed (connection, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a structured error payload.
    #[error("Marketstack error {code}: {message}")]
    Api {
        /// Error code string from the payload, e.g. `invalid_access_key`.
        code: String,
        /// Human-readable message from the payload.
        message: String,
    },

    /// The API answered with a non-success status and no decodable payload.
    #[error("unexpected HTTP status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated by the caller for logging.
        body: String,
    },

    /// A response body could not be decoded as the expected JSON shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A CSV file could not be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A local file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A date field could not be interpreted.
    #[error(transparent)]
    Date(#[from] DateError),

    /// Fetched rows do not form a valid price series.
    #[error(transparent)]
    Series(#[from] SeriesError),

    /// The source returned no rows for the requested symbol and range.
    #[error("no price data returned for {symbol}")]
    EmptyData {
        /// Symbol the request was for.
        symbol: String,
    },
}

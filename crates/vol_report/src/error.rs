//! Error types for report generation.

use thiserror::Error;

/// Result type alias for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors raised while exporting or rendering.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Writing an export stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The chart backend reported a drawing failure.
    #[error("chart rendering failed: {0}")]
    Render(String),

    /// Too few observations to draw anything meaningful.
    #[error("insufficient data: need at least {needed} points, got {got}")]
    InsufficientData {
        /// Minimum number of points required.
        needed: usize,
        /// Number of points supplied.
        got: usize,
    },
}

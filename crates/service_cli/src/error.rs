//! CLI error types

use thiserror::Error;

/// Convenience alias used throughout the CLI.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by CLI commands.
///
/// Per-symbol failures inside `analyze` are logged and skipped; an error
/// escapes the command only when nothing succeeded or when setup itself
/// (arguments, configuration, output directory) is broken.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("All {0} symbols failed")]
    AllSymbolsFailed(usize),

    #[error("Self-test failed: {0}")]
    SelfTest(String),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error(transparent)]
    Feed(#[from] adapter_marketstack::error::FeedError),

    #[error(transparent)]
    Report(#[from] vol_report::error::ReportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

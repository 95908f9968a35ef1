//! Error types for the extraction API

use thiserror::Error;

/// Error type for fallible operations.
///
/// Individual lines never produce errors; they are skipped and counted in
/// [`ExtractionStats`](crate::ExtractionStats). Only whole-input failures and
/// bad configuration reach the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A pattern rule failed to compile
    #[error("Invalid pattern rule: {0}")]
    Rule(#[from] regex::Error),

    /// Input document is structurally invalid (e.g. malformed JSON)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Input source could not be read at all
    #[error("Unreadable source: {0}")]
    Source(String),
}

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, Error>;

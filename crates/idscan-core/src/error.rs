//! Error types for the idscan-core library.
//!
//! Extraction itself never fails; errors only arise while loading or
//! validating configuration.

use thiserror::Error;

/// Main error type for the idscan library.
#[derive(Error, Debug)]
pub enum IdScanError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration or result JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while building a document parser from configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The jurisdiction keyword is empty or whitespace.
    #[error("jurisdiction keyword must not be empty")]
    EmptyJurisdiction,

    /// A label field has no usable phrases.
    #[error("no label phrases configured for {field}")]
    EmptyLabels { field: String },

    /// A label pattern failed to compile.
    #[error("invalid label pattern for {field}: {source}")]
    Pattern {
        field: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for the idscan library.
pub type Result<T> = std::result::Result<T, IdScanError>;

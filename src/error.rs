//! Error types for rust-sqltables

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the input boundary.
///
/// The extractors themselves never fail: malformed SQL yields partial results.
#[derive(Error, Debug)]
pub enum SqlTablesError {
    #[error("Input source not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Unsupported input kind '{extension}' for {path} (supported: .sql, .py, .sh)")]
    UnsupportedSourceKind { path: PathBuf, extension: String },

    #[error("Failed to read input source: {path}")]
    SourceReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid exclude pattern: {pattern}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

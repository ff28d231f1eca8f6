//! Error types for metric data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the store adapters.
///
/// Read errors never reach the presentation layer as failures: the loaders
/// turn them into an empty result plus a warning.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Tabular Store ===
    /// The tabular store exists but could not be read.
    #[error("failed to read {path}: {source}")]
    StoreRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record of the tabular store could not be decoded.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// The tabular store could not be created or appended to.
    #[error("failed to write {path}: {source}")]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Structured Document ===
    /// The document does not exist or is zero-length.
    #[error("{path} not found or empty")]
    DocumentMissing { path: PathBuf },

    /// The document exists but could not be read.
    #[error("failed to read {path}: {source}")]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a JSON object of the expected shape.
    #[error("failed to parse {path}: {message}")]
    DocumentParse { path: PathBuf, message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

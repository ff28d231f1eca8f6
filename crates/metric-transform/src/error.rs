use thiserror::Error;

/// Failures while exporting a shaped frame.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),
}

pub type Result<T> = std::result::Result<T, ExportError>;

use thiserror::Error;

/// Rejection reasons for a proposed observation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("please provide a name for your custom metric")]
    EmptyCustomCategory,
    #[error("value must be a finite number greater than or equal to zero, got {value}")]
    InvalidValue { value: f64 },
}

//! Ingestion guardrails for survey submissions.

use metric_model::{Observation, ValidationError};

/// Decide whether a proposed observation may be appended.
///
/// The category is trimmed. A custom (free-text) name must not be empty once
/// trimmed; presets are accepted as given. The value must be finite and not
/// negative. Nothing is persisted here.
pub fn validate(
    raw_category: &str,
    is_custom_name: bool,
    raw_value: f64,
) -> Result<Observation, ValidationError> {
    let category = raw_category.trim();
    if is_custom_name && category.is_empty() {
        return Err(ValidationError::EmptyCustomCategory);
    }
    if !raw_value.is_finite() || raw_value < 0.0 {
        return Err(ValidationError::InvalidValue { value: raw_value });
    }
    Ok(Observation::new(category, raw_value))
}

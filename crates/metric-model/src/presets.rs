//! Preset metric names offered by the survey surface.

/// Fixed, pre-validated metric names. Choosing one bypasses the empty-name
/// guardrail of the ingestion validator.
pub const PRESET_METRICS: &[&str] = &[
    "Sleep (hours)",
    "Steps (count)",
    "Protein (grams)",
    "Water (oz)",
    "Exercise (minutes)",
    "Meditation (minutes)",
    "Screen Time (hours)",
    "HRV (ms)",
    "VO₂max",
];

/// The choice that switches the survey to a free-text metric name.
pub const OTHER_CHOICE: &str = "Other";

/// Look up a preset by name, ignoring case and surrounding whitespace.
///
/// Returns the canonical spelling of the preset.
pub fn find_preset(name: &str) -> Option<&'static str> {
    let needle = name.trim();
    PRESET_METRICS
        .iter()
        .copied()
        .find(|preset| preset.to_lowercase() == needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_non_empty() {
        assert!(PRESET_METRICS.iter().all(|name| !name.trim().is_empty()));
        assert!(!PRESET_METRICS.contains(&OTHER_CHOICE));
    }

    #[test]
    fn find_preset_is_case_insensitive() {
        assert_eq!(find_preset("sleep (HOURS)"), Some("Sleep (hours)"));
        assert_eq!(find_preset("  HRV (ms) "), Some("HRV (ms)"));
        assert_eq!(find_preset("vo₂max"), Some("VO₂max"));
        assert_eq!(find_preset("Naps"), None);
        assert_eq!(find_preset(OTHER_CHOICE), None);
    }
}

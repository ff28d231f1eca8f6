//! Chart controls carried across interactions.
//!
//! The presentation layer owns a [`ChartControls`] record for the session and
//! hands it by value to the stateless shaping transforms on every call.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Upper bound for the "last N entries" window.
pub const MAX_LAST_N: usize = 1000;

/// Lowest weight a label can be given.
pub const WEIGHT_MIN: f64 = 0.0;

/// Highest weight a label can be given.
pub const WEIGHT_MAX: f64 = 3.0;

/// Weight granularity.
pub const WEIGHT_STEP: f64 = 0.1;

const DEFAULT_WEIGHT: f64 = 1.0;

/// How the trend chart is drawn. Rendering only; shaping ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartType {
    #[default]
    Line,
    Bar,
}

/// Session-scoped chart controls.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartControls {
    /// Categories shown on the trend chart. Empty means all.
    pub selected_categories: BTreeSet<String>,
    pub chart_type: ChartType,
    /// Keep only the trailing N entries per category; 0 keeps everything.
    pub last_n: usize,
    /// Show running sums instead of raw values.
    pub cumulative: bool,
    /// Per-label multipliers for the weighted chart.
    pub weights: BTreeMap<String, f64>,
    /// Rescale weighted values to percentage shares.
    pub normalize: bool,
}

impl ChartControls {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }

    /// Set the window size, capped at [`MAX_LAST_N`].
    #[must_use]
    pub fn with_last_n(mut self, last_n: usize) -> Self {
        self.last_n = last_n.min(MAX_LAST_N);
        self
    }

    #[must_use]
    pub fn with_cumulative(mut self, enable: bool) -> Self {
        self.cumulative = enable;
        self
    }

    #[must_use]
    pub fn with_normalize(mut self, enable: bool) -> Self {
        self.normalize = enable;
        self
    }

    #[must_use]
    pub fn with_weight(mut self, label: impl Into<String>, weight: f64) -> Self {
        self.set_weight(label, weight);
        self
    }

    /// Store a weight for `label`, clamped to the slider range and snapped to
    /// [`WEIGHT_STEP`]. Last write wins.
    pub fn set_weight(&mut self, label: impl Into<String>, weight: f64) {
        self.weights.insert(label.into(), clamp_weight(weight));
    }

    /// Weight for `label`, 1.0 when none was set.
    pub fn weight(&self, label: &str) -> f64 {
        self.weights.get(label).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    /// Seed a default weight for every label not seen before.
    pub fn seed_weights<'a>(&mut self, labels: impl IntoIterator<Item = &'a str>) {
        for label in labels {
            self.weights
                .entry(label.to_string())
                .or_insert(DEFAULT_WEIGHT);
        }
    }

    /// Re-apply the bounds to a record read from outside (e.g. a session file).
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.last_n = self.last_n.min(MAX_LAST_N);
        for weight in self.weights.values_mut() {
            *weight = clamp_weight(*weight);
        }
        self.selected_categories = self
            .selected_categories
            .into_iter()
            .map(|category| category.trim().to_string())
            .filter(|category| !category.is_empty())
            .collect();
        self
    }
}

fn clamp_weight(weight: f64) -> f64 {
    if !weight.is_finite() {
        return DEFAULT_WEIGHT;
    }
    let snapped = (weight / WEIGHT_STEP).round() / (1.0 / WEIGHT_STEP);
    snapped.clamp(WEIGHT_MIN, WEIGHT_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_default_to_one() {
        let controls = ChartControls::new();
        assert_eq!(controls.weight("Sleep"), 1.0);
    }

    #[test]
    fn weights_are_clamped_and_snapped() {
        let controls = ChartControls::new()
            .with_weight("a", 7.5)
            .with_weight("b", -1.0)
            .with_weight("c", 1.26)
            .with_weight("d", f64::NAN);
        assert_eq!(controls.weight("a"), WEIGHT_MAX);
        assert_eq!(controls.weight("b"), WEIGHT_MIN);
        assert!((controls.weight("c") - 1.3).abs() < 1e-9);
        assert_eq!(controls.weight("d"), 1.0);
    }

    #[test]
    fn last_n_is_capped() {
        let controls = ChartControls::new().with_last_n(5000);
        assert_eq!(controls.last_n, MAX_LAST_N);
    }

    #[test]
    fn seed_weights_keeps_existing_entries() {
        let mut controls = ChartControls::new().with_weight("Sleep", 2.0);
        controls.seed_weights(["Sleep", "Exercise"]);
        assert_eq!(controls.weight("Sleep"), 2.0);
        assert_eq!(controls.weights.get("Exercise"), Some(&1.0));
    }

    #[test]
    fn sanitized_drops_blank_categories() {
        let mut controls = ChartControls::new().with_categories(["  Steps ", "   "]);
        controls.last_n = 99_999;
        let controls = controls.sanitized();
        assert_eq!(
            controls.selected_categories.iter().collect::<Vec<_>>(),
            vec!["Steps"]
        );
        assert_eq!(controls.last_n, MAX_LAST_N);
    }
}

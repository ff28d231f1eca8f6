//! Observation and data point records.

/// Canonical header of the category column in the tabular store.
pub const CATEGORY_COLUMN: &str = "Category";

/// Canonical header of the value column in the tabular store.
pub const VALUE_COLUMN: &str = "Value";

/// Canonical key of the label field in structured document points.
pub const LABEL_COLUMN: &str = "Label";

/// Title used when the structured document does not provide one.
pub const DEFAULT_CHART_TITLE: &str = "JSON Data";

/// One entry in the tabular store.
///
/// Built only by the ingestion validator, so `category` is non-empty and
/// `value` is finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Metric name, e.g. "Sleep (hours)".
    pub category: String,
    /// Observed amount.
    pub value: f64,
}

impl Observation {
    pub fn new(category: impl Into<String>, value: f64) -> Self {
        Self {
            category: category.into(),
            value,
        }
    }
}

/// One cleaned entry of the structured document's point list.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Cleaned view of the structured document.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDocument {
    /// Free text title; [`DEFAULT_CHART_TITLE`] when absent.
    pub title: String,
    /// Points that survived cleaning, in document order.
    pub points: Vec<DataPoint>,
}

impl Default for ChartDocument {
    fn default() -> Self {
        Self {
            title: DEFAULT_CHART_TITLE.to_string(),
            points: Vec::new(),
        }
    }
}

impl ChartDocument {
    /// Labels in document order, duplicates included.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|point| point.label.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

//! Coercion and cleaning of raw store contents.
//!
//! Cleaning is best-effort: rows with an unusable category, label or value
//! are dropped and counted, never raised. A missing required column yields an
//! empty result.

use serde_json::{Map, Value};
use tracing::debug;

use metric_model::{
    CATEGORY_COLUMN, ChartDocument, CleanedSeries, DEFAULT_CHART_TITLE, DataPoint, LABEL_COLUMN,
    Observation, VALUE_COLUMN,
};

use crate::document::RawDocument;
use crate::header::{find_column, normalize_header};
use crate::numeric::{json_to_f64, parse_numeric};
use crate::store::RawTable;

/// Outcome of a cleaning or loading pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cleaned<T> {
    pub data: T,
    /// Rows or points dropped for a missing or non-numeric field.
    pub dropped: usize,
    /// Data-quality and read problems worth showing to the user.
    pub warnings: Vec<String>,
}

impl<T: Default> Cleaned<T> {
    /// Empty result carrying one warning.
    pub fn with_warning(message: impl Into<String>) -> Self {
        Self {
            data: T::default(),
            dropped: 0,
            warnings: vec![message.into()],
        }
    }
}

/// Clean the raw tabular store into a [`CleanedSeries`].
pub fn clean_series(table: &RawTable) -> Cleaned<CleanedSeries> {
    if table.headers.is_empty() {
        return Cleaned::default();
    }
    let category_idx = find_column(&table.headers, CATEGORY_COLUMN);
    let value_idx = find_column(&table.headers, VALUE_COLUMN);
    let (Some(category_idx), Some(value_idx)) = (category_idx, value_idx) else {
        return Cleaned::with_warning(format!(
            "tabular store has no {CATEGORY_COLUMN}/{VALUE_COLUMN} columns"
        ));
    };

    let mut observations = Vec::with_capacity(table.rows.len());
    let mut dropped = 0usize;
    for row in &table.rows {
        let category = row.get(category_idx).map(|cell| cell.trim()).unwrap_or("");
        let value = row.get(value_idx).and_then(|cell| parse_numeric(cell));
        match value {
            Some(value) if !category.is_empty() => {
                observations.push(Observation::new(category, value));
            }
            _ => dropped += 1,
        }
    }
    debug!(kept = observations.len(), dropped, "cleaned tabular rows");
    Cleaned {
        data: CleanedSeries::new(observations),
        dropped,
        warnings: Vec::new(),
    }
}

/// Clean the raw document into a [`ChartDocument`].
pub fn clean_document(raw: &RawDocument) -> Cleaned<ChartDocument> {
    let title = raw
        .chart_title
        .as_ref()
        .and_then(text_of)
        .unwrap_or_else(|| DEFAULT_CHART_TITLE.to_string());

    let mut points = Vec::with_capacity(raw.points().len());
    let mut dropped = 0usize;
    let mut keyed = 0usize;
    for entry in raw.points() {
        let fields = entry.as_object().map(normalized_fields).unwrap_or_default();
        let (label, value) = (
            find_field(&fields, LABEL_COLUMN),
            find_field(&fields, VALUE_COLUMN),
        );
        if label.is_some() && value.is_some() {
            keyed += 1;
        }
        let label = label.and_then(text_of);
        let value = value.and_then(json_to_f64);
        match (label, value) {
            (Some(label), Some(value)) => points.push(DataPoint::new(label, value)),
            _ => dropped += 1,
        }
    }

    let mut warnings = Vec::new();
    if !raw.points().is_empty() && keyed == 0 {
        warnings.push("data_points entries have no label/value fields".to_string());
    }
    debug!(kept = points.len(), dropped, "cleaned document points");
    Cleaned {
        data: ChartDocument { title, points },
        dropped,
        warnings,
    }
}

fn normalized_fields(object: &Map<String, Value>) -> Vec<(String, &Value)> {
    object
        .iter()
        .map(|(key, value)| (normalize_header(key), value))
        .collect()
}

fn find_field<'a>(fields: &[(String, &'a Value)], name: &str) -> Option<&'a Value> {
    fields
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| *value)
}

/// Non-blank text of a string or number value.
fn text_of(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    if text.is_empty() { None } else { Some(text) }
}

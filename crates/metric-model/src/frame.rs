//! Chart-ready frame types.
//!
//! A [`ShapedFrame`] is the exact tabular shape a chart renderer consumes:
//! one index (entry sequence numbers or labels) and one numeric column per
//! series. Values are either numbers or absent; there is no text cell.

use std::fmt;

/// Row index of a shaped frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameIndex {
    /// 1-based per-category entry numbers, strictly increasing.
    Entry(Vec<usize>),
    /// Point labels in document order.
    Label(Vec<String>),
}

impl FrameIndex {
    pub fn len(&self) -> usize {
        match self {
            Self::Entry(entries) => entries.len(),
            Self::Label(labels) => labels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Display text of the index cell at `row`.
    pub fn display_at(&self, row: usize) -> Option<String> {
        match self {
            Self::Entry(entries) => entries.get(row).map(ToString::to_string),
            Self::Label(labels) => labels.get(row).cloned(),
        }
    }
}

/// One numeric series of a shaped frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl FrameColumn {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Sum of the present values.
    pub fn total(&self) -> f64 {
        self.values.iter().flatten().sum()
    }
}

/// Chart-ready table produced by a shaping transform.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedFrame {
    /// Header of the index column ("Entry #" or "Label").
    pub index_name: String,
    pub index: FrameIndex,
    /// Series columns; every column has `index.len()` values.
    pub columns: Vec<FrameColumn>,
}

impl ShapedFrame {
    pub fn new(index_name: impl Into<String>, index: FrameIndex, columns: Vec<FrameColumn>) -> Self {
        Self {
            index_name: index_name.into(),
            index,
            columns,
        }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.index.len()
    }

    /// Number of series columns (the index is not counted).
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, name: &str) -> Option<&FrameColumn> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }

    /// Cell at (`row`, `column`), `None` when absent or out of range.
    pub fn value(&self, row: usize, column: &str) -> Option<f64> {
        self.column(column)
            .and_then(|col| col.values.get(row).copied().flatten())
    }

    /// Largest present value across all columns.
    pub fn max_value(&self) -> Option<f64> {
        self.columns
            .iter()
            .flat_map(|column| column.values.iter().flatten().copied())
            .fold(None, |acc: Option<f64>, value| {
                Some(acc.map_or(value, |current| current.max(value)))
            })
    }
}

/// Why a transform produced nothing to chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoDataReason {
    /// The source had no usable rows or points.
    EmptySource,
    /// The category selection matched nothing in the source.
    NoMatchingCategories,
}

impl fmt::Display for NoDataReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySource => f.write_str("no data available yet"),
            Self::NoMatchingCategories => f.write_str("no data for the selected categories"),
        }
    }
}

/// Output of a shaping transform: a frame, or an explicit "no data" signal
/// the renderer turns into a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Frame(ShapedFrame),
    NoData(NoDataReason),
}

impl ChartData {
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData(_))
    }

    pub fn frame(&self) -> Option<&ShapedFrame> {
        match self {
            Self::Frame(frame) => Some(frame),
            Self::NoData(_) => None,
        }
    }

    pub fn into_frame(self) -> Option<ShapedFrame> {
        match self {
            Self::Frame(frame) => Some(frame),
            Self::NoData(_) => None,
        }
    }
}

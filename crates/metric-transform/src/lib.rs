//! Chart-shaping transforms.
//!
//! This crate turns cleaned metric data into the exact frames a chart
//! renderer consumes. Every transform is stateless; chart controls are
//! passed in on each call.
//!
//! - **static_chart**: label-indexed passthrough of the structured document
//! - **trend**: windowed, optionally cumulative pivot of the tabular series
//! - **weighted**: weighted and optionally normalized document values
//! - **pipeline**: all three for one interaction
//! - **export**: CSV and Polars `DataFrame` output

pub mod error;
pub mod export;
pub mod pipeline;
pub mod static_chart;
pub mod trend;
pub mod weighted;

pub use error::{ExportError, Result};
pub use export::{frame_to_csv, frame_to_dataframe};
pub use pipeline::{ChartSet, shape_charts};
pub use static_chart::{LABEL_INDEX, STATIC_VALUE_COLUMN, static_frame};
pub use trend::{ENTRY_INDEX, trend_frame};
pub use weighted::{WEIGHTED_COLUMN, weighted_frame};

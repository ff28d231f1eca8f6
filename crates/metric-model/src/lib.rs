//! Longevity metric data model.
//!
//! Shared types for the metric workbench:
//!
//! - **observation**: tabular store rows and structured document points
//! - **presets**: the fixed metric names offered on the survey surface
//! - **series**: the cleaned tabular series
//! - **frame**: chart-ready frames produced by the shaping transforms
//! - **options**: the session-scoped chart controls record
//! - **error**: ingestion validation errors

pub mod error;
pub mod frame;
pub mod observation;
pub mod options;
pub mod presets;
pub mod series;

pub use error::ValidationError;
pub use frame::{ChartData, FrameColumn, FrameIndex, NoDataReason, ShapedFrame};
pub use observation::{
    CATEGORY_COLUMN, ChartDocument, DEFAULT_CHART_TITLE, DataPoint, LABEL_COLUMN, Observation,
    VALUE_COLUMN,
};
pub use options::{ChartControls, ChartType, MAX_LAST_N, WEIGHT_MAX, WEIGHT_MIN, WEIGHT_STEP};
pub use presets::{OTHER_CHOICE, PRESET_METRICS, find_preset};
pub use series::CleanedSeries;

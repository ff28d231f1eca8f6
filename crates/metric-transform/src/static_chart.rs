//! Static passthrough of the structured document.

use metric_model::{ChartData, ChartDocument, FrameColumn, FrameIndex, NoDataReason, ShapedFrame};

/// Index header of label-indexed frames.
pub const LABEL_INDEX: &str = "Label";

/// Column header of the static chart.
pub const STATIC_VALUE_COLUMN: &str = "Value";

/// One row per point, indexed by label, with its value as the only column.
pub fn static_frame(document: &ChartDocument) -> ChartData {
    if document.is_empty() {
        return ChartData::NoData(NoDataReason::EmptySource);
    }
    let labels = document.labels().map(str::to_string).collect();
    let values = document.points.iter().map(|point| Some(point.value)).collect();
    ChartData::Frame(ShapedFrame::new(
        LABEL_INDEX,
        FrameIndex::Label(labels),
        vec![FrameColumn::new(STATIC_VALUE_COLUMN, values)],
    ))
}

//! One full shaping pass over both sources.

use metric_model::{ChartControls, ChartData, ChartDocument, CleanedSeries};

use crate::static_chart::static_frame;
use crate::trend::trend_frame;
use crate::weighted::weighted_frame;

/// The three chart inputs produced for one interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    /// Static view of the structured document.
    pub static_chart: ChartData,
    /// Windowed pivot of the tabular series.
    pub trend: ChartData,
    /// Weighted view of the structured document.
    pub weighted: ChartData,
}

/// Shape every chart from the cleaned sources.
///
/// The controls are taken by value: the pipeline reads them for this pass
/// only and keeps nothing between calls.
pub fn shape_charts(
    series: &CleanedSeries,
    document: &ChartDocument,
    controls: ChartControls,
) -> ChartSet {
    ChartSet {
        static_chart: static_frame(document),
        trend: trend_frame(
            series,
            &controls.selected_categories,
            controls.last_n,
            controls.cumulative,
        ),
        weighted: weighted_frame(&document.points, &controls.weights, controls.normalize),
    }
}

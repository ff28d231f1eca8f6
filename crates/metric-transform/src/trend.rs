//! Windowed, optionally cumulative pivot of the tabular series.
//!
//! Every category becomes one column. Rows are indexed by a per-category
//! entry number that always starts at 1, also after the trailing-window trim.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use metric_model::{
    ChartData, CleanedSeries, FrameColumn, FrameIndex, NoDataReason, ShapedFrame,
};

/// Index header of the trend frame.
pub const ENTRY_INDEX: &str = "Entry #";

/// Pivot the series into one column per selected category.
///
/// - `selected`: categories to keep; empty keeps all of them.
/// - `last_n`: keep only the trailing `last_n` entries per category, then
///   renumber them from 1. Zero keeps everything.
/// - `cumulative`: replace each column with its running sum. Sums that
///   overflow become absent cells.
pub fn trend_frame(
    series: &CleanedSeries,
    selected: &BTreeSet<String>,
    last_n: usize,
    cumulative: bool,
) -> ChartData {
    if series.is_empty() {
        return ChartData::NoData(NoDataReason::EmptySource);
    }

    // Store order within a category is the entry order.
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for observation in series.iter() {
        if selected.is_empty() || selected.contains(&observation.category) {
            groups
                .entry(observation.category.as_str())
                .or_default()
                .push(observation.value);
        }
    }
    if groups.is_empty() {
        return ChartData::NoData(NoDataReason::NoMatchingCategories);
    }

    if last_n > 0 {
        for values in groups.values_mut() {
            let excess = values.len().saturating_sub(last_n);
            values.drain(..excess);
        }
    }

    let height = groups.values().map(Vec::len).max().unwrap_or(0);
    let columns = groups
        .into_iter()
        .map(|(category, values)| {
            let values = if cumulative {
                running_sum(&values)
            } else {
                values
            };
            let mut cells: Vec<Option<f64>> = values
                .into_iter()
                .map(|value| value.is_finite().then_some(value))
                .collect();
            cells.resize(height, None);
            FrameColumn::new(category, cells)
        })
        .collect::<Vec<_>>();

    debug!(
        rows = height,
        columns = columns.len(),
        last_n,
        cumulative,
        "shaped trend frame"
    );
    ChartData::Frame(ShapedFrame::new(
        ENTRY_INDEX,
        FrameIndex::Entry((1..=height).collect()),
        columns,
    ))
}

fn running_sum(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |total, value| {
            *total += value;
            Some(*total)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use metric_model::Observation;

    fn series(rows: &[(&str, f64)]) -> CleanedSeries {
        rows.iter()
            .map(|(category, value)| Observation::new(*category, *value))
            .collect()
    }

    fn all() -> BTreeSet<String> {
        BTreeSet::new()
    }

    #[test]
    fn trailing_window_is_renumbered_from_one() {
        let data = series(&[("A", 1.0), ("A", 2.0), ("A", 3.0), ("A", 4.0), ("A", 5.0)]);
        let frame = trend_frame(&data, &all(), 2, false).into_frame().unwrap();
        assert_eq!(frame.index, FrameIndex::Entry(vec![1, 2]));
        assert_eq!(frame.column("A").unwrap().values, vec![Some(4.0), Some(5.0)]);
    }

    #[test]
    fn cumulative_sums_each_column() {
        let data = series(&[("A", 1.0), ("A", 2.0), ("A", 3.0)]);
        let frame = trend_frame(&data, &all(), 0, true).into_frame().unwrap();
        assert_eq!(
            frame.column("A").unwrap().values,
            vec![Some(1.0), Some(3.0), Some(6.0)]
        );
    }

    #[test]
    fn shorter_series_are_padded_with_absent_values() {
        let data = series(&[("B", 10.0), ("A", 1.0), ("B", 20.0), ("B", 30.0)]);
        let frame = trend_frame(&data, &all(), 0, true).into_frame().unwrap();
        assert_eq!(frame.column_names(), vec!["A", "B"]);
        assert_eq!(frame.column("A").unwrap().values, vec![Some(1.0), None, None]);
        assert_eq!(
            frame.column("B").unwrap().values,
            vec![Some(10.0), Some(30.0), Some(60.0)]
        );
    }

    #[test]
    fn overflowing_running_sum_becomes_absent() {
        let data = series(&[("A", 1e308), ("A", 1e308), ("B", 1.0)]);
        let frame = trend_frame(&data, &all(), 0, true).into_frame().unwrap();
        assert_eq!(frame.column("A").unwrap().values, vec![Some(1e308), None]);
        assert_eq!(frame.column("B").unwrap().values, vec![Some(1.0), None]);
    }

    #[test]
    fn window_larger_than_series_keeps_everything() {
        let data = series(&[("A", 1.0), ("A", 2.0)]);
        let frame = trend_frame(&data, &all(), 10, false).into_frame().unwrap();
        assert_eq!(frame.index, FrameIndex::Entry(vec![1, 2]));
    }

    #[test]
    fn selection_filters_categories() {
        let data = series(&[("A", 1.0), ("B", 2.0)]);
        let selected: BTreeSet<String> = ["B".to_string()].into();
        let frame = trend_frame(&data, &selected, 0, false).into_frame().unwrap();
        assert_eq!(frame.column_names(), vec!["B"]);
    }

    #[test]
    fn unmatched_selection_is_no_data() {
        let data = series(&[("A", 1.0)]);
        let selected: BTreeSet<String> = ["Z".to_string()].into();
        assert_eq!(
            trend_frame(&data, &selected, 0, false),
            ChartData::NoData(NoDataReason::NoMatchingCategories)
        );
    }

    #[test]
    fn empty_series_is_no_data() {
        assert_eq!(
            trend_frame(&CleanedSeries::default(), &all(), 3, true),
            ChartData::NoData(NoDataReason::EmptySource)
        );
    }
}

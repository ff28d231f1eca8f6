//! Weighted, optionally normalized view of the structured document.

use std::collections::BTreeMap;

use tracing::debug;

use metric_model::{ChartData, DataPoint, FrameColumn, FrameIndex, NoDataReason, ShapedFrame};

use crate::static_chart::LABEL_INDEX;

/// Column header of the weighted chart.
pub const WEIGHTED_COLUMN: &str = "Weighted";

/// Multiply every point by its label's weight (1.0 when unset).
///
/// With `normalize`, values are rescaled to percentage shares of their total.
/// A total that is zero, negative or not finite leaves the weighted values as
/// they are. Products that overflow become absent cells.
pub fn weighted_frame(
    points: &[DataPoint],
    weights: &BTreeMap<String, f64>,
    normalize: bool,
) -> ChartData {
    if points.is_empty() {
        return ChartData::NoData(NoDataReason::EmptySource);
    }
    let mut weighted: Vec<Option<f64>> = points
        .iter()
        .map(|point| point.value * weights.get(&point.label).copied().unwrap_or(1.0))
        .map(|value| value.is_finite().then_some(value))
        .collect();

    if normalize {
        let total: f64 = weighted.iter().flatten().sum();
        if total.is_finite() && total > 0.0 {
            for value in weighted.iter_mut().flatten() {
                *value = *value / total * 100.0;
            }
        } else {
            debug!(total, "skipping normalization of unusable total");
        }
    }

    let labels = points.iter().map(|point| point.label.clone()).collect();
    ChartData::Frame(ShapedFrame::new(
        LABEL_INDEX,
        FrameIndex::Label(labels),
        vec![FrameColumn::new(WEIGHTED_COLUMN, weighted)],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(data: &ChartData) -> Vec<Option<f64>> {
        data.frame().unwrap().columns[0].values.clone()
    }

    #[test]
    fn applies_weights_with_default_of_one() {
        let points = vec![DataPoint::new("Sleep", 4.0), DataPoint::new("Diet", 3.0)];
        let weights = BTreeMap::from([("Sleep".to_string(), 2.5)]);
        let data = weighted_frame(&points, &weights, false);
        assert_eq!(values(&data), vec![Some(10.0), Some(3.0)]);
    }

    #[test]
    fn normalizes_to_percentages() {
        let points = vec![DataPoint::new("L1", 2.0), DataPoint::new("L2", 2.0)];
        let data = weighted_frame(&points, &BTreeMap::new(), true);
        assert_eq!(values(&data), vec![Some(50.0), Some(50.0)]);
    }

    #[test]
    fn zero_total_skips_normalization() {
        let points = vec![DataPoint::new("L1", 0.0), DataPoint::new("L2", 5.0)];
        let weights = BTreeMap::from([("L2".to_string(), 0.0)]);
        let data = weighted_frame(&points, &weights, true);
        assert_eq!(values(&data), vec![Some(0.0), Some(0.0)]);
    }

    #[test]
    fn negative_total_skips_normalization() {
        let points = vec![DataPoint::new("L1", -4.0), DataPoint::new("L2", 1.0)];
        let data = weighted_frame(&points, &BTreeMap::new(), true);
        assert_eq!(values(&data), vec![Some(-4.0), Some(1.0)]);
    }

    #[test]
    fn overflowing_products_become_absent() {
        let points = vec![DataPoint::new("A", 1e308), DataPoint::new("B", 1.0)];
        let weights = BTreeMap::from([("A".to_string(), 3.0)]);
        let data = weighted_frame(&points, &weights, true);
        assert_eq!(values(&data), vec![None, Some(100.0)]);

        let data = weighted_frame(&points, &weights, false);
        assert_eq!(values(&data), vec![None, Some(1.0)]);
    }

    #[test]
    fn infinite_total_skips_normalization() {
        let points = vec![DataPoint::new("A", 1e308), DataPoint::new("B", 1e308)];
        let data = weighted_frame(&points, &BTreeMap::new(), true);
        assert_eq!(values(&data), vec![Some(1e308), Some(1e308)]);
    }

    #[test]
    fn duplicate_labels_share_one_weight() {
        let points = vec![DataPoint::new("Sleep", 1.0), DataPoint::new("Sleep", 2.0)];
        let weights = BTreeMap::from([("Sleep".to_string(), 3.0)]);
        let data = weighted_frame(&points, &weights, false);
        assert_eq!(values(&data), vec![Some(3.0), Some(6.0)]);
    }

    #[test]
    fn empty_points_are_no_data() {
        assert!(weighted_frame(&[], &BTreeMap::new(), true).is_no_data());
    }
}

//! Exporting shaped frames.
//!
//! Frames leave the pipeline either as CSV text (for files) or as a Polars
//! `DataFrame` (for tabular previews). Absent cells become empty CSV fields
//! and null DataFrame values.

use std::io;

use csv::WriterBuilder;
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use metric_model::{FrameIndex, ShapedFrame};

use crate::error::Result;

/// Encode a frame as CSV: the index column first, then one column per series.
pub fn frame_to_csv(frame: &ShapedFrame) -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    let mut header = Vec::with_capacity(frame.width() + 1);
    header.push(frame.index_name.as_str());
    header.extend(frame.column_names());
    writer.write_record(&header)?;

    for row in 0..frame.height() {
        let mut record = Vec::with_capacity(frame.width() + 1);
        record.push(frame.index.display_at(row).unwrap_or_default());
        for column in &frame.columns {
            let cell = column.values.get(row).copied().flatten();
            record.push(cell.map(|value| value.to_string()).unwrap_or_default());
        }
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(io::Error::new(e.error().kind(), e.error().to_string())))?;
    Ok(String::from_utf8(bytes)?)
}

/// Convert a frame into a Polars `DataFrame` with the index as first column.
pub fn frame_to_dataframe(frame: &ShapedFrame) -> Result<DataFrame> {
    let index = match &frame.index {
        FrameIndex::Entry(entries) => Series::new(
            frame.index_name.as_str().into(),
            entries.iter().map(|&entry| entry as u64).collect::<Vec<u64>>(),
        ),
        FrameIndex::Label(labels) => Series::new(frame.index_name.as_str().into(), labels.clone()),
    };
    let mut columns: Vec<Column> = Vec::with_capacity(frame.width() + 1);
    columns.push(index.into_column());
    for column in &frame.columns {
        columns.push(Series::new(column.name.as_str().into(), column.values.clone()).into_column());
    }
    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use metric_model::FrameColumn;

    fn entry_frame() -> ShapedFrame {
        ShapedFrame::new(
            "Entry #",
            FrameIndex::Entry(vec![1, 2]),
            vec![
                FrameColumn::new("Sleep (hours)", vec![Some(7.5), Some(8.0)]),
                FrameColumn::new("Water, tap (oz)", vec![Some(16.0), None]),
            ],
        )
    }

    #[test]
    fn csv_quotes_and_leaves_absent_cells_empty() {
        let csv = frame_to_csv(&entry_frame()).unwrap();
        assert_eq!(
            csv,
            "Entry #,Sleep (hours),\"Water, tap (oz)\"\n1,7.5,16\n2,8,\n"
        );
    }

    #[test]
    fn dataframe_has_index_and_series_columns() {
        let df = frame_to_dataframe(&entry_frame()).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
        let water = df.column("Water, tap (oz)").unwrap();
        assert_eq!(water.null_count(), 1);
    }

    #[test]
    fn dataframe_rejects_series_named_like_index() {
        let frame = ShapedFrame::new(
            "Entry #",
            FrameIndex::Entry(vec![1]),
            vec![FrameColumn::new("Entry #", vec![Some(1.0)])],
        );
        assert!(frame_to_dataframe(&frame).is_err());
    }
}

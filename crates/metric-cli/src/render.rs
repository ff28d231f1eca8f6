//! Terminal rendering of store contents and shaped frames.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use metric_ingest::RawTable;
use metric_model::{ChartType, ShapedFrame};

const BAR_WIDTH: usize = 24;
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Two-cell status line with the loaded counts.
pub fn status_table(csv_rows: usize, json_points: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("CSV Rows Loaded"),
        header_cell("JSON Points Loaded"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![count_cell(csv_rows), count_cell(json_points)]);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 1, CellAlignment::Center);
    table
}

/// The raw store contents as written.
pub fn raw_table(raw: &RawTable) -> Table {
    let mut table = Table::new();
    table.set_header(
        raw.headers
            .iter()
            .map(|header| header_cell(header))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for row in &raw.rows {
        table.add_row(row.clone());
    }
    table
}

/// A frame drawn with one bar per cell.
pub fn bar_chart(frame: &ShapedFrame) -> Table {
    let scale = frame.max_value().filter(|max| *max > 0.0);
    let mut table = frame_table(frame);
    for row in 0..frame.height() {
        let mut cells = vec![index_cell(frame, row)];
        for column in &frame.columns {
            let cell = match column.values.get(row).copied().flatten() {
                Some(value) => Cell::new(format!("{} {value:>10.2}", bar(value, scale))),
                None => dim_cell("-"),
            };
            cells.push(cell);
        }
        table.add_row(cells);
    }
    table
}

/// A frame drawn as values with a sparkline per column in the last row.
pub fn line_chart(frame: &ShapedFrame) -> Table {
    let mut table = frame_table(frame);
    for row in 0..frame.height() {
        let mut cells = vec![index_cell(frame, row)];
        for column in &frame.columns {
            let cell = match column.values.get(row).copied().flatten() {
                Some(value) => Cell::new(format!("{value:.2}")),
                None => dim_cell("-"),
            };
            cells.push(cell);
        }
        table.add_row(cells);
    }
    let mut footer = vec![
        Cell::new("trend")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ];
    for column in &frame.columns {
        footer.push(Cell::new(sparkline(&column.values)).fg(Color::Green));
    }
    table.add_row(footer);
    table
}

/// Draw a frame the way the chart type asks for.
pub fn chart(frame: &ShapedFrame, chart_type: ChartType) -> Table {
    match chart_type {
        ChartType::Line => line_chart(frame),
        ChartType::Bar => bar_chart(frame),
    }
}

fn frame_table(frame: &ShapedFrame) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell(&frame.index_name)];
    header.extend(frame.columns.iter().map(|column| header_cell(&column.name)));
    table.set_header(header);
    apply_chart_style(&mut table);
    for idx in 1..=frame.width() {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    table
}

fn bar(value: f64, scale: Option<f64>) -> String {
    let Some(max) = scale else {
        return String::new();
    };
    let filled = ((value.max(0.0) / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled.min(BAR_WIDTH))
}

/// One glyph per present value, scaled between the column's min and max.
pub fn sparkline(values: &[Option<f64>]) -> String {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let Some(min) = present.iter().copied().reduce(f64::min) else {
        return String::new();
    };
    let max = present.iter().copied().fold(min, f64::max);
    let top = SPARK_LEVELS.len() - 1;
    present
        .iter()
        .map(|value| {
            if max > min {
                let level = ((value - min) / (max - min) * top as f64).round() as usize;
                SPARK_LEVELS[level.min(top)]
            } else {
                SPARK_LEVELS[top / 2]
            }
        })
        .collect()
}

fn index_cell(frame: &ShapedFrame, row: usize) -> Cell {
    Cell::new(frame.index.display_at(row).unwrap_or_default())
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_chart_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

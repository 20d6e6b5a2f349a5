//! Report layout: places extracted test records into the sectioned grid.

mod grid;
pub mod policy;

pub use grid::{Cell, CellStyle, CellValue, ChartSpec, ColumnRange, Grid};

use log::debug;
use pdbxml::value::STATISTICS_SIG_FIGS;
use pdbxml::{CellRow, TestRecord, labels, round_significant, to_number};

use crate::ReportOptions;
use policy::*;

fn number(text: &str) -> CellValue {
    to_number(text).into()
}

fn rounded_number(text: &str) -> CellValue {
    number(&round_significant(text, STATISTICS_SIG_FIGS))
}

/// Lay out a whole report: title row, then one block per test record.
pub fn layout_report(
    form_name: Option<&str>,
    records: &[TestRecord],
    options: &ReportOptions,
) -> Grid {
    let mut grid = Grid::new(SHEET_NAME);

    let title = form_name
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_TITLE);
    grid.set_styled(TITLE_ROW, TITLE_COL, title, CellStyle::BOLD);
    grid.skip_row();

    let mut current_row = grid.max_row();
    for record in records {
        current_row = layout_test(&mut grid, record, current_row + BLOCK_GAP, options);
        grid.autosize_columns(COLUMN_PADDING);
    }

    grid
}

/// Lay out one test starting at `start_row`; returns the last row used.
fn layout_test(
    grid: &mut Grid,
    record: &TestRecord,
    start_row: u32,
    options: &ReportOptions,
) -> u32 {
    layout_general(grid, record, start_row);
    grid.skip_row();

    let deviation_row = grid.max_row() + DEVIATION_GAP;
    layout_deviation(grid, record, deviation_row);
    grid.skip_row();

    layout_summary(grid, record);
    grid.skip_row();

    let header_row = layout_cell_table(grid, &record.cell_rows);
    if options.charts && !record.cell_rows.is_empty() {
        let last_row = grid.max_row();
        add_charts(grid, header_row + 1, last_row);
    }

    debug!(
        "Laid out test block rows {}..={} ({} cells)",
        start_row,
        grid.max_row(),
        record.cell_rows.len()
    );
    grid.max_row()
}

/// General info in A/B, string info two rows further down A/B, jar/cell counts in C/D
fn layout_general(grid: &mut Grid, record: &TestRecord, start_row: u32) {
    for (row, (key, value)) in (start_row..).zip(record.general_info.iter()) {
        grid.set_styled(row, COL_A, key, CellStyle::BOLD);
        let value = if key == labels::AMBIENT_TEMP {
            number(value)
        } else {
            CellValue::text(value)
        };
        grid.set(row, COL_B, value);
    }

    for (row, (key, value)) in (start_row + STRING_INFO_OFFSET..).zip(record.string_info.iter()) {
        grid.set_styled(row, COL_A, key, CellStyle::BOLD);
        grid.set(row, COL_B, value);
    }

    for (row, (key, value)) in (start_row..).zip(record.jar_cells.iter()) {
        grid.set_styled(row, COL_C, key, CellStyle::BOLD);
        grid.set(row, COL_D, number(value));
    }
}

/// First thresholds down A/B, the rest down C/D from the same top row
fn layout_deviation(grid: &mut Grid, record: &TestRecord, start_row: u32) {
    for (i, (key, value)) in record.deviation.iter().enumerate() {
        let (row, key_col) = if i < DEVIATION_ROWS_PER_PAIR {
            (start_row + i as u32, COL_A)
        } else {
            (start_row + (i - DEVIATION_ROWS_PER_PAIR) as u32, COL_C)
        };
        grid.set_styled(row, key_col, key, CellStyle::BOLD);
        grid.set(row, key_col + 1, rounded_number(value));
    }
}

/// "Table Summary" label, then baseline plus one header/value column per statistic
fn layout_summary(grid: &mut Grid, record: &TestRecord) {
    let label_row = grid.append_row([CellValue::text(SUMMARY_LABEL)]);
    grid.set_style(label_row, COL_A, CellStyle::BOLD);

    let header_row = label_row + 1;
    grid.set_styled(header_row, COL_A, BASELINE_LABEL, CellStyle::BOLD);
    grid.set(header_row + 1, COL_A, number(&record.baseline_impedance));

    for (col, (key, value)) in (SUMMARY_FIRST_COL..).zip(record.table_summary.iter()) {
        grid.set_styled(header_row, col, key, CellStyle::HEADER);
        grid.set(header_row + 1, col, rounded_number(value));
    }
}

/// Header row plus one row per cell; returns the header row
fn layout_cell_table(grid: &mut Grid, rows: &[CellRow]) -> u32 {
    let header_row = grid.append_row(
        CELL_TABLE
            .iter()
            .map(|column| CellValue::text(column.header)),
    );
    for col in (1u16..).take(CELL_TABLE.len()) {
        grid.set_style(header_row, col, CellStyle::HEADER);
    }

    for row in rows {
        grid.append_row(CELL_TABLE.iter().map(|column| cell_value(row, column.source)));
    }

    header_row
}

fn cell_value(row: &CellRow, source: CellSource) -> CellValue {
    match source {
        CellSource::CellNumber => CellValue::Int(row.cell_number),
        CellSource::Number(array) => row
            .get_ignore_case(array)
            .map(number)
            .unwrap_or(CellValue::Empty),
        CellSource::Text(array) => row
            .get_ignore_case(array)
            .map(CellValue::text)
            .unwrap_or(CellValue::Empty),
    }
}

fn add_charts(grid: &mut Grid, first_row: u32, last_row: u32) {
    let categories = ColumnRange {
        column: CHART_CATEGORY_COL,
        first_row,
        last_row,
    };

    grid.add_chart(ChartSpec {
        title: IMPEDANCE_CHART_TITLE,
        x_axis_title: CHART_X_AXIS_TITLE,
        y_axis_title: IMPEDANCE_AXIS_TITLE,
        anchor_row: first_row,
        anchor_col: IMPEDANCE_CHART_COL,
        categories,
        values: ColumnRange {
            column: IMPEDANCE_VALUES_COL,
            ..categories
        },
    });
    grid.add_chart(ChartSpec {
        title: VOLTAGE_CHART_TITLE,
        x_axis_title: CHART_X_AXIS_TITLE,
        y_axis_title: VOLTAGE_AXIS_TITLE,
        anchor_row: first_row,
        anchor_col: VOLTAGE_CHART_COL,
        categories,
        values: ColumnRange {
            column: VOLTAGE_VALUES_COL,
            ..categories
        },
    });
}

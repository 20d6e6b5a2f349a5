use rust_xlsxwriter::{Chart, ChartType, Format, FormatAlign, Workbook, XlsxError};

use crate::layout::{CellStyle, CellValue, ChartSpec, ColumnRange, Grid};

/// Render a laid-out grid as an xlsx workbook with a single sheet
pub fn workbook_bytes(grid: &Grid) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(grid.sheet_name())?;

    let formats = Formats::new();

    for ((row, col), cell) in grid.cells() {
        // Grid addressing is 1-based, xlsx is 0-based
        let (row, col) = (row - 1, col - 1);
        let format = formats.get(cell.style);
        match &cell.value {
            CellValue::Empty => {
                worksheet.write_blank(row, col, format)?;
            }
            CellValue::Text(text) => {
                worksheet.write_string_with_format(row, col, text, format)?;
            }
            CellValue::Int(i) => {
                worksheet.write_number_with_format(row, col, *i as f64, format)?;
            }
            CellValue::Float(f) => {
                worksheet.write_number_with_format(row, col, *f, format)?;
            }
        }
    }

    for (col, width) in grid.column_widths() {
        worksheet.set_column_width(col - 1, width)?;
    }

    for spec in grid.charts() {
        let chart = line_chart(grid.sheet_name(), spec);
        worksheet.insert_chart(spec.anchor_row - 1, spec.anchor_col - 1, &chart)?;
    }

    workbook.save_to_buffer()
}

struct Formats {
    plain: Format,
    bold: Format,
    header: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            plain: Format::new(),
            bold: Format::new().set_bold(),
            header: Format::new().set_bold().set_align(FormatAlign::Center),
        }
    }

    fn get(&self, style: CellStyle) -> &Format {
        match (style.bold, style.centered) {
            (_, true) => &self.header,
            (true, false) => &self.bold,
            (false, false) => &self.plain,
        }
    }
}

fn line_chart(sheet_name: &str, spec: &ChartSpec) -> Chart {
    let mut chart = Chart::new(ChartType::Line);
    chart.title().set_name(spec.title);
    chart.x_axis().set_name(spec.x_axis_title);
    chart.y_axis().set_name(spec.y_axis_title);
    chart.legend().set_hidden();

    chart
        .add_series()
        .set_name(spec.y_axis_title)
        .set_categories(sheet_range(sheet_name, spec.categories))
        .set_values(sheet_range(sheet_name, spec.values));

    chart
}

fn sheet_range(sheet_name: &str, range: ColumnRange) -> (&str, u32, u16, u32, u16) {
    let col = range.column - 1;
    (sheet_name, range.first_row - 1, col, range.last_row - 1, col)
}

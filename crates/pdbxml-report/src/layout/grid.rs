use std::collections::BTreeMap;

use pdbxml::Value;
use pdbxml::value::float_repr;

/// Value of one grid cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
}

impl CellValue {
    /// Text cell; the empty string is an empty cell
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Self::Empty
        } else {
            Self::Text(text)
        }
    }

    /// Characters the value occupies when displayed. Blank and zero values count as 0.
    pub fn display_width(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Text(s) => s.chars().count(),
            Self::Int(0) => 0,
            Self::Int(i) => i.to_string().len(),
            Self::Float(f) if *f == 0.0 => 0,
            Self::Float(f) => float_repr(*f).chars().count(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Int(i) => Self::Int(i),
            Value::Float(f) => Self::Float(f),
            Value::Text(s) => Self::text(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStyle {
    pub bold: bool,
    pub centered: bool,
}

impl CellStyle {
    pub const PLAIN: Self = Self {
        bold: false,
        centered: false,
    };
    pub const BOLD: Self = Self {
        bold: true,
        centered: false,
    };
    pub const HEADER: Self = Self {
        bold: true,
        centered: true,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

/// Inclusive run of rows in one column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    pub column: u16,
    pub first_row: u32,
    pub last_row: u32,
}

/// A single-series line chart anchored on the sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub title: &'static str,
    pub x_axis_title: &'static str,
    pub y_axis_title: &'static str,
    pub anchor_row: u32,
    pub anchor_col: u16,
    pub categories: ColumnRange,
    pub values: ColumnRange,
}

/// Sparse 1-based sheet model.
///
/// Cells that were written count towards [`Grid::max_row`] even when they
/// hold no value. Appends go below the append cursor, which trails every
/// written row and is also advanced by [`Grid::skip_row`].
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    sheet_name: String,
    cells: BTreeMap<(u32, u16), Cell>,
    cursor: u32,
    column_widths: BTreeMap<u16, f64>,
    charts: Vec<ChartSpec>,
}

impl Grid {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            cells: BTreeMap::new(),
            cursor: 0,
            column_widths: BTreeMap::new(),
            charts: Vec::new(),
        }
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    pub fn set(&mut self, row: u32, col: u16, value: impl Into<CellValue>) {
        self.set_styled(row, col, value, CellStyle::PLAIN);
    }

    pub fn set_styled(
        &mut self,
        row: u32,
        col: u16,
        value: impl Into<CellValue>,
        style: CellStyle,
    ) {
        debug_assert!(row > 0 && col > 0, "grid addressing is 1-based");
        self.cells.insert(
            (row, col),
            Cell {
                value: value.into(),
                style,
            },
        );
        self.cursor = self.cursor.max(row);
    }

    pub fn set_style(&mut self, row: u32, col: u16, style: CellStyle) {
        match self.cells.get_mut(&(row, col)) {
            Some(cell) => cell.style = style,
            None => self.set_styled(row, col, CellValue::Empty, style),
        }
    }

    /// Write `values` into the row below the cursor, starting at column A
    pub fn append_row(&mut self, values: impl IntoIterator<Item = CellValue>) -> u32 {
        let row = self.cursor + 1;
        for (col, value) in (1u16..).zip(values) {
            self.set(row, col, value);
        }
        self.cursor = row;
        row
    }

    /// Leave an empty row below the cursor
    pub fn skip_row(&mut self) {
        self.append_row(std::iter::empty());
    }

    /// Highest written row, 1 for an empty grid
    pub fn max_row(&self) -> u32 {
        self.cells.keys().map(|&(row, _)| row).max().unwrap_or(1)
    }

    /// Highest written column, 1 for an empty grid
    pub fn max_column(&self) -> u16 {
        self.cells.keys().map(|&(_, col)| col).max().unwrap_or(1)
    }

    pub fn get(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Value at a position, `Empty` when nothing was written there
    pub fn value(&self, row: u32, col: u16) -> &CellValue {
        self.get(row, col)
            .map(|cell| &cell.value)
            .unwrap_or(&CellValue::Empty)
    }

    /// Cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = ((u32, u16), &Cell)> {
        self.cells.iter().map(|(&pos, cell)| (pos, cell))
    }

    /// Size every column from A to the last written one to its widest value plus `padding`
    pub fn autosize_columns(&mut self, padding: usize) {
        let mut widest: BTreeMap<u16, usize> =
            (1..=self.max_column()).map(|col| (col, 0)).collect();
        for (&(_, col), cell) in &self.cells {
            let width = widest.entry(col).or_default();
            *width = (*width).max(cell.value.display_width());
        }
        self.column_widths = widest
            .into_iter()
            .map(|(col, width)| (col, (width + padding) as f64))
            .collect();
    }

    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    pub fn column_widths(&self) -> impl Iterator<Item = (u16, f64)> + '_ {
        self.column_widths.iter().map(|(&col, &width)| (col, width))
    }

    pub fn add_chart(&mut self, chart: ChartSpec) {
        self.charts.push(chart);
    }

    pub fn charts(&self) -> &[ChartSpec] {
        &self.charts
    }
}

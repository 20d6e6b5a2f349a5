//! Fixed positions of the report sections.
//!
//! Rows and columns are 1-based, matching spreadsheet addressing. Existing
//! report consumers read cells by position, so every offset here is part of
//! the output format.

pub const SHEET_NAME: &str = "Battery Test";
pub const FALLBACK_TITLE: &str = "Battery Test Report";

pub const TITLE_ROW: u32 = 1;
pub const TITLE_COL: u16 = 1;

/// Rows between the end of one test block (or the title) and the next block
pub const BLOCK_GAP: u32 = 2;

/// String info starts this many rows below general info, sharing columns A/B
pub const STRING_INFO_OFFSET: u32 = 2;

pub const COL_A: u16 = 1;
pub const COL_B: u16 = 2;
pub const COL_C: u16 = 3;
pub const COL_D: u16 = 4;

/// Rows between the general block and the deviation thresholds
pub const DEVIATION_GAP: u32 = 2;

/// Deviation thresholds fill A/B for this many rows, then wrap to C/D
pub const DEVIATION_ROWS_PER_PAIR: usize = 2;

pub const SUMMARY_LABEL: &str = "Table Summary";
pub const BASELINE_LABEL: &str = "Baseline Impedance (mΩ)";

/// First column of the summary statistic headers (baseline sits in A)
pub const SUMMARY_FIRST_COL: u16 = 2;

/// Where a per-cell table column takes its value from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSource {
    CellNumber,
    /// Source array, coerced to a number when it parses
    Number(&'static str),
    /// Source array, written as text
    Text(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct CellColumn {
    pub header: &'static str,
    pub source: CellSource,
}

pub const CELL_TABLE: [CellColumn; 7] = [
    CellColumn {
        header: "Cell No.",
        source: CellSource::CellNumber,
    },
    CellColumn {
        header: "Impedance (mΩ)",
        source: CellSource::Number("impedence"),
    },
    CellColumn {
        header: "% Deviation (Baseline)",
        source: CellSource::Number("v"),
    },
    CellColumn {
        header: "% Variation (String)",
        source: CellSource::Number("d"),
    },
    CellColumn {
        header: "Voltage (V)",
        source: CellSource::Number("voltage"),
    },
    CellColumn {
        header: "Time",
        source: CellSource::Text("time"),
    },
    CellColumn {
        header: "Temperature (°C)",
        source: CellSource::Number("tem_1"),
    },
];

/// Added to the widest value in a column
pub const COLUMN_PADDING: usize = 2;

// Charts: cell number on the category axis, one series each
pub const CHART_CATEGORY_COL: u16 = 1;
pub const IMPEDANCE_VALUES_COL: u16 = 2;
pub const VOLTAGE_VALUES_COL: u16 = 5;
/// Column J
pub const IMPEDANCE_CHART_COL: u16 = 10;
/// Column T
pub const VOLTAGE_CHART_COL: u16 = 20;

pub const CHART_X_AXIS_TITLE: &str = "Cell Number";
pub const IMPEDANCE_CHART_TITLE: &str = "Impedance Graph";
pub const IMPEDANCE_AXIS_TITLE: &str = "Impedance (mΩ)";
pub const VOLTAGE_CHART_TITLE: &str = "Voltage Graph";
pub const VOLTAGE_AXIS_TITLE: &str = "Voltage (V)";

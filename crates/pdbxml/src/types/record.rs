use crate::labels;

use super::Fields;

/// One `<test>` element, normalized into labelled report sections
#[derive(Debug, Clone, PartialEq)]
pub struct TestRecord {
    /// Test date and ambient temperature
    pub general_info: Fields,
    /// String name and battery/equipment type
    pub string_info: Fields,
    /// Jar, cell, cells-per-jar and strap counts
    pub jar_cells: Fields,
    /// Up to four warning/alarm deviation thresholds
    pub deviation: Fields,
    /// Aggregate statistics reported by the instrument
    pub table_summary: Fields,
    /// Reference impedance, `"N/A"` when the document has none
    pub baseline_impedance: String,
    /// Per-cell measurements, unique by cell number, in first-seen order
    pub cell_rows: Vec<CellRow>,
}

impl Default for TestRecord {
    fn default() -> Self {
        Self {
            general_info: Fields::new(),
            string_info: Fields::new(),
            jar_cells: Fields::new(),
            deviation: Fields::new(),
            table_summary: Fields::new(),
            baseline_impedance: labels::BASELINE_DEFAULT.to_string(),
            cell_rows: Vec::new(),
        }
    }
}

impl TestRecord {
    pub fn cell(&self, cell_number: i64) -> Option<&CellRow> {
        self.cell_rows
            .iter()
            .find(|row| row.cell_number == cell_number)
    }
}

/// Measurements for one physical cell, keyed by source array name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRow {
    pub cell_number: i64,
    pub fields: Fields<String>,
}

impl CellRow {
    pub fn new(cell_number: i64) -> Self {
        Self {
            cell_number,
            fields: Fields::new(),
        }
    }

    pub fn get(&self, array_name: &str) -> Option<&str> {
        self.fields.get(array_name)
    }

    /// Field lookup used by the report: array names are compared ignoring case
    pub fn get_ignore_case(&self, array_name: &str) -> Option<&str> {
        self.fields.get_ignore_case(array_name)
    }
}

/// Everything extracted from one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// First non-empty `formname` tag value in the document
    pub form_name: Option<String>,
    pub records: Vec<TestRecord>,
}

/// One `<test>` flattened to a single CSV row: column name -> text
pub type FlatRecord = Fields<String>;

// Flat (one row per test) extraction used by the CSV export.
// Tag and array names are kept verbatim as column names.

use roxmltree::{Document, Node};

use crate::types::FlatRecord;
use crate::{Elements, ExtractMode, ExtractOptions};

pub const FORM_NAME_COLUMN: &str = "form_name";
pub const TEST_DATE_COLUMN: &str = "test_date";
pub const RESULTS_GUID_COLUMN: &str = "resultsguid";

/// Separator between array item values in a single CSV field
pub const ARRAY_JOIN: &str = ", ";

/// Flatten every `test` into one record: the fixed form/test columns, then the
/// first `data` element's tags, then its arrays joined into one field each.
pub fn extract_flat(doc: &Document, options: &ExtractOptions) -> Vec<FlatRecord> {
    let elements = options.elements();
    let mut records = Vec::new();

    'forms: for form in elements.children(doc.root_element(), "form") {
        // A form without a name still yields rows, just with an empty form_name
        let form_name = form.attribute("name").unwrap_or_default();

        for test in elements.children(form, "test") {
            records.push(flatten_test(elements, form_name, test));

            if options.mode == ExtractMode::FirstTest {
                break 'forms;
            }
        }
    }

    records
}

fn flatten_test(elements: Elements, form_name: &str, test: Node) -> FlatRecord {
    let mut row = FlatRecord::new();
    row.insert(FORM_NAME_COLUMN.to_string(), form_name);
    row.insert(
        TEST_DATE_COLUMN.to_string(),
        test.attribute("date").unwrap_or_default(),
    );
    row.insert(
        RESULTS_GUID_COLUMN.to_string(),
        test.attribute("resultsguid").unwrap_or_default(),
    );

    let Some(data) = elements.first_child(test, "data") else {
        return row;
    };

    for tag in elements.children(data, "tag") {
        let name = tag.attribute("name").unwrap_or_default();
        row.insert(name.to_string(), tag.text().unwrap_or_default());
    }

    for array in elements.children(data, "array") {
        let name = array.attribute("name").unwrap_or_default();
        let joined = elements
            .children(array, "arrayitem")
            .filter_map(|item| item.text())
            .collect::<Vec<_>>()
            .join(ARRAY_JOIN);
        row.insert(name.to_string(), joined);
    }

    row
}

/// Union of all record columns in first-seen order
pub fn flat_header(records: &[FlatRecord]) -> Vec<&str> {
    let mut header: Vec<&str> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !header.contains(&key) {
                header.push(key);
            }
        }
    }
    header
}

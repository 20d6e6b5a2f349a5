use std::collections::HashMap;

use log::debug;
use roxmltree::{Document, Node};

use crate::labels;
use crate::types::*;
use crate::{Elements, ExtractMode, ExtractOptions, PdbXmlError, Result, TagIndex};

/// Parser context: extraction options plus the document-level form name
pub struct Parser<'o> {
    options: &'o ExtractOptions,
    form_name: Option<String>,
}

impl<'o> Parser<'o> {
    pub fn new(options: &'o ExtractOptions) -> Self {
        Self {
            options,
            form_name: None,
        }
    }

    fn elements(&self) -> Elements<'o> {
        self.options.elements()
    }

    pub fn parse_document(mut self, doc: &Document) -> Result<Extraction> {
        let root = doc.root_element();
        let elements = self.elements();
        let mut records = Vec::new();

        'forms: for form in elements.children(root, "form") {
            for test in elements.children(form, "test") {
                let record = self.parse_test(test)?;
                debug!(
                    "Extracted test {:?} with {} cells",
                    test.attribute("date").unwrap_or_default(),
                    record.cell_rows.len()
                );
                records.push(record);

                if self.options.mode == ExtractMode::FirstTest {
                    break 'forms;
                }
            }
        }

        Ok(Extraction {
            form_name: self.form_name,
            records,
        })
    }

    fn parse_test(&mut self, test: Node) -> Result<TestRecord> {
        let elements = self.elements();
        let mut record = TestRecord::default();

        record
            .general_info
            .insert(labels::TEST_DATE, test.attribute("date").unwrap_or_default());

        // Sections fill distinct mappings, so a single pass in document order is enough
        for child in test.children().filter(|n| elements.in_namespace(n)) {
            match child.tag_name().name() {
                "data" => self.parse_data(child, &mut record),
                "nameplate" => self.parse_nameplate(child, &mut record),
                "copyhistory" => self.parse_copy_history(child, &mut record),
                _ => {}
            }
        }

        record.cell_rows = self.parse_cell_rows(test)?;

        Ok(record)
    }

    fn tags<'a>(&self, node: Node<'a, '_>) -> TagIndex<'a> {
        TagIndex::build(node, self.elements(), self.options.tag_match)
    }

    fn parse_data(&mut self, node: Node, record: &mut TestRecord) {
        let tags = self.tags(node);

        if let Some(temperature) = tags.get(labels::TEMPERATURE_TAG) {
            record.general_info.insert(labels::AMBIENT_TEMP, temperature);
        }

        if self.form_name.is_none() {
            self.form_name = tags
                .get(labels::FORM_NAME_TAG)
                .filter(|name| !name.is_empty())
                .map(str::to_string);
        }

        fill(&mut record.table_summary, &tags, labels::DATA_SUMMARY);
    }

    fn parse_nameplate(&self, node: Node, record: &mut TestRecord) {
        let tags = self.tags(node);
        fill(&mut record.string_info, &tags, labels::NAMEPLATE_STRING);
        fill(&mut record.deviation, &tags, labels::NAMEPLATE_DEVIATION);
    }

    fn parse_copy_history(&self, node: Node, record: &mut TestRecord) {
        let tags = self.tags(node);
        fill(&mut record.jar_cells, &tags, labels::COPYHISTORY_JAR_CELLS);

        if let Some(baseline) = tags.get(labels::BASELINE_TAG) {
            record.baseline_impedance = baseline.to_string();
        }
    }

    /// Merge every `array` under the test into per-cell rows.
    ///
    /// Rows are unique by index and ordered by first appearance across all
    /// arrays; a later array writing the same field on the same index wins.
    fn parse_cell_rows(&self, test: Node) -> Result<Vec<CellRow>> {
        let elements = self.elements();
        let mut rows: Vec<CellRow> = Vec::new();
        let mut positions: HashMap<i64, usize> = HashMap::new();

        for array in elements.descendants(test, "array") {
            let array_name = array.attribute("name").unwrap_or_default();

            for item in elements.children(array, "arrayitem") {
                let cell_number = parse_index(array_name, item)?;
                let value = item.text().unwrap_or_default();

                let position = *positions.entry(cell_number).or_insert_with(|| {
                    rows.push(CellRow::new(cell_number));
                    rows.len() - 1
                });
                rows[position].fields.insert(array_name.to_string(), value);
            }
        }

        Ok(rows)
    }
}

fn fill(fields: &mut Fields, tags: &TagIndex, pairs: &[(&str, &'static str)]) {
    for &(tag, label) in pairs {
        if let Some(value) = tags.get(tag) {
            fields.insert(label, value);
        }
    }
}

fn parse_index(array_name: &str, item: Node) -> Result<i64> {
    let raw = item
        .attribute("index")
        .ok_or_else(|| PdbXmlError::MissingIndex {
            array: array_name.to_string(),
        })?;

    raw.trim()
        .parse()
        .map_err(|_| PdbXmlError::InvalidIndex {
            array: array_name.to_string(),
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(xml: &str, options: &ExtractOptions) -> Result<Extraction> {
        let doc = crate::parse_document(xml)?;
        Parser::new(options).parse_document(&doc)
    }

    const TWO_ARRAYS: &str = r#"<pdbxml>
  <form name="StringA">
    <test date="2024-01-01">
      <array name="impedence">
        <arrayitem index="0">5.1</arrayitem>
        <arrayitem index="1">5.3</arrayitem>
      </array>
      <array name="voltage">
        <arrayitem index="0">12.6</arrayitem>
        <arrayitem index="1">12.5</arrayitem>
      </array>
    </test>
  </form>
</pdbxml>"#;

    #[test]
    fn arrays_merge_into_cell_rows() {
        let extraction = extract(TWO_ARRAYS, &ExtractOptions::default()).unwrap();
        let rows = &extraction.records[0].cell_rows;

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cell_number, 0);
        assert_eq!(rows[0].get("impedence"), Some("5.1"));
        assert_eq!(rows[0].get("voltage"), Some("12.6"));
        assert_eq!(rows[1].cell_number, 1);
        assert_eq!(rows[1].get("impedence"), Some("5.3"));
        assert_eq!(rows[1].get("voltage"), Some("12.5"));
    }

    #[test]
    fn row_order_follows_first_appearance() {
        let xml = r#"<pdbxml><form><test>
            <array name="a">
                <arrayitem index="3">x</arrayitem>
                <arrayitem index="1">y</arrayitem>
            </array>
            <data>
                <array name="b">
                    <arrayitem index="2">p</arrayitem>
                    <arrayitem index="3">q</arrayitem>
                    <arrayitem index="3">r</arrayitem>
                </array>
            </data>
        </test></form></pdbxml>"#;

        let extraction = extract(xml, &ExtractOptions::default()).unwrap();
        let rows = &extraction.records[0].cell_rows;
        let order: Vec<_> = rows.iter().map(|r| r.cell_number).collect();
        assert_eq!(order, vec![3, 1, 2]);

        let three = extraction.records[0].cell(3).unwrap();
        assert_eq!(three.get("a"), Some("x"));
        assert_eq!(three.get("b"), Some("r"));
    }

    #[test]
    fn empty_array_item_becomes_empty_string() {
        let xml = r#"<pdbxml><form><test>
            <array name="time"><arrayitem index="0"/></array>
        </test></form></pdbxml>"#;
        let extraction = extract(xml, &ExtractOptions::default()).unwrap();
        assert_eq!(extraction.records[0].cell_rows[0].get("time"), Some(""));
    }

    #[test]
    fn non_integer_index_is_fatal() {
        let xml = r#"<pdbxml><form><test>
            <array name="voltage"><arrayitem index="zero">1</arrayitem></array>
        </test></form></pdbxml>"#;
        let err = extract(xml, &ExtractOptions::default()).unwrap_err();
        match err {
            PdbXmlError::InvalidIndex { array, value } => {
                assert_eq!(array, "voltage");
                assert_eq!(value, "zero");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_index_is_fatal() {
        let xml = r#"<pdbxml><form><test>
            <array name="voltage"><arrayitem>1</arrayitem></array>
        </test></form></pdbxml>"#;
        let err = extract(xml, &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, PdbXmlError::MissingIndex { .. }));
    }

    #[test]
    fn sections_use_fixed_labels() {
        let xml = r#"<pdbxml><form><test date="2024-03-02">
            <data>
                <tag name="Temperature">23</tag>
                <tag name="AvgImpedence">5.2345678</tag>
                <tag name="voltageSum">54.1</tag>
            </data>
            <nameplate>
                <tag name="StringName">UPS-1</tag>
                <tag name="PDBEquipmentType">VRLA</tag>
                <tag name="WarningDeviation">20</tag>
                <tag name="AllowedDeviation">30</tag>
            </nameplate>
            <copyhistory>
                <tag name="NumJars">4</tag>
                <tag name="NumCells">24</tag>
                <tag name="InstrBaselineZ">5.0</tag>
            </copyhistory>
        </test></form></pdbxml>"#;

        let extraction = extract(xml, &ExtractOptions::default()).unwrap();
        let record = &extraction.records[0];

        let general: Vec<_> = record.general_info.keys().collect();
        assert_eq!(general, vec![labels::TEST_DATE, labels::AMBIENT_TEMP]);
        assert_eq!(record.general_info.get(labels::AMBIENT_TEMP), Some("23"));

        let summary: Vec<_> = record.table_summary.keys().collect();
        assert_eq!(
            summary,
            vec![labels::AVERAGE_IMPEDANCE, labels::TOTAL_STRING_VOLTAGE]
        );

        assert_eq!(record.string_info.get(labels::STRING_NAME), Some("UPS-1"));
        assert_eq!(record.string_info.get(labels::BATTERY_TYPE), Some("VRLA"));

        let deviation: Vec<_> = record.deviation.keys().collect();
        assert_eq!(
            deviation,
            vec![labels::WARNING_DEVIATION_PCT, labels::ALARM_DEVIATION_PCT]
        );

        assert_eq!(record.jar_cells.get(labels::NUM_JARS), Some("4"));
        assert_eq!(record.jar_cells.get(labels::NUM_CELLS), Some("24"));
        assert_eq!(record.baseline_impedance, "5.0");
    }

    #[test]
    fn exact_tag_matching_skips_other_cases() {
        let xml = r#"<pdbxml><form><test>
            <nameplate>
                <tag name="stringname">UPS-1</tag>
                <tag name="PDBEquipmentType">VRLA</tag>
            </nameplate>
        </test></form></pdbxml>"#;
        let options = ExtractOptions {
            tag_match: crate::TagMatch::Exact,
            ..ExtractOptions::default()
        };

        let extraction = extract(xml, &options).unwrap();
        let string_info = &extraction.records[0].string_info;
        assert_eq!(string_info.get(labels::STRING_NAME), None);
        assert_eq!(string_info.get(labels::BATTERY_TYPE), Some("VRLA"));

        let extraction = extract(xml, &ExtractOptions::default()).unwrap();
        assert_eq!(extraction.records[0].string_info.len(), 2);
    }

    #[test]
    fn baseline_defaults_when_absent() {
        let xml = r#"<pdbxml><form><test><copyhistory/></test></form></pdbxml>"#;
        let extraction = extract(xml, &ExtractOptions::default()).unwrap();
        assert_eq!(
            extraction.records[0].baseline_impedance,
            labels::BASELINE_DEFAULT
        );
    }

    #[test]
    fn form_name_is_stable_once_set() {
        let xml = r#"<pdbxml><form>
            <test><data><tag name="formname"></tag></data></test>
            <test><data><tag name="formname">First</tag></data></test>
            <test><data><tag name="formname">Second</tag></data></test>
        </form></pdbxml>"#;
        let extraction = extract(xml, &ExtractOptions::default()).unwrap();
        assert_eq!(extraction.form_name.as_deref(), Some("First"));
        assert_eq!(extraction.records.len(), 3);
    }

    #[test]
    fn first_test_mode_stops_early() {
        let xml = r#"<pdbxml>
            <form><test date="a"/><test date="b"/></form>
            <form><test date="c"/></form>
        </pdbxml>"#;

        let all = extract(xml, &ExtractOptions::default()).unwrap();
        let dates: Vec<_> = all
            .records
            .iter()
            .filter_map(|r| r.general_info.get(labels::TEST_DATE))
            .collect();
        assert_eq!(dates, vec!["a", "b", "c"]);

        let options = ExtractOptions {
            mode: ExtractMode::FirstTest,
            ..ExtractOptions::default()
        };
        let first = extract(xml, &options).unwrap();
        assert_eq!(first.records.len(), 1);
        assert_eq!(
            first.records[0].general_info.get(labels::TEST_DATE),
            Some("a")
        );
    }
}

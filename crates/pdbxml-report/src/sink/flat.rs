use pdbxml::{FlatRecord, flat_header};

/// Render flat records as CSV: a header with the union of all columns in
/// first-seen order, then one row per record with blanks for missing columns.
/// No records renders as an empty file.
pub fn flat_csv_bytes(records: &[FlatRecord]) -> Result<Vec<u8>, csv::Error> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let header = flat_header(records);
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header)?;
    for record in records {
        writer.write_record(header.iter().map(|column| record.get(column).unwrap_or_default()))?;
    }

    writer.into_inner().map_err(|err| err.into_error().into())
}

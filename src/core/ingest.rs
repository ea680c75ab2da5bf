//! CSV ingestion: every field is kept as raw text, nothing is coerced.

use crate::domain::model::{Dataset, Row};
use crate::utils::error::Result;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const UTF8_BOM: &str = "\u{feff}";

/// Parse comma separated UTF-8 with a mandatory header row.
///
/// Rows with a different field count than the header, or bytes that are not
/// valid UTF-8, fail the whole parse.
pub fn parse_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .flexible(false)
        .trim(Trim::None)
        .from_reader(reader);

    let columns: Vec<String> = csv_reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if i == 0 {
                name.trim_start_matches(UTF8_BOM).to_string()
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while csv_reader.read_record(&mut record)? {
        rows.push(record_to_row(&record));
    }

    tracing::debug!("Parsed {} columns and {} rows", columns.len(), rows.len());
    Dataset::new(columns, rows)
}

pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    tracing::debug!("Reading CSV from {}", path.display());
    let file = File::open(path)?;
    parse_csv(file)
}

fn record_to_row(record: &StringRecord) -> Row {
    record.iter().map(|field| Some(field.to_string())).collect()
}

//! CSV encoding for the sites and catalog tables.

use crate::domain::model::{DomainRecord, SITES_REQUIRED_COLUMNS};
use crate::utils::error::{AuditError, Result};
use serde::Serialize;

/// Serializes `rows` under a fixed header row. No rows still yields the header.
pub fn write_csv<T: Serialize>(columns: &[&str], rows: &[T]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(columns)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| AuditError::IoError(e.into_error()))
}

/// Parses the aggregated sites table.
///
/// An empty document is an empty table. Missing required columns is an error;
/// `sample_list_id` falls back to an empty string.
pub fn read_sites_csv(data: &[u8], source_name: &str) -> Result<Vec<DomainRecord>> {
    if data.iter().all(u8::is_ascii_whitespace) {
        tracing::warn!("⚠️ Input {} is empty", source_name);
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let missing: Vec<String> = SITES_REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AuditError::MissingColumns {
            source_name: source_name.to_string(),
            columns: missing,
        });
    }

    let mut records = Vec::new();
    for row in reader.deserialize::<DomainRecord>() {
        records.push(row?);
    }
    Ok(records)
}

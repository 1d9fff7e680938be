//! JSON export of every stored record.

use chrono::NaiveDate;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

use crate::managers::record_store::{RecordStore, RecordStoreTrait};
use crate::types::errors::ExportError;
use crate::types::record::Record;

/// File name of an export made on `date`, e.g. `planner-export-2024-05-01.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("planner-export-{}.json", date.format("%Y-%m-%d"))
}

/// Serializes records as a pretty-printed JSON array.
pub fn to_json(records: &[Record]) -> Result<String, ExportError> {
    serde_json::to_string_pretty(records)
        .map_err(|e| ExportError::SerializationError(e.to_string()))
}

/// Parses an export document back into records.
pub fn from_json(json: &str) -> Result<Vec<Record>, ExportError> {
    serde_json::from_str(json).map_err(|e| ExportError::SerializationError(e.to_string()))
}

/// Reads every record from the store and renders the export document.
pub fn export_json(conn: &Connection) -> Result<String, ExportError> {
    let records = RecordStore::new(conn).get_all()?;
    to_json(&records)
}

/// Writes the export document into `dir` and returns the file path.
pub fn export_to_dir(conn: &Connection, dir: &Path, date: NaiveDate) -> Result<PathBuf, ExportError> {
    let json = export_json(conn)?;

    fs::create_dir_all(dir)
        .map_err(|e| ExportError::IoError(format!("Failed to create export directory: {}", e)))?;

    let path = dir.join(export_file_name(date));
    fs::write(&path, json)
        .map_err(|e| ExportError::IoError(format!("Failed to write export file: {}", e)))?;

    tracing::info!(path = %path.display(), "records exported");
    Ok(path)
}

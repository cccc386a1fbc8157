//! CSV and JSON export of flattened chart records.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::ExportRecord;

/// Timestamp suffix for export file names.
pub const EXPORT_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

const CSV_HEADER: [&str; 3] = ["date", "details", "result"];

/// Where an export went and how much it wrote.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub csv_path: PathBuf,
    pub json_path: PathBuf,
    pub records: usize,
}

/// Write `records` to `export_<stamp>.csv` and `export_<stamp>.json` in `dir`.
pub fn export_records(
    dir: &Path,
    records: &[ExportRecord],
    stamp: NaiveDateTime,
) -> Result<ExportReport, AppError> {
    fs::create_dir_all(dir).map_err(|e| {
        AppError::Export(format!("Failed to create {}: {}", dir.display(), e))
    })?;

    let base = format!("export_{}", stamp.format(EXPORT_STAMP_FORMAT));
    let csv_path = dir.join(format!("{}.csv", base));
    let json_path = dir.join(format!("{}.json", base));

    write_csv(&csv_path, records)?;
    write_json(&json_path, records)?;

    Ok(ExportReport {
        csv_path,
        json_path,
        records: records.len(),
    })
}

/// Write records as CSV with a header row, even when there are no records.
pub fn write_csv(path: &Path, records: &[ExportRecord]) -> Result<(), AppError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .flush()
        .map_err(|e| AppError::Export(format!("Failed to write {}: {}", path.display(), e)))
}

/// Write records as a pretty-printed JSON array.
pub fn write_json(path: &Path, records: &[ExportRecord]) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)
        .map_err(|e| AppError::Export(format!("Failed to write {}: {}", path.display(), e)))
}

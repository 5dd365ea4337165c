// src/export/logic.rs

use crate::db::log::audit_quiet;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::{ExportFormat, HistoryExport};
use crate::models::history::HistoryRecord;
use crate::ui::messages::warning;
use rusqlite::Connection;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export records as flat rows, in the order given.
    ///
    /// - `file` must be an absolute path
    /// - an existing file is only replaced with `force` or after confirmation
    ///
    /// Returns the number of rows written.
    pub fn export(
        conn: &Connection,
        records: &[HistoryRecord],
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        if records.is_empty() {
            warning("No records found. Nothing to export.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        let rows: Vec<HistoryExport> = records.iter().map(HistoryExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        audit_quiet(
            conn,
            "export",
            &path.to_string_lossy(),
            &format!("Exported {} records as {}", rows.len(), format.as_str()),
        );

        Ok(rows.len())
    }
}

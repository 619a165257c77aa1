//! Batch serialization and atomic file output.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::columns::COLUMN_NAMES;
use super::header::header_fields;
use super::row::DatevRow;
use crate::config::ExportConfig;
use crate::error::ExportError;

/// Render the complete batch: header record, column-name record, then one
/// record per row. Semicolon-separated, CRLF line endings, fields quoted
/// only when they contain the separator, a quote, or a line break.
pub fn render_batch(year: i32, config: &ExportConfig, rows: &[DatevRow]) -> String {
    let mut out = String::new();
    push_record(&mut out, &header_fields(year, config));
    push_record_str(&mut out, &COLUMN_NAMES);
    for row in rows {
        push_record(&mut out, &row.to_fields());
    }
    out
}

/// Write the batch to `datev_export_{year}.csv` in `dir`.
///
/// The content goes to a temporary file first and is renamed into place,
/// so an aborted run never leaves a half-written export behind.
pub fn write_export_file(
    dir: &Path,
    year: i32,
    config: &ExportConfig,
    rows: &[DatevRow],
) -> Result<PathBuf, ExportError> {
    let content = render_batch(year, config, rows);
    let path = dir.join(format!("datev_export_{year}.csv"));
    let tmp = dir.join(format!("datev_export_{year}.csv.tmp"));
    fs::write(&tmp, &content)?;
    fs::rename(&tmp, &path)?;
    info!(rows = rows.len(), path = %path.display(), "export written");
    Ok(path)
}

fn push_record(out: &mut String, fields: &[String]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        push_field(out, field);
    }
    out.push_str("\r\n");
}

fn push_record_str(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        push_field(out, field);
    }
    out.push_str("\r\n");
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([';', '"', '\r', '\n']) {
        out.push('"');
        for ch in field.chars() {
            if ch == '"' {
                out.push_str("\"\"");
            } else {
                out.push(ch);
            }
        }
        out.push('"');
    } else {
        out.push_str(field);
    }
}

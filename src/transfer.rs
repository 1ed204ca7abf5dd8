use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use rusqlite::Connection;

use crate::error::Error;
use crate::model::{self, TaskRecord};

/// What an import run did. Skipped rows are the ones whose version would
/// have broken a task's chain or whose fields failed validation.
#[derive(Debug, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Serialize every row of the log, in insertion order, to a pretty JSON
/// file. Returns the path written.
pub fn export(db: &Connection, path: Option<PathBuf>) -> Result<PathBuf> {
    let path = path.unwrap_or_else(|| {
        PathBuf::from(format!(
            "eisen_export_{}.json",
            Local::now().format("%Y%m%d_%H%M%S")
        ))
    });

    let rows = model::full_log(db)?;
    let data = serde_json::to_vec_pretty(&rows)?;
    std::fs::write(&path, &data)
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!("Exported {} record(s) to {}", rows.len(), path.display());
    Ok(path)
}

/// Replay an exported file into the log through `append`, one row at a
/// time. Rows that would violate version contiguity, and rows that do not
/// deserialize, are skipped and counted rather than aborting the run. The
/// log itself is never rewritten to make room for them.
pub fn import(db: &Connection, path: &Path) -> Result<ImportReport> {
    let data = std::fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let rows: Vec<serde_json::Value> = serde_json::from_slice(&data)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let mut report = ImportReport {
        imported: 0,
        skipped: 0,
    };
    for row in rows {
        let record: TaskRecord = match serde_json::from_value(row) {
            Ok(record) => record,
            Err(_) => {
                report.skipped += 1;
                continue;
            }
        };
        match model::append(db, &record) {
            Ok(()) => report.imported += 1,
            Err(Error::ConstraintViolation(_)) => report.skipped += 1,
            Err(err) => return Err(err.into()),
        }
    }

    println!(
        "Imported {} record(s), skipped {}",
        report.imported, report.skipped
    );
    Ok(report)
}

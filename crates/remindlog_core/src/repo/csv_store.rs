//! CSV-backed table loading and snapshot writing.
//!
//! # Responsibility
//! - Decode the catalog, activation and dismissal tables from delimited files.
//! - Encode flattened snapshot records into one delimited file.
//!
//! # Invariants
//! - A load either decodes all three tables or returns an error; callers never
//!   observe partially decoded state.
//! - Every table starts with a header row, which is skipped.
//! - Snapshot timestamps use `YYYY-MM-DD HH:MM:SS`; missing values are written
//!   as the epoch sentinel.

use crate::model::reminder::{
    ActivationEntry, DismissalEntry, Reminder, ReminderTables, SnapshotRecord,
};
use crate::model::time::{format_optional_timestamp, parse_timestamp, Timestamp};
use crate::repo::reminder_repo::{
    RepoError, RepoResult, ACTIVATIONS_TABLE, DISMISSALS_TABLE, REMINDERS_TABLE,
};
use csv::{ByteRecord, ReaderBuilder, Writer};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File locations of the three input tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablePaths {
    pub reminders: PathBuf,
    pub activations: PathBuf,
    pub dismissals: PathBuf,
}

impl Default for TablePaths {
    fn default() -> Self {
        Self {
            reminders: PathBuf::from("test_data.csv"),
            activations: PathBuf::from("test_active.csv"),
            dismissals: PathBuf::from("test_dismissed.csv"),
        }
    }
}

/// Serialized snapshot row; column order is the export header order.
#[derive(Debug, Serialize)]
struct SnapshotRow<'a> {
    reminder_id: i64,
    reminder_text: &'a str,
    active_from: String,
    dismissed_at: String,
}

/// Loads all three tables from disk.
///
/// # Errors
/// - `RepoError::Io` when a file cannot be opened.
/// - `RepoError::MalformedInput` for a missing field, non-UTF-8 text,
///   non-integer id or unparseable timestamp, naming the table, line and field.
pub fn load_tables(paths: &TablePaths) -> RepoResult<ReminderTables> {
    let started_at = Instant::now();
    info!("event=tables_load module=repo status=start");

    let result = read_tables(paths);
    match &result {
        Ok(tables) => info!(
            "event=tables_load module=repo status=ok duration_ms={} reminders={} activations={} dismissals={}",
            started_at.elapsed().as_millis(),
            tables.reminders.len(),
            tables.activations.len(),
            tables.dismissals.len()
        ),
        Err(err) => error!(
            "event=tables_load module=repo status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }

    result
}

fn read_tables(paths: &TablePaths) -> RepoResult<ReminderTables> {
    Ok(ReminderTables {
        reminders: read_reminders(File::open(&paths.reminders)?)?,
        activations: read_activations(File::open(&paths.activations)?)?,
        dismissals: read_dismissals(File::open(&paths.dismissals)?)?,
    })
}

/// Decodes the catalog table (`reminder_id, reminder_text`).
pub fn read_reminders(input: impl Read) -> RepoResult<Vec<Reminder>> {
    let mut rows = Vec::new();
    for_each_row(input, REMINDERS_TABLE, |row| {
        rows.push(Reminder {
            id: row.int(0, "reminder_id")?,
            text: row.text(1, "reminder_text")?.to_string(),
        });
        Ok(())
    })?;
    Ok(rows)
}

/// Decodes the activation log (`entry_id, reminder_id, active_from`).
pub fn read_activations(input: impl Read) -> RepoResult<Vec<ActivationEntry>> {
    let mut rows = Vec::new();
    for_each_row(input, ACTIVATIONS_TABLE, |row| {
        rows.push(ActivationEntry {
            entry_id: row.int(0, "entry_id")?,
            reminder_id: row.int(1, "reminder_id")?,
            active_from: row.timestamp(2, "active_from")?,
        });
        Ok(())
    })?;
    Ok(rows)
}

/// Decodes the dismissal log (`entry_id, reminder_id, dismissed_at`).
pub fn read_dismissals(input: impl Read) -> RepoResult<Vec<DismissalEntry>> {
    let mut rows = Vec::new();
    for_each_row(input, DISMISSALS_TABLE, |row| {
        rows.push(DismissalEntry {
            entry_id: row.int(0, "entry_id")?,
            reminder_id: row.int(1, "reminder_id")?,
            dismissed_at: row.timestamp(2, "dismissed_at")?,
        });
        Ok(())
    })?;
    Ok(rows)
}

/// Writes snapshot records to `path`, replacing any existing file.
pub fn write_snapshot(path: impl AsRef<Path>, records: &[SnapshotRecord]) -> RepoResult<()> {
    let file = File::create(path.as_ref())?;
    write_snapshot_to(file, records)?;
    info!(
        "event=snapshot_write module=repo status=ok rows={}",
        records.len()
    );
    Ok(())
}

/// Writes snapshot records with a header row to any writer.
pub fn write_snapshot_to(output: impl Write, records: &[SnapshotRecord]) -> RepoResult<()> {
    let mut writer = Writer::from_writer(output);
    for record in records {
        writer.serialize(SnapshotRow {
            reminder_id: record.reminder_id,
            reminder_text: record.reminder_text.as_str(),
            active_from: format_optional_timestamp(record.active_from),
            dismissed_at: format_optional_timestamp(record.dismissed_at),
        })?;
    }
    // Header comes from the first serialized row; an empty export still needs it.
    if records.is_empty() {
        writer.write_record(["reminder_id", "reminder_text", "active_from", "dismissed_at"])?;
    }
    writer.flush()?;
    Ok(())
}

/// One data row together with its table name and 1-based file line.
struct Row<'r> {
    record: &'r ByteRecord,
    table: &'static str,
    line: u64,
}

impl<'r> Row<'r> {
    fn malformed(&self, field: &'static str, value: String) -> RepoError {
        RepoError::MalformedInput {
            table: self.table,
            line: self.line,
            field,
            value,
        }
    }

    fn text(&self, index: usize, field: &'static str) -> RepoResult<&'r str> {
        let raw = self
            .record
            .get(index)
            .ok_or_else(|| self.malformed(field, String::new()))?;
        std::str::from_utf8(raw)
            .map_err(|_| self.malformed(field, String::from_utf8_lossy(raw).into_owned()))
    }

    fn int(&self, index: usize, field: &'static str) -> RepoResult<i64> {
        let raw = self.text(index, field)?;
        raw.trim()
            .parse::<i64>()
            .map_err(|_| self.malformed(field, raw.to_string()))
    }

    fn timestamp(&self, index: usize, field: &'static str) -> RepoResult<Timestamp> {
        let raw = self.text(index, field)?;
        parse_timestamp(raw).map_err(|_| self.malformed(field, raw.to_string()))
    }
}

fn for_each_row(
    input: impl Read,
    table: &'static str,
    mut visit: impl FnMut(&Row<'_>) -> RepoResult<()>,
) -> RepoResult<()> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    for record in reader.byte_records() {
        let record = record?;
        let line = record.position().map_or(0, |position| position.line());
        visit(&Row {
            record: &record,
            table,
            line,
        })?;
    }
    Ok(())
}

//! Reminder repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Hold the catalog and both event logs for the lifetime of the process.
//! - Allocate reminder and entry ids on append.
//!
//! # Invariants
//! - Appends never rewrite or remove existing rows.
//! - Each table allocates ids as `max + 1` (or `0` when empty), independently.
//! - An append that cannot allocate a larger id fails and leaves the table
//!   unchanged.
//! - Repositories do not check references; services do.

use crate::model::reminder::{
    next_id, ActivationEntry, DismissalEntry, EntryId, Reminder, ReminderId, ReminderTables,
};
use crate::model::time::Timestamp;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

pub(crate) const REMINDERS_TABLE: &str = "reminders";
pub(crate) const ACTIVATIONS_TABLE: &str = "activations";
pub(crate) const DISMISSALS_TABLE: &str = "dismissals";

/// Repository error for loading and persisting reminder tables.
#[derive(Debug)]
pub enum RepoError {
    /// A row in an input table could not be decoded.
    MalformedInput {
        table: &'static str,
        line: u64,
        field: &'static str,
        value: String,
    },
    /// The table already holds `i64::MAX`; no larger id exists.
    IdSpaceExhausted { table: &'static str },
    Io(std::io::Error),
    Csv(csv::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedInput {
                table,
                line,
                field,
                value,
            } => write!(
                f,
                "malformed input in {table} table at line {line}: invalid {field} `{value}`"
            ),
            Self::IdSpaceExhausted { table } => {
                write!(f, "no id left to allocate in {table} table")
            }
            Self::Io(err) => write!(f, "{err}"),
            Self::Csv(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedInput { .. } | Self::IdSpaceExhausted { .. } => None,
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for RepoError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

/// Repository interface over the reminder catalog and its two event logs.
pub trait ReminderRepository {
    fn reminders(&self) -> &[Reminder];
    fn activations(&self) -> &[ActivationEntry];
    fn dismissals(&self) -> &[DismissalEntry];

    /// Appends a catalog row with the next reminder id.
    fn insert_reminder(&mut self, text: String) -> RepoResult<ReminderId>;
    /// Appends an activation entry with the next activation entry id.
    fn append_activation(
        &mut self,
        reminder_id: ReminderId,
        active_from: Timestamp,
    ) -> RepoResult<EntryId>;
    /// Appends a dismissal entry with the next dismissal entry id.
    fn append_dismissal(
        &mut self,
        reminder_id: ReminderId,
        dismissed_at: Timestamp,
    ) -> RepoResult<EntryId>;

    /// Replaces all three tables at once.
    fn replace_tables(&mut self, tables: ReminderTables);

    /// Returns whether the catalog holds `id`.
    fn contains_reminder(&self, id: ReminderId) -> bool {
        self.reminders().iter().any(|reminder| reminder.id == id)
    }

    /// Id the next `insert_reminder` would allocate.
    fn next_reminder_id(&self) -> RepoResult<ReminderId> {
        allocate(REMINDERS_TABLE, self.reminders().iter().map(|row| row.id))
    }

    fn next_activation_id(&self) -> RepoResult<EntryId> {
        allocate(
            ACTIVATIONS_TABLE,
            self.activations().iter().map(|entry| entry.entry_id),
        )
    }

    fn next_dismissal_id(&self) -> RepoResult<EntryId> {
        allocate(
            DISMISSALS_TABLE,
            self.dismissals().iter().map(|entry| entry.entry_id),
        )
    }
}

fn allocate(table: &'static str, ids: impl Iterator<Item = i64>) -> RepoResult<i64> {
    next_id(ids).ok_or(RepoError::IdSpaceExhausted { table })
}

/// Process-local repository backed by plain vectors.
#[derive(Debug, Clone, Default)]
pub struct MemoryReminderRepository {
    tables: ReminderTables,
}

impl MemoryReminderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tables(tables: ReminderTables) -> Self {
        Self { tables }
    }

    /// Borrows the current tables.
    pub fn tables(&self) -> &ReminderTables {
        &self.tables
    }
}

impl ReminderRepository for MemoryReminderRepository {
    fn reminders(&self) -> &[Reminder] {
        &self.tables.reminders
    }

    fn activations(&self) -> &[ActivationEntry] {
        &self.tables.activations
    }

    fn dismissals(&self) -> &[DismissalEntry] {
        &self.tables.dismissals
    }

    fn insert_reminder(&mut self, text: String) -> RepoResult<ReminderId> {
        let id = self.next_reminder_id()?;
        self.tables.reminders.push(Reminder { id, text });
        Ok(id)
    }

    fn append_activation(
        &mut self,
        reminder_id: ReminderId,
        active_from: Timestamp,
    ) -> RepoResult<EntryId> {
        let entry_id = self.next_activation_id()?;
        self.tables.activations.push(ActivationEntry {
            entry_id,
            reminder_id,
            active_from,
        });
        Ok(entry_id)
    }

    fn append_dismissal(
        &mut self,
        reminder_id: ReminderId,
        dismissed_at: Timestamp,
    ) -> RepoResult<EntryId> {
        let entry_id = self.next_dismissal_id()?;
        self.tables.dismissals.push(DismissalEntry {
            entry_id,
            reminder_id,
            dismissed_at,
        });
        Ok(entry_id)
    }

    fn replace_tables(&mut self, tables: ReminderTables) {
        self.tables = tables;
    }
}

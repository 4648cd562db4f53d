//! Reminder use-case service.
//!
//! # Responsibility
//! - Provide create/dismiss/renew entry points that append to the logs.
//! - Expose classification and snapshot queries over the owned repository.
//! - Reload tables and export snapshots through the CSV store.
//!
//! # Invariants
//! - Every mutation validates input before touching the repository, so a
//!   failed call leaves all tables unchanged.
//! - Existing log entries are never modified or removed.
//! - Dismissing a reminder that is already past at `now` appends nothing.

use crate::model::reminder::{
    ActiveReminder, EntryId, FutureReminder, PastReminder, ReminderId, SnapshotRecord,
};
use crate::model::time::{parse_timestamp, Timestamp, TimestampParseError};
use crate::repo::csv_store::{load_tables, write_snapshot, TablePaths};
use crate::repo::reminder_repo::{RepoError, ReminderRepository};
use crate::service::classifier::{active_reminders, future_reminders, past_reminders};
use crate::service::snapshot::build_snapshot;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type ServiceResult<T> = Result<T, ReminderServiceError>;

/// Service error for reminder use-cases.
#[derive(Debug)]
pub enum ReminderServiceError {
    /// Timestamp text could not be parsed.
    InvalidTimestamp(String),
    /// Reminder id is absent from the catalog.
    NotFound(ReminderId),
    /// Displayed menu index is outside its list.
    InvalidIndex(i64),
    /// Load, export or id allocation failure.
    Repo(RepoError),
}

impl Display for ReminderServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimestamp(value) => write!(f, "invalid timestamp `{value}`"),
            Self::NotFound(id) => write!(f, "reminder not found: {id}"),
            Self::InvalidIndex(index) => write!(f, "{index} is not a valid item from the menu."),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReminderServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ReminderServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<TimestampParseError> for ReminderServiceError {
    fn from(value: TimestampParseError) -> Self {
        Self::InvalidTimestamp(value.0)
    }
}

/// Result of a dismiss request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissOutcome {
    /// A dismissal entry was appended.
    Dismissed(EntryId),
    /// Reminder was already past at the given instant; nothing appended.
    AlreadyPast,
}

/// Use-case facade owning one reminder repository.
pub struct ReminderService<R: ReminderRepository> {
    repo: R,
}

impl<R: ReminderRepository> ReminderService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Consumes the service and returns its repository.
    pub fn into_repo(self) -> R {
        self.repo
    }

    /// Replaces all tables with the content of the given files.
    ///
    /// Tables are swapped only after every file decodes successfully.
    pub fn reload(&mut self, paths: &TablePaths) -> ServiceResult<()> {
        let tables = load_tables(paths)?;
        self.repo.replace_tables(tables);
        Ok(())
    }

    pub fn active_reminders(&self, now: Timestamp) -> Vec<ActiveReminder> {
        active_reminders(&self.repo, now)
    }

    pub fn past_reminders(&self, now: Timestamp) -> Vec<PastReminder> {
        past_reminders(&self.repo, now)
    }

    pub fn future_reminders(&self, now: Timestamp) -> Vec<FutureReminder> {
        future_reminders(&self.repo, now)
    }

    /// Creates a reminder from timestamp text.
    ///
    /// # Errors
    /// - `InvalidTimestamp` when `active_from` cannot be parsed; nothing is
    ///   appended in that case.
    pub fn create_reminder(
        &mut self,
        text: impl Into<String>,
        active_from: &str,
    ) -> ServiceResult<ReminderId> {
        let active_from = parse_timestamp(active_from)?;
        self.schedule_reminder(text, active_from)
    }

    /// Appends a catalog row and its first activation entry.
    ///
    /// # Errors
    /// - `Repo(IdSpaceExhausted)` when either table has no id left; nothing
    ///   is appended in that case.
    pub fn schedule_reminder(
        &mut self,
        text: impl Into<String>,
        active_from: Timestamp,
    ) -> ServiceResult<ReminderId> {
        self.repo.next_activation_id()?;
        let reminder_id = self.repo.insert_reminder(text.into())?;
        let entry_id = self.repo.append_activation(reminder_id, active_from)?;
        info!(
            "event=reminder_create module=service status=ok reminder_id={} activation_entry_id={}",
            reminder_id, entry_id
        );
        Ok(reminder_id)
    }

    /// Dismisses a reminder at `now`.
    ///
    /// # Contract
    /// - Unknown ids return `NotFound`.
    /// - Reminders already past at `now` return `DismissOutcome::AlreadyPast`
    ///   without appending.
    /// - Otherwise exactly one dismissal entry stamped `now` is appended.
    pub fn dismiss(
        &mut self,
        reminder_id: ReminderId,
        now: Timestamp,
    ) -> ServiceResult<DismissOutcome> {
        if !self.repo.contains_reminder(reminder_id) {
            return Err(ReminderServiceError::NotFound(reminder_id));
        }

        let already_past = past_reminders(&self.repo, now)
            .iter()
            .any(|reminder| reminder.reminder_id == reminder_id);
        if already_past {
            debug!(
                "event=reminder_dismiss module=service status=noop reminder_id={}",
                reminder_id
            );
            return Ok(DismissOutcome::AlreadyPast);
        }

        let entry_id = self.repo.append_dismissal(reminder_id, now)?;
        info!(
            "event=reminder_dismiss module=service status=ok reminder_id={} dismissal_entry_id={}",
            reminder_id, entry_id
        );
        Ok(DismissOutcome::Dismissed(entry_id))
    }

    /// Renews a reminder from timestamp text.
    ///
    /// # Errors
    /// - `InvalidTimestamp` when `active_from` cannot be parsed.
    /// - `NotFound` when the reminder id is not in the catalog.
    pub fn renew(&mut self, reminder_id: ReminderId, active_from: &str) -> ServiceResult<EntryId> {
        let active_from = parse_timestamp(active_from)?;
        self.renew_at(reminder_id, active_from)
    }

    /// Appends a new activation entry; the dismissal log is left untouched.
    pub fn renew_at(
        &mut self,
        reminder_id: ReminderId,
        active_from: Timestamp,
    ) -> ServiceResult<EntryId> {
        if !self.repo.contains_reminder(reminder_id) {
            return Err(ReminderServiceError::NotFound(reminder_id));
        }

        let entry_id = self.repo.append_activation(reminder_id, active_from)?;
        info!(
            "event=reminder_renew module=service status=ok reminder_id={} activation_entry_id={}",
            reminder_id, entry_id
        );
        Ok(entry_id)
    }

    /// Builds the flattened snapshot at `now` without mutating state.
    pub fn snapshot(&self, now: Timestamp) -> Vec<SnapshotRecord> {
        build_snapshot(&self.repo, now)
    }

    /// Builds the snapshot at `now` and writes it to `path`.
    pub fn export_snapshot(&self, path: impl AsRef<Path>, now: Timestamp) -> ServiceResult<usize> {
        let records = self.snapshot(now);
        write_snapshot(path, &records)?;
        Ok(records.len())
    }
}

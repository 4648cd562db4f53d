//! Reminder catalog and event-log entities.
//!
//! # Responsibility
//! - Define the three stored tables: catalog, activation log, dismissal log.
//! - Define the derived per-instant views produced by classification.
//!
//! # Invariants
//! - `Reminder::id` is unique and never reused; reminders are never deleted.
//! - Log entries are immutable once appended.
//! - Activation and dismissal `entry_id`s live in independent id spaces.

use crate::model::time::Timestamp;

/// Stable identifier of a catalog reminder.
pub type ReminderId = i64;

/// Identifier of one activation or dismissal log entry.
pub type EntryId = i64;

/// Catalog row: static text per reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: ReminderId,
    pub text: String,
}

/// Records that a reminder became (or becomes) active from `active_from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationEntry {
    pub entry_id: EntryId,
    pub reminder_id: ReminderId,
    pub active_from: Timestamp,
}

/// Records that a reminder was dismissed at `dismissed_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissalEntry {
    pub entry_id: EntryId,
    pub reminder_id: ReminderId,
    pub dismissed_at: Timestamp,
}

/// Full in-memory state: one catalog plus two append-only logs.
///
/// Produced by loaders and consumed wholesale by repositories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderTables {
    pub reminders: Vec<Reminder>,
    pub activations: Vec<ActivationEntry>,
    pub dismissals: Vec<DismissalEntry>,
}

/// Reminder whose latest qualifying activation beats its latest dismissal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveReminder {
    pub reminder_id: ReminderId,
    pub reminder_text: String,
    /// Latest activation at or before the query instant.
    pub active_from: Timestamp,
}

/// Reminder with at least one dismissal at or before the query instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastReminder {
    pub reminder_id: ReminderId,
    pub reminder_text: String,
    /// `None` when no activation precedes the query instant.
    pub active_from: Option<Timestamp>,
    pub dismissed_at: Timestamp,
}

/// Reminder with an activation scheduled strictly after the query instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FutureReminder {
    pub reminder_id: ReminderId,
    pub reminder_text: String,
    /// Soonest future activation.
    pub active_from: Timestamp,
    /// Latest dismissal (from the whole log) that falls after `active_from`.
    pub dismissed_at: Option<Timestamp>,
}

/// One flattened row of a snapshot export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRecord {
    pub reminder_id: ReminderId,
    pub reminder_text: String,
    pub active_from: Option<Timestamp>,
    pub dismissed_at: Option<Timestamp>,
}

impl From<PastReminder> for SnapshotRecord {
    fn from(value: PastReminder) -> Self {
        Self {
            reminder_id: value.reminder_id,
            reminder_text: value.reminder_text,
            active_from: value.active_from,
            dismissed_at: Some(value.dismissed_at),
        }
    }
}

impl From<ActiveReminder> for SnapshotRecord {
    /// Active reminders are not dismissed as of the snapshot instant.
    fn from(value: ActiveReminder) -> Self {
        Self {
            reminder_id: value.reminder_id,
            reminder_text: value.reminder_text,
            active_from: Some(value.active_from),
            dismissed_at: None,
        }
    }
}

impl From<FutureReminder> for SnapshotRecord {
    fn from(value: FutureReminder) -> Self {
        Self {
            reminder_id: value.reminder_id,
            reminder_text: value.reminder_text,
            active_from: Some(value.active_from),
            dismissed_at: value.dismissed_at,
        }
    }
}

/// Returns `max(id) + 1`, or `0` for an empty id space.
///
/// `None` when the largest id is already `i64::MAX`.
pub fn next_id(ids: impl IntoIterator<Item = i64>) -> Option<i64> {
    match ids.into_iter().max() {
        Some(max) => max.checked_add(1),
        None => Some(0),
    }
}

#[cfg(test)]
mod tests {
    use super::next_id;

    #[test]
    fn next_id_starts_at_zero() {
        assert_eq!(next_id(Vec::<i64>::new()), Some(0));
    }

    #[test]
    fn next_id_follows_max_not_length() {
        assert_eq!(next_id([0, 7, 3]), Some(8));
    }

    #[test]
    fn next_id_refuses_to_wrap() {
        assert_eq!(next_id([3, i64::MAX]), None);
        assert_eq!(next_id([i64::MIN]), Some(i64::MIN + 1));
    }
}

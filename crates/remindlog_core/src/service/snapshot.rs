//! Snapshot record building.
//!
//! # Invariants
//! - Groups are appended past, active, future before sorting.
//! - Future reminders already present in the active group are skipped.
//! - Sorting by `active_from` is stable, so ties keep group order.

use crate::model::reminder::SnapshotRecord;
use crate::model::time::Timestamp;
use crate::repo::reminder_repo::ReminderRepository;
use crate::service::classifier::{active_reminders, future_reminders, past_reminders};
use std::collections::HashSet;

/// Builds the flattened, sorted view of every classified reminder at `now`.
pub fn build_snapshot<R: ReminderRepository + ?Sized>(
    repo: &R,
    now: Timestamp,
) -> Vec<SnapshotRecord> {
    let past = past_reminders(repo, now);
    let active = active_reminders(repo, now);
    let future = future_reminders(repo, now);

    let active_ids: HashSet<_> = active.iter().map(|reminder| reminder.reminder_id).collect();

    let mut records: Vec<SnapshotRecord> = Vec::with_capacity(past.len() + active.len());
    records.extend(past.into_iter().map(SnapshotRecord::from));
    records.extend(active.into_iter().map(SnapshotRecord::from));
    records.extend(
        future
            .into_iter()
            .filter(|reminder| !active_ids.contains(&reminder.reminder_id))
            .map(SnapshotRecord::from),
    );

    records.sort_by_key(|record| record.active_from);
    records
}

//! Reminder classification by event-log replay.
//!
//! # Responsibility
//! - Derive active, past and future views for one reference instant.
//! - Keep derivation a pure function of repository state and `now`.
//!
//! # Invariants
//! - Output follows catalog order.
//! - "Latest" picks the maximum timestamp; among equal timestamps the
//!   last-appended entry wins.
//! - Active requires the latest activation to be strictly after the latest
//!   dismissal; equal instants classify as not active.
//! - Future dismissal lookup scans the whole dismissal log, not just entries
//!   at or before `now`.

use crate::model::reminder::{
    ActiveReminder, ActivationEntry, DismissalEntry, FutureReminder, PastReminder, ReminderId,
};
use crate::model::time::{Timestamp, EPOCH_SENTINEL};
use crate::repo::reminder_repo::ReminderRepository;
use std::collections::HashMap;

/// Per-reminder slice of both logs, in append order.
#[derive(Debug, Default)]
struct History<'a> {
    activations: Vec<&'a ActivationEntry>,
    dismissals: Vec<&'a DismissalEntry>,
}

impl History<'_> {
    fn latest_activation_until(&self, now: Timestamp) -> Option<Timestamp> {
        self.activations
            .iter()
            .filter(|entry| entry.active_from <= now)
            .max_by_key(|entry| entry.active_from)
            .map(|entry| entry.active_from)
    }

    fn latest_dismissal_until(&self, now: Timestamp) -> Option<Timestamp> {
        self.dismissals
            .iter()
            .filter(|entry| entry.dismissed_at <= now)
            .max_by_key(|entry| entry.dismissed_at)
            .map(|entry| entry.dismissed_at)
    }

    fn soonest_activation_after(&self, now: Timestamp) -> Option<Timestamp> {
        self.activations
            .iter()
            .filter(|entry| entry.active_from > now)
            .min_by_key(|entry| entry.active_from)
            .map(|entry| entry.active_from)
    }

    fn latest_dismissal(&self) -> Option<Timestamp> {
        self.dismissals
            .iter()
            .max_by_key(|entry| entry.dismissed_at)
            .map(|entry| entry.dismissed_at)
    }
}

fn index_histories<R: ReminderRepository + ?Sized>(repo: &R) -> HashMap<ReminderId, History<'_>> {
    let mut histories: HashMap<ReminderId, History<'_>> = HashMap::new();
    for entry in repo.activations() {
        histories
            .entry(entry.reminder_id)
            .or_default()
            .activations
            .push(entry);
    }
    for entry in repo.dismissals() {
        histories
            .entry(entry.reminder_id)
            .or_default()
            .dismissals
            .push(entry);
    }
    histories
}

/// Returns reminders active at `now`.
///
/// A reminder is active when it has an activation at or before `now` and
/// either no dismissal at or before `now`, or its latest such activation is
/// strictly later than its latest such dismissal.
pub fn active_reminders<R: ReminderRepository + ?Sized>(
    repo: &R,
    now: Timestamp,
) -> Vec<ActiveReminder> {
    let histories = index_histories(repo);
    let mut active = Vec::new();

    for reminder in repo.reminders() {
        let Some(history) = histories.get(&reminder.id) else {
            continue;
        };
        let Some(active_from) = history.latest_activation_until(now) else {
            continue;
        };
        let still_active = match history.latest_dismissal_until(now) {
            Some(dismissed_at) => active_from > dismissed_at,
            None => true,
        };
        if still_active {
            active.push(ActiveReminder {
                reminder_id: reminder.id,
                reminder_text: reminder.text.clone(),
                active_from,
            });
        }
    }

    active
}

/// Returns reminders with a dismissal at or before `now`.
///
/// `active_from` carries the latest activation at or before `now`, which can
/// be absent when the dismissal predates every activation.
pub fn past_reminders<R: ReminderRepository + ?Sized>(
    repo: &R,
    now: Timestamp,
) -> Vec<PastReminder> {
    let histories = index_histories(repo);
    let mut past = Vec::new();

    for reminder in repo.reminders() {
        let Some(history) = histories.get(&reminder.id) else {
            continue;
        };
        let Some(dismissed_at) = history.latest_dismissal_until(now) else {
            continue;
        };
        // Entries stamped with the sentinel mean "never dismissed" in legacy data.
        if dismissed_at <= EPOCH_SENTINEL {
            continue;
        }
        past.push(PastReminder {
            reminder_id: reminder.id,
            reminder_text: reminder.text.clone(),
            active_from: history.latest_activation_until(now),
            dismissed_at,
        });
    }

    past
}

/// Returns reminders with an activation scheduled strictly after `now`.
///
/// `active_from` is the soonest future activation. `dismissed_at` is the
/// latest dismissal in the whole log when that dismissal falls after
/// `active_from`, otherwise `None`.
pub fn future_reminders<R: ReminderRepository + ?Sized>(
    repo: &R,
    now: Timestamp,
) -> Vec<FutureReminder> {
    let histories = index_histories(repo);
    let mut future = Vec::new();

    for reminder in repo.reminders() {
        let Some(history) = histories.get(&reminder.id) else {
            continue;
        };
        let Some(active_from) = history.soonest_activation_after(now) else {
            continue;
        };
        let dismissed_at = history
            .latest_dismissal()
            .filter(|dismissed_at| *dismissed_at > active_from);
        future.push(FutureReminder {
            reminder_id: reminder.id,
            reminder_text: reminder.text.clone(),
            active_from,
            dismissed_at,
        });
    }

    future
}

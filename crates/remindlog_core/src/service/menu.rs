//! Displayed-index resolution for the interactive menu.
//!
//! # Responsibility
//! - Capture the three lists shown to the user at one instant.
//! - Map signed menu numbers back to reminder ids.
//!
//! # Invariants
//! - Active items are numbered `1..=active.len()`.
//! - Future items continue that counter from `active.len() + 1`.
//! - Past items are numbered `-1, -2, ...`.
//! - `0` never addresses an item.

use crate::model::reminder::{ActiveReminder, FutureReminder, PastReminder, ReminderId};
use crate::model::time::Timestamp;
use crate::repo::reminder_repo::ReminderRepository;
use crate::service::reminder_service::{ReminderService, ReminderServiceError, ServiceResult};

/// Lists as displayed to the user, frozen at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderMenu {
    pub active: Vec<ActiveReminder>,
    pub future: Vec<FutureReminder>,
    pub past: Vec<PastReminder>,
}

impl ReminderMenu {
    /// Classifies every reminder at `now` and freezes the result.
    pub fn build<R: ReminderRepository>(service: &ReminderService<R>, now: Timestamp) -> Self {
        Self {
            active: service.active_reminders(now),
            future: service.future_reminders(now),
            past: service.past_reminders(now),
        }
    }

    /// First menu number used by the future list.
    pub fn future_start_index(&self) -> i64 {
        self.active.len() as i64 + 1
    }

    /// Resolves a `dismiss N` target; only active items can be dismissed.
    pub fn dismiss_target(&self, index: i64) -> ServiceResult<ReminderId> {
        if index < 1 {
            return Err(ReminderServiceError::InvalidIndex(index));
        }
        self.active
            .get((index - 1) as usize)
            .map(|reminder| reminder.reminder_id)
            .ok_or(ReminderServiceError::InvalidIndex(index))
    }

    /// Resolves a `renew N` target across past, active and future lists.
    pub fn renew_target(&self, index: i64) -> ServiceResult<ReminderId> {
        let invalid = ReminderServiceError::InvalidIndex(index);
        if index < 0 {
            let offset = index.unsigned_abs() as usize - 1;
            return self
                .past
                .get(offset)
                .map(|reminder| reminder.reminder_id)
                .ok_or(invalid);
        }
        if index == 0 {
            return Err(invalid);
        }

        let offset = (index - 1) as usize;
        if let Some(reminder) = self.active.get(offset) {
            return Ok(reminder.reminder_id);
        }
        self.future
            .get(offset - self.active.len())
            .map(|reminder| reminder.reminder_id)
            .ok_or(invalid)
    }
}

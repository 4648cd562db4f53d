//! Core domain logic for remindlog.
//! Reminder state is derived by replaying activation and dismissal logs.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::reminder::{
    ActivationEntry, ActiveReminder, DismissalEntry, EntryId, FutureReminder, PastReminder,
    Reminder, ReminderId, ReminderTables, SnapshotRecord,
};
pub use model::time::{
    format_optional_timestamp, format_timestamp, parse_timestamp, Clock, Timestamp,
    TimestampParseError, EPOCH_SENTINEL,
};
pub use repo::csv_store::{load_tables, write_snapshot, write_snapshot_to, TablePaths};
pub use repo::reminder_repo::{MemoryReminderRepository, RepoError, RepoResult, ReminderRepository};
pub use service::classifier::{active_reminders, future_reminders, past_reminders};
pub use service::menu::ReminderMenu;
pub use service::reminder_service::{
    DismissOutcome, ReminderService, ReminderServiceError, ServiceResult,
};
pub use service::snapshot::build_snapshot;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

use remindlog_core::{
    load_tables, parse_timestamp, MemoryReminderRepository, RepoError, ReminderRepository,
    ReminderService, ReminderServiceError, TablePaths, Timestamp,
};
use std::path::Path;

fn ts(value: &str) -> Timestamp {
    parse_timestamp(value).unwrap()
}

fn write_tables(dir: &Path, reminders: &str, active: &str, dismissed: &str) -> TablePaths {
    let paths = TablePaths {
        reminders: dir.join("reminders.csv"),
        activations: dir.join("active.csv"),
        dismissals: dir.join("dismissed.csv"),
    };
    std::fs::write(&paths.reminders, reminders).unwrap();
    std::fs::write(&paths.activations, active).unwrap();
    std::fs::write(&paths.dismissals, dismissed).unwrap();
    paths
}

fn sample_tables(dir: &Path) -> TablePaths {
    write_tables(
        dir,
        "reminder_id,reminder_text\n0,Buy groceries\n1,\"Call Sam, re: trip\"\n2,Book flights\n",
        "entry_id,reminder_id,active_from\n\
         0,0,2025-04-01 09:00:00\n\
         1,1,2025-04-02T08:00:00\n\
         2,2,2025-04-10 12:00:00\n",
        "entry_id,reminder_id,dismissed_at\n0,1,2025-04-05 18:30:00\n",
    )
}

#[test]
fn load_decodes_all_three_tables() {
    let dir = tempfile::tempdir().unwrap();
    let tables = load_tables(&sample_tables(dir.path())).unwrap();

    assert_eq!(tables.reminders.len(), 3);
    assert_eq!(tables.reminders[1].text, "Call Sam, re: trip");
    assert_eq!(tables.activations[1].active_from, ts("2025-04-02 08:00:00"));
    assert_eq!(tables.dismissals[0].reminder_id, 1);
    assert_eq!(tables.dismissals[0].dismissed_at, ts("2025-04-05 18:30:00"));
}

#[test]
fn reload_replaces_state_and_classifies_loaded_history() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = ReminderService::new(MemoryReminderRepository::new());
    service.schedule_reminder("discarded on reload", ts("2025-01-01")).unwrap();

    service.reload(&sample_tables(dir.path())).unwrap();

    let now = ts("2025-04-07 10:00:00");
    assert_eq!(service.repo().reminders().len(), 3);
    let active = service.active_reminders(now);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].reminder_text, "Buy groceries");
    assert_eq!(service.past_reminders(now)[0].reminder_id, 1);
    assert_eq!(service.future_reminders(now)[0].reminder_id, 2);
}

#[test]
fn malformed_row_fails_whole_load_and_keeps_previous_state() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_tables(
        dir.path(),
        "reminder_id,reminder_text\n0,ok\n",
        "entry_id,reminder_id,active_from\n0,0,2025-04-01\n",
        "entry_id,reminder_id,dismissed_at\nx,0,2025-04-02\n",
    );
    let mut service = ReminderService::new(MemoryReminderRepository::new());
    service.schedule_reminder("kept", ts("2025-01-01")).unwrap();

    let err = service.reload(&paths).unwrap_err();
    match err {
        ReminderServiceError::Repo(RepoError::MalformedInput {
            table, line, field, ..
        }) => {
            assert_eq!(table, "dismissals");
            assert_eq!(line, 2);
            assert_eq!(field, "entry_id");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(service.repo().reminders().len(), 1);
    assert_eq!(service.repo().reminders()[0].text, "kept");
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let paths = TablePaths {
        reminders: dir.path().join("absent.csv"),
        ..TablePaths::default()
    };
    assert!(matches!(load_tables(&paths), Err(RepoError::Io(_))));
}

#[test]
fn header_only_tables_load_empty() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_tables(
        dir.path(),
        "reminder_id,reminder_text\n",
        "entry_id,reminder_id,active_from\n",
        "entry_id,reminder_id,dismissed_at\n",
    );
    let tables = load_tables(&paths).unwrap();
    assert!(tables.reminders.is_empty());
    assert!(tables.activations.is_empty());
    assert!(tables.dismissals.is_empty());
}

#[test]
fn demo_tables_replay_at_pinned_instant() {
    let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
    let paths = TablePaths {
        reminders: demos.join("test_data.csv"),
        activations: demos.join("test_active.csv"),
        dismissals: demos.join("test_dismissed.csv"),
    };
    let mut service = ReminderService::new(MemoryReminderRepository::new());
    service.reload(&paths).unwrap();
    let now = ts("2025-04-07 10:00:00");

    let active: Vec<_> = service
        .active_reminders(now)
        .into_iter()
        .map(|reminder| reminder.reminder_id)
        .collect();
    let past: Vec<_> = service
        .past_reminders(now)
        .into_iter()
        .map(|reminder| reminder.reminder_id)
        .collect();
    let future: Vec<_> = service
        .future_reminders(now)
        .into_iter()
        .map(|reminder| reminder.reminder_id)
        .collect();

    // Reminder 3 was renewed after its dismissal: active again, still past.
    assert_eq!(active, vec![0, 3]);
    assert_eq!(past, vec![1, 3]);
    assert_eq!(future, vec![2]);
}

#[test]
fn non_utf8_row_is_malformed_and_keeps_previous_state() {
    let dir = tempfile::tempdir().unwrap();
    let paths = sample_tables(dir.path());
    std::fs::write(
        &paths.reminders,
        b"reminder_id,reminder_text\n0,ok\n1,caf\xe9\n".as_slice(),
    )
    .unwrap();
    let mut service = ReminderService::new(MemoryReminderRepository::new());
    service.schedule_reminder("kept", ts("2025-01-01")).unwrap();

    let err = service.reload(&paths).unwrap_err();
    match err {
        ReminderServiceError::Repo(RepoError::MalformedInput {
            table,
            line,
            field,
            value,
        }) => {
            assert_eq!(table, "reminders");
            assert_eq!(line, 3);
            assert_eq!(field, "reminder_text");
            assert_eq!(value, "caf\u{fffd}");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(service.repo().reminders()[0].text, "kept");
}

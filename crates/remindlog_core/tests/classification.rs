use remindlog_core::{
    parse_timestamp, MemoryReminderRepository, ReminderRepository, ReminderService, Timestamp,
};

fn ts(value: &str) -> Timestamp {
    parse_timestamp(value).unwrap()
}

fn service() -> ReminderService<MemoryReminderRepository> {
    ReminderService::new(MemoryReminderRepository::new())
}

#[test]
fn reminder_without_qualifying_activation_is_neither_active_nor_past() {
    let mut service = service();
    let id = service.schedule_reminder("dentist", ts("2025-04-10 09:00:00")).unwrap();
    let now = ts("2025-04-07 10:00:00");

    assert!(service.active_reminders(now).is_empty());
    assert!(service.past_reminders(now).is_empty());
    let future = service.future_reminders(now);
    assert_eq!(future.len(), 1);
    assert_eq!(future[0].reminder_id, id);
}

#[test]
fn created_reminder_is_active_from_its_own_instant() {
    let mut service = service();
    let active_from = ts("2025-04-07 10:00:00");
    let id = service
        .create_reminder("stretch", "2025-04-07 10:00:00")
        .unwrap();

    let active = service.active_reminders(active_from);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].reminder_id, id);
    assert_eq!(active[0].reminder_text, "stretch");
    assert_eq!(active[0].active_from, active_from);
}

#[test]
fn dismiss_moves_reminder_from_active_to_past() {
    let mut service = service();
    let id = service.schedule_reminder("pay rent", ts("2025-04-01")).unwrap();
    let now = ts("2025-04-07 10:00:00");

    service.dismiss(id, now).unwrap();

    assert!(service
        .active_reminders(now)
        .iter()
        .all(|reminder| reminder.reminder_id != id));
    let past = service.past_reminders(now);
    assert_eq!(past.len(), 1);
    assert_eq!(past[0].reminder_id, id);
    assert_eq!(past[0].dismissed_at, now);
    assert_eq!(past[0].active_from, Some(ts("2025-04-01")));
}

#[test]
fn renew_after_dismissal_reactivates_from_renewal_instant() {
    let mut service = service();
    let id = service.schedule_reminder("backup laptop", ts("2025-04-01")).unwrap();
    let dismissed_at = ts("2025-04-03");
    let renewed_at = ts("2025-04-05");
    service.dismiss(id, dismissed_at).unwrap();
    service.renew(id, "2025-04-05").unwrap();

    assert!(service.active_reminders(ts("2025-04-04")).is_empty());
    for now in [renewed_at, ts("2025-04-06"), ts("2026-01-01")] {
        let active = service.active_reminders(now);
        assert_eq!(active.len(), 1, "expected active at {now}");
        assert_eq!(active[0].active_from, renewed_at);
    }
    // Renewal never touches the dismissal log, so the reminder also stays past.
    assert_eq!(service.repo().dismissals().len(), 1);
    assert_eq!(service.past_reminders(renewed_at).len(), 1);
}

#[test]
fn dismissal_after_now_is_ignored_for_active_and_past() {
    let mut service = service();
    let id = service.schedule_reminder("call bank", ts("2025-04-01")).unwrap();
    service.dismiss(id, ts("2025-04-09")).unwrap();

    let now = ts("2025-04-07");
    assert_eq!(service.active_reminders(now).len(), 1);
    assert!(service.past_reminders(now).is_empty());
}

#[test]
fn views_follow_catalog_order() {
    let mut service = service();
    let first = service.schedule_reminder("first", ts("2025-04-05")).unwrap();
    let second = service.schedule_reminder("second", ts("2025-04-01")).unwrap();
    let third = service.schedule_reminder("third", ts("2025-04-03")).unwrap();

    let ids: Vec<_> = service
        .active_reminders(ts("2025-04-07"))
        .into_iter()
        .map(|reminder| reminder.reminder_id)
        .collect();
    assert_eq!(ids, vec![first, second, third]);
}

#[test]
fn queries_are_repeatable_for_the_same_state() {
    let mut service = service();
    let a = service.schedule_reminder("a", ts("2025-04-01")).unwrap();
    service.schedule_reminder("b", ts("2025-04-10")).unwrap();
    service.dismiss(a, ts("2025-04-02")).unwrap();
    let now = ts("2025-04-07");

    assert_eq!(service.active_reminders(now), service.active_reminders(now));
    assert_eq!(service.past_reminders(now), service.past_reminders(now));
    assert_eq!(service.future_reminders(now), service.future_reminders(now));
    assert_eq!(service.snapshot(now), service.snapshot(now));
}

#[test]
fn past_reminder_without_prior_activation_has_no_active_from() {
    let mut repo = MemoryReminderRepository::new();
    let id = repo.insert_reminder("odd history".to_string()).unwrap();
    repo.append_dismissal(id, ts("2025-04-02")).unwrap();
    repo.append_activation(id, ts("2025-04-10")).unwrap();
    let service = ReminderService::new(repo);

    let past = service.past_reminders(ts("2025-04-07"));
    assert_eq!(past.len(), 1);
    assert_eq!(past[0].active_from, None);
}

//! Unit tests for ItemLifecycle: batch creation, toggling and confirmed deletion.

use std::cell::Cell;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use planner::database::Database;
use planner::managers::item_lifecycle::{ItemLifecycle, MutationKind, DELETE_PROMPT};
use planner::managers::record_store::{RecordStore, RecordStoreTrait};
use planner::types::errors::LifecycleError;
use planner::types::section::{ActiveView, Section};

const FADE: Duration = Duration::from_millis(300);

fn setup() -> Database {
    Database::open_in_memory().expect("Failed to open in-memory database")
}

#[test]
fn test_save_two_lines_creates_two_pending_records() {
    let db = setup();
    let mut lifecycle = ItemLifecycle::new(db.connection(), FADE);

    let outcome = lifecycle
        .create_batch("a.com\nb.com", "x", ActiveView::Section(Section::Videos))
        .unwrap();

    assert_eq!(outcome.kind, MutationKind::Created);
    assert_eq!(outcome.ids.len(), 2);
    assert!(outcome.needs_reload());

    let records = RecordStore::new(db.connection())
        .get_all_by_section(Section::Videos)
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].url, "a.com");
    assert_eq!(records[1].url, "b.com");
    for record in &records {
        assert!(!record.completed);
        assert_eq!(record.tag, "x");
        assert_eq!(record.section, Section::Videos);
    }
}

#[test]
fn test_batch_shares_one_timestamp() {
    let db = setup();
    let mut lifecycle = ItemLifecycle::new(db.connection(), FADE);
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap();

    lifecycle
        .create_batch_at("a\nb\nc", "t", ActiveView::Section(Section::Labs), now)
        .unwrap();

    let records = RecordStore::new(db.connection()).get_all().unwrap();
    assert!(records.iter().all(|r| r.date == now));
}

#[test]
fn test_lines_are_trimmed_and_blank_lines_skipped() {
    let db = setup();
    let mut lifecycle = ItemLifecycle::new(db.connection(), FADE);

    let outcome = lifecycle
        .create_batch("  a.com  \n\n   \nb.com\n", "  tag  ", ActiveView::Section(Section::Writeups))
        .unwrap();
    assert_eq!(outcome.ids.len(), 2);

    let records = RecordStore::new(db.connection()).get_all().unwrap();
    assert_eq!(records[0].url, "a.com");
    assert_eq!(records[0].tag, "tag");
}

#[test]
fn test_empty_url_input_is_rejected() {
    let db = setup();
    let mut lifecycle = ItemLifecycle::new(db.connection(), FADE);

    let err = lifecycle
        .create_batch(" \n\n", "x", ActiveView::Section(Section::Videos))
        .unwrap_err();
    assert!(matches!(err, LifecycleError::NoUrls));
    assert_eq!(RecordStore::new(db.connection()).count().unwrap(), 0);
}

#[test]
fn test_empty_tag_is_rejected() {
    let db = setup();
    let mut lifecycle = ItemLifecycle::new(db.connection(), FADE);

    let err = lifecycle
        .create_batch("a.com", "   ", ActiveView::Section(Section::Videos))
        .unwrap_err();
    assert!(matches!(err, LifecycleError::EmptyTag));
    assert_eq!(RecordStore::new(db.connection()).count().unwrap(), 0);
}

#[test]
fn test_urls_are_checked_before_tag() {
    let db = setup();
    let mut lifecycle = ItemLifecycle::new(db.connection(), FADE);
    let err = lifecycle
        .create_batch("", "", ActiveView::Section(Section::Videos))
        .unwrap_err();
    assert!(matches!(err, LifecycleError::NoUrls));
}

#[test]
fn test_saving_in_charts_view_is_rejected() {
    let db = setup();
    let mut lifecycle = ItemLifecycle::new(db.connection(), FADE);
    let err = lifecycle.create_batch("a.com", "x", ActiveView::Charts).unwrap_err();
    assert!(matches!(err, LifecycleError::NoActiveSection));
}

#[test]
fn test_toggle_reports_new_state_and_fade() {
    let db = setup();
    let mut lifecycle = ItemLifecycle::new(db.connection(), FADE);
    let id = lifecycle
        .create_batch("a.com", "x", ActiveView::Section(Section::Videos))
        .unwrap()
        .ids[0];

    let outcome = lifecycle.toggle_complete(id).unwrap();
    assert_eq!(outcome.kind, MutationKind::Toggled { completed: true });
    assert_eq!(outcome.fade_ms, Some(300));

    let outcome = lifecycle.toggle_complete(id).unwrap();
    assert_eq!(outcome.kind, MutationKind::Toggled { completed: false });
}

#[test]
fn test_toggle_missing_record_surfaces_store_error() {
    let db = setup();
    let mut lifecycle = ItemLifecycle::new(db.connection(), FADE);
    assert!(matches!(
        lifecycle.toggle_complete(77),
        Err(LifecycleError::Store(_))
    ));
}

#[test]
fn test_delete_asks_for_confirmation() {
    let db = setup();
    let mut lifecycle = ItemLifecycle::new(db.connection(), FADE);
    let id = lifecycle
        .create_batch("a.com", "x", ActiveView::Section(Section::Videos))
        .unwrap()
        .ids[0];

    let asked = Cell::new(false);
    let confirm = |prompt: &str| {
        asked.set(true);
        assert_eq!(prompt, DELETE_PROMPT);
        true
    };
    let outcome = lifecycle.delete(id, &confirm).unwrap();

    assert!(asked.get());
    assert_eq!(outcome.kind, MutationKind::Deleted);
    assert_eq!(outcome.fade_ms, Some(300));
    assert!(RecordStore::new(db.connection()).get_by_id(id).unwrap().is_none());
}

#[test]
fn test_declined_delete_is_a_noop() {
    let db = setup();
    let mut lifecycle = ItemLifecycle::new(db.connection(), FADE);
    let id = lifecycle
        .create_batch("a.com", "x", ActiveView::Section(Section::Videos))
        .unwrap()
        .ids[0];

    let outcome = lifecycle.delete(id, &|_: &str| false).unwrap();

    assert_eq!(outcome.kind, MutationKind::Declined);
    assert!(!outcome.needs_reload());
    assert!(RecordStore::new(db.connection()).get_by_id(id).unwrap().is_some());
}

#[test]
fn test_delete_missing_record_is_an_error() {
    let db = setup();
    let mut lifecycle = ItemLifecycle::new(db.connection(), FADE);
    assert!(lifecycle.delete(1, &|_: &str| true).is_err());
}

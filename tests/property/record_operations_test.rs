//! Property-based tests for RecordStore and ItemLifecycle operations.
//!
//! Random sequences of add, toggle and delete are applied to the store and to
//! a plain in-memory model; the two must agree after every step.

use std::time::Duration;

use chrono::{TimeZone, Utc};
use planner::database::Database;
use planner::managers::item_lifecycle::ItemLifecycle;
use planner::managers::record_store::{RecordStore, RecordStoreTrait};
use planner::types::record::NewRecord;
use planner::types::section::{ActiveView, Section};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add { section: Section, completed: bool },
    Toggle(usize),
    Remove(usize),
}

fn arb_section() -> impl Strategy<Value = Section> {
    prop_oneof![
        Just(Section::Writeups),
        Just(Section::HackeroneReports),
        Just(Section::Videos),
        Just(Section::Labs),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (arb_section(), any::<bool>()).prop_map(|(section, completed)| Op::Add { section, completed }),
        2 => any::<usize>().prop_map(Op::Toggle),
        1 => any::<usize>().prop_map(Op::Remove),
    ]
}

fn arb_url() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("https"), Just("http")],
        "[a-z][a-z0-9]{2,15}",
        prop_oneof![Just(".com"), Just(".org"), Just(".io")],
    )
        .prop_map(|(scheme, host, tld)| format!("{}://{}{}", scheme, host, tld))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn store_matches_model(ops in proptest::collection::vec(arb_op(), 1..40)) {
        let db = Database::open_in_memory().expect("Failed to open in-memory database");
        let mut store = RecordStore::new(db.connection());
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        // (id, section, completed) in insertion order
        let mut model: Vec<(i64, Section, bool)> = Vec::new();
        let mut last_id = 0;

        for op in ops {
            match op {
                Op::Add { section, completed } => {
                    let mut record = NewRecord::pending("https://a.com", "t", section, date);
                    record.completed = completed;
                    let id = store.add(&record).unwrap();
                    prop_assert!(id > last_id, "ids must increase and never be reused");
                    last_id = id;
                    model.push((id, section, completed));
                }
                Op::Toggle(i) if !model.is_empty() => {
                    let idx = i % model.len();
                    let now = store.toggle_completed(model[idx].0).unwrap();
                    model[idx].2 = !model[idx].2;
                    prop_assert_eq!(now, model[idx].2);
                }
                Op::Remove(i) if !model.is_empty() => {
                    let idx = i % model.len();
                    store.remove(model[idx].0).unwrap();
                    model.remove(idx);
                }
                _ => {}
            }

            prop_assert_eq!(store.count().unwrap() as usize, model.len());
        }

        for section in Section::ALL {
            let stored: Vec<(i64, bool)> = store
                .get_all_by_section(section)
                .unwrap()
                .into_iter()
                .map(|r| (r.id, r.completed))
                .collect();
            let expected: Vec<(i64, bool)> = model
                .iter()
                .filter(|(_, s, _)| *s == section)
                .map(|(id, _, done)| (*id, *done))
                .collect();
            prop_assert_eq!(stored, expected);
        }
    }

    #[test]
    fn batch_creates_one_pending_record_per_line(
        urls in proptest::collection::vec(arb_url(), 1..10),
        tag in "[a-z]{1,10}",
        section in arb_section(),
    ) {
        let db = Database::open_in_memory().expect("Failed to open in-memory database");
        let mut lifecycle = ItemLifecycle::new(db.connection(), Duration::ZERO);

        let input = urls.join("\n\n");
        let outcome = lifecycle
            .create_batch(&input, &tag, ActiveView::Section(section))
            .unwrap();
        prop_assert_eq!(outcome.ids.len(), urls.len());

        let records = RecordStore::new(db.connection()).get_all_by_section(section).unwrap();
        let stored: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
        let expected: Vec<&str> = urls.iter().map(String::as_str).collect();
        prop_assert_eq!(stored, expected);
        prop_assert!(records.iter().all(|r| !r.completed && r.tag == tag));
    }

    #[test]
    fn toggling_twice_restores_state(section in arb_section()) {
        let db = Database::open_in_memory().expect("Failed to open in-memory database");
        let mut store = RecordStore::new(db.connection());
        let id = store
            .add(&NewRecord::pending("https://a.com", "t", section, Utc::now()))
            .unwrap();
        let before = store.get_by_id(id).unwrap().unwrap();

        store.toggle_completed(id).unwrap();
        store.toggle_completed(id).unwrap();

        prop_assert_eq!(store.get_by_id(id).unwrap().unwrap(), before);
    }
}

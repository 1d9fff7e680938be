//! Unit tests for chart aggregation over the record set.

use chrono::{DateTime, TimeZone, Utc};
use rstest::rstest;

use planner::services::aggregation::{
    chart_data, distribution_summary, is_valid_date_format, percentage, section_summary,
    timeline_summary,
};
use planner::types::record::Record;
use planner::types::section::Section;
use planner::types::settings::TimelineOrder;

fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

fn record(id: i64, section: Section, completed: bool, date: DateTime<Utc>) -> Record {
    Record {
        id,
        url: format!("https://example.com/{}", id),
        tag: "t".to_string(),
        section,
        completed,
        date,
    }
}

#[test]
fn test_section_summary_counts_in_fixed_order() {
    let records = vec![
        record(1, Section::Videos, false, noon(2024, 1, 1)),
        record(2, Section::Videos, true, noon(2024, 1, 1)),
        record(3, Section::Videos, true, noon(2024, 1, 2)),
        record(4, Section::Labs, false, noon(2024, 1, 2)),
    ];

    let summary = section_summary(&records);

    assert_eq!(
        summary.labels(),
        vec!["Writeups", "HackerOne Reports", "Videos", "Labs"]
    );
    assert_eq!(summary.completed_series(), vec![0, 0, 2, 0]);
    assert_eq!(summary.pending_series(), vec![0, 0, 1, 1]);
    assert_eq!(summary.get(Section::Videos).unwrap().total(), 3);
}

#[test]
fn test_empty_store_gives_zero_everywhere() {
    let data = chart_data(&[], &Utc, "%-m/%-d/%Y", TimelineOrder::Chronological);

    assert!(data.completion.sections.iter().all(|c| c.total() == 0));
    assert!(data.timeline.days.is_empty());
    assert_eq!(data.distribution.total, 0);
    assert!(data.distribution.slices.iter().all(|s| s.percentage == 0.0));
}

#[test]
fn test_deleting_the_last_record_zeroes_its_section() {
    let mut records = vec![record(1, Section::Labs, true, noon(2024, 2, 3))];
    assert_eq!(section_summary(&records).completed_series(), vec![0, 0, 0, 1]);

    records.clear();
    let summary = section_summary(&records);
    assert_eq!(summary.completed_series(), vec![0, 0, 0, 0]);
    assert_eq!(summary.pending_series(), vec![0, 0, 0, 0]);
}

#[test]
fn test_timeline_groups_by_day() {
    let records = vec![
        record(1, Section::Videos, false, noon(2024, 3, 5)),
        record(2, Section::Labs, false, noon(2024, 3, 5)),
        record(3, Section::Videos, true, noon(2024, 3, 7)),
    ];

    let timeline = timeline_summary(&records, &Utc, "%-m/%-d/%Y", TimelineOrder::Chronological);

    assert_eq!(timeline.labels(), vec!["3/5/2024", "3/7/2024"]);
    assert_eq!(timeline.counts(), vec![2, 1]);
}

#[test]
fn test_timeline_order_is_configurable() {
    let records = vec![
        record(1, Section::Videos, false, noon(2024, 3, 9)),
        record(2, Section::Videos, false, noon(2024, 3, 1)),
        record(3, Section::Videos, false, noon(2024, 3, 9)),
    ];

    let sorted = timeline_summary(&records, &Utc, "%Y-%m-%d", TimelineOrder::Chronological);
    assert_eq!(sorted.labels(), vec!["2024-03-01", "2024-03-09"]);
    assert_eq!(sorted.counts(), vec![1, 2]);

    let first_seen = timeline_summary(&records, &Utc, "%Y-%m-%d", TimelineOrder::FirstSeen);
    assert_eq!(first_seen.labels(), vec!["2024-03-09", "2024-03-01"]);
    assert_eq!(first_seen.counts(), vec![2, 1]);
}

#[test]
fn test_timeline_falls_back_on_bad_format() {
    let records = vec![record(1, Section::Videos, false, noon(2024, 3, 9))];
    let timeline = timeline_summary(&records, &Utc, "%Q", TimelineOrder::Chronological);
    assert_eq!(timeline.labels(), vec!["2024-03-09"]);
}

#[test]
fn test_timeline_with_time_of_day_format_does_not_panic() {
    let records = vec![
        record(1, Section::Videos, false, noon(2024, 3, 9)),
        record(2, Section::Labs, true, noon(2024, 3, 10)),
    ];

    for format in ["%H:%M", "%z", "%Z"] {
        let data = chart_data(&records, &Utc, format, TimelineOrder::Chronological);
        assert_eq!(data.timeline.labels(), vec!["2024-03-09", "2024-03-10"]);
    }
}

#[rstest]
#[case("%-m/%-d/%Y", true)]
#[case("%Y-%m-%d", true)]
#[case("%d %b %Y", true)]
#[case("%A, %e %B", true)]
#[case("", false)]
#[case("%Q", false)]
#[case("%H:%M", false)]
#[case("%Y %z", false)]
#[case("%Z", false)]
fn test_date_format_validity(#[case] format: &str, #[case] valid: bool) {
    assert_eq!(is_valid_date_format(format), valid);
}

#[test]
fn test_timeline_uses_the_given_timezone() {
    let late = Utc.with_ymd_and_hms(2024, 3, 9, 23, 30, 0).unwrap();
    let records = vec![record(1, Section::Videos, false, late)];
    let east = chrono::FixedOffset::east_opt(2 * 3600).unwrap();

    let timeline = timeline_summary(&records, &east, "%Y-%m-%d", TimelineOrder::Chronological);
    assert_eq!(timeline.labels(), vec!["2024-03-10"]);
}

#[test]
fn test_distribution_labels() {
    let mut records = Vec::new();
    for id in 0..3 {
        records.push(record(id, Section::Videos, false, noon(2024, 1, 1)));
    }
    for id in 3..7 {
        records.push(record(id, Section::Writeups, false, noon(2024, 1, 1)));
    }

    let distribution = distribution_summary(&records);
    assert_eq!(distribution.total, 7);

    let videos = &distribution.slices[2];
    assert_eq!(videos.section, Section::Videos);
    assert_eq!(distribution.slice_label(videos), "Videos: 3 (42.9%)");

    let writeups = &distribution.slices[0];
    assert_eq!(distribution.slice_label(writeups), "Writeups: 4 (57.1%)");
}

#[rstest]
#[case(0, 0, 0.0)]
#[case(0, 5, 0.0)]
#[case(1, 3, 33.3)]
#[case(2, 3, 66.7)]
#[case(3, 7, 42.9)]
#[case(5, 5, 100.0)]
fn test_percentage(#[case] value: u64, #[case] total: u64, #[case] expected: f64) {
    assert_eq!(percentage(value, total), expected);
}

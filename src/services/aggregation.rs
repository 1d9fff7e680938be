//! Aggregation of records into chart-ready summaries.
//!
//! All functions are pure: they take the record set and return counts in the
//! fixed section order, so the chart renderer only has to draw.

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, TimeZone};
use std::collections::HashMap;
use std::fmt::Write as _;

use crate::types::record::Record;
use crate::types::section::Section;
use crate::types::settings::TimelineOrder;
use crate::types::summary::{
    ChartData, DayCount, DistributionSummary, SectionCounts, SectionSummary, Slice,
    TimelineSummary,
};

/// Used when a configured date format cannot be rendered.
pub const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Completed and pending counts for every known section.
pub fn section_summary(records: &[Record]) -> SectionSummary {
    let sections = Section::ALL
        .iter()
        .map(|&section| {
            let (completed, pending) = records
                .iter()
                .filter(|r| r.section == section)
                .fold((0, 0), |(done, open), r| {
                    if r.completed {
                        (done + 1, open)
                    } else {
                        (done, open + 1)
                    }
                });
            SectionCounts {
                section,
                completed,
                pending,
            }
        })
        .collect();
    SectionSummary { sections }
}

/// Records added per calendar day in `tz`, labelled with `date_format`.
pub fn timeline_summary<Tz: TimeZone>(
    records: &[Record],
    tz: &Tz,
    date_format: &str,
    order: TimelineOrder,
) -> TimelineSummary {
    let mut days: Vec<(NaiveDate, u64)> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for record in records {
        let day = record.date.with_timezone(tz).date_naive();
        match index.get(&day) {
            Some(&i) => days[i].1 += 1,
            None => {
                index.insert(day, days.len());
                days.push((day, 1));
            }
        }
    }

    if order == TimelineOrder::Chronological {
        days.sort_by_key(|(day, _)| *day);
    }

    let format = if is_valid_date_format(date_format) {
        date_format
    } else {
        tracing::warn!(date_format, "invalid date format, falling back");
        FALLBACK_DATE_FORMAT
    };

    TimelineSummary {
        days: days
            .into_iter()
            .map(|(day, count)| DayCount {
                label: format_day(day, format),
                count,
            })
            .collect(),
    }
}

/// Share of all records per section.
pub fn distribution_summary(records: &[Record]) -> DistributionSummary {
    let total = records.len() as u64;
    let slices = Section::ALL
        .iter()
        .map(|&section| {
            let count = records.iter().filter(|r| r.section == section).count() as u64;
            Slice {
                section,
                count,
                percentage: percentage(count, total),
            }
        })
        .collect();
    DistributionSummary { slices, total }
}

/// Every summary the chart view needs, computed over the full record set.
pub fn chart_data<Tz: TimeZone>(
    records: &[Record],
    tz: &Tz,
    date_format: &str,
    order: TimelineOrder,
) -> ChartData {
    ChartData {
        completion: section_summary(records),
        timeline: timeline_summary(records, tz, date_format, order),
        distribution: distribution_summary(records),
    }
}

/// `value / total * 100`, rounded to one decimal. Zero when `total` is zero.
pub fn percentage(value: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_one_decimal(value as f64 / total as f64 * 100.0)
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Whether `format` renders a plain calendar date.
///
/// Besides parsing, the format is written out for a sample day: specifiers
/// that need a time of day or an offset (`%H`, `%z`, ...) fail there.
pub fn is_valid_date_format(format: &str) -> bool {
    if format.is_empty() || StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return false;
    }
    let Some(sample) = NaiveDate::from_ymd_opt(2024, 12, 31) else {
        return false;
    };
    let mut out = String::new();
    write!(out, "{}", sample.format(format)).is_ok()
}

/// Label for a timeline day; an unrenderable format falls back to ISO dates.
fn format_day(day: NaiveDate, format: &str) -> String {
    let mut label = String::new();
    if write!(label, "{}", day.format(format)).is_err() {
        label.clear();
        let _ = write!(label, "{}", day.format(FALLBACK_DATE_FORMAT));
    }
    label
}

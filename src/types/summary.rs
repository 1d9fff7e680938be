use serde::{Deserialize, Serialize};

use super::section::Section;

/// Completed and pending counts for one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionCounts {
    pub section: Section,
    pub completed: u64,
    pub pending: u64,
}

impl SectionCounts {
    pub fn total(&self) -> u64 {
        self.completed + self.pending
    }
}

/// Per-section completion status, one entry per known section in fixed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub sections: Vec<SectionCounts>,
}

impl SectionSummary {
    pub fn get(&self, section: Section) -> Option<&SectionCounts> {
        self.sections.iter().find(|c| c.section == section)
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.sections.iter().map(|c| c.section.label()).collect()
    }

    pub fn completed_series(&self) -> Vec<u64> {
        self.sections.iter().map(|c| c.completed).collect()
    }

    pub fn pending_series(&self) -> Vec<u64> {
        self.sections.iter().map(|c| c.pending).collect()
    }
}

/// Number of records created on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    pub label: String,
    pub count: u64,
}

/// Records added per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TimelineSummary {
    pub days: Vec<DayCount>,
}

impl TimelineSummary {
    pub fn labels(&self) -> Vec<&str> {
        self.days.iter().map(|d| d.label.as_str()).collect()
    }

    pub fn counts(&self) -> Vec<u64> {
        self.days.iter().map(|d| d.count).collect()
    }
}

/// One pie slice: a section's share of all records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub section: Section,
    pub count: u64,
    /// Share of the total in percent, rounded to one decimal.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub slices: Vec<Slice>,
    pub total: u64,
}

impl DistributionSummary {
    /// Tooltip text for a slice, e.g. `Videos: 3 (42.9%)`.
    pub fn slice_label(&self, slice: &Slice) -> String {
        format!(
            "{}: {} ({:.1}%)",
            slice.section.label(),
            slice.count,
            slice.percentage
        )
    }
}

/// Everything the chart view draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub completion: SectionSummary,
    pub timeline: TimelineSummary,
    pub distribution: DistributionSummary,
}

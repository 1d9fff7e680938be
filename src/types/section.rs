use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::NavigationError;

/// A fixed category a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Writeups,
    HackeroneReports,
    Videos,
    Labs,
}

impl Section {
    /// All sections in navigation and chart order.
    pub const ALL: [Section; 4] = [
        Section::Writeups,
        Section::HackeroneReports,
        Section::Videos,
        Section::Labs,
    ];

    /// Identifier used in storage, exports and navigation.
    pub fn id(&self) -> &'static str {
        match self {
            Section::Writeups => "writeups",
            Section::HackeroneReports => "hackerone-reports",
            Section::Videos => "videos",
            Section::Labs => "labs",
        }
    }

    /// Human-readable label used for titles and chart categories.
    pub fn label(&self) -> &'static str {
        match self {
            Section::Writeups => "Writeups",
            Section::HackeroneReports => "HackerOne Reports",
            Section::Videos => "Videos",
            Section::Labs => "Labs",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .iter()
            .copied()
            .find(|section| section.id() == s)
            .ok_or_else(|| NavigationError::UnknownSection(s.to_string()))
    }
}

/// Identifier of the chart pseudo-section in the navigation list.
pub const CHARTS_ID: &str = "charts";

/// What the navigation currently shows: a record section or the charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "section", rename_all = "snake_case")]
pub enum ActiveView {
    Section(Section),
    Charts,
}

impl ActiveView {
    pub fn id(&self) -> &'static str {
        match self {
            ActiveView::Section(section) => section.id(),
            ActiveView::Charts => CHARTS_ID,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActiveView::Section(section) => section.label(),
            ActiveView::Charts => "Charts",
        }
    }

    /// The record section, if this view shows one.
    pub fn section(&self) -> Option<Section> {
        match self {
            ActiveView::Section(section) => Some(*section),
            ActiveView::Charts => None,
        }
    }
}

impl FromStr for ActiveView {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == CHARTS_ID {
            return Ok(ActiveView::Charts);
        }
        s.parse().map(ActiveView::Section)
    }
}

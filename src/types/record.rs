use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::section::Section;

/// A tracked URL with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub url: String,
    pub tag: String,
    pub section: Section,
    pub completed: bool,
    #[serde(with = "iso_millis")]
    pub date: DateTime<Utc>,
}

/// A record that has not been stored yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub url: String,
    pub tag: String,
    pub section: Section,
    pub completed: bool,
    pub date: DateTime<Utc>,
}

impl NewRecord {
    /// Builds a pending record stamped with `date`, truncated to milliseconds.
    pub fn pending(url: &str, tag: &str, section: Section, date: DateTime<Utc>) -> Self {
        Self {
            url: url.to_string(),
            tag: tag.to_string(),
            section,
            completed: false,
            date: truncate_to_millis(date),
        }
    }
}

/// Drops sub-millisecond precision so timestamps survive a text round trip.
pub fn truncate_to_millis(date: DateTime<Utc>) -> DateTime<Utc> {
    let millis = date.timestamp_millis();
    DateTime::from_timestamp_millis(millis).unwrap_or(date)
}

/// Formats a timestamp the way it is stored and exported.
pub fn format_timestamp(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a stored or exported timestamp.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|d| d.with_timezone(&Utc))
}

mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_timestamp(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

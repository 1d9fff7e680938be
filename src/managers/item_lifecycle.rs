//! Item lifecycle for Planner.
//!
//! Creates records in batches from pasted text, toggles their completion flag
//! and deletes them behind a confirmation. Every mutation returns a
//! [`MutationOutcome`]; the caller reloads the active view after `fade_ms`.

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Serialize;
use std::time::Duration;

use crate::managers::record_store::{RecordStore, RecordStoreTrait};
use crate::types::errors::LifecycleError;
use crate::types::record::NewRecord;
use crate::types::section::ActiveView;

/// Prompt shown before a record is deleted.
pub const DELETE_PROMPT: &str = "Delete this URL?";

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// What a mutation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MutationKind {
    Created,
    Toggled { completed: bool },
    Deleted,
    /// The user declined the confirmation; nothing changed.
    Declined,
}

/// Result of a lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationOutcome {
    #[serde(flatten)]
    pub kind: MutationKind,
    pub ids: Vec<i64>,
    /// Fade-out time of the affected item before the view reloads.
    pub fade_ms: Option<u64>,
}

impl MutationOutcome {
    /// Whether the active view has to be reloaded.
    pub fn needs_reload(&self) -> bool {
        self.kind != MutationKind::Declined
    }
}

/// Splits pasted input into trimmed, non-empty URL lines.
pub fn parse_url_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Record lifecycle operations against one connection.
pub struct ItemLifecycle<'a> {
    store: RecordStore<'a>,
    fade_delay: Duration,
}

impl<'a> ItemLifecycle<'a> {
    pub fn new(conn: &'a Connection, fade_delay: Duration) -> Self {
        Self {
            store: RecordStore::new(conn),
            fade_delay,
        }
    }

    /// Saves one record per non-empty line of `url_input`, all sharing `tag`
    /// and stamped with the current time.
    pub fn create_batch(
        &mut self,
        url_input: &str,
        tag: &str,
        view: ActiveView,
    ) -> Result<MutationOutcome, LifecycleError> {
        self.create_batch_at(url_input, tag, view, Utc::now())
    }

    /// Same as [`create_batch`](Self::create_batch) with an explicit creation time.
    ///
    /// The URL list is validated before the tag.
    pub fn create_batch_at(
        &mut self,
        url_input: &str,
        tag: &str,
        view: ActiveView,
        now: DateTime<Utc>,
    ) -> Result<MutationOutcome, LifecycleError> {
        let urls = parse_url_lines(url_input);
        if urls.is_empty() {
            tracing::warn!("save rejected: no URLs");
            return Err(LifecycleError::NoUrls);
        }

        let tag = tag.trim();
        if tag.is_empty() {
            tracing::warn!("save rejected: empty tag");
            return Err(LifecycleError::EmptyTag);
        }

        let section = view.section().ok_or(LifecycleError::NoActiveSection)?;

        let records: Vec<NewRecord> = urls
            .iter()
            .map(|url| NewRecord::pending(url, tag, section, now))
            .collect();
        let ids = self.store.add_batch(&records)?;

        Ok(MutationOutcome {
            kind: MutationKind::Created,
            ids,
            fade_ms: None,
        })
    }

    pub fn toggle_complete(&mut self, id: i64) -> Result<MutationOutcome, LifecycleError> {
        let completed = self.store.toggle_completed(id)?;
        Ok(MutationOutcome {
            kind: MutationKind::Toggled { completed },
            ids: vec![id],
            fade_ms: Some(self.fade_millis()),
        })
    }

    /// Deletes `id` once `confirmer` agrees. A declined prompt leaves the store untouched.
    pub fn delete(
        &mut self,
        id: i64,
        confirmer: &dyn Confirm,
    ) -> Result<MutationOutcome, LifecycleError> {
        if !confirmer.confirm(DELETE_PROMPT) {
            tracing::debug!(id, "delete declined");
            return Ok(MutationOutcome {
                kind: MutationKind::Declined,
                ids: vec![id],
                fade_ms: None,
            });
        }

        self.store.remove(id)?;
        Ok(MutationOutcome {
            kind: MutationKind::Deleted,
            ids: vec![id],
            fade_ms: Some(self.fade_millis()),
        })
    }

    fn fade_millis(&self) -> u64 {
        self.fade_delay.as_millis() as u64
    }
}

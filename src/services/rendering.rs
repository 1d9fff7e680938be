//! Rendering of a section's records into display lists.
//!
//! A [`SectionView`] is rebuilt from the store after every mutation. Search
//! and drag reordering only touch the rendered view; a reload discards both.

use chrono::TimeZone;
use serde::Deserialize;

use crate::services::aggregation::{is_valid_date_format, FALLBACK_DATE_FORMAT};
use crate::types::record::Record;
use crate::types::view::{ItemView, ListKind, SectionView};

/// Builds the display item for one record.
pub fn render_item<Tz: TimeZone>(record: &Record, tz: &Tz, date_format: &str) -> ItemView
where
    Tz::Offset: std::fmt::Display,
{
    let format = if is_valid_date_format(date_format) {
        date_format
    } else {
        FALLBACK_DATE_FORMAT
    };
    ItemView {
        id: record.id,
        url: record.url.clone(),
        tag: record.tag.clone(),
        date_label: record.date.with_timezone(tz).format(format).to_string(),
        completed: record.completed,
        toggle_label: if record.completed {
            "Mark incomplete".to_string()
        } else {
            "Mark complete".to_string()
        },
        hidden: false,
    }
}

/// Partitions records into the pending and completed lists, keeping store order.
pub fn render_section<Tz: TimeZone>(records: &[Record], tz: &Tz, date_format: &str) -> SectionView
where
    Tz::Offset: std::fmt::Display,
{
    let mut view = SectionView::default();
    for record in records {
        let item = render_item(record, tz, date_format);
        if record.completed {
            view.completed.push(item);
        } else {
            view.pending.push(item);
        }
    }
    view
}

/// Case-insensitive substring match on url or tag.
pub fn matches_query(item: &ItemView, query: &str) -> bool {
    let query = query.to_lowercase();
    item.url.to_lowercase().contains(&query) || item.tag.to_lowercase().contains(&query)
}

/// Vertical extent of a rendered item, used to find a drop position.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ItemBox {
    pub id: i64,
    pub top: f64,
    pub height: f64,
}

/// Returns the item the dragged one should be inserted before when dropped at
/// `y`: the closest item whose midpoint lies below `y`. `None` means the end
/// of the list.
pub fn drop_target(boxes: &[ItemBox], y: f64) -> Option<i64> {
    boxes
        .iter()
        .map(|b| (b.id, y - b.top - b.height / 2.0))
        .filter(|(_, offset)| *offset < 0.0)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

impl SectionView {
    pub fn list(&self, kind: ListKind) -> &[ItemView] {
        match kind {
            ListKind::Pending => &self.pending,
            ListKind::Completed => &self.completed,
        }
    }

    fn list_mut(&mut self, kind: ListKind) -> &mut Vec<ItemView> {
        match kind {
            ListKind::Pending => &mut self.pending,
            ListKind::Completed => &mut self.completed,
        }
    }

    /// Hides every item that does not match `query`. An empty query shows all.
    pub fn apply_search(&mut self, query: &str) {
        let query = query.trim();
        for item in self.pending.iter_mut().chain(self.completed.iter_mut()) {
            item.hidden = !query.is_empty() && !matches_query(item, query);
        }
    }

    /// Items not hidden by the search filter.
    pub fn visible(&self, kind: ListKind) -> Vec<&ItemView> {
        self.list(kind).iter().filter(|item| !item.hidden).collect()
    }

    /// Moves `id` before `before` (or to the end) within one list.
    ///
    /// Returns false when `id` is not in the list or `before` is not in the
    /// same list. The new order is never written back to the store.
    pub fn move_item(&mut self, kind: ListKind, id: i64, before: Option<i64>) -> bool {
        let list = self.list_mut(kind);
        let Some(from) = list.iter().position(|item| item.id == id) else {
            return false;
        };
        if before == Some(id) {
            return true;
        }
        if let Some(target) = before {
            if !list.iter().any(|item| item.id == target) {
                return false;
            }
        }

        let item = list.remove(from);
        let to = match before {
            Some(target) => list
                .iter()
                .position(|i| i.id == target)
                .unwrap_or(list.len()),
            None => list.len(),
        };
        list.insert(to, item);
        true
    }
}

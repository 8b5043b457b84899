//! Active table-of-contents entry from heading visibility events.
//!
//! Tracks which observed headings currently intersect the trigger band. The
//! active id is the first intersecting heading in document order; when none
//! intersect, the previous active id stays highlighted.

use std::collections::HashSet;

/// One visibility change for an observed heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub id: String,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    pub fn new(id: impl Into<String>, is_intersecting: bool) -> Self {
        Self {
            id: id.into(),
            is_intersecting,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SectionTracker {
    /// Observed ids in document order.
    order: Vec<String>,
    intersecting: HashSet<String>,
    active: Option<String>,
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the observed set, e.g. after navigating to another post.
    pub fn observe<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order = ids.into_iter().map(Into::into).collect();
        self.intersecting.clear();
        self.active = None;
    }

    pub fn reset(&mut self) {
        self.order.clear();
        self.intersecting.clear();
        self.active = None;
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Apply a batch of visibility changes and return the active id.
    pub fn on_intersections(&mut self, entries: &[IntersectionEntry]) -> Option<&str> {
        for entry in entries {
            if !self.order.iter().any(|id| id == &entry.id) {
                continue;
            }
            if entry.is_intersecting {
                self.intersecting.insert(entry.id.clone());
            } else {
                self.intersecting.remove(&entry.id);
            }
        }

        if let Some(topmost) = self
            .order
            .iter()
            .find(|id| self.intersecting.contains(id.as_str()))
        {
            self.active = Some(topmost.clone());
        }
        self.active.as_deref()
    }
}

//! Segment selection.

use serde::{Deserialize, Serialize};
use sl_common::SegmentId;
use sl_timeline::Timeline;

/// Ordered set of selected segment ids. Never part of history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    selected: Vec<SegmentId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a segment. Without `multi`, the previous selection is replaced.
    pub fn select(&mut self, id: SegmentId, multi: bool) {
        if !multi {
            self.selected.clear();
        }
        if !self.selected.contains(&id) {
            self.selected.push(id);
        }
    }

    pub fn deselect(&mut self, id: SegmentId) {
        self.selected.retain(|s| *s != id);
    }

    /// Add the segment if absent, remove it if present (modifier-click).
    pub fn toggle(&mut self, id: SegmentId) {
        if self.contains(id) {
            self.deselect(id);
        } else {
            self.selected.push(id);
        }
    }

    /// Replace the selection with every segment of the timeline, in order.
    pub fn select_all(&mut self, timeline: &Timeline) {
        self.selected = timeline.segment_ids();
    }

    /// Replace the selection with the given ids (e.g. newly pasted segments).
    pub fn set(&mut self, ids: Vec<SegmentId>) {
        self.selected = ids;
        let mut seen = Vec::with_capacity(self.selected.len());
        self.selected.retain(|id| {
            if seen.contains(id) {
                false
            } else {
                seen.push(*id);
                true
            }
        });
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop ids whose segment no longer exists.
    pub fn retain_existing(&mut self, timeline: &Timeline) {
        self.selected.retain(|id| timeline.get(*id).is_some());
    }

    pub fn contains(&self, id: SegmentId) -> bool {
        self.selected.contains(&id)
    }

    pub fn ids(&self) -> &[SegmentId] {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }
}

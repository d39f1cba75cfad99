//! Snapshot-based undo/redo history.
//!
//! History is a list of committed timeline states with a cursor pointing at
//! the one currently shown:
//! - Committing drops everything after the cursor and appends a new entry
//! - Undo/redo move the cursor and hand back the entry to restore
//! - The oldest entries are evicted above a configurable depth
//! - Batch mode suppresses commits while a gesture is in progress
//!
//! # Usage
//!
//! ```ignore
//! let mut history = HistoryManager::new(50);
//! history.commit("Load media", TimelineSnapshot::capture(&timeline));
//!
//! // After each discrete edit
//! history.commit("Split", TimelineSnapshot::capture(&timeline));
//!
//! // Undo
//! if let Some(entry) = history.undo() {
//!     entry.snapshot.restore(&mut timeline);
//! }
//! ```

use std::time::Instant;

use crate::snapshot::TimelineSnapshot;

/// A single committed timeline state.
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    /// Human-readable label of the action that produced this state.
    pub label: String,
    pub snapshot: TimelineSnapshot,
    pub timestamp: Instant,
}

/// Cursor-based undo/redo over committed timeline snapshots.
pub struct HistoryManager {
    entries: Vec<HistoryEntry>,
    /// Index of the current entry. Meaningless while `entries` is empty.
    cursor: usize,
    max_entries: usize,
    /// When Some, a gesture is in progress and commits are suppressed.
    batch_label: Option<String>,
}

impl HistoryManager {
    /// Create an empty history holding at most `max_entries` states
    /// (at least one).
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            max_entries: max_entries.max(1),
            batch_label: None,
        }
    }

    /// Record a new current state.
    ///
    /// Any redo tail is discarded. Returns false if suppressed by a batch.
    pub fn commit(&mut self, label: &str, snapshot: TimelineSnapshot) -> bool {
        if self.batch_label.is_some() {
            tracing::debug!(label, "Commit suppressed: batch in progress");
            return false;
        }
        self.push_entry(label.to_string(), snapshot);
        true
    }

    fn push_entry(&mut self, label: String, snapshot: TimelineSnapshot) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }

        tracing::debug!(
            label = %label,
            segments = snapshot.segment_count(),
            "History entry committed"
        );
        self.entries.push(HistoryEntry {
            label,
            snapshot,
            timestamp: Instant::now(),
        });

        let overflow = self.entries.len().saturating_sub(self.max_entries);
        if overflow > 0 {
            self.entries.drain(..overflow);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry and return it, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        self.end_stuck_batch("undo");
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        let entry = &self.entries[self.cursor];
        tracing::debug!(label = %entry.label, cursor = self.cursor, "Undo");
        Some(entry)
    }

    /// Step forward one entry and return it, or `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        self.end_stuck_batch("redo");
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        let entry = &self.entries[self.cursor];
        tracing::debug!(label = %entry.label, cursor = self.cursor, "Redo");
        Some(entry)
    }

    // A lost pointer release must not block undo/redo forever.
    fn end_stuck_batch(&mut self, action: &str) {
        if let Some(label) = self.batch_label.take() {
            tracing::warn!(batch = %label, action, "Ending stuck batch");
        }
    }

    /// The entry matching what is currently on screen.
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Begin a gesture. Commits are suppressed until [`end_batch`](Self::end_batch)
    /// or [`cancel_batch`](Self::cancel_batch).
    pub fn start_batch(&mut self, label: &str) {
        if self.batch_label.is_some() {
            tracing::warn!(label, "start_batch called while already batching, ignoring");
            return;
        }
        self.batch_label = Some(label.to_string());
        tracing::debug!(label, "Batch started");
    }

    /// Finish a gesture by committing its final state as one entry.
    ///
    /// Pass `None` when the gesture changed nothing. Returns whether an
    /// entry was committed.
    pub fn end_batch(&mut self, snapshot: Option<TimelineSnapshot>) -> bool {
        let Some(label) = self.batch_label.take() else {
            return false;
        };
        match snapshot {
            Some(snapshot) => {
                self.push_entry(label, snapshot);
                true
            }
            None => {
                tracing::debug!(label = %label, "Batch ended without changes");
                false
            }
        }
    }

    /// Abandon a gesture without committing.
    pub fn cancel_batch(&mut self) {
        if let Some(label) = self.batch_label.take() {
            tracing::debug!(label = %label, "Batch cancelled");
        }
    }

    pub fn is_batching(&self) -> bool {
        self.batch_label.is_some()
    }

    /// Label of the action that would be undone next.
    pub fn undo_label(&self) -> Option<&str> {
        if self.can_undo() {
            self.current().map(|e| e.label.as_str())
        } else {
            None
        }
    }

    /// Label of the action that would be redone next.
    pub fn redo_label(&self) -> Option<&str> {
        if self.can_redo() {
            self.entries.get(self.cursor + 1).map(|e| e.label.as_str())
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Forget every entry (e.g. when new media is loaded).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
        self.batch_label = None;
        tracing::debug!("History cleared");
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Change the depth limit. Entries older than the cursor are evicted
    /// first, then the redo tail, so the current entry always survives.
    pub fn set_max_entries(&mut self, max: usize) {
        self.max_entries = max.max(1);
        while self.entries.len() > self.max_entries {
            if self.cursor > 0 {
                self.entries.remove(0);
                self.cursor -= 1;
            } else {
                self.entries.pop();
            }
        }
    }
}

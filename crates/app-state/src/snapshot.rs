//! Timeline snapshot for undo/redo.
//!
//! A `TimelineSnapshot` is an immutable deep copy of everything an edit can
//! change: segments, markers and the timeline span. Selection, playback and
//! viewport are deliberately left out. Thumbnails ride along (they are
//! `Arc`-backed, so capturing is cheap) but are never serialized.

use serde::{Deserialize, Serialize};
use sl_timeline::{Marker, Segment, Timeline};

use crate::state::TimelineState;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    pub segments: Vec<Segment>,
    pub markers: Vec<Marker>,
    /// Timeline span in seconds.
    pub total_duration: f64,
}

impl TimelineSnapshot {
    /// Capture the editable part of the timeline.
    pub fn capture(timeline: &Timeline) -> Self {
        Self {
            segments: timeline.segments().to_vec(),
            markers: timeline.markers().to_vec(),
            total_duration: timeline.total_duration(),
        }
    }

    /// Capture from the full editor state.
    pub fn capture_state(state: &TimelineState) -> Self {
        Self::capture(&state.timeline)
    }

    /// Overwrite the timeline with this snapshot.
    pub fn restore(&self, timeline: &mut Timeline) {
        timeline.replace_contents(
            self.segments.clone(),
            self.markers.clone(),
            self.total_duration,
        );
    }

    /// Restore into the editor state, keeping selection and viewport
    /// consistent with the restored segments.
    pub fn restore_state(&self, state: &mut TimelineState) {
        self.restore(&mut state.timeline);
        state.selection.retain_existing(&state.timeline);
        state.mapper.set_total_duration(self.total_duration);
        state.mark_dirty();
        tracing::debug!(
            segments = self.segments.len(),
            markers = self.markers.len(),
            total = self.total_duration,
            "Snapshot restored"
        );
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

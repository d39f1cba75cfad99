//! The editor state context.
//!
//! `TimelineState` holds everything one editor instance works on: the
//! segment model, selection, playback mirror, viewport mapping, snap
//! settings and clipboard. There is no global state; the owning editor
//! passes it around explicitly.

use sl_common::EditorConfig;
use sl_timeline::{CoordinateMapper, EditLimits, Segment, SnapSettings, Timeline};

use crate::playback::PlaybackState;
use crate::selection::SelectionState;

#[derive(Clone, Debug)]
pub struct TimelineState {
    // --- Timeline data ---
    pub timeline: Timeline,
    /// Duration of the loaded media. Player-facing clamps use this, not the
    /// (possibly grown or shrunk) timeline span.
    pub media_duration: f64,

    // --- Sub-states ---
    pub selection: SelectionState,
    pub playback: PlaybackState,
    pub mapper: CoordinateMapper,
    pub snap: SnapSettings,
    /// Segments captured by the last copy. Not part of history.
    pub clipboard: Vec<Segment>,

    /// Whether there are edits not yet exported.
    pub is_dirty: bool,
}

impl Default for TimelineState {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl TimelineState {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            timeline: Timeline::new(EditLimits::from_config(config)),
            media_duration: 0.0,
            selection: SelectionState::new(),
            playback: PlaybackState::new(),
            mapper: CoordinateMapper::from_config(config),
            snap: SnapSettings::from_config(config),
            clipboard: Vec::new(),
            is_dirty: false,
        }
    }

    /// Reset for newly loaded media: one full-length segment, nothing
    /// selected, playhead at zero.
    pub fn load_media(&mut self, duration: f64) {
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        self.media_duration = duration;
        self.timeline.initialize(duration);
        self.selection.clear();
        self.clipboard.clear();
        self.playback.reset_for_media();
        self.mapper.set_total_duration(duration);
        self.mapper.scroll_to(0.0);
        self.is_dirty = false;
        tracing::info!(duration, "Media loaded");
    }

    pub fn has_media(&self) -> bool {
        self.media_duration > 0.0 && !self.timeline.is_empty()
    }

    pub fn total_duration(&self) -> f64 {
        self.timeline.total_duration()
    }

    pub fn playhead(&self) -> f64 {
        self.playback.current_time.as_secs()
    }

    /// Bring derived state in line after the timeline changed: viewport
    /// span, stale selection ids and the loop region.
    pub fn sync_after_edit(&mut self) {
        let total = self.timeline.total_duration();
        self.mapper.set_total_duration(total);
        self.selection.retain_existing(&self.timeline);
        self.playback.clamp_loop_region(total);
        self.mark_dirty();
    }

    /// Copy the selected segments, in timeline order.
    pub fn copy_selection(&mut self) -> usize {
        self.clipboard = self
            .timeline
            .segments()
            .iter()
            .filter(|s| self.selection.contains(s.id))
            .cloned()
            .collect();
        tracing::debug!(count = self.clipboard.len(), "Segments copied");
        self.clipboard.len()
    }

    /// Mark the timeline as having unexported changes.
    pub fn mark_dirty(&mut self) {
        if !self.is_dirty {
            self.is_dirty = true;
            tracing::debug!("Timeline marked as dirty");
        }
    }

    /// Mark the timeline as exported.
    pub fn mark_clean(&mut self) {
        if self.is_dirty {
            self.is_dirty = false;
            tracing::debug!("Timeline marked as clean");
        }
    }
}

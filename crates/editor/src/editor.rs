//! `TimelineEditor`: the single owner of the editor state.
//!
//! Every mutation goes through here so that each discrete operation is
//! validated, committed to history exactly once, and followed by the same
//! bookkeeping (selection pruning, viewport span, thumbnail scheduling).

use std::path::Path;
use std::time::Instant;

use sl_app_state::{HistoryManager, TimelineSnapshot, TimelineState};
use sl_common::{ConfigError, EditorConfig, MarkerId, Player, PlayerEvent, Rgba, SegmentId, DEFAULT_MARKER_COLOR};
use sl_project::{ExportedTimeline, ProjectResult};
use sl_timeline::{Coverage, InvariantViolation, Timeline};
use tracing::{debug, error, info, warn};

use crate::commands::EditorCommand;
use crate::drag::{changed_bounds, DragController, DragKind};
use crate::thumbnail::{CaptureRequest, CaptureResult, ThumbnailScheduler};

pub struct TimelineEditor<P: Player> {
    state: TimelineState,
    history: HistoryManager,
    drag: DragController,
    thumbnails: ThumbnailScheduler,
    player: P,
    config: EditorConfig,
}

impl<P: Player> TimelineEditor<P> {
    /// Create an editor around `player` with a validated configuration.
    pub fn new(player: P, config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(player, config))
    }

    /// Create an editor with the default configuration.
    pub fn with_defaults(player: P) -> Self {
        Self::build(player, EditorConfig::default())
    }

    fn build(player: P, config: EditorConfig) -> Self {
        info!(
            history_limit = config.history_limit,
            snap_threshold = config.snap_threshold,
            "Timeline editor created"
        );
        Self {
            state: TimelineState::new(&config),
            history: HistoryManager::new(config.history_limit),
            drag: DragController::new(),
            thumbnails: ThumbnailScheduler::from_config(&config),
            player,
            config,
        }
    }

    // -- Accessors --

    pub fn state(&self) -> &TimelineState {
        &self.state
    }

    pub fn timeline(&self) -> &Timeline {
        &self.state.timeline
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn thumbnails(&self) -> &ThumbnailScheduler {
        &self.thumbnails
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn drag_kind(&self) -> Option<DragKind> {
        self.drag.active_kind()
    }

    pub fn selected(&self) -> &[SegmentId] {
        self.state.selection.ids()
    }

    // -- Player events --

    pub fn handle_player_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::TimeUpdate(time) => {
                if let Some(target) = self.state.playback.on_time_update(time) {
                    self.player.set_current_time(target);
                }
                let playhead = self.state.playhead();
                self.state.mapper.scroll_to_reveal(playhead);
            }
            PlayerEvent::LoadedMetadata { duration } => self.load_media(duration),
            PlayerEvent::Play => self.state.playback.play(),
            PlayerEvent::Pause => self.state.playback.pause(),
        }
    }

    /// Start over with one segment spanning the media.
    fn load_media(&mut self, duration: f64) {
        self.drag.cancel(&mut self.state.timeline);
        self.history.clear();
        self.thumbnails.reset();
        self.state.load_media(duration);

        if !self.state.has_media() {
            warn!(duration, "Loaded media has no usable duration");
            return;
        }
        self.history
            .commit("Load media", TimelineSnapshot::capture(&self.state.timeline));
        self.thumbnails.note_edit(Instant::now());
    }

    // -- Edit pipeline --

    /// Run a timeline edit as one undoable operation.
    ///
    /// `op` reports whether it changed anything. The result is checked with
    /// `coverage`; an invalid result is logged and rolled back to the last
    /// committed state. Returns whether the edit was committed.
    pub fn apply_edit(
        &mut self,
        label: &str,
        coverage: Coverage,
        op: impl FnOnce(&mut TimelineState) -> bool,
    ) -> bool {
        if self.drag.is_dragging() {
            warn!(label, "Edit ignored: drag in progress");
            return false;
        }
        if !self.state.has_media() {
            debug!(label, "Edit ignored: no media loaded");
            return false;
        }

        let before = self.state.timeline.clone();
        if !op(&mut self.state) {
            debug!(label, "Edit was a no-op");
            return false;
        }

        let moved = changed_bounds(&before, &self.state.timeline);
        self.state.timeline.clear_thumbnails(&moved);
        if let Err(violation) = self.state.timeline.validate(coverage) {
            self.fail_closed(label, violation);
            return false;
        }

        self.history
            .commit(label, TimelineSnapshot::capture(&self.state.timeline));
        self.state.sync_after_edit();
        self.thumbnails.invalidate(&moved);
        self.thumbnails.note_edit(Instant::now());
        true
    }

    fn fail_closed(&mut self, label: &str, violation: InvariantViolation) {
        error!(label, %violation, "Edit produced an invalid timeline, reverting");
        if let Some(entry) = self.history.current() {
            entry.snapshot.restore_state(&mut self.state);
        }
        debug_assert!(false, "{label} produced an invalid timeline: {violation}");
    }

    /// Partition-preserving edits only demand a partition if there was one.
    fn preserved(&self) -> Coverage {
        if self.state.timeline.is_partition() {
            Coverage::Partition
        } else {
            Coverage::Loose
        }
    }

    // -- Structural edits --

    pub fn split_at(&mut self, time: f64) -> Option<(SegmentId, SegmentId)> {
        let mut halves = None;
        let coverage = self.preserved();
        let committed = self.apply_edit("Split", coverage, |s| {
            halves = s.timeline.split_at(time);
            halves.is_some()
        });
        halves.filter(|_| committed)
    }

    pub fn split_at_playhead(&mut self) -> Option<(SegmentId, SegmentId)> {
        self.split_at(self.state.playhead())
    }

    pub fn trim_start(&mut self, id: SegmentId, time: f64) -> bool {
        self.apply_edit("Trim start", Coverage::Loose, |s| s.timeline.trim_start(id, time))
    }

    pub fn trim_end(&mut self, id: SegmentId, time: f64) -> bool {
        self.apply_edit("Trim end", Coverage::Loose, |s| s.timeline.trim_end(id, time))
    }

    pub fn move_boundary(&mut self, left: SegmentId, right: SegmentId, time: f64) -> bool {
        let coverage = self.preserved();
        self.apply_edit("Move boundary", coverage, |s| {
            s.timeline.move_boundary(left, right, time)
        })
    }

    /// Move a segment and settle the result back into a partition.
    pub fn move_segment(&mut self, id: SegmentId, new_start: f64) -> bool {
        self.apply_edit("Move segment", Coverage::Partition, |s| {
            if !s.timeline.move_segment(id, new_start) {
                return false;
            }
            s.timeline.settle();
            true
        })
    }

    /// Delete the selection. Ripple closes the gaps and shrinks the timeline.
    pub fn delete_selected(&mut self, ripple: bool) -> usize {
        let ids = self.state.selection.ids().to_vec();
        let coverage = if ripple { Coverage::Partition } else { Coverage::Loose };
        let label = if ripple { "Ripple delete" } else { "Delete" };
        let mut removed = 0;
        let committed = self.apply_edit(label, coverage, |s| {
            removed = s.timeline.delete(&ids, ripple);
            removed > 0
        });
        if committed {
            removed
        } else {
            0
        }
    }

    pub fn merge_selected(&mut self) -> Option<SegmentId> {
        let ids = self.state.selection.ids().to_vec();
        let coverage = self.preserved();
        let mut merged = None;
        let committed = self.apply_edit("Merge", coverage, |s| {
            merged = s.timeline.merge(&ids);
            if let Some(id) = merged {
                s.selection.select(id, false);
            }
            merged.is_some()
        });
        merged.filter(|_| committed)
    }

    /// Append copies of the selection after the timeline end and select them.
    pub fn duplicate_selected(&mut self) -> Vec<SegmentId> {
        let ids = self.state.selection.ids().to_vec();
        let mut copies = Vec::new();
        let committed = self.apply_edit("Duplicate", Coverage::Loose, |s| {
            copies = s.timeline.duplicate(&ids);
            s.selection.set(copies.clone());
            !copies.is_empty()
        });
        if committed {
            copies
        } else {
            Vec::new()
        }
    }

    /// Copy the selection to the clipboard. Not an edit.
    pub fn copy(&mut self) -> usize {
        self.state.copy_selection()
    }

    /// Append the clipboard after the timeline end and select the copies.
    pub fn paste(&mut self) -> Vec<SegmentId> {
        let clipboard = self.state.clipboard.clone();
        let mut pasted = Vec::new();
        let committed = self.apply_edit("Paste", Coverage::Loose, |s| {
            pasted = s.timeline.paste(&clipboard);
            s.selection.set(pasted.clone());
            !pasted.is_empty()
        });
        if committed {
            pasted
        } else {
            Vec::new()
        }
    }

    pub fn redistribute_equal(&mut self, n: usize) -> bool {
        self.apply_edit("Redistribute", Coverage::Partition, |s| {
            s.timeline.redistribute_equal(n)
        })
    }

    // -- Segment metadata --

    pub fn toggle_lock_selected(&mut self) -> usize {
        self.bulk_edit("Toggle lock", |tl, ids| tl.toggle_lock(ids))
    }

    pub fn toggle_mute_selected(&mut self) -> usize {
        self.bulk_edit("Toggle mute", |tl, ids| tl.toggle_mute(ids))
    }

    pub fn set_speed_selected(&mut self, speed: f64) -> usize {
        self.bulk_edit("Set speed", |tl, ids| tl.set_speed(ids, speed))
    }

    fn bulk_edit(&mut self, label: &str, op: impl FnOnce(&mut Timeline, &[SegmentId]) -> usize) -> usize {
        let ids = self.state.selection.ids().to_vec();
        let coverage = self.preserved();
        let mut changed = 0;
        let committed = self.apply_edit(label, coverage, |s| {
            changed = op(&mut s.timeline, &ids);
            changed > 0
        });
        if committed {
            changed
        } else {
            0
        }
    }

    pub fn set_label(&mut self, id: SegmentId, label: &str) -> bool {
        let coverage = self.preserved();
        self.apply_edit("Rename segment", coverage, |s| s.timeline.set_label(id, label))
    }

    pub fn set_color(&mut self, id: SegmentId, color: Rgba) -> bool {
        let coverage = self.preserved();
        self.apply_edit("Set color", coverage, |s| s.timeline.set_color(id, color))
    }

    pub fn set_prompt(&mut self, id: SegmentId, prompt: &str) -> bool {
        let coverage = self.preserved();
        self.apply_edit("Set prompt", coverage, |s| s.timeline.set_prompt(id, prompt))
    }

    // -- Markers --

    pub fn add_marker(&mut self, time: f64, label: &str, color: Rgba) -> Option<MarkerId> {
        let coverage = self.preserved();
        let mut added = None;
        let committed = self.apply_edit("Add marker", coverage, |s| {
            added = Some(s.timeline.add_marker(time, label, color));
            true
        });
        added.filter(|_| committed)
    }

    pub fn add_marker_at_playhead(&mut self) -> Option<MarkerId> {
        let label = format!("Marker {}", self.state.timeline.markers().len() + 1);
        self.add_marker(self.state.playhead(), &label, DEFAULT_MARKER_COLOR)
    }

    pub fn remove_marker(&mut self, id: MarkerId) -> bool {
        let coverage = self.preserved();
        self.apply_edit("Remove marker", coverage, |s| s.timeline.remove_marker(id).is_some())
    }

    pub fn rename_marker(&mut self, id: MarkerId, label: &str) -> bool {
        let coverage = self.preserved();
        self.apply_edit("Rename marker", coverage, |s| s.timeline.rename_marker(id, label))
    }

    // -- History --

    pub fn undo(&mut self) -> bool {
        if self.drag.is_dragging() {
            warn!("Undo ignored: drag in progress");
            return false;
        }
        let before = self.state.timeline.clone();
        match self.history.undo() {
            Some(entry) => {
                debug!(label = %entry.label, "Restoring previous state");
                entry.snapshot.restore_state(&mut self.state);
            }
            None => return false,
        }
        self.after_restore(&before);
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.drag.is_dragging() {
            warn!("Redo ignored: drag in progress");
            return false;
        }
        let before = self.state.timeline.clone();
        match self.history.redo() {
            Some(entry) => {
                debug!(label = %entry.label, "Restoring next state");
                entry.snapshot.restore_state(&mut self.state);
            }
            None => return false,
        }
        self.after_restore(&before);
        true
    }

    fn after_restore(&mut self, before: &Timeline) {
        let total = self.state.total_duration();
        self.state.playback.clamp_loop_region(total);
        self.thumbnails
            .invalidate(&changed_bounds(before, &self.state.timeline));
        self.thumbnails.note_edit(Instant::now());
    }

    // -- Selection --

    /// Select a segment; returns false for unknown ids.
    pub fn select(&mut self, id: SegmentId, multi: bool) -> bool {
        if self.state.timeline.get(id).is_none() {
            return false;
        }
        self.state.selection.select(id, multi);
        true
    }

    pub fn toggle_selection(&mut self, id: SegmentId) -> bool {
        if self.state.timeline.get(id).is_none() {
            return false;
        }
        self.state.selection.toggle(id);
        true
    }

    pub fn select_all(&mut self) {
        self.state.selection.select_all(&self.state.timeline);
    }

    pub fn clear_selection(&mut self) {
        self.state.selection.clear();
    }

    // -- Playback --

    pub fn toggle_play(&mut self) -> bool {
        if !self.state.has_media() {
            return false;
        }
        if self.player.is_paused() {
            self.player.play();
            self.state.playback.play();
        } else {
            self.player.pause();
            self.state.playback.pause();
        }
        true
    }

    /// Seek the player, clamped to the media. Returns the applied time.
    pub fn seek(&mut self, time: f64) -> f64 {
        if !time.is_finite() {
            return self.state.playhead();
        }
        let applied = self.state.playback.seek(time, self.state.media_duration);
        self.player.set_current_time(applied);
        self.state.mapper.scroll_to_reveal(applied);
        applied
    }

    pub fn seek_by(&mut self, delta: f64) -> f64 {
        self.seek(self.state.playhead() + delta)
    }

    pub fn jump_to_start(&mut self) -> f64 {
        self.seek(0.0)
    }

    pub fn jump_to_end(&mut self) -> f64 {
        self.seek(self.state.media_duration)
    }

    pub fn set_volume(&mut self, volume: f32) {
        let applied = self.state.playback.set_volume(volume);
        self.player.set_volume(applied);
    }

    /// Toggle looping. Without a loop region, the selection's span becomes
    /// the region first.
    pub fn toggle_loop(&mut self) -> bool {
        if self.state.playback.loop_region.is_none() {
            if let Some((start, end)) = self.selection_span() {
                let total = self.state.total_duration();
                self.state.playback.set_loop_region(start, end, total);
            }
        }
        self.state.playback.toggle_loop()
    }

    pub fn set_loop_region(&mut self, start: f64, end: f64) -> bool {
        let total = self.state.total_duration();
        self.state.playback.set_loop_region(start, end, total)
    }

    pub fn clear_loop_region(&mut self) {
        self.state.playback.clear_loop_region();
    }

    fn selection_span(&self) -> Option<(f64, f64)> {
        self.state
            .timeline
            .segments()
            .iter()
            .filter(|s| self.state.selection.contains(s.id))
            .fold(None, |span, s| match span {
                None => Some((s.start(), s.end())),
                Some((lo, hi)) => Some((f64::min(lo, s.start()), f64::max(hi, s.end()))),
            })
    }

    // -- View --

    pub fn zoom_in(&mut self) -> bool {
        self.state.mapper.zoom_in()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.state.mapper.zoom_out()
    }

    pub fn set_zoom_index(&mut self, index: usize) -> bool {
        self.state.mapper.set_zoom_index(index)
    }

    pub fn scroll_to(&mut self, offset: f64) {
        self.state.mapper.scroll_to(offset);
    }

    pub fn toggle_snap(&mut self) -> bool {
        let enabled = self.state.snap.toggle();
        debug!(enabled, "Snap toggled");
        enabled
    }

    // -- Pointer gestures --

    /// Press on a segment body, edge or boundary handle at viewport x.
    pub fn pointer_down(&mut self, kind: DragKind, x: f64) -> bool {
        if !self.state.has_media() {
            return false;
        }
        if !self.drag.begin(kind, x, &self.state.timeline) {
            return false;
        }
        self.history.start_batch(kind.label());
        true
    }

    /// Pointer moved to viewport x. Republishes the live timeline.
    pub fn pointer_move(&mut self, x: f64) -> bool {
        self.drag.update(
            x,
            &self.state.mapper,
            &self.state.snap,
            &mut self.state.timeline,
        )
    }

    /// Release the gesture. Returns whether a history entry was committed.
    pub fn pointer_up(&mut self) -> bool {
        let Some(outcome) = self.drag.release(&mut self.state.timeline) else {
            return false;
        };
        if outcome.changed.is_empty() {
            self.history.end_batch(None);
            return false;
        }

        self.state.timeline.clear_thumbnails(&outcome.changed);
        if let Err(violation) = self.state.timeline.validate(outcome.coverage) {
            self.history.cancel_batch();
            self.fail_closed(outcome.kind.label(), violation);
            return false;
        }

        self.history
            .end_batch(Some(TimelineSnapshot::capture(&self.state.timeline)));
        self.state.sync_after_edit();
        self.thumbnails.invalidate(&outcome.changed);
        self.thumbnails.note_edit(Instant::now());
        true
    }

    /// Pointer cancelled or left: restore the pre-gesture timeline.
    pub fn pointer_cancel(&mut self) -> bool {
        if !self.drag.cancel(&mut self.state.timeline) {
            return false;
        }
        self.history.cancel_batch();
        true
    }

    // -- Thumbnails --

    /// Run a due regeneration pass synchronously through the player.
    /// Returns how many thumbnails were attached.
    pub fn pump_thumbnails(&mut self, now: Instant) -> usize {
        let requests = self.poll_thumbnail_requests(now);
        let mut attached = 0;
        for request in requests {
            let frame = self.player.capture_frame(request.at_time);
            let result = CaptureResult::new(&request, frame);
            if self.thumbnails.accept(result, &mut self.state.timeline) {
                attached += 1;
            }
        }
        attached
    }

    /// Capture requests for hosts that capture frames asynchronously.
    /// Nothing is issued while a drag is in progress.
    pub fn poll_thumbnail_requests(&mut self, now: Instant) -> Vec<CaptureRequest> {
        if self.drag.is_dragging() {
            return Vec::new();
        }
        self.thumbnails
            .poll(now, &self.state.timeline, self.state.media_duration)
    }

    /// Deliver an asynchronous capture result.
    pub fn deliver_thumbnail(&mut self, result: CaptureResult) -> bool {
        self.thumbnails.accept(result, &mut self.state.timeline)
    }

    // -- Commands --

    /// Run a keyboard-level command. Returns whether it had an effect.
    pub fn execute(&mut self, command: EditorCommand) -> bool {
        if command.is_structural() && self.drag.is_dragging() {
            warn!(?command, "Command ignored: drag in progress");
            return false;
        }
        debug!(?command, "Executing command");

        match command {
            EditorCommand::TogglePlay => self.toggle_play(),
            EditorCommand::SeekStep { forward, large } => {
                let step = if large {
                    self.config.seek_large_step
                } else {
                    self.config.seek_small_step
                };
                let before = self.state.playhead();
                self.seek_by(if forward { step } else { -step }) != before
            }
            EditorCommand::JumpToStart => {
                self.jump_to_start();
                true
            }
            EditorCommand::JumpToEnd => {
                self.jump_to_end();
                true
            }
            EditorCommand::SetVolume(volume) => {
                self.set_volume(volume);
                true
            }
            EditorCommand::ToggleLoop => {
                let before = self.state.playback.loop_enabled;
                self.toggle_loop() != before
            }
            EditorCommand::SplitAtPlayhead => self.split_at_playhead().is_some(),
            EditorCommand::DeleteSelected { ripple } => self.delete_selected(ripple) > 0,
            EditorCommand::MergeSelected => self.merge_selected().is_some(),
            EditorCommand::DuplicateSelected => !self.duplicate_selected().is_empty(),
            EditorCommand::Paste => !self.paste().is_empty(),
            EditorCommand::RedistributeEqual(n) => self.redistribute_equal(n),
            EditorCommand::AddMarker => self.add_marker_at_playhead().is_some(),
            EditorCommand::ToggleLock => self.toggle_lock_selected() > 0,
            EditorCommand::ToggleMute => self.toggle_mute_selected() > 0,
            EditorCommand::SetSpeed(speed) => self.set_speed_selected(speed) > 0,
            EditorCommand::Undo => self.undo(),
            EditorCommand::Redo => self.redo(),
            EditorCommand::Copy => self.copy() > 0,
            EditorCommand::SelectAll => {
                self.select_all();
                !self.state.selection.is_empty()
            }
            EditorCommand::ClearSelection => {
                let had = !self.state.selection.is_empty();
                self.clear_selection();
                had
            }
            EditorCommand::ZoomIn => self.zoom_in(),
            EditorCommand::ZoomOut => self.zoom_out(),
            EditorCommand::ToggleSnap => {
                self.toggle_snap();
                true
            }
        }
    }

    // -- Export --

    pub fn export(&self) -> ExportedTimeline {
        ExportedTimeline::from_timeline(&self.state.timeline)
    }

    /// Write the export atomically and mark the state clean.
    pub fn save_export(&mut self, path: &Path) -> ProjectResult<()> {
        sl_project::save_export(&self.export(), path)?;
        self.state.mark_clean();
        Ok(())
    }
}

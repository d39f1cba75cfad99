//! Playback state mirrored from the player: mode, playhead, volume and the
//! optional loop region.

use serde::{Deserialize, Serialize};
use sl_common::{TimeCode, TIME_EPSILON};

/// Current playback mode as last reported by the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackMode {
    /// No media loaded yet.
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// A half-open `[start, end)` range replayed while looping is on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoopRegion {
    pub start: f64,
    pub end: f64,
}

impl LoopRegion {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time < self.end
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaybackState {
    pub mode: PlaybackMode,
    /// Playhead position.
    pub current_time: TimeCode,
    pub loop_region: Option<LoopRegion>,
    /// Looping only takes effect while a region is set.
    pub loop_enabled: bool,
    /// Player volume in `[0, 1]`.
    pub volume: f32,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            mode: PlaybackMode::Stopped,
            current_time: TimeCode::ZERO,
            loop_region: None,
            loop_enabled: false,
            volume: 1.0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.mode == PlaybackMode::Playing
    }

    /// Record that the player started.
    pub fn play(&mut self) {
        self.mode = PlaybackMode::Playing;
        tracing::debug!(time = %self.current_time, "Playback started");
    }

    /// Record that the player paused.
    pub fn pause(&mut self) {
        self.mode = PlaybackMode::Paused;
        tracing::debug!(time = %self.current_time, "Playback paused");
    }

    /// Media became available: playhead back to zero, paused.
    pub fn reset_for_media(&mut self) {
        self.mode = PlaybackMode::Paused;
        self.current_time = TimeCode::ZERO;
        self.loop_region = None;
        self.loop_enabled = false;
    }

    /// Move the playhead, clamped to `[0, max]`.
    pub fn seek(&mut self, time: f64, max: f64) -> f64 {
        self.current_time = TimeCode::from_secs(time).clamp_to(max);
        tracing::debug!(time = %self.current_time, "Seeked");
        self.current_time.as_secs()
    }

    /// Relative seek, clamped to `[0, max]`. Returns the new position.
    pub fn seek_by(&mut self, delta: f64, max: f64) -> f64 {
        self.seek(self.current_time.as_secs() + delta, max)
    }

    /// Apply a position report from the player.
    ///
    /// Returns a seek target when looping is active and the playhead reached
    /// the end of the loop region.
    pub fn on_time_update(&mut self, time: f64) -> Option<f64> {
        self.current_time = TimeCode::from_secs(time);
        let region = self.loop_region.filter(|_| self.loop_enabled)?;
        if time >= region.end {
            tracing::debug!(from = time, to = region.start, "Loop wrap");
            self.current_time = TimeCode::from_secs(region.start);
            Some(region.start)
        } else {
            None
        }
    }

    /// Set the loop region. Endpoints are ordered and clamped to
    /// `[0, max]`; a region shorter than the time tolerance is rejected.
    pub fn set_loop_region(&mut self, start: f64, end: f64, max: f64) -> bool {
        if !(start.is_finite() && end.is_finite()) {
            return false;
        }
        let max = max.max(0.0);
        let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
        let region = LoopRegion {
            start: lo.clamp(0.0, max),
            end: hi.clamp(0.0, max),
        };
        if region.duration() <= TIME_EPSILON {
            tracing::debug!(start, end, "Loop region ignored: empty range");
            return false;
        }
        self.loop_region = Some(region);
        tracing::debug!(start = region.start, end = region.end, "Loop region set");
        true
    }

    pub fn clear_loop_region(&mut self) {
        self.loop_region = None;
        self.loop_enabled = false;
    }

    /// Flip looping. Cannot be enabled without a region. Returns the new state.
    pub fn toggle_loop(&mut self) -> bool {
        if !self.loop_enabled && self.loop_region.is_none() {
            tracing::debug!("Loop toggle ignored: no loop region");
            return false;
        }
        self.loop_enabled = !self.loop_enabled;
        tracing::debug!(loop_enabled = self.loop_enabled, "Loop toggled");
        self.loop_enabled
    }

    /// Clamp a loop region that may now extend past a shrunken timeline.
    pub fn clamp_loop_region(&mut self, max: f64) {
        if let Some(region) = self.loop_region {
            if region.end > max && !self.set_loop_region(region.start, max, max) {
                self.clear_loop_region();
            }
        }
    }

    /// Set the volume, clamped to `[0, 1]`. Returns the applied value.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        if volume.is_finite() {
            self.volume = volume.clamp(0.0, 1.0);
        }
        self.volume
    }
}

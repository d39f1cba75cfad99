//! Editor configuration: edit constraints, snapping, history depth, zoom and
//! thumbnail timing.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Shortest duration a committed segment may have (seconds).
pub const MIN_SEGMENT_DURATION: f64 = 0.1;

/// Tolerance used for contiguity and derived-duration checks (seconds).
pub const TIME_EPSILON: f64 = 1e-3;

/// Playback speed bounds applied by `set_speed`.
pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 16.0;

/// Default snap distance in seconds.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 0.08;

/// Default number of undo snapshots kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Discrete zoom factors, smallest to largest.
pub const ZOOM_LADDER: [f64; 10] = [0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 4.0, 6.0, 8.0, 10.0];

/// Top-level configuration for a timeline editor instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub min_segment_duration: f64,
    pub time_epsilon: f64,
    pub snap_enabled: bool,
    /// Snap distance in seconds. Independent of zoom.
    pub snap_threshold: f64,
    pub history_limit: usize,
    pub zoom_ladder: Vec<f64>,
    /// Index into `zoom_ladder` used when the editor starts (1.0x).
    pub default_zoom_index: usize,
    /// Timeline width in pixels at zoom factor 1.0 (also the viewport width).
    pub base_width_px: f64,
    /// Quiet period after the last edit before thumbnails are regenerated.
    pub thumbnail_debounce_ms: u64,
    pub seek_small_step: f64,
    pub seek_large_step: f64,
    pub min_speed: f64,
    pub max_speed: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_segment_duration: MIN_SEGMENT_DURATION,
            time_epsilon: TIME_EPSILON,
            snap_enabled: true,
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            history_limit: DEFAULT_HISTORY_LIMIT,
            zoom_ladder: ZOOM_LADDER.to_vec(),
            default_zoom_index: 2,
            base_width_px: 1000.0,
            thumbnail_debounce_ms: 300,
            seek_small_step: 0.1,
            seek_large_step: 1.0,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable by the editor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("min_segment_duration", self.min_segment_duration),
            ("time_epsilon", self.time_epsilon),
            ("snap_threshold", self.snap_threshold),
            ("base_width_px", self.base_width_px),
            ("seek_small_step", self.seek_small_step),
            ("seek_large_step", self.seek_large_step),
            ("min_speed", self.min_speed),
            ("max_speed", self.max_speed),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.min_speed > self.max_speed {
            return Err(ConfigError::InvalidSpeedRange {
                min: self.min_speed,
                max: self.max_speed,
            });
        }

        if self.history_limit == 0 {
            return Err(ConfigError::EmptyHistory);
        }

        let ladder_ok = !self.zoom_ladder.is_empty()
            && self.zoom_ladder.iter().all(|z| z.is_finite() && *z > 0.0)
            && self.zoom_ladder.windows(2).all(|w| w[0] < w[1]);
        if !ladder_ok {
            return Err(ConfigError::InvalidZoomLadder);
        }

        if self.default_zoom_index >= self.zoom_ladder.len() {
            return Err(ConfigError::ZoomIndexOutOfRange {
                index: self.default_zoom_index,
                len: self.zoom_ladder.len(),
            });
        }

        Ok(())
    }
}

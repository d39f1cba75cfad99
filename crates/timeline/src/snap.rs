//! Snapping of dragged times onto nearby segment edges and markers.

use serde::{Deserialize, Serialize};
use sl_common::{EditorConfig, DEFAULT_SNAP_THRESHOLD};

/// Snap toggle and distance. The threshold is in seconds and does not
/// depend on zoom.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapSettings {
    pub enabled: bool,
    pub threshold: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: DEFAULT_SNAP_THRESHOLD,
        }
    }
}

impl SnapSettings {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            enabled: config.snap_enabled,
            threshold: config.snap_threshold,
        }
    }

    /// Flip snapping on or off; returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    pub fn resolve(&self, candidate: f64, refs: &[f64]) -> f64 {
        resolve(candidate, refs, self.threshold, self.enabled)
    }
}

/// Snap `candidate` to the first reference (in the given order) within
/// `threshold`, inclusive. Returns `candidate` unchanged when disabled or
/// when nothing is close enough.
///
/// `refs` is expected to be sorted ascending, so ties resolve to the
/// earlier time.
pub fn resolve(candidate: f64, refs: &[f64], threshold: f64, enabled: bool) -> f64 {
    if !enabled {
        return candidate;
    }
    refs.iter()
        .copied()
        .find(|r| (r - candidate).abs() <= threshold)
        .unwrap_or(candidate)
}

//! Segment and marker types.

use serde::{Deserialize, Serialize};
use sl_common::{MarkerId, Rgba, SegmentId, Thumbnail, DEFAULT_MARKER_COLOR, DEFAULT_SEGMENT_COLOR};

fn default_speed() -> f64 {
    1.0
}

/// One contiguous, independently editable range of the source media.
///
/// `start`/`end` are private so that `duration` can never drift from
/// `end - start`: every bounds change goes through [`Segment::set_bounds`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Stable identifier; preserved by trims and moves, replaced by splits/merges.
    pub id: SegmentId,
    start: f64,
    end: f64,
    duration: f64,
    /// Locked segments ignore drags, trims and bulk mute/speed/delete/merge.
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub muted: bool,
    /// Playback speed multiplier (1.0 = normal).
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default)]
    pub label: String,
    pub color: Rgba,
    /// Representative still frame. Absent until generated, cleared when stale.
    #[serde(skip)]
    pub thumbnail: Option<Thumbnail>,
    /// Free-form user text attached to the segment.
    #[serde(default)]
    pub prompt: String,
}

impl Segment {
    /// New unlocked segment with default metadata and a fresh id.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            id: SegmentId::new(),
            start,
            end,
            duration: end - start,
            locked: false,
            muted: false,
            speed: 1.0,
            label: String::new(),
            color: DEFAULT_SEGMENT_COLOR,
            thumbnail: None,
            prompt: String::new(),
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Stored duration; always `end - start`.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn midpoint(&self) -> f64 {
        self.start + self.duration / 2.0
    }

    /// Half-open containment: `start <= time < end`.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time < self.end
    }

    /// Move both edges and recompute the derived duration.
    pub fn set_bounds(&mut self, start: f64, end: f64) {
        self.start = start;
        self.end = end;
        self.duration = end - start;
    }

    /// Shift the segment so it starts at `start`, keeping its duration.
    pub fn translate_to(&mut self, start: f64) {
        let duration = self.duration;
        self.set_bounds(start, start + duration);
    }

    /// Copy with a fresh id, no thumbnail and no lock. Used by split,
    /// duplicate and paste.
    pub fn fresh_copy(&self) -> Self {
        Self {
            id: SegmentId::new(),
            thumbnail: None,
            locked: false,
            ..self.clone()
        }
    }
}

/// A point annotation on the timeline. Markers are extra snap targets and
/// have no relationship to segment boundaries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: MarkerId,
    /// Position in seconds.
    pub time: f64,
    pub label: String,
    pub color: Rgba,
}

impl Marker {
    pub fn new(time: f64, label: impl Into<String>) -> Self {
        Self {
            id: MarkerId::new(),
            time,
            label: label.into(),
            color: DEFAULT_MARKER_COLOR,
        }
    }
}

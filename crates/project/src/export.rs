//! The exported timeline: a metadata-only description of the cut.
//!
//! Export is write-only. Segment ids, thumbnails, lock state, colors and
//! prompts stay inside the editor; optional fields are omitted when they
//! hold their default.

use serde::{Deserialize, Serialize};
use sl_common::{MarkerId, Rgba};
use sl_timeline::{Marker, Segment, Timeline};

/// One segment in the export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportedSegment {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    /// Present only when non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Present only when not 1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Present only when muted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,
}

impl From<&Segment> for ExportedSegment {
    fn from(seg: &Segment) -> Self {
        Self {
            start: seg.start(),
            end: seg.end(),
            duration: seg.duration(),
            label: (!seg.label.is_empty()).then(|| seg.label.clone()),
            speed: (seg.speed != 1.0).then_some(seg.speed),
            muted: seg.muted.then_some(true),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportedMarker {
    pub id: MarkerId,
    pub time: f64,
    pub label: String,
    pub color: Rgba,
}

impl From<&Marker> for ExportedMarker {
    fn from(marker: &Marker) -> Self {
        Self {
            id: marker.id,
            time: marker.time,
            label: marker.label.clone(),
            color: marker.color,
        }
    }
}

/// Top-level export document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportedTimeline {
    /// Timeline span in seconds.
    pub duration: f64,
    pub segments: Vec<ExportedSegment>,
    pub markers: Vec<ExportedMarker>,
}

impl ExportedTimeline {
    pub fn from_timeline(timeline: &Timeline) -> Self {
        Self {
            duration: timeline.total_duration(),
            segments: timeline.segments().iter().map(ExportedSegment::from).collect(),
            markers: timeline.markers().iter().map(ExportedMarker::from).collect(),
        }
    }
}

//! Debounced thumbnail regeneration.
//!
//! `ThumbnailScheduler` does NOT own a thread or call the player. It is a
//! polled timer: every structural edit restarts the quiet period, and once
//! it has elapsed [`ThumbnailScheduler::poll`] hands out one capture request
//! per segment lacking a thumbnail. Results come back through
//! [`ThumbnailScheduler::accept`], which drops anything stale.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use sl_common::{CaptureError, EditorConfig, SegmentId, Thumbnail};
use sl_timeline::Timeline;
use tracing::{debug, warn};

/// Default quiet period after the last edit.
pub const DEFAULT_THUMBNAIL_DEBOUNCE: Duration = Duration::from_millis(300);

/// Ask the player for the frame at `at_time` for one segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptureRequest {
    /// Matches the result to this request; a newer request for the same
    /// segment makes older tokens stale.
    pub token: u64,
    pub segment_id: SegmentId,
    /// Segment midpoint, clamped to the media.
    pub at_time: f64,
}

/// The player's answer to a [`CaptureRequest`].
#[derive(Clone, Debug)]
pub struct CaptureResult {
    pub token: u64,
    pub segment_id: SegmentId,
    pub frame: Result<Thumbnail, CaptureError>,
}

impl CaptureResult {
    pub fn new(request: &CaptureRequest, frame: Result<Thumbnail, CaptureError>) -> Self {
        Self {
            token: request.token,
            segment_id: request.segment_id,
            frame,
        }
    }
}

#[derive(Debug)]
pub struct ThumbnailScheduler {
    debounce: Duration,
    /// When the current quiet period ends. None when nothing is due.
    settle_deadline: Option<Instant>,
    /// Newest outstanding token per segment.
    pending: HashMap<SegmentId, u64>,
    next_token: u64,
}

impl Default for ThumbnailScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_THUMBNAIL_DEBOUNCE)
    }
}

impl ThumbnailScheduler {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            settle_deadline: None,
            pending: HashMap::new(),
            next_token: 1,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(Duration::from_millis(config.thumbnail_debounce_ms))
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Restart the quiet period.
    pub fn note_edit(&mut self, now: Instant) {
        self.settle_deadline = Some(now + self.debounce);
    }

    /// Whether a regeneration pass is scheduled.
    pub fn is_scheduled(&self) -> bool {
        self.settle_deadline.is_some()
    }

    /// Time until the scheduled pass, `Duration::ZERO` if already due.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.settle_deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Number of requests awaiting a result.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Forget everything (new media loaded).
    pub fn reset(&mut self) {
        self.settle_deadline = None;
        self.pending.clear();
    }

    /// Drop outstanding requests for segments whose bounds changed. A result
    /// captured at the old midpoint is then discarded on arrival and the
    /// segment is picked up again by the next pass.
    pub fn invalidate(&mut self, ids: &[SegmentId]) {
        let before = self.pending.len();
        self.pending.retain(|id, _| !ids.contains(id));
        let dropped = before - self.pending.len();
        if dropped > 0 {
            debug!(dropped, "Outstanding capture requests invalidated");
        }
    }

    /// Issue capture requests if the quiet period has elapsed.
    ///
    /// Requests come in segment order, one per segment without a
    /// thumbnail. A request for a segment that is already pending replaces
    /// the old one.
    pub fn poll(&mut self, now: Instant, timeline: &Timeline, media_duration: f64) -> Vec<CaptureRequest> {
        match self.settle_deadline {
            Some(deadline) if now >= deadline => self.settle_deadline = None,
            _ => return Vec::new(),
        }

        let limit = media_duration.max(0.0);
        let mut requests = Vec::new();
        for seg in timeline.segments().iter().filter(|s| s.thumbnail.is_none()) {
            let token = self.next_token;
            self.next_token += 1;
            if let Some(old) = self.pending.insert(seg.id, token) {
                debug!(id = %seg.id, old, token, "Capture request superseded");
            }
            requests.push(CaptureRequest {
                token,
                segment_id: seg.id,
                at_time: seg.midpoint().clamp(0.0, limit),
            });
        }

        // Pending entries for segments that no longer exist can never be
        // applied.
        self.pending.retain(|id, _| timeline.get(*id).is_some());

        debug!(requests = requests.len(), "Thumbnail pass issued");
        requests
    }

    /// Apply a capture result. Returns whether a thumbnail was attached.
    ///
    /// Results with an outdated token or for a segment that no longer exists
    /// are discarded. A failed capture is logged and leaves the segment
    /// without a thumbnail.
    pub fn accept(&mut self, result: CaptureResult, timeline: &mut Timeline) -> bool {
        let id = result.segment_id;
        if self.pending.get(&id) != Some(&result.token) {
            debug!(%id, token = result.token, "Stale capture result discarded");
            return false;
        }
        self.pending.remove(&id);

        match result.frame {
            Ok(thumbnail) => {
                if timeline.set_thumbnail(id, thumbnail) {
                    true
                } else {
                    debug!(%id, "Capture result for removed segment discarded");
                    false
                }
            }
            Err(e) => {
                warn!(%id, error = %e, "Thumbnail capture failed");
                false
            }
        }
    }
}

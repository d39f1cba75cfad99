//! Pointer drag state machine: `Idle → Dragging → Idle`.
//!
//! Each pointer sample is applied to the timeline as it was when the gesture
//! started, using the cumulative pixel offset from the press position. The
//! result replaces the live timeline wholesale, so rounding never
//! accumulates across samples.

use sl_common::SegmentId;
use sl_timeline::{CoordinateMapper, Coverage, SnapSettings, Timeline};
use tracing::debug;

/// What the pointer grabbed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragKind {
    /// Segment body: translate the whole segment.
    Move { id: SegmentId },
    /// Left edge of a segment.
    TrimStart { id: SegmentId },
    /// Right edge of a segment.
    TrimEnd { id: SegmentId },
    /// Handle between two adjacent segments.
    Boundary { left: SegmentId, right: SegmentId },
}

impl DragKind {
    /// History label for the committed gesture.
    pub fn label(&self) -> &'static str {
        match self {
            DragKind::Move { .. } => "Move segment",
            DragKind::TrimStart { .. } => "Trim start",
            DragKind::TrimEnd { .. } => "Trim end",
            DragKind::Boundary { .. } => "Move boundary",
        }
    }

    /// Segments grabbed by the pointer. Their own edges are not snap targets.
    pub fn targets(&self) -> Vec<SegmentId> {
        match *self {
            DragKind::Move { id } | DragKind::TrimStart { id } | DragKind::TrimEnd { id } => {
                vec![id]
            }
            DragKind::Boundary { left, right } => vec![left, right],
        }
    }

    /// Validation applied when the gesture is committed. Moves are settled
    /// into a partition on release; boundary moves keep whatever coverage
    /// the timeline had; free trims may leave gaps or overlaps.
    pub fn coverage(&self, origin: &Timeline) -> Coverage {
        match self {
            DragKind::Move { .. } => Coverage::Partition,
            DragKind::Boundary { .. } if origin.is_partition() => Coverage::Partition,
            _ => Coverage::Loose,
        }
    }
}

/// An active gesture.
#[derive(Clone, Debug)]
pub struct DragSession {
    pub kind: DragKind,
    /// Timeline at pointer-down.
    pub origin: Timeline,
    /// Pointer x at pointer-down (viewport pixels).
    pub origin_x: f64,
}

#[derive(Clone, Debug, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Result of releasing a gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct DragOutcome {
    pub kind: DragKind,
    /// Segments whose bounds differ from pointer-down. Empty means the
    /// gesture changed nothing and must not be committed.
    pub changed: Vec<SegmentId>,
    /// How the released timeline must be validated.
    pub coverage: Coverage,
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn active_kind(&self) -> Option<DragKind> {
        match &self.state {
            DragState::Dragging(session) => Some(session.kind),
            DragState::Idle => None,
        }
    }

    /// Start a gesture. Refused while another gesture is active, for
    /// unknown or locked segments, and for boundary handles between
    /// segments that are not neighbours.
    pub fn begin(&mut self, kind: DragKind, x: f64, timeline: &Timeline) -> bool {
        if self.is_dragging() {
            debug!(?kind, "Drag refused: another gesture is active");
            return false;
        }
        for id in kind.targets() {
            match timeline.get(id) {
                Some(seg) if seg.locked => {
                    debug!(%id, "Drag refused: segment is locked");
                    return false;
                }
                Some(_) => {}
                None => {
                    debug!(%id, "Drag refused: unknown segment");
                    return false;
                }
            }
        }
        if let DragKind::Boundary { left, right } = kind {
            if timeline.adjacent_pair(left, right).is_none() {
                debug!(%left, %right, "Drag refused: segments are not adjacent");
                return false;
            }
        }

        debug!(?kind, x, "Drag started");
        self.state = DragState::Dragging(DragSession {
            kind,
            origin: timeline.clone(),
            origin_x: x,
        });
        true
    }

    /// Apply a pointer sample. Writes the proposed timeline into `live`.
    pub fn update(
        &mut self,
        x: f64,
        mapper: &CoordinateMapper,
        snap: &SnapSettings,
        live: &mut Timeline,
    ) -> bool {
        let DragState::Dragging(session) = &self.state else {
            return false;
        };
        if !x.is_finite() {
            return false;
        }

        let dt = mapper.delta_to_time(x - session.origin_x);
        let origin = &session.origin;
        let refs = origin.snap_candidates(&session.kind.targets());
        let mut next = origin.clone();

        match session.kind {
            DragKind::Move { id } => {
                let Some(seg) = origin.get(id) else {
                    return false;
                };
                let start = seg.start() + dt;
                let snapped_start = snap.resolve(start, &refs);
                let target = if snapped_start != start {
                    snapped_start
                } else {
                    // The leading edge did not snap; try the trailing one.
                    snap.resolve(start + seg.duration(), &refs) - seg.duration()
                };
                next.move_segment(id, target);
            }
            DragKind::TrimStart { id } => {
                let Some(seg) = origin.get(id) else {
                    return false;
                };
                next.trim_start(id, snap.resolve(seg.start() + dt, &refs));
            }
            DragKind::TrimEnd { id } => {
                let Some(seg) = origin.get(id) else {
                    return false;
                };
                next.trim_end(id, snap.resolve(seg.end() + dt, &refs));
            }
            DragKind::Boundary { left, right } => {
                let Some(seg) = origin.get(left) else {
                    return false;
                };
                next.move_boundary(left, right, snap.resolve(seg.end() + dt, &refs));
            }
        }

        *live = next;
        true
    }

    /// Finish the gesture. Moves are settled into a back-to-back order.
    pub fn release(&mut self, live: &mut Timeline) -> Option<DragOutcome> {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        if matches!(session.kind, DragKind::Move { .. }) && *live != session.origin {
            live.settle();
        }

        let changed = changed_bounds(&session.origin, live);
        debug!(kind = ?session.kind, changed = changed.len(), "Drag released");
        Some(DragOutcome {
            kind: session.kind,
            changed,
            coverage: session.kind.coverage(&session.origin),
        })
    }

    /// Abort the gesture and put the pointer-down timeline back.
    pub fn cancel(&mut self, live: &mut Timeline) -> bool {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return false;
        };
        debug!(kind = ?session.kind, "Drag cancelled");
        *live = session.origin;
        true
    }
}

/// Ids of segments present in both timelines whose bounds differ.
pub fn changed_bounds(before: &Timeline, after: &Timeline) -> Vec<SegmentId> {
    after
        .segments()
        .iter()
        .filter(|seg| {
            before
                .get(seg.id)
                .is_some_and(|old| old.start() != seg.start() || old.end() != seg.end())
        })
        .map(|seg| seg.id)
        .collect()
}

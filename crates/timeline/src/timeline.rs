//! The segment model: an ordered, gapless partition of the timeline plus
//! point markers.
//!
//! Every operation mutates in place and reports what it did. Invalid requests
//! (locked targets, unknown ids, splits too close to an edge, non-contiguous
//! merges) leave the timeline untouched; out-of-range times are clamped.
//! Whether the result may be committed is decided by [`Timeline::validate`].

use serde::{Deserialize, Serialize};
use sl_common::{
    EditorConfig, MarkerId, Rgba, SegmentId, Thumbnail, MAX_SPEED, MIN_SEGMENT_DURATION, MIN_SPEED,
    TIME_EPSILON,
};
use tracing::debug;

use crate::segment::{Marker, Segment};

/// Numeric edit constraints shared by every operation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditLimits {
    /// Shortest allowed segment (seconds).
    pub min_duration: f64,
    /// Tolerance for contiguity checks (seconds).
    pub epsilon: f64,
    /// Range `set_speed` clamps to.
    pub min_speed: f64,
    pub max_speed: f64,
}

impl Default for EditLimits {
    fn default() -> Self {
        Self {
            min_duration: MIN_SEGMENT_DURATION,
            epsilon: TIME_EPSILON,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
        }
    }
}

impl EditLimits {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            min_duration: config.min_segment_duration,
            epsilon: config.time_epsilon,
            min_speed: config.min_speed,
            max_speed: config.max_speed,
        }
    }
}

/// Segments sorted by start, markers sorted by time, and the timeline span.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub(crate) segments: Vec<Segment>,
    pub(crate) markers: Vec<Marker>,
    pub(crate) total_duration: f64,
    #[serde(default)]
    pub(crate) limits: EditLimits,
}

impl Timeline {
    /// An empty timeline (no media loaded yet).
    pub fn new(limits: EditLimits) -> Self {
        Self {
            segments: Vec::new(),
            markers: Vec::new(),
            total_duration: 0.0,
            limits,
        }
    }

    /// Build a timeline from raw parts without checking anything.
    ///
    /// Used to restore history snapshots; callers that accept foreign data
    /// should run [`Timeline::validate`] afterwards.
    pub fn from_parts(
        segments: Vec<Segment>,
        markers: Vec<Marker>,
        total_duration: f64,
        limits: EditLimits,
    ) -> Self {
        Self {
            segments,
            markers,
            total_duration,
            limits,
        }
    }

    /// Reset to a single segment covering the whole media.
    pub fn initialize(&mut self, media_duration: f64) {
        self.markers.clear();
        if media_duration.is_finite() && media_duration > 0.0 {
            self.total_duration = media_duration;
            self.segments = vec![Segment::new(0.0, media_duration)];
        } else {
            self.total_duration = 0.0;
            self.segments.clear();
        }
        debug!(duration = self.total_duration, "Timeline initialized");
    }

    // -- Accessors --

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    pub fn limits(&self) -> EditLimits {
        self.limits
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment_ids(&self) -> Vec<SegmentId> {
        self.segments.iter().map(|s| s.id).collect()
    }

    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    pub fn index_of(&self, id: SegmentId) -> Option<usize> {
        self.segments.iter().position(|s| s.id == id)
    }

    /// The segment whose half-open range contains `time`.
    pub fn segment_at(&self, time: f64) -> Option<&Segment> {
        self.segments.iter().find(|s| s.contains(time))
    }

    /// Replace segments, markers and span (history restore).
    pub fn replace_contents(&mut self, segments: Vec<Segment>, markers: Vec<Marker>, total: f64) {
        self.segments = segments;
        self.markers = markers;
        self.total_duration = total;
    }

    // -- Structural edits --

    /// Split the segment containing `time` into two fresh segments.
    ///
    /// Returns the ids of the new left and right halves.
    pub fn split_at(&mut self, time: f64) -> Option<(SegmentId, SegmentId)> {
        if !time.is_finite() {
            return None;
        }
        let min = self.limits.min_duration;
        let index = self.segments.iter().position(|s| s.contains(time))?;
        let original = &self.segments[index];

        if original.locked {
            debug!(id = %original.id, "Split ignored: segment is locked");
            return None;
        }
        if time - original.start() < min || original.end() - time < min {
            debug!(id = %original.id, time, "Split ignored: too close to an edge");
            return None;
        }

        let mut left = original.fresh_copy();
        left.set_bounds(original.start(), time);
        let mut right = original.fresh_copy();
        right.set_bounds(time, original.end());

        let ids = (left.id, right.id);
        debug!(original = %original.id, time, left = %ids.0, right = %ids.1, "Segment split");
        self.segments.splice(index..=index, [left, right]);
        // The right half may start after an overlapping neighbour.
        self.sort_by_start();
        Some(ids)
    }

    /// Move the start edge of one segment. Neighbours are not adjusted, but
    /// the sequence is re-sorted when the new start passes one of them.
    pub fn trim_start(&mut self, id: SegmentId, new_start: f64) -> bool {
        let min = self.limits.min_duration;
        let Some(seg) = self.editable_mut(id) else {
            return false;
        };
        if !new_start.is_finite() {
            return false;
        }
        let hi = seg.end() - min;
        if hi < 0.0 {
            return false;
        }
        let start = new_start.clamp(0.0, hi);
        if start == seg.start() {
            return false;
        }
        let end = seg.end();
        seg.set_bounds(start, end);
        self.sort_by_start();
        true
    }

    /// Move the end edge of one segment. Neighbours are not adjusted.
    pub fn trim_end(&mut self, id: SegmentId, new_end: f64) -> bool {
        let min = self.limits.min_duration;
        let total = self.total_duration;
        let Some(seg) = self.editable_mut(id) else {
            return false;
        };
        if !new_end.is_finite() {
            return false;
        }
        let lo = seg.start() + min;
        if lo > total {
            return false;
        }
        let end = new_end.clamp(lo, total);
        if end == seg.end() {
            return false;
        }
        let start = seg.start();
        seg.set_bounds(start, end);
        true
    }

    /// Move the shared boundary of two adjacent segments, keeping coverage.
    pub fn move_boundary(&mut self, left: SegmentId, right: SegmentId, time: f64) -> bool {
        if !time.is_finite() {
            return false;
        }
        let Some((li, ri)) = self.adjacent_pair(left, right) else {
            debug!(%left, %right, "Boundary move ignored: segments are not adjacent");
            return false;
        };
        if self.segments[li].locked || self.segments[ri].locked {
            debug!(%left, %right, "Boundary move ignored: segment is locked");
            return false;
        }

        let min = self.limits.min_duration;
        let lo = self.segments[li].start() + min;
        let hi = self.segments[ri].end() - min;
        if lo > hi {
            return false;
        }
        let boundary = time.clamp(lo, hi);
        if boundary == self.segments[li].end() && boundary == self.segments[ri].start() {
            return false;
        }

        let left_start = self.segments[li].start();
        self.segments[li].set_bounds(left_start, boundary);
        let right_end = self.segments[ri].end();
        self.segments[ri].set_bounds(boundary, right_end);
        true
    }

    /// Indices of `left` and `right` if they are neighbours sharing a boundary.
    pub fn adjacent_pair(&self, left: SegmentId, right: SegmentId) -> Option<(usize, usize)> {
        let li = self.index_of(left)?;
        let ri = self.index_of(right)?;
        let touching =
            (self.segments[li].end() - self.segments[ri].start()).abs() <= self.limits.epsilon;
        (ri == li + 1 && touching).then_some((li, ri))
    }

    /// Translate a whole segment. Overlaps are left for the caller to resolve.
    pub fn move_segment(&mut self, id: SegmentId, new_start: f64) -> bool {
        let total = self.total_duration;
        let Some(seg) = self.editable_mut(id) else {
            return false;
        };
        if !new_start.is_finite() {
            return false;
        }
        let start = new_start.clamp(0.0, (total - seg.duration()).max(0.0));
        if start == seg.start() {
            return false;
        }
        seg.translate_to(start);
        true
    }

    /// Stable sort by start; ties keep their current order.
    pub fn sort_by_start(&mut self) {
        self.segments.sort_by(|a, b| a.start().total_cmp(&b.start()));
    }

    /// Sort by start, then lay segments back-to-back from zero.
    ///
    /// The timeline span becomes the sum of the segment durations.
    pub fn settle(&mut self) {
        self.sort_by_start();
        self.repack();
    }

    fn repack(&mut self) {
        let mut cursor = 0.0;
        for seg in &mut self.segments {
            seg.translate_to(cursor);
            cursor = seg.end();
        }
        self.total_duration = cursor;
    }

    /// Remove the selected, unlocked segments.
    ///
    /// With `ripple`, survivors are re-packed from zero so no gap remains and
    /// the timeline shrinks. Without it, survivors keep their positions.
    /// Refuses to remove every segment. Returns how many were removed.
    pub fn delete(&mut self, ids: &[SegmentId], ripple: bool) -> usize {
        let removable = self
            .segments
            .iter()
            .filter(|s| !s.locked && ids.contains(&s.id))
            .count();
        if removable == 0 {
            return 0;
        }
        if removable == self.segments.len() {
            debug!("Delete ignored: at least one segment must remain");
            return 0;
        }

        self.segments.retain(|s| s.locked || !ids.contains(&s.id));
        if ripple {
            self.settle();
        }
        debug!(removed = removable, ripple, "Segments deleted");
        removable
    }

    /// Merge the selected, unlocked segments into one.
    ///
    /// They must be neighbours whose edges touch. The result takes the first
    /// segment's color, label, prompt and mute state, with speed reset.
    pub fn merge(&mut self, ids: &[SegmentId]) -> Option<SegmentId> {
        let picked: Vec<usize> = self
            .segments
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.locked && ids.contains(&s.id))
            .map(|(i, _)| i)
            .collect();
        if picked.len() < 2 {
            return None;
        }

        let eps = self.limits.epsilon;
        for pair in picked.windows(2) {
            let (a, b) = (&self.segments[pair[0]], &self.segments[pair[1]]);
            if pair[1] != pair[0] + 1 || (a.end() - b.start()).abs() > eps {
                debug!(left = %a.id, right = %b.id, "Merge ignored: selection is not contiguous");
                return None;
            }
        }

        let first = picked[0];
        let last = picked[picked.len() - 1];
        let mut merged = self.segments[first].fresh_copy();
        merged.set_bounds(self.segments[first].start(), self.segments[last].end());
        merged.speed = 1.0;

        let id = merged.id;
        debug!(%id, count = picked.len(), start = merged.start(), end = merged.end(), "Segments merged");
        self.segments.splice(first..=last, [merged]);
        Some(id)
    }

    /// Append copies of the selected segments after the current end.
    pub fn duplicate(&mut self, ids: &[SegmentId]) -> Vec<SegmentId> {
        let sources: Vec<Segment> = self
            .segments
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect();
        self.append_copies(&sources)
    }

    /// Append copies of previously copied segments after the current end.
    pub fn paste(&mut self, clipboard: &[Segment]) -> Vec<SegmentId> {
        self.append_copies(clipboard)
    }

    /// Copies keep their offsets relative to the earliest source and land
    /// right after the furthest segment end. The span grows to cover them.
    fn append_copies(&mut self, sources: &[Segment]) -> Vec<SegmentId> {
        if sources.is_empty() {
            return Vec::new();
        }
        let base = sources
            .iter()
            .map(Segment::start)
            .fold(f64::INFINITY, f64::min);
        let tail = self
            .segments
            .iter()
            .map(Segment::end)
            .fold(0.0_f64, f64::max);
        let offset = tail - base;

        let mut copies: Vec<Segment> = sources
            .iter()
            .map(|src| {
                let mut copy = src.fresh_copy();
                copy.set_bounds(src.start() + offset, src.end() + offset);
                copy
            })
            .collect();
        copies.sort_by(|a, b| a.start().total_cmp(&b.start()));

        let ids: Vec<SegmentId> = copies.iter().map(|c| c.id).collect();
        self.segments.extend(copies);
        self.sort_by_start();
        self.recalculate_duration();
        debug!(count = ids.len(), offset, "Segments appended");
        ids
    }

    /// Grow the span to the furthest segment end (never shrinks).
    fn recalculate_duration(&mut self) {
        let max_end = self
            .segments
            .iter()
            .map(Segment::end)
            .fold(0.0_f64, f64::max);
        self.total_duration = self.total_duration.max(max_end);
    }

    /// Replace every segment with `n` equal fresh segments.
    pub fn redistribute_equal(&mut self, n: usize) -> bool {
        let total = self.total_duration;
        if n == 0 || total <= 0.0 {
            return false;
        }
        if self.segments.iter().any(|s| s.locked) {
            debug!(n, "Redistribute ignored: timeline has locked segments");
            return false;
        }
        let step = total / n as f64;
        if step < self.limits.min_duration {
            debug!(n, step, "Redistribute ignored: parts would be too short");
            return false;
        }

        self.segments = (0..n)
            .map(|i| {
                let start = i as f64 * step;
                let end = if i + 1 == n { total } else { (i + 1) as f64 * step };
                Segment::new(start, end)
            })
            .collect();
        debug!(n, step, "Timeline redistributed");
        true
    }

    // -- Bulk metadata --

    /// Flip the lock flag of every selected segment.
    pub fn toggle_lock(&mut self, ids: &[SegmentId]) -> usize {
        let mut changed = 0;
        for seg in self.segments.iter_mut().filter(|s| ids.contains(&s.id)) {
            seg.locked = !seg.locked;
            changed += 1;
        }
        changed
    }

    /// Flip the mute flag of every selected, unlocked segment.
    pub fn toggle_mute(&mut self, ids: &[SegmentId]) -> usize {
        let mut changed = 0;
        for seg in self
            .segments
            .iter_mut()
            .filter(|s| !s.locked && ids.contains(&s.id))
        {
            seg.muted = !seg.muted;
            changed += 1;
        }
        changed
    }

    /// Set the playback speed of every selected, unlocked segment.
    /// Clamped to the configured speed range; non-positive speeds are ignored.
    pub fn set_speed(&mut self, ids: &[SegmentId], speed: f64) -> usize {
        if !(speed.is_finite() && speed > 0.0) {
            return 0;
        }
        let speed = speed.clamp(self.limits.min_speed, self.limits.max_speed);
        let mut changed = 0;
        for seg in self
            .segments
            .iter_mut()
            .filter(|s| !s.locked && ids.contains(&s.id))
        {
            if seg.speed != speed {
                seg.speed = speed;
                changed += 1;
            }
        }
        changed
    }

    pub fn set_label(&mut self, id: SegmentId, label: impl Into<String>) -> bool {
        let label = label.into();
        match self.segments.iter_mut().find(|s| s.id == id) {
            Some(seg) if seg.label != label => {
                seg.label = label;
                true
            }
            _ => false,
        }
    }

    pub fn set_color(&mut self, id: SegmentId, color: Rgba) -> bool {
        match self.segments.iter_mut().find(|s| s.id == id) {
            Some(seg) if seg.color != color => {
                seg.color = color;
                true
            }
            _ => false,
        }
    }

    pub fn set_prompt(&mut self, id: SegmentId, prompt: impl Into<String>) -> bool {
        let prompt = prompt.into();
        match self.segments.iter_mut().find(|s| s.id == id) {
            Some(seg) if seg.prompt != prompt => {
                seg.prompt = prompt;
                true
            }
            _ => false,
        }
    }

    // -- Thumbnails --

    /// Attach a captured frame. Returns false if the segment no longer exists.
    pub fn set_thumbnail(&mut self, id: SegmentId, thumbnail: Thumbnail) -> bool {
        match self.segments.iter_mut().find(|s| s.id == id) {
            Some(seg) => {
                seg.thumbnail = Some(thumbnail);
                true
            }
            None => false,
        }
    }

    pub fn clear_thumbnails(&mut self, ids: &[SegmentId]) {
        for seg in self.segments.iter_mut().filter(|s| ids.contains(&s.id)) {
            seg.thumbnail = None;
        }
    }

    // -- Markers --

    /// Add a marker, clamping its time into the timeline.
    pub fn add_marker(&mut self, time: f64, label: impl Into<String>, color: Rgba) -> MarkerId {
        let time = if time.is_finite() {
            time.clamp(0.0, self.total_duration.max(0.0))
        } else {
            0.0
        };
        let mut marker = Marker::new(time, label);
        marker.color = color;
        let id = marker.id;

        let at = self.markers.partition_point(|m| m.time <= time);
        self.markers.insert(at, marker);
        debug!(%id, time, "Marker added");
        id
    }

    pub fn remove_marker(&mut self, id: MarkerId) -> Option<Marker> {
        let index = self.markers.iter().position(|m| m.id == id)?;
        Some(self.markers.remove(index))
    }

    pub fn rename_marker(&mut self, id: MarkerId, label: impl Into<String>) -> bool {
        match self.markers.iter_mut().find(|m| m.id == id) {
            Some(marker) => {
                marker.label = label.into();
                true
            }
            None => false,
        }
    }

    // -- Snapping --

    /// Sorted, de-duplicated snap targets: every segment edge (except those
    /// of `exclude`) and every marker time.
    pub fn snap_candidates(&self, exclude: &[SegmentId]) -> Vec<f64> {
        let mut times: Vec<f64> = self
            .segments
            .iter()
            .filter(|s| !exclude.contains(&s.id))
            .flat_map(|s| [s.start(), s.end()])
            .chain(self.markers.iter().map(|m| m.time))
            .collect();
        times.sort_by(f64::total_cmp);
        times.dedup();
        times
    }

    fn editable_mut(&mut self, id: SegmentId) -> Option<&mut Segment> {
        let seg = self.segments.iter_mut().find(|s| s.id == id)?;
        if seg.locked {
            debug!(%id, "Edit ignored: segment is locked");
            return None;
        }
        Some(seg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn make_timeline(duration: f64) -> Timeline {
        let mut tl = Timeline::new(EditLimits::default());
        tl.initialize(duration);
        tl
    }

    /// 90 s timeline split at 30 and 60.
    fn three_way() -> (Timeline, [SegmentId; 3]) {
        let mut tl = make_timeline(90.0);
        tl.split_at(30.0).unwrap();
        tl.split_at(60.0).unwrap();
        let ids = tl.segment_ids();
        (tl, [ids[0], ids[1], ids[2]])
    }

    fn bounds(tl: &Timeline) -> Vec<(f64, f64)> {
        tl.segments().iter().map(|s| (s.start(), s.end())).collect()
    }

    #[test]
    fn initialize_creates_single_segment() {
        let tl = make_timeline(42.0);
        assert_eq!(bounds(&tl), vec![(0.0, 42.0)]);
        assert_eq!(tl.total_duration(), 42.0);
    }

    #[test]
    fn initialize_with_zero_duration_is_empty() {
        let tl = make_timeline(0.0);
        assert!(tl.is_empty());
        assert_eq!(tl.total_duration(), 0.0);
    }

    #[test]
    fn split_creates_two_fresh_segments() {
        let mut tl = make_timeline(90.0);
        let original = tl.segments()[0].id;
        tl.set_label(original, "Shot");

        let (left, right) = tl.split_at(30.0).unwrap();
        assert_eq!(bounds(&tl), vec![(0.0, 30.0), (30.0, 90.0)]);
        assert_ne!(left, original);
        assert_ne!(right, original);
        assert_eq!(tl.get(left).unwrap().label, "Shot");
        assert_eq!(tl.get(right).unwrap().label, "Shot");
    }

    #[test]
    fn split_clears_thumbnail() {
        let mut tl = make_timeline(10.0);
        let id = tl.segments()[0].id;
        tl.set_thumbnail(id, Thumbnail::new(vec![0; 4], 1, 1).unwrap());
        tl.split_at(5.0).unwrap();
        assert!(tl.segments().iter().all(|s| s.thumbnail.is_none()));
    }

    #[test]
    fn split_near_edge_is_noop() {
        let mut tl = make_timeline(10.0);
        assert!(tl.split_at(0.05).is_none());
        assert!(tl.split_at(9.95).is_none());
        assert!(tl.split_at(10.0).is_none());
        assert!(tl.split_at(-1.0).is_none());
        assert_eq!(tl.len(), 1);
    }

    #[test]
    fn split_locked_is_noop() {
        let mut tl = make_timeline(10.0);
        let id = tl.segments()[0].id;
        tl.toggle_lock(&[id]);
        assert!(tl.split_at(5.0).is_none());
        assert_eq!(tl.len(), 1);
    }

    #[test]
    fn trim_start_clamps_to_min_duration() {
        let (mut tl, [a, ..]) = three_way();
        assert!(tl.trim_start(a, 29.99));
        let seg = tl.get(a).unwrap();
        assert!((seg.start() - 29.9).abs() < EPS);
        assert!((seg.duration() - 0.1).abs() < EPS);
    }

    #[test]
    fn trim_start_clamps_to_zero() {
        let (mut tl, [_, b, _]) = three_way();
        assert!(tl.trim_start(b, -20.0));
        assert_eq!(tl.get(b).unwrap().start(), 0.0);
    }

    #[test]
    fn trim_end_clamps_to_total() {
        let (mut tl, [_, b, _]) = three_way();
        assert!(tl.trim_end(b, 500.0));
        assert_eq!(tl.get(b).unwrap().end(), 90.0);
    }

    #[test]
    fn trim_does_not_touch_neighbours() {
        let (mut tl, [a, b, _]) = three_way();
        assert!(tl.trim_end(a, 25.0));
        assert_eq!(tl.get(a).unwrap().end(), 25.0);
        assert_eq!(tl.get(b).unwrap().start(), 30.0);
    }

    #[test]
    fn trim_locked_is_noop() {
        let (mut tl, [_, b, _]) = three_way();
        tl.toggle_lock(&[b]);
        let before = tl.clone();
        assert!(!tl.trim_start(b, 35.0));
        assert!(!tl.trim_end(b, 50.0));
        assert_eq!(tl, before);
    }

    #[test]
    fn move_boundary_keeps_coverage() {
        let (mut tl, [a, b, _]) = three_way();
        assert!(tl.move_boundary(a, b, 20.0));
        assert_eq!(bounds(&tl), vec![(0.0, 20.0), (20.0, 60.0), (60.0, 90.0)]);
    }

    #[test]
    fn move_boundary_clamps_to_neighbour_minimum() {
        let (mut tl, [a, b, _]) = three_way();
        assert!(tl.move_boundary(a, b, 100.0));
        let right = tl.get(b).unwrap();
        assert!((right.start() - 59.9).abs() < EPS);
        assert!((right.duration() - 0.1).abs() < EPS);
        assert_eq!(tl.get(a).unwrap().end(), right.start());
    }

    #[test]
    fn move_boundary_requires_adjacency() {
        let (mut tl, [a, _, c]) = three_way();
        assert!(!tl.move_boundary(a, c, 45.0));
        assert!(!tl.move_boundary(c, a, 45.0));
    }

    #[test]
    fn move_boundary_rejects_locked() {
        let (mut tl, [a, b, _]) = three_way();
        tl.toggle_lock(&[a]);
        assert!(!tl.move_boundary(a, b, 20.0));
        assert_eq!(tl.get(a).unwrap().end(), 30.0);
    }

    #[test]
    fn move_segment_preserves_duration_and_clamps() {
        let (mut tl, [a, ..]) = three_way();
        assert!(tl.move_segment(a, 75.0));
        let seg = tl.get(a).unwrap();
        assert_eq!(seg.start(), 60.0);
        assert_eq!(seg.end(), 90.0);

        assert!(tl.move_segment(a, -5.0));
        assert_eq!(tl.get(a).unwrap().start(), 0.0);
    }

    #[test]
    fn settle_reorders_and_repacks() {
        let (mut tl, [a, b, c]) = three_way();
        tl.move_segment(a, 50.0);
        tl.settle();
        assert_eq!(tl.segment_ids(), vec![b, a, c]);
        assert_eq!(bounds(&tl), vec![(0.0, 30.0), (30.0, 60.0), (60.0, 90.0)]);
        assert!((tl.total_duration() - 90.0).abs() < EPS);
    }

    #[test]
    fn sort_is_stable_for_equal_starts() {
        let mut tl = make_timeline(10.0);
        let first = tl.segments()[0].id;
        let mut twin = Segment::new(0.0, 10.0);
        twin.label = "twin".into();
        let twin_id = twin.id;
        tl.segments.push(twin);
        tl.sort_by_start();
        assert_eq!(tl.segment_ids(), vec![first, twin_id]);
    }

    #[test]
    fn ripple_delete_repacks() {
        let (mut tl, [a, b, c]) = three_way();
        assert_eq!(tl.delete(&[b], true), 1);
        assert_eq!(tl.segment_ids(), vec![a, c]);
        assert_eq!(bounds(&tl), vec![(0.0, 30.0), (30.0, 60.0)]);
        assert_eq!(tl.total_duration(), 60.0);
    }

    #[test]
    fn plain_delete_leaves_gap() {
        let (mut tl, [a, b, c]) = three_way();
        assert_eq!(tl.delete(&[b], false), 1);
        assert_eq!(tl.segment_ids(), vec![a, c]);
        assert_eq!(bounds(&tl), vec![(0.0, 30.0), (60.0, 90.0)]);
        assert_eq!(tl.total_duration(), 90.0);
    }

    #[test]
    fn delete_skips_locked_and_keeps_one() {
        let (mut tl, [a, b, c]) = three_way();
        tl.toggle_lock(&[a]);
        assert_eq!(tl.delete(&[a, b, c], true), 2);
        assert_eq!(tl.segment_ids(), vec![a]);

        let mut single = make_timeline(10.0);
        let only = single.segments()[0].id;
        assert_eq!(single.delete(&[only], true), 0);
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn merge_contiguous() {
        let (mut tl, [a, b, c]) = three_way();
        tl.set_color(a, [1.0, 0.0, 0.0, 1.0]);
        tl.set_speed(&[a], 2.0);
        let merged = tl.merge(&[b, a]).unwrap();
        assert_eq!(bounds(&tl), vec![(0.0, 60.0), (60.0, 90.0)]);
        let seg = tl.get(merged).unwrap();
        assert_eq!(seg.color, [1.0, 0.0, 0.0, 1.0]);
        assert!((seg.speed - 1.0).abs() < EPS);
        assert_eq!(tl.segment_ids()[1], c);
    }

    #[test]
    fn merge_non_contiguous_is_noop() {
        let (mut tl, [a, _, c]) = three_way();
        let before = tl.clone();
        assert!(tl.merge(&[a, c]).is_none());
        assert_eq!(tl, before);
    }

    #[test]
    fn merge_skips_locked_member() {
        let (mut tl, [a, b, c]) = three_way();
        tl.toggle_lock(&[b]);
        assert!(tl.merge(&[a, b, c]).is_none());
        assert_eq!(tl.len(), 3);
    }

    #[test]
    fn merge_needs_two_segments() {
        let (mut tl, [a, ..]) = three_way();
        assert!(tl.merge(&[a]).is_none());
    }

    #[test]
    fn duplicate_appends_after_end() {
        let (mut tl, [a, b, _]) = three_way();
        tl.set_label(a, "A");
        let ids = tl.duplicate(&[a, b]);
        assert_eq!(ids.len(), 2);
        assert_eq!(tl.len(), 5);
        assert_eq!(bounds(&tl)[3..], [(90.0, 120.0), (120.0, 150.0)]);
        assert_eq!(tl.total_duration(), 150.0);
        let copy = tl.get(ids[0]).unwrap();
        assert_eq!(copy.label, "A");
        assert!(copy.thumbnail.is_none());
    }

    #[test]
    fn duplicate_preserves_relative_offsets() {
        let (mut tl, [a, _, c]) = three_way();
        let ids = tl.duplicate(&[c, a]);
        let first = tl.get(ids[0]).unwrap();
        let second = tl.get(ids[1]).unwrap();
        assert_eq!((first.start(), first.end()), (90.0, 120.0));
        assert_eq!((second.start(), second.end()), (150.0, 180.0));
    }

    #[test]
    fn paste_uses_clipboard_copies() {
        let (mut tl, [a, ..]) = three_way();
        let clipboard = vec![tl.get(a).unwrap().clone()];
        let ids = tl.paste(&clipboard);
        assert_eq!(ids.len(), 1);
        assert_ne!(ids[0], a);
        let pasted = tl.get(ids[0]).unwrap();
        assert_eq!((pasted.start(), pasted.end()), (90.0, 120.0));
        assert!(tl.paste(&[]).is_empty());
    }

    #[test]
    fn toggle_mute_and_speed_skip_locked() {
        let (mut tl, [a, b, _]) = three_way();
        tl.toggle_lock(&[a]);
        assert_eq!(tl.toggle_mute(&[a, b]), 1);
        assert!(!tl.get(a).unwrap().muted);
        assert!(tl.get(b).unwrap().muted);

        assert_eq!(tl.set_speed(&[a, b], 2.0), 1);
        assert!((tl.get(b).unwrap().speed - 2.0).abs() < EPS);
        assert!((tl.get(a).unwrap().speed - 1.0).abs() < EPS);
    }

    #[test]
    fn set_speed_clamps_and_rejects_invalid() {
        let (mut tl, [a, ..]) = three_way();
        assert_eq!(tl.set_speed(&[a], 0.0), 0);
        assert_eq!(tl.set_speed(&[a], f64::NAN), 0);
        assert_eq!(tl.set_speed(&[a], 100.0), 1);
        assert!((tl.get(a).unwrap().speed - 16.0).abs() < EPS);
    }

    #[test]
    fn redistribute_equal_parts() {
        let mut tl = make_timeline(90.0);
        assert!(tl.redistribute_equal(3));
        assert_eq!(bounds(&tl), vec![(0.0, 30.0), (30.0, 60.0), (60.0, 90.0)]);
        assert!(!tl.redistribute_equal(0));
        assert!(!tl.redistribute_equal(10_000));
    }

    #[test]
    fn redistribute_refuses_with_locked_segment() {
        let (mut tl, [a, ..]) = three_way();
        tl.toggle_lock(&[a]);
        assert!(!tl.redistribute_equal(5));
        assert_eq!(tl.len(), 3);
    }

    #[test]
    fn markers_are_sorted_and_clamped() {
        let mut tl = make_timeline(60.0);
        let late = tl.add_marker(100.0, "late", [1.0; 4]);
        let early = tl.add_marker(5.0, "early", [1.0; 4]);
        let times: Vec<f64> = tl.markers().iter().map(|m| m.time).collect();
        assert_eq!(times, vec![5.0, 60.0]);

        assert!(tl.rename_marker(early, "intro"));
        assert_eq!(tl.markers()[0].label, "intro");
        assert!(tl.remove_marker(late).is_some());
        assert!(tl.remove_marker(late).is_none());
    }

    #[test]
    fn snap_candidates_exclude_segment() {
        let (mut tl, [a, b, _]) = three_way();
        tl.add_marker(24.97, "beat", [1.0; 4]);
        assert_eq!(tl.snap_candidates(&[]), vec![0.0, 24.97, 30.0, 60.0, 90.0]);
        assert_eq!(tl.snap_candidates(&[a, b]), vec![24.97, 60.0, 90.0]);
    }

    #[test]
    fn thumbnail_for_missing_segment_is_rejected() {
        let mut tl = make_timeline(10.0);
        let thumb = Thumbnail::new(vec![0; 4], 1, 1).unwrap();
        assert!(!tl.set_thumbnail(SegmentId::new(), thumb.clone()));
        let id = tl.segments()[0].id;
        assert!(tl.set_thumbnail(id, thumb));
        tl.clear_thumbnails(&[id]);
        assert!(tl.get(id).unwrap().thumbnail.is_none());
    }

    #[test]
    fn trim_start_past_neighbour_keeps_order() {
        let (mut tl, [a, b, c]) = three_way();
        assert!(tl.trim_start(c, 10.0));
        assert_eq!(tl.segment_ids(), vec![a, c, b]);
        assert_eq!(bounds(&tl), vec![(0.0, 30.0), (10.0, 90.0), (30.0, 60.0)]);
        assert!(tl.validate(crate::validate::Coverage::Loose).is_ok());
        assert!(!tl.is_partition());
    }

    #[test]
    fn split_inside_overlap_keeps_order() {
        let (mut tl, [_, b, c]) = three_way();
        tl.trim_start(c, 40.0);
        // b = [30, 60) now overlaps c = [40, 90); 50 falls in b first.
        let (left, right) = tl.split_at(50.0).unwrap();
        assert_eq!(tl.get(left).unwrap().start(), 30.0);
        assert_eq!(tl.get(right).unwrap().start(), 50.0);
        assert_eq!(tl.index_of(c).unwrap() + 1, tl.index_of(right).unwrap());
        assert!(tl.get(b).is_none());
        assert!(tl.validate(crate::validate::Coverage::Loose).is_ok());
    }

    #[test]
    fn set_speed_uses_configured_range() {
        let config = EditorConfig {
            min_speed: 0.5,
            max_speed: 4.0,
            ..EditorConfig::default()
        };
        let mut tl = Timeline::new(EditLimits::from_config(&config));
        tl.initialize(10.0);
        let id = tl.segment_ids()[0];
        assert_eq!(tl.set_speed(&[id], 8.0), 1);
        assert!((tl.get(id).unwrap().speed - 4.0).abs() < EPS);
        assert_eq!(tl.set_speed(&[id], 0.2), 1);
        assert!((tl.get(id).unwrap().speed - 0.5).abs() < EPS);
    }
}

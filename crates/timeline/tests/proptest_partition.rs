//! Property-based tests for the segment model, snapping and coordinate
//! mapping.

use proptest::prelude::*;
use sl_timeline::{resolve_snap, Coverage, CoordinateMapper, EditLimits, Timeline};

#[derive(Debug, Clone)]
enum Op {
    Split(f64),
    Boundary(usize, f64),
    RippleDelete(usize),
    Merge(usize),
    MoveAndSettle(usize, f64),
    Redistribute(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0.0f64..1.0).prop_map(Op::Split),
        2 => (any::<usize>(), 0.0f64..1.0).prop_map(|(i, f)| Op::Boundary(i, f)),
        1 => any::<usize>().prop_map(Op::RippleDelete),
        1 => any::<usize>().prop_map(Op::Merge),
        2 => (any::<usize>(), 0.0f64..1.0).prop_map(|(i, f)| Op::MoveAndSettle(i, f)),
        1 => (0usize..12).prop_map(Op::Redistribute),
    ]
}

/// Apply one partition-preserving operation. Fractions are relative to the
/// current total so the generated times stay meaningful as it changes.
fn apply(tl: &mut Timeline, op: &Op) {
    let total = tl.total_duration();
    let ids = tl.segment_ids();
    match *op {
        Op::Split(f) => {
            tl.split_at(f * total);
        }
        Op::Boundary(i, f) => {
            if ids.len() >= 2 {
                let i = i % (ids.len() - 1);
                tl.move_boundary(ids[i], ids[i + 1], f * total);
            }
        }
        Op::RippleDelete(i) => {
            tl.delete(&[ids[i % ids.len()]], true);
        }
        Op::Merge(i) => {
            if ids.len() >= 2 {
                let i = i % (ids.len() - 1);
                tl.merge(&[ids[i], ids[i + 1]]);
            }
        }
        Op::MoveAndSettle(i, f) => {
            tl.move_segment(ids[i % ids.len()], f * total);
            tl.settle();
        }
        Op::Redistribute(n) => {
            tl.redistribute_equal(n);
        }
    }
}

/// Edits that may legitimately leave gaps or overlaps, mixed with the
/// partition-preserving ones.
#[derive(Debug, Clone)]
enum LooseOp {
    Structural(Op),
    TrimStart(usize, f64),
    TrimEnd(usize, f64),
    Delete(usize),
    Duplicate(usize),
}

fn loose_op_strategy() -> impl Strategy<Value = LooseOp> {
    prop_oneof![
        4 => op_strategy().prop_map(LooseOp::Structural),
        2 => (any::<usize>(), 0.0f64..1.0).prop_map(|(i, f)| LooseOp::TrimStart(i, f)),
        2 => (any::<usize>(), 0.0f64..1.0).prop_map(|(i, f)| LooseOp::TrimEnd(i, f)),
        1 => any::<usize>().prop_map(LooseOp::Delete),
        1 => any::<usize>().prop_map(LooseOp::Duplicate),
    ]
}

fn apply_loose(tl: &mut Timeline, op: &LooseOp) {
    let total = tl.total_duration();
    let ids = tl.segment_ids();
    match *op {
        LooseOp::Structural(ref op) => apply(tl, op),
        LooseOp::TrimStart(i, f) => {
            tl.trim_start(ids[i % ids.len()], f * total);
        }
        LooseOp::TrimEnd(i, f) => {
            tl.trim_end(ids[i % ids.len()], f * total);
        }
        LooseOp::Delete(i) => {
            tl.delete(&[ids[i % ids.len()]], false);
        }
        LooseOp::Duplicate(i) => {
            tl.duplicate(&[ids[i % ids.len()]]);
        }
    }
}

proptest! {
    /// Every partition-preserving operation keeps the segments tiling
    /// `[0, total]` with no segment shorter than the minimum.
    #[test]
    fn partition_holds_after_structural_edits(
        duration in 1.0f64..600.0,
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let mut tl = Timeline::new(EditLimits::default());
        tl.initialize(duration);

        for op in &ops {
            apply(&mut tl, op);
            let checked = tl.validate(Coverage::Partition);
            prop_assert!(checked.is_ok(), "{:?} after {:?}", checked, op);
        }
    }

    /// Free trims, plain deletes and duplicates never break the per-segment
    /// rules: sorted, in bounds, and no shorter than the minimum.
    #[test]
    fn loose_rules_hold_after_any_edit(
        duration in 1.0f64..600.0,
        ops in prop::collection::vec(loose_op_strategy(), 1..40),
    ) {
        let mut tl = Timeline::new(EditLimits::default());
        tl.initialize(duration);

        for op in &ops {
            apply_loose(&mut tl, op);
            let checked = tl.validate(Coverage::Loose);
            prop_assert!(checked.is_ok(), "{:?} after {:?}", checked, op);
        }
    }

    /// Splitting then merging the two halves restores the original span.
    #[test]
    fn merge_undoes_split(duration in 1.0f64..600.0, f in 0.01f64..0.99) {
        let mut tl = Timeline::new(EditLimits::default());
        tl.initialize(duration);
        if let Some((left, right)) = tl.split_at(f * duration) {
            let merged = tl.merge(&[left, right]).unwrap();
            let seg = tl.get(merged).unwrap();
            prop_assert!(seg.start().abs() < 1e-3);
            prop_assert!((seg.end() - duration).abs() < 1e-3);
            prop_assert!((seg.duration() - duration).abs() < 1e-3);
        }
    }

    /// A snap happens exactly when some reference is within the threshold.
    #[test]
    fn snap_only_within_threshold(
        candidate in 0.0f64..100.0,
        refs in prop::collection::vec(0.0f64..100.0, 0..12),
        threshold in 0.0f64..2.0,
    ) {
        let mut refs = refs;
        refs.sort_by(f64::total_cmp);
        let snapped = resolve_snap(candidate, &refs, threshold, true);
        let in_range = refs.iter().any(|r| (r - candidate).abs() <= threshold);
        if in_range {
            prop_assert!(refs.contains(&snapped));
            prop_assert!((snapped - candidate).abs() <= threshold);
        } else {
            prop_assert_eq!(snapped, candidate);
        }
    }

    /// Pixel and time conversions invert each other for in-range times.
    #[test]
    fn mapper_inverse(
        total in 1.0f64..3600.0,
        f in 0.0f64..=1.0,
        zoom in 0usize..10,
    ) {
        let mut mapper = CoordinateMapper::default();
        mapper.set_total_duration(total);
        mapper.set_zoom_index(zoom);
        let t = f * total;
        let back = mapper.pixel_to_time(mapper.time_to_pixel(t));
        prop_assert!((back - t).abs() < 1e-6 * total.max(1.0));
    }
}

//! Structural checks run before a timeline state is committed to history.

use crate::error::InvariantViolation;
use crate::timeline::Timeline;

/// How strictly segment coverage is checked.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Coverage {
    /// Segments must tile `[0, total]` exactly with no gap or overlap.
    Partition,
    /// Per-segment rules only. Used after edits that may legitimately leave
    /// gaps or overlaps (free trim, plain delete, appended copies).
    Loose,
}

impl Timeline {
    /// Check the committed-state rules for the given coverage mode.
    ///
    /// Always checked: at least one segment, sorted starts, bounds within
    /// `[0, total]`, stored durations matching their span, and a minimum
    /// length for every segment (a sole segment is exempt so very short
    /// media stays editable).
    pub fn validate(&self, coverage: Coverage) -> Result<(), InvariantViolation> {
        let eps = self.limits.epsilon;
        let min = self.limits.min_duration;
        let total = self.total_duration;

        if self.segments.is_empty() {
            return Err(InvariantViolation::Empty);
        }

        let sole = self.segments.len() == 1;
        for (index, seg) in self.segments.iter().enumerate() {
            let actual = seg.end() - seg.start();
            if (seg.duration() - actual).abs() > eps {
                return Err(InvariantViolation::StaleDuration {
                    id: seg.id,
                    stored: seg.duration(),
                    actual,
                });
            }
            if seg.start() < -eps || seg.end() > total + eps || seg.start() >= seg.end() {
                return Err(InvariantViolation::OutOfBounds {
                    id: seg.id,
                    start: seg.start(),
                    end: seg.end(),
                    total,
                });
            }
            if !sole && actual < min - eps {
                return Err(InvariantViolation::TooShort {
                    id: seg.id,
                    duration: actual,
                    min,
                });
            }
            if index > 0 && self.segments[index - 1].start() > seg.start() {
                return Err(InvariantViolation::Unsorted { index });
            }
        }

        if coverage == Coverage::Loose {
            return Ok(());
        }

        let first = &self.segments[0];
        if first.start().abs() > eps {
            return Err(InvariantViolation::StartsAfterZero {
                start: first.start(),
            });
        }

        for pair in self.segments.windows(2) {
            let (left, right) = (&pair[0], &pair[1]);
            let diff = right.start() - left.end();
            if diff > eps {
                return Err(InvariantViolation::Gap {
                    left: left.id,
                    right: right.id,
                    end: left.end(),
                    next_start: right.start(),
                });
            }
            if diff < -eps {
                return Err(InvariantViolation::Overlap {
                    left: left.id,
                    right: right.id,
                    end: left.end(),
                    next_start: right.start(),
                });
            }
        }

        let last_end = self.segments[self.segments.len() - 1].end();
        if (last_end - total).abs() > eps {
            return Err(InvariantViolation::EndMismatch {
                end: last_end,
                total,
            });
        }

        Ok(())
    }

    /// Shorthand for `validate(Coverage::Partition).is_ok()`.
    pub fn is_partition(&self) -> bool {
        self.validate(Coverage::Partition).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Segment;
    use crate::timeline::EditLimits;

    fn make_timeline(parts: &[(f64, f64)], total: f64) -> Timeline {
        let segments = parts.iter().map(|&(s, e)| Segment::new(s, e)).collect();
        Timeline::from_parts(segments, Vec::new(), total, EditLimits::default())
    }

    #[test]
    fn accepts_exact_partition() {
        let tl = make_timeline(&[(0.0, 30.0), (30.0, 60.0), (60.0, 90.0)], 90.0);
        assert_eq!(tl.validate(Coverage::Partition), Ok(()));
        assert!(tl.is_partition());
    }

    #[test]
    fn accepts_boundaries_within_epsilon() {
        let tl = make_timeline(&[(0.0, 30.0005), (30.0, 90.0)], 90.0);
        assert!(tl.is_partition());
    }

    #[test]
    fn rejects_empty() {
        let tl = make_timeline(&[], 0.0);
        assert_eq!(tl.validate(Coverage::Loose), Err(InvariantViolation::Empty));
    }

    #[test]
    fn detects_gap_and_overlap() {
        let gap = make_timeline(&[(0.0, 30.0), (40.0, 90.0)], 90.0);
        assert!(matches!(
            gap.validate(Coverage::Partition),
            Err(InvariantViolation::Gap { .. })
        ));
        assert_eq!(gap.validate(Coverage::Loose), Ok(()));

        let overlap = make_timeline(&[(0.0, 50.0), (40.0, 90.0)], 90.0);
        assert!(matches!(
            overlap.validate(Coverage::Partition),
            Err(InvariantViolation::Overlap { .. })
        ));
    }

    #[test]
    fn detects_start_and_end_mismatch() {
        let late = make_timeline(&[(1.0, 90.0)], 90.0);
        assert!(matches!(
            late.validate(Coverage::Partition),
            Err(InvariantViolation::StartsAfterZero { .. })
        ));

        let short = make_timeline(&[(0.0, 80.0)], 90.0);
        assert!(matches!(
            short.validate(Coverage::Partition),
            Err(InvariantViolation::EndMismatch { .. })
        ));
    }

    #[test]
    fn detects_unsorted() {
        let tl = make_timeline(&[(30.0, 90.0), (0.0, 30.0)], 90.0);
        assert_eq!(
            tl.validate(Coverage::Loose),
            Err(InvariantViolation::Unsorted { index: 1 })
        );
    }

    #[test]
    fn detects_too_short_unless_sole() {
        let tl = make_timeline(&[(0.0, 0.05), (0.05, 10.0)], 10.0);
        assert!(matches!(
            tl.validate(Coverage::Partition),
            Err(InvariantViolation::TooShort { .. })
        ));

        let sole = make_timeline(&[(0.0, 0.05)], 0.05);
        assert!(sole.is_partition());
    }

    #[test]
    fn detects_out_of_bounds() {
        let tl = make_timeline(&[(0.0, 30.0), (30.0, 95.0)], 90.0);
        assert!(matches!(
            tl.validate(Coverage::Loose),
            Err(InvariantViolation::OutOfBounds { .. })
        ));
    }
}

//! Error types for timeline validation.

use sl_common::SegmentId;
use thiserror::Error;

/// A committed sequence broke one of the structural rules.
///
/// These indicate a bug in an edit operation, never bad user input: user
/// input is clamped or ignored before it reaches the model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("Timeline has no segments")]
    Empty,

    #[error("First segment starts at {start:.3}s instead of 0")]
    StartsAfterZero { start: f64 },

    #[error("Last segment ends at {end:.3}s, timeline duration is {total:.3}s")]
    EndMismatch { end: f64, total: f64 },

    #[error("Gap between {left} (ends {end:.3}s) and {right} (starts {next_start:.3}s)")]
    Gap {
        left: SegmentId,
        right: SegmentId,
        end: f64,
        next_start: f64,
    },

    #[error("Overlap between {left} (ends {end:.3}s) and {right} (starts {next_start:.3}s)")]
    Overlap {
        left: SegmentId,
        right: SegmentId,
        end: f64,
        next_start: f64,
    },

    #[error("Segments out of order at index {index}")]
    Unsorted { index: usize },

    #[error("Segment {id} [{start:.3}, {end:.3}] lies outside [0, {total:.3}]")]
    OutOfBounds {
        id: SegmentId,
        start: f64,
        end: f64,
        total: f64,
    },

    #[error("Segment {id} is {duration:.3}s long, minimum is {min:.3}s")]
    TooShort { id: SegmentId, duration: f64, min: f64 },

    #[error("Segment {id} stores duration {stored:.6}s but spans {actual:.6}s")]
    StaleDuration {
        id: SegmentId,
        stored: f64,
        actual: f64,
    },
}

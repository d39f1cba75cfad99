//! `sl-timeline` — The segment model of the Splitline timeline editor.
//!
//! A [`Timeline`] is one ordered sequence of segments that together cover the
//! loaded media, plus point markers. This crate provides:
//!
//! - **Segment model**: split, trim, boundary moves, moves, delete, merge,
//!   duplicate/paste, bulk metadata, equal redistribution
//! - **Validation**: the partition rules checked before every commit
//! - **Snapping**: resolving dragged times onto nearby edges and markers
//! - **Coordinates**: pixel/time conversion at any zoom and scroll offset
//!
//! # Usage
//!
//! ```rust
//! use sl_timeline::{Coverage, EditLimits, Timeline};
//!
//! let mut timeline = Timeline::new(EditLimits::default());
//! timeline.initialize(90.0);
//! let (left, right) = timeline.split_at(30.0).unwrap();
//! timeline.merge(&[left, right]).unwrap();
//! assert!(timeline.validate(Coverage::Partition).is_ok());
//! ```

pub mod coords;
pub mod error;
pub mod segment;
pub mod snap;
pub mod timeline;
pub mod validate;

// Re-export primary API
pub use coords::CoordinateMapper;
pub use error::InvariantViolation;
pub use segment::{Marker, Segment};
pub use snap::{resolve as resolve_snap, SnapSettings};
pub use timeline::{EditLimits, Timeline};
pub use validate::Coverage;

//! `sl-project` — Timeline export for the Splitline editor.
//!
//! The only artifact the editor writes is a metadata description of the cut:
//! timeline duration, segment ranges and markers. There is no import path.
//!
//! - **Export model**: `ExportedTimeline` built from a `Timeline`
//! - **Serialization**: pretty or compact JSON
//! - **Save**: atomic write to disk (temp file + rename)
//!
//! # Usage
//!
//! ```rust,no_run
//! use sl_project::{save_export, ExportedTimeline};
//! use sl_timeline::{EditLimits, Timeline};
//! use std::path::Path;
//!
//! let mut timeline = Timeline::new(EditLimits::default());
//! timeline.initialize(90.0);
//!
//! let export = ExportedTimeline::from_timeline(&timeline);
//! save_export(&export, Path::new("timeline.json")).unwrap();
//! ```

pub mod error;
pub mod export;
pub mod save;

// Re-export primary API at crate root
pub use error::{ProjectError, ProjectResult};
pub use export::{ExportedMarker, ExportedSegment, ExportedTimeline};
pub use save::{save_export, to_json_string, to_json_string_compact};

//! `sl-common` — Shared types, traits, and errors for the Splitline timeline editor.
//!
//! This crate is the foundation that all other editor crates depend on.
//! It defines:
//!
//! - **Types**: `TimeCode`, `SegmentId`, `MarkerId`, `Rgba`
//! - **Player**: the `Player` capability trait, `PlayerEvent`, `Thumbnail`
//! - **Errors**: `CaptureError`, `ConfigError` (thiserror-based)
//! - **Config**: `EditorConfig` and the edit-constraint constants

pub mod config;
pub mod error;
pub mod player;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    EditorConfig, DEFAULT_HISTORY_LIMIT, DEFAULT_SNAP_THRESHOLD, MAX_SPEED, MIN_SEGMENT_DURATION,
    MIN_SPEED, TIME_EPSILON, ZOOM_LADDER,
};
pub use error::{CaptureError, ConfigError};
pub use player::{Player, PlayerEvent, Thumbnail};
pub use types::{MarkerId, Rgba, SegmentId, TimeCode, DEFAULT_MARKER_COLOR, DEFAULT_SEGMENT_COLOR};

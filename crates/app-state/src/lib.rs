//! `sl-app-state` -- Editor state management for the Splitline timeline editor.
//!
//! This crate provides:
//!
//! - **`TimelineState`**: the state context owned by one editor (timeline, selection, playback, viewport, snap, clipboard).
//! - **`HistoryManager`**: cursor-based undo/redo over committed snapshots, with batch support for gestures.
//! - **`TimelineSnapshot`**: deep copy of segments, markers and span used by history.
//! - **`SelectionState`**: ordered segment selection.
//! - **`PlaybackState`**: playhead, play/pause mirror, volume and the loop region.
//!
//! # Architecture
//!
//! ```text
//! TimelineState (editor context)
//! ├── timeline: Timeline             (segments, markers, span)
//! ├── media_duration: f64            (player-facing clamp)
//! ├── selection: SelectionState      (what's selected)
//! ├── playback: PlaybackState        (playhead, loop region)
//! ├── mapper: CoordinateMapper       (zoom/scroll)
//! ├── snap: SnapSettings
//! └── clipboard: Vec<Segment>
//!
//! HistoryManager
//! ├── entries: Vec<HistoryEntry>     (committed snapshots)
//! ├── cursor                         (entry on screen)
//! └── batch support                  (one entry per gesture)
//! ```

pub mod history;
pub mod playback;
pub mod selection;
pub mod snapshot;
pub mod state;

// Re-export primary types at crate root for convenience.
pub use history::{HistoryEntry, HistoryManager};
pub use playback::{LoopRegion, PlaybackMode, PlaybackState};
pub use selection::SelectionState;
pub use snapshot::TimelineSnapshot;
pub use state::TimelineState;

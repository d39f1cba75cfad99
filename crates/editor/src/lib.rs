//! `sl-editor` — The Splitline timeline editor.
//!
//! [`TimelineEditor`] owns the editor state and a [`Player`](sl_common::Player)
//! and exposes every user-level operation: structural edits, metadata,
//! markers, undo/redo, pointer gestures, playback and view control, and
//! export. Each discrete operation is validated and committed to history
//! once; a drag gesture commits once on release.
//!
//! ```text
//! host input ──► EditorCommand / pointer_* ──► TimelineEditor
//!                                               ├── TimelineState
//!                                               ├── HistoryManager
//!                                               ├── DragController
//!                                               └── ThumbnailScheduler ──► Player::capture_frame
//! ```

pub mod commands;
pub mod drag;
pub mod editor;
pub mod thumbnail;

pub use commands::EditorCommand;
pub use drag::{changed_bounds, DragController, DragKind, DragOutcome, DragState};
pub use editor::TimelineEditor;
pub use thumbnail::{CaptureRequest, CaptureResult, ThumbnailScheduler, DEFAULT_THUMBNAIL_DEBOUNCE};

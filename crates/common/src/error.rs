//! Shared error types (thiserror-based).

use thiserror::Error;

/// Failures reported by the external player when asked for a still frame.
///
/// All of these are non-fatal to the editor: the affected segment simply
/// stays without a thumbnail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptureError {
    #[error("No media loaded")]
    NoMedia,

    #[error("Seek to {time:.3}s failed: {reason}")]
    SeekFailed { time: f64, reason: String },

    #[error("Frame capture failed: {0}")]
    CaptureFailed(String),

    #[error("Invalid frame: expected {expected} bytes, got {got}")]
    InvalidFrame { expected: usize, got: usize },
}

/// Invalid editor configuration values.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("Zoom ladder must be non-empty and strictly increasing")]
    InvalidZoomLadder,

    #[error("Default zoom index {index} is outside the ladder (len {len})")]
    ZoomIndexOutOfRange { index: usize, len: usize },

    #[error("Speed range is inverted: min {min} > max {max}")]
    InvalidSpeedRange { min: f64, max: f64 },

    #[error("History limit must be at least 1")]
    EmptyHistory,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

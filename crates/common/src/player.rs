//! Video player capability.
//!
//! The editor core never decodes video itself. Everything it needs from the
//! playback/rendering subsystem goes through the [`Player`] trait, and
//! everything the player reports back arrives as a [`PlayerEvent`].

use std::sync::Arc;

use crate::error::CaptureError;

/// A captured still frame (RGBA8, row-major).
///
/// Pixel data is shared, so cloning a thumbnail (and every history snapshot
/// that holds one) is cheap.
#[derive(Clone, Debug, PartialEq)]
pub struct Thumbnail {
    rgba: Arc<[u8]>,
    width: u32,
    height: u32,
}

impl Thumbnail {
    /// Wrap raw RGBA bytes. The buffer length must be `width * height * 4`.
    pub fn new(rgba: Vec<u8>, width: u32, height: u32) -> Result<Self, CaptureError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(CaptureError::InvalidFrame {
                expected,
                got: rgba.len(),
            });
        }
        Ok(Self {
            rgba: rgba.into(),
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Byte size of the pixel data.
    pub fn byte_size(&self) -> usize {
        self.rgba.len()
    }
}

/// Notifications from the player.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerEvent {
    /// Playback position changed (seconds).
    TimeUpdate(f64),
    /// Media metadata is available; carries the media duration in seconds.
    LoadedMetadata { duration: f64 },
    Play,
    Pause,
}

/// The playback/decoding subsystem as seen by the editor.
pub trait Player {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Seek to `time` seconds.
    fn set_current_time(&mut self, time: f64);

    /// Media duration in seconds (0 until metadata is loaded).
    fn duration(&self) -> f64;

    fn play(&mut self);

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    /// Set output volume, `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);

    /// Render the frame at `at_time` into a still image.
    fn capture_frame(&mut self, at_time: f64) -> Result<Thumbnail, CaptureError>;
}

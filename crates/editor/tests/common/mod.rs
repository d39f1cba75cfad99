//! Shared fixtures for editor integration tests.

#![allow(dead_code)]

use sl_common::{CaptureError, EditorConfig, Player, PlayerEvent, Thumbnail};
use sl_editor::TimelineEditor;

/// In-memory player that records what the editor asked of it.
#[derive(Debug, Default)]
pub struct FakePlayer {
    pub time: f64,
    pub duration: f64,
    pub paused: bool,
    pub volume: f32,
    pub fail_capture: bool,
    pub captures: Vec<f64>,
}

impl FakePlayer {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            paused: true,
            volume: 1.0,
            ..Self::default()
        }
    }
}

impl Player for FakePlayer {
    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, time: f64) {
        self.time = time;
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn play(&mut self) {
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn capture_frame(&mut self, at_time: f64) -> Result<Thumbnail, CaptureError> {
        self.captures.push(at_time);
        if self.fail_capture {
            return Err(CaptureError::CaptureFailed("decoder busy".into()));
        }
        Thumbnail::new(vec![128; 4 * 4 * 4], 4, 4)
    }
}

/// Editor with media of `duration` seconds loaded.
pub fn make_editor(duration: f64) -> TimelineEditor<FakePlayer> {
    make_editor_with(duration, EditorConfig::default())
}

pub fn make_editor_with(duration: f64, config: EditorConfig) -> TimelineEditor<FakePlayer> {
    let mut editor = TimelineEditor::new(FakePlayer::new(duration), config).unwrap();
    editor.handle_player_event(PlayerEvent::LoadedMetadata { duration });
    editor
}

/// 10 pixels per second on a 90 second timeline.
pub fn make_config_10px() -> EditorConfig {
    EditorConfig {
        base_width_px: 900.0,
        ..EditorConfig::default()
    }
}

pub fn bounds(editor: &TimelineEditor<FakePlayer>) -> Vec<(f64, f64)> {
    editor
        .timeline()
        .segments()
        .iter()
        .map(|s| (s.start(), s.end()))
        .collect()
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

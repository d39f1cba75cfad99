//! Conversion between timeline seconds and pixels at the current zoom and
//! scroll position.
//!
//! Two pixel spaces are used:
//!
//! - **content** pixels run from 0 to [`CoordinateMapper::width`] across the
//!   whole timeline;
//! - **viewport** pixels are content pixels minus the scroll offset, i.e.
//!   what a pointer event reports relative to the visible area.

use serde::{Deserialize, Serialize};
use sl_common::{EditorConfig, ZOOM_LADDER};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoordinateMapper {
    base_width: f64,
    viewport_width: f64,
    ladder: Vec<f64>,
    zoom_index: usize,
    scroll_offset: f64,
    total_duration: f64,
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::new(1000.0, ZOOM_LADDER.to_vec(), 2)
    }
}

impl CoordinateMapper {
    /// Mapper whose viewport is as wide as the timeline at zoom 1.0.
    ///
    /// An empty ladder falls back to a single 1.0 step; `zoom_index` is
    /// clamped to the ladder.
    pub fn new(base_width: f64, ladder: Vec<f64>, zoom_index: usize) -> Self {
        let ladder = if ladder.is_empty() { vec![1.0] } else { ladder };
        let zoom_index = zoom_index.min(ladder.len() - 1);
        Self {
            base_width,
            viewport_width: base_width,
            ladder,
            zoom_index,
            scroll_offset: 0.0,
            total_duration: 0.0,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(
            config.base_width_px,
            config.zoom_ladder.clone(),
            config.default_zoom_index,
        )
    }

    // -- Accessors --

    pub fn zoom_index(&self) -> usize {
        self.zoom_index
    }

    pub fn zoom_factor(&self) -> f64 {
        self.ladder[self.zoom_index]
    }

    /// Full timeline width in content pixels.
    pub fn width(&self) -> f64 {
        self.base_width * self.zoom_factor()
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    pub fn set_total_duration(&mut self, total: f64) {
        self.total_duration = if total.is_finite() { total.max(0.0) } else { 0.0 };
        self.clamp_scroll();
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.viewport_width = width;
            self.clamp_scroll();
        }
    }

    // -- Conversions --

    /// Content pixel to seconds, clamped to `[0, total]`.
    pub fn pixel_to_time(&self, px: f64) -> f64 {
        if self.total_duration <= 0.0 {
            return 0.0;
        }
        (px / self.width().max(1.0) * self.total_duration).clamp(0.0, self.total_duration)
    }

    /// Seconds to content pixel. Not clamped.
    pub fn time_to_pixel(&self, time: f64) -> f64 {
        time / self.total_duration.max(1.0) * self.width()
    }

    /// Pixel distance to seconds, signed and unclamped. Used for drag deltas.
    pub fn delta_to_time(&self, dx: f64) -> f64 {
        if self.total_duration <= 0.0 {
            return 0.0;
        }
        dx / self.width().max(1.0) * self.total_duration
    }

    pub fn viewport_to_time(&self, x: f64) -> f64 {
        self.pixel_to_time(x + self.scroll_offset)
    }

    pub fn time_to_viewport(&self, time: f64) -> f64 {
        self.time_to_pixel(time) - self.scroll_offset
    }

    // -- Zoom --

    /// Select a ladder step; out-of-range indices clamp to the ends.
    /// Returns whether the zoom changed.
    pub fn set_zoom_index(&mut self, index: usize) -> bool {
        let index = index.min(self.ladder.len() - 1);
        if index == self.zoom_index {
            return false;
        }
        self.zoom_index = index;
        self.clamp_scroll();
        debug!(zoom = self.zoom_factor(), "Zoom changed");
        true
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom_index(self.zoom_index + 1)
    }

    pub fn zoom_out(&mut self) -> bool {
        match self.zoom_index.checked_sub(1) {
            Some(index) => self.set_zoom_index(index),
            None => false,
        }
    }

    // -- Scroll --

    pub fn max_scroll(&self) -> f64 {
        (self.width() - self.viewport_width).max(0.0)
    }

    pub fn scroll_to(&mut self, offset: f64) {
        if offset.is_finite() {
            self.scroll_offset = offset.clamp(0.0, self.max_scroll());
        }
    }

    pub fn scroll_by(&mut self, dx: f64) {
        self.scroll_to(self.scroll_offset + dx);
    }

    /// Scroll the minimum amount needed for `time` to be inside the viewport.
    /// Returns whether the offset changed.
    pub fn scroll_to_reveal(&mut self, time: f64) -> bool {
        let px = self.time_to_pixel(time);
        let before = self.scroll_offset;
        if px < self.scroll_offset {
            self.scroll_to(px);
        } else if px > self.scroll_offset + self.viewport_width {
            self.scroll_to(px - self.viewport_width);
        }
        self.scroll_offset != before
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll());
    }
}

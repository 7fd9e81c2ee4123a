//! Screen to canvas coordinate transform.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Scale percentage that corresponds to "100%" in the UI.
pub const DEFAULT_SCALE_PERCENT: f64 = 100.0;

/// View transform between screen and canvas space.
///
/// Two zoom factors are kept apart: `scale_percent` is the user-facing
/// canvas zoom (Ctrl +/-), `zoom` is the secondary pan/zoom factor applied
/// after the pan offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Screen position of the canvas element's top-left corner.
    pub canvas_origin: Point,
    /// Overall canvas zoom in percent.
    pub scale_percent: f64,
    /// Pan translation, in screen units divided by the scale factor.
    pub pan_offset: Vec2,
    /// Secondary zoom factor.
    pub zoom: f64,
    pub min_scale_percent: f64,
    pub max_scale_percent: f64,
    pub scale_step: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            canvas_origin: Point::ZERO,
            scale_percent: DEFAULT_SCALE_PERCENT,
            pan_offset: Vec2::ZERO,
            zoom: 1.0,
            min_scale_percent: 50.0,
            max_scale_percent: 200.0,
            scale_step: 10.0,
        }
    }
}

impl ViewTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// The scale percentage as a multiplier.
    pub fn scale_factor(&self) -> f64 {
        self.scale_percent / 100.0
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        let scale = self.scale_factor();
        Point::new(
            ((screen.x - self.canvas_origin.x) / scale - self.pan_offset.x) / self.zoom,
            ((screen.y - self.canvas_origin.y) / scale - self.pan_offset.y) / self.zoom,
        )
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        let scale = self.scale_factor();
        Point::new(
            (canvas.x * self.zoom + self.pan_offset.x) * scale + self.canvas_origin.x,
            (canvas.y * self.zoom + self.pan_offset.y) * scale + self.canvas_origin.y,
        )
    }

    /// Pan by a raw screen-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.pan_offset += delta;
    }

    /// Set the scale percentage, clamped to the allowed range.
    /// Non-finite or non-positive values are ignored.
    pub fn set_scale_percent(&mut self, percent: f64) {
        if !(percent.is_finite() && percent > 0.0) {
            log::warn!("ignoring scale percent {}", percent);
            return;
        }
        // max() then min() so an inverted range cannot panic.
        self.scale_percent = percent.max(self.min_scale_percent).min(self.max_scale_percent);
    }

    /// Set the secondary zoom factor. Non-finite or non-positive values are
    /// ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom;
        } else {
            log::warn!("ignoring zoom {}", zoom);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_scale_percent(self.scale_percent + self.scale_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale_percent(self.scale_percent - self.scale_step);
    }

    /// Reset the scale percentage to 100%.
    pub fn reset_scale(&mut self) {
        self.scale_percent = DEFAULT_SCALE_PERCENT;
    }
}

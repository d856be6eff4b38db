//! Viewport and coordinate transformation for the 2D plan.
//!
//! Handles conversion between container pixels (where pointer events land),
//! stage pixels (the unscaled drawing space) and floor pixels (stage pixels
//! relative to the floor's top-left corner). The stage is scaled down to fit
//! the container but never scaled up.
//!
//! Unlike a CAD canvas the plan keeps screen orientation: +Y points down in
//! every space, matching the room's depth axis.

use std::fmt;

use kitchenplan_core::constants::{DEFAULT_FLOOR_MARGIN_PX, FALLBACK_PLAN_SIZE};

/// Fit-to-container transform of the plan stage.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanViewport {
    scale: f64,
    margin_px: f64,
    container_width: f64,
    container_height: f64,
    fallback: (f64, f64),
}

impl PlanViewport {
    /// Creates a viewport with the floor offset by `margin_px` on the stage.
    pub fn new(margin_px: f64, fallback: (f64, f64)) -> Self {
        Self {
            scale: 1.0,
            margin_px,
            container_width: fallback.0,
            container_height: fallback.1,
            fallback,
        }
    }

    /// Current stage scale (at most 1.0).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn margin_px(&self) -> f64 {
        self.margin_px
    }

    /// Stage size, which always equals the container size.
    pub fn stage_size(&self) -> (f64, f64) {
        (self.container_width, self.container_height)
    }

    /// Sets the container dimensions (typically called when the window
    /// resizes). A zero or invalid dimension falls back to the default.
    pub fn set_container_size(&mut self, width: f64, height: f64) {
        let usable = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };
        self.container_width = usable(width, self.fallback.0);
        self.container_height = usable(height, self.fallback.1);
    }

    /// Fits a floor of the given plan-pixel size, plus margins on every
    /// side, into the container.
    ///
    /// Formula:
    /// ```text
    /// scale = min(1, container_w / (floor_w + 2m), container_h / (floor_h + 2m))
    /// ```
    pub fn fit_to_floor(&mut self, floor_width_px: f64, floor_height_px: f64) {
        let content_w = floor_width_px + 2.0 * self.margin_px;
        let content_h = floor_height_px + 2.0 * self.margin_px;

        let mut scale: f64 = 1.0;
        if content_w > 0.0 {
            scale = scale.min(self.container_width / content_w);
        }
        if content_h > 0.0 {
            scale = scale.min(self.container_height / content_h);
        }
        self.scale = scale;
    }

    /// Converts container pixel coordinates to floor pixel coordinates.
    ///
    /// Formula:
    /// ```text
    /// floor_x = pixel_x / scale - margin
    /// floor_y = pixel_y / scale - margin
    /// ```
    pub fn pixel_to_floor(&self, pixel_x: f64, pixel_y: f64) -> (f64, f64) {
        (
            pixel_x / self.scale - self.margin_px,
            pixel_y / self.scale - self.margin_px,
        )
    }

    /// Converts floor pixel coordinates to container pixel coordinates.
    pub fn floor_to_pixel(&self, floor_x: f64, floor_y: f64) -> (f64, f64) {
        (
            (floor_x + self.margin_px) * self.scale,
            (floor_y + self.margin_px) * self.scale,
        )
    }

    /// Converts floor pixel coordinates to (unscaled) stage coordinates.
    pub fn floor_to_stage(&self, floor_x: f64, floor_y: f64) -> (f64, f64) {
        (floor_x + self.margin_px, floor_y + self.margin_px)
    }
}

impl Default for PlanViewport {
    fn default() -> Self {
        Self::new(DEFAULT_FLOOR_MARGIN_PX, FALLBACK_PLAN_SIZE)
    }
}

impl fmt::Display for PlanViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scale: {:.0}%, Stage: {}x{}",
            self.scale * 100.0,
            self.container_width,
            self.container_height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_scales_up() {
        let mut viewport = PlanViewport::default();
        viewport.set_container_size(2000.0, 2000.0);
        viewport.fit_to_floor(600.0, 400.0);
        assert_eq!(viewport.scale(), 1.0);
    }

    #[test]
    fn test_fits_limiting_axis() {
        let mut viewport = PlanViewport::default();
        viewport.set_container_size(340.0, 1000.0);
        // 600 + 40 = 640 wide content into 340 px
        viewport.fit_to_floor(600.0, 400.0);
        assert!((viewport.scale() - 340.0 / 640.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_container_uses_fallback() {
        let mut viewport = PlanViewport::default();
        viewport.set_container_size(0.0, f64::NAN);
        assert_eq!(viewport.stage_size(), (800.0, 400.0));
    }

    #[test]
    fn test_pixel_floor_round_trip() {
        let mut viewport = PlanViewport::default();
        viewport.set_container_size(320.0, 200.0);
        viewport.fit_to_floor(600.0, 400.0);

        let (fx, fy) = viewport.pixel_to_floor(100.0, 50.0);
        let (px, py) = viewport.floor_to_pixel(fx, fy);
        assert!((px - 100.0).abs() < 1e-9);
        assert!((py - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_floor_origin_sits_at_margin() {
        let viewport = PlanViewport::default();
        assert_eq!(viewport.pixel_to_floor(20.0, 20.0), (0.0, 0.0));
        assert_eq!(viewport.floor_to_stage(0.0, 0.0), (20.0, 20.0));
        assert_eq!(viewport.to_string(), "Scale: 100%, Stage: 800x400");
    }
}

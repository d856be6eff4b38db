//! Unit conversion utilities
//!
//! Converts between the three linear unit spaces used by the planner:
//! millimeters (canonical model), plan pixels (2D surface) and scene
//! meters (3D world). Conversions never round; rounding is the caller's
//! policy.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PX_PER_MM, METERS_PER_MM};

/// Linear transform between millimeters, plan pixels and scene meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitTransform {
    /// Plan pixels per millimeter (S)
    px_per_mm: f64,
}

impl UnitTransform {
    /// Create a transform with a custom plan scale.
    ///
    /// Non-finite or non-positive scales fall back to the default so the
    /// inverse conversions stay defined.
    pub fn new(px_per_mm: f64) -> Self {
        if px_per_mm.is_finite() && px_per_mm > 0.0 {
            Self { px_per_mm }
        } else {
            tracing::warn!(
                "Ignoring invalid plan scale {}, using {}",
                px_per_mm,
                DEFAULT_PX_PER_MM
            );
            Self::default()
        }
    }

    /// Plan pixels per millimeter.
    pub fn px_per_mm(&self) -> f64 {
        self.px_per_mm
    }

    pub fn mm_to_px(&self, mm: f64) -> f64 {
        mm * self.px_per_mm
    }

    pub fn px_to_mm(&self, px: f64) -> f64 {
        px / self.px_per_mm
    }

    pub fn mm_to_m(&self, mm: f64) -> f64 {
        mm * METERS_PER_MM
    }

    pub fn m_to_mm(&self, m: f64) -> f64 {
        m / METERS_PER_MM
    }
}

impl Default for UnitTransform {
    fn default() -> Self {
        Self {
            px_per_mm: DEFAULT_PX_PER_MM,
        }
    }
}

/// Clamp `value` into `[min, max]`, flooring at `min` when `max < min`.
///
/// Unlike [`f64::clamp`] this never panics: a room smaller than an item
/// yields a negative upper bound, and the coordinate then settles on `min`.
pub fn clamp_floor(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Parse a room dimension typed by the user, in millimeters.
///
/// Empty, non-numeric, non-finite and negative input all become `0.0`.
pub fn parse_dimension(input: &str) -> f64 {
    let input = input.trim();
    if input.is_empty() {
        return 0.0;
    }

    match input.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        Ok(value) => {
            tracing::debug!("Dimension {} out of range, using 0", value);
            0.0
        }
        Err(e) => {
            tracing::debug!("Dimension '{}' is not a number ({}), using 0", input, e);
            0.0
        }
    }
}

/// Format a plain number the way the plan labels show it (`600`, `612.5`).
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Format a millimeter length for dimension labels (`1200 mm`).
pub fn format_mm(value_mm: f64) -> String {
    format!("{} mm", format_number(value_mm))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scale() {
        let units = UnitTransform::default();
        assert_eq!(units.px_per_mm(), 0.5);
        assert_eq!(units.mm_to_px(600.0), 300.0);
        assert_eq!(units.px_to_mm(20.0), 40.0);
    }

    #[test]
    fn test_meters() {
        let units = UnitTransform::default();
        assert!((units.mm_to_m(1200.0) - 1.2).abs() < 1e-12);
        assert!((units.m_to_mm(0.72) - 720.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_scale_falls_back() {
        assert_eq!(UnitTransform::new(0.0), UnitTransform::default());
        assert_eq!(UnitTransform::new(-1.0), UnitTransform::default());
        assert_eq!(UnitTransform::new(f64::NAN), UnitTransform::default());
        assert_eq!(UnitTransform::new(2.0).px_per_mm(), 2.0);
    }

    #[test]
    fn test_clamp_floor() {
        assert_eq!(clamp_floor(50.0, 0.0, 100.0), 50.0);
        assert_eq!(clamp_floor(-5.0, 0.0, 100.0), 0.0);
        assert_eq!(clamp_floor(150.0, 0.0, 100.0), 100.0);
        // Upper bound below the lower bound floors at min
        assert_eq!(clamp_floor(300.0, 0.0, -100.0), 0.0);
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("1200"), 1200.0);
        assert_eq!(parse_dimension("  800.5 "), 800.5);
        assert_eq!(parse_dimension(""), 0.0);
        assert_eq!(parse_dimension("abc"), 0.0);
        assert_eq!(parse_dimension("NaN"), 0.0);
        assert_eq!(parse_dimension("inf"), 0.0);
        assert_eq!(parse_dimension("-40"), 0.0);
    }

    #[test]
    fn test_format_labels() {
        assert_eq!(format_mm(1200.0), "1200 mm");
        assert_eq!(format_mm(612.5), "612.5 mm");
        assert_eq!(format_number(600.0), "600");
    }
}

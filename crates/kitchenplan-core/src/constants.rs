//! Application-wide constants.
//!
//! Defaults shared by the settings crate and the layout engine. Every value
//! here can be overridden through `kitchenplan_settings::Config`.

/// Plan pixels per millimeter (2 mm = 1 px).
pub const DEFAULT_PX_PER_MM: f64 = 0.5;

/// Scene meters per millimeter. Fixed, not configurable.
pub const METERS_PER_MM: f64 = 0.001;

/// Snap grid step of the 2D plan, in plan pixels.
pub const DEFAULT_GRID_PX: f64 = 20.0;

/// Offset of the floor rectangle from the plan stage origin, in plan pixels.
pub const DEFAULT_FLOOR_MARGIN_PX: f64 = 20.0;

/// Room size used when nothing else is configured.
pub const DEFAULT_ROOM_WIDTH_MM: f64 = 1200.0;
pub const DEFAULT_ROOM_DEPTH_MM: f64 = 800.0;

/// Item height used by the 3D scene when a template does not specify one.
pub const DEFAULT_ITEM_HEIGHT_MM: f64 = 720.0;

/// Scene walls.
pub const DEFAULT_WALL_HEIGHT_M: f64 = 2.7;
pub const DEFAULT_WALL_THICKNESS_M: f64 = 0.05;

/// Fallback container sizes when a view reports a zero-sized surface.
pub const FALLBACK_PLAN_SIZE: (f64, f64) = (800.0, 400.0);
pub const FALLBACK_SCENE_SIZE: (f64, f64) = (800.0, 520.0);

/// File name used when an export target is a directory.
pub const DEFAULT_EXPORT_FILE: &str = "plan.json";

/// Upper bound on plan grid lines per axis; a denser grid is not drawn.
pub const MAX_GRID_LINES: usize = 4096;

//! Configuration management for KitchenPlan
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML files; the default location is the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Room defaults (initial width/depth)
//! - 2D plan view (scale, grid, margins)
//! - 3D scene (item height default, walls, camera)
//! - Drag policies per view
//! - Spawn position for new items

use kitchenplan_core::constants::*;
pub use kitchenplan_core::types::{DragPolicy, ViewKind};
use kitchenplan_core::UnitTransform;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult, SettingsResult};

/// Initial room size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomSettings {
    pub width_mm: f64,
    pub depth_mm: f64,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            width_mm: DEFAULT_ROOM_WIDTH_MM,
            depth_mm: DEFAULT_ROOM_DEPTH_MM,
        }
    }
}

/// 2D plan view settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Plan pixels per millimeter
    pub px_per_mm: f64,
    /// Snap grid step in plan pixels
    pub grid_px: f64,
    /// Floor offset from the stage origin in plan pixels
    pub floor_margin_px: f64,
    /// Container size used when the surface reports zero
    pub fallback_width_px: f64,
    pub fallback_height_px: f64,
}

impl ViewSettings {
    /// Unit transform for this plan scale
    pub fn units(&self) -> UnitTransform {
        UnitTransform::new(self.px_per_mm)
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            px_per_mm: DEFAULT_PX_PER_MM,
            grid_px: DEFAULT_GRID_PX,
            floor_margin_px: DEFAULT_FLOOR_MARGIN_PX,
            fallback_width_px: FALLBACK_PLAN_SIZE.0,
            fallback_height_px: FALLBACK_PLAN_SIZE.1,
        }
    }
}

/// 3D scene settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Height used for items whose template has none
    pub default_item_height_mm: f64,
    pub wall_height_m: f64,
    pub wall_thickness_m: f64,
    /// Vertical field of view in degrees
    pub fov_deg: f64,
    /// Initial camera position (meters, Y up)
    pub eye: [f64; 3],
    /// Initial orbit target (meters, Y up)
    pub target: [f64; 3],
    /// Viewport size used when the surface reports zero
    pub fallback_width_px: f64,
    pub fallback_height_px: f64,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            default_item_height_mm: DEFAULT_ITEM_HEIGHT_MM,
            wall_height_m: DEFAULT_WALL_HEIGHT_M,
            wall_thickness_m: DEFAULT_WALL_THICKNESS_M,
            fov_deg: 45.0,
            eye: [3.0, 1.6, 3.0],
            target: [0.0, 0.9, 0.0],
            fallback_width_px: FALLBACK_SCENE_SIZE.0,
            fallback_height_px: FALLBACK_SCENE_SIZE.1,
        }
    }
}

/// Drag policy per view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragSettings {
    pub plan_policy: DragPolicy,
    pub scene_policy: DragPolicy,
}

impl DragSettings {
    /// Policy applied to drags that start in `view`
    pub fn policy_for(&self, view: ViewKind) -> DragPolicy {
        match view {
            ViewKind::Plan => self.plan_policy,
            ViewKind::Scene => self.scene_policy,
        }
    }
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            plan_policy: DragPolicy::default_for(ViewKind::Plan),
            scene_policy: DragPolicy::default_for(ViewKind::Scene),
        }
    }
}

/// Where newly added items are placed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SpawnSettings {
    pub x_mm: f64,
    pub y_mm: f64,
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub room: RoomSettings,
    pub view: ViewSettings,
    pub scene: SceneSettings,
    pub drag: DragSettings,
    pub spawn: SpawnSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform default config file (`<config dir>/kitchenplan/config.toml`)
    pub fn default_path() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("kitchenplan").join("config.toml"))
            .ok_or_else(|| ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        tracing::debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        fn positive(key: &str, value: f64) -> ConfigResult<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::out_of_range(key, value))
            }
        }

        fn non_negative(key: &str, value: f64) -> ConfigResult<()> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::out_of_range(key, value))
            }
        }

        non_negative("room.width_mm", self.room.width_mm)?;
        non_negative("room.depth_mm", self.room.depth_mm)?;

        positive("view.px_per_mm", self.view.px_per_mm)?;
        positive("view.grid_px", self.view.grid_px)?;
        non_negative("view.floor_margin_px", self.view.floor_margin_px)?;
        positive("view.fallback_width_px", self.view.fallback_width_px)?;
        positive("view.fallback_height_px", self.view.fallback_height_px)?;

        positive(
            "scene.default_item_height_mm",
            self.scene.default_item_height_mm,
        )?;
        positive("scene.wall_height_m", self.scene.wall_height_m)?;
        positive("scene.wall_thickness_m", self.scene.wall_thickness_m)?;
        if !(self.scene.fov_deg > 0.0 && self.scene.fov_deg < 180.0) {
            return Err(ConfigError::out_of_range(
                "scene.fov_deg",
                self.scene.fov_deg,
            ));
        }
        positive("scene.fallback_width_px", self.scene.fallback_width_px)?;
        positive("scene.fallback_height_px", self.scene.fallback_height_px)?;
        if self.scene.eye == self.scene.target {
            return Err(ConfigError::out_of_range(
                "scene.eye",
                format!("{:?} equals target", self.scene.eye),
            ));
        }

        non_negative("spawn.x_mm", self.spawn.x_mm)?;
        non_negative("spawn.y_mm", self.spawn.y_mm)?;

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

//! KitchenPlan Settings Crate
//!
//! Handles application configuration: room defaults, view scales, scene
//! parameters, per-view drag policies and spawn position.

pub mod config;
pub mod error;

pub use config::{Config, DragSettings, RoomSettings, SceneSettings, SpawnSettings, ViewSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

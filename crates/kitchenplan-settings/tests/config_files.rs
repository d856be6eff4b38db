//! Config file round trips through JSON and TOML

use kitchenplan_settings::{Config, ConfigError, DragSettings, SettingsError};
use kitchenplan_core::DragPolicy;
use tempfile::tempdir;

fn customized() -> Config {
    let mut config = Config::default();
    config.room.width_mm = 3600.0;
    config.room.depth_mm = 2400.0;
    config.view.grid_px = 10.0;
    config.spawn.x_mm = 40.0;
    config.drag = DragSettings {
        plan_policy: DragPolicy::SnapAndCheckLive,
        scene_policy: DragPolicy::SnapAndCheckLive,
    };
    config
}

#[test]
fn test_toml_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let config = customized();
    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_json_round_trip_creates_parent_dirs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = customized();
    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_unsupported_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");

    let err = Config::default().save_to_file(&path).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::UnsupportedFormat(ref ext)) if ext == "yaml"
    ));
}

#[test]
fn test_invalid_file_is_rejected_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "view": { "px_per_mm": -2.0 } }"#).unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Config(_)));
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let err = Config::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, SettingsError::IoError(_)));
}

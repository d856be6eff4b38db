//! Export to disk

use kitchenplan_layout::{PlanDocument, Planner};
use tempfile::tempdir;

#[test]
fn test_export_file_shape() {
    let mut planner = Planner::default();
    planner.add_from_catalog("sink-600").unwrap();
    planner.add_from_catalog("tall-600").unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("plan.json");
    planner.export().save_to_file(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["room"], serde_json::json!({ "width": 1200.0, "depth": 800.0 }));

    let items = value["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["catalogId"], "tall-600");
    assert_eq!(items[1]["heightMm"], 2100.0);

    let keys: Vec<_> = items[0].as_object().unwrap().keys().cloned().collect();
    for key in ["uid", "catalogId", "title", "widthMm", "depthMm", "heightMm", "xMm", "yMm"] {
        assert!(keys.iter().any(|k| k == key), "missing {}", key);
    }

    let parsed: PlanDocument = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, planner.export());
}

#[test]
fn test_export_to_missing_directory_fails_with_context() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent").join("plan.json");

    let err = PlanDocument::from_model(Planner::default().model())
        .save_to_file(&path)
        .unwrap_err();
    assert!(err.to_string().contains("Failed to write plan file"));
}

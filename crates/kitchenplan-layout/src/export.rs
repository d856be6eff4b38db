//! Plan export.
//!
//! Writes the canonical model verbatim as JSON, millimeters throughout:
//!
//! ```json
//! { "room": { "width": 1200, "depth": 800 },
//!   "items": [ { "uid": "...", "catalogId": "...", "title": "...",
//!                "widthMm": 600, "depthMm": 600, "heightMm": 720,
//!                "xMm": 0, "yMm": 0 } ] }
//! ```
//!
//! There is no import path.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use crate::model::{PlacedItem, Room, SpatialModel};

/// Snapshot of a plan for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    pub room: Room,
    pub items: Vec<PlacedItem>,
}

impl PlanDocument {
    pub fn from_model(model: &SpatialModel) -> Self {
        Self {
            room: *model.room(),
            items: model.list_items().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize plan")
    }

    /// Write pretty JSON followed by a newline.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let json = self.to_json()?;
        writeln!(writer, "{}", json).context("Failed to write plan")?;
        Ok(())
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write plan file {}", path.display()))?;
        tracing::info!(
            "Exported {} items to {}",
            self.items.len(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemTemplate;
    use crate::model::PointMm;

    #[test]
    fn test_field_names() {
        let mut model = SpatialModel::new(Room::new(1200.0, 800.0));
        let sink = ItemTemplate::new("sink-600", "Sink", 600.0, 600.0);
        model.add_item(&sink, PointMm::new(40.0, 0.0));

        let value: serde_json::Value =
            serde_json::from_str(&PlanDocument::from_model(&model).to_json().unwrap()).unwrap();

        assert_eq!(value["room"]["width"], 1200.0);
        assert_eq!(value["room"]["depth"], 800.0);
        let item = &value["items"][0];
        assert_eq!(item["catalogId"], "sink-600");
        assert_eq!(item["title"], "Sink");
        assert_eq!(item["widthMm"], 600.0);
        assert_eq!(item["heightMm"], 720.0);
        assert_eq!(item["xMm"], 40.0);
        assert_eq!(item["yMm"], 0.0);
        assert!(item["uid"].as_str().unwrap().starts_with("sink-600-"));
    }

    #[test]
    fn test_write_to_buffer() {
        let doc = PlanDocument::from_model(&SpatialModel::default());
        let mut buffer = Vec::new();
        doc.write_to(&mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.ends_with("}\n"));
        assert_eq!(serde_json::from_str::<PlanDocument>(&text).unwrap(), doc);
    }
}

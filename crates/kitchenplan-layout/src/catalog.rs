//! Catalog of item templates.
//!
//! The catalog is an ordered list of furniture templates the user can
//! place. It ships with a small built-in kitchen set and can be loaded
//! from a JSON array of templates.

use kitchenplan_core::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A selectable furniture template, dimensions in millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemTemplate {
    pub id: String,
    pub title: String,
    pub width_mm: f64,
    pub depth_mm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_mm: Option<f64>,
}

impl ItemTemplate {
    pub fn new(id: impl Into<String>, title: impl Into<String>, width_mm: f64, depth_mm: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            width_mm,
            depth_mm,
            height_mm: None,
        }
    }

    pub fn with_height(mut self, height_mm: f64) -> Self {
        self.height_mm = Some(height_mm);
        self
    }

    fn validate(&self) -> std::result::Result<(), CatalogError> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::EmptyId);
        }
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.width_mm) || !positive(self.depth_mm) {
            return Err(CatalogError::InvalidFootprint {
                id: self.id.clone(),
                width_mm: self.width_mm,
                depth_mm: self.depth_mm,
            });
        }
        if let Some(height_mm) = self.height_mm {
            if !positive(height_mm) {
                return Err(CatalogError::InvalidHeight {
                    id: self.id.clone(),
                    height_mm,
                });
            }
        }
        Ok(())
    }
}

/// Ordered, validated set of templates.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    templates: Vec<ItemTemplate>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and degenerate footprints.
    pub fn new(templates: Vec<ItemTemplate>) -> Result<Self> {
        let mut seen = HashSet::new();
        for template in &templates {
            template.validate()?;
            if !seen.insert(template.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    id: template.id.clone(),
                }
                .into());
            }
        }
        Ok(Self { templates })
    }

    /// Built-in kitchen cabinet set.
    pub fn builtin() -> Self {
        Self {
            templates: vec![
                ItemTemplate::new("sink-600", "Sink", 600.0, 600.0),
                ItemTemplate::new("base-400", "Base cabinet", 400.0, 600.0),
                ItemTemplate::new("base-600", "Base cabinet", 600.0, 600.0),
                ItemTemplate::new("drawers-600", "Drawer unit", 600.0, 600.0),
                ItemTemplate::new("dishwasher-600", "Dishwasher", 600.0, 600.0)
                    .with_height(820.0),
                ItemTemplate::new("tall-600", "Tall cabinet", 600.0, 600.0).with_height(2100.0),
                ItemTemplate::new("wall-800", "Wall cabinet", 800.0, 350.0).with_height(700.0),
            ],
        }
    }

    /// Parse a JSON array of templates.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let templates: Vec<ItemTemplate> = serde_json::from_str(json)?;
        Self::new(templates)
    }

    /// Load a JSON catalog file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;
        tracing::info!(
            "Loaded {} catalog templates from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Look up a template by id.
    pub fn get(&self, id: &str) -> Result<&ItemTemplate> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| CatalogError::UnknownTemplate { id: id.to_string() }.into())
    }

    pub fn templates(&self) -> &[ItemTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

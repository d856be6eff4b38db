//! Event type definitions for the layout event bus.
//!
//! Events carry plain data (uids and millimeter coordinates) so that any
//! view can react to them without borrowing the model.

use serde::{Deserialize, Serialize};

use crate::types::ViewKind;

/// Root event enum for all layout events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayoutEvent {
    /// An item was placed from the catalog
    ItemAdded {
        uid: String,
        catalog_id: String,
        x_mm: f64,
        y_mm: f64,
    },
    /// A drag committed a new position
    ItemMoved {
        uid: String,
        view: ViewKind,
        x_mm: f64,
        y_mm: f64,
    },
    /// The room changed size and items were reclamped
    RoomResized { width_mm: f64, depth_mm: f64 },
    /// A drag session started on an item
    DragStarted { uid: String, view: ViewKind },
    /// A drag session ended without touching the model
    DragReverted { uid: String, view: ViewKind },
    /// The selected item changed
    SelectionChanged { uid: Option<String> },
}

impl LayoutEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            LayoutEvent::ItemAdded { .. }
            | LayoutEvent::ItemMoved { .. }
            | LayoutEvent::RoomResized { .. } => EventCategory::Model,
            LayoutEvent::DragStarted { .. } | LayoutEvent::DragReverted { .. } => {
                EventCategory::Drag
            }
            LayoutEvent::SelectionChanged { .. } => EventCategory::Selection,
        }
    }

    /// Whether views must re-project the canonical model after this event
    pub fn changes_model(&self) -> bool {
        self.category() == EventCategory::Model
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            LayoutEvent::ItemAdded {
                uid, catalog_id, ..
            } => format!("Added {} from {}", uid, catalog_id),
            LayoutEvent::ItemMoved {
                uid,
                view,
                x_mm,
                y_mm,
            } => format!("Moved {} to ({}, {}) mm from {}", uid, x_mm, y_mm, view),
            LayoutEvent::RoomResized { width_mm, depth_mm } => {
                format!("Room resized to {}x{} mm", width_mm, depth_mm)
            }
            LayoutEvent::DragStarted { uid, view } => format!("Drag of {} in {}", uid, view),
            LayoutEvent::DragReverted { uid, view } => {
                format!("Drag of {} in {} reverted", uid, view)
            }
            LayoutEvent::SelectionChanged { uid: Some(uid) } => format!("Selected {}", uid),
            LayoutEvent::SelectionChanged { uid: None } => "Selection cleared".to_string(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Canonical model mutations.
    Model,
    /// Drag session lifecycle.
    Drag,
    /// Selection changes.
    Selection,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Model => write!(f, "Model"),
            EventCategory::Drag => write!(f, "Drag"),
            EventCategory::Selection => write!(f, "Selection"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let moved = LayoutEvent::ItemMoved {
            uid: "sink-1".to_string(),
            view: ViewKind::Plan,
            x_mm: 40.0,
            y_mm: 0.0,
        };
        assert_eq!(moved.category(), EventCategory::Model);
        assert!(moved.changes_model());

        let reverted = LayoutEvent::DragReverted {
            uid: "sink-1".to_string(),
            view: ViewKind::Scene,
        };
        assert_eq!(reverted.category(), EventCategory::Drag);
        assert!(!reverted.changes_model());
    }

    #[test]
    fn test_description() {
        let event = LayoutEvent::RoomResized {
            width_mm: 500.0,
            depth_mm: 800.0,
        };
        assert_eq!(event.description(), "Room resized to 500x800 mm");
        assert_eq!(
            LayoutEvent::SelectionChanged { uid: None }.description(),
            "Selection cleared"
        );
    }
}

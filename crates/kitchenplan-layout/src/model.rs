//! Canonical placement model.
//!
//! The room and every placed item live here in millimeters. Both views
//! derive from this model and write back to it only through
//! [`SpatialModel::commit_position`] and [`SpatialModel::resize_room`].
//!
//! Bounds are enforced by clamping; collisions are not checked here.
//! Callers validate a position before committing it.

use kitchenplan_core::clamp_floor;
use kitchenplan_core::constants::DEFAULT_ITEM_HEIGHT_MM;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::ItemTemplate;
use crate::collision::Rect;

/// A point in room-local millimeters (origin at the room's top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointMm {
    pub x: f64,
    pub y: f64,
}

impl PointMm {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for PointMm {
    type Output = PointMm;

    fn sub(self, rhs: PointMm) -> PointMm {
        PointMm::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Rectangular room footprint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(rename = "width")]
    pub width_mm: f64,
    #[serde(rename = "depth")]
    pub depth_mm: f64,
}

impl Room {
    pub fn new(width_mm: f64, depth_mm: f64) -> Self {
        Self {
            width_mm: sanitize_dimension(width_mm),
            depth_mm: sanitize_dimension(depth_mm),
        }
    }
}

impl Default for Room {
    fn default() -> Self {
        Self::new(
            kitchenplan_core::constants::DEFAULT_ROOM_WIDTH_MM,
            kitchenplan_core::constants::DEFAULT_ROOM_DEPTH_MM,
        )
    }
}

fn sanitize_dimension(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// A furniture item placed in the room.
///
/// `x_mm`/`y_mm` is the top-left corner of the footprint
/// `[x, x + width) × [y, y + depth)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem {
    pub uid: String,
    pub catalog_id: String,
    pub title: String,
    pub width_mm: f64,
    pub depth_mm: f64,
    pub height_mm: f64,
    pub x_mm: f64,
    pub y_mm: f64,
}

impl PlacedItem {
    pub fn position(&self) -> PointMm {
        PointMm::new(self.x_mm, self.y_mm)
    }

    /// Footprint rectangle at the current position.
    pub fn footprint(&self) -> Rect {
        self.footprint_at(self.position())
    }

    /// Footprint rectangle if the item were placed at `at`.
    pub fn footprint_at(&self, at: PointMm) -> Rect {
        Rect::new(at.x, at.y, self.width_mm, self.depth_mm)
    }

    /// Largest legal top-left coordinate in `room` (may be negative).
    pub fn max_position(&self, room: &Room) -> PointMm {
        PointMm::new(room.width_mm - self.width_mm, room.depth_mm - self.depth_mm)
    }

    /// Clamp a proposed top-left into `room`, flooring at 0.
    pub fn clamp_into(&self, room: &Room, at: PointMm) -> PointMm {
        let max = self.max_position(room);
        PointMm::new(clamp_floor(at.x, 0.0, max.x), clamp_floor(at.y, 0.0, max.y))
    }
}

/// Owner of the room and the ordered collection of placed items.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialModel {
    room: Room,
    items: Vec<PlacedItem>,
    default_height_mm: f64,
}

impl SpatialModel {
    pub fn new(room: Room) -> Self {
        Self {
            room,
            items: Vec::new(),
            default_height_mm: DEFAULT_ITEM_HEIGHT_MM,
        }
    }

    /// Height given to items whose template has none.
    pub fn with_default_height(mut self, height_mm: f64) -> Self {
        if height_mm.is_finite() && height_mm > 0.0 {
            self.default_height_mm = height_mm;
        }
        self
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn default_height_mm(&self) -> f64 {
        self.default_height_mm
    }

    /// Place a new item from `template` at `position`.
    ///
    /// No bounds or collision check is made: freshly added items may start
    /// outside the clamp range or stacked on top of each other.
    pub fn add_item(&mut self, template: &ItemTemplate, position: PointMm) -> &PlacedItem {
        let uid = self.fresh_uid(&template.id);
        let item = PlacedItem {
            uid,
            catalog_id: template.id.clone(),
            title: template.title.clone(),
            width_mm: template.width_mm,
            depth_mm: template.depth_mm,
            height_mm: template.height_mm.unwrap_or(self.default_height_mm),
            x_mm: position.x,
            y_mm: position.y,
        };
        tracing::debug!(
            "Added {} ({}) at ({}, {}) mm",
            item.uid,
            item.title,
            item.x_mm,
            item.y_mm
        );
        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    /// Items in insertion order.
    pub fn list_items(&self) -> &[PlacedItem] {
        &self.items
    }

    pub fn get(&self, uid: &str) -> Option<&PlacedItem> {
        self.items.iter().find(|item| item.uid == uid)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Overwrite an item's position. Unknown uids are ignored.
    ///
    /// Trusts its caller: bounds and collisions must already be validated.
    pub fn commit_position(&mut self, uid: &str, x_mm: f64, y_mm: f64) -> bool {
        match self.items.iter_mut().find(|item| item.uid == uid) {
            Some(item) => {
                item.x_mm = x_mm;
                item.y_mm = y_mm;
                true
            }
            None => {
                tracing::debug!("Ignoring commit for unknown item {}", uid);
                false
            }
        }
    }

    /// Resize the room and reclamp every item into the new bounds.
    ///
    /// Items larger than the room settle at 0 on that axis. Collisions
    /// introduced by the reclamp are left as they are.
    pub fn resize_room(&mut self, width_mm: f64, depth_mm: f64) {
        self.room = Room::new(width_mm, depth_mm);
        let room = self.room;
        for item in &mut self.items {
            let clamped = item.clamp_into(&room, item.position());
            item.x_mm = clamped.x;
            item.y_mm = clamped.y;
        }
        tracing::debug!(
            "Room resized to {}x{} mm, {} items reclamped",
            room.width_mm,
            room.depth_mm,
            self.items.len()
        );
    }

    fn fresh_uid(&self, catalog_id: &str) -> String {
        loop {
            let token = Uuid::new_v4().simple().to_string();
            let uid = format!("{}-{}", catalog_id, &token[..12]);
            if self.get(&uid).is_none() {
                return uid;
            }
        }
    }
}

impl Default for SpatialModel {
    fn default() -> Self {
        Self::new(Room::default())
    }
}

//! View projectors.
//!
//! Each projector renders the [`SpatialModel`] into its own space and
//! translates raw pointer positions back into room-local millimeters for
//! the [`DragController`](crate::drag::DragController). Projectors never
//! write to the model.
//!
//! - [`PlanProjector`]: top-down plan in plan pixels
//! - [`SceneProjector`]: perspective scene in meters

mod plan;
mod scene;

pub use plan::{DimensionLabel, PlanItemShape, PlanProjector, PlanScene};
pub use scene::{FloorPlane, SceneBox, SceneFrame, SceneProjector, Wall, WallSide};

use kitchenplan_core::ViewKind;
use serde::{Deserialize, Serialize};

use crate::drag::DragController;
use crate::model::{PointMm, Room, SpatialModel};
use crate::selection::SelectionManager;

/// A pointer position in view-local pixels (origin top-left, +Y down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPos {
    pub x: f64,
    pub y: f64,
}

impl PointerPos {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Common surface of the plan and scene projectors.
pub trait ViewProjector {
    /// What the projector hands to its renderer.
    type Frame;

    fn kind(&self) -> ViewKind;

    /// Resize the drawing surface. Zero sizes fall back to defaults.
    fn set_viewport_size(&mut self, width: f64, height: f64);

    /// Recompute anything derived from the room size.
    fn relayout(&mut self, room: &Room);

    /// Room-local millimeters under the pointer, if the pointer maps onto
    /// the floor's plane at all.
    fn floor_point(&self, model: &SpatialModel, pointer: PointerPos) -> Option<PointMm>;

    /// Uid of the item a press at `pointer` would grab.
    fn hit_test(&self, model: &SpatialModel, pointer: PointerPos) -> Option<String>;

    /// Build a frame from the model, drawing the dragged item at its preview.
    fn project(
        &self,
        model: &SpatialModel,
        drag: &DragController,
        selection: &SelectionManager,
    ) -> Self::Frame;
}

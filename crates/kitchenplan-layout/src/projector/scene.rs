//! Perspective 3D projection.
//!
//! The room is centred on the world origin: the floor spans
//! `[-W/2, W/2] × [-D/2, D/2]` in meters on the `y = 0` plane, and the
//! model's +Y (depth) axis becomes world +Z.

use glam::DVec3;
use kitchenplan_core::{UnitTransform, ViewKind};
use kitchenplan_settings::SceneSettings;
use serde::Serialize;

use super::{PointerPos, ViewProjector};
use crate::camera::{Ray, SceneCamera};
use crate::drag::DragController;
use crate::model::{PlacedItem, PointMm, Room, SpatialModel};
use crate::selection::SelectionManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WallSide {
    North,
    South,
    West,
    East,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wall {
    pub side: WallSide,
    pub center: [f64; 3],
    pub size: [f64; 3],
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FloorPlane {
    pub width_m: f64,
    pub depth_m: f64,
}

/// One item as a box in world meters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneBox {
    pub uid: String,
    pub center: [f64; 3],
    pub size: [f64; 3],
    pub selected: bool,
    pub dragging: bool,
}

/// Everything the scene renderer draws for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneFrame {
    pub floor: FloorPlane,
    pub walls: Vec<Wall>,
    pub items: Vec<SceneBox>,
    pub eye: [f64; 3],
    pub target: [f64; 3],
    pub aspect_ratio: f64,
}

/// Projects the model into the 3D scene.
#[derive(Debug, Clone)]
pub struct SceneProjector {
    units: UnitTransform,
    camera: SceneCamera,
    viewport: (f64, f64),
    fallback: (f64, f64),
    wall_height_m: f64,
    wall_thickness_m: f64,
}

impl SceneProjector {
    pub fn new(settings: &SceneSettings, units: UnitTransform) -> Self {
        let camera = SceneCamera::look_at(
            DVec3::from_array(settings.eye),
            DVec3::from_array(settings.target),
            settings.fov_deg,
        );
        let fallback = (settings.fallback_width_px, settings.fallback_height_px);
        let mut projector = Self {
            units,
            camera,
            viewport: fallback,
            fallback,
            wall_height_m: settings.wall_height_m,
            wall_thickness_m: settings.wall_thickness_m,
        };
        projector.set_viewport_size(fallback.0, fallback.1);
        projector
    }

    pub fn camera(&self) -> &SceneCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut SceneCamera {
        &mut self.camera
    }

    /// World-space centre of an item whose top-left sits at `at`.
    pub fn item_center(&self, room: &Room, item: &PlacedItem, at: PointMm) -> DVec3 {
        let u = &self.units;
        DVec3::new(
            u.mm_to_m(at.x + item.width_mm / 2.0 - room.width_mm / 2.0),
            u.mm_to_m(item.height_mm) / 2.0,
            u.mm_to_m(at.y + item.depth_mm / 2.0 - room.depth_mm / 2.0),
        )
    }

    fn item_size(&self, item: &PlacedItem) -> DVec3 {
        DVec3::new(
            self.units.mm_to_m(item.width_mm),
            self.units.mm_to_m(item.height_mm),
            self.units.mm_to_m(item.depth_mm),
        )
    }

    /// Ray from the camera through a viewport pixel.
    pub fn pointer_ray(&self, pointer: PointerPos) -> Ray {
        let (width, height) = self.viewport;
        let ndc_x = (pointer.x / width) * 2.0 - 1.0;
        let ndc_y = -(pointer.y / height) * 2.0 + 1.0;
        self.camera.ray_through(ndc_x, ndc_y)
    }

    /// Walls with the ones between the camera and the room hidden.
    pub fn walls(&self, room: &Room) -> Vec<Wall> {
        let w = self.units.mm_to_m(room.width_mm);
        let d = self.units.mm_to_m(room.depth_mm);
        let h = self.wall_height_m;
        let t = self.wall_thickness_m;
        let eye = self.camera.eye_position();

        let hidden_z = if eye.z > 0.0 {
            WallSide::South
        } else {
            WallSide::North
        };
        let hidden_x = if eye.x > 0.0 {
            WallSide::East
        } else {
            WallSide::West
        };

        [
            (WallSide::North, [0.0, h / 2.0, -d / 2.0], [w, h, t]),
            (WallSide::South, [0.0, h / 2.0, d / 2.0], [w, h, t]),
            (WallSide::West, [-w / 2.0, h / 2.0, 0.0], [t, h, d]),
            (WallSide::East, [w / 2.0, h / 2.0, 0.0], [t, h, d]),
        ]
        .into_iter()
        .map(|(side, center, size)| Wall {
            side,
            center,
            size,
            visible: side != hidden_z && side != hidden_x,
        })
        .collect()
    }
}

impl ViewProjector for SceneProjector {
    type Frame = SceneFrame;

    fn kind(&self) -> ViewKind {
        ViewKind::Scene
    }

    fn set_viewport_size(&mut self, width: f64, height: f64) {
        let usable = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };
        self.viewport = (usable(width, self.fallback.0), usable(height, self.fallback.1));
        self.camera.update_aspect_ratio(self.viewport.0, self.viewport.1);
    }

    fn relayout(&mut self, room: &Room) {
        // Room geometry is derived per frame; the camera is left where the user put it
        tracing::trace!(
            "Scene relayout for {}x{} mm, eye at {:?}",
            room.width_mm,
            room.depth_mm,
            self.camera.eye_position()
        );
    }

    fn floor_point(&self, model: &SpatialModel, pointer: PointerPos) -> Option<PointMm> {
        let hit = self.pointer_ray(pointer).intersect_horizontal_plane(0.0)?;
        let room = model.room();
        Some(PointMm::new(
            self.units.m_to_mm(hit.x) + room.width_mm / 2.0,
            self.units.m_to_mm(hit.z) + room.depth_mm / 2.0,
        ))
    }

    fn hit_test(&self, model: &SpatialModel, pointer: PointerPos) -> Option<String> {
        let ray = self.pointer_ray(pointer);
        let room = model.room();

        model
            .list_items()
            .iter()
            .filter_map(|item| {
                let center = self.item_center(room, item, item.position());
                let half = self.item_size(item) / 2.0;
                ray.intersect_aabb(center - half, center + half)
                    .map(|t| (t, item))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, item)| item.uid.clone())
    }

    fn project(
        &self,
        model: &SpatialModel,
        drag: &DragController,
        selection: &SelectionManager,
    ) -> SceneFrame {
        let room = model.room();
        let items = model
            .list_items()
            .iter()
            .map(|item| {
                let preview = drag.preview_of(&item.uid);
                let at = preview.unwrap_or_else(|| item.position());
                SceneBox {
                    uid: item.uid.clone(),
                    center: self.item_center(room, item, at).to_array(),
                    size: self.item_size(item).to_array(),
                    selected: selection.is_selected(&item.uid),
                    dragging: preview.is_some(),
                }
            })
            .collect();

        SceneFrame {
            floor: FloorPlane {
                width_m: self.units.mm_to_m(room.width_mm),
                depth_m: self.units.mm_to_m(room.depth_mm),
            },
            walls: self.walls(room),
            items,
            eye: self.camera.eye_position().to_array(),
            target: self.camera.target.to_array(),
            aspect_ratio: self.camera.aspect_ratio,
        }
    }
}

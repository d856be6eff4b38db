//! Top-down plan projection.

use kitchenplan_core::constants::MAX_GRID_LINES;
use kitchenplan_core::{format_mm, format_number, UnitTransform, ViewKind};
use kitchenplan_settings::ViewSettings;
use serde::Serialize;

use super::{PointerPos, ViewProjector};
use crate::collision::Rect;
use crate::drag::DragController;
use crate::model::{PointMm, Room, SpatialModel};
use crate::selection::SelectionManager;
use crate::viewport::PlanViewport;

/// One item as drawn on the plan, in stage pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanItemShape {
    pub uid: String,
    pub title: String,
    /// `"{width}x{depth}"` in millimeters
    pub size_label: String,
    pub rect: Rect,
    pub selected: bool,
    pub dragging: bool,
}

/// A text label placed on the stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
}

/// Everything the plan renderer draws for one frame.
///
/// Geometry is in unscaled stage pixels; the renderer applies `scale`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanScene {
    pub scale: f64,
    pub stage_width: f64,
    pub stage_height: f64,
    pub floor: Rect,
    pub vertical_lines: Vec<Rect>,
    pub horizontal_lines: Vec<Rect>,
    pub items: Vec<PlanItemShape>,
    pub width_label: DimensionLabel,
    pub depth_label: DimensionLabel,
}

/// Projects the model onto the 2D plan.
#[derive(Debug, Clone)]
pub struct PlanProjector {
    units: UnitTransform,
    grid_px: f64,
    viewport: PlanViewport,
}

impl PlanProjector {
    pub fn new(settings: &ViewSettings) -> Self {
        Self {
            units: settings.units(),
            grid_px: settings.grid_px,
            viewport: PlanViewport::new(
                settings.floor_margin_px,
                (settings.fallback_width_px, settings.fallback_height_px),
            ),
        }
    }

    pub fn viewport(&self) -> &PlanViewport {
        &self.viewport
    }

    fn floor_size_px(&self, room: &Room) -> (f64, f64) {
        (
            self.units.mm_to_px(room.width_mm),
            self.units.mm_to_px(room.depth_mm),
        )
    }

    fn stage_rect(&self, at: PointMm, width_mm: f64, depth_mm: f64) -> Rect {
        let (x, y) = self
            .viewport
            .floor_to_stage(self.units.mm_to_px(at.x), self.units.mm_to_px(at.y));
        Rect::new(
            x,
            y,
            self.units.mm_to_px(width_mm),
            self.units.mm_to_px(depth_mm),
        )
    }

    /// Grid lines across the floor, one per started cell.
    ///
    /// A step that is not a positive finite number, or a floor that would
    /// need more than `MAX_GRID_LINES` on an axis, gets no lines there.
    fn grid_lines(&self, floor_w: f64, floor_h: f64) -> (Vec<Rect>, Vec<Rect>) {
        let margin = self.viewport.margin_px();
        let count = |extent: f64| {
            if !(self.grid_px.is_finite() && self.grid_px > 0.0) {
                return 0;
            }
            let lines = (extent / self.grid_px).ceil();
            if lines.is_finite() && lines > 0.0 && lines <= MAX_GRID_LINES as f64 {
                lines as usize
            } else {
                0
            }
        };

        let vertical = (0..count(floor_w))
            .map(|i| Rect::new(margin + i as f64 * self.grid_px, margin, 1.0, floor_h))
            .collect();
        let horizontal = (0..count(floor_h))
            .map(|i| Rect::new(margin, margin + i as f64 * self.grid_px, floor_w, 1.0))
            .collect();
        (vertical, horizontal)
    }
}

impl ViewProjector for PlanProjector {
    type Frame = PlanScene;

    fn kind(&self) -> ViewKind {
        ViewKind::Plan
    }

    fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport.set_container_size(width, height);
    }

    fn relayout(&mut self, room: &Room) {
        let (w, h) = self.floor_size_px(room);
        self.viewport.fit_to_floor(w, h);
        tracing::trace!("Plan relayout: {}", self.viewport);
    }

    fn floor_point(&self, _model: &SpatialModel, pointer: PointerPos) -> Option<PointMm> {
        let (fx, fy) = self.viewport.pixel_to_floor(pointer.x, pointer.y);
        Some(PointMm::new(self.units.px_to_mm(fx), self.units.px_to_mm(fy)))
    }

    fn hit_test(&self, model: &SpatialModel, pointer: PointerPos) -> Option<String> {
        let point = self.floor_point(model, pointer)?;
        // Later items are drawn on top
        model
            .list_items()
            .iter()
            .rev()
            .find(|item| item.footprint().contains(point.x, point.y))
            .map(|item| item.uid.clone())
    }

    fn project(
        &self,
        model: &SpatialModel,
        drag: &DragController,
        selection: &SelectionManager,
    ) -> PlanScene {
        let room = model.room();
        let margin = self.viewport.margin_px();
        let (floor_w, floor_h) = self.floor_size_px(room);
        let (stage_width, stage_height) = self.viewport.stage_size();
        let (vertical_lines, horizontal_lines) = self.grid_lines(floor_w, floor_h);

        let items = model
            .list_items()
            .iter()
            .map(|item| {
                let preview = drag.preview_of(&item.uid);
                let at = preview.unwrap_or_else(|| item.position());
                PlanItemShape {
                    uid: item.uid.clone(),
                    title: item.title.clone(),
                    size_label: format!(
                        "{}x{}",
                        format_number(item.width_mm),
                        format_number(item.depth_mm)
                    ),
                    rect: self.stage_rect(at, item.width_mm, item.depth_mm),
                    selected: selection.is_selected(&item.uid),
                    dragging: preview.is_some(),
                }
            })
            .collect();

        PlanScene {
            scale: self.viewport.scale(),
            stage_width,
            stage_height,
            floor: Rect::new(margin, margin, floor_w, floor_h),
            vertical_lines,
            horizontal_lines,
            items,
            width_label: DimensionLabel {
                text: format_mm(room.width_mm),
                x: margin,
                y: margin + floor_h + 4.0,
                rotation_deg: 0.0,
            },
            depth_label: DimensionLabel {
                text: format_mm(room.depth_mm),
                x: margin + floor_w + 8.0,
                y: margin,
                rotation_deg: 90.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemTemplate;

    fn projector() -> PlanProjector {
        let mut projector = PlanProjector::new(&ViewSettings::default());
        projector.set_viewport_size(1000.0, 1000.0);
        projector.relayout(&Room::new(1200.0, 800.0));
        projector
    }

    #[test]
    fn test_scene_layout() {
        let mut model = SpatialModel::new(Room::new(1200.0, 800.0));
        let sink = ItemTemplate::new("sink-600", "Sink", 600.0, 600.0);
        let uid = model.add_item(&sink, PointMm::new(40.0, 80.0)).uid.clone();
        let mut selection = SelectionManager::new();
        selection.select(Some(&uid));

        let scene = projector().project(
            &model,
            &DragController::new(UnitTransform::default(), 20.0),
            &selection,
        );

        assert_eq!(scene.scale, 1.0);
        assert_eq!(scene.floor, Rect::new(20.0, 20.0, 600.0, 400.0));
        assert_eq!(scene.vertical_lines.len(), 30);
        assert_eq!(scene.horizontal_lines.len(), 20);
        assert_eq!(scene.width_label.text, "1200 mm");
        assert_eq!(scene.depth_label.text, "800 mm");
        assert_eq!(scene.depth_label.rotation_deg, 90.0);

        let shape = &scene.items[0];
        assert_eq!(shape.rect, Rect::new(40.0, 60.0, 300.0, 300.0));
        assert_eq!(shape.size_label, "600x600");
        assert!(shape.selected);
        assert!(!shape.dragging);
    }

    #[test]
    fn test_partial_grid_cell_gets_a_line() {
        let projector = projector();
        let (vertical, horizontal) = projector.grid_lines(610.0, 0.0);
        assert_eq!(vertical.len(), 31);
        assert!(horizontal.is_empty());
    }

    #[test]
    fn test_degenerate_grid_draws_no_lines() {
        for grid_px in [0.0, -20.0, f64::NAN] {
            let settings = ViewSettings {
                grid_px,
                ..Default::default()
            };
            let (vertical, horizontal) = PlanProjector::new(&settings).grid_lines(600.0, 400.0);
            assert!(vertical.is_empty() && horizontal.is_empty());
        }

        // 1e12 mm is far past the line cap
        let (vertical, horizontal) = projector().grid_lines(5e11, 400.0);
        assert!(vertical.is_empty());
        assert_eq!(horizontal.len(), 20);

        let (vertical, _) = projector().grid_lines(f64::INFINITY, 400.0);
        assert!(vertical.is_empty());
    }

    #[test]
    fn test_floor_point_and_hit_test() {
        let mut model = SpatialModel::new(Room::new(1200.0, 800.0));
        let unit = ItemTemplate::new("base-600", "Base", 600.0, 600.0);
        let below = model.add_item(&unit, PointMm::new(0.0, 0.0)).uid.clone();
        let above = model.add_item(&unit, PointMm::new(0.0, 0.0)).uid.clone();
        let projector = projector();

        // Container (20, 20) is the floor origin at full scale
        assert_eq!(
            projector.floor_point(&model, PointerPos::new(20.0, 20.0)),
            Some(PointMm::new(0.0, 0.0))
        );
        assert_eq!(
            projector.hit_test(&model, PointerPos::new(100.0, 100.0)),
            Some(above)
        );
        assert_ne!(
            projector.hit_test(&model, PointerPos::new(100.0, 100.0)),
            Some(below)
        );
        assert_eq!(projector.hit_test(&model, PointerPos::new(500.0, 100.0)), None);
    }
}

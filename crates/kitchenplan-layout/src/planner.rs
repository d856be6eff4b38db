//! Planner façade.
//!
//! Owns the canonical model and wires it to the catalog, the drag state
//! machine, both projectors, the selection and the event bus. Every
//! mutation goes through here so that each one is followed by an event
//! telling the views to re-project.

use std::sync::Arc;

use kitchenplan_core::{
    parse_dimension, LayoutEvent, LayoutEventBus, Result, UnitTransform, ViewKind,
};
use kitchenplan_settings::Config;

use crate::catalog::Catalog;
use crate::drag::{DragController, DragOutcome, PreviewUpdate};
use crate::export::PlanDocument;
use crate::model::{PointMm, Room, SpatialModel};
use crate::projector::{PlanProjector, PlanScene, PointerPos, SceneFrame, SceneProjector, ViewProjector};
use crate::selection::SelectionManager;

/// Interactive room planner.
pub struct Planner {
    config: Config,
    catalog: Catalog,
    model: SpatialModel,
    drag: DragController,
    selection: SelectionManager,
    plan: PlanProjector,
    scene: SceneProjector,
    bus: Arc<LayoutEventBus>,
}

impl Planner {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        Self::with_bus(config, catalog, Arc::new(LayoutEventBus::new()))
    }

    /// Create a planner that publishes on an existing bus.
    ///
    /// An invalid config is logged, not rejected; degenerate grid steps
    /// and oversized floors are tolerated downstream.
    pub fn with_bus(config: Config, catalog: Catalog, bus: Arc<LayoutEventBus>) -> Self {
        if let Err(e) = config.validate() {
            tracing::warn!("Planner built from invalid config: {}", e);
        }
        let units = UnitTransform::new(config.view.px_per_mm);
        let room = Room::new(config.room.width_mm, config.room.depth_mm);
        let model = SpatialModel::new(room).with_default_height(config.scene.default_item_height_mm);

        let mut plan = PlanProjector::new(&config.view);
        let mut scene = SceneProjector::new(&config.scene, units);
        plan.relayout(&room);
        scene.relayout(&room);

        tracing::info!(
            "Planner ready: room {}x{} mm, {} catalog templates",
            room.width_mm,
            room.depth_mm,
            catalog.len()
        );

        Self {
            drag: DragController::new(units, config.view.grid_px),
            config,
            catalog,
            model,
            selection: SelectionManager::new(),
            plan,
            scene,
            bus,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn model(&self) -> &SpatialModel {
        &self.model
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn bus(&self) -> &Arc<LayoutEventBus> {
        &self.bus
    }

    pub fn plan_projector(&self) -> &PlanProjector {
        &self.plan
    }

    pub fn scene_projector(&self) -> &SceneProjector {
        &self.scene
    }

    /// Camera access for orbit and zoom input.
    pub fn scene_projector_mut(&mut self) -> &mut SceneProjector {
        &mut self.scene
    }

    /// Place a catalog template at the configured spawn position and select it.
    pub fn add_from_catalog(&mut self, catalog_id: &str) -> Result<String> {
        let template = self.catalog.get(catalog_id)?;
        let spawn = PointMm::new(self.config.spawn.x_mm, self.config.spawn.y_mm);
        let item = self.model.add_item(template, spawn);
        let uid = item.uid.clone();

        tracing::info!("Added {} from catalog as {}", catalog_id, uid);
        self.publish(LayoutEvent::ItemAdded {
            uid: uid.clone(),
            catalog_id: catalog_id.to_string(),
            x_mm: spawn.x,
            y_mm: spawn.y,
        });
        self.select(Some(&uid));
        Ok(uid)
    }

    pub fn select(&mut self, uid: Option<&str>) {
        if self.selection.select(uid) {
            self.publish(LayoutEvent::SelectionChanged {
                uid: uid.map(str::to_string),
            });
        }
    }

    /// Resize the room, reclamping every item into it.
    ///
    /// An in-flight drag is cancelled first since its preview was computed
    /// against the old bounds.
    pub fn resize_room(&mut self, width_mm: f64, depth_mm: f64) {
        if self.drag.is_active() {
            self.pointer_cancel();
        }

        self.model.resize_room(width_mm, depth_mm);
        let room = *self.model.room();
        self.plan.relayout(&room);
        self.scene.relayout(&room);

        tracing::info!("Room resized to {}x{} mm", room.width_mm, room.depth_mm);
        self.publish(LayoutEvent::RoomResized {
            width_mm: room.width_mm,
            depth_mm: room.depth_mm,
        });
    }

    /// Resize from raw text fields; anything unparseable counts as 0.
    pub fn resize_room_from_input(&mut self, width: &str, depth: &str) {
        self.resize_room(parse_dimension(width), parse_dimension(depth));
    }

    pub fn set_viewport_size(&mut self, view: ViewKind, width: f64, height: f64) {
        let room = *self.model.room();
        match view {
            ViewKind::Plan => {
                self.plan.set_viewport_size(width, height);
                self.plan.relayout(&room);
            }
            ViewKind::Scene => {
                self.scene.set_viewport_size(width, height);
                self.scene.relayout(&room);
            }
        }
    }

    /// Press in `view`. Returns whether a drag started.
    ///
    /// A press that misses every item is a no-op.
    pub fn pointer_down(&mut self, view: ViewKind, pointer: PointerPos) -> bool {
        let hit = match view {
            ViewKind::Plan => self.plan.hit_test(&self.model, pointer),
            ViewKind::Scene => self.scene.hit_test(&self.model, pointer),
        };
        let Some(uid) = hit else {
            return false;
        };
        let Some(at) = self.floor_point(view, pointer) else {
            return false;
        };

        let policy = self.config.drag.policy_for(view);
        if !self.drag.begin(&self.model, &uid, view, policy, at) {
            return false;
        }

        if view == ViewKind::Plan {
            self.select(Some(&uid));
        } else {
            self.scene.camera_mut().set_controls_enabled(false);
        }
        self.publish(LayoutEvent::DragStarted { uid, view });
        true
    }

    /// Pointer motion during a drag. Returns the new preview, if any.
    pub fn pointer_move(&mut self, pointer: PointerPos) -> Option<PreviewUpdate> {
        let view = self.drag.session()?.view();
        let at = self.floor_point(view, pointer)?;
        self.drag.update(&self.model, at)
    }

    /// Release: commit or revert the active drag.
    pub fn pointer_up(&mut self) -> DragOutcome {
        let outcome = self.drag.finish(&mut self.model);
        self.after_drag(&outcome);
        outcome
    }

    /// Abort the active drag, leaving the model untouched.
    pub fn pointer_cancel(&mut self) -> DragOutcome {
        let outcome = self.drag.cancel();
        self.after_drag(&outcome);
        outcome
    }

    pub fn plan_frame(&self) -> PlanScene {
        self.plan.project(&self.model, &self.drag, &self.selection)
    }

    pub fn scene_frame(&self) -> SceneFrame {
        self.scene.project(&self.model, &self.drag, &self.selection)
    }

    pub fn export(&self) -> PlanDocument {
        PlanDocument::from_model(&self.model)
    }

    fn floor_point(&self, view: ViewKind, pointer: PointerPos) -> Option<PointMm> {
        match view {
            ViewKind::Plan => self.plan.floor_point(&self.model, pointer),
            ViewKind::Scene => self.scene.floor_point(&self.model, pointer),
        }
    }

    fn after_drag(&mut self, outcome: &DragOutcome) {
        match outcome {
            DragOutcome::Committed {
                uid,
                view,
                position,
            } => {
                self.publish(LayoutEvent::ItemMoved {
                    uid: uid.clone(),
                    view: *view,
                    x_mm: position.x,
                    y_mm: position.y,
                });
            }
            DragOutcome::Reverted { uid, view, .. } => {
                self.publish(LayoutEvent::DragReverted {
                    uid: uid.clone(),
                    view: *view,
                });
            }
            DragOutcome::Idle => return,
        }
        self.scene.camera_mut().set_controls_enabled(true);
    }

    fn publish(&self, event: LayoutEvent) {
        if let Err(e) = self.bus.publish(event) {
            tracing::trace!("Event not delivered: {}", e);
        }
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(Config::default(), Catalog::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchenplan_core::{EventCategory, EventFilter};
    use parking_lot::Mutex;

    #[test]
    fn test_add_publishes_and_selects() {
        let mut planner = Planner::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        planner.bus().subscribe(EventFilter::All, move |event| {
            sink.lock().push(event.category());
        });

        let uid = planner.add_from_catalog("sink-600").unwrap();

        assert_eq!(planner.selection().selected_uid(), Some(uid.as_str()));
        assert_eq!(
            *seen.lock(),
            vec![EventCategory::Model, EventCategory::Selection]
        );
    }

    #[test]
    fn test_unknown_template_leaves_model_alone() {
        let mut planner = Planner::default();
        assert!(planner.add_from_catalog("fridge").is_err());
        assert!(planner.model().is_empty());
    }

    #[test]
    fn test_press_on_empty_floor_is_noop() {
        let mut planner = Planner::default();
        planner.set_viewport_size(ViewKind::Plan, 1000.0, 1000.0);
        assert!(!planner.pointer_down(ViewKind::Plan, PointerPos::new(300.0, 300.0)));
        assert!(!planner.drag().is_active());
        assert_eq!(planner.pointer_up(), DragOutcome::Idle);
    }

    #[test]
    fn test_zero_grid_and_huge_room_still_project() {
        let mut config = Config::default();
        config.view.grid_px = 0.0;
        let mut planner = Planner::new(config, Catalog::builtin());
        planner.add_from_catalog("sink-600").unwrap();

        let frame = planner.plan_frame();
        assert!(frame.vertical_lines.is_empty());
        assert_eq!(frame.items.len(), 1);

        let mut planner = Planner::default();
        planner.resize_room_from_input("1e12", "800");
        let frame = planner.plan_frame();
        assert!(frame.vertical_lines.is_empty());
        assert_eq!(frame.horizontal_lines.len(), 20);
    }

    #[test]
    fn test_resize_from_input() {
        let mut planner = Planner::default();
        planner.resize_room_from_input("2400", "abc");
        assert_eq!(*planner.model().room(), Room::new(2400.0, 0.0));
    }
}

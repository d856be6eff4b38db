//! Drag sessions driven through the planner in both views

use std::sync::Arc;

use glam::DVec3;
use kitchenplan_core::{LayoutEvent, LayoutEventBus, LayoutEventBusConfig, ViewKind};
use kitchenplan_layout::{Catalog, DragOutcome, Planner, PointMm, PointerPos};
use kitchenplan_settings::Config;

fn plan_px(x_mm: f64, y_mm: f64) -> PointerPos {
    PointerPos::new(x_mm * 0.5 + 20.0, y_mm * 0.5 + 20.0)
}

/// Scene pixel whose picking ray meets the floor at room-local (x, y) mm.
fn scene_px(planner: &Planner, x_mm: f64, y_mm: f64) -> PointerPos {
    let room = planner.model().room();
    let world = DVec3::new(
        (x_mm - room.width_mm / 2.0) / 1000.0,
        0.0,
        (y_mm - room.depth_mm / 2.0) / 1000.0,
    );
    let ndc = planner.scene_projector().camera().project_to_ndc(world);
    PointerPos::new((ndc.x + 1.0) / 2.0 * 800.0, (1.0 - ndc.y) / 2.0 * 520.0)
}

fn planner_with_history() -> Planner {
    let bus = Arc::new(LayoutEventBus::with_config(LayoutEventBusConfig {
        enable_history: true,
        ..Default::default()
    }));
    let mut planner = Planner::with_bus(Config::default(), Catalog::builtin(), bus);
    planner.set_viewport_size(ViewKind::Plan, 1000.0, 1000.0);
    planner.set_viewport_size(ViewKind::Scene, 800.0, 520.0);
    planner
}

/// Two base units, A at the origin and B right next to it at x = 600 mm.
fn side_by_side(planner: &mut Planner) -> (String, String) {
    let a = planner.add_from_catalog("base-600").unwrap();
    let b = planner.add_from_catalog("base-600").unwrap();
    planner.pointer_down(ViewKind::Plan, plan_px(20.0, 20.0));
    planner.pointer_move(plan_px(620.0, 20.0));
    assert!(planner.pointer_up().is_committed());
    (a, b)
}

#[test]
fn test_scene_drag_commits_rounded_position() {
    let mut planner = planner_with_history();
    let uid = planner.add_from_catalog("base-600").unwrap();

    assert!(planner.pointer_down(ViewKind::Scene, scene_px(&planner, 300.0, 300.0)));
    assert!(!planner.scene_projector().camera().controls_enabled());

    let preview = planner
        .pointer_move(scene_px(&planner, 400.6, 500.0))
        .unwrap();
    assert!((preview.position.x - 100.6).abs() < 1e-6);
    // No commit until release
    assert_eq!(planner.model().get(&uid).unwrap().position(), PointMm::new(0.0, 0.0));

    match planner.pointer_up() {
        DragOutcome::Committed { view, position, .. } => {
            assert_eq!(view, ViewKind::Scene);
            assert_eq!(position, PointMm::new(100.0, 200.0));
        }
        other => panic!("expected commit, got {:?}", other),
    }
    assert_eq!(planner.model().get(&uid).unwrap().position(), PointMm::new(100.0, 200.0));
    assert!(planner.scene_projector().camera().controls_enabled());
}

#[test]
fn test_scene_drag_onto_neighbour_reverts() {
    let mut planner = planner_with_history();
    let (_, b) = side_by_side(&mut planner);
    let before = planner.model().clone();

    assert!(planner.pointer_down(ViewKind::Scene, scene_px(&planner, 900.0, 300.0)));
    assert_eq!(planner.drag().session().unwrap().uid(), b);

    // Live moves are never collision-checked in the scene
    let preview = planner.pointer_move(scene_px(&planner, 600.0, 300.0)).unwrap();
    assert!(preview.accepted);
    assert!((preview.position.x - 300.0).abs() < 1e-6);

    let outcome = planner.pointer_up();
    assert!(outcome.is_reverted());
    assert_eq!(*planner.model(), before);
    assert_eq!(
        planner.bus().history().last(),
        Some(&LayoutEvent::DragReverted {
            uid: b,
            view: ViewKind::Scene
        })
    );
}

#[test]
fn test_scene_live_move_keeps_centre_in_room() {
    let mut planner = planner_with_history();
    planner.add_from_catalog("base-600").unwrap();

    assert!(planner.pointer_down(ViewKind::Scene, scene_px(&planner, 300.0, 300.0)));
    let preview = planner
        .pointer_move(scene_px(&planner, -400.0, 300.0))
        .unwrap();
    // Centre pinned to the west wall, half the item outside
    assert!((preview.position.x + 300.0).abs() < 1e-6);

    // Release clamps the footprint back inside
    match planner.pointer_up() {
        DragOutcome::Committed { position, .. } => assert_eq!(position.x, 0.0),
        other => panic!("expected commit, got {:?}", other),
    }
}

#[test]
fn test_cancel_reverts_plan_drag() {
    let mut planner = planner_with_history();
    let uid = planner.add_from_catalog("base-600").unwrap();
    let before = planner.model().clone();

    assert!(planner.pointer_down(ViewKind::Plan, plan_px(20.0, 20.0)));
    planner.pointer_move(plan_px(220.0, 120.0));
    assert!(planner.plan_frame().items[0].dragging);

    let outcome = planner.pointer_cancel();
    assert_eq!(
        outcome,
        DragOutcome::Reverted {
            uid: uid.clone(),
            view: ViewKind::Plan,
            original: PointMm::new(0.0, 0.0),
        }
    );
    assert_eq!(*planner.model(), before);
    assert!(!planner.plan_frame().items[0].dragging);
    assert_eq!(planner.pointer_cancel(), DragOutcome::Idle);
}

#[test]
fn test_plan_press_selects_and_commit_publishes() {
    let mut planner = planner_with_history();
    let (a, _) = side_by_side(&mut planner);
    planner.bus().clear_history();

    assert!(planner.pointer_down(ViewKind::Plan, plan_px(100.0, 100.0)));
    assert_eq!(planner.selection().selected_uid(), Some(a.as_str()));
    planner.pointer_up();

    let history = planner.bus().history();
    assert_eq!(
        history,
        vec![
            LayoutEvent::SelectionChanged {
                uid: Some(a.clone())
            },
            LayoutEvent::DragStarted {
                uid: a.clone(),
                view: ViewKind::Plan
            },
            LayoutEvent::ItemMoved {
                uid: a,
                view: ViewKind::Plan,
                x_mm: 0.0,
                y_mm: 0.0
            },
        ]
    );
}

#[test]
fn test_resize_cancels_active_drag() {
    let mut planner = planner_with_history();
    planner.add_from_catalog("base-600").unwrap();
    planner.pointer_down(ViewKind::Plan, plan_px(20.0, 20.0));

    planner.resize_room(2000.0, 1000.0);

    assert!(!planner.drag().is_active());
    assert_eq!(planner.pointer_up(), DragOutcome::Idle);
}

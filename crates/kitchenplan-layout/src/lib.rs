//! # KitchenPlan Layout
//!
//! Room layout engine. Holds the canonical placement of furniture items
//! in millimeters and keeps two projections of it in step: a top-down 2D
//! plan and a perspective 3D scene.
//!
//! ## Core Components
//!
//! - **SpatialModel**: Room and placed items, the single source of truth
//! - **Catalog**: Item templates that can be placed
//! - **CollisionIndex**: Footprint overlap checks (edge-touch allowed)
//! - **DragController**: Press / move / release state machine per drag
//! - **Projectors**: Plan and scene renderings plus pointer translation
//! - **Planner**: Façade that wires the above to the event bus
//!
//! ## Architecture
//!
//! ```text
//! Pointer event (plan px | scene px)
//!   └── ViewProjector::floor_point      -> room-local mm
//!         └── DragController            -> preview / commit / revert
//!               └── CollisionIndex      -> overlap check
//!                     └── SpatialModel  -> commit_position
//!                           └── LayoutEventBus -> both views re-project
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kitchenplan_layout::{Planner, PointerPos};
//! use kitchenplan_core::ViewKind;
//!
//! let mut planner = Planner::default();
//! let uid = planner.add_from_catalog("sink-600")?;
//!
//! planner.pointer_down(ViewKind::Plan, PointerPos::new(40.0, 40.0));
//! planner.pointer_move(PointerPos::new(140.0, 40.0));
//! planner.pointer_up();
//!
//! println!("{}", planner.export().to_json()?);
//! ```

pub mod camera;
pub mod catalog;
pub mod collision;
pub mod drag;
pub mod export;
pub mod model;
pub mod planner;
pub mod projector;
pub mod selection;
pub mod viewport;

pub use camera::{Ray, SceneCamera};
pub use catalog::{Catalog, ItemTemplate};
pub use collision::{CollisionIndex, Rect};
pub use drag::{DragController, DragOutcome, DragSession, PreviewUpdate};
pub use export::PlanDocument;
pub use model::{PlacedItem, PointMm, Room, SpatialModel};
pub use planner::Planner;
pub use projector::{
    DimensionLabel, FloorPlane, PlanItemShape, PlanProjector, PlanScene, PointerPos, SceneBox,
    SceneFrame, SceneProjector, ViewProjector, Wall, WallSide,
};
pub use selection::SelectionManager;
pub use viewport::PlanViewport;

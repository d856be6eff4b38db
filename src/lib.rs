//! # KitchenPlan
//!
//! Place rectangular furniture items in a rectangular room and edit their
//! positions by dragging, with every edit reflected in both a top-down 2D
//! plan and a perspective 3D scene.
//!
//! ## Architecture
//!
//! KitchenPlan is organized as a workspace with multiple crates:
//!
//! 1. **kitchenplan-core** - Unit transforms, shared types, errors, event bus
//! 2. **kitchenplan-layout** - Placement model, collisions, drag state machine, projectors
//! 3. **kitchenplan-settings** - Configuration files and validation
//! 4. **kitchenplan** - Headless CLI that builds and exports a plan

pub mod cli;

pub use kitchenplan_core::{
    DragPolicy, Error, LayoutEvent, LayoutEventBus, Result, UnitTransform, ViewKind,
};
pub use kitchenplan_layout::{
    Catalog, DragController, DragOutcome, ItemTemplate, PlacedItem, PlanDocument, Planner,
    PointMm, PointerPos, Room, SpatialModel,
};
pub use kitchenplan_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting on stderr, keeping stdout for plans
/// - RUST_LOG environment variable support, INFO when unset or invalid
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

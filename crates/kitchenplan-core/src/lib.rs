//! # KitchenPlan Core
//!
//! Core types, unit transforms, and utilities for KitchenPlan.
//! Provides the shared vocabulary used by the layout engine, the settings
//! crate and both view projectors: linear unit conversions, view and drag
//! policy identifiers, error types, and the layout event bus.

pub mod constants;
pub mod error;
pub mod event_bus;
pub mod types;
pub mod units;

pub use error::{CatalogError, Error, Result};

// Re-export event bus for convenience
pub use event_bus::{
    EventBusError, EventCategory, EventFilter, LayoutEvent, LayoutEventBus, LayoutEventBusConfig,
    SubscriptionId,
};

pub use types::{DragPolicy, ViewKind};
pub use units::{clamp_floor, format_mm, format_number, parse_dimension, UnitTransform};

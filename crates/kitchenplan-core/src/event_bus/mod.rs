//! # Layout Event Bus
//!
//! Both views render from the same canonical model and re-project whenever
//! it changes. The bus is how they learn that it changed.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kitchenplan_core::event_bus::{EventCategory, EventFilter, LayoutEvent, LayoutEventBus};
//!
//! let bus = LayoutEventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Model]),
//!     |event| println!("re-project after: {}", event.description()),
//! );
//!
//! bus.publish(LayoutEvent::RoomResized { width_mm: 1200.0, depth_mm: 800.0 });
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;

//! Error handling for KitchenPlan
//!
//! The geometric core has no fatal error class: unknown items, collisions
//! and malformed numeric input degrade to no-ops, reverts or clamped values.
//! The errors here cover the fallible edges around it:
//! - Catalog errors (template loading and lookup)
//! - I/O and JSON errors (export, catalog files)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Catalog error type
///
/// Represents errors related to loading item templates and looking them up.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// No template with this id exists
    #[error("Unknown catalog template: {id}")]
    UnknownTemplate {
        /// The requested template id.
        id: String,
    },

    /// Two templates share the same id
    #[error("Duplicate catalog template id: {id}")]
    DuplicateId {
        /// The duplicated template id.
        id: String,
    },

    /// Template footprint is not a positive area
    #[error("Template {id} has invalid footprint {width_mm}x{depth_mm} mm")]
    InvalidFootprint {
        /// The offending template id.
        id: String,
        /// Declared width in millimeters.
        width_mm: f64,
        /// Declared depth in millimeters.
        depth_mm: f64,
    },

    /// Template height is present but not positive
    #[error("Template {id} has invalid height {height_mm} mm")]
    InvalidHeight {
        /// The offending template id.
        id: String,
        /// Declared height in millimeters.
        height_mm: f64,
    },

    /// Template id is empty
    #[error("Catalog template with empty id")]
    EmptyId,
}

/// Main error type for KitchenPlan
///
/// A unified error type that can represent any error from the library crates.
#[derive(Error, Debug)]
pub enum Error {
    /// Catalog error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if this is a catalog error
    pub fn is_catalog_error(&self) -> bool {
        matches!(self, Error::Catalog(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

//! Axis-aligned footprint collision checks.
//!
//! Rectangles are half-open, so two items that share an edge do not
//! collide. All rectangles passed to one query must use the same unit
//! space; the layout engine uses millimeters throughout.

use serde::{Deserialize, Serialize};

use crate::model::SpatialModel;

/// Axis-aligned rectangle `[x, x + w) × [y, y + h)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Strict overlap test; shared boundaries do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Whether `(px, py)` lies inside the rectangle (edges inclusive).
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

/// Collision predicate over the current placement.
///
/// Stateless: each query scans every placed item, which is plenty for a
/// room with tens of items.
#[derive(Debug, Clone, Copy)]
pub struct CollisionIndex<'a> {
    model: &'a SpatialModel,
}

impl<'a> CollisionIndex<'a> {
    pub fn new(model: &'a SpatialModel) -> Self {
        Self { model }
    }

    /// Does `candidate` overlap any placed item other than `exclude_uid`?
    pub fn overlaps(&self, candidate: &Rect, exclude_uid: &str) -> bool {
        self.colliders(candidate, exclude_uid).next().is_some()
    }

    /// Uids of every item `candidate` overlaps, excluding `exclude_uid`.
    pub fn colliders<'b>(
        &'b self,
        candidate: &'b Rect,
        exclude_uid: &'b str,
    ) -> impl Iterator<Item = &'a str> + 'b {
        self.model
            .list_items()
            .iter()
            .filter(move |other| other.uid != exclude_uid)
            .filter(move |other| candidate.overlaps(&other.footprint()))
            .map(|other| other.uid.as_str())
    }
}

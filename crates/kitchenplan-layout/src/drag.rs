//! Drag state machine.
//!
//! One [`DragController`] is shared by both views. A press that hits an
//! item creates an owned [`DragSession`]; moves update only the session's
//! preview; release either commits the session's final position to the
//! [`SpatialModel`] or reverts it. Pointer positions arrive already
//! translated into room-local millimeters by the originating projector.
//!
//! ```text
//! Idle --begin--> Active --update--> Active
//!                   |--finish--> Idle (Committed | Reverted)
//!                   `--cancel--> Idle (Reverted)
//! ```

use kitchenplan_core::{clamp_floor, DragPolicy, UnitTransform, ViewKind};

use crate::collision::{CollisionIndex, Rect};
use crate::model::{PointMm, SpatialModel};

/// State of the one in-flight drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    uid: String,
    view: ViewKind,
    policy: DragPolicy,
    /// Footprint size of the dragged item (mm)
    size: (f64, f64),
    /// Canonical position at press, restored on revert
    original: PointMm,
    /// Pointer minus item top-left at press, so the item tracks the pointer
    grab_offset: PointMm,
    /// Where the dragged item is currently drawn
    preview: PointMm,
    /// Last position that passed the live checks
    accepted: PointMm,
}

impl DragSession {
    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn view(&self) -> ViewKind {
        self.view
    }

    pub fn policy(&self) -> DragPolicy {
        self.policy
    }

    pub fn original(&self) -> PointMm {
        self.original
    }

    pub fn preview(&self) -> PointMm {
        self.preview
    }

    pub fn accepted(&self) -> PointMm {
        self.accepted
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
enum DragState {
    #[default]
    Idle,
    Active(DragSession),
}

/// Result of one pointer move during an active drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewUpdate {
    /// Where the dragged item should be drawn now
    pub position: PointMm,
    /// `false` when the live checks rejected this move and the preview
    /// fell back to the last accepted position
    pub accepted: bool,
}

/// How a drag session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// The model now holds `position` for `uid`
    Committed {
        uid: String,
        view: ViewKind,
        position: PointMm,
    },
    /// The model was left untouched; the item is drawn at `original` again
    Reverted {
        uid: String,
        view: ViewKind,
        original: PointMm,
    },
    /// There was no active session
    Idle,
}

impl DragOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, DragOutcome::Committed { .. })
    }

    pub fn is_reverted(&self) -> bool {
        matches!(self, DragOutcome::Reverted { .. })
    }
}

/// Per-interaction drag state machine.
#[derive(Debug, Clone)]
pub struct DragController {
    units: UnitTransform,
    grid_px: f64,
    state: DragState,
}

impl DragController {
    pub fn new(units: UnitTransform, grid_px: f64) -> Self {
        Self {
            units,
            grid_px,
            state: DragState::Idle,
        }
    }

    pub fn units(&self) -> &UnitTransform {
        &self.units
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Active(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Active(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Preview position of `uid` if it is the item being dragged.
    pub fn preview_of(&self, uid: &str) -> Option<PointMm> {
        self.session()
            .filter(|session| session.uid == uid)
            .map(|session| session.preview)
    }

    /// Start dragging `uid` from `pointer`.
    ///
    /// Returns `false` and stays put when a session is already active or
    /// `uid` is not in the model.
    pub fn begin(
        &mut self,
        model: &SpatialModel,
        uid: &str,
        view: ViewKind,
        policy: DragPolicy,
        pointer: PointMm,
    ) -> bool {
        if let DragState::Active(session) = &self.state {
            tracing::debug!(
                "Ignoring press on {} while {} is being dragged",
                uid,
                session.uid
            );
            return false;
        }

        let Some(item) = model.get(uid) else {
            tracing::debug!("Ignoring press on unknown item {}", uid);
            return false;
        };

        let original = item.position();
        self.state = DragState::Active(DragSession {
            uid: item.uid.clone(),
            view,
            policy,
            size: (item.width_mm, item.depth_mm),
            original,
            grab_offset: pointer - original,
            preview: original,
            accepted: original,
        });
        tracing::debug!("Drag started on {} in {} ({})", uid, view, policy);
        true
    }

    /// Feed a pointer move into the active session.
    ///
    /// Only the preview changes; the model is never written here.
    pub fn update(&mut self, model: &SpatialModel, pointer: PointMm) -> Option<PreviewUpdate> {
        let units = self.units;
        let grid_px = self.grid_px;
        let DragState::Active(session) = &mut self.state else {
            return None;
        };

        let raw = pointer - session.grab_offset;
        let update = match session.policy {
            DragPolicy::SnapAndCheckLive => {
                let candidate = snap_and_clamp(&units, grid_px, model, session, raw);
                let rect = Rect::new(
                    candidate.x,
                    candidate.y,
                    session.size.0,
                    session.size.1,
                );
                if CollisionIndex::new(model).overlaps(&rect, &session.uid) {
                    tracing::trace!(
                        "Rejected move of {} to ({}, {}) mm",
                        session.uid,
                        candidate.x,
                        candidate.y
                    );
                    session.preview = session.accepted;
                    PreviewUpdate {
                        position: session.accepted,
                        accepted: false,
                    }
                } else {
                    session.accepted = candidate;
                    session.preview = candidate;
                    PreviewUpdate {
                        position: candidate,
                        accepted: true,
                    }
                }
            }
            DragPolicy::ClampAndCheckOnRelease => {
                let candidate = clamp_centre(model, session, raw);
                session.accepted = candidate;
                session.preview = candidate;
                PreviewUpdate {
                    position: candidate,
                    accepted: true,
                }
            }
        };
        Some(update)
    }

    /// End the active session on pointer release.
    pub fn finish(&mut self, model: &mut SpatialModel) -> DragOutcome {
        let DragState::Active(session) = std::mem::take(&mut self.state) else {
            return DragOutcome::Idle;
        };

        let candidate = match session.policy {
            // Every accepted move was already snapped, clamped and checked
            DragPolicy::SnapAndCheckLive => Some(session.accepted),
            DragPolicy::ClampAndCheckOnRelease => {
                let settled = settle_on_release(&self.units, model, &session);
                let rect = Rect::new(
                    settled.x,
                    settled.y,
                    session.size.0,
                    session.size.1,
                );
                if CollisionIndex::new(model).overlaps(&rect, &session.uid) {
                    None
                } else {
                    Some(settled)
                }
            }
        };

        match candidate {
            Some(position) => {
                model.commit_position(&session.uid, position.x, position.y);
                tracing::debug!(
                    "Drag of {} committed at ({}, {}) mm",
                    session.uid,
                    position.x,
                    position.y
                );
                DragOutcome::Committed {
                    uid: session.uid,
                    view: session.view,
                    position,
                }
            }
            None => {
                tracing::debug!("Drag of {} collides on release, reverting", session.uid);
                DragOutcome::Reverted {
                    uid: session.uid,
                    view: session.view,
                    original: session.original,
                }
            }
        }
    }

    /// Abort the active session without touching the model.
    pub fn cancel(&mut self) -> DragOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Active(session) => {
                tracing::debug!("Drag of {} cancelled", session.uid);
                DragOutcome::Reverted {
                    uid: session.uid,
                    view: session.view,
                    original: session.original,
                }
            }
            DragState::Idle => DragOutcome::Idle,
        }
    }
}

/// Snap a raw top-left to the plan grid, then clamp it into the room.
///
/// Works in plan pixels so the grid lines up with what is drawn. A grid
/// step that is not a positive finite number leaves the position unsnapped.
fn snap_and_clamp(
    units: &UnitTransform,
    grid_px: f64,
    model: &SpatialModel,
    session: &DragSession,
    raw: PointMm,
) -> PointMm {
    let room = model.room();
    let snap = |mm: f64| {
        let px = units.mm_to_px(mm);
        if grid_px.is_finite() && grid_px > 0.0 {
            ((px / grid_px + 0.5).floor()) * grid_px
        } else {
            px
        }
    };
    let max_x = units.mm_to_px(room.width_mm) - units.mm_to_px(session.size.0);
    let max_y = units.mm_to_px(room.depth_mm) - units.mm_to_px(session.size.1);

    PointMm::new(
        units.px_to_mm(clamp_floor(snap(raw.x), 0.0, max_x)),
        units.px_to_mm(clamp_floor(snap(raw.y), 0.0, max_y)),
    )
}

/// Keep the item's centre inside the room; edges may still overhang.
fn clamp_centre(model: &SpatialModel, session: &DragSession, raw: PointMm) -> PointMm {
    let room = model.room();
    let (half_w, half_d) = (session.size.0 / 2.0, session.size.1 / 2.0);
    let cx = clamp_floor(raw.x + half_w, 0.0, room.width_mm);
    let cy = clamp_floor(raw.y + half_d, 0.0, room.depth_mm);
    PointMm::new(cx - half_w, cy - half_d)
}

/// Round the preview to whole plan pixels and clamp the footprint into the room.
fn settle_on_release(units: &UnitTransform, model: &SpatialModel, session: &DragSession) -> PointMm {
    let room = model.room();
    let round = |v: f64| (v + 0.5).floor();
    let max_x = units.mm_to_px(room.width_mm - session.size.0);
    let max_y = units.mm_to_px(room.depth_mm - session.size.1);

    PointMm::new(
        units.px_to_mm(clamp_floor(round(units.mm_to_px(session.preview.x)), 0.0, max_x)),
        units.px_to_mm(clamp_floor(round(units.mm_to_px(session.preview.y)), 0.0, max_y)),
    )
}

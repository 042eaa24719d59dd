//=========================================================================
// Collision System
//=========================================================================
//
// Spaces, labels, and the spatial index boundary, plus per-entity
// collision phase tracking.
//
// Architecture:
//   Entity ──add()──→ SpatialIndex (opaque algorithm)
//                          ↑ hits(space)
//   Phase tracker ─────────┘ (once per enter-frame)
//        ↓
//   CollisionStart / CollisionStop events
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicU64, Ordering};

//=== Internal Dependencies ===============================================

use crate::core::entity::EntityId;

//=== Module Declarations =================================================

mod linear_index;
mod phase;

//=== Public API ==========================================================

pub use linear_index::LinearIndex;
pub use phase::{activate_phase, CollisionError, Phase, PhaseDelta, COLLISION_START, COLLISION_STOP};

//=== Label ===============================================================

/// Tag classifying what a [`Space`] represents.
///
/// Games define their own labels as constants:
///
/// ```rust
/// # use aetheric_stage::prelude::*;
/// const ENEMY: Label = Label(1);
/// const PICKUP: Label = Label(2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub u32);

//=== SpaceId =============================================================

/// Process-unique identity of a [`Space`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpaceId(u64);

impl SpaceId {
    /// Allocates a fresh id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

//=== Rect ================================================================

/// Axis-aligned rectangle in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Whether the two rectangles share interior area. Touching edges do
    /// not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

//=== Space ===============================================================

/// A collision region registered with a [`SpatialIndex`].
#[derive(Debug, Clone, PartialEq)]
pub struct Space {
    pub id: SpaceId,
    /// Owning entity, if any. Particles and other scenery have none.
    pub entity: Option<EntityId>,
    pub bounds: Rect,
    pub label: Label,
}

impl Space {
    /// Creates a space with a freshly allocated id.
    pub fn new(bounds: Rect, label: Label) -> Self {
        Self {
            id: SpaceId::next(),
            entity: None,
            bounds,
            label,
        }
    }

    /// Creates a space owned by `entity`.
    pub fn for_entity(entity: EntityId, bounds: Rect, label: Label) -> Self {
        Self {
            entity: Some(entity),
            ..Self::new(bounds, label)
        }
    }
}

//=== SpatialIndex Trait ==================================================

/// Boundary of the collision spatial index.
///
/// The search algorithm is up to the implementation. The contract every
/// implementation honors: [`SpatialIndex::hits`] returns the complete,
/// duplicate-free set of spaces overlapping the queried space, never
/// including the queried space itself.
pub trait SpatialIndex: Send {
    /// Inserts a space, replacing any stored space with the same id.
    fn add(&mut self, space: Space);

    /// Removes and returns the space with the given id.
    fn remove(&mut self, id: SpaceId) -> Option<Space>;

    /// Looks up a stored space.
    fn get(&self, id: SpaceId) -> Option<&Space>;

    /// All stored spaces overlapping `space`.
    fn hits(&self, space: &Space) -> Vec<&Space>;

    /// Drops every stored space.
    fn clear(&mut self);

    /// Number of stored spaces.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Moves a stored space. Returns `false` if the id is unknown.
    fn update(&mut self, id: SpaceId, bounds: Rect) -> bool {
        match self.remove(id) {
            Some(mut space) => {
                space.bounds = bounds;
                self.add(space);
                true
            }
            None => false,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

//=========================================================================
// Collision Phase
//=========================================================================
//
// Per-entity enter/exit tracking of touched labels.
//
// Architecture:
//   activate_phase() → bus.bind(entity, ENTER_FRAME, phase_tick)
//
//   Each ENTER_FRAME:
//     SpatialIndex::hits(own space) → fresh HashSet<Label>
//       → new labels  → CollisionStart(label)
//       → lost labels → CollisionStop(label)
//       → touching = fresh set (always replaced)
//
// Only the previous tick is remembered; nothing is patched incrementally.
//
// The bound handler owns a token; Phase keeps a Weak to it. Dropping the
// handler (self-unbind, unbind_entity, bus reset) leaves the Weak dead, and
// the next activation binds again.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Weak};

use log::debug;

//=== Internal Dependencies ===============================================

use super::{Label, SpaceId};
use crate::core::entity::{EntityId, EntityRegistry};
use crate::core::event_bus::{
    BindingResponse, Dispatch, EventBus, EventPayload, ENTER_FRAME,
};

//=== Event Names =========================================================

/// Raised on an entity when it starts touching a label. Payload: `Label`.
pub const COLLISION_START: &str = "CollisionStart";

/// Raised on an entity when it stops touching a label. Payload: `Label`.
pub const COLLISION_STOP: &str = "CollisionStop";

//=== CollisionError ======================================================

/// Errors returned by [`activate_phase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionError {
    /// No entity with this id is registered.
    UnknownEntity(EntityId),

    /// The entity's type does not expose a collision phase.
    MissingPhase(EntityId),
}

impl fmt::Display for CollisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownEntity(id) => write!(f, "Entity {} is not registered", id),
            Self::MissingPhase(id) => {
                write!(f, "Entity {} does not implement collision phase tracking", id)
            }
        }
    }
}

impl std::error::Error for CollisionError {}

//=== PhaseDelta ==========================================================

/// Labels gained and lost across one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseDelta {
    pub started: Vec<Label>,
    pub stopped: Vec<Label>,
}

impl PhaseDelta {
    pub fn is_empty(&self) -> bool {
        self.started.is_empty() && self.stopped.is_empty()
    }
}

//=== Phase ===============================================================

/// Collision phase state embedded in an entity.
///
/// Entities expose it through `Entity::collision_phase`; the tracker owns
/// every field once activated.
#[derive(Debug, Clone, Default)]
pub struct Phase {
    space: Option<SpaceId>,
    touching: HashSet<Label>,
    listener: Weak<()>,
}

impl Phase {
    /// Space whose overlaps are tracked, once activated.
    pub fn space(&self) -> Option<SpaceId> {
        self.space
    }

    /// Whether tracking has been activated.
    pub fn is_active(&self) -> bool {
        self.space.is_some()
    }

    /// Whether an ENTER_FRAME handler is currently bound for this phase.
    pub fn is_listening(&self) -> bool {
        self.listener.strong_count() > 0
    }

    /// Labels touched as of the last tick.
    pub fn touching(&self) -> &HashSet<Label> {
        &self.touching
    }

    pub fn is_touching(&self, label: Label) -> bool {
        self.touching.contains(&label)
    }

    /// Replaces the touched set with `current` and reports the difference.
    pub fn advance(&mut self, current: HashSet<Label>) -> PhaseDelta {
        let delta = PhaseDelta {
            started: current.difference(&self.touching).copied().collect(),
            stopped: self.touching.difference(&current).copied().collect(),
        };
        self.touching = current;
        delta
    }
}

//=== Activation ==========================================================

/// Starts collision phase tracking for `entity` against `space`.
///
/// The entity's type must expose a [`Phase`] through
/// `Entity::collision_phase`. On error nothing is bound and the entity is
/// left untouched. Activating an entity whose handler is still bound only
/// retargets the space; one whose handler was dropped is bound again.
pub fn activate_phase(
    bus: &mut EventBus,
    entities: &mut EntityRegistry,
    entity: EntityId,
    space: SpaceId,
) -> Result<(), CollisionError> {
    let phase = entities
        .get_mut(entity)
        .ok_or(CollisionError::UnknownEntity(entity))?
        .collision_phase()
        .ok_or(CollisionError::MissingPhase(entity))?;

    phase.space = Some(space);

    if phase.is_listening() {
        debug!("Retargeted collision phase of {} to {:?}", entity, space);
    } else {
        let token = Arc::new(());
        phase.listener = Arc::downgrade(&token);
        bus.bind(entity, ENTER_FRAME, move |dispatch, id, payload| {
            let _listening = &token;
            phase_tick(dispatch, id, payload)
        });
        debug!("Activated collision phase for {} on {:?}", entity, space);
    }

    Ok(())
}

//--- phase_tick() --------------------------------------------------------
//
// ENTER_FRAME handler installed by activate_phase(). Unbinds itself once
// the entity or its phase is gone.
//
fn phase_tick(dispatch: &mut Dispatch<'_>, id: EntityId, _: &EventPayload) -> BindingResponse {
    let Some(phase) = dispatch.entities.get_mut(id).and_then(|e| e.collision_phase()) else {
        return BindingResponse::Unbind;
    };

    let current: HashSet<Label> = match phase.space.and_then(|s| dispatch.collision.get(s)) {
        Some(space) => dispatch
            .collision
            .hits(space)
            .into_iter()
            .map(|hit| hit.label)
            .collect(),
        None => HashSet::new(),
    };

    let delta = phase.advance(current);

    for label in delta.started {
        dispatch.trigger(id, COLLISION_START, EventPayload::Label(label));
    }
    for label in delta.stopped {
        dispatch.trigger(id, COLLISION_STOP, EventPayload::Label(label));
    }

    BindingResponse::Keep
}

//=========================================================================
// Tests
//=========================================================================

//=========================================================================
// Dispatch Scope
//=========================================================================
//
// Borrowed view of the world handed to event handlers, plus the queue of
// events raised while handlers run.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

//=== Internal Dependencies ===============================================

use super::EventPayload;
use crate::core::collision::SpatialIndex;
use crate::core::entity::{EntityId, EntityRegistry};

//=== Target ==============================================================

/// Who receives a queued event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Only the handlers bound to this entity.
    Entity(EntityId),

    /// Every entity binding plus every global binding.
    All,
}

//=== QueuedEvent =========================================================

#[derive(Debug)]
pub(super) struct QueuedEvent {
    pub(super) target: Target,
    pub(super) name: String,
    pub(super) payload: EventPayload,
}

//=== Dispatch ============================================================

/// State available to handlers during a dispatch.
///
/// Fields are public so handlers can borrow the entity registry and the
/// collision index at the same time.
pub struct Dispatch<'a> {
    pub entities: &'a mut EntityRegistry,
    pub collision: &'a dyn SpatialIndex,
    pending: VecDeque<QueuedEvent>,
}

impl<'a> Dispatch<'a> {
    pub fn new(entities: &'a mut EntityRegistry, collision: &'a dyn SpatialIndex) -> Self {
        Self {
            entities,
            collision,
            pending: VecDeque::new(),
        }
    }

    /// Queues an event for a single entity.
    pub fn trigger(&mut self, entity: EntityId, name: &str, payload: EventPayload) {
        self.push(Target::Entity(entity), name, payload);
    }

    /// Queues an event for every binding.
    pub fn broadcast(&mut self, name: &str, payload: EventPayload) {
        self.push(Target::All, name, payload);
    }

    /// Number of events waiting for delivery.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    //--- Internal Helpers -------------------------------------------------

    fn push(&mut self, target: Target, name: &str, payload: EventPayload) {
        self.pending.push_back(QueuedEvent {
            target,
            name: name.to_string(),
            payload,
        });
    }

    pub(super) fn pop(&mut self) -> Option<QueuedEvent> {
        self.pending.pop_front()
    }

    pub(super) fn discard_pending(&mut self) {
        self.pending.clear();
    }
}

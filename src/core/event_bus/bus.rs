//=========================================================================
// Event Bus
//=========================================================================
//
// Binding storage and FIFO delivery.
//
// Pattern: bind → trigger/broadcast (queued) → run() drains → reset()
// between scenes.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::dispatch::{Dispatch, QueuedEvent, Target};
use super::{BindingResponse, EventPayload, Handler};
use crate::core::entity::EntityId;

/// Upper bound on events delivered by one `run`, guarding against
/// handlers that keep re-raising each other.
const MAX_EVENTS_PER_DISPATCH: usize = 10_000;

//=== EventBus ============================================================

/// Stores event bindings and delivers queued events to them.
///
/// Entity bindings are delivered in ascending entity id order, followed by
/// global bindings.
pub struct EventBus {
    entity_bindings: HashMap<String, BTreeMap<EntityId, Vec<Handler>>>,
    global_bindings: HashMap<String, Vec<Handler>>,
}

impl EventBus {
    /// Creates a bus with no bindings.
    pub fn new() -> Self {
        Self {
            entity_bindings: HashMap::new(),
            global_bindings: HashMap::new(),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a handler to `name` events delivered to `entity`.
    pub fn bind<F>(&mut self, entity: EntityId, name: &str, handler: F)
    where
        F: FnMut(&mut Dispatch<'_>, EntityId, &EventPayload) -> BindingResponse + Send + 'static,
    {
        self.entity_bindings
            .entry(name.to_string())
            .or_default()
            .entry(entity)
            .or_default()
            .push(Box::new(handler));
    }

    /// Binds a handler to every broadcast of `name`, independent of any entity.
    pub fn global_bind<F>(&mut self, name: &str, handler: F)
    where
        F: FnMut(&mut Dispatch<'_>, EntityId, &EventPayload) -> BindingResponse + Send + 'static,
    {
        self.global_bindings
            .entry(name.to_string())
            .or_default()
            .push(Box::new(handler));
    }

    /// Drops every binding of `entity`. Returns how many were dropped.
    pub fn unbind_entity(&mut self, entity: EntityId) -> usize {
        let mut dropped = 0;
        for by_entity in self.entity_bindings.values_mut() {
            if let Some(handlers) = by_entity.remove(&entity) {
                dropped += handlers.len();
            }
        }
        dropped
    }

    //--- Query API --------------------------------------------------------

    /// Whether `entity` has at least one handler for `name`.
    pub fn is_bound(&self, entity: EntityId, name: &str) -> bool {
        self.entity_bindings
            .get(name)
            .and_then(|by_entity| by_entity.get(&entity))
            .map(|handlers| !handlers.is_empty())
            .unwrap_or(false)
    }

    /// Total number of handlers, entity and global.
    pub fn binding_count(&self) -> usize {
        let entity: usize = self
            .entity_bindings
            .values()
            .flat_map(|by_entity| by_entity.values())
            .map(Vec::len)
            .sum();
        let global: usize = self.global_bindings.values().map(Vec::len).sum();
        entity + global
    }

    /// Drops every entity and global binding.
    pub fn reset(&mut self) {
        debug!("Resetting event bus ({} bindings)", self.binding_count());
        self.entity_bindings.clear();
        self.global_bindings.clear();
    }

    //--- Delivery ---------------------------------------------------------

    /// Delivers every event queued on `dispatch`, including events raised
    /// by handlers along the way. Returns the number of handler calls.
    pub fn run(&mut self, dispatch: &mut Dispatch<'_>) -> usize {
        let mut calls = 0;
        let mut processed = 0;

        while let Some(event) = dispatch.pop() {
            if processed >= MAX_EVENTS_PER_DISPATCH {
                warn!(
                    "Event cascade exceeded {} events, dropping {} queued",
                    MAX_EVENTS_PER_DISPATCH,
                    dispatch.pending() + 1
                );
                dispatch.discard_pending();
                break;
            }
            processed += 1;
            calls += self.deliver(&event, dispatch);
        }

        calls
    }

    //--- Internal Helpers -------------------------------------------------

    fn deliver(&mut self, event: &QueuedEvent, dispatch: &mut Dispatch<'_>) -> usize {
        let mut calls = 0;

        if let Some(by_entity) = self.entity_bindings.get_mut(&event.name) {
            match event.target {
                Target::Entity(id) => {
                    if let Some(handlers) = by_entity.get_mut(&id) {
                        calls += invoke(handlers, dispatch, id, &event.payload);
                    }
                }
                Target::All => {
                    for (&id, handlers) in by_entity.iter_mut() {
                        calls += invoke(handlers, dispatch, id, &event.payload);
                    }
                }
            }
            by_entity.retain(|_, handlers| !handlers.is_empty());
        }

        if event.target == Target::All {
            if let Some(handlers) = self.global_bindings.get_mut(&event.name) {
                calls += invoke(handlers, dispatch, EntityId::GLOBAL, &event.payload);
            }
        }

        calls
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

fn invoke(
    handlers: &mut Vec<Handler>,
    dispatch: &mut Dispatch<'_>,
    id: EntityId,
    payload: &EventPayload,
) -> usize {
    let count = handlers.len();
    handlers.retain_mut(|handler| handler(dispatch, id, payload) == BindingResponse::Keep);
    count
}

//=========================================================================
// Tests
//=========================================================================

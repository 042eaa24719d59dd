//=========================================================================
// Global Context
//=========================================================================
//
// Shared, scene-scoped data.
//
// Contains the transient state every scene reads and writes:
// - bus: event bindings
// - entities: entity registry
// - collision / pointer: spatial indices
// - draw_stack: renderables of the running scene
// - viewport: camera offset
// - delays: delayed-action scheduler
//
// Everything here except the viewport is torn down by ResetCoordinator
// between scenes.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

//=== Internal Dependencies ===============================================

use crate::core::collision::{
    activate_phase, CollisionError, LinearIndex, Rect, SpaceId, SpatialIndex,
};
use crate::core::entity::{EntityId, EntityRegistry};
use crate::core::event_bus::{Dispatch, EventBus, EventPayload};
use crate::core::render::{DrawStack, LayerStack};
use crate::core::timing::DelayScheduler;

//=== Viewport ============================================================

/// Camera offset applied when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub offset: (f64, f64),
    /// Limits camera movement when set.
    pub bounds: Option<Rect>,
}

impl Viewport {
    /// Returns the viewport to the origin with no bounds.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//=== ContextHandle =======================================================

/// Shared handle to the [`GlobalContext`].
pub type ContextHandle = Arc<Mutex<GlobalContext>>;

/// Locks the context, recovering it if a scene panicked while holding it.
pub fn lock_context(handle: &ContextHandle) -> MutexGuard<'_, GlobalContext> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

//=== GlobalContext =======================================================

/// Scene-accessible engine state.
///
/// Scenes receive a [`ContextHandle`] in their start routine and
/// `&mut GlobalContext` on every update.
pub struct GlobalContext {
    /// Entity and global event bindings.
    pub bus: EventBus,

    /// Entities of the running scene.
    pub entities: EntityRegistry,

    /// Collision spaces queried by phase trackers.
    pub collision: Box<dyn SpatialIndex>,

    /// Hover/pointer spaces.
    pub pointer: Box<dyn SpatialIndex>,

    /// Renderables of the running scene.
    pub draw_stack: Box<dyn DrawStack>,

    /// Camera state. Reset on scene entry.
    pub viewport: Viewport,

    /// Delayed actions. Pending ones are cancelled between scenes.
    pub delays: DelayScheduler,
}

impl GlobalContext {
    /// Creates a context with the bundled index and draw stack.
    pub fn new() -> Self {
        Self::with_parts(
            Box::new(LinearIndex::new()),
            Box::new(LinearIndex::new()),
            Box::new(LayerStack::new()),
        )
    }

    /// Creates a context around custom collaborators.
    pub fn with_parts(
        collision: Box<dyn SpatialIndex>,
        pointer: Box<dyn SpatialIndex>,
        draw_stack: Box<dyn DrawStack>,
    ) -> Self {
        Self {
            bus: EventBus::new(),
            entities: EntityRegistry::new(),
            collision,
            pointer,
            draw_stack,
            viewport: Viewport::default(),
            delays: DelayScheduler::new(),
        }
    }

    /// Wraps the context into a shareable handle.
    pub fn into_handle(self) -> ContextHandle {
        Arc::new(Mutex::new(self))
    }

    //--- Events -----------------------------------------------------------

    /// Delivers `name` to `entity` and everything it raises in turn.
    /// Returns the number of handler calls.
    pub fn trigger(&mut self, entity: EntityId, name: &str, payload: EventPayload) -> usize {
        let Self { bus, entities, collision, .. } = self;
        let mut dispatch = Dispatch::new(entities, &**collision);
        dispatch.trigger(entity, name, payload);
        bus.run(&mut dispatch)
    }

    /// Delivers `name` to every binding. Returns the number of handler calls.
    pub fn broadcast(&mut self, name: &str, payload: EventPayload) -> usize {
        let Self { bus, entities, collision, .. } = self;
        let mut dispatch = Dispatch::new(entities, &**collision);
        dispatch.broadcast(name, payload);
        bus.run(&mut dispatch)
    }

    //--- Collision --------------------------------------------------------

    /// Starts collision phase tracking of `entity` against `space`.
    pub fn activate_phase(&mut self, entity: EntityId, space: SpaceId) -> Result<(), CollisionError> {
        activate_phase(&mut self.bus, &mut self.entities, entity, space)
    }
}

impl Default for GlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collision::{Label, Phase, Space, COLLISION_START};
    use crate::core::entity::Entity;
    use crate::core::event_bus::{BindingResponse, ENTER_FRAME};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Walker {
        phase: Phase,
    }

    impl Entity for Walker {
        fn collision_phase(&mut self) -> Option<&mut Phase> {
            Some(&mut self.phase)
        }
    }

    #[test]
    fn viewport_reset_returns_to_origin() {
        let mut viewport = Viewport {
            offset: (30.0, -12.0),
            bounds: Some(Rect::new(0.0, 0.0, 100.0, 100.0)),
        };
        viewport.reset();
        assert_eq!(viewport, Viewport::default());
    }

    #[test]
    fn broadcast_drives_phase_tracking() {
        let mut context = GlobalContext::new();
        let walker = context.entities.insert(Walker::default());
        let own = Space::for_entity(walker, Rect::new(0.0, 0.0, 4.0, 4.0), Label(1));
        let own_id = own.id;
        context.collision.add(own);
        context.collision.add(Space::new(Rect::new(1.0, 1.0, 1.0, 1.0), Label(7)));
        context.activate_phase(walker, own_id).unwrap();

        let started = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&started);
        context.bus.bind(walker, COLLISION_START, move |_, _, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            BindingResponse::Keep
        });

        context.broadcast(ENTER_FRAME, EventPayload::Frame(1));
        context.broadcast(ENTER_FRAME, EventPayload::Frame(2));

        assert_eq!(started.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn trigger_counts_handler_calls() {
        let mut context = GlobalContext::new();
        context.bus.bind(EntityId(1), "Poke", |_, _, _| BindingResponse::Keep);
        assert_eq!(context.trigger(EntityId(1), "Poke", EventPayload::None), 1);
        assert_eq!(context.trigger(EntityId(2), "Poke", EventPayload::None), 0);
    }

    #[test]
    fn poisoned_context_is_recovered() {
        let handle = GlobalContext::new().into_handle();
        let poisoner = Arc::clone(&handle);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("scene blew up");
        })
        .join();

        assert!(handle.is_poisoned());
        assert!(lock_context(&handle).entities.is_empty());
    }
}

//=========================================================================
// Entity Registry
//=========================================================================
//
// Owns every live entity of the running scene, keyed by EntityId.
//
// Architecture:
//   Scene start → insert() → HashMap<EntityId, Box<dyn Entity>>
//                                 ↓
//   Event handlers ← get_mut() / get_as::<T>()
//                                 ↓
//   ResetCoordinator ──────→ clear() between scenes
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::collision::Phase;

//=== EntityId ============================================================

/// Identifier handed out by [`EntityRegistry::insert`].
///
/// Id `0` is reserved for global (entity-less) event bindings and is never
/// assigned to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Target id passed to handlers bound with `EventBus::global_bind`.
    pub const GLOBAL: EntityId = EntityId(0);
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== AsAny ===============================================================

/// Downcasting support for boxed entities.
///
/// Blanket-implemented for every `'static` type, so entity authors never
/// write it by hand.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=== Entity Trait ========================================================

/// Anything stored in the [`EntityRegistry`].
///
/// Capabilities are declared by overriding the accessor methods. An entity
/// that wants collision phase tracking returns its [`Phase`] from
/// [`Entity::collision_phase`]; the default declares no such capability.
///
/// ```rust
/// # use aetheric_stage::prelude::*;
/// #[derive(Default)]
/// struct Player {
///     phase: Phase,
/// }
///
/// impl Entity for Player {
///     fn collision_phase(&mut self) -> Option<&mut Phase> {
///         Some(&mut self.phase)
///     }
/// }
/// ```
pub trait Entity: AsAny + Send {
    /// Mutable phase state used by collision phase tracking.
    fn collision_phase(&mut self) -> Option<&mut Phase> {
        None
    }
}

//=== EntityRegistry ======================================================

/// Storage for the entities of the running scene.
pub struct EntityRegistry {
    entities: HashMap<EntityId, Box<dyn Entity>>,
    next_id: u64,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
            next_id: 1,
        }
    }

    /// Stores an entity and returns its freshly assigned id.
    ///
    /// Ids are never reused, not even across [`EntityRegistry::clear`].
    pub fn insert<E: Entity + 'static>(&mut self, entity: E) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, Box::new(entity));
        id
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Box<dyn Entity>> {
        self.entities.remove(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut (dyn Entity + 'static)> {
        self.entities.get_mut(&id).map(|entity| &mut **entity)
    }

    /// Returns the entity as its concrete type, if it is one.
    pub fn get_as<T: Entity + 'static>(&mut self, id: EntityId) -> Option<&mut T> {
        let entity = self.entities.get_mut(&id)?;
        <dyn Entity as AsAny>::as_any_mut(&mut **entity).downcast_mut::<T>()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drops every entity.
    pub fn clear(&mut self) {
        debug!("Clearing {} entities", self.entities.len());
        self.entities.clear();
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================

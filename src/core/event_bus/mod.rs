//=========================================================================
// Event Bus
//=========================================================================
//
// Named-event dispatch to entity-bound and global handlers.
//
// Architecture:
//   bind(entity, name, handler) → HashMap<name, BTreeMap<EntityId, Vec<Handler>>>
//   global_bind(name, handler)  → HashMap<name, Vec<Handler>>
//
//   trigger / broadcast → Dispatch queue → handlers (may queue more events)
//                                            ↓
//                         drained FIFO until empty
//
// Pattern: handlers never re-enter the bus directly. Events raised inside
// a handler are queued on the Dispatch and delivered after it returns.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::sync::Arc;

//=== Internal Dependencies ===============================================

use crate::core::collision::Label;
use crate::core::entity::EntityId;

//=== Module Declarations =================================================

mod bus;
mod dispatch;

//=== Public API ==========================================================

pub use bus::EventBus;
pub use dispatch::{Dispatch, Target};

/// Event broadcast once per logic tick. Collision phase trackers bind to it.
pub const ENTER_FRAME: &str = "EnterFrame";

/// Opaque user data carried by events and scene results.
pub type Payload = Arc<dyn Any + Send + Sync>;

//=== EventPayload ========================================================

/// Data delivered alongside an event.
#[derive(Clone, Default)]
pub enum EventPayload {
    #[default]
    None,

    /// Frame counter of the tick that raised [`ENTER_FRAME`].
    Frame(u64),

    /// Label touched or released, carried by collision phase events.
    Label(Label),

    /// Anything else.
    Custom(Payload),
}

impl EventPayload {
    pub fn label(&self) -> Option<Label> {
        match self {
            Self::Label(label) => Some(*label),
            _ => None,
        }
    }

    pub fn frame(&self) -> Option<u64> {
        match self {
            Self::Frame(frame) => Some(*frame),
            _ => None,
        }
    }

    /// Downcasts a custom payload.
    pub fn custom<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Custom(payload) => payload.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl std::fmt::Debug for EventPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Frame(frame) => write!(f, "Frame({})", frame),
            Self::Label(label) => write!(f, "Label({})", label.0),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

//=== BindingResponse =====================================================

/// Returned by every handler to decide whether it stays bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingResponse {
    Keep,
    Unbind,
}

/// Event handler. Receives the dispatch scope, the id the event was
/// delivered to ([`EntityId::GLOBAL`] for global bindings), and the payload.
pub type Handler =
    Box<dyn FnMut(&mut Dispatch<'_>, EntityId, &EventPayload) -> BindingResponse + Send>;

//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_stage::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::logging::{init_logging, LoggingConfig};

// Global systems and context
pub use crate::core::globals::{lock_context, ContextHandle, GlobalContext, GlobalSystems, Viewport};

// Scene system
pub use crate::core::scene::{FnScene, LoadingScene, Scene, SceneContext, SceneRegistry, SceneResult};

// Entities and events
pub use crate::core::entity::{Entity, EntityId};
pub use crate::core::event_bus::{BindingResponse, Dispatch, EventPayload, ENTER_FRAME};

// Collision
pub use crate::core::collision::{
    CollisionError, Label, Phase, Rect, Space, SpatialIndex, COLLISION_START, COLLISION_STOP,
};

// Render
pub use crate::core::render::{RenderLoop, RenderSignal, Renderable};

// Orchestration
pub use crate::core::orchestrator::{InputTracker, SkipHandle};

//=========================================================================
// Global Engine State
//=========================================================================
//
// Separates systems (registration tables) from context (shared data).
//
// Architecture:
//   GlobalSystems: SceneRegistry + CommandTable (owned by orchestrator)
//   GlobalContext: bus, entities, indices, draw stack (shared with scenes)
//
//=========================================================================

//=== Module Declarations =================================================

mod global_context;
mod global_systems;

//=== Public API ==========================================================

pub use global_context::{lock_context, ContextHandle, GlobalContext, Viewport};
pub use global_systems::GlobalSystems;

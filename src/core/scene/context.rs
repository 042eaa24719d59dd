//=========================================================================
// Scene Context & Result
//=========================================================================
//
// Data handed from one scene to the next.
//
//   end() ─→ SceneResult { next_scene_input }
//                 ↓
//   start(SceneContext { previous_scene, scene_input, context })
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::sync::{Arc, MutexGuard};

//=== Internal Dependencies ===============================================

use crate::core::event_bus::Payload;
use crate::core::globals::{lock_context, ContextHandle, GlobalContext};

//=== SceneResult =========================================================

/// Produced by [`Scene::end`](super::Scene::end). A missing result is
/// treated as `SceneResult::default()`.
#[derive(Clone, Default)]
pub struct SceneResult {
    /// Passed to the next scene as [`SceneContext::scene_input`].
    pub next_scene_input: Option<Payload>,
}

impl SceneResult {
    pub fn with_input<T: Any + Send + Sync>(input: T) -> Self {
        Self {
            next_scene_input: Some(Arc::new(input)),
        }
    }
}

impl std::fmt::Debug for SceneResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneResult")
            .field("next_scene_input", &self.next_scene_input.is_some())
            .finish()
    }
}

//=== SceneContext ========================================================

/// Everything a scene's start routine receives. Dropped when start returns.
pub struct SceneContext {
    /// Name of the scene that ran before, if any.
    pub previous_scene: Option<String>,

    /// Payload from the previous scene's result.
    pub scene_input: Option<Payload>,

    /// Shared engine state.
    pub context: ContextHandle,
}

impl SceneContext {
    pub(crate) fn new(
        previous_scene: Option<String>,
        result: SceneResult,
        context: ContextHandle,
    ) -> Self {
        Self {
            previous_scene,
            scene_input: result.next_scene_input,
            context,
        }
    }

    /// Downcasts the input payload.
    pub fn input<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.scene_input.as_deref()?.downcast_ref::<T>()
    }

    /// Locks the shared context.
    pub fn lock(&self) -> MutexGuard<'_, GlobalContext> {
        lock_context(&self.context)
    }
}

//=========================================================================
// Tests
//=========================================================================

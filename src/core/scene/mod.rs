//=========================================================================
// Scene System
//=========================================================================
//
// Scene definitions and the data that flows between them.
//
// Architecture:
//   SceneRegistry
//     └─ scenes: HashMap<String, Arc<dyn Scene>>
//
// Lifecycle (driven by FrameOrchestrator):
//   start(SceneContext)  on its own thread, once per entry
//   update(&mut GlobalContext) → bool   once per tick, false ends the loop
//   end() → (next name, Option<SceneResult>)
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;

//=== Module Declarations =================================================

mod context;
mod loading;
mod registry;

//=== Public API ==========================================================

pub use context::{SceneContext, SceneResult};
pub use loading::LoadingScene;
pub use registry::{SceneError, SceneRegistry};

//=== Scene Trait =========================================================

/// A named stage of the application.
///
/// Scenes are registered once and shared across threads: `start` runs on
/// a worker thread while the orchestrator waits. Per-entry state belongs
/// in the [`GlobalContext`] or behind interior mutability.
///
/// ```rust
/// # use aetheric_stage::prelude::*;
/// struct Title;
///
/// impl Scene for Title {
///     fn start(&self, context: SceneContext) {
///         let mut global = context.lock();
///         global.viewport.offset = (0.0, 0.0);
///     }
///
///     fn update(&self, _context: &mut GlobalContext) -> bool {
///         true
///     }
///
///     fn end(&self) -> (String, Option<SceneResult>) {
///         ("game".to_string(), None)
///     }
/// }
/// ```
pub trait Scene: Send + Sync {
    /// Sets the scene up. Runs on its own thread; the ticker starts once
    /// this returns.
    fn start(&self, context: SceneContext);

    /// Called on every tick. Returning `false` ends the scene.
    fn update(&self, context: &mut GlobalContext) -> bool;

    /// Names the next scene and optionally hands it a payload.
    fn end(&self) -> (String, Option<SceneResult>);
}

//=== FnScene =============================================================

type StartFn = Box<dyn Fn(SceneContext) + Send + Sync>;
type UpdateFn = Box<dyn Fn(&mut GlobalContext) -> bool + Send + Sync>;
type EndFn = Box<dyn Fn() -> (String, Option<SceneResult>) + Send + Sync>;

/// Closure-backed [`Scene`].
///
/// Start defaults to a no-op and update to "keep running", so a scene
/// built with only `new` loops until skipped.
pub struct FnScene {
    start: StartFn,
    update: UpdateFn,
    end: EndFn,
}

impl FnScene {
    pub fn new<E>(end: E) -> Self
    where
        E: Fn() -> (String, Option<SceneResult>) + Send + Sync + 'static,
    {
        Self {
            start: Box::new(|_| {}),
            update: Box::new(|_| true),
            end: Box::new(end),
        }
    }

    pub fn on_start<F>(mut self, start: F) -> Self
    where
        F: Fn(SceneContext) + Send + Sync + 'static,
    {
        self.start = Box::new(start);
        self
    }

    pub fn on_update<F>(mut self, update: F) -> Self
    where
        F: Fn(&mut GlobalContext) -> bool + Send + Sync + 'static,
    {
        self.update = Box::new(update);
        self
    }
}

impl Scene for FnScene {
    fn start(&self, context: SceneContext) {
        (self.start)(context)
    }

    fn update(&self, context: &mut GlobalContext) -> bool {
        (self.update)(context)
    }

    fn end(&self) -> (String, Option<SceneResult>) {
        (self.end)()
    }
}

//=========================================================================
// Tests
//=========================================================================

//=========================================================================
// Core Systems
//
// Everything the scene lifecycle is built from.
//
// Responsibilities:
// - Drive scenes through start, per-tick update and end (orchestrator)
// - Tear transient state down between scenes (reset)
// - Track collision phase per entity once per tick (collision)
// - Keep the render loop paused across loading and reset (render)
//
// Notes:
// Scenes see the engine only through GlobalContext, shared behind a
// mutex. The orchestrator owns the registration tables (GlobalSystems),
// the ticker, and the render handshake.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod collision;
pub mod console;
pub mod entity;
pub mod event_bus;
pub mod globals;
pub mod orchestrator;
pub mod render;
pub mod reset;
pub mod scene;
pub mod ticker;
pub mod timing;

#[cfg(test)]
pub(crate) mod test_support;

//=== Public API ==========================================================

pub use collision::{CollisionError, Label, LinearIndex, Phase, Rect, Space, SpaceId, SpatialIndex};
pub use console::{CommandError, CommandTable, ConsoleHandle};
pub use entity::{Entity, EntityId, EntityRegistry};
pub use event_bus::{BindingResponse, EventBus, EventPayload, ENTER_FRAME};
pub use globals::{lock_context, ContextHandle, GlobalContext, GlobalSystems, Viewport};
pub use orchestrator::{FrameOrchestrator, InputTracker, LifecycleState, SkipHandle};
pub use render::{DrawStack, LayerStack, RenderLoop, RenderSignal, RenderSync, Renderable};
pub use reset::{ResetCoordinator, ResetReport};
pub use scene::{FnScene, LoadingScene, Scene, SceneContext, SceneError, SceneRegistry, SceneResult};
pub use ticker::{ThreadTicker, Ticker, TickerError};
pub use timing::DelayScheduler;

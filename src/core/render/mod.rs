//=========================================================================
// Render Boundary
//=========================================================================
//
// Everything the lifecycle engine needs from rendering, and nothing more.
//
// Architecture:
//   FrameOrchestrator ──RenderSync──→ Sender<RenderSignal>
//                                           ↓
//                                  RenderLoop (own thread, pausable)
//
//   ResetCoordinator ──→ DrawStack::reset() + pre_draw()
//
// Rasterization itself lives behind the Renderable trait.
//
//=========================================================================

//=== Module Declarations =================================================

mod draw_stack;
mod render_loop;
mod sync;

//=== Public API ==========================================================

pub use draw_stack::{DrawStack, LayerStack, Renderable};
pub use render_loop::RenderLoop;
pub use sync::{RenderSignal, RenderSync};

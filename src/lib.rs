//=========================================================================
// Aetheric Stage — Library Root
//
// This crate defines the public API surface of Aetheric Stage, a
// frame-driven scene lifecycle engine.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose the core systems (`core`) for custom collaborators
// - Provide one-time logger setup (`logging`)
//
// Typical usage:
// ```no_run
// use aetheric_stage::prelude::*;
//
// fn main() {
//     EngineBuilder::new()
//         .build()
//         .init(|systems| { /* register scenes */ })
//         .run("loading");
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the scene lifecycle, collision phases, event bus and
// render handshake. Most applications only need the prelude.
//
pub mod core;
pub mod logging;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `engine` defines the builder and the engine entry point.
//
mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};

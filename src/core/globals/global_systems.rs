//=========================================================================
// Global Systems
//=========================================================================
//
// Registration tables configured before the engine runs.
//
// Contains the scene registry the orchestrator looks scenes up in, and the
// command table shared with the debug console.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::console::CommandTable;
use crate::core::scene::SceneRegistry;

//=== GlobalSystems =======================================================

/// Container for the engine's registration tables.
///
/// Accessed through [`crate::Engine::init`]. Neither table is a process
/// global, so separate engines (and tests) never share registrations.
#[derive(Default)]
pub struct GlobalSystems {
    /// Named scenes. Looked up by the orchestrator on every scene entry.
    pub scenes: SceneRegistry,

    /// Debug console commands. Cloning shares the same table.
    pub commands: CommandTable,
}

impl GlobalSystems {
    pub fn new() -> Self {
        Self::default()
    }
}

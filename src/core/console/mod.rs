//=========================================================================
// Debug Console Boundary
//=========================================================================
//
// The engine never reads console input itself. It owns:
// - CommandTable: shared name → command map, with pass-through `run`
// - ConsoleReset: per-scene reset signal, at most one in flight
//
// A console front end holds a ConsoleHandle to reach both.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use crossbeam_channel::Receiver;

//=== Module Declarations =================================================

mod commands;
mod reset;

//=== Public API ==========================================================

pub use commands::{Command, CommandError, CommandTable};
pub use reset::ConsoleReset;

//=== ConsoleHandle =======================================================

/// Console-side access to the command table and the reset signal.
#[derive(Clone)]
pub struct ConsoleHandle {
    commands: CommandTable,
    resets: Receiver<()>,
}

impl ConsoleHandle {
    pub(crate) fn new(commands: CommandTable, resets: Receiver<()>) -> Self {
        Self { commands, resets }
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    /// Takes a pending reset, if any. Never blocks.
    pub fn poll_reset(&self) -> bool {
        self.resets.try_recv().is_ok()
    }

    /// Waits up to `timeout` for the next reset.
    pub fn wait_reset(&self, timeout: Duration) -> bool {
        self.resets.recv_timeout(timeout).is_ok()
    }
}

//=========================================================================
// Render Sync
//=========================================================================
//
// Orchestrator side of the pause/resume handshake with the render loop.
//
// Signals strictly alternate: a pause while already paused (or a resume
// while running) is suppressed, so the render loop never sees a repeat.
// Sending never blocks the orchestrator; a full channel drops the signal
// and the recorded state stays put, so the next call retries it.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Sender, TrySendError};
use log::{debug, warn};

//=== RenderSignal ========================================================

/// Control message consumed by the render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderSignal {
    /// Stop drawing scene frames until the next `Resume`.
    Pause,

    /// Continue drawing.
    Resume,
}

//=== RenderSync ==========================================================

/// Sends pause/resume signals and remembers which one was sent last.
///
/// The render loop is assumed to start out running.
pub struct RenderSync {
    sender: Sender<RenderSignal>,
    paused: bool,
}

impl RenderSync {
    pub fn new(sender: Sender<RenderSignal>) -> Self {
        Self {
            sender,
            paused: false,
        }
    }

    /// Whether the last delivered signal was a pause.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pauses the render loop if it is running.
    pub fn pause(&mut self) {
        if !self.paused && self.send(RenderSignal::Pause) {
            self.paused = true;
        }
    }

    /// Resumes the render loop if it is paused.
    pub fn resume(&mut self) {
        if self.paused && self.send(RenderSignal::Resume) {
            self.paused = false;
        }
    }

    //--- Internal Helpers -------------------------------------------------

    // Returns whether the signal reached the channel.
    fn send(&self, signal: RenderSignal) -> bool {
        debug!("Render signal: {:?}", signal);
        match self.sender.try_send(signal) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!("Render signal channel full, dropped {:?}", signal);
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!("Render loop disconnected, dropped {:?}", signal);
                false
            }
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

//=========================================================================
// Console Reset
//=========================================================================
//
// Tells the debug console to drop its scene-scoped state after every scene.
//
// Architecture:
//   dispatch() ──(guard clear?)──→ thread: send() on rendezvous channel
//                                     ↓ blocks until the console polls
//                                  guard cleared
//
// At most one reset is in flight. A dispatch while one is pending is
// dropped; the console still sees the pending one.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::debug;

//=== ConsoleReset ========================================================

/// Engine side of the console reset signal.
pub struct ConsoleReset {
    sender: Sender<()>,
    in_flight: Arc<AtomicBool>,
}

impl ConsoleReset {
    /// Creates the signal and the receiver the console polls.
    pub fn channel() -> (Self, Receiver<()>) {
        let (sender, receiver) = bounded(0);
        let reset = Self {
            sender,
            in_flight: Arc::new(AtomicBool::new(false)),
        };
        (reset, receiver)
    }

    /// Sends a reset in the background unless one is already pending.
    /// Returns whether a new reset was dispatched.
    pub fn dispatch(&self) -> bool {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!("Console reset already in flight");
            return false;
        }

        let sender = self.sender.clone();
        let in_flight = Arc::clone(&self.in_flight);
        thread::spawn(move || {
            if sender.send(()).is_err() {
                debug!("Console gone, reset dropped");
            }
            in_flight.store(false, Ordering::SeqCst);
        });
        true
    }

    /// Whether a dispatched reset has not yet been picked up.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }
}

//=========================================================================
// Tests
//=========================================================================

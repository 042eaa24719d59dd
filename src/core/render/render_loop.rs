//=========================================================================
// Render Loop
//=========================================================================
//
// Pausable frame loop driven by RenderSignal messages.
//
// Architecture:
//   running: select! { signal → Pause/Resume, at(next_frame) → frame() }
//   paused:  blocking recv() until Resume
//   exit:    signal sender dropped
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{at, select, Receiver};
use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::RenderSignal;

//=== RenderLoop ==========================================================

/// Spawns the consumer side of the render handshake.
pub struct RenderLoop;

impl RenderLoop {
    /// Spawns a thread calling `frame` at `fps` while resumed.
    ///
    /// The loop starts out running and exits once every sender of
    /// `signals` is dropped.
    ///
    /// # Panics
    ///
    /// Panics if `fps <= 0.0`.
    pub fn spawn<F>(signals: Receiver<RenderSignal>, fps: f64, mut frame: F) -> thread::JoinHandle<()>
    where
        F: FnMut() + Send + 'static,
    {
        assert!(fps > 0.0, "FPS must be positive, got {}", fps);
        let frame_duration = Duration::from_secs_f64(1.0 / fps);

        thread::spawn(move || {
            let mut paused = false;
            let mut next_frame = Instant::now();

            loop {
                if paused {
                    match signals.recv() {
                        Ok(RenderSignal::Resume) => {
                            debug!("Render loop resumed");
                            paused = false;
                            next_frame = Instant::now();
                        }
                        Ok(RenderSignal::Pause) => {}
                        Err(_) => break,
                    }
                    continue;
                }

                select! {
                    recv(signals) -> signal => match signal {
                        Ok(RenderSignal::Pause) => {
                            debug!("Render loop paused");
                            paused = true;
                        }
                        Ok(RenderSignal::Resume) => {}
                        Err(_) => break,
                    },
                    recv(at(next_frame)) -> _ => {
                        frame();
                        next_frame += frame_duration;
                        let now = Instant::now();
                        if next_frame < now {
                            next_frame = now;
                        }
                    }
                }
            }

            info!("Render loop exiting");
        })
    }
}

//=========================================================================
// Tests
//=========================================================================

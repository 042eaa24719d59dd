//=========================================================================
// Logic Ticker
//=========================================================================
//
// Periodic pulse source for the scene loop.
//
// Architecture:
//   ThreadTicker
//     └─ thread: select! { stop → exit, at(next) → try_send(tick) }
//
// Ticks are coalesced: if the previous tick has not been consumed the new
// one is dropped, so the tick channel never holds more than its capacity.
// stop() returns only after the pacing thread has exited.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{at, bounded, select, Receiver, Sender, TrySendError};
use log::{debug, trace};

//=== TickerError =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum TickerError {
    /// Ticks per second must be finite and positive.
    InvalidRate(f64),

    /// start() called on a running ticker.
    AlreadyRunning,

    /// stop() called on a stopped ticker.
    NotRunning,

    /// The pacing thread panicked.
    Panicked,
}

impl fmt::Display for TickerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRate(tps) => write!(f, "Invalid tick rate {}", tps),
            Self::AlreadyRunning => write!(f, "Ticker already running"),
            Self::NotRunning => write!(f, "Ticker not running"),
            Self::Panicked => write!(f, "Ticker thread panicked"),
        }
    }
}

impl std::error::Error for TickerError {}

//=== Ticker Trait ========================================================

/// A pulse source the orchestrator starts after a scene's start routine
/// completes and stops before reset.
pub trait Ticker: Send {
    /// Begins sending `()` on `ticks` at `tps` per second.
    fn start(&mut self, tps: f64, ticks: Sender<()>) -> Result<(), TickerError>;

    /// Stops ticking. No tick is sent after this returns.
    fn stop(&mut self) -> Result<(), TickerError>;
}

//=== ThreadTicker ========================================================

struct Running {
    stop: Sender<()>,
    thread: JoinHandle<u64>,
}

/// [`Ticker`] backed by one pacing thread per run.
#[derive(Default)]
pub struct ThreadTicker {
    running: Option<Running>,
}

impl ThreadTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    fn pace(period: Duration, ticks: Sender<()>, stop: Receiver<()>) -> u64 {
        let mut next = Instant::now() + period;
        let mut sent = 0;

        loop {
            select! {
                recv(stop) -> _ => break,
                recv(at(next)) -> _ => {}
            }
            next += period;

            match ticks.try_send(()) {
                Ok(()) => sent += 1,
                Err(TrySendError::Full(())) => trace!("Tick dropped, previous still pending"),
                Err(TrySendError::Disconnected(())) => break,
            }
        }
        sent
    }
}

impl Ticker for ThreadTicker {
    fn start(&mut self, tps: f64, ticks: Sender<()>) -> Result<(), TickerError> {
        if !(tps.is_finite() && tps > 0.0) {
            return Err(TickerError::InvalidRate(tps));
        }
        if self.running.is_some() {
            return Err(TickerError::AlreadyRunning);
        }

        let period = Duration::from_secs_f64(1.0 / tps);
        let (stop, stop_rx) = bounded(0);
        let thread = thread::spawn(move || Self::pace(period, ticks, stop_rx));

        debug!("Ticker started at {} TPS", tps);
        self.running = Some(Running { stop, thread });
        Ok(())
    }

    fn stop(&mut self) -> Result<(), TickerError> {
        let Running { stop, thread } = self.running.take().ok_or(TickerError::NotRunning)?;

        // Disconnecting wakes the pacing thread.
        drop(stop);
        let sent = thread.join().map_err(|_| TickerError::Panicked)?;
        debug!("Ticker stopped after {} ticks", sent);
        Ok(())
    }
}

impl Drop for ThreadTicker {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

//=========================================================================
// Tests
//=========================================================================

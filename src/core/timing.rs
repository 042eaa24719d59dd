//=========================================================================
// Delayed Actions
//=========================================================================
//
// Runs closures after a delay unless the scene ends first.
//
// Architecture:
//   do_after(d, f) → thread: select! { after(d) → f(), cancel_rx → drop }
//   cancel_pending() → try_send on a zero-capacity channel until no
//                      waiting delay accepts it
//
// A rendezvous channel only accepts a send while some receiver is blocked
// on it, so the drain loop terminates once every waiting delay has been
// cancelled.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::Duration;

use crossbeam_channel::{after, bounded, select, Receiver, Sender};
use log::{debug, trace};

//=== DelayScheduler ======================================================

/// Schedules delayed actions and cancels them between scenes.
#[derive(Clone)]
pub struct DelayScheduler {
    cancel_tx: Sender<()>,
    cancel_rx: Receiver<()>,
}

impl DelayScheduler {
    pub fn new() -> Self {
        let (cancel_tx, cancel_rx) = bounded(0);
        Self { cancel_tx, cancel_rx }
    }

    /// Runs `action` on its own thread after `delay`, unless cancelled by
    /// [`DelayScheduler::cancel_pending`] first.
    pub fn do_after<F>(&self, delay: Duration, action: F) -> thread::JoinHandle<bool>
    where
        F: FnOnce() + Send + 'static,
    {
        let cancel = self.cancel_rx.clone();
        thread::spawn(move || {
            select! {
                recv(after(delay)) -> _ => {
                    trace!("Delay of {:?} elapsed", delay);
                    action();
                    true
                }
                recv(cancel) -> _ => {
                    trace!("Delay of {:?} cancelled", delay);
                    false
                }
            }
        })
    }

    /// Cancels every delay currently waiting. Never blocks. Returns how many
    /// were cancelled.
    pub fn cancel_pending(&self) -> usize {
        let mut cancelled = 0;
        while self.cancel_tx.try_send(()).is_ok() {
            cancelled += 1;
        }
        if cancelled > 0 {
            debug!("Cancelled {} pending delays", cancelled);
        }
        cancelled
    }
}

impl Default for DelayScheduler {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn short_delay_runs_action() {
        let scheduler = DelayScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);

        let handle = scheduler.do_after(Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(handle.join().unwrap());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cancel_pending_stops_waiting_delays() {
        let scheduler = DelayScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let counter = Arc::clone(&fired);
                scheduler.do_after(Duration::from_secs(30), move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect();

        // Let every delay thread reach its select.
        thread::sleep(Duration::from_millis(200));

        assert_eq!(scheduler.cancel_pending(), 3);
        for handle in handles {
            assert!(!handle.join().unwrap());
        }
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn cancel_pending_with_nothing_waiting_returns_immediately() {
        let scheduler = DelayScheduler::new();
        assert_eq!(scheduler.cancel_pending(), 0);
    }
}

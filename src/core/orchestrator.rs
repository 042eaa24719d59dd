//=========================================================================
// Frame Orchestrator
//=========================================================================
//
// Drives scenes through their lifecycle, one at a time, forever.
//
// Architecture:
//   Loading        viewport reset → lookup → input restart
//                  start() on its own thread ──done──┐
//                  render Pause ─── wait on done ←───┘ ─── render Resume
//   Active         ticker start
//                  select! { tick → ENTER_FRAME + update(), skip → exit }
//   Transitioning  ticker stop (joined) → drain stale ticks → render Pause
//   Resetting      ResetCoordinator → end() → console reset
//   Loading(next)
//
// The context lock is never held while waiting on a start routine, so
// start may lock it freely.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::mem;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{bounded, select, Receiver, Sender};
use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::console::ConsoleReset;
use crate::core::event_bus::{EventPayload, ENTER_FRAME};
use crate::core::globals::{lock_context, ContextHandle, GlobalSystems};
use crate::core::render::RenderSync;
use crate::core::reset::ResetCoordinator;
use crate::core::scene::{Scene, SceneContext, SceneResult};
use crate::core::ticker::Ticker;

//=== TickControl =========================================================
//
// Outcome of one loop iteration.
//
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== LifecycleState ======================================================

/// Where the orchestrator is in the current scene's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Loading,
    Active,
    Transitioning,
    Resetting,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Loading => "Loading",
            Self::Active => "Active",
            Self::Transitioning => "Transitioning",
            Self::Resetting => "Resetting",
        };
        f.write_str(name)
    }
}

//=== SkipHandle ==========================================================

/// Ends the running scene's loop from another thread.
#[derive(Clone)]
pub struct SkipHandle {
    sender: Sender<()>,
}

impl SkipHandle {
    pub fn new(sender: Sender<()>) -> Self {
        Self { sender }
    }

    /// Requests a skip. Returns `false` if one is already pending.
    pub fn skip(&self) -> bool {
        self.sender.try_send(()).is_ok()
    }
}

//=== InputTracker ========================================================

/// Input-change tracking restarted on every scene entry.
pub trait InputTracker: Send {
    fn restart(&mut self);
}

//=== FrameOrchestrator ===================================================

pub struct FrameOrchestrator {
    systems: GlobalSystems,
    context: ContextHandle,
    ticker: Box<dyn Ticker>,
    tps: f64,

    tick_tx: Sender<()>,
    tick_rx: Receiver<()>,
    skip_tx: Sender<()>,
    skip_rx: Receiver<()>,

    render: RenderSync,
    console: Option<ConsoleReset>,
    input: Option<Box<dyn InputTracker>>,

    state: LifecycleState,
    current: String,
    previous: Option<String>,
    result: SceneResult,
    frame: u64,
}

impl FrameOrchestrator {
    //--- Construction -----------------------------------------------------

    pub fn new(
        systems: GlobalSystems,
        context: ContextHandle,
        ticker: Box<dyn Ticker>,
        render: RenderSync,
        tps: f64,
    ) -> Self {
        let (tick_tx, tick_rx) = bounded(1);
        let (skip_tx, skip_rx) = bounded(1);

        Self {
            systems,
            context,
            ticker,
            tps,
            tick_tx,
            tick_rx,
            skip_tx,
            skip_rx,
            render,
            console: None,
            input: None,
            state: LifecycleState::Loading,
            current: String::new(),
            previous: None,
            result: SceneResult::default(),
            frame: 0,
        }
    }

    /// Dispatches a console reset after every scene.
    pub fn with_console_reset(mut self, console: ConsoleReset) -> Self {
        self.console = Some(console);
        self
    }

    pub fn with_input_tracker(mut self, input: Box<dyn InputTracker>) -> Self {
        self.input = Some(input);
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn systems_mut(&mut self) -> &mut GlobalSystems {
        &mut self.systems
    }

    pub fn context(&self) -> ContextHandle {
        Arc::clone(&self.context)
    }

    pub fn skip_handle(&self) -> SkipHandle {
        SkipHandle::new(self.skip_tx.clone())
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Name of the scene the next `advance` runs.
    pub fn current_scene(&self) -> &str {
        &self.current
    }

    pub fn previous_scene(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Ticks processed since construction.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    //--- Lifecycle --------------------------------------------------------

    /// Sets the scene the next `advance` enters.
    pub fn select_scene(&mut self, name: &str) {
        self.current = name.to_string();
        self.transition(LifecycleState::Loading);
    }

    /// Runs scenes forever, starting with `first`.
    pub fn run(mut self, first: &str) -> ! {
        info!("Running, first scene is {}", first);
        self.select_scene(first);
        loop {
            self.advance();
        }
    }

    /// Runs the current scene through one full lifecycle and selects the
    /// scene it names next.
    ///
    /// # Panics
    ///
    /// Panics if the current scene is not registered.
    pub fn advance(&mut self) {
        //--- Loading ------------------------------------------------------
        self.transition(LifecycleState::Loading);
        lock_context(&self.context).viewport.reset();

        let scene = match self.systems.scenes.get(&self.current) {
            Some(scene) => scene,
            None => {
                error!("Unknown scene {}", self.current);
                panic!("Unknown scene {}", self.current);
            }
        };
        info!("Entering scene {}", self.current);

        if let Some(input) = self.input.as_mut() {
            input.restart();
        }

        self.start_scene(&scene);

        //--- Active -------------------------------------------------------
        self.transition(LifecycleState::Active);
        if let Err(e) = self.ticker.start(self.tps, self.tick_tx.clone()) {
            warn!("Ticker failed to start: {}", e);
        }

        let ticks = self.tick_rx.clone();
        let skips = self.skip_rx.clone();
        loop {
            let control = select! {
                recv(ticks) -> _ => self.tick(scene.as_ref()),
                recv(skips) -> _ => {
                    info!("Skipping scene {}", self.current);
                    TickControl::Exit
                }
            };
            if let TickControl::Exit = control {
                break;
            }
        }

        //--- Transitioning ------------------------------------------------
        self.transition(LifecycleState::Transitioning);
        if let Err(e) = self.ticker.stop() {
            warn!("Ticker failed to stop: {}", e);
        }
        let stale = self.tick_rx.try_iter().count();
        if stale > 0 {
            debug!("Dropped {} stale ticks", stale);
        }
        self.render.pause();

        //--- Resetting ----------------------------------------------------
        self.transition(LifecycleState::Resetting);
        ResetCoordinator::reset(&mut lock_context(&self.context));

        let (next, result) = scene.end();
        self.result = result.unwrap_or_default();

        if let Some(console) = &self.console {
            console.dispatch();
        }

        info!("Scene {} ended, next is {}", self.current, next);
        self.previous = Some(mem::replace(&mut self.current, next));
        self.transition(LifecycleState::Loading);
    }

    //--- Internal Helpers -------------------------------------------------

    fn transition(&mut self, next: LifecycleState) {
        if self.state != next {
            debug!("Scene {}: {} -> {}", self.current, self.state, next);
            self.state = next;
        }
    }

    // Runs start on its own thread with render paused until it signals.
    fn start_scene(&mut self, scene: &Arc<dyn Scene>) {
        let scene_context = SceneContext::new(
            self.previous.clone(),
            mem::take(&mut self.result),
            Arc::clone(&self.context),
        );
        let (done_tx, done_rx) = bounded(1);
        let starter = Arc::clone(scene);

        thread::spawn(move || {
            starter.start(scene_context);
            let _ = done_tx.send(());
        });

        self.render.pause();
        if done_rx.recv().is_err() {
            error!("Start of scene {} exited without completing", self.current);
        }
        self.render.resume();
    }

    fn tick(&mut self, scene: &dyn Scene) -> TickControl {
        self.frame += 1;
        let mut context = lock_context(&self.context);
        context.broadcast(ENTER_FRAME, EventPayload::Frame(self.frame));

        if scene.update(&mut context) {
            TickControl::Continue
        } else {
            TickControl::Exit
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

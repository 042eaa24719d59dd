//=========================================================================
// Aetheric Stage
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run(first)──>  [never returns]
//         │                          │
//         ├─ with_tps()              ├─ init(|systems| ...)
//         ├─ with_channel_capacity() ├─ render_signals() → render thread
//         └─ with_*() collaborators  └─ debug_console()  → console thread
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver};
use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::collision::{LinearIndex, SpatialIndex};
use crate::core::console::{ConsoleHandle, ConsoleReset};
use crate::core::globals::{ContextHandle, GlobalContext, GlobalSystems};
use crate::core::orchestrator::{FrameOrchestrator, InputTracker, SkipHandle};
use crate::core::render::{DrawStack, LayerStack, RenderSignal, RenderSync};
use crate::core::ticker::{ThreadTicker, Ticker};
use crate::logging::{init_logging, LoggingConfig};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic ticks per second)
/// - **Channel capacity**: 128 render signals
/// - **Debug console**: enabled, with `skip` and `help` registered
/// - **Collaborators**: [`ThreadTicker`], two [`LinearIndex`]es, [`LayerStack`]
///
/// # Examples
///
/// ```no_run
/// use aetheric_stage::prelude::*;
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .with_logging(LoggingConfig::default())
///     .build()
///     .init(|systems| {
///         systems
///             .scenes
///             .register("menu", FnScene::new(|| ("menu".to_string(), None)))
///             .unwrap();
///     })
///     .run("menu");
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    debug_console: bool,
    ticker: Option<Box<dyn Ticker>>,
    collision: Option<Box<dyn SpatialIndex>>,
    pointer: Option<Box<dyn SpatialIndex>>,
    draw_stack: Option<Box<dyn DrawStack>>,
    input_tracker: Option<Box<dyn InputTracker>>,
    logging: Option<LoggingConfig>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            debug_console: true,
            ticker: None,
            collision: None,
            pointer: None,
            draw_stack: None,
            input_tracker: None,
            logging: None,
        }
    }

    /// Sets the scene tick rate.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics unless `tps` is finite and positive.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(
            tps.is_finite() && tps > 0.0,
            "TPS must be finite and positive, got {}",
            tps
        );
        self.tps = tps;
        self
    }

    /// Sets the capacity of the render signal channel.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Disables console resets and the built-in console commands.
    pub fn without_debug_console(mut self) -> Self {
        self.debug_console = false;
        self
    }

    pub fn with_ticker<T: Ticker + 'static>(mut self, ticker: T) -> Self {
        self.ticker = Some(Box::new(ticker));
        self
    }

    pub fn with_collision_index<I: SpatialIndex + 'static>(mut self, index: I) -> Self {
        self.collision = Some(Box::new(index));
        self
    }

    /// Index used for hover/pointer spaces.
    pub fn with_pointer_index<I: SpatialIndex + 'static>(mut self, index: I) -> Self {
        self.pointer = Some(Box::new(index));
        self
    }

    pub fn with_draw_stack<D: DrawStack + 'static>(mut self, draw_stack: D) -> Self {
        self.draw_stack = Some(Box::new(draw_stack));
        self
    }

    /// Restarted on every scene entry.
    pub fn with_input_tracker<T: InputTracker + 'static>(mut self, tracker: T) -> Self {
        self.input_tracker = Some(Box::new(tracker));
        self
    }

    /// Installs the global logger when the engine is built.
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging = Some(config);
        self
    }

    /// Builds the engine instance.
    ///
    /// Consumes the builder. Register scenes with [`Engine::init`], then
    /// call [`Engine::run`].
    pub fn build(self) -> Engine {
        if let Some(config) = self.logging {
            init_logging(config);
        }
        info!(
            "Building engine (TPS: {}, channel: {}, console: {})",
            self.tps, self.channel_capacity, self.debug_console
        );

        let (render_tx, render_rx) = bounded(self.channel_capacity);

        let context = GlobalContext::with_parts(
            self.collision.unwrap_or_else(|| Box::new(LinearIndex::new())),
            self.pointer.unwrap_or_else(|| Box::new(LinearIndex::new())),
            self.draw_stack.unwrap_or_else(|| Box::new(LayerStack::new())),
        );

        let mut orchestrator = FrameOrchestrator::new(
            GlobalSystems::new(),
            context.into_handle(),
            self.ticker.unwrap_or_else(|| Box::new(ThreadTicker::new())),
            RenderSync::new(render_tx),
            self.tps,
        );

        if let Some(tracker) = self.input_tracker {
            orchestrator = orchestrator.with_input_tracker(tracker);
        }

        let mut console = None;
        if self.debug_console {
            let skip = orchestrator.skip_handle();
            let commands = orchestrator.systems_mut().commands.clone();
            if let Err(e) = commands.add_builtins(skip) {
                warn!("Built-in commands not registered: {}", e);
            }

            let (reset, resets) = ConsoleReset::channel();
            orchestrator = orchestrator.with_console_reset(reset);
            console = Some(ConsoleHandle::new(commands, resets));
        }

        Engine {
            orchestrator,
            render_signals: render_rx,
            console,
            tps: self.tps,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Aetheric Stage runtime.
///
/// # Architecture
///
/// ```text
/// Engine (calling thread)
///   └─► FrameOrchestrator (loops forever)
///         ├─► scene start     (worker thread per scene)
///         ├─► ThreadTicker    (pacing thread per scene)
///         └─► RenderSignal ──► render loop (caller-owned thread)
/// ```
pub struct Engine {
    orchestrator: FrameOrchestrator,
    render_signals: Receiver<RenderSignal>,
    console: Option<ConsoleHandle>,
    tps: f64,
    channel_capacity: usize,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Provides mutable access to [`GlobalSystems`] for scene and command
    /// registration before the engine runs.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut GlobalSystems),
    {
        info!("Initializing engine systems");
        init_fn(self.orchestrator.systems_mut());
        info!(
            "Engine initialization complete ({} scenes)",
            self.orchestrator.systems_mut().scenes.len()
        );
        self
    }

    //--- Handles ----------------------------------------------------------

    /// Pause/resume stream for a render loop such as
    /// [`RenderLoop`](crate::core::render::RenderLoop).
    pub fn render_signals(&self) -> Receiver<RenderSignal> {
        self.render_signals.clone()
    }

    pub fn skip_handle(&self) -> SkipHandle {
        self.orchestrator.skip_handle()
    }

    pub fn context(&self) -> ContextHandle {
        self.orchestrator.context()
    }

    /// `None` when built with `without_debug_console`.
    pub fn debug_console(&self) -> Option<ConsoleHandle> {
        self.console.clone()
    }

    //--- Execution --------------------------------------------------------

    /// Hands the orchestrator over for step-wise driving with
    /// [`FrameOrchestrator::advance`].
    pub fn into_orchestrator(self) -> FrameOrchestrator {
        self.orchestrator
    }

    /// Runs scenes forever, starting with `first`.
    ///
    /// # Panics
    ///
    /// Panics when a scene name is not registered.
    pub fn run(self, first: &str) -> ! {
        info!(
            "Starting engine runtime (TPS: {}, channel: {})",
            self.tps, self.channel_capacity
        );
        self.orchestrator.run(first)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::{FnScene, LoadingScene};
    use std::time::Duration;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert!(builder.debug_console);
    }

    #[test]
    fn builder_with_tps() {
        let builder = EngineBuilder::new().with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be finite and positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be finite and positive")]
    fn builder_with_tps_panics_on_negative() {
        EngineBuilder::new().with_tps(-60.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be finite and positive")]
    fn builder_with_tps_panics_on_infinity() {
        EngineBuilder::new().with_tps(f64::INFINITY);
    }

    #[test]
    #[should_panic(expected = "TPS must be finite and positive")]
    fn builder_with_tps_panics_on_nan() {
        EngineBuilder::new().with_tps(f64::NAN);
    }

    #[test]
    fn builder_with_channel_capacity() {
        let builder = EngineBuilder::new().with_channel_capacity(256);
        assert_eq!(builder.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .build();

        assert_eq!(engine.tps, 120.0);
        assert_eq!(engine.channel_capacity, 256);
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn debug_console_registers_builtins() {
        let engine = EngineBuilder::new().build();
        let console = engine.debug_console().unwrap();
        assert_eq!(console.commands().keys(), vec!["help".to_string(), "skip".to_string()]);
    }

    #[test]
    fn without_debug_console_has_no_handle() {
        let engine = EngineBuilder::new().without_debug_console().build();
        assert!(engine.debug_console().is_none());
    }

    #[test]
    fn init_registers_scenes() {
        let engine = EngineBuilder::new().build().init(|systems| {
            systems
                .scenes
                .register("menu", FnScene::new(|| ("menu".to_string(), None)))
                .unwrap();
        });

        let mut orchestrator = engine.into_orchestrator();
        assert!(orchestrator.systems_mut().scenes.contains("menu"));
    }

    #[test]
    fn loading_scene_hands_over_to_first_scene() {
        let (loaded_tx, loaded_rx) = bounded(1);
        let engine = EngineBuilder::new()
            .with_tps(200.0)
            .build()
            .init(move |systems| {
                systems.scenes.register("loading", LoadingScene::new("menu", loaded_rx)).unwrap();
                systems
                    .scenes
                    .register("menu", FnScene::new(|| ("menu".to_string(), None)).on_update(|_| false))
                    .unwrap();
            });
        let render = engine.render_signals();
        let console = engine.debug_console().unwrap();

        let mut orchestrator = engine.into_orchestrator();
        orchestrator.select_scene("loading");
        loaded_tx.send(()).unwrap();
        orchestrator.advance();
        assert_eq!(orchestrator.current_scene(), "menu");

        orchestrator.advance();
        assert_eq!(orchestrator.previous_scene(), Some("menu"));
        assert!(console.wait_reset(Duration::from_secs(2)));

        let signals: Vec<_> = render.try_iter().collect();
        assert_eq!(signals.first(), Some(&RenderSignal::Pause));
        assert_eq!(signals.last(), Some(&RenderSignal::Pause));
    }

    #[test]
    fn console_skip_ends_running_scene() {
        let engine = EngineBuilder::new()
            .with_tps(200.0)
            .build()
            .init(|systems| {
                systems
                    .scenes
                    .register("idle", FnScene::new(|| ("done".to_string(), None)))
                    .unwrap();
            });
        let console = engine.debug_console().unwrap();
        console.commands().run("skip", &["scene"]).unwrap();

        let mut orchestrator = engine.into_orchestrator();
        orchestrator.select_scene("idle");
        orchestrator.advance();
        assert_eq!(orchestrator.current_scene(), "done");
    }
}

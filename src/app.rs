//=========================================================================
// Application
//=========================================================================
//
// Entry point and lifecycle owner.
//
// Architecture:
// ```text
//     AppBuilder ──build(factory)──> App ──run()──> startup
//         │                           │              ↓
//         ├─ with_config()            │          main loop (FrameOrchestrator)
//         ├─ with_title()             │              ↓
//         └─ with_size()              │          shutdown (reverse order)
//                                     └─ run_frame() for stepping by hand
// ```
//
//=========================================================================

//=== Module Declarations =================================================

mod config;
mod error;
mod factory;
mod frame;
mod lifecycle;

//=== Public API ==========================================================

pub use config::{AppConfig, ConfigError, RenderConfig, WindowConfig};
pub use error::AppError;
pub use factory::SubsystemFactory;
pub use frame::{FrameOrchestrator, FramePhase, FramePipeline};

//=== External Dependencies ===============================================

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::clock::ClockTree;
use crate::core::event_bus::{EventBus, EventSender};
use crate::core::game::{Game, GameState, KeyBindings};
use crate::core::input::InputSink;
use crate::core::quit::QuitToken;
use crate::core::subsystem::{ConsoleSubsystem, DisplayMode, WindowSubsystem};
use lifecycle::{AppCore, Stage};

//=== AppBuilder ==========================================================

/// Builder for configuring and constructing an [`App`].
///
/// # Default Values
///
/// - **Window**: "Aetheric Runtime", 1600×800, windowed
/// - **Nominal frame**: 1/60 s, root delta clamped to 0.1 s
/// - **Bindings**: Space/Start activate, Escape cancel/quit, F8 restart,
///   P pause, O step, T slow motion, R fullscreen
///
/// # Examples
///
/// ```no_run
/// use aetheric_runtime::app::AppBuilder;
/// use aetheric_runtime::headless::HeadlessFactory;
///
/// AppBuilder::new()
///     .with_title("Demo")
///     .with_size(1280, 720)
///     .build(HeadlessFactory::new())
///     .run()
///     .unwrap();
/// ```
pub struct AppBuilder {
    config: AppConfig,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Replaces the whole configuration. Configs loaded through
    /// [`AppConfig::load`] are already validated.
    ///
    /// # Panics
    ///
    /// `build` panics if the clock section fails [`AppConfig::validate`].
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.window.title = title.into();
        self
    }

    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.config.window.width = width;
        self.config.window.height = height;
        self
    }

    pub fn with_display_mode(mut self, mode: DisplayMode) -> Self {
        self.config.window.display_mode = mode;
        self
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.config.bindings = bindings;
        self
    }

    /// Delta applied by a single-frame step.
    ///
    /// # Panics
    ///
    /// Panics if `seconds <= 0.0`.
    pub fn with_nominal_frame(mut self, seconds: f64) -> Self {
        assert!(seconds > 0.0, "Nominal frame time must be positive, got {}", seconds);
        self.config.clock.nominal_frame_seconds = seconds;
        self
    }

    /// Feeds a constant delta to the root clock every frame instead of
    /// wall-clock time.
    ///
    /// # Panics
    ///
    /// Panics if `seconds < 0.0`.
    pub fn with_fixed_delta(mut self, seconds: f64) -> Self {
        assert!(seconds >= 0.0, "Fixed delta must not be negative, got {}", seconds);
        self.config.clock.fixed_delta_seconds = Some(seconds);
        self
    }

    pub fn build(self, factory: impl SubsystemFactory + 'static) -> App {
        info!(
            target: "app",
            "Building app '{}' ({}x{})",
            self.config.window.title, self.config.window.width, self.config.window.height
        );
        App {
            frames: FrameOrchestrator::new(),
            core: AppCore::new(self.config, Box::new(factory)),
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== App =================================================================

/// Owns every subsystem and the state machine for the process lifetime.
///
/// ```text
/// App
///   ├─► EventBus                     (first up, last down)
///   ├─► Input → Window → Renderer → Console → Audio
///   ├─► ClockTree (root + game clock)
///   └─► Game (idle / running)
/// ```
pub struct App {
    frames: FrameOrchestrator,
    core: AppCore,
}

impl App {
    //--- Lifecycle --------------------------------------------------------

    /// Constructs and starts every subsystem, subscribes the quit handlers
    /// and creates the state machine. A second call does nothing.
    ///
    /// On error, [`shutdown`](Self::shutdown) is still safe to call.
    pub fn startup(&mut self) -> Result<(), AppError> {
        self.core.startup()
    }

    /// Runs whole frames until quit is requested.
    ///
    /// Does no pacing of its own.
    pub fn run_main_loop(&mut self) -> u64 {
        let quit = self.core.quit.clone();
        self.frames.run_until(&mut self.core, &quit)
    }

    /// Runs exactly one frame.
    pub fn run_frame(&mut self) {
        self.frames.run_frame(&mut self.core);
    }

    /// Releases the state machine, unsubscribes the quit handlers and shuts
    /// down every subsystem in reverse construction order. Safe to repeat.
    pub fn shutdown(&mut self) {
        self.core.shutdown();
    }

    /// startup → main loop → shutdown.
    pub fn run(mut self) -> Result<(), AppError> {
        if let Err(e) = self.startup() {
            error!(target: "app", "Startup failed: {}", e);
            self.shutdown();
            return Err(e);
        }
        self.run_main_loop();
        self.shutdown();
        Ok(())
    }

    /// Sets the quit flag. Safe from callbacks, no effect if already set.
    pub fn request_quit(&self) {
        self.core.quit.request();
    }

    //--- Query API --------------------------------------------------------

    pub fn quit_token(&self) -> QuitToken {
        self.core.quit.clone()
    }

    pub fn is_quit_requested(&self) -> bool {
        self.core.quit.is_requested()
    }

    pub fn is_started(&self) -> bool {
        self.core.stage == Stage::Started
    }

    pub fn is_shut_down(&self) -> bool {
        self.core.stage == Stage::ShutDown
    }

    pub fn frame_count(&self) -> u64 {
        self.frames.frame_count()
    }

    pub fn config(&self) -> &AppConfig {
        &self.core.config
    }

    pub fn game(&self) -> Option<&Game> {
        self.core.game.as_ref()
    }

    pub fn game_state(&self) -> Option<GameState> {
        self.game().map(Game::state)
    }

    pub fn clocks(&self) -> &ClockTree {
        &self.core.clocks
    }

    pub fn events(&mut self) -> &mut EventBus {
        &mut self.core.events
    }

    pub fn event_sender(&self) -> EventSender {
        self.core.events.sender()
    }

    /// Sender into the input subsystem, `None` before startup.
    pub fn input_sink(&self) -> Option<InputSink> {
        self.core.input.get().map(|input| input.event_sink())
    }

    pub fn window(&self) -> Option<&dyn WindowSubsystem> {
        self.core.window.get()
    }

    pub fn console_mut(&mut self) -> Option<&mut (dyn ConsoleSubsystem + 'static)> {
        self.core.console.get_mut()
    }

    /// `true` once every subsystem slot has been released.
    pub fn subsystems_released(&self) -> bool {
        self.core.input.is_empty()
            && self.core.window.is_empty()
            && self.core.renderer.is_empty()
            && self.core.console.is_empty()
            && self.core.audio.is_empty()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event_bus::{names, EventArgs, Propagation};
    use crate::core::input::{InputEvent, KeyCode};
    use crate::core::subsystem::CursorMode;
    use crate::headless::{CallLog, HeadlessFactory};
    use std::cell::RefCell;
    use std::rc::Rc;

    const SUBSYSTEMS: [&str; 5] = ["Input", "Window", "Renderer", "Console", "Audio"];

    fn started(log: &CallLog) -> App {
        let mut app = AppBuilder::new()
            .with_fixed_delta(1.0 / 60.0)
            .build(HeadlessFactory::with_log(log.clone()));
        app.startup().unwrap();
        app
    }

    /// Press in one frame, release in the next.
    fn tap(app: &mut App, key: KeyCode) {
        let sink = app.input_sink().unwrap();
        sink.send(InputEvent::key_down(key)).unwrap();
        app.run_frame();
        sink.send(InputEvent::key_up(key)).unwrap();
        app.run_frame();
    }

    /// `"<Subsystem>.<phase>"` for every subsystem, in construction order.
    fn phase_entries(phase: &str) -> Vec<String> {
        SUBSYSTEMS.iter().map(|name| format!("{name}.{phase}")).collect()
    }

    //=====================================================================
    // Lifecycle Order
    //=====================================================================

    #[test]
    fn subsystems_start_in_construction_order() {
        let log = CallLog::new();
        let app = started(&log);

        assert!(app.is_started());
        assert_eq!(log.with_suffix(".startup"), phase_entries("startup"));
        assert_eq!(app.game_state(), Some(GameState::Idle));
    }

    #[test]
    fn subsystems_shut_down_in_reverse_order() {
        let log = CallLog::new();
        let mut app = started(&log);

        app.shutdown();

        assert_eq!(
            log.with_suffix(".shutdown"),
            vec!["Audio.shutdown", "Console.shutdown", "Renderer.shutdown", "Window.shutdown", "Input.shutdown"]
        );
        assert!(app.is_shut_down());
        assert!(app.subsystems_released());
        assert!(app.game().is_none());
    }

    #[test]
    fn shutdown_twice_is_a_no_op() {
        let log = CallLog::new();
        let mut app = started(&log);

        app.shutdown();
        app.shutdown();

        assert_eq!(log.count("Audio.shutdown"), 1);
        assert_eq!(log.count("Input.shutdown"), 1);
    }

    #[test]
    fn shutdown_without_startup_is_safe() {
        let log = CallLog::new();
        let mut app = AppBuilder::new().build(HeadlessFactory::with_log(log.clone()));

        app.shutdown();

        assert!(app.is_shut_down());
        assert!(log.with_suffix(".shutdown").is_empty());
    }

    #[test]
    fn second_startup_is_ignored() {
        let log = CallLog::new();
        let mut app = started(&log);

        app.startup().unwrap();

        assert_eq!(log.count("Input.startup"), 1);
    }

    #[test]
    fn quit_handlers_are_unsubscribed_on_shutdown() {
        let log = CallLog::new();
        let mut app = started(&log);
        assert!(app.events().has_subscribers(names::QUIT));
        assert!(app.events().has_subscribers(names::CLOSE_REQUESTED));

        app.shutdown();

        assert!(!app.events().has_subscribers(names::QUIT));
        assert!(!app.events().has_subscribers(names::CLOSE_REQUESTED));
    }

    //=====================================================================
    // Frame Phases
    //=====================================================================

    #[test]
    fn frame_runs_begin_update_render_end() {
        let log = CallLog::new();
        let mut app = started(&log);
        log.clear();

        app.run_frame();

        let entries = log.entries();
        let position = |entry: &str| entries.iter().position(|e| e == entry).unwrap();

        assert_eq!(log.with_suffix(".begin_frame"), phase_entries("begin_frame"));
        assert_eq!(log.with_suffix(".end_frame"), phase_entries("end_frame"));

        let clear = entries.iter().position(|e| e.starts_with("Renderer.clear_screen")).unwrap();
        assert!(position("Audio.begin_frame") < clear);
        assert!(clear < position("Renderer.begin_camera(screen)"));
        assert!(position("Renderer.end_camera(screen)") < position("Input.end_frame"));
        assert_eq!(app.frame_count(), 1);
    }

    #[test]
    fn frames_advance_the_root_clock() {
        let log = CallLog::disabled();
        let mut app = started(&log);

        for _ in 0..6 {
            app.run_frame();
        }

        let root = app.clocks().clock(app.clocks().root()).unwrap();
        assert_eq!(root.frame_count(), 6);
        approx::assert_relative_eq!(root.total_seconds(), 0.1, epsilon = 1e-9);
    }

    //=====================================================================
    // Game Flow
    //=====================================================================

    #[test]
    fn activate_then_cancel_fires_two_state_changes() {
        let log = CallLog::new();
        let mut app = started(&log);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        app.events().subscribe(names::GAME_STATE_CHANGED, move |args: &EventArgs| {
            sink.borrow_mut().push(args.get_value(names::STATE_KEY, "?").to_string());
            Propagation::Continue
        });

        tap(&mut app, KeyCode::Space);
        assert_eq!(app.game_state(), Some(GameState::Running));
        tap(&mut app, KeyCode::Escape);

        assert_eq!(app.game_state(), Some(GameState::Idle));
        assert_eq!(*seen.borrow(), vec!["running", "idle"]);
        assert!(!app.is_quit_requested());
    }

    #[test]
    fn state_changes_play_the_audio_cue() {
        let log = CallLog::new();
        let mut app = started(&log);

        tap(&mut app, KeyCode::Space);
        tap(&mut app, KeyCode::Escape);

        assert_eq!(
            log.with_prefix("Audio.play"),
            vec![
                "Audio.play(Data/Audio/TestSound.mp3 speed=0.5)",
                "Audio.play(Data/Audio/TestSound.mp3 speed=1)",
            ]
        );
    }

    #[test]
    fn escape_in_idle_quits_and_ends_the_loop() {
        let log = CallLog::disabled();
        let mut app = started(&log);
        app.input_sink().unwrap().send(InputEvent::key_down(KeyCode::Escape)).unwrap();

        let frames = app.run_main_loop();

        assert_eq!(frames, 1);
        assert!(app.is_quit_requested());
    }

    #[test]
    fn close_request_ends_the_loop() {
        let log = CallLog::disabled();
        let mut app = started(&log);
        app.event_sender().fire(names::CLOSE_REQUESTED, EventArgs::new());

        assert_eq!(app.run_main_loop(), 1);
        assert_eq!(app.game_state(), Some(GameState::Idle));
    }

    #[test]
    fn console_quit_command_requests_quit() {
        let log = CallLog::new();
        let mut app = started(&log);

        app.console_mut().unwrap().execute("quit");
        assert!(!app.is_quit_requested());
        app.run_frame();

        assert!(app.is_quit_requested());
        assert_eq!(log.count("Console.execute(quit)"), 1);
    }

    #[test]
    fn restart_replaces_game_and_its_clock() {
        let log = CallLog::disabled();
        let mut app = started(&log);
        tap(&mut app, KeyCode::Space);
        let old_clock = app.game().unwrap().clock_id();

        tap(&mut app, KeyCode::F8);

        let game = app.game().unwrap();
        assert_eq!(game.state(), GameState::Idle);
        assert_ne!(game.clock_id(), old_clock);
        assert!(!app.clocks().contains(old_clock));
        assert_eq!(app.clocks().len(), 2);
    }

    #[test]
    fn cursor_is_relative_only_while_running() {
        let log = CallLog::new();
        let mut app = started(&log);
        assert_eq!(app.window().unwrap().cursor_mode(), CursorMode::Pointer);

        tap(&mut app, KeyCode::Space);
        assert_eq!(app.window().unwrap().cursor_mode(), CursorMode::Relative);

        tap(&mut app, KeyCode::Escape);
        app.run_frame();
        assert_eq!(app.window().unwrap().cursor_mode(), CursorMode::Pointer);
        assert_eq!(log.count("Window.set_cursor_mode(Relative)"), 1);
    }

    #[test]
    fn run_performs_full_lifecycle() {
        let log = CallLog::new();
        let app = AppBuilder::new()
            .with_fixed_delta(1.0 / 60.0)
            .build(HeadlessFactory::with_log(log.clone()));
        // Queued before startup; the bus drains it on the first frame.
        let sender = app.event_sender();
        sender.fire(names::QUIT, EventArgs::new());

        app.run().unwrap();

        assert_eq!(log.count("Input.startup"), 1);
        assert_eq!(log.count("Input.begin_frame"), 1);
        assert_eq!(log.count("Input.shutdown"), 1);
    }
}

//=========================================================================
// Tests - Failed Startup
//=========================================================================

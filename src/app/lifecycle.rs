//=========================================================================
// Subsystem Lifecycle
//=========================================================================
//
// Owns every subsystem and the state machine, starts them in dependency
// order, drives them through the frame phases and tears them down in
// exactly reverse order.
//
// Construction / startup order:
//   EventBus → Input → Window → Renderer → Console → Audio → Game
//
// Shutdown order:
//   Game → quit handlers → Audio → Console → Renderer → Window → Input → EventBus
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::UVec2;
use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::config::AppConfig;
use super::error::AppError;
use super::factory::SubsystemFactory;
use super::frame::FramePipeline;
use crate::core::clock::ClockTree;
use crate::core::event_bus::{names, EventBus, Propagation, SubscriptionId};
use crate::core::game::{Game, GameContext, GameControl, GameState};
use crate::core::quit::QuitToken;
use crate::core::subsystem::{
    AudioSubsystem, ConsoleSubsystem, CursorMode, InputSubsystem, LifecycleSlot,
    RenderSubsystem, Subsystem, SubsystemError, SubsystemSlot, WindowSubsystem,
};

//=== Stage ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Stage {
    Created,
    Started,
    ShutDown,
}

//=== AppCore =============================================================

pub(super) struct AppCore {
    pub(super) config: AppConfig,
    factory: Box<dyn SubsystemFactory>,
    pub(super) stage: Stage,
    pub(super) quit: QuitToken,

    //--- Owned subsystems (construction order) ---------------------------
    pub(super) events: EventBus,
    pub(super) input: SubsystemSlot<dyn InputSubsystem>,
    pub(super) window: SubsystemSlot<dyn WindowSubsystem>,
    pub(super) renderer: SubsystemSlot<dyn RenderSubsystem>,
    pub(super) console: SubsystemSlot<dyn ConsoleSubsystem>,
    pub(super) audio: SubsystemSlot<dyn AudioSubsystem>,

    //--- Application state ------------------------------------------------
    pub(super) clocks: ClockTree,
    pub(super) game: Option<Game>,
    quit_subscriptions: Vec<(&'static str, SubscriptionId)>,
}

impl AppCore {
    pub(super) fn new(config: AppConfig, factory: Box<dyn SubsystemFactory>) -> Self {
        let clocks = ClockTree::new(config.clock);
        Self {
            config,
            factory,
            stage: Stage::Created,
            quit: QuitToken::new(),
            events: EventBus::new(),
            input: SubsystemSlot::empty(),
            window: SubsystemSlot::empty(),
            renderer: SubsystemSlot::empty(),
            console: SubsystemSlot::empty(),
            audio: SubsystemSlot::empty(),
            clocks,
            game: None,
            quit_subscriptions: Vec::new(),
        }
    }

    /// Engine-facing subsystems in construction order. The bus is driven
    /// separately, always first.
    fn slots_mut(&mut self) -> [&mut dyn LifecycleSlot; 5] {
        [
            &mut self.input,
            &mut self.window,
            &mut self.renderer,
            &mut self.console,
            &mut self.audio,
        ]
    }

    //=====================================================================
    // Startup
    //=====================================================================

    pub(super) fn startup(&mut self) -> Result<(), AppError> {
        if self.stage != Stage::Created {
            warn!(target: "app", "Startup called in stage {:?}, ignored", self.stage);
            return Ok(());
        }
        info!(target: "app", "Startup begin");

        //--- 1. Construct in dependency order ----------------------------
        let input = self.factory.create_input(&self.config);
        let input_sink = input.event_sink();
        self.input.fill(input);

        let window = self
            .factory
            .create_window(&self.config, input_sink, self.events.sender());
        let surface = window.surface();
        self.window.fill(window);

        let renderer = self.factory.create_renderer(&self.config, surface);
        self.renderer.fill(renderer);

        let console = self.factory.create_console(&self.config, self.events.sender());
        self.console.fill(console);

        let audio = self.factory.create_audio(&self.config);
        self.audio.fill(audio);

        //--- 2. Start in the same order ----------------------------------
        self.events.startup()?;
        for slot in self.slots_mut() {
            let mut result = Ok(());
            slot.with_subsystem(&mut |subsystem| {
                info!(target: "app", "Starting {}", subsystem.name());
                result = subsystem.startup();
            });
            result?;
        }

        //--- 3. Quit handlers --------------------------------------------
        for name in [names::CLOSE_REQUESTED, names::QUIT] {
            let quit = self.quit.clone();
            let id = self.events.subscribe(name, move |_args| {
                quit.request();
                Propagation::Continue
            });
            self.quit_subscriptions.push((name, id));
        }

        //--- 4. State machine --------------------------------------------
        self.game = Some(self.build_game()?);

        self.stage = Stage::Started;
        info!(target: "app", "Startup complete");
        Ok(())
    }

    fn build_game(&mut self) -> Result<Game, AppError> {
        let sounds = self
            .audio
            .get()
            .map(|audio| audio.sound_requests())
            .ok_or_else(|| SubsystemError::startup_failed("Game", "audio subsystem missing"))?;

        let dimensions = self.window.get().map_or(
            UVec2::new(self.config.window.width, self.config.window.height),
            |window| window.client_dimensions(),
        );

        let game = Game::new(
            &mut self.events,
            &mut self.clocks,
            sounds,
            self.config.bindings.clone(),
            self.config.audio.clone(),
            dimensions,
        )?;
        Ok(game)
    }

    fn restart_game(&mut self) {
        if let Some(mut old) = self.game.take() {
            old.release(&mut self.events, &mut self.clocks);
        }
        match self.build_game() {
            Ok(game) => self.game = Some(game),
            Err(e) => {
                error!(target: "app", "Failed to rebuild game: {}", e);
                self.quit.request();
            }
        }
    }

    //=====================================================================
    // Shutdown
    //=====================================================================

    /// Safe after a failed or partial startup, and safe to repeat.
    pub(super) fn shutdown(&mut self) {
        if self.stage == Stage::ShutDown {
            debug!(target: "app", "Shutdown already done");
            return;
        }
        info!(target: "app", "Shutdown begin");

        if let Some(mut game) = self.game.take() {
            game.release(&mut self.events, &mut self.clocks);
        }

        for (name, id) in self.quit_subscriptions.drain(..) {
            self.events.unsubscribe(name, id);
        }

        for slot in self.slots_mut().into_iter().rev() {
            slot.with_subsystem(&mut |subsystem| {
                info!(target: "app", "Shutting down {}", subsystem.name());
                subsystem.shutdown();
            });
            slot.release();
        }

        self.events.shutdown();
        self.stage = Stage::ShutDown;
        info!(target: "app", "Shutdown complete");
    }
}

//=== Cursor Mode =========================================================

/// Pointer whenever the user is not actively playing.
pub(super) fn cursor_mode_for(focused: bool, console_open: bool, state: GameState) -> CursorMode {
    if !focused || console_open || state == GameState::Idle {
        CursorMode::Pointer
    } else {
        CursorMode::Relative
    }
}

//=== FramePipeline =======================================================

impl FramePipeline for AppCore {
    fn begin_frame(&mut self) {
        self.events.begin_frame();
        for slot in self.slots_mut() {
            slot.with_subsystem(&mut |subsystem| subsystem.begin_frame());
        }
    }

    fn update(&mut self) {
        self.clocks.tick();

        let (Some(input), Some(window)) = (self.input.get_mut(), self.window.get_mut()) else {
            warn!(target: "app", "Update skipped: input or window missing");
            return;
        };
        input.process_pending();

        let Some(game) = self.game.as_mut() else {
            return;
        };

        let console_open = self.console.get().is_some_and(|console| console.is_open());
        window.set_cursor_mode(cursor_mode_for(window.has_focus(), console_open, game.state()));

        let mut ctx = GameContext {
            input: &*input,
            window,
            events: &mut self.events,
            clocks: &mut self.clocks,
            quit: &self.quit,
            console_open,
        };

        if game.update(&mut ctx) == GameControl::Restart {
            self.restart_game();
        }
    }

    fn render(&mut self) {
        let Some(renderer) = self.renderer.get_mut() else {
            return;
        };

        renderer.clear_screen(self.config.render.clear_color);

        if let Some(game) = &self.game {
            game.render(&mut *renderer);
        }
        if let Some(console) = self.console.get() {
            console.render(&mut *renderer, self.config.render.console_bounds());
        }
    }

    fn end_frame(&mut self) {
        self.events.end_frame();
        for slot in self.slots_mut() {
            slot.with_subsystem(&mut |subsystem| subsystem.end_frame());
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

//=========================================================================
// Game
//=========================================================================
//
// Idle/Running state machine. Owns a derived clock and a screen camera,
// turns designated keys into transitions and clock controls, and renders
// the visual for its current state.
//
// Per-update order: state keys → time keys → window keys
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{UVec2, Vec2};
use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::audio_cue::{self, AudioCueConfig};
use super::bindings::KeyBindings;
use super::state::GameState;
use crate::core::audio::SoundSender;
use crate::core::clock::{ClockError, ClockId, ClockTree};
use crate::core::event_bus::{names, EventArgs, EventBus, SubscriptionId};
use crate::core::quit::QuitToken;
use crate::core::render::{
    add_verts_for_line_segment_2d, add_verts_for_ring_2d, BlendMode, Camera, DepthMode,
    ModelConstants, RasterizerMode, Rgba8, SamplerMode, Vertex,
};
use crate::core::subsystem::{InputSubsystem, RenderSubsystem, WindowSubsystem};

//=== Constants ===========================================================

const RING_RADIUS: f32 = 300.0;
const LINE_THICKNESS: f32 = 10.0;
const SEGMENT_CORNER_OFFSET: Vec2 = Vec2::new(200.0, 100.0);

//=== GameControl =========================================================

/// What the owner should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum GameControl {
    Continue,

    /// Release this game and build a fresh one.
    Restart,
}

//=== GameContext =========================================================

/// Everything an update may read or touch, borrowed from the owner.
pub struct GameContext<'a> {
    pub input: &'a dyn InputSubsystem,
    pub window: &'a mut dyn WindowSubsystem,
    pub events: &'a mut EventBus,
    pub clocks: &'a mut ClockTree,
    pub quit: &'a QuitToken,

    /// Open console swallows every designated key.
    pub console_open: bool,
}

//=== Game ================================================================

pub struct Game {
    state: GameState,
    clock: ClockId,
    camera: Camera,
    bindings: KeyBindings,
    cue_subscription: Option<SubscriptionId>,
    released: bool,
}

impl Game {
    /// Creates a game in `Idle` with its own clock under the root, and
    /// subscribes the state-change audio cue.
    pub fn new(
        events: &mut EventBus,
        clocks: &mut ClockTree,
        sounds: SoundSender,
        bindings: KeyBindings,
        cue: AudioCueConfig,
        client_dimensions: UVec2,
    ) -> Result<Self, ClockError> {
        let clock = clocks.create_child(clocks.root())?;
        let cue_subscription = Some(audio_cue::subscribe(events, sounds, cue));

        info!(target: "game", "Game created (clock {:?})", clock);

        Ok(Self {
            state: GameState::Idle,
            clock,
            camera: Camera::orthographic("screen", Vec2::ZERO, client_dimensions.as_vec2()),
            bindings,
            cue_subscription,
            released: false,
        })
    }

    //--- Query API --------------------------------------------------------

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn clock_id(&self) -> ClockId {
        self.clock
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    //--- State Transitions ------------------------------------------------

    /// Stores `new_state` and fires exactly one change event. Requesting the
    /// current state does nothing. Returns whether a transition happened.
    pub fn set_state(&mut self, new_state: GameState, events: &mut EventBus) -> bool {
        if new_state == self.state {
            return false;
        }

        info!(target: "game", "State {} → {}", self.state, new_state);
        self.state = new_state;

        let args = EventArgs::new().with_value(names::STATE_KEY, new_state.as_str());
        events.fire(names::GAME_STATE_CHANGED, &args);
        true
    }

    //--- Update -----------------------------------------------------------

    pub fn update(&mut self, ctx: &mut GameContext<'_>) -> GameControl {
        self.camera
            .set_orthographic_view(Vec2::ZERO, ctx.window.client_dimensions().as_vec2());
        self.trace_hud(ctx.clocks);

        if ctx.console_open {
            return GameControl::Continue;
        }

        let control = self.update_state(ctx);
        self.update_time(ctx);
        self.update_window(ctx);
        control
    }

    fn update_state(&mut self, ctx: &mut GameContext<'_>) -> GameControl {
        let input = ctx.input;
        let keys = &self.bindings;

        match self.state {
            GameState::Idle => {
                if input.was_key_just_pressed(keys.quit) {
                    ctx.quit.request();
                } else if input.was_key_just_pressed(keys.activate)
                    || input.was_button_just_pressed(0, keys.activate_button)
                {
                    self.set_state(GameState::Running, ctx.events);
                }
            }
            GameState::Running => {
                if input.was_key_just_pressed(keys.cancel) {
                    self.set_state(GameState::Idle, ctx.events);
                } else if input.was_key_just_pressed(keys.restart) {
                    info!(target: "game", "Restart requested");
                    return GameControl::Restart;
                }
            }
        }
        GameControl::Continue
    }

    fn update_time(&self, ctx: &mut GameContext<'_>) {
        let input = ctx.input;
        let keys = &self.bindings;
        let Some(clock) = ctx.clocks.clock_mut(self.clock) else {
            warn!(target: "game", "Game clock {:?} missing", self.clock);
            return;
        };

        if input.was_key_just_pressed(keys.toggle_pause) {
            clock.toggle_pause();
            debug!(target: "game", "Game clock paused: {}", clock.is_paused());
        } else if input.was_key_just_pressed(keys.step_frame) {
            clock.step_single_frame();
        } else if input.is_key_down(keys.slow_motion) {
            if let Err(e) = clock.set_time_scale(keys.slow_motion_scale) {
                warn!(target: "game", "Slow motion rejected: {}", e);
            }
        } else if input.was_key_just_released(keys.slow_motion) {
            // 1.0 is always a valid scale.
            let _ = clock.set_time_scale(1.0);
        }
    }

    fn update_window(&self, ctx: &mut GameContext<'_>) {
        if self.state == GameState::Idle
            && ctx.input.was_key_just_pressed(self.bindings.toggle_fullscreen)
        {
            let mode = ctx.window.display_mode().toggled();
            info!(target: "game", "Display mode → {:?}", mode);
            ctx.window.set_display_mode(mode);
        }
    }

    fn trace_hud(&self, clocks: &ClockTree) {
        if let Some(clock) = clocks.clock(self.clock) {
            trace!(
                target: "game",
                "Time: {:.2} FPS: {:.2} Scale: {:.1}",
                clock.total_seconds(),
                clock.fps(),
                clock.time_scale()
            );
        }
    }

    //--- Render -----------------------------------------------------------

    pub fn render(&self, renderer: &mut dyn RenderSubsystem) {
        renderer.begin_camera(&self.camera);
        match self.state {
            GameState::Idle => self.render_idle(renderer),
            GameState::Running => self.render_running(renderer),
        }
        renderer.end_camera(&self.camera);
    }

    fn render_idle(&self, renderer: &mut dyn RenderSubsystem) {
        let center = (self.camera.bottom_left() + self.camera.top_right()) * 0.5;
        let mut verts = Vec::new();
        add_verts_for_ring_2d(&mut verts, center, RING_RADIUS, LINE_THICKNESS, Rgba8::YELLOW);

        submit(renderer, &verts);
    }

    fn render_running(&self, renderer: &mut dyn RenderSubsystem) {
        let dims = self.camera.top_right();
        let offset = SEGMENT_CORNER_OFFSET;
        let top_right = dims - offset;
        let bottom_left = offset;
        let top_left = Vec2::new(offset.x, dims.y - offset.y);
        let bottom_right = Vec2::new(dims.x - offset.x, offset.y);

        let mut verts = Vec::new();
        add_verts_for_line_segment_2d(&mut verts, top_right, bottom_left, LINE_THICKNESS, Rgba8::GREEN);
        add_verts_for_line_segment_2d(&mut verts, top_left, bottom_right, LINE_THICKNESS, Rgba8::GREEN);

        submit(renderer, &verts);
    }

    //--- Release ----------------------------------------------------------

    /// Unsubscribes the audio cue and removes the game clock. Safe to call
    /// more than once.
    pub fn release(&mut self, events: &mut EventBus, clocks: &mut ClockTree) {
        if self.released {
            return;
        }
        self.released = true;

        if let Some(id) = self.cue_subscription.take() {
            events.unsubscribe(names::GAME_STATE_CHANGED, id);
        }
        if let Err(e) = clocks.remove(self.clock) {
            debug!(target: "game", "Game clock already gone: {}", e);
        }
        info!(target: "game", "Game released");
    }
}

/// Fixed opaque 2D pipeline, default texture and shader.
fn submit(renderer: &mut dyn RenderSubsystem, verts: &[Vertex]) {
    renderer.set_model_constants(ModelConstants::default());
    renderer.set_blend_mode(BlendMode::Opaque);
    renderer.set_rasterizer_mode(RasterizerMode::SolidCullBack);
    renderer.set_sampler_mode(SamplerMode::BilinearClamp);
    renderer.set_depth_mode(DepthMode::Disabled);
    renderer.bind_texture(None);
    renderer.bind_shader(None);
    renderer.draw_vertex_array(verts);
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::WindowConfig;
    use crate::core::audio::SoundRequest;
    use crate::core::event_bus::Propagation;
    use crate::core::input::{ControllerButton, InputEvent, InputSystem, KeyCode};
    use crate::core::subsystem::{DisplayMode, Subsystem};
    use crate::headless::{CallLog, HeadlessRenderer, HeadlessWindow};
    use crossbeam_channel::{unbounded, Receiver};
    use std::cell::RefCell;
    use std::rc::Rc;

    //--- Test Harness -----------------------------------------------------

    struct Harness {
        events: EventBus,
        clocks: ClockTree,
        input: InputSystem,
        window: HeadlessWindow,
        quit: QuitToken,
        sounds: Receiver<SoundRequest>,
        changes: Rc<RefCell<Vec<String>>>,
        game: Game,
        console_open: bool,
    }

    impl Harness {
        fn new() -> Self {
            let mut events = EventBus::new();
            let mut clocks = ClockTree::default();
            let input = InputSystem::new();
            let window = HeadlessWindow::new(
                CallLog::new(),
                &WindowConfig::default(),
                input.event_sink(),
                events.sender(),
            );
            let (sound_tx, sounds) = unbounded();

            let changes = Rc::new(RefCell::new(Vec::new()));
            let sink = Rc::clone(&changes);
            events.subscribe(names::GAME_STATE_CHANGED, move |args| {
                sink.borrow_mut()
                    .push(args.get_value(names::STATE_KEY, "DEFAULT").to_owned());
                Propagation::Continue
            });

            let game = Game::new(
                &mut events,
                &mut clocks,
                sound_tx,
                KeyBindings::default(),
                AudioCueConfig::default(),
                window.client_dimensions(),
            )
            .unwrap();

            Self {
                events,
                clocks,
                input,
                window,
                quit: QuitToken::new(),
                sounds,
                changes,
                game,
                console_open: false,
            }
        }

        /// One frame's worth of input followed by a game update.
        fn frame(&mut self, events: &[InputEvent]) -> GameControl {
            self.input.begin_frame();
            for event in events {
                self.window.inject(*event);
            }
            self.input.process_pending();
            self.clocks.advance(1.0 / 60.0);

            let mut ctx = GameContext {
                input: &self.input,
                window: &mut self.window,
                events: &mut self.events,
                clocks: &mut self.clocks,
                quit: &self.quit,
                console_open: self.console_open,
            };
            self.game.update(&mut ctx)
        }

        fn tap(&mut self, key: KeyCode) -> GameControl {
            let control = self.frame(&[InputEvent::key_down(key)]);
            self.frame(&[InputEvent::key_up(key)]);
            control
        }

        fn changes(&self) -> Vec<String> {
            self.changes.borrow().clone()
        }

        fn game_clock(&self) -> &crate::core::clock::Clock {
            self.clocks.clock(self.game.clock_id()).unwrap()
        }
    }

    //=====================================================================
    // Transition Tests
    //=====================================================================

    #[test]
    fn starts_idle_with_own_clock() {
        let h = Harness::new();
        assert_eq!(h.game.state(), GameState::Idle);
        assert_eq!(h.clocks.len(), 2);
        assert_eq!(h.game_clock().parent(), Some(h.clocks.root()));
    }

    #[test]
    fn set_same_state_fires_nothing() {
        let mut h = Harness::new();

        assert!(!h.game.set_state(GameState::Idle, &mut h.events));
        assert!(h.changes().is_empty());

        assert!(h.game.set_state(GameState::Running, &mut h.events));
        assert!(!h.game.set_state(GameState::Running, &mut h.events));
        assert_eq!(h.changes(), vec!["running"]);
    }

    #[test]
    fn state_is_stored_before_event_fires() {
        let mut h = Harness::new();
        let (tx, rx) = unbounded();
        h.events.subscribe(names::GAME_STATE_CHANGED, move |args| {
            let _ = tx.send(args.get_value(names::STATE_KEY, "DEFAULT").to_owned());
            Propagation::Continue
        });

        h.game.set_state(GameState::Running, &mut h.events);

        assert_eq!(h.game.state(), GameState::Running);
        assert_eq!(rx.try_recv().unwrap(), "running");
    }

    #[test]
    fn activate_then_cancel_fires_once_each() {
        let mut h = Harness::new();

        h.tap(KeyCode::Space);
        assert_eq!(h.game.state(), GameState::Running);
        assert_eq!(h.changes(), vec!["running"]);

        h.tap(KeyCode::Escape);
        assert_eq!(h.game.state(), GameState::Idle);
        assert_eq!(h.changes(), vec!["running", "idle"]);
        assert!(!h.quit.is_requested());
    }

    #[test]
    fn quit_in_idle_sets_token_without_transition() {
        let mut h = Harness::new();

        h.tap(KeyCode::Escape);

        assert!(h.quit.is_requested());
        assert_eq!(h.game.state(), GameState::Idle);
        assert!(h.changes().is_empty());
    }

    #[test]
    fn controller_start_activates() {
        let mut h = Harness::new();
        h.frame(&[InputEvent::ControllerButtonDown {
            controller: 0,
            button: ControllerButton::Start,
        }]);
        assert_eq!(h.game.state(), GameState::Running);
    }

    #[test]
    fn restart_only_while_running() {
        let mut h = Harness::new();
        assert_eq!(h.tap(KeyCode::F8), GameControl::Continue);

        h.tap(KeyCode::Space);
        assert_eq!(h.tap(KeyCode::F8), GameControl::Restart);
    }

    #[test]
    fn open_console_swallows_keys() {
        let mut h = Harness::new();
        h.console_open = true;

        h.tap(KeyCode::Space);
        h.tap(KeyCode::KeyP);

        assert_eq!(h.game.state(), GameState::Idle);
        assert!(!h.game_clock().is_paused());
    }

    //=====================================================================
    // Time Control Tests
    //=====================================================================

    #[test]
    fn pause_key_toggles_game_clock() {
        let mut h = Harness::new();

        h.tap(KeyCode::KeyP);
        assert!(h.game_clock().is_paused());
        let frozen = h.game_clock().total_seconds();
        h.frame(&[]);
        assert_eq!(h.game_clock().total_seconds(), frozen);

        h.tap(KeyCode::KeyP);
        assert!(!h.game_clock().is_paused());
    }

    #[test]
    fn step_key_arms_single_step() {
        let mut h = Harness::new();
        h.tap(KeyCode::KeyP);

        h.frame(&[InputEvent::key_down(KeyCode::KeyO)]);
        assert!(h.game_clock().is_step_pending());

        let before = h.game_clock().total_seconds();
        h.frame(&[InputEvent::key_up(KeyCode::KeyO)]);
        approx::assert_relative_eq!(h.game_clock().total_seconds() - before, 1.0 / 60.0);
        assert!(h.game_clock().is_paused());
    }

    #[test]
    fn slow_motion_while_held() {
        let mut h = Harness::new();

        h.frame(&[InputEvent::key_down(KeyCode::KeyT)]);
        approx::assert_relative_eq!(h.game_clock().time_scale(), 0.1);
        h.frame(&[]);
        approx::assert_relative_eq!(h.game_clock().time_scale(), 0.1);

        h.frame(&[InputEvent::key_up(KeyCode::KeyT)]);
        approx::assert_relative_eq!(h.game_clock().time_scale(), 1.0);
    }

    //=====================================================================
    // Window & Audio Tests
    //=====================================================================

    #[test]
    fn fullscreen_toggle_only_in_idle() {
        let mut h = Harness::new();

        h.tap(KeyCode::KeyR);
        assert_eq!(h.window.display_mode(), DisplayMode::Fullscreen);

        h.tap(KeyCode::Space);
        h.tap(KeyCode::KeyR);
        assert_eq!(h.window.display_mode(), DisplayMode::Fullscreen);
    }

    #[test]
    fn state_change_queues_audio_cue() {
        let mut h = Harness::new();

        h.game.set_state(GameState::Running, &mut h.events);
        h.game.set_state(GameState::Idle, &mut h.events);

        let running = h.sounds.try_recv().unwrap();
        let idle = h.sounds.try_recv().unwrap();
        assert_eq!(running.path, std::path::PathBuf::from("Data/Audio/TestSound.mp3"));
        assert_eq!(running.playback.speed, 0.5);
        assert_eq!(idle.playback.speed, 1.0);
        assert!(!idle.looped);
    }

    #[test]
    fn release_unsubscribes_cue_and_removes_clock() {
        let mut h = Harness::new();
        assert_eq!(h.events.subscriber_count(names::GAME_STATE_CHANGED), 2);

        h.game.release(&mut h.events, &mut h.clocks);
        h.game.release(&mut h.events, &mut h.clocks);

        assert_eq!(h.events.subscriber_count(names::GAME_STATE_CHANGED), 1);
        assert!(h.clocks.clock(h.game.clock_id()).is_none());
    }

    //=====================================================================
    // Render Tests
    //=====================================================================

    #[test]
    fn idle_renders_ring_with_fixed_pipeline() {
        let h = Harness::new();
        let log = CallLog::new();
        let mut renderer = HeadlessRenderer::new(log.clone(), h.window.surface());

        h.game.render(&mut renderer);

        assert_eq!(
            log.entries(),
            vec![
                "Renderer.begin_camera(screen)",
                "Renderer.set_model_constants",
                "Renderer.set_blend_mode(Opaque)",
                "Renderer.set_rasterizer_mode(SolidCullBack)",
                "Renderer.set_sampler_mode(BilinearClamp)",
                "Renderer.set_depth_mode(Disabled)",
                "Renderer.bind_texture(None)",
                "Renderer.bind_shader(None)",
                "Renderer.draw_vertex_array(192)",
                "Renderer.end_camera(screen)",
            ]
        );
    }

    #[test]
    fn running_renders_two_segments() {
        let mut h = Harness::new();
        h.game.set_state(GameState::Running, &mut h.events);
        let mut renderer = HeadlessRenderer::new(CallLog::disabled(), h.window.surface());

        h.game.render(&mut renderer);

        assert_eq!(renderer.vertices_this_frame(), 12);
    }
}

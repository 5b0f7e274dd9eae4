//=========================================================================
// Input System
//=========================================================================
//
// Default InputSubsystem: owns the receiving end of the input sink and
// folds queued events into keyboard/mouse and controller state.
//
// Architecture:
//   window ─→ InputSink (crossbeam) ─→ process_pending() ─→ queries
//
// Frame lifecycle: begin_frame() clears deltas → window pumps events →
// process_pending() at the start of Update → queries
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::controller::{ControllerState, MAX_CONTROLLERS};
use super::event::{ControllerButton, InputEvent, KeyCode};
use super::keyboard::KeyboardState;
use crate::core::subsystem::{InputSubsystem, Subsystem, SubsystemError};

//=== Types ===============================================================

/// Sending half of the input queue.
pub type InputSink = Sender<InputEvent>;

//=== InputSystem =========================================================

pub struct InputSystem {
    sink: Sender<InputEvent>,
    events: Receiver<InputEvent>,
    keyboard: KeyboardState,
    controllers: [ControllerState; MAX_CONTROLLERS],
}

impl InputSystem {
    pub fn new() -> Self {
        let (sink, events) = unbounded();
        Self {
            sink,
            events,
            keyboard: KeyboardState::new(),
            controllers: Default::default(),
        }
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn controller(&self, index: usize) -> Option<&ControllerState> {
        self.controllers.get(index)
    }

    /// Drops every held key and button. Applied for [`InputEvent::FocusLost`].
    pub fn release_all(&mut self) {
        self.keyboard.release_all();
        for pad in &mut self.controllers {
            pad.release_all();
        }
    }

    fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown { key, modifiers } => self.keyboard.key_down(key, modifiers),
            InputEvent::KeyUp { key, modifiers } => self.keyboard.key_up(key, modifiers),
            InputEvent::MouseButtonDown { button, modifiers } => {
                self.keyboard.button_down(button, modifiers)
            }
            InputEvent::MouseButtonUp { button, modifiers } => {
                self.keyboard.button_up(button, modifiers)
            }
            InputEvent::MouseMoved { x, y } => self.keyboard.cursor_moved(x, y),
            InputEvent::ControllerConnected { controller } => {
                if let Some(pad) = self.controllers.get_mut(controller) {
                    info!(target: "input", "Controller {} connected", controller);
                    pad.set_connected(true);
                }
            }
            InputEvent::ControllerDisconnected { controller } => {
                if let Some(pad) = self.controllers.get_mut(controller) {
                    info!(target: "input", "Controller {} disconnected", controller);
                    pad.set_connected(false);
                }
            }
            InputEvent::ControllerButtonDown { controller, button } => {
                if let Some(pad) = self.controllers.get_mut(controller) {
                    pad.button_down(button);
                }
            }
            InputEvent::ControllerButtonUp { controller, button } => {
                if let Some(pad) = self.controllers.get_mut(controller) {
                    pad.button_up(button);
                }
            }
            InputEvent::FocusLost => {
                debug!(target: "input", "Focus lost, releasing held input");
                self.release_all();
            }
            InputEvent::Unidentified => {}
        }
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

//=== Subsystem ===========================================================

impl Subsystem for InputSystem {
    fn name(&self) -> &'static str {
        "Input"
    }

    fn startup(&mut self) -> Result<(), SubsystemError> {
        info!(target: "input", "Input system started ({} controller slots)", MAX_CONTROLLERS);
        Ok(())
    }

    fn begin_frame(&mut self) {
        self.keyboard.begin_frame();
        for pad in &mut self.controllers {
            pad.begin_frame();
        }
    }

    fn end_frame(&mut self) {}

    fn shutdown(&mut self) {
        let dropped = self.events.try_iter().count();
        if dropped > 0 {
            debug!(target: "input", "Discarded {} unprocessed events", dropped);
        }
        info!(target: "input", "Input system shut down");
    }
}

impl InputSubsystem for InputSystem {
    fn event_sink(&self) -> InputSink {
        self.sink.clone()
    }

    fn process_pending(&mut self) {
        let mut applied = 0usize;
        while let Ok(event) = self.events.try_recv() {
            self.apply(event);
            applied += 1;
        }
        if applied > 0 {
            trace!(target: "input", "Applied {} input events", applied);
        }
    }

    fn was_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keyboard.was_key_just_pressed(key)
    }

    fn was_key_just_released(&self, key: KeyCode) -> bool {
        self.keyboard.was_key_just_released(key)
    }

    fn is_key_down(&self, key: KeyCode) -> bool {
        self.keyboard.is_key_down(key)
    }

    fn was_button_just_pressed(&self, controller: usize, button: ControllerButton) -> bool {
        self.controller(controller)
            .is_some_and(|pad| pad.was_button_just_pressed(button))
    }

    fn is_button_down(&self, controller: usize, button: ControllerButton) -> bool {
        self.controller(controller)
            .is_some_and(|pad| pad.is_button_down(button))
    }
}

//=========================================================================
// Tests
//=========================================================================

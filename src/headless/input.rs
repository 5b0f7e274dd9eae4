//=========================================================================
// Recording Input
//=========================================================================
//
// The real InputSystem, with its lifecycle calls recorded.
//
//=========================================================================

use crate::core::input::{ControllerButton, InputSink, InputSystem, KeyCode};
use crate::core::subsystem::{InputSubsystem, Subsystem, SubsystemError};

use super::CallLog;

pub struct RecordingInput {
    log: CallLog,
    inner: InputSystem,
}

impl RecordingInput {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            inner: InputSystem::new(),
        }
    }
}

impl Subsystem for RecordingInput {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn startup(&mut self) -> Result<(), SubsystemError> {
        self.log.record("Input.startup");
        self.inner.startup()
    }

    fn begin_frame(&mut self) {
        self.log.record("Input.begin_frame");
        self.inner.begin_frame();
    }

    fn end_frame(&mut self) {
        self.log.record("Input.end_frame");
        self.inner.end_frame();
    }

    fn shutdown(&mut self) {
        self.log.record("Input.shutdown");
        self.inner.shutdown();
    }
}

impl InputSubsystem for RecordingInput {
    fn event_sink(&self) -> InputSink {
        self.inner.event_sink()
    }

    fn process_pending(&mut self) {
        self.inner.process_pending();
    }

    fn was_key_just_pressed(&self, key: KeyCode) -> bool {
        self.inner.was_key_just_pressed(key)
    }

    fn was_key_just_released(&self, key: KeyCode) -> bool {
        self.inner.was_key_just_released(key)
    }

    fn is_key_down(&self, key: KeyCode) -> bool {
        self.inner.is_key_down(key)
    }

    fn was_button_just_pressed(&self, controller: usize, button: ControllerButton) -> bool {
        self.inner.was_button_just_pressed(controller, button)
    }

    fn is_button_down(&self, controller: usize, button: ControllerButton) -> bool {
        self.inner.is_button_down(controller, button)
    }
}

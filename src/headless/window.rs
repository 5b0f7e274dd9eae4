//=========================================================================
// Headless Window
//=========================================================================

//=== External Dependencies ===============================================

use glam::UVec2;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::CallLog;
use crate::app::WindowConfig;
use crate::core::event_bus::{names, EventArgs, EventSender};
use crate::core::input::{InputEvent, InputSink};
use crate::core::subsystem::{
    CursorMode, DisplayMode, Subsystem, SubsystemError, SurfaceHandle, WindowSubsystem,
};

//=== HeadlessWindow ======================================================

/// Window with a fixed client size and no OS surface. Input and close
/// requests are injected by whoever drives it.
pub struct HeadlessWindow {
    log: CallLog,
    surface: SurfaceHandle,
    dimensions: UVec2,
    focused: bool,
    display_mode: DisplayMode,
    cursor_mode: CursorMode,
    input: InputSink,
    events: EventSender,
}

impl HeadlessWindow {
    pub fn new(log: CallLog, config: &WindowConfig, input: InputSink, events: EventSender) -> Self {
        Self {
            log,
            surface: SurfaceHandle::allocate(),
            dimensions: UVec2::new(config.width, config.height),
            focused: true,
            display_mode: config.display_mode,
            cursor_mode: CursorMode::Pointer,
            input,
            events,
        }
    }

    /// Forwards `event` to the input subsystem as if the OS produced it.
    pub fn inject(&self, event: InputEvent) {
        if self.input.send(event).is_err() {
            debug!(target: "platform", "Input subsystem gone, {:?} dropped", event);
        }
    }

    /// Queues a `close_requested` event, as a user closing the window would.
    pub fn request_close(&self) {
        self.log.record("Window.request_close");
        self.events.fire(names::CLOSE_REQUESTED, EventArgs::new());
    }

    /// Losing focus also tells the input subsystem to release held input.
    pub fn set_focus(&mut self, focused: bool) {
        if self.focused && !focused {
            self.inject(InputEvent::FocusLost);
        }
        self.focused = focused;
    }
}

impl Subsystem for HeadlessWindow {
    fn name(&self) -> &'static str {
        "Window"
    }

    fn startup(&mut self) -> Result<(), SubsystemError> {
        self.log.record("Window.startup");
        info!(
            target: "platform",
            "Headless window {}x{} ({:?})",
            self.dimensions.x, self.dimensions.y, self.surface
        );
        Ok(())
    }

    fn begin_frame(&mut self) {
        self.log.record("Window.begin_frame");
    }

    fn end_frame(&mut self) {
        self.log.record("Window.end_frame");
    }

    fn shutdown(&mut self) {
        self.log.record("Window.shutdown");
    }
}

impl WindowSubsystem for HeadlessWindow {
    fn surface(&self) -> SurfaceHandle {
        self.surface
    }

    fn client_dimensions(&self) -> UVec2 {
        self.dimensions
    }

    fn has_focus(&self) -> bool {
        self.focused
    }

    fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    fn set_display_mode(&mut self, mode: DisplayMode) {
        self.log.record(format!("Window.set_display_mode({mode:?})"));
        self.display_mode = mode;
    }

    fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    fn set_cursor_mode(&mut self, mode: CursorMode) {
        if mode != self.cursor_mode {
            self.log.record(format!("Window.set_cursor_mode({mode:?})"));
            self.cursor_mode = mode;
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event_bus::EventBus;
    use crossbeam_channel::unbounded;

    #[test]
    fn losing_focus_injects_focus_lost_once() {
        let (input, events) = unbounded();
        let bus = EventBus::new();
        let mut window = HeadlessWindow::new(CallLog::disabled(), &WindowConfig::default(), input, bus.sender());

        window.set_focus(false);
        window.set_focus(false);
        window.set_focus(true);

        assert_eq!(events.try_iter().collect::<Vec<_>>(), vec![InputEvent::FocusLost]);
        assert!(window.has_focus());
    }
}

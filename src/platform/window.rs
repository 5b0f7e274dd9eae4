//=========================================================================
// Desktop Window
//=========================================================================
//
// WindowSubsystem over a winit window. The event loop is pumped without
// blocking once per frame, so the application keeps ownership of its
// own main loop.
//
// Flow per frame:
// ```text
//  begin_frame()
//    └─ pump_app_events(ZERO)
//         ├─ keyboard / mouse → InputProcessor → InputSink
//         ├─ Focused / Resized → cached window state
//         └─ CloseRequested   → deferred "close_requested" on the bus
//    └─ PumpStatus::Exit       → "close_requested", pumping stops
// ```
//
// winit permits one event loop per process, on the main thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::UVec2;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    error::OsError,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{CursorGrabMode, Fullscreen, Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use super::input_processor::InputProcessor;
use crate::app::WindowConfig;
use crate::core::event_bus::{names, EventArgs, EventSender};
use crate::core::input::{InputEvent, InputSink};
use crate::core::subsystem::{
    CursorMode, DisplayMode, Subsystem, SubsystemError, SurfaceHandle, WindowSubsystem,
};

//=== DesktopWindow =======================================================

pub struct DesktopWindow {
    event_loop: Option<EventLoop<()>>,
    state: WindowState,
    exited: bool,
}

impl DesktopWindow {
    pub fn new(config: &WindowConfig, input: InputSink, events: EventSender) -> Self {
        Self {
            event_loop: None,
            state: WindowState {
                title: config.title.clone(),
                surface: SurfaceHandle::allocate(),
                dimensions: UVec2::new(config.width, config.height),
                focused: false,
                display_mode: config.display_mode,
                cursor_mode: CursorMode::Pointer,
                processor: InputProcessor::new(),
                input,
                events,
                window: None,
                creation_error: None,
            },
            exited: false,
        }
    }

    fn pump(&mut self) {
        if self.exited {
            return;
        }
        let Some(event_loop) = self.event_loop.as_mut() else {
            return;
        };

        let status = event_loop.pump_app_events(Some(Duration::ZERO), &mut self.state);
        self.on_pump_status(status);
    }

    /// An exited loop is never pumped again and counts as a close request.
    fn on_pump_status(&mut self, status: PumpStatus) {
        if let PumpStatus::Exit(code) = status {
            info!(target: "platform", "Event loop exited with code {}", code);
            self.exited = true;
            self.state.events.fire(names::CLOSE_REQUESTED, EventArgs::new());
        }
    }
}

impl Subsystem for DesktopWindow {
    fn name(&self) -> &'static str {
        "Window"
    }

    fn startup(&mut self) -> Result<(), SubsystemError> {
        debug!(target: "platform", "Creating winit event loop");
        self.event_loop = Some(EventLoop::new()?);

        // The window is created inside the first `resumed` callback.
        self.pump();

        if let Some(err) = self.state.creation_error.take() {
            return Err(err.into());
        }
        if self.state.window.is_none() {
            return Err(SubsystemError::startup_failed(
                "Window",
                "event loop never resumed",
            ));
        }
        Ok(())
    }

    fn begin_frame(&mut self) {
        self.pump();
    }

    fn end_frame(&mut self) {
        if let Some(window) = &self.state.window {
            window.request_redraw();
        }
    }

    fn shutdown(&mut self) {
        if let Some(window) = self.state.window.take() {
            info!(target: "platform", "Closing window {:?}", window.id());
        }
        self.event_loop = None;
    }
}

impl WindowSubsystem for DesktopWindow {
    fn surface(&self) -> SurfaceHandle {
        self.state.surface
    }

    fn client_dimensions(&self) -> UVec2 {
        self.state.dimensions
    }

    fn has_focus(&self) -> bool {
        self.state.focused
    }

    fn display_mode(&self) -> DisplayMode {
        self.state.display_mode
    }

    fn set_display_mode(&mut self, mode: DisplayMode) {
        self.state.display_mode = mode;
        if let Some(window) = &self.state.window {
            window.set_fullscreen(fullscreen_for(mode));
            debug!(target: "platform", "Display mode set to {:?}", mode);
        }
    }

    fn cursor_mode(&self) -> CursorMode {
        self.state.cursor_mode
    }

    fn set_cursor_mode(&mut self, mode: CursorMode) {
        if mode == self.state.cursor_mode {
            return;
        }
        self.state.cursor_mode = mode;
        if let Some(window) = &self.state.window {
            apply_cursor_mode(window, mode);
        }
    }
}

//=== Winit Integration ===================================================

/// Half of the window the event loop borrows mutably while pumping.
struct WindowState {
    title: String,
    surface: SurfaceHandle,
    dimensions: UVec2,
    focused: bool,
    display_mode: DisplayMode,
    cursor_mode: CursorMode,
    processor: InputProcessor,
    input: InputSink,
    events: EventSender,
    window: Option<Window>,
    creation_error: Option<OsError>,
}

impl WindowState {
    fn forward(&self, event: InputEvent) {
        if self.input.send(event).is_err() {
            debug!(target: "platform::input", "Input subsystem gone, {:?} dropped", event);
        }
    }
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (resume)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::new(self.dimensions.x, self.dimensions.y))
            .with_fullscreen(fullscreen_for(self.display_mode));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI ({:?})",
                    size.width,
                    size.height,
                    window.scale_factor(),
                    self.surface
                );
                self.dimensions = UVec2::new(size.width, size.height);
                self.focused = window.has_focus();
                apply_cursor_mode(&window, self.cursor_mode);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.creation_error = Some(e);
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.events.fire(names::CLOSE_REQUESTED, EventArgs::new());
            }

            WindowEvent::Focused(focused) => {
                debug!(target: "platform", "Window focus: {}", focused);
                if self.focused && !*focused {
                    self.forward(InputEvent::FocusLost);
                }
                self.focused = *focused;
            }

            WindowEvent::Resized(size) => {
                trace!(target: "platform", "Resized to {}x{}", size.width, size.height);
                self.dimensions = UVec2::new(size.width, size.height);
            }

            WindowEvent::ModifiersChanged(state) => {
                self.processor.update_modifiers(state.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.forward(self.processor.process_mouse_move(position.x, position.y));
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.processor.process_key_event(key_event) {
                    Some(event) => self.forward(event),
                    None => trace!(target: "platform::input", "Unmapped key ignored"),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.forward(self.processor.process_mouse_button(*button, *state));
            }

            _ => {}
        }
    }
}

//=== Helpers =============================================================

fn fullscreen_for(mode: DisplayMode) -> Option<Fullscreen> {
    match mode {
        DisplayMode::Windowed => None,
        DisplayMode::Fullscreen => Some(Fullscreen::Borderless(None)),
    }
}

fn apply_cursor_mode(window: &Window, mode: CursorMode) {
    match mode {
        CursorMode::Pointer => {
            window.set_cursor_visible(true);
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                warn!(target: "platform", "Cursor release failed: {}", e);
            }
        }
        CursorMode::Relative => {
            window.set_cursor_visible(false);
            // Some platforms only support one of the two grab modes.
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
            if let Err(e) = grabbed {
                warn!(target: "platform", "Cursor grab failed: {}", e);
            }
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event_bus::{EventBus, Propagation};
    use crossbeam_channel::unbounded;
    use std::cell::Cell;
    use std::rc::Rc;

    fn window() -> DesktopWindow {
        let (input, _rx) = unbounded();
        let bus = EventBus::new();
        DesktopWindow::new(&WindowConfig::default(), input, bus.sender())
    }

    #[test]
    fn reports_configured_size_before_startup() {
        let window = window();
        assert_eq!(window.client_dimensions(), UVec2::new(1600, 800));
        assert!(!window.has_focus());
    }

    #[test]
    fn mode_changes_are_kept_without_os_window() {
        let mut window = window();

        window.set_display_mode(DisplayMode::Fullscreen);
        window.set_cursor_mode(CursorMode::Relative);

        assert_eq!(window.display_mode(), DisplayMode::Fullscreen);
        assert_eq!(window.cursor_mode(), CursorMode::Relative);
    }

    #[test]
    fn shutdown_before_startup_is_harmless() {
        let mut window = window();
        window.begin_frame();
        window.shutdown();
        window.shutdown();
    }

    #[test]
    fn loop_exit_requests_close_once() {
        let (input, _rx) = unbounded();
        let mut bus = EventBus::new();
        let closes = Rc::new(Cell::new(0));
        let seen = Rc::clone(&closes);
        bus.subscribe(names::CLOSE_REQUESTED, move |_| {
            seen.set(seen.get() + 1);
            Propagation::Continue
        });
        let mut window = DesktopWindow::new(&WindowConfig::default(), input, bus.sender());

        window.on_pump_status(PumpStatus::Continue);
        bus.drain_deferred();
        assert_eq!(closes.get(), 0);

        window.on_pump_status(PumpStatus::Exit(0));
        window.begin_frame();
        bus.drain_deferred();

        assert_eq!(closes.get(), 1);
        assert!(window.exited);
    }

    #[test]
    fn fullscreen_is_borderless() {
        assert!(fullscreen_for(DisplayMode::Windowed).is_none());
        assert!(matches!(
            fullscreen_for(DisplayMode::Fullscreen),
            Some(Fullscreen::Borderless(None))
        ));
    }
}

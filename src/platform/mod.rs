//=========================================================================
// Platform Layer
//=========================================================================
//
// Desktop implementations of the subsystem contracts that need the OS.
//
// ```text
//  winit event loop (pumped per frame)
//     ↓
//  DesktopWindow ── InputProcessor ──→ InputSink ──→ InputSystem
//     └─ CloseRequested ──→ EventSender ──→ EventBus ("close_requested")
// ```
//
// Rendering, console and audio have no OS backend yet; DesktopFactory
// fills those slots with the headless collaborators and a disabled log.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;
mod window;

pub use window::DesktopWindow;

//=== Internal Dependencies ===============================================

use crate::app::{AppConfig, SubsystemFactory};
use crate::core::event_bus::EventSender;
use crate::core::input::{InputSink, InputSystem};
use crate::core::subsystem::{
    AudioSubsystem, ConsoleSubsystem, InputSubsystem, RenderSubsystem, SurfaceHandle,
    WindowSubsystem,
};
use crate::headless::{CallLog, HeadlessAudio, HeadlessConsole, HeadlessRenderer};

//=== DesktopFactory ======================================================

/// Real window and input; headless renderer, console and audio.
#[derive(Debug, Default)]
pub struct DesktopFactory;

impl DesktopFactory {
    pub fn new() -> Self {
        Self
    }
}

impl SubsystemFactory for DesktopFactory {
    fn create_input(&mut self, _config: &AppConfig) -> Box<dyn InputSubsystem> {
        Box::new(InputSystem::new())
    }

    fn create_window(
        &mut self,
        config: &AppConfig,
        input: InputSink,
        events: EventSender,
    ) -> Box<dyn WindowSubsystem> {
        Box::new(DesktopWindow::new(&config.window, input, events))
    }

    fn create_renderer(&mut self, _config: &AppConfig, surface: SurfaceHandle) -> Box<dyn RenderSubsystem> {
        Box::new(HeadlessRenderer::new(CallLog::disabled(), surface))
    }

    fn create_console(&mut self, _config: &AppConfig, events: EventSender) -> Box<dyn ConsoleSubsystem> {
        Box::new(HeadlessConsole::new(CallLog::disabled(), events))
    }

    fn create_audio(&mut self, _config: &AppConfig) -> Box<dyn AudioSubsystem> {
        Box::new(HeadlessAudio::new(CallLog::disabled()))
    }
}

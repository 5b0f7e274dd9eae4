//=========================================================================
// Subsystem Factory
//=========================================================================
//
// Builds each collaborator from the handles it depends on. The app calls
// these in its fixed construction order:
//
//   input → window(input sink) → renderer(surface) → console(bus) → audio
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::config::AppConfig;
use crate::core::event_bus::EventSender;
use crate::core::input::InputSink;
use crate::core::subsystem::{
    AudioSubsystem, ConsoleSubsystem, InputSubsystem, RenderSubsystem, SurfaceHandle,
    WindowSubsystem,
};

//=== SubsystemFactory ====================================================

pub trait SubsystemFactory {
    fn create_input(&mut self, config: &AppConfig) -> Box<dyn InputSubsystem>;

    fn create_window(
        &mut self,
        config: &AppConfig,
        input: InputSink,
        events: EventSender,
    ) -> Box<dyn WindowSubsystem>;

    fn create_renderer(&mut self, config: &AppConfig, surface: SurfaceHandle) -> Box<dyn RenderSubsystem>;

    fn create_console(&mut self, config: &AppConfig, events: EventSender) -> Box<dyn ConsoleSubsystem>;

    fn create_audio(&mut self, config: &AppConfig) -> Box<dyn AudioSubsystem>;
}

//=========================================================================
// Headless Collaborators
//=========================================================================
//
// In-crate implementations of every subsystem contract that draw nothing,
// play nothing and open no OS window. Each records what it is asked to do
// into a shared CallLog, which makes lifecycle order, render submissions
// and sound requests assertable.
//
// Entry format: "<Subsystem>.<call>" or "<Subsystem>.<call>(<detail>)"
//
//=========================================================================

//=== Module Declarations =================================================

mod audio;
mod console;
mod input;
mod renderer;
mod window;

//=== Public API ==========================================================

pub use audio::HeadlessAudio;
pub use console::HeadlessConsole;
pub use input::RecordingInput;
pub use renderer::HeadlessRenderer;
pub use window::HeadlessWindow;

//=== External Dependencies ===============================================

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

//=== Internal Dependencies ===============================================

use crate::app::{AppConfig, SubsystemFactory};
use crate::core::event_bus::EventSender;
use crate::core::input::InputSink;
use crate::core::subsystem::{
    AudioSubsystem, ConsoleSubsystem, InputSubsystem, RenderSubsystem, SurfaceHandle,
    WindowSubsystem,
};

//=== CallLog =============================================================

/// Shared, ordered record of collaborator calls. Clones share storage.
#[derive(Debug, Clone)]
pub struct CallLog {
    entries: Option<Arc<Mutex<Vec<String>>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self {
            entries: Some(Arc::new(Mutex::new(Vec::new()))),
        }
    }

    /// A log that discards every entry.
    pub fn disabled() -> Self {
        Self { entries: None }
    }

    pub fn record(&self, entry: impl Into<String>) {
        if let Some(mut entries) = self.lock() {
            entries.push(entry.into());
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.lock().map(|e| e.to_vec()).unwrap_or_default()
    }

    /// Entries ending in `suffix`, in order.
    pub fn with_suffix(&self, suffix: &str) -> Vec<String> {
        self.lock()
            .map(|e| e.iter().filter(|s| s.ends_with(suffix)).cloned().collect())
            .unwrap_or_default()
    }

    /// Entries starting with `prefix`, in order.
    pub fn with_prefix(&self, prefix: &str) -> Vec<String> {
        self.lock()
            .map(|e| e.iter().filter(|s| s.starts_with(prefix)).cloned().collect())
            .unwrap_or_default()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.lock()
            .map(|e| e.iter().filter(|s| *s == entry).count())
            .unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Some(mut entries) = self.lock() {
            entries.clear();
        }
    }

    fn lock(&self) -> Option<MutexGuard<'_, Vec<String>>> {
        self.entries
            .as_ref()
            .map(|e| e.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Default for CallLog {
    fn default() -> Self {
        Self::new()
    }
}

//=== HeadlessFactory =====================================================

/// Builds a fully headless subsystem set sharing one CallLog.
#[derive(Debug, Default)]
pub struct HeadlessFactory {
    log: CallLog,
}

impl HeadlessFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log(log: CallLog) -> Self {
        Self { log }
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

impl SubsystemFactory for HeadlessFactory {
    fn create_input(&mut self, _config: &AppConfig) -> Box<dyn InputSubsystem> {
        Box::new(RecordingInput::new(self.log.clone()))
    }

    fn create_window(
        &mut self,
        config: &AppConfig,
        input: InputSink,
        events: EventSender,
    ) -> Box<dyn WindowSubsystem> {
        Box::new(HeadlessWindow::new(self.log.clone(), &config.window, input, events))
    }

    fn create_renderer(&mut self, _config: &AppConfig, surface: SurfaceHandle) -> Box<dyn RenderSubsystem> {
        Box::new(HeadlessRenderer::new(self.log.clone(), surface))
    }

    fn create_console(&mut self, _config: &AppConfig, events: EventSender) -> Box<dyn ConsoleSubsystem> {
        Box::new(HeadlessConsole::new(self.log.clone(), events))
    }

    fn create_audio(&mut self, _config: &AppConfig) -> Box<dyn AudioSubsystem> {
        Box::new(HeadlessAudio::new(self.log.clone()))
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let log = CallLog::new();
        let other = log.clone();

        log.record("Window.startup");
        other.record("Renderer.startup");

        assert_eq!(log.entries(), vec!["Window.startup", "Renderer.startup"]);
        assert_eq!(log.with_suffix(".startup").len(), 2);
        assert_eq!(log.with_prefix("Window").len(), 1);
    }

    #[test]
    fn disabled_log_keeps_nothing() {
        let log = CallLog::disabled();
        log.record("Window.startup");
        assert!(log.entries().is_empty());
        assert_eq!(log.count("Window.startup"), 0);
    }
}

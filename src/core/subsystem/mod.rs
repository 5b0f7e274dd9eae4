//=========================================================================
// Subsystems
//=========================================================================
//
// Lifecycle contract shared by every engine-facing collaborator, the typed
// capability contracts layered on top of it, and the owning slot that
// makes release idempotent.
//
// Lifecycle: startup() → [begin_frame() → end_frame()]* → shutdown()
//
//=========================================================================

//=== Module Declarations =================================================

mod contracts;
mod slot;

//=== Public API ==========================================================

pub use contracts::{
    AudioSubsystem, ConsoleSubsystem, CursorMode, DisplayMode, InputSubsystem,
    RenderSubsystem, SurfaceHandle, WindowSubsystem,
};
pub use slot::{LifecycleSlot, SubsystemSlot};

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Subsystem ===========================================================

/// Four-phase lifecycle every owned subsystem implements.
///
/// `shutdown` must tolerate a `startup` that failed part way.
pub trait Subsystem {
    /// Stable name used in logs and lifecycle traces.
    fn name(&self) -> &'static str;

    fn startup(&mut self) -> Result<(), SubsystemError>;

    /// Resets per-frame buffers. Called in construction order.
    fn begin_frame(&mut self);

    /// Flushes or presents. Called in construction order.
    fn end_frame(&mut self);

    fn shutdown(&mut self);
}

//=== SubsystemError ======================================================

#[derive(Debug, Error)]
pub enum SubsystemError {
    #[error("{subsystem} failed to start: {message}")]
    StartupFailed {
        subsystem: &'static str,
        message: String,
    },

    #[error("platform event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    WindowCreation(#[from] winit::error::OsError),
}

impl SubsystemError {
    pub fn startup_failed(subsystem: &'static str, message: impl Into<String>) -> Self {
        Self::StartupFailed {
            subsystem,
            message: message.into(),
        }
    }
}

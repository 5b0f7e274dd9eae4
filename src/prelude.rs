//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_runtime::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Application
pub use crate::app::{App, AppBuilder, AppConfig, AppError, SubsystemFactory};
pub use crate::platform::DesktopFactory;
pub use crate::headless::{CallLog, HeadlessFactory};

// Events
pub use crate::core::event_bus::{names, EventArgs, EventBus, EventSender, Propagation, SubscriptionId};

// Time
pub use crate::core::clock::{ClockConfig, ClockId, ClockTree};

// Input
pub use crate::core::input::{ControllerButton, InputEvent, KeyCode, Modifiers, MouseButton};

// Game
pub use crate::core::game::{GameState, KeyBindings};

// Subsystems
pub use crate::core::subsystem::{
    AudioSubsystem, ConsoleSubsystem, CursorMode, DisplayMode, InputSubsystem, RenderSubsystem,
    Subsystem, WindowSubsystem,
};

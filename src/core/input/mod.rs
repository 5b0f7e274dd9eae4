//=========================================================================
// Input
//=========================================================================
//
// Portable input events, edge-triggered key/button state and the default
// input subsystem.
//
//=========================================================================

//=== Module Declarations =================================================

mod controller;
mod event;
mod input_system;
mod keyboard;

//=== Public API ==========================================================

pub use controller::{ControllerState, MAX_CONTROLLERS};
pub use event::{ControllerButton, InputEvent, KeyCode, Modifiers, MouseButton};
pub use input_system::{InputSink, InputSystem};
pub use keyboard::KeyboardState;

//=========================================================================
// Core Systems
//=========================================================================
//
// Platform-independent building blocks of the runtime: the event bus,
// the clock hierarchy, input state, render primitives, audio requests,
// the subsystem lifecycle, and the game itself.
//
// Nothing in here touches winit. OS integration lives in `platform`.
//
//=========================================================================

pub mod audio;
pub mod clock;
pub mod event_bus;
pub mod game;
pub mod input;
pub mod quit;
pub mod render;
pub mod subsystem;

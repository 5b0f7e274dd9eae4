//=========================================================================
// Aetheric Runtime — Library Root
//
// A small game runtime: an application object owns an ordered set of
// engine subsystems, drives a four-phase frame loop, and hosts a
// two-state game that reacts to input, events and clocks.
//
// Typical usage:
// ```no_run
// use aetheric_runtime::prelude::*;
//
// fn main() -> Result<(), AppError> {
//     AppBuilder::new()
//         .with_title("Aetheric Runtime")
//         .build(DesktopFactory::new())
//         .run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `app` owns the lifecycle and the frame loop. `core` holds the
// platform-independent systems. `headless` provides OS-free
// collaborators for tests and tooling.
//
pub mod app;
pub mod core;
pub mod headless;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` wraps winit and is only reachable through DesktopFactory.
//
mod platform;

//--- Public Exports ------------------------------------------------------

pub use platform::{DesktopFactory, DesktopWindow};

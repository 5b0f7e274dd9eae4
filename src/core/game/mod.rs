//=========================================================================
// Game State Machine
//=========================================================================
//
// Idle/Running mode, the designated keys that drive it, and the audio cue
// that reacts to its transitions through the event bus.
//
//=========================================================================

//=== Module Declarations =================================================

mod audio_cue;
mod bindings;
#[allow(clippy::module_inception)]
mod game;
mod state;

//=== Public API ==========================================================

pub use audio_cue::AudioCueConfig;
pub use bindings::KeyBindings;
pub use game::{Game, GameContext, GameControl};
pub use state::GameState;

//=========================================================================
// Key Bindings
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::input::{ControllerButton, KeyCode};

//=== KeyBindings =========================================================

/// Designated keys the state machine polls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Idle → Running.
    pub activate: KeyCode,
    pub activate_button: ControllerButton,

    /// Running → Idle.
    pub cancel: KeyCode,

    /// Ends the application while Idle.
    pub quit: KeyCode,

    /// Rebuilds the state machine while Running.
    pub restart: KeyCode,

    pub toggle_pause: KeyCode,
    pub step_frame: KeyCode,

    /// Held for slow motion.
    pub slow_motion: KeyCode,
    pub slow_motion_scale: f64,

    /// Fullscreen toggle, Idle only.
    pub toggle_fullscreen: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            activate: KeyCode::Space,
            activate_button: ControllerButton::Start,
            cancel: KeyCode::Escape,
            quit: KeyCode::Escape,
            restart: KeyCode::F8,
            toggle_pause: KeyCode::KeyP,
            step_frame: KeyCode::KeyO,
            slow_motion: KeyCode::KeyT,
            slow_motion_scale: 0.1,
            toggle_fullscreen: KeyCode::KeyR,
        }
    }
}

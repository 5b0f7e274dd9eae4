//=========================================================================
// Game State
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== GameState ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Idle "attract" presentation shown before the user engages.
    #[default]
    Idle,

    /// Interactive mode.
    Running,
}

impl GameState {
    /// Identifier carried by the state-change event.
    pub fn as_str(self) -> &'static str {
        match self {
            GameState::Idle => "idle",
            GameState::Running => "running",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "idle" => Some(GameState::Idle),
            "running" => Some(GameState::Running),
            _ => None,
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//=========================================================================
// Tests
//=========================================================================

//=========================================================================
// Clock Hierarchy
//=========================================================================
//
// Root clock ticked once per frame from real time, with derived clocks
// that inherit their parent's delta scaled by a local factor.
//
// Architecture:
//   Instant ─→ tick() ─→ root delta (clamped)
//                           ↓ × scale (0 if paused, nominal if stepping)
//                      child deltas ─→ grandchild deltas ...
//
//=========================================================================

//=== Module Declarations =================================================

mod node;
mod tree;

//=== Public API ==========================================================

pub use node::Clock;
pub use tree::{ClockId, ClockTree};

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== ClockConfig =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Delta applied by a single-frame step.
    pub nominal_frame_seconds: f64,

    /// Upper clamp on the real elapsed time fed to the root per tick.
    pub max_delta_seconds: f64,

    /// When set, every tick feeds this delta instead of wall-clock time.
    pub fixed_delta_seconds: Option<f64>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            nominal_frame_seconds: 1.0 / 60.0,
            max_delta_seconds: 0.1,
            fixed_delta_seconds: None,
        }
    }
}

//=== ClockError ==========================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClockError {
    #[error("no clock with id {0:?}")]
    UnknownClock(ClockId),

    #[error("the root clock cannot be removed")]
    RemoveRoot,

    #[error("time scale must be finite and non-negative, got {0}")]
    InvalidTimeScale(f64),
}

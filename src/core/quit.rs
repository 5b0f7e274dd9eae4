//=========================================================================
// Quit Token
//=========================================================================
//
// Set-once shutdown flag shared by the main loop and anything allowed to
// end it (event callbacks, the state machine).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::info;

//=== QuitToken ===========================================================

/// Cloneable handle to one monotonic quit flag. Clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct QuitToken {
    requested: Arc<AtomicBool>,
}

impl QuitToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flag. Further calls do nothing.
    pub fn request(&self) {
        if !self.requested.swap(true, Ordering::AcqRel) {
            info!(target: "app", "Quit requested");
        }
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}

//=========================================================================
// Tests
//=========================================================================

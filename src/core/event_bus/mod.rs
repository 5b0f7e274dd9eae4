//=========================================================================
// Event Bus
//=========================================================================
//
// Named publish/subscribe channel for decoupled reactions.
//
// Architecture:
//   subscribe(name, callback) → HashMap<String, Vec<Subscriber>>
//                                        ↓
//   fire(name, args) ─────────→ callbacks in subscription order
//                                        ↓ (Propagation::Stop ends early)
//   EventSender (crossbeam) ──→ deferred commands, applied after dispatch
//
// Pattern: producers fire by name, consumers subscribe by name, neither
// knows about the other.
//
//=========================================================================

//=== Module Declarations =================================================

mod args;
mod bus;
mod deferred;

//=== Public API ==========================================================

pub use args::EventArgs;
pub use bus::{EventBus, EventCallback, Propagation, SubscriptionId};
pub use deferred::EventSender;

//=== Reserved Event Names ================================================

/// Event names produced or consumed by the application core.
pub mod names {
    /// Fired by the window when the user asks to close it.
    pub const CLOSE_REQUESTED: &str = "close_requested";

    /// Fired by anything that wants the application to end (console, tools).
    pub const QUIT: &str = "quit";

    /// Fired by the state machine after every real state transition.
    pub const GAME_STATE_CHANGED: &str = "game_state_changed";

    /// Argument key carrying the new state's identifier ("idle" / "running").
    pub const STATE_KEY: &str = "state";
}

//=========================================================================
// Deferred Bus Commands
//=========================================================================
//
// Cloneable handle for queuing bus work from places that cannot borrow
// the bus (subscriber callbacks, window/console collaborators).
//
// Architecture:
//   EventSender::fire() → crossbeam Sender<BusCommand> → EventBus drain
//
// Queued commands are applied after the dispatch in progress finishes,
// and at every frame boundary.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::debug;

//=== Internal Dependencies ===============================================

use super::args::EventArgs;
use super::bus::SubscriptionId;

//=== BusCommand ==========================================================

#[derive(Debug, Clone)]
pub(super) enum BusCommand {
    Fire { name: String, args: EventArgs },
    Unsubscribe { name: String, id: SubscriptionId },
}

//=== EventSender =========================================================

/// Queues fire/unsubscribe requests for a bus that is currently borrowed.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: Sender<BusCommand>,
}

impl EventSender {
    pub(super) fn new(sender: Sender<BusCommand>) -> Self {
        Self { sender }
    }

    /// Queues `name` to be fired with `args` once the bus is free.
    pub fn fire(&self, name: impl Into<String>, args: EventArgs) {
        let name = name.into();
        if self.sender.send(BusCommand::Fire { name: name.clone(), args }).is_err() {
            debug!(target: "event_bus", "Dropped deferred fire of '{}': bus is gone", name);
        }
    }

    /// Queues removal of subscription `id` from `name`.
    pub fn unsubscribe(&self, name: impl Into<String>, id: SubscriptionId) {
        let name = name.into();
        if self.sender.send(BusCommand::Unsubscribe { name: name.clone(), id }).is_err() {
            debug!(target: "event_bus", "Dropped deferred unsubscribe from '{}': bus is gone", name);
        }
    }
}

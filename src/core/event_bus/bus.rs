//=========================================================================
// Event Bus
//=========================================================================
//
// Ordered, name-keyed subscriber lists with early-stop dispatch.
//
// Frame lifecycle: begin_frame() drains deferred commands, fire() runs
// synchronously, end_frame() drains again.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::args::EventArgs;
use super::deferred::{BusCommand, EventSender};
use crate::core::subsystem::{Subsystem, SubsystemError};

//=== Constants ===========================================================

/// Upper bound on deferred commands applied in one drain.
///
/// Subscribers that re-queue the event they handle would otherwise spin
/// forever.
const MAX_DEFERRED_PER_DRAIN: usize = 1024;

//=== Propagation =========================================================

/// Subscriber verdict: keep dispatching or stop at this subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

impl From<bool> for Propagation {
    /// `true` continues dispatch, `false` stops it.
    fn from(keep_going: bool) -> Self {
        if keep_going {
            Propagation::Continue
        } else {
            Propagation::Stop
        }
    }
}

//=== SubscriptionId ======================================================

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Subscriber callback stored by the bus.
pub type EventCallback = Box<dyn FnMut(&EventArgs) -> Propagation>;

struct Subscriber {
    id: SubscriptionId,
    callback: EventCallback,
}

//=== EventBus ============================================================

pub struct EventBus {
    subscriptions: HashMap<String, Vec<Subscriber>>,
    next_id: u64,
    command_tx: Sender<BusCommand>,
    command_rx: Receiver<BusCommand>,
}

impl EventBus {
    pub fn new() -> Self {
        let (command_tx, command_rx) = unbounded();
        Self {
            subscriptions: HashMap::new(),
            next_id: 1,
            command_tx,
            command_rx,
        }
    }

    /// Returns a handle for queuing work from code that cannot borrow the bus.
    pub fn sender(&self) -> EventSender {
        EventSender::new(self.command_tx.clone())
    }

    //--- Subscriptions ----------------------------------------------------

    /// Appends `callback` to the subscriber list of `name`.
    pub fn subscribe<F>(&mut self, name: &str, callback: F) -> SubscriptionId
    where
        F: FnMut(&EventArgs) -> Propagation + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        self.subscriptions
            .entry(name.to_owned())
            .or_default()
            .push(Subscriber {
                id,
                callback: Box::new(callback),
            });

        debug!(target: "event_bus", "Subscribed {:?} to '{}'", id, name);
        id
    }

    /// Removes subscription `id` from `name`.
    ///
    /// Unknown names or ids are ignored. Returns whether anything was removed.
    pub fn unsubscribe(&mut self, name: &str, id: SubscriptionId) -> bool {
        let Some(list) = self.subscriptions.get_mut(name) else {
            return false;
        };

        let before = list.len();
        list.retain(|sub| sub.id != id);
        let removed = list.len() != before;

        if list.is_empty() {
            self.subscriptions.remove(name);
        }

        if removed {
            debug!(target: "event_bus", "Unsubscribed {:?} from '{}'", id, name);
        }
        removed
    }

    //--- Dispatch ---------------------------------------------------------

    /// Invokes the subscribers of `name` in order until one returns
    /// [`Propagation::Stop`]. Returns how many callbacks ran.
    ///
    /// Commands queued through an [`EventSender`] while dispatching are
    /// applied after the dispatch completes.
    pub fn fire(&mut self, name: &str, args: &EventArgs) -> usize {
        let invoked = self.dispatch(name, args);
        self.drain_deferred();
        invoked
    }

    fn dispatch(&mut self, name: &str, args: &EventArgs) -> usize {
        let Some(list) = self.subscriptions.get_mut(name) else {
            trace!(target: "event_bus", "Fired '{}' with no subscribers", name);
            return 0;
        };

        let mut invoked = 0;
        for sub in list.iter_mut() {
            invoked += 1;
            if (sub.callback)(args) == Propagation::Stop {
                trace!(target: "event_bus", "'{}' stopped by {:?}", name, sub.id);
                break;
            }
        }
        invoked
    }

    /// Applies queued commands. Returns how many were applied.
    pub fn drain_deferred(&mut self) -> usize {
        let mut applied = 0;
        while applied < MAX_DEFERRED_PER_DRAIN {
            let Ok(command) = self.command_rx.try_recv() else {
                return applied;
            };
            applied += 1;

            match command {
                BusCommand::Fire { name, args } => {
                    self.dispatch(&name, &args);
                }
                BusCommand::Unsubscribe { name, id } => {
                    self.unsubscribe(&name, id);
                }
            }
        }

        warn!(
            target: "event_bus",
            "Deferred drain hit {} commands; remaining work carried to next drain",
            MAX_DEFERRED_PER_DRAIN
        );
        applied
    }

    //--- Query API --------------------------------------------------------

    pub fn subscriber_count(&self, name: &str) -> usize {
        self.subscriptions.get(name).map_or(0, Vec::len)
    }

    pub fn has_subscribers(&self, name: &str) -> bool {
        self.subscriber_count(name) > 0
    }

    /// Drops every subscription and pending command.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
        while self.command_rx.try_recv().is_ok() {}
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

//=== Subsystem ===========================================================

impl Subsystem for EventBus {
    fn name(&self) -> &'static str {
        "EventBus"
    }

    fn startup(&mut self) -> Result<(), SubsystemError> {
        info!(target: "event_bus", "Event bus started");
        Ok(())
    }

    fn begin_frame(&mut self) {
        self.drain_deferred();
    }

    fn end_frame(&mut self) {
        self.drain_deferred();
    }

    fn shutdown(&mut self) {
        let remaining: usize = self.subscriptions.values().map(Vec::len).sum();
        if remaining > 0 {
            debug!(target: "event_bus", "Dropping {} subscriptions at shutdown", remaining);
        }
        self.clear();
        info!(target: "event_bus", "Event bus shut down");
    }
}

//=========================================================================
// Tests
//=========================================================================

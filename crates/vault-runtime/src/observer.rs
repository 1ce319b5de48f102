//! # Event Logger
//!
//! Subscribes to the bus and writes every wallet event to the log as one
//! `WALLET_EVENT_JSON` line.

use shared_bus::{EventFilter, InMemoryEventBus, Subscription, WalletEvent};
use tokio::sync::watch;
use tracing::{info, warn};

pub struct EventLogger {
    subscription: Subscription,
}

impl EventLogger {
    /// Subscribe to every topic. Only events published after this call are seen.
    pub fn new(bus: &InMemoryEventBus) -> Self {
        Self {
            subscription: bus.subscribe(EventFilter::all()),
        }
    }

    /// Log events until `shutdown` flips, then flush what is still buffered.
    ///
    /// Returns the number of events logged.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> u64 {
        info!("Event logger started");
        let mut logged = 0u64;

        loop {
            tokio::select! {
                biased;
                event = self.subscription.recv() => match event {
                    Some(event) => {
                        log_event(&event);
                        logged += 1;
                    }
                    None => break,
                },
                _ = shutdown.changed() => {
                    for event in self.subscription.drain() {
                        log_event(&event);
                        logged += 1;
                    }
                    break;
                }
            }
        }

        let lagged = self.subscription.lagged();
        if lagged > 0 {
            warn!(logged, lagged, "Event logger fell behind, events were not logged");
        }
        info!(logged, "Event logger stopped");
        logged
    }
}

fn log_event(event: &WalletEvent) {
    match serde_json::to_string(event) {
        Ok(json) => info!(
            topic = ?event.topic(),
            proposal_id = event.proposal_id(),
            "WALLET_EVENT_JSON {json}"
        ),
        Err(err) => warn!(error = %err, "Failed to encode wallet event"),
    }
}

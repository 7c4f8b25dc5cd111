//! Subscriptions to change events
//!
//! Each commit delivers its events as one batch to every live subscriber
//! whose scope and kinds match. Delivery is a queued hand-off: the committing
//! writer never waits for a subscriber.

use super::edit::Change;
use super::event::{ChangeEvent, ChangeKind, EventBatch};
use super::path::NodePath;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tracing::trace;

/// Receiving end of a subscription.
///
/// Dropping it unsubscribes; the observer is pruned on the next delivery.
#[derive(Debug)]
pub struct Subscription {
    receiver: mpsc::UnboundedReceiver<EventBatch>,
}

/// Sending end of a subscription
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::UnboundedSender<EventBatch>,
}

impl Subscription {
    /// Create a connected sender/subscription pair
    pub fn channel() -> (EventSender, Subscription) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (EventSender { sender }, Subscription { receiver })
    }

    /// Wait for the next batch; `None` once every sender is gone
    pub async fn recv(&mut self) -> Option<EventBatch> {
        self.receiver.recv().await
    }

    /// Take a batch if one is already queued
    pub fn try_recv(&mut self) -> Option<EventBatch> {
        self.receiver.try_recv().ok()
    }
}

impl EventSender {
    /// Queue a batch; returns false when the subscription is gone
    pub fn send(&self, batch: EventBatch) -> bool {
        self.sender.send(batch).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

#[derive(Debug)]
struct Observer {
    id: u64,
    scope: NodePath,
    kinds: Vec<ChangeKind>,
    sender: EventSender,
}

impl Observer {
    /// Events at or below the scope, plus removal of any ancestor since
    /// that takes the whole scope with it.
    fn wants(&self, change: &Change) -> bool {
        if !self.kinds.contains(&change.kind) {
            return false;
        }
        change.path.starts_with(&self.scope)
            || (change.kind == ChangeKind::Removed && self.scope.is_descendant_of(&change.path))
    }
}

/// Registry of observers for one repository
#[derive(Debug, Default)]
pub(crate) struct ObservationManager {
    observers: Mutex<Vec<Observer>>,
    next_id: AtomicU64,
}

impl ObservationManager {
    pub(crate) fn subscribe(&self, scope: &NodePath, kinds: &[ChangeKind]) -> Subscription {
        let (sender, subscription) = Subscription::channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        self.observers.lock().push(Observer {
            id,
            scope: scope.clone(),
            kinds: kinds.to_vec(),
            sender,
        });
        trace!(observer_id = id, scope = %scope, "Observer registered");

        subscription
    }

    /// Deliver one commit's changes, dropping observers that went away
    pub(crate) fn dispatch(&self, changes: &[Change]) {
        if changes.is_empty() {
            return;
        }

        let mut observers = self.observers.lock();
        observers.retain(|observer| {
            let batch: EventBatch = changes
                .iter()
                .filter(|change| observer.wants(change))
                .map(|change| ChangeEvent::new(change.kind, change.path.to_string()))
                .collect();

            if batch.is_empty() {
                return !observer.sender.is_closed();
            }

            let delivered = observer.sender.send(batch);
            if !delivered {
                trace!(observer_id = observer.id, "Observer dropped");
            }
            delivered
        });
    }

    #[cfg(test)]
    fn observer_count(&self) -> usize {
        self.observers.lock().len()
    }
}

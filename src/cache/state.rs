//! Listener lifecycle state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::watch;

/// Where the listener is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenerState {
    /// Constructed, not yet subscribed
    Unarmed,
    /// Reloading the cache from the store
    Bootstrapping,
    /// Applying change events
    Armed,
    /// Cancelled or the event stream ended
    Stopped,
}

impl fmt::Display for ListenerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unarmed => "unarmed",
            Self::Bootstrapping => "bootstrapping",
            Self::Armed => "armed",
            Self::Stopped => "stopped",
        };
        write!(f, "{}", name)
    }
}

/// Counters published by the listener after every change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub state: ListenerState,

    /// Completed full reloads, the bootstrap included
    pub reconciliations: u64,

    /// Reloads that failed and left the cache as it was
    pub failed_reconciliations: u64,

    pub last_reconciled_at: Option<DateTime<Utc>>,

    /// Events that were applied or confirmed a no-op
    pub events_applied: u64,

    /// Events logged and discarded
    pub events_dropped: u64,
}

impl Default for SyncStatus {
    fn default() -> Self {
        Self {
            state: ListenerState::Unarmed,
            reconciliations: 0,
            failed_reconciliations: 0,
            last_reconciled_at: None,
            events_applied: 0,
            events_dropped: 0,
        }
    }
}

impl SyncStatus {
    /// Events seen so far, whatever became of them
    pub fn events_seen(&self) -> u64 {
        self.events_applied + self.events_dropped
    }
}

/// Read side of the listener's status
#[derive(Debug, Clone)]
pub struct StatusHandle {
    receiver: watch::Receiver<SyncStatus>,
}

impl StatusHandle {
    pub(crate) fn new(receiver: watch::Receiver<SyncStatus>) -> Self {
        Self { receiver }
    }

    pub fn current(&self) -> SyncStatus {
        self.receiver.borrow().clone()
    }

    pub fn state(&self) -> ListenerState {
        self.receiver.borrow().state
    }

    /// Wait until `condition` holds. `None` if the listener went away first.
    pub async fn wait_for(
        &mut self,
        condition: impl FnMut(&SyncStatus) -> bool,
    ) -> Option<SyncStatus> {
        self.receiver
            .wait_for(condition)
            .await
            .ok()
            .map(|status| status.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_camel_case() {
        let json = serde_json::to_value(SyncStatus::default()).unwrap();
        assert_eq!(json["state"], "unarmed");
        assert_eq!(json["eventsApplied"], 0);
        assert!(json["lastReconciledAt"].is_null());
    }

    #[tokio::test]
    async fn wait_for_sees_updates() {
        let (sender, receiver) = watch::channel(SyncStatus::default());
        let mut handle = StatusHandle::new(receiver);

        sender.send_modify(|status| status.state = ListenerState::Armed);
        let status = handle
            .wait_for(|s| s.state == ListenerState::Armed)
            .await
            .unwrap();
        assert_eq!(status.state, ListenerState::Armed);

        drop(sender);
        assert!(handle.wait_for(|s| s.events_applied > 0).await.is_none());
    }
}

//! Change listener keeping the cache in step with the store
//!
//! One task owns the subscription and applies events strictly one at a
//! time. Every event is resolved by reading the store back; the event
//! itself only says where to look. When a property event cannot be squared
//! with the cache, or the collection node itself changes, the cache is
//! reloaded in full. Nothing here returns an error to a caller: failures are
//! logged and the event is dropped.

use super::reconcile::reconcile;
use super::state::{ListenerState, StatusHandle, SyncStatus};
use super::target::{resolve, EventTarget};
use super::BookCache;
use crate::repository::{ChangeEvent, ChangeKind, EventBatch, Subscription};
use crate::store::EntityStore;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// What handling one event did to the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Upserted,
    Removed,
    /// The book was gone again by the time it was read back
    Skipped,
    Reconciled,
    ReconcileFailed,
    /// Nothing the cache mirrors
    Ignored,
    /// The store read failed
    Dropped,
    Unparseable,
}

impl EventOutcome {
    fn is_applied(self) -> bool {
        matches!(
            self,
            Self::Upserted | Self::Removed | Self::Skipped | Self::Reconciled | Self::Ignored
        )
    }
}

/// Keeps a [`BookCache`] in sync with an [`EntityStore`]
pub struct CacheSync {
    store: Arc<dyn EntityStore>,
    cache: Arc<BookCache>,
    status: watch::Sender<SyncStatus>,
}

impl CacheSync {
    pub fn new(store: Arc<dyn EntityStore>, cache: Arc<BookCache>) -> Self {
        let (status, _) = watch::channel(SyncStatus::default());
        Self {
            store,
            cache,
            status,
        }
    }

    pub fn status(&self) -> StatusHandle {
        StatusHandle::new(self.status.subscribe())
    }

    /// Subscribe, bootstrap the cache, then process events on a task until
    /// `cancel` fires or the event stream ends.
    ///
    /// The subscription is taken before the bootstrap read so that nothing
    /// committed in between is missed. Replaying such events is harmless.
    pub async fn start(self, cancel: CancellationToken) -> SyncHandle {
        self.set_state(ListenerState::Bootstrapping);
        let subscription = self.store.subscribe(&ChangeKind::ALL);

        if self.reconcile().await {
            info!(books = self.cache.len(), "Cache bootstrapped");
        }
        self.set_state(ListenerState::Armed);

        let status = self.status();
        let task = tokio::spawn(self.run(subscription, cancel.clone()));

        SyncHandle {
            task,
            cancel,
            status,
        }
    }

    async fn run(self, mut subscription: Subscription, cancel: CancellationToken) {
        debug!(root = %self.store.root_path(), "Change listener armed");

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("Change listener cancelled");
                    break;
                }
                batch = subscription.recv() => match batch {
                    Some(batch) => self.handle_batch(batch).await,
                    None => {
                        warn!("Change stream closed, listener stopping");
                        break;
                    }
                },
            }
        }

        self.set_state(ListenerState::Stopped);
    }

    /// Apply a batch in order
    pub async fn handle_batch(&self, batch: EventBatch) {
        for event in &batch {
            let outcome = self.handle_event(event).await;
            self.status.send_modify(|status| {
                if outcome.is_applied() {
                    status.events_applied += 1;
                } else {
                    status.events_dropped += 1;
                }
            });
        }
    }

    /// Apply one event
    pub async fn handle_event(&self, event: &ChangeEvent) -> EventOutcome {
        debug!(kind = %event.kind, path = %event.path, "Change event");

        match resolve(self.store.root_path(), event) {
            EventTarget::Unparseable => {
                warn!(kind = %event.kind, path = %event.path, "Discarding event with unusable path");
                EventOutcome::Unparseable
            }
            EventTarget::Ignored => EventOutcome::Ignored,
            EventTarget::Collection => {
                info!(kind = %event.kind, "Book collection node changed");
                self.reconcile_outcome().await
            }
            EventTarget::Entity { id } if event.kind == ChangeKind::Removed => {
                if self.cache.remove(&id).is_some() {
                    debug!(book_id = %id, "Removed from cache");
                }
                EventOutcome::Removed
            }
            EventTarget::Entity { id } => match self.store.read_by_id(&id).await {
                Ok(Some(book)) => {
                    self.cache.upsert(book);
                    debug!(book_id = %id, "Cached new book");
                    EventOutcome::Upserted
                }
                Ok(None) => {
                    debug!(book_id = %id, "Created book already gone");
                    EventOutcome::Skipped
                }
                Err(err) => self.dropped(&id, event, &err),
            },
            EventTarget::Field { id, field } => match self.store.read_by_id(&id).await {
                Ok(Some(book)) => {
                    let occurrences = self.cache.occurrences(&id);
                    if occurrences != 1 {
                        warn!(book_id = %id, occurrences, "Cache disagrees with store, reloading");
                        return self.reconcile_outcome().await;
                    }
                    self.cache.upsert(book);
                    debug!(book_id = %id, field = %field, "Refreshed cached book");
                    EventOutcome::Upserted
                }
                Ok(None) => {
                    warn!(book_id = %id, field = %field, "Changed book missing from store, reloading");
                    self.reconcile_outcome().await
                }
                Err(err) => self.dropped(&id, event, &err),
            },
        }
    }

    fn dropped(&self, id: &str, event: &ChangeEvent, err: &dyn std::fmt::Display) -> EventOutcome {
        warn!(book_id = %id, kind = %event.kind, "Dropping event, store read failed: {}", err);
        EventOutcome::Dropped
    }

    /// Reload from inside the event loop. The listener reports
    /// `Bootstrapping` for the duration and is `Armed` again afterwards,
    /// whether or not the reload worked.
    async fn reconcile_outcome(&self) -> EventOutcome {
        self.set_state(ListenerState::Bootstrapping);
        let reconciled = self.reconcile().await;
        self.set_state(ListenerState::Armed);

        if reconciled {
            EventOutcome::Reconciled
        } else {
            EventOutcome::ReconcileFailed
        }
    }

    /// Full reload; returns whether it succeeded
    async fn reconcile(&self) -> bool {
        match reconcile(self.store.as_ref(), &self.cache).await {
            Ok(count) => {
                info!(books = count, "Cache reconciled");
                self.status.send_modify(|status| {
                    status.reconciliations += 1;
                    status.last_reconciled_at = Some(Utc::now());
                });
                true
            }
            Err(err) => {
                error!("Cache reconciliation failed, keeping last state: {}", err);
                self.status
                    .send_modify(|status| status.failed_reconciliations += 1);
                false
            }
        }
    }

    fn set_state(&self, state: ListenerState) {
        self.status.send_modify(|status| status.state = state);
    }
}

/// A running listener
#[derive(Debug)]
pub struct SyncHandle {
    task: JoinHandle<()>,
    cancel: CancellationToken,
    status: StatusHandle,
}

impl SyncHandle {
    pub fn status(&self) -> StatusHandle {
        self.status.clone()
    }

    /// Cancel the listener and wait for it to stop
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(err) = self.task.await {
            error!("Change listener task failed: {}", err);
        }
    }
}

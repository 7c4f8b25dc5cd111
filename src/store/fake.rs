//! Scripted store for cache tests

use super::EntityStore;
use crate::error::{BookstoreError, BookstoreResult};
use crate::model::Book;
use crate::repository::{ChangeEvent, ChangeKind, EventSender, NodePath, Subscription};
use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::watch;

pub(crate) const ROOT: &str = "/content/books";

/// In-memory store whose contents and events are driven by the test
#[derive(Debug)]
pub(crate) struct FakeStore {
    root: NodePath,
    books: Mutex<IndexMap<String, Book>>,
    sender: Mutex<Option<EventSender>>,
    failing: AtomicBool,
    read_all_calls: AtomicUsize,
    /// `read_all` waits while this is false
    reads_open: watch::Sender<bool>,
}

impl FakeStore {
    pub(crate) fn new(books: impl IntoIterator<Item = Book>) -> Self {
        Self {
            root: NodePath::parse(ROOT).unwrap(),
            books: Mutex::new(books.into_iter().map(|b| (b.id.clone(), b)).collect()),
            sender: Mutex::new(None),
            failing: AtomicBool::new(false),
            read_all_calls: AtomicUsize::new(0),
            reads_open: watch::Sender::new(true),
        }
    }

    /// Insert or replace a book without emitting anything
    pub(crate) fn put(&self, book: Book) {
        self.books.lock().insert(book.id.clone(), book);
    }

    pub(crate) fn delete(&self, id: &str) {
        self.books.lock().shift_remove(id);
    }

    /// Make every read fail until reset
    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Park every `read_all` until [`FakeStore::release_reads`]
    pub(crate) fn hold_reads(&self) {
        self.reads_open.send_replace(false);
    }

    pub(crate) fn release_reads(&self) {
        self.reads_open.send_replace(true);
    }

    pub(crate) fn read_all_calls(&self) -> usize {
        self.read_all_calls.load(Ordering::SeqCst)
    }

    /// Deliver a batch to the current subscriber
    pub(crate) fn push(&self, events: Vec<ChangeEvent>) -> bool {
        self.sender
            .lock()
            .as_ref()
            .is_some_and(|sender| sender.send(events))
    }

    /// Drop the sending side so the subscription ends
    pub(crate) fn close(&self) {
        self.sender.lock().take();
    }

    fn check(&self) -> BookstoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(BookstoreError::Internal("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl EntityStore for FakeStore {
    fn root_path(&self) -> &NodePath {
        &self.root
    }

    async fn read_all(&self) -> BookstoreResult<Vec<Book>> {
        self.read_all_calls.fetch_add(1, Ordering::SeqCst);
        let mut open = self.reads_open.subscribe();
        let _ = open.wait_for(|open| *open).await;
        self.check()?;
        Ok(self.books.lock().values().cloned().collect())
    }

    async fn read_by_id(&self, id: &str) -> BookstoreResult<Option<Book>> {
        self.check()?;
        Ok(self.books.lock().get(id).cloned())
    }

    fn subscribe(&self, _kinds: &[ChangeKind]) -> Subscription {
        let (sender, subscription) = Subscription::channel();
        *self.sender.lock() = Some(sender);
        subscription
    }
}

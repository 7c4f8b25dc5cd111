//! The materialized book cache
//!
//! Readers load an immutable [`CacheState`] through an `ArcSwap` and never
//! wait on the writer. The writer builds the next state from a copy of the
//! current one and publishes it with a single pointer swap, so a reader sees
//! either all of a mutation or none of it.

use crate::model::Book;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Ordered books plus an id -> position index over them
#[derive(Debug, Clone, Default)]
struct CacheState {
    order: Vec<Book>,
    index: HashMap<String, usize>,
}

impl CacheState {
    fn from_books(books: Vec<Book>) -> Self {
        let mut state = Self::default();
        for book in books {
            state.upsert(book);
        }
        state
    }

    fn upsert(&mut self, book: Book) -> Option<Book> {
        match self.index.get(&book.id) {
            Some(&position) => Some(std::mem::replace(&mut self.order[position], book)),
            None => {
                self.index.insert(book.id.clone(), self.order.len());
                self.order.push(book);
                None
            }
        }
    }

    fn remove(&mut self, id: &str) -> Option<Book> {
        let position = self.index.remove(id)?;
        let removed = self.order.remove(position);
        for (offset, book) in self.order[position..].iter().enumerate() {
            self.index.insert(book.id.clone(), position + offset);
        }
        Some(removed)
    }
}

/// Concurrently readable cache of books keyed by id, in insertion order
#[derive(Debug, Default)]
pub struct BookCache {
    state: ArcSwap<CacheState>,
    writer: Mutex<()>,
}

impl BookCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Independent copy of the current books, in cache order
    pub fn snapshot(&self) -> Vec<Book> {
        self.state.load().order.clone()
    }

    pub fn get(&self, id: &str) -> Option<Book> {
        let state = self.state.load();
        state.index.get(id).map(|&position| state.order[position].clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.state.load().index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.state.load().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of cached records carrying `id`. Anything but 0 or 1 means the
    /// index and the order have drifted apart.
    pub fn occurrences(&self, id: &str) -> usize {
        self.state.load().order.iter().filter(|book| book.id == id).count()
    }

    /// Insert `book`, or replace the cached book with the same id in place.
    /// Returns the replaced book.
    pub fn upsert(&self, book: Book) -> Option<Book> {
        self.mutate(|state| state.upsert(book))
    }

    /// Remove the book with `id`; removing an absent id does nothing
    pub fn remove(&self, id: &str) -> Option<Book> {
        self.mutate(|state| state.remove(id))
    }

    /// Replace the whole content with `books`, in their order. Returns the new
    /// size; a repeated id keeps its first position and its last value.
    pub fn replace_all(&self, books: Vec<Book>) -> usize {
        let _writer = self.writer.lock();
        let next = CacheState::from_books(books);
        let len = next.order.len();
        self.state.store(Arc::new(next));
        len
    }

    /// Every indexed id appears exactly once in the order, at its indexed position
    pub fn is_consistent(&self) -> bool {
        let state = self.state.load();
        state.index.len() == state.order.len()
            && state
                .order
                .iter()
                .enumerate()
                .all(|(position, book)| state.index.get(&book.id) == Some(&position))
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut CacheState) -> R) -> R {
        let _writer = self.writer.lock();
        let mut next = CacheState::clone(&self.state.load());
        let result = f(&mut next);
        self.state.store(Arc::new(next));
        result
    }
}

//! Entity stores
//!
//! [`EntityStore`] is the read and subscribe surface the cache is kept in
//! sync with. [`BookStore`] implements it over the content repository and
//! adds the write operations used by the REST layer and the CLI.

mod book_store;
pub mod mapping;

#[cfg(test)]
pub(crate) mod fake;

pub use book_store::BookStore;

use crate::error::BookstoreResult;
use crate::model::Book;
use crate::repository::{ChangeKind, NodePath, Subscription};
use async_trait::async_trait;

/// Authoritative source of books
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Path of the collection node; every book is a direct child of it
    fn root_path(&self) -> &NodePath;

    /// All books, in enumeration order
    async fn read_all(&self) -> BookstoreResult<Vec<Book>>;

    /// One book, `None` if it does not exist
    async fn read_by_id(&self, id: &str) -> BookstoreResult<Option<Book>>;

    /// Change events at or below the root whose kind is in `kinds`
    fn subscribe(&self, kinds: &[ChangeKind]) -> Subscription;
}

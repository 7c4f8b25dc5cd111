//! Full reload of the cache from the store

use super::BookCache;
use crate::error::BookstoreResult;
use crate::store::EntityStore;

/// Replace the cache content with a fresh enumeration of the store.
///
/// On error the cache is left untouched.
pub async fn reconcile(store: &dyn EntityStore, cache: &BookCache) -> BookstoreResult<usize> {
    let books = store.read_all().await?;
    Ok(cache.replace_all(books))
}

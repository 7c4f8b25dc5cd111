//! Bookstore resources, served from the read cache

use super::ApiState;
use crate::cache::SyncStatus;
use crate::model::Book;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

/// Listener status plus the cache it maintains
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    #[serde(flatten)]
    pub sync: SyncStatus,
    pub cached_books: usize,
    pub consistent: bool,
}

/// GET /bookstore
pub async fn cached_books(State(state): State<Arc<ApiState>>) -> Json<Vec<Book>> {
    Json(state.cache.snapshot())
}

/// GET /bookstore/status
pub async fn status(State(state): State<Arc<ApiState>>) -> Json<CacheStatus> {
    Json(CacheStatus {
        sync: state.status.current(),
        cached_books: state.cache.len(),
        consistent: state.cache.is_consistent(),
    })
}

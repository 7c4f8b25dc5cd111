//! Book resources, served from the store

use super::ApiState;
use crate::error::{BookstoreError, BookstoreResult};
use crate::model::{Book, BookResponse};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;
use tracing::debug;

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> BookstoreResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| BookstoreError::validation(rejection.body_text()))
}

/// POST /books
pub async fn add_books(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<Vec<Book>>, JsonRejection>,
) -> BookstoreResult<Json<BookResponse>> {
    let books = body(payload)?;
    debug!(count = books.len(), "add books requested");
    state.service.add_books(books).await?;
    Ok(Json(BookResponse::success()))
}

/// GET /books
pub async fn list_books(State(state): State<Arc<ApiState>>) -> BookstoreResult<Json<Vec<Book>>> {
    Ok(Json(state.service.list_books().await?))
}

/// GET /books/search/:query
pub async fn search_books(
    State(state): State<Arc<ApiState>>,
    Path(query): Path<String>,
) -> BookstoreResult<Json<Vec<Book>>> {
    Ok(Json(state.service.search_books(&query)?))
}

/// POST /books/update
pub async fn update_book(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<Book>, JsonRejection>,
) -> BookstoreResult<Json<BookResponse>> {
    let book = body(payload)?;
    state.service.update_book(&book).await?;
    Ok(Json(BookResponse::success()))
}

/// DELETE /books/delete/:book_id
pub async fn delete_book(
    State(state): State<Arc<ApiState>>,
    Path(book_id): Path<String>,
) -> BookstoreResult<Json<BookResponse>> {
    state.service.delete_book(&book_id).await?;
    Ok(Json(BookResponse::success()))
}

//! REST surface
//!
//! - `/books` reads and writes through the store
//! - `/bookstore` serves the read cache
//!
//! Every failure is answered with a [`BookResponse`] envelope and an HTTP
//! status matching its result code.

mod books;
mod bookstore;

use crate::cache::{BookCache, StatusHandle};
use crate::error::BookstoreError;
use crate::model::{BookResponse, ResultCode};
use crate::service::BookService;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tracing::error;

pub use bookstore::CacheStatus;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct ApiState {
    pub service: BookService,
    pub cache: Arc<BookCache>,
    pub status: StatusHandle,
}

/// Build the router for all endpoints
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/books", get(books::list_books).post(books::add_books))
        .route("/books/search/:query", get(books::search_books))
        .route("/books/update", post(books::update_book))
        .route("/books/delete/:book_id", delete(books::delete_book))
        .route("/bookstore", get(bookstore::cached_books))
        .route("/bookstore/status", get(bookstore::status))
        .with_state(state)
}

/// HTTP status carried alongside a result code
pub fn http_status(code: ResultCode) -> StatusCode {
    match code {
        ResultCode::Success => StatusCode::OK,
        ResultCode::Failed => StatusCode::INTERNAL_SERVER_ERROR,
        ResultCode::NotFound => StatusCode::NOT_FOUND,
        ResultCode::AlreadyExist => StatusCode::CONFLICT,
        ResultCode::ValidationFailed => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for BookstoreError {
    fn into_response(self) -> Response {
        let code = self.result_code();
        if code == ResultCode::Failed {
            error!("Request failed: {}", self);
        }
        (http_status(code), Json(BookResponse::from_error(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheSync, ListenerState, SyncHandle};
    use crate::repository::{ContentRepository, NodePath};
    use crate::store::BookStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use serde_json::{json, Value};
    use tokio_util::sync::CancellationToken;
    use tower::ServiceExt; // for `oneshot`

    async fn setup() -> (Router, Arc<ApiState>, SyncHandle) {
        let repository = Arc::new(ContentRepository::in_memory());
        let store = BookStore::new(repository, NodePath::parse("/content/books").unwrap());
        store.ensure_root().await.unwrap();

        let cache = Arc::new(BookCache::new());
        let sync = CacheSync::new(Arc::new(store.clone()), cache.clone())
            .start(CancellationToken::new())
            .await;

        let state = Arc::new(ApiState {
            service: BookService::new(store, 13),
            cache,
            status: sync.status(),
        });
        (router(state.clone()), state, sync)
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn book_json(isbn: &str, paragraph: &str) -> Value {
        json!({
            "name": "Dune",
            "author": "Frank Herbert",
            "isbn": isbn,
            "introduction": ["Arrakis."],
            "paragraphs": [paragraph]
        })
    }

    #[tokio::test]
    async fn added_books_reach_the_cache() {
        let (app, state, sync) = setup().await;

        let (status, body) = call(
            &app,
            Method::POST,
            "/books",
            Some(json!([book_json("9780441172719", "The spice must flow.")])),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resultCode"], 0);
        assert_eq!(body["resultText"], "SUCCESS");

        let mut watcher = state.status.clone();
        watcher.wait_for(|s| s.events_seen() >= 1).await.unwrap();

        let (status, cached) = call(&app, Method::GET, "/bookstore", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cached.as_array().unwrap().len(), 1);
        assert_eq!(cached[0]["isbn"], "9780441172719");

        let (_, stored) = call(&app, Method::GET, "/books", None).await;
        assert_eq!(stored[0]["bookId"], cached[0]["bookId"]);

        sync.shutdown().await;
    }

    #[tokio::test]
    async fn duplicate_isbn_is_a_conflict() {
        let (app, _state, sync) = setup().await;
        let books = json!([book_json("9780441172719", "x")]);

        call(&app, Method::POST, "/books", Some(books.clone())).await;
        let (status, body) = call(&app, Method::POST, "/books", Some(books)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["resultText"], "ALREADY_EXIST");
        assert_eq!(body["message"], "A book already exist by ISBN: 9780441172719");
        sync.shutdown().await;
    }

    #[tokio::test]
    async fn invalid_requests_are_rejected() {
        let (app, _state, sync) = setup().await;

        let (status, body) = call(&app, Method::POST, "/books", Some(json!([book_json("123", "x")]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["resultCode"], 4);
        assert_eq!(body["message"], "ISBN size should be 13");

        let (status, body) = call(&app, Method::POST, "/books", Some(json!({"not": "a list"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["resultText"], "VALIDATION_FAILED");

        let (status, _) = call(&app, Method::GET, "/books/search/%20", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        sync.shutdown().await;
    }

    #[tokio::test]
    async fn update_search_and_delete() {
        let (app, state, sync) = setup().await;
        call(&app, Method::POST, "/books", Some(json!([book_json("9780441172719", "desert planet")]))).await;
        let id = state.service.list_books().await.unwrap()[0].id.clone();

        let (_, found) = call(&app, Method::GET, "/books/search/desert", None).await;
        assert_eq!(found.as_array().unwrap().len(), 1);

        let mut update = book_json("9780441172719", "ocean planet");
        update["bookId"] = json!(id);
        let (status, _) = call(&app, Method::POST, "/books/update", Some(update)).await;
        assert_eq!(status, StatusCode::OK);
        let (_, found) = call(&app, Method::GET, "/books/search/desert", None).await;
        assert!(found.as_array().unwrap().is_empty());

        let uri = format!("/books/delete/{id}");
        let (status, _) = call(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = call(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["resultText"], "NOT_FOUND");

        let mut watcher = state.status.clone();
        watcher.wait_for(|s| s.events_seen() >= 3).await.unwrap();
        assert!(state.cache.is_empty());
        sync.shutdown().await;
    }

    #[tokio::test]
    async fn status_reports_listener_state() {
        let (app, _state, sync) = setup().await;

        let (status, body) = call(&app, Method::GET, "/bookstore/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "armed");
        assert_eq!(body["reconciliations"], 1);
        assert_eq!(body["cachedBooks"], 0);
        assert_eq!(body["consistent"], true);

        sync.shutdown().await;
        let (_, body) = call(&app, Method::GET, "/bookstore/status", None).await;
        assert_eq!(body["state"], ListenerState::Stopped.to_string());
    }

    #[test]
    fn internal_errors_are_masked() {
        let response = BookstoreError::Internal("secret detail".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let envelope = BookResponse::from_error(&BookstoreError::BookNotFound("b".into()));
        assert_eq!(envelope.message.as_deref(), Some("Book not found: b"));
    }
}

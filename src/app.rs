//! Composition root
//!
//! Builds the repository, store, cache and listener from configuration and
//! owns them for the life of the process.

use crate::api::{self, ApiState};
use crate::cache::{BookCache, CacheSync, StatusHandle, SyncHandle};
use crate::config::Config;
use crate::error::{BookstoreError, BookstoreResult};
use crate::repository::ContentRepository;
use crate::service::BookService;
use crate::store::BookStore;
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Open the configured repository and the book store over it
pub async fn open_store(config: &Config) -> BookstoreResult<BookStore> {
    let repository = match config.repository.data_file_path() {
        Some(path) => ContentRepository::open(path).await?,
        None => ContentRepository::in_memory(),
    };
    let store = BookStore::new(Arc::new(repository), config.repository.root()?);
    store.ensure_root().await?;
    Ok(store)
}

/// The running service
pub struct App {
    state: Arc<ApiState>,
    sync: SyncHandle,
}

impl App {
    /// Open the store, bootstrap the cache and arm the listener
    pub async fn start(config: &Config) -> BookstoreResult<Self> {
        let store = open_store(config).await?;
        if let Some(path) = store.repository().data_file() {
            info!("Using repository data file {}", path.display());
        }

        let cache = Arc::new(BookCache::new());
        let sync = CacheSync::new(Arc::new(store.clone()), Arc::clone(&cache))
            .start(CancellationToken::new())
            .await;

        let state = Arc::new(ApiState {
            service: BookService::new(store, config.catalog.isbn_length),
            cache,
            status: sync.status(),
        });

        Ok(Self { state, sync })
    }

    pub fn router(&self) -> Router {
        api::router(Arc::clone(&self.state))
    }

    pub fn service(&self) -> &BookService {
        &self.state.service
    }

    pub fn cache(&self) -> &Arc<BookCache> {
        &self.state.cache
    }

    pub fn status(&self) -> StatusHandle {
        self.sync.status()
    }

    /// Serve HTTP on `bind` until `shutdown` resolves. The listener is
    /// stopped on every way out, including a failed bind.
    pub async fn serve<F>(self, bind: &str, shutdown: F) -> BookstoreResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = match TcpListener::bind(bind).await {
            Ok(listener) => listener,
            Err(source) => {
                self.shutdown().await;
                return Err(BookstoreError::Bind {
                    addr: bind.to_string(),
                    source,
                });
            }
        };
        info!("Listening on http://{}", bind);

        let served = axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| BookstoreError::io("serving HTTP", e));

        self.shutdown().await;
        served
    }

    /// Stop the listener; the cache is dropped with the app
    pub async fn shutdown(self) {
        self.sync.shutdown().await;
        info!("Bookstore stopped");
    }
}

//! Bookstore - book catalog service
//!
//! Books live in a hierarchical content repository. A read cache of the
//! whole catalog is bootstrapped from it at startup and kept current by a
//! change listener, reloading in full whenever an event cannot be trusted.

pub mod api;
pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod store;
pub mod ui;

pub use error::{BookstoreError, BookstoreResult};

//! Catalog data model

mod book;
mod response;
pub mod validation;

pub use book::{Book, BookField};
pub use response::{BookResponse, ResultCode, INTERNAL_ERROR_MESSAGE};

//! Catalog operations behind the REST surface and the CLI
//!
//! Validates requests, assigns ids and enforces ISBN uniqueness before
//! handing writes to the [`BookStore`].

use crate::error::{BookstoreError, BookstoreResult};
use crate::model::validation::{check_not_blank, validate_book};
use crate::model::Book;
use crate::store::{BookStore, EntityStore};
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct BookService {
    store: BookStore,
    isbn_length: usize,
}

impl BookService {
    pub fn new(store: BookStore, isbn_length: usize) -> Self {
        Self { store, isbn_length }
    }

    pub fn store(&self) -> &BookStore {
        &self.store
    }

    /// Validate and store new books, returning them with their assigned ids
    pub async fn add_books(&self, mut books: Vec<Book>) -> BookstoreResult<Vec<Book>> {
        if books.is_empty() {
            return Err(BookstoreError::validation("books can not be empty"));
        }

        let mut seen = HashSet::new();
        for book in &mut books {
            validate_book(book, self.isbn_length)?;
            if !seen.insert(book.isbn.clone()) || !self.store.find_by_isbn(&book.isbn)?.is_empty() {
                return Err(BookstoreError::AlreadyExists(format!(
                    "A book already exist by ISBN: {}",
                    book.isbn
                )));
            }
            book.id = Uuid::new_v4().to_string();
        }

        debug!(count = books.len(), "Adding books");
        self.store.save_books(&books).await?;
        Ok(books)
    }

    pub async fn update_book(&self, book: &Book) -> BookstoreResult<()> {
        check_not_blank(&book.id, "book ID can not be empty")?;
        validate_book(book, self.isbn_length)?;
        self.store.update_book(book).await
    }

    pub async fn delete_book(&self, id: &str) -> BookstoreResult<()> {
        check_not_blank(id, "bookId can not be empty")?;
        self.store.delete_book(id).await
    }

    pub async fn list_books(&self) -> BookstoreResult<Vec<Book>> {
        self.store.read_all().await
    }

    pub fn search_books(&self, query: &str) -> BookstoreResult<Vec<Book>> {
        check_not_blank(query, "query text can not be empty")?;
        self.store.search(query)
    }
}

//! Repository-backed book store

use super::mapping::{to_book, write_book, write_changed};
use super::EntityStore;
use crate::error::{BookstoreError, BookstoreResult};
use crate::model::{Book, BookField};
use crate::repository::{ChangeKind, ContentRepository, Node, NodePath, PropertyValue, Subscription};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Books stored as children of one collection node
#[derive(Debug, Clone)]
pub struct BookStore {
    repository: Arc<ContentRepository>,
    root: NodePath,
}

impl BookStore {
    pub fn new(repository: Arc<ContentRepository>, root: NodePath) -> Self {
        Self { repository, root }
    }

    pub fn repository(&self) -> &Arc<ContentRepository> {
        &self.repository
    }

    /// Create the collection node and its ancestors if missing
    pub async fn ensure_root(&self) -> BookstoreResult<()> {
        let mut edit = self.repository.edit();
        edit.ensure_node(&self.root);
        if edit.commit().await? > 0 {
            debug!(root = %self.root, "Created book collection");
        }
        Ok(())
    }

    /// Node path of the book with `id`
    pub fn book_path(&self, id: &str) -> BookstoreResult<NodePath> {
        self.root.join(id)
    }

    /// Store new books in one commit. Ids must already be assigned.
    pub async fn save_books(&self, books: &[Book]) -> BookstoreResult<usize> {
        let mut edit = self.repository.edit();
        edit.ensure_node(&self.root);
        for book in books {
            let path = self.book_path(&book.id)?;
            edit.add_node(&path);
            write_book(&mut edit, &path, book);
        }
        edit.commit().await?;

        debug!(count = books.len(), "Books saved");
        Ok(books.len())
    }

    /// Overwrite the fields of an existing book that differ
    pub async fn update_book(&self, book: &Book) -> BookstoreResult<()> {
        let path = self.book_path(&book.id)?;
        let current = self
            .repository
            .node(&path)
            .ok_or_else(|| BookstoreError::BookNotFound(book.id.clone()))?;

        let mut edit = self.repository.edit();
        write_changed(&mut edit, &path, &current, book);
        if edit.is_empty() {
            debug!(book_id = %book.id, "Update changed nothing");
            return Ok(());
        }
        edit.commit().await.map_err(|err| not_found_as_book(err, &book.id))?;

        debug!(book_id = %book.id, "Book updated");
        Ok(())
    }

    pub async fn delete_book(&self, id: &str) -> BookstoreResult<()> {
        let path = self.book_path(id)?;
        let mut edit = self.repository.edit();
        edit.remove_node(&path);
        edit.commit().await.map_err(|err| not_found_as_book(err, id))?;

        debug!(book_id = %id, "Book deleted");
        Ok(())
    }

    /// Books with a paragraph containing `text`; malformed books are skipped
    pub fn search(&self, text: &str) -> BookstoreResult<Vec<Book>> {
        Ok(self
            .read_all_now()
            .into_iter()
            .filter(|book| book.mentions(text))
            .collect())
    }

    pub fn find_by_isbn(&self, isbn: &str) -> BookstoreResult<Vec<Book>> {
        self.find(|node| {
            node.property(BookField::Isbn.field_name())
                .and_then(PropertyValue::as_single)
                == Some(isbn)
        })
    }

    fn find<F>(&self, predicate: F) -> BookstoreResult<Vec<Book>>
    where
        F: Fn(&Node) -> bool,
    {
        let depth = self.root.depth() + 1;
        self.repository
            .query(&self.root, predicate)
            .into_iter()
            .filter(|(path, _)| path.depth() == depth)
            .map(|(path, node)| to_book(&path, &node))
            .collect()
    }

    fn read_all_now(&self) -> Vec<Book> {
        self.repository
            .read(&self.root, |collection| {
                collection
                    .children()
                    .filter_map(|(name, node)| {
                        let path = self.book_path(name).ok()?;
                        match to_book(&path, node) {
                            Ok(book) => Some(book),
                            Err(err) => {
                                warn!(path = %path, "Skipping book: {}", err);
                                None
                            }
                        }
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn not_found_as_book(err: BookstoreError, id: &str) -> BookstoreError {
    match err {
        BookstoreError::NodeNotFound(_) => BookstoreError::BookNotFound(id.to_string()),
        other => other,
    }
}

#[async_trait]
impl EntityStore for BookStore {
    fn root_path(&self) -> &NodePath {
        &self.root
    }

    async fn read_all(&self) -> BookstoreResult<Vec<Book>> {
        Ok(self.read_all_now())
    }

    async fn read_by_id(&self, id: &str) -> BookstoreResult<Option<Book>> {
        let path = self.book_path(id)?;
        self.repository
            .read(&path, |node| to_book(&path, node))
            .transpose()
    }

    fn subscribe(&self, kinds: &[ChangeKind]) -> Subscription {
        self.repository.subscribe(&self.root, kinds)
    }
}

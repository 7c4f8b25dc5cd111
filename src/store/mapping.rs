//! Book <-> node marshaling
//!
//! A book is one node named by its id. Scalar fields are single-valued
//! properties; `introduction` and `paragraphs` are multi-valued, though a
//! single value written by another client is read as a one-element list.

use crate::error::{BookstoreError, BookstoreResult};
use crate::model::{Book, BookField};
use crate::repository::{Edit, Node, NodePath, PropertyValue};

/// Read a book out of its node
pub fn to_book(path: &NodePath, node: &Node) -> BookstoreResult<Book> {
    let id = path
        .name()
        .ok_or_else(|| malformed(path, "the root node is not a book"))?;

    let mut book = Book::with_id(id);
    book.name = scalar(path, node, BookField::Name)?;
    book.author = scalar(path, node, BookField::Author)?;
    book.isbn = scalar(path, node, BookField::Isbn)?;
    book.introduction = values(node, BookField::Introduction);
    book.paragraphs = values(node, BookField::Paragraphs);

    Ok(book)
}

fn scalar(path: &NodePath, node: &Node, field: BookField) -> BookstoreResult<String> {
    match node.property(field.field_name()) {
        None => Ok(String::new()),
        Some(value) => value.as_single().map(str::to_string).ok_or_else(|| {
            malformed(path, format!("'{}' must be single-valued", field.field_name()))
        }),
    }
}

fn values(node: &Node, field: BookField) -> Vec<String> {
    node.property(field.field_name())
        .map(PropertyValue::to_values)
        .unwrap_or_default()
}

fn malformed(path: &NodePath, reason: impl Into<String>) -> BookstoreError {
    BookstoreError::MalformedBook {
        path: path.to_string(),
        reason: reason.into(),
    }
}

fn field_value(book: &Book, field: BookField) -> PropertyValue {
    match field {
        BookField::Name => PropertyValue::from(book.name.as_str()),
        BookField::Author => PropertyValue::from(book.author.as_str()),
        BookField::Isbn => PropertyValue::from(book.isbn.as_str()),
        BookField::Introduction => PropertyValue::from(book.introduction.clone()),
        BookField::Paragraphs => PropertyValue::from(book.paragraphs.clone()),
    }
}

/// Queue every property of `book` onto the node at `path`
pub fn write_book(edit: &mut Edit<'_>, path: &NodePath, book: &Book) {
    for field in BookField::PROPERTIES {
        edit.set_property(path, field.field_name(), field_value(book, field));
    }
}

/// Queue only the properties whose values differ from `current`
pub fn write_changed(edit: &mut Edit<'_>, path: &NodePath, current: &Node, book: &Book) {
    for field in BookField::PROPERTIES {
        let value = field_value(book, field);
        let unchanged = current
            .property(field.field_name())
            .is_some_and(|existing| existing.to_values() == value.to_values());
        if !unchanged {
            edit.set_property(path, field.field_name(), value);
        }
    }
}

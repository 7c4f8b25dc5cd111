//! Request validation for books

use super::Book;
use crate::error::{BookstoreError, BookstoreResult};

/// Fail with `message` when `value` is blank
pub fn check_not_blank(value: &str, message: &str) -> BookstoreResult<()> {
    if value.trim().is_empty() {
        return Err(BookstoreError::validation(message));
    }
    Ok(())
}

fn check_values(values: &[String], empty: &str, blank_entry: &str) -> BookstoreResult<()> {
    if values.is_empty() {
        return Err(BookstoreError::validation(empty));
    }
    values
        .iter()
        .try_for_each(|value| check_not_blank(value, blank_entry))
}

/// Check the content fields of a book. The id is not looked at.
pub fn validate_book(book: &Book, isbn_length: usize) -> BookstoreResult<()> {
    check_not_blank(&book.name, "book name can not be empty")?;
    check_not_blank(&book.author, "book author can not be empty")?;
    check_not_blank(&book.isbn, "book ISBN can not be empty")?;

    if book.isbn.chars().count() != isbn_length {
        return Err(BookstoreError::validation(format!(
            "ISBN size should be {isbn_length}"
        )));
    }

    check_values(
        &book.introduction,
        "book introduction can not be empty",
        "introduction paragraph can not be empty",
    )?;
    check_values(
        &book.paragraphs,
        "book paragraphs can not be empty",
        "paragraph can not be empty",
    )
}

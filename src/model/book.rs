//! Book record

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Property names a book is stored under in the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Name,
    Author,
    Isbn,
    Introduction,
    Paragraphs,
}

impl BookField {
    /// Every stored field; the id is the node name, not a property
    pub const PROPERTIES: [BookField; 5] = [
        BookField::Name,
        BookField::Author,
        BookField::Isbn,
        BookField::Introduction,
        BookField::Paragraphs,
    ];

    /// Repository property name
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Author => "author",
            Self::Isbn => "isbn",
            Self::Introduction => "introduction",
            Self::Paragraphs => "paragraphs",
        }
    }
}

/// A catalog record.
///
/// Identity is the `id` alone: two books with the same id are the same book
/// regardless of their other fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Stable id, assigned on creation and used as the node name
    #[serde(rename = "bookId", default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub isbn: String,

    #[serde(default)]
    pub introduction: Vec<String>,

    #[serde(default)]
    pub paragraphs: Vec<String>,
}

impl Book {
    /// Create a book with the given id and no content
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Whether any paragraph contains `text`
    pub fn mentions(&self, text: &str) -> bool {
        self.paragraphs.iter().any(|p| p.contains(text))
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

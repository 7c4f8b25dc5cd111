//! Change notifications emitted by committed edits

use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened at an event's path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// A node was added; the path is the node's path
    Created,
    /// A node (and everything under it) was removed
    Removed,
    /// A property was set on a node that had no value for it
    FieldAdded,
    /// An existing property got a different value
    FieldChanged,
    /// A property was removed
    FieldRemoved,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 5] = [
        ChangeKind::Created,
        ChangeKind::Removed,
        ChangeKind::FieldAdded,
        ChangeKind::FieldChanged,
        ChangeKind::FieldRemoved,
    ];

    /// Property events carry a property path, one segment below the node
    pub fn is_field(self) -> bool {
        matches!(
            self,
            Self::FieldAdded | Self::FieldChanged | Self::FieldRemoved
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Removed => "removed",
            Self::FieldAdded => "field_added",
            Self::FieldChanged => "field_changed",
            Self::FieldRemoved => "field_removed",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single notification. Transient; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub path: String,
}

impl ChangeEvent {
    pub fn new(kind: ChangeKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.path)
    }
}

/// Events of one commit, in the order they happened
pub type EventBatch = Vec<ChangeEvent>;

//! What a change event refers to
//!
//! Book nodes sit one level below the collection root and their properties
//! two levels below it. The event kind says whether the path names a node or
//! a property; the depth below the root then says which node.

use crate::repository::{ChangeEvent, ChangeKind, NodePath};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTarget {
    /// The collection node itself, or an ancestor of it, was created or removed
    Collection,
    /// A book node was created or removed
    Entity { id: String },
    /// A property of a book node changed
    Field { id: String, field: String },
    /// Inside the scope but not something the cache mirrors
    Ignored,
    /// The path is malformed or outside the root
    Unparseable,
}

/// Resolve `event` against the collection `root`
pub fn resolve(root: &NodePath, event: &ChangeEvent) -> EventTarget {
    let Ok(path) = NodePath::parse(&event.path) else {
        return EventTarget::Unparseable;
    };
    if event.kind == ChangeKind::Removed && root.is_descendant_of(&path) {
        return EventTarget::Collection;
    }
    let Some(relative) = path.relative_to(root) else {
        return EventTarget::Unparseable;
    };

    match (event.kind, relative) {
        (ChangeKind::Created | ChangeKind::Removed, []) => EventTarget::Collection,
        (ChangeKind::Created | ChangeKind::Removed, [id]) => EventTarget::Entity { id: id.clone() },
        (kind, [id, field]) if kind.is_field() => EventTarget::Field {
            id: id.clone(),
            field: field.clone(),
        },
        _ => EventTarget::Ignored,
    }
}

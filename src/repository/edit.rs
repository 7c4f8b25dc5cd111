//! Batched writes against the repository tree
//!
//! An [`Edit`] collects operations and applies them in one commit: either all
//! of them take effect or none do.

use super::event::ChangeKind;
use super::node::{Node, PropertyValue};
use super::path::{validate_name, NodePath};
use super::ContentRepository;
use crate::error::{BookstoreError, BookstoreResult};
use std::collections::HashSet;

/// A change produced by applying an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Change {
    pub(crate) kind: ChangeKind,
    pub(crate) path: NodePath,
}

#[derive(Debug, Clone)]
pub(crate) enum Operation {
    EnsureNode(NodePath),
    AddNode(NodePath),
    SetProperty {
        path: NodePath,
        name: String,
        value: PropertyValue,
    },
    RemoveProperty {
        path: NodePath,
        name: String,
    },
    RemoveNode(NodePath),
}

/// Pending writes; nothing is visible until [`Edit::commit`]
#[must_use = "an edit does nothing until committed"]
pub struct Edit<'a> {
    repository: &'a ContentRepository,
    operations: Vec<Operation>,
}

impl<'a> Edit<'a> {
    pub(crate) fn new(repository: &'a ContentRepository) -> Self {
        Self {
            repository,
            operations: Vec::new(),
        }
    }

    /// Create the node and any missing ancestors; no-op if it exists
    pub fn ensure_node(&mut self, path: &NodePath) -> &mut Self {
        self.operations.push(Operation::EnsureNode(path.clone()));
        self
    }

    /// Add a node under an existing parent; fails if it already exists
    pub fn add_node(&mut self, path: &NodePath) -> &mut Self {
        self.operations.push(Operation::AddNode(path.clone()));
        self
    }

    pub fn set_property(
        &mut self,
        path: &NodePath,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> &mut Self {
        self.operations.push(Operation::SetProperty {
            path: path.clone(),
            name: name.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn remove_property(&mut self, path: &NodePath, name: &str) -> &mut Self {
        self.operations.push(Operation::RemoveProperty {
            path: path.clone(),
            name: name.to_string(),
        });
        self
    }

    pub fn remove_node(&mut self, path: &NodePath) -> &mut Self {
        self.operations.push(Operation::RemoveNode(path.clone()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Apply every operation atomically and notify subscribers.
    ///
    /// Returns the number of change events the commit produced.
    pub async fn commit(self) -> BookstoreResult<usize> {
        self.repository.commit(self.operations).await
    }
}

/// Apply operations to `root` in order, recording what changed.
///
/// Property events are not recorded for nodes created by the same
/// operations; their `Created` event covers them.
pub(crate) fn apply(root: &mut Node, operations: &[Operation]) -> BookstoreResult<Vec<Change>> {
    let mut changes = Vec::new();
    let mut created: HashSet<NodePath> = HashSet::new();

    for operation in operations {
        match operation {
            Operation::EnsureNode(path) => {
                let mut current = NodePath::root();
                for segment in path.segments() {
                    let parent = current.clone();
                    current = current.join(segment)?;
                    let parent_node = node_mut(root, &parent)?;
                    if !parent_node.has_child(segment) {
                        parent_node.insert_child(segment, Node::new());
                        record_created(&mut changes, &mut created, &current);
                    }
                }
            }
            Operation::AddNode(path) => {
                let (parent, name) = split(path)?;
                let parent_node = node_mut(root, &parent)?;
                if parent_node.has_child(name) {
                    return Err(BookstoreError::NodeExists(path.to_string()));
                }
                parent_node.insert_child(name, Node::new());
                record_created(&mut changes, &mut created, path);
            }
            Operation::SetProperty { path, name, value } => {
                validate_name(name).map_err(|reason| BookstoreError::path_invalid(name, reason))?;
                let node = node_mut(root, path)?;
                let kind = match node.property(name) {
                    Some(current) if current == value => continue,
                    Some(_) => ChangeKind::FieldChanged,
                    None => ChangeKind::FieldAdded,
                };
                node.set_property(name, value.clone());
                if !created.contains(path) {
                    changes.push(Change {
                        kind,
                        path: path.join(name)?,
                    });
                }
            }
            Operation::RemoveProperty { path, name } => {
                let node = node_mut(root, path)?;
                if node.remove_property(name).is_some() && !created.contains(path) {
                    changes.push(Change {
                        kind: ChangeKind::FieldRemoved,
                        path: path.join(name)?,
                    });
                }
            }
            Operation::RemoveNode(path) => {
                let (parent, name) = split(path)?;
                let parent_node = node_mut(root, &parent)?;
                if parent_node.remove_child(name).is_none() {
                    return Err(BookstoreError::NodeNotFound(path.to_string()));
                }
                created.retain(|p| !p.starts_with(path));
                changes.push(Change {
                    kind: ChangeKind::Removed,
                    path: path.clone(),
                });
            }
        }
    }

    Ok(changes)
}

fn record_created(changes: &mut Vec<Change>, created: &mut HashSet<NodePath>, path: &NodePath) {
    created.insert(path.clone());
    changes.push(Change {
        kind: ChangeKind::Created,
        path: path.clone(),
    });
}

fn node_mut<'n>(root: &'n mut Node, path: &NodePath) -> BookstoreResult<&'n mut Node> {
    root.descend_mut(path.segments())
        .ok_or_else(|| BookstoreError::NodeNotFound(path.to_string()))
}

fn split(path: &NodePath) -> BookstoreResult<(NodePath, &str)> {
    match (path.parent(), path.name()) {
        (Some(parent), Some(name)) => Ok((parent, name)),
        _ => Err(BookstoreError::path_invalid(
            path.to_string(),
            "the root node cannot be added or removed",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(raw: &str) -> NodePath {
        NodePath::parse(raw).unwrap()
    }

    fn kinds(changes: &[Change]) -> Vec<(ChangeKind, String)> {
        changes
            .iter()
            .map(|c| (c.kind, c.path.to_string()))
            .collect()
    }

    #[test]
    fn ensure_node_creates_missing_ancestors_once() {
        let mut root = Node::new();
        let changes = apply(&mut root, &[Operation::EnsureNode(path("/a/b"))]).unwrap();
        assert_eq!(
            kinds(&changes),
            vec![
                (ChangeKind::Created, "/a".to_string()),
                (ChangeKind::Created, "/a/b".to_string()),
            ]
        );

        let again = apply(&mut root, &[Operation::EnsureNode(path("/a/b"))]).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn properties_on_new_nodes_are_covered_by_created() {
        let mut root = Node::new();
        let changes = apply(
            &mut root,
            &[
                Operation::AddNode(path("/book")),
                Operation::SetProperty {
                    path: path("/book"),
                    name: "name".to_string(),
                    value: "Dune".into(),
                },
            ],
        )
        .unwrap();

        assert_eq!(kinds(&changes), vec![(ChangeKind::Created, "/book".to_string())]);
    }

    #[test]
    fn property_events_on_existing_nodes() {
        let mut root = Node::new();
        apply(&mut root, &[Operation::AddNode(path("/book"))]).unwrap();

        let set = |value: &str| Operation::SetProperty {
            path: path("/book"),
            name: "name".to_string(),
            value: value.into(),
        };

        let added = apply(&mut root, &[set("Dune")]).unwrap();
        assert_eq!(kinds(&added), vec![(ChangeKind::FieldAdded, "/book/name".to_string())]);

        let unchanged = apply(&mut root, &[set("Dune")]).unwrap();
        assert!(unchanged.is_empty());

        let changed = apply(&mut root, &[set("Dune Messiah")]).unwrap();
        assert_eq!(
            kinds(&changed),
            vec![(ChangeKind::FieldChanged, "/book/name".to_string())]
        );

        let removed = apply(
            &mut root,
            &[Operation::RemoveProperty {
                path: path("/book"),
                name: "name".to_string(),
            }],
        )
        .unwrap();
        assert_eq!(
            kinds(&removed),
            vec![(ChangeKind::FieldRemoved, "/book/name".to_string())]
        );
    }

    #[test]
    fn add_existing_node_fails() {
        let mut root = Node::new();
        apply(&mut root, &[Operation::AddNode(path("/book"))]).unwrap();
        let err = apply(&mut root, &[Operation::AddNode(path("/book"))]).unwrap_err();
        assert!(matches!(err, BookstoreError::NodeExists(_)));
    }

    #[test]
    fn add_without_parent_fails() {
        let mut root = Node::new();
        let err = apply(&mut root, &[Operation::AddNode(path("/missing/book"))]).unwrap_err();
        assert!(matches!(err, BookstoreError::NodeNotFound(_)));
    }

    #[test]
    fn remove_reports_only_the_removed_node() {
        let mut root = Node::new();
        apply(&mut root, &[Operation::EnsureNode(path("/a/b/c"))]).unwrap();

        let changes = apply(&mut root, &[Operation::RemoveNode(path("/a/b"))]).unwrap();
        assert_eq!(kinds(&changes), vec![(ChangeKind::Removed, "/a/b".to_string())]);
        assert!(root.descend(&["a".to_string(), "b".to_string()]).is_none());
    }

    #[test]
    fn root_cannot_be_removed() {
        let mut root = Node::new();
        let err = apply(&mut root, &[Operation::RemoveNode(NodePath::root())]).unwrap_err();
        assert!(matches!(err, BookstoreError::PathInvalid { .. }));
    }
}

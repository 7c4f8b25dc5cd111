//! Repository nodes and property values

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value of a node property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Single(String),
    Multiple(Vec<String>),
}

impl PropertyValue {
    /// The value of a single-valued property
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Multiple(_) => None,
        }
    }

    /// All values; a single-valued property yields one element
    pub fn to_values(&self) -> Vec<String> {
        match self {
            Self::Single(value) => vec![value.clone()],
            Self::Multiple(values) => values.clone(),
        }
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multiple(values)
    }
}

/// A node: named properties plus ordered child nodes.
///
/// Children keep insertion order, which is the enumeration order seen by
/// readers of the tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    properties: IndexMap<String, PropertyValue>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    children: IndexMap<String, Node>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Children in insertion order
    pub fn children(&self) -> impl DoubleEndedIterator<Item = (&str, &Node)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Walk down from this node along `segments`
    pub fn descend(&self, segments: &[String]) -> Option<&Node> {
        segments
            .iter()
            .try_fold(self, |node, segment| node.children.get(segment))
    }

    pub(crate) fn descend_mut(&mut self, segments: &[String]) -> Option<&mut Node> {
        segments
            .iter()
            .try_fold(self, |node, segment| node.children.get_mut(segment))
    }

    /// Set a property, returning the previous value
    pub(crate) fn set_property(
        &mut self,
        name: &str,
        value: PropertyValue,
    ) -> Option<PropertyValue> {
        self.properties.insert(name.to_string(), value)
    }

    pub(crate) fn remove_property(&mut self, name: &str) -> Option<PropertyValue> {
        self.properties.shift_remove(name)
    }

    pub(crate) fn insert_child(&mut self, name: &str, child: Node) {
        self.children.insert(name.to_string(), child);
    }

    pub(crate) fn remove_child(&mut self, name: &str) -> Option<Node> {
        self.children.shift_remove(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_keep_insertion_order() {
        let mut node = Node::new();
        node.insert_child("c", Node::new());
        node.insert_child("a", Node::new());
        node.insert_child("b", Node::new());
        node.remove_child("a");

        let names: Vec<&str> = node.children().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["c", "b"]);
    }

    #[test]
    fn descend_walks_segments() {
        let mut leaf = Node::new();
        leaf.set_property("name", "leaf".into());
        let mut middle = Node::new();
        middle.insert_child("leaf", leaf);
        let mut root = Node::new();
        root.insert_child("middle", middle);

        let found = root
            .descend(&["middle".to_string(), "leaf".to_string()])
            .unwrap();
        assert_eq!(found.property("name"), Some(&PropertyValue::from("leaf")));
        assert!(root.descend(&["missing".to_string()]).is_none());
        assert_eq!(root.descend(&[]), Some(&root));
    }

    #[test]
    fn property_values_serialize_untagged() {
        let mut node = Node::new();
        node.set_property("isbn", "123".into());
        node.set_property("paragraphs", vec!["a".to_string(), "b".to_string()].into());

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["properties"]["isbn"], "123");
        assert_eq!(json["properties"]["paragraphs"][1], "b");

        let parsed: Node = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, node);
    }

    #[test]
    fn single_value_reads_as_list() {
        let value = PropertyValue::from("only");
        assert_eq!(value.to_values(), vec!["only".to_string()]);
        assert_eq!(value.as_single(), Some("only"));
        assert!(PropertyValue::from(vec![]).as_single().is_none());
    }
}

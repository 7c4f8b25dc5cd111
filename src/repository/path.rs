//! Absolute, slash-separated node paths

use crate::error::{BookstoreError, BookstoreResult};
use std::fmt;
use std::str::FromStr;

pub const PATH_SEPARATOR: char = '/';

/// Location of a node in the repository tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    /// The repository root (`/`)
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse an absolute path such as `/content/books/abc`
    pub fn parse(raw: &str) -> BookstoreResult<Self> {
        let rest = raw
            .strip_prefix(PATH_SEPARATOR)
            .ok_or_else(|| BookstoreError::path_invalid(raw, "path must be absolute"))?;

        if rest.is_empty() {
            return Ok(Self::root());
        }

        let segments = rest
            .split(PATH_SEPARATOR)
            .map(|segment| {
                validate_name(segment)
                    .map(|_| segment.to_string())
                    .map_err(|reason| BookstoreError::path_invalid(raw, reason))
            })
            .collect::<BookstoreResult<Vec<_>>>()?;

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments below the root
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, `None` for the root
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn parent(&self) -> Option<NodePath> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Child path; `name` must be a single valid segment
    pub fn join(&self, name: &str) -> BookstoreResult<NodePath> {
        validate_name(name).map_err(|reason| BookstoreError::path_invalid(name, reason))?;
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Ok(Self { segments })
    }

    /// Segments below `ancestor`, or `None` when this path is not at or under it
    pub fn relative_to(&self, ancestor: &NodePath) -> Option<&[String]> {
        if self.starts_with(ancestor) {
            Some(&self.segments[ancestor.depth()..])
        } else {
            None
        }
    }

    /// True for `other` itself and everything below it
    pub fn starts_with(&self, other: &NodePath) -> bool {
        self.segments.len() >= other.segments.len()
            && self.segments[..other.segments.len()] == other.segments[..]
    }

    /// True only for paths strictly below `other`
    pub fn is_descendant_of(&self, other: &NodePath) -> bool {
        self.depth() > other.depth() && self.starts_with(other)
    }
}

/// Check a single node or property name
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("empty path segment");
    }
    if name.contains(PATH_SEPARATOR) {
        return Err("name contains '/'");
    }
    if name == "." || name == ".." {
        return Err("relative segments are not allowed");
    }
    Ok(())
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = BookstoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

//! Hierarchical content repository
//!
//! A tree of nodes addressed by slash-separated paths. Writes go through an
//! [`Edit`] and become visible atomically on commit; every commit then
//! delivers its change events as one batch to matching subscribers.
//!
//! When opened with a data file, the tree is loaded from it at startup and
//! rewritten after each commit that changed something.

pub mod edit;
pub mod event;
pub mod node;
mod observation;
pub mod path;

pub use edit::Edit;
pub use event::{ChangeEvent, ChangeKind, EventBatch};
pub use node::{Node, PropertyValue};
pub use observation::{EventSender, Subscription};
pub use path::NodePath;

use crate::error::{BookstoreError, BookstoreResult};
use edit::Operation;
use observation::ObservationManager;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// The repository: one node tree plus its observers
#[derive(Debug)]
pub struct ContentRepository {
    tree: RwLock<Node>,
    commit_lock: tokio::sync::Mutex<()>,
    observation: ObservationManager,
    data_file: Option<PathBuf>,
}

impl ContentRepository {
    /// An empty repository that lives only in memory
    pub fn in_memory() -> Self {
        Self::with_tree(Node::new(), None)
    }

    /// Open a repository persisted at `data_file`, starting empty if the file does not exist
    pub async fn open(data_file: impl Into<PathBuf>) -> BookstoreResult<Self> {
        let data_file = data_file.into();

        if !data_file.exists() {
            debug!("Repository data file {} not found, starting empty", data_file.display());
            return Ok(Self::with_tree(Node::new(), Some(data_file)));
        }

        let content = fs::read_to_string(&data_file).await.map_err(|e| {
            BookstoreError::io(format!("reading repository {}", data_file.display()), e)
        })?;
        let tree: Node =
            serde_json::from_str(&content).map_err(|e| BookstoreError::RepositoryCorrupt {
                path: data_file.clone(),
                reason: e.to_string(),
            })?;

        info!("Repository loaded from {}", data_file.display());
        Ok(Self::with_tree(tree, Some(data_file)))
    }

    fn with_tree(tree: Node, data_file: Option<PathBuf>) -> Self {
        Self {
            tree: RwLock::new(tree),
            commit_lock: tokio::sync::Mutex::new(()),
            observation: ObservationManager::default(),
            data_file,
        }
    }

    /// File the repository is persisted to, if any
    pub fn data_file(&self) -> Option<&Path> {
        self.data_file.as_deref()
    }

    /// Start a batch of writes
    pub fn edit(&self) -> Edit<'_> {
        Edit::new(self)
    }

    pub fn exists(&self, path: &NodePath) -> bool {
        self.tree.read().descend(path.segments()).is_some()
    }

    /// Run `f` against the node at `path` under a read lock
    pub fn read<R>(&self, path: &NodePath, f: impl FnOnce(&Node) -> R) -> Option<R> {
        let tree = self.tree.read();
        tree.descend(path.segments()).map(f)
    }

    /// Copy of the node at `path` and everything below it
    pub fn node(&self, path: &NodePath) -> Option<Node> {
        self.read(path, Node::clone)
    }

    /// All nodes strictly below `scope` matching `predicate`, in tree order
    pub fn query<F>(&self, scope: &NodePath, predicate: F) -> Vec<(NodePath, Node)>
    where
        F: Fn(&Node) -> bool,
    {
        let tree = self.tree.read();
        let Some(start) = tree.descend(scope.segments()) else {
            return Vec::new();
        };

        let mut matches = Vec::new();
        let mut stack: Vec<(NodePath, &Node)> = start
            .children()
            .rev()
            .filter_map(|(name, child)| scope.join(name).ok().map(|p| (p, child)))
            .collect();

        while let Some((path, node)) = stack.pop() {
            if predicate(node) {
                matches.push((path.clone(), node.clone()));
            }
            for (name, child) in node.children().rev() {
                if let Ok(child_path) = path.join(name) {
                    stack.push((child_path, child));
                }
            }
        }

        matches
    }

    /// Subscribe to events at or below `scope` whose kind is in `kinds`
    pub fn subscribe(&self, scope: &NodePath, kinds: &[ChangeKind]) -> Subscription {
        self.observation.subscribe(scope, kinds)
    }

    /// Apply operations as one commit.
    ///
    /// Commits are serialized. The new tree is staged and persisted before it
    /// becomes visible, so a failed write leaves both memory and disk as they
    /// were. Events are dispatched before the next commit can start.
    pub(crate) async fn commit(&self, operations: Vec<Operation>) -> BookstoreResult<usize> {
        let _commit = self.commit_lock.lock().await;

        let mut staged = self.tree.read().clone();
        let changes = edit::apply(&mut staged, &operations)?;
        if changes.is_empty() {
            return Ok(0);
        }

        if let Some(data_file) = &self.data_file {
            let bytes = serde_json::to_vec_pretty(&staged)?;
            persist(data_file, &bytes).await?;
        }

        *self.tree.write() = staged;
        debug!(events = changes.len(), "Repository commit applied");

        self.observation.dispatch(&changes);
        Ok(changes.len())
    }
}

/// Write the tree next to the data file, then swap it into place
async fn persist(data_file: &Path, bytes: &[u8]) -> BookstoreResult<()> {
    if let Some(parent) = data_file.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| BookstoreError::io(format!("creating {}", parent.display()), e))?;
    }

    let temp = data_file.with_extension("json.tmp");
    fs::write(&temp, bytes)
        .await
        .map_err(|e| BookstoreError::io(format!("writing {}", temp.display()), e))?;
    fs::rename(&temp, data_file)
        .await
        .map_err(|e| BookstoreError::io(format!("replacing {}", data_file.display()), e))?;

    Ok(())
}

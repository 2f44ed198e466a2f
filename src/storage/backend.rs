//! Storage backend contract
//!
//! The hierarchical store that the tree builder mutates. Paths are always
//! relative to the backend's own root and use `/` as separator.

use async_trait::async_trait;

use crate::error::StorageError;

/// Kind of a stored node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    File,
}

/// Descriptor of a stored file or folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Relative path from the storage root
    pub path: String,
    /// Last path component
    pub name: String,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(path: impl Into<String>, kind: NodeKind) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        Self { path, name, kind }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }
}

#[async_trait]
pub trait Storage: Send + Sync {
    /// Creates a folder, including missing intermediate folders.
    ///
    /// Fails with [`StorageError::AlreadyExists`] if a node is already there.
    async fn create_folder(&self, path: &str) -> Result<(), StorageError>;

    /// Creates a text file. The parent folder must already exist.
    async fn create_file(&self, path: &str, content: &str) -> Result<(), StorageError>;

    /// Looks up a node, `None` if nothing exists at `path`.
    async fn get_node_at(&self, path: &str) -> Result<Option<Node>, StorageError>;

    /// Removes a file or folder. Non-empty folders need `recursive`.
    async fn delete_node(&self, node: &Node, recursive: bool) -> Result<(), StorageError>;

    /// Lists the direct children of a folder; `""` is the storage root.
    async fn list_children(&self, path: &str) -> Result<Vec<Node>, StorageError>;

    async fn list_root_children(&self) -> Result<Vec<Node>, StorageError> {
        self.list_children("").await
    }
}

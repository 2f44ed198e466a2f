//! File system storage
//!
//! Storage backend over a real directory tree rooted at the vault root.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use log::{error, info, warn};
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::StorageError;
use crate::storage::backend::{Node, NodeKind, Storage};
use crate::storage::validation::{normalize_relative_path, resolve_relative_path};

const MAX_RETRIES: u64 = 3;

/// Storage backed by the local file system
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the root directory if it does not exist yet.
    pub async fn ensure_root(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    fn resolve(&self, relative: &str) -> Result<(String, PathBuf), StorageError> {
        let normalized = normalize_relative_path(relative)?;
        let real_path = resolve_relative_path(&self.root, &normalized)?;
        Ok((normalized, real_path))
    }
}

async fn node_kind(path: &Path) -> Result<Option<NodeKind>, StorageError> {
    match fs::metadata(path).await {
        Ok(metadata) if metadata.is_dir() => Ok(Some(NodeKind::Folder)),
        Ok(_) => Ok(Some(NodeKind::File)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StorageError::from(e)),
    }
}

/// Writes `content` through `writer`, removing `path` if the write fails.
///
/// A partial file would otherwise be taken for an existing one on the next run.
async fn write_or_discard<W: AsyncWrite + Unpin>(
    mut writer: W,
    path: &Path,
    content: &str,
) -> std::io::Result<()> {
    let result = async {
        writer.write_all(content.as_bytes()).await?;
        writer.flush().await
    }
    .await;

    if result.is_err() {
        drop(writer);
        if let Err(e) = fs::remove_file(path).await {
            warn!("Failed to remove partial file {}: {}", path.display(), e);
        }
    }
    result
}

#[async_trait]
impl Storage for FsStorage {
    async fn create_folder(&self, path: &str) -> Result<(), StorageError> {
        let (virtual_path, real_path) = self.resolve(path)?;

        if node_kind(&real_path).await?.is_some() {
            return Err(StorageError::AlreadyExists(virtual_path));
        }

        fs::create_dir_all(&real_path).await.map_err(|e| {
            error!(
                "Failed to create folder {} (real: {}): {}",
                virtual_path,
                real_path.display(),
                e
            );
            StorageError::from(e)
        })?;

        info!("Created folder {} (real: {})", virtual_path, real_path.display());
        Ok(())
    }

    async fn create_file(&self, path: &str, content: &str) -> Result<(), StorageError> {
        let (virtual_path, real_path) = self.resolve(path)?;

        if let Some(parent_dir) = real_path.parent() {
            match node_kind(parent_dir).await? {
                Some(NodeKind::Folder) => {}
                Some(NodeKind::File) => {
                    return Err(StorageError::NotADirectory(
                        parent_dir.to_string_lossy().to_string(),
                    ));
                }
                None => return Err(StorageError::ParentNotFound(virtual_path)),
            }
        }

        let file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&real_path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists(virtual_path));
            }
            Err(e) => {
                error!(
                    "Failed to create file {} (real: {}): {}",
                    virtual_path,
                    real_path.display(),
                    e
                );
                return Err(StorageError::from(e));
            }
        };

        if let Err(e) = write_or_discard(file, &real_path, content).await {
            error!(
                "Failed to write file {} (real: {}): {}",
                virtual_path,
                real_path.display(),
                e
            );
            return Err(StorageError::from(e));
        }

        info!("Created file {} (real: {})", virtual_path, real_path.display());
        Ok(())
    }

    async fn get_node_at(&self, path: &str) -> Result<Option<Node>, StorageError> {
        let (virtual_path, real_path) = self.resolve(path)?;
        Ok(node_kind(&real_path)
            .await?
            .map(|kind| Node::new(virtual_path, kind)))
    }

    async fn delete_node(&self, node: &Node, recursive: bool) -> Result<(), StorageError> {
        let (virtual_path, real_path) = self.resolve(&node.path)?;
        if virtual_path.is_empty() {
            return Err(StorageError::InvalidPath("refusing to delete the storage root".into()));
        }

        // Delete with retries for permission issues
        for attempt in 1..=MAX_RETRIES {
            let result = match node.kind {
                NodeKind::Folder if recursive => fs::remove_dir_all(&real_path).await,
                NodeKind::Folder => fs::remove_dir(&real_path).await,
                NodeKind::File => fs::remove_file(&real_path).await,
            };

            match result {
                Ok(()) => {
                    info!("Deleted {} (real: {})", virtual_path, real_path.display());
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    return Err(StorageError::NotFound(virtual_path));
                }
                Err(e) if attempt < MAX_RETRIES && e.kind() == ErrorKind::PermissionDenied => {
                    warn!(
                        "Permission denied deleting {} (attempt {}/{}), retrying",
                        virtual_path, attempt, MAX_RETRIES
                    );
                    tokio::time::sleep(Duration::from_millis(100 * attempt)).await;
                }
                Err(e) => {
                    error!(
                        "Failed to delete {} (real: {}): {}",
                        virtual_path,
                        real_path.display(),
                        e
                    );
                    return Err(StorageError::from(e));
                }
            }
        }

        Err(StorageError::IoError(std::io::Error::other(
            "Failed to delete after retries",
        )))
    }

    async fn list_children(&self, path: &str) -> Result<Vec<Node>, StorageError> {
        let (virtual_path, real_path) = self.resolve(path)?;

        match node_kind(&real_path).await? {
            Some(NodeKind::Folder) => {}
            Some(NodeKind::File) => return Err(StorageError::NotADirectory(virtual_path)),
            None => return Err(StorageError::NotFound(virtual_path)),
        }

        let mut entries = fs::read_dir(&real_path).await?;
        let mut children = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            let kind = if entry.file_type().await?.is_dir() {
                NodeKind::Folder
            } else {
                NodeKind::File
            };
            let child_path = if virtual_path.is_empty() {
                name
            } else {
                format!("{}/{}", virtual_path, name)
            };
            children.push(Node::new(child_path, kind));
        }

        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }
}

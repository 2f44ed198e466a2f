//! Storage operations
//!
//! Higher-level operations composed from the backend contract.

use log::{error, info, warn};

use crate::storage::backend::Storage;
use crate::storage::validation::is_safe_path;

/// Deletes the node at a pre-resolved relative path.
///
/// Paths containing `..` or starting with a separator are refused. Folders
/// are deleted recursively. Returns whether a deletion occurred; failures are
/// logged and reported as `false`.
pub async fn delete_node<S: Storage + ?Sized>(storage: &S, path: &str, is_folder: bool) -> bool {
    if !is_safe_path(path) {
        warn!("Refusing to delete unsafe path: {}", path);
        return false;
    }

    let node = match storage.get_node_at(path).await {
        Ok(Some(node)) => node,
        Ok(None) => return false,
        Err(e) => {
            error!("Failed to look up {}: {}", path, e);
            return false;
        }
    };

    if node.is_folder() != is_folder {
        warn!(
            "Deleting {} as {} but it is a {}",
            path,
            if is_folder { "folder" } else { "file" },
            if node.is_folder() { "folder" } else { "file" }
        );
    }

    match storage.delete_node(&node, true).await {
        Ok(()) => {
            info!(
                "{} \"{}\" deleted",
                if node.is_folder() { "Folder" } else { "File" },
                path
            );
            true
        }
        Err(e) => {
            error!("Failed to delete {}: {}", path, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[tokio::test]
    async fn test_rejects_unsafe_paths() {
        let storage = MemoryStorage::new();
        storage.create_folder("tags").await.unwrap();

        assert!(!delete_node(&storage, "../tags", true).await);
        assert!(!delete_node(&storage, "/tags", true).await);
        assert!(!delete_node(&storage, "\\tags", true).await);
        assert!(!delete_node(&storage, "tags/..", true).await);
        assert_eq!(storage.mutation_count(), 1);
    }

    #[tokio::test]
    async fn test_deletes_existing_nodes() {
        let storage = MemoryStorage::new();
        storage.create_folder("tags/sub").await.unwrap();
        storage.create_file("tags/sub/a.md", "a").await.unwrap();
        storage.create_file("tags/b.md", "b").await.unwrap();

        assert!(delete_node(&storage, "tags/b.md", false).await);
        assert!(delete_node(&storage, "tags/sub", true).await);
        assert!(!delete_node(&storage, "tags/sub", true).await);
        assert!(storage.get_node_at("tags/sub/a.md").await.unwrap().is_none());
        assert!(storage.get_node_at("tags").await.unwrap().is_some());
    }
}

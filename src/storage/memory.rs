//! In-memory storage
//!
//! A storage backend that keeps the whole tree in a map. Used for previews
//! and tests; it counts every mutation it performs.

use std::collections::BTreeMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::storage::backend::{Node, NodeKind, Storage};
use crate::storage::validation::{normalize_relative_path, parent_of};

#[derive(Debug, Clone)]
enum Entry {
    Folder,
    File(String),
}

impl Entry {
    fn kind(&self) -> NodeKind {
        match self {
            Entry::Folder => NodeKind::Folder,
            Entry::File(_) => NodeKind::File,
        }
    }
}

/// Storage that lives entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, Entry>>,
    mutations: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful create/delete calls so far.
    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    /// Content of the file at `path`, if it is a file.
    pub async fn read_file(&self, path: &str) -> Option<String> {
        let normalized = normalize_relative_path(path).ok()?;
        match self.entries.lock().await.get(&normalized) {
            Some(Entry::File(content)) => Some(content.clone()),
            _ => None,
        }
    }

    /// Every stored path with its kind, in lexical order.
    pub async fn snapshot(&self) -> Vec<(String, NodeKind)> {
        self.entries
            .lock()
            .await
            .iter()
            .map(|(path, entry)| (path.clone(), entry.kind()))
            .collect()
    }

    fn record_mutation(&self) {
        self.mutations.fetch_add(1, Ordering::SeqCst);
    }
}

fn kind_at(entries: &BTreeMap<String, Entry>, path: &str) -> Option<NodeKind> {
    if path.is_empty() {
        return Some(NodeKind::Folder);
    }
    entries.get(path).map(Entry::kind)
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_folder(&self, path: &str) -> Result<(), StorageError> {
        let normalized = normalize_relative_path(path)?;
        let mut entries = self.entries.lock().await;

        if kind_at(&entries, &normalized).is_some() {
            return Err(StorageError::AlreadyExists(normalized));
        }

        let mut current = String::new();
        for segment in normalized.split('/') {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(segment);
            match entries.get(&current) {
                Some(Entry::Folder) => {}
                Some(Entry::File(_)) => return Err(StorageError::NotADirectory(current)),
                None => {
                    entries.insert(current.clone(), Entry::Folder);
                }
            }
        }

        self.record_mutation();
        Ok(())
    }

    async fn create_file(&self, path: &str, content: &str) -> Result<(), StorageError> {
        let normalized = normalize_relative_path(path)?;
        if normalized.is_empty() {
            return Err(StorageError::InvalidPath(path.to_string()));
        }

        let mut entries = self.entries.lock().await;
        let parent = parent_of(&normalized);
        match kind_at(&entries, parent) {
            Some(NodeKind::Folder) => {}
            Some(NodeKind::File) => return Err(StorageError::NotADirectory(parent.to_string())),
            None => return Err(StorageError::ParentNotFound(normalized)),
        }

        if entries.contains_key(&normalized) {
            return Err(StorageError::AlreadyExists(normalized));
        }

        entries.insert(normalized, Entry::File(content.to_string()));
        self.record_mutation();
        Ok(())
    }

    async fn get_node_at(&self, path: &str) -> Result<Option<Node>, StorageError> {
        let normalized = normalize_relative_path(path)?;
        let entries = self.entries.lock().await;
        Ok(kind_at(&entries, &normalized).map(|kind| Node::new(normalized, kind)))
    }

    async fn delete_node(&self, node: &Node, recursive: bool) -> Result<(), StorageError> {
        let normalized = normalize_relative_path(&node.path)?;
        if normalized.is_empty() {
            return Err(StorageError::InvalidPath("refusing to delete the storage root".into()));
        }

        let mut entries = self.entries.lock().await;
        if !entries.contains_key(&normalized) {
            return Err(StorageError::NotFound(normalized));
        }

        let prefix = format!("{}/", normalized);
        let descendants: Vec<String> = entries
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .cloned()
            .collect();

        if !descendants.is_empty() && !recursive {
            return Err(StorageError::IoError(io::Error::new(
                io::ErrorKind::DirectoryNotEmpty,
                format!("folder not empty: {}", normalized),
            )));
        }

        for key in descendants {
            entries.remove(&key);
        }
        entries.remove(&normalized);

        self.record_mutation();
        Ok(())
    }

    async fn list_children(&self, path: &str) -> Result<Vec<Node>, StorageError> {
        let normalized = normalize_relative_path(path)?;
        let entries = self.entries.lock().await;

        match kind_at(&entries, &normalized) {
            Some(NodeKind::Folder) => {}
            Some(NodeKind::File) => return Err(StorageError::NotADirectory(normalized)),
            None => return Err(StorageError::NotFound(normalized)),
        }

        let mut children: Vec<Node> = entries
            .iter()
            .filter(|(key, _)| parent_of(key) == normalized)
            .map(|(key, entry)| Node::new(key.clone(), entry.kind()))
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_folder_creates_ancestors() {
        let storage = MemoryStorage::new();
        storage.create_folder("a/b/c").await.unwrap();

        let snapshot = storage.snapshot().await;
        assert_eq!(
            snapshot,
            vec![
                ("a".to_string(), NodeKind::Folder),
                ("a/b".to_string(), NodeKind::Folder),
                ("a/b/c".to_string(), NodeKind::Folder),
            ]
        );
        assert_eq!(storage.mutation_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_calls_do_not_count() {
        let storage = MemoryStorage::new();
        storage.create_folder("a").await.unwrap();
        assert!(storage.create_folder("a").await.is_err());
        assert!(storage.create_file("missing/x.md", "").await.is_err());
        assert_eq!(storage.mutation_count(), 1);
    }

    #[tokio::test]
    async fn test_recursive_delete() {
        let storage = MemoryStorage::new();
        storage.create_folder("a/b").await.unwrap();
        storage.create_file("a/b/x.md", "x").await.unwrap();
        storage.create_file("ab.md", "keep").await.unwrap();

        let node = storage.get_node_at("a").await.unwrap().unwrap();
        assert!(storage.delete_node(&node, false).await.is_err());
        storage.delete_node(&node, true).await.unwrap();

        assert_eq!(
            storage.snapshot().await,
            vec![("ab.md".to_string(), NodeKind::File)]
        );
        assert_eq!(storage.read_file("ab.md").await.as_deref(), Some("keep"));
    }

    #[tokio::test]
    async fn test_list_children() {
        let storage = MemoryStorage::new();
        storage.create_folder("z/inner").await.unwrap();
        storage.create_file("m.md", "").await.unwrap();

        let root: Vec<_> = storage
            .list_root_children()
            .await
            .unwrap()
            .into_iter()
            .map(|n| (n.name, n.kind))
            .collect();
        assert_eq!(
            root,
            vec![
                ("m.md".to_string(), NodeKind::File),
                ("z".to_string(), NodeKind::Folder),
            ]
        );
    }
}

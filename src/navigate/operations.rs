//! Navigation operations implementation

use std::cmp::Ordering;

use crate::error::StorageError;
use crate::navigate::results::TreeEntry;
use crate::storage::{Node, Storage};

/// Folders first, then case-insensitive name order.
pub fn sort_for_display(nodes: &mut [Node]) {
    nodes.sort_by(|a, b| match (a.is_folder(), b.is_folder()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
    });
}

/// Lists everything below `path` depth-first.
///
/// Nodes deeper than `max_depth` levels are left out.
pub async fn walk_tree<S: Storage + ?Sized>(
    storage: &S,
    path: &str,
    max_depth: usize,
) -> Result<Vec<TreeEntry>, StorageError> {
    let mut entries = Vec::new();
    let mut pending: Vec<TreeEntry> = Vec::new();

    let mut children = storage.list_children(path).await?;
    sort_for_display(&mut children);
    pending.extend(children.into_iter().rev().map(|node| TreeEntry { level: 0, node }));

    while let Some(entry) = pending.pop() {
        if entry.node.is_folder() && entry.level < max_depth {
            let mut children = storage.list_children(&entry.node.path).await?;
            sort_for_display(&mut children);
            let level = entry.level + 1;
            pending.extend(children.into_iter().rev().map(|node| TreeEntry { level, node }));
        }
        entries.push(entry);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, NodeKind};

    #[test]
    fn test_sort_for_display() {
        let mut nodes = vec![
            Node::new("b.md", NodeKind::File),
            Node::new("Zeta", NodeKind::Folder),
            Node::new("A.md", NodeKind::File),
            Node::new("alpha", NodeKind::Folder),
        ];
        sort_for_display(&mut nodes);
        let names: Vec<_> = nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "Zeta", "A.md", "b.md"]);
    }

    #[tokio::test]
    async fn test_walk_tree_order() {
        let storage = MemoryStorage::new();
        storage.create_folder("tags/sub").await.unwrap();
        storage.create_file("tags/sub/deep.md", "").await.unwrap();
        storage.create_file("tags/a.md", "").await.unwrap();
        storage.create_file("top.md", "").await.unwrap();

        let listing: Vec<_> = walk_tree(&storage, "", 20)
            .await
            .unwrap()
            .into_iter()
            .map(|e| (e.level, e.node.path))
            .collect();

        assert_eq!(
            listing,
            vec![
                (0, "tags".to_string()),
                (1, "tags/sub".to_string()),
                (2, "tags/sub/deep.md".to_string()),
                (1, "tags/a.md".to_string()),
                (0, "top.md".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_walk_tree_depth_limit() {
        let storage = MemoryStorage::new();
        storage.create_folder("a/b/c").await.unwrap();

        let listing = walk_tree(&storage, "", 1).await.unwrap();
        let paths: Vec<_> = listing.iter().map(|e| e.node.path.as_str()).collect();
        assert_eq!(paths, vec!["a", "a/b"]);
    }
}

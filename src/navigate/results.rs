//! Result types for navigate operations

use crate::storage::Node;

/// One node in a depth-first tree listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Nesting level below the listed folder, starting at 0
    pub level: usize,
    pub node: Node,
}

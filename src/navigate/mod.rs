//! Navigate module
//!
//! Walks the stored tree for browsing and picking nodes to delete.

mod operations;
mod results;

// Re-export public types and functions
pub use operations::{sort_for_display, walk_tree};
pub use results::TreeEntry;

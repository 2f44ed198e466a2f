//! Storage backends
//!
//! The backend contract, a file system and an in-memory implementation,
//! path validation and deletion.

pub mod backend;
pub mod filesystem;
pub mod memory;
pub mod operations;
pub mod validation;

pub use backend::{Node, NodeKind, Storage};
pub use filesystem::FsStorage;
pub use memory::MemoryStorage;
pub use operations::delete_node;

//! Error handling
//!
//! Defines error types and handling for treeforge.

pub mod handlers;
pub mod types;

pub use types::*;

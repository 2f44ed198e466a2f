//! treeforge
//!
//! Creates and deletes folder trees described by a line-oriented text format,
//! confined to a sandboxed root.

pub mod builder;
pub mod commands;
pub mod config;
pub mod error;
pub mod navigate;
pub mod sanitize;
pub mod settings;
pub mod storage;

pub use builder::TreeBuilder;

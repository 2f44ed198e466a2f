//! Tree builder
//!
//! Parses a flat, slash-prefixed tree description and materializes it
//! inside a base folder.

pub mod operations;
pub mod plan;
pub mod results;
pub mod stack;

pub use operations::TreeBuilder;
pub use plan::{FILE_EXTENSION, MAX_BATCH_LINES, MAX_DEPTH, Planner, parse_line, preview, split_lines};
pub use results::{BatchOutcome, OperationResult, PlanEntry, Preview, PreviewEntry, ResolvedEntry};
pub use stack::AncestryStack;

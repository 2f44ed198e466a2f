//! Builder result types
//!
//! Defines result structures returned by planning and batch application.

use std::fmt;

use crate::error::BuildError;
use crate::sanitize::SanitizedName;
use crate::storage::NodeKind;

/// One input line reduced to depth, name and kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub depth: usize,
    pub name: SanitizedName,
    pub is_folder: bool,
}

/// A plan entry with its final storage path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub entry: PlanEntry,
    /// Full relative path, including the file extension for files
    pub path: String,
    pub kind: NodeKind,
}

/// Counters for one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationResult {
    pub created: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} skipped, {} errors",
            self.created, self.skipped, self.errors
        )
    }
}

/// Result of a batch application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The input had no non-blank lines; nothing was touched.
    NothingToDo,
    Completed {
        base_folder: SanitizedName,
        result: OperationResult,
    },
}

/// Result of resolving one line without touching storage
#[derive(Debug)]
pub struct PreviewEntry {
    pub line: String,
    pub result: Result<ResolvedEntry, BuildError>,
}

/// Result of a preview run
#[derive(Debug)]
pub struct Preview {
    pub base_folder: SanitizedName,
    pub entries: Vec<PreviewEntry>,
}

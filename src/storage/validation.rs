//! Path validation
//!
//! Handles path validation and security checks for storage backends.

use std::path::{Component, Path, PathBuf};

use crate::error::StorageError;

/// Validate that a relative path is safe to hand to a backend
/// (no traversal, not absolute).
pub fn is_safe_path(path: &str) -> bool {
    !path.contains("..") && !path.starts_with('/') && !path.starts_with('\\')
}

/// Normalizes a relative storage path to `a/b/c` form.
///
/// Empty and `.` segments are dropped; `..` segments and absolute paths are
/// rejected. The storage root is the empty string.
pub fn normalize_relative_path(relative: &str) -> Result<String, StorageError> {
    if relative.starts_with('/') || relative.starts_with('\\') {
        return Err(StorageError::PathTraversal(relative.to_string()));
    }

    let mut segments = Vec::new();
    for segment in relative.split(['/', '\\']) {
        match segment {
            "" | "." => continue,
            ".." => return Err(StorageError::PathTraversal(relative.to_string())),
            _ => segments.push(segment),
        }
    }

    Ok(segments.join("/"))
}

/// Maps a relative storage path onto the real file system below `root`.
pub fn resolve_relative_path(root: &Path, relative: &str) -> Result<PathBuf, StorageError> {
    let normalized = normalize_relative_path(relative)?;
    let mut resolved = root.to_path_buf();

    for segment in normalized.split('/').filter(|s| !s.is_empty()) {
        // Drive prefixes and the like must not survive as a component
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => resolved.push(part),
            _ => return Err(StorageError::InvalidPath(relative.to_string())),
        }
    }

    Ok(resolved)
}

/// Parent of a normalized relative path; the root's children have `""`.
pub fn parent_of(normalized: &str) -> &str {
    normalized
        .rsplit_once('/')
        .map(|(parent, _)| parent)
        .unwrap_or("")
}

//! Name sanitizing
//!
//! Turns raw user text into names that are safe to use as path components
//! under a sandboxed root.

use std::fmt;

use crate::error::SanitizeError;

/// Separator used in every composed path.
pub const SEPARATOR: char = '/';

/// Maximum length (in characters) of a base folder name.
pub const MAX_FOLDER_NAME_LENGTH: usize = 255;

/// Device names that cannot be used as a base folder.
pub const RESERVED_NAMES: &[&str] = &["CON", "PRN", "AUX", "NUL", "COM1", "LPT1"];

/// A name that passed [`sanitize_name`].
///
/// Free of `< > : " | ? *` and control characters, free of traversal
/// sequences, trimmed at both ends, non-empty, and with interior separators
/// collapsed to a single `/`. Whitespace next to an interior separator is
/// kept. Sanitizing it again yields the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SanitizedName(String);

impl SanitizedName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SanitizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SanitizedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

fn is_disallowed(c: char) -> bool {
    matches!(c, '<' | '>' | ':' | '"' | '|' | '?' | '*') || c.is_control()
}

fn contains_traversal(name: &str) -> bool {
    name.contains("..")
        || name.contains("./")
        || name.contains(".\\")
        || name.split(is_separator).any(|segment| segment.trim() == ".")
}

/// Sanitizes a single name, which may itself contain separators.
///
/// Traversal sequences are rejected outright rather than stripped. Disallowed
/// characters are removed, then the name is split on separators, blank
/// segments dropped, the rest joined with `/` and the result trimmed.
pub fn sanitize_name(name: &str) -> Result<SanitizedName, SanitizeError> {
    if name.is_empty() {
        return Err(SanitizeError::InvalidInput("name is empty".into()));
    }

    let trimmed = name.trim();
    if contains_traversal(trimmed) {
        return Err(SanitizeError::TraversalDetected(trimmed.to_string()));
    }

    let stripped: String = trimmed.chars().filter(|c| !is_disallowed(*c)).collect();

    let joined = stripped
        .split(is_separator)
        .filter(|segment| !segment.trim().is_empty())
        .collect::<Vec<_>>()
        .join("/");
    let sanitized = joined.trim().to_string();

    // Stripping can splice a new sequence together (".:." -> "..")
    if contains_traversal(&sanitized) {
        return Err(SanitizeError::TraversalDetected(trimmed.to_string()));
    }

    if sanitized.is_empty() {
        return Err(SanitizeError::EmptyAfterSanitize(name.to_string()));
    }

    Ok(SanitizedName(sanitized))
}

/// Validates the base folder of a batch.
pub fn validate_folder_name(name: &str) -> Result<SanitizedName, SanitizeError> {
    if name.is_empty() {
        return Err(SanitizeError::InvalidInput("folder name is empty".into()));
    }

    let trimmed = name.trim();
    let length = trimmed.chars().count();
    if length == 0 || length > MAX_FOLDER_NAME_LENGTH {
        return Err(SanitizeError::LengthOutOfRange(length));
    }

    let upper = trimmed.to_uppercase();
    if RESERVED_NAMES.iter().any(|reserved| *reserved == upper) {
        return Err(SanitizeError::ReservedName(trimmed.to_string()));
    }

    sanitize_name(trimmed)
}

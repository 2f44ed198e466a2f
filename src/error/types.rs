//! Error types
//!
//! Defines domain-specific error types for each module of treeforge.

use std::fmt;
use std::io;

/// Path sanitizer errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    InvalidInput(String),
    TraversalDetected(String),
    EmptyAfterSanitize(String),
    PathEscape(String),
    DisallowedVariable(String),
    LengthOutOfRange(usize),
    ReservedName(String),
}

impl fmt::Display for SanitizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanitizeError::InvalidInput(s) => write!(f, "Invalid input: {}", s),
            SanitizeError::TraversalDetected(s) => {
                write!(f, "Path traversal sequence detected: {}", s)
            }
            SanitizeError::EmptyAfterSanitize(s) => {
                write!(f, "Name is empty after sanitizing: {:?}", s)
            }
            SanitizeError::PathEscape(p) => write!(f, "Path escapes base folder: {}", p),
            SanitizeError::DisallowedVariable(v) => {
                write!(f, "Template variable not allowed: {}", v)
            }
            SanitizeError::LengthOutOfRange(len) => write!(
                f,
                "Folder name must be between 1 and 255 characters (got {})",
                len
            ),
            SanitizeError::ReservedName(n) => write!(f, "Folder name is reserved: {}", n),
        }
    }
}

impl std::error::Error for SanitizeError {}

/// Storage backend errors
#[derive(Debug)]
pub enum StorageError {
    NotFound(String),
    AlreadyExists(String),
    ParentNotFound(String),
    NotADirectory(String),
    InvalidPath(String),
    PathTraversal(String),
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound(p) => write!(f, "Not found: {}", p),
            StorageError::AlreadyExists(p) => write!(f, "Already exists: {}", p),
            StorageError::ParentNotFound(p) => write!(f, "Parent folder not found: {}", p),
            StorageError::NotADirectory(p) => write!(f, "Not a directory: {}", p),
            StorageError::InvalidPath(p) => write!(f, "Invalid path: {}", p),
            StorageError::PathTraversal(p) => write!(f, "Path traversal attempt: {}", p),
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// Tree builder errors
#[derive(Debug)]
pub enum BuildError {
    /// The base folder failed validation; nothing below it can be created.
    InvalidBaseFolder(SanitizeError),
    ExcessiveDepth { depth: usize, max: usize },
    BatchTooLarge { lines: usize, max: usize },
    Sanitize(SanitizeError),
    Storage(StorageError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InvalidBaseFolder(e) => write!(f, "Invalid base folder: {}", e),
            BuildError::ExcessiveDepth { depth, max } => {
                write!(f, "Depth {} exceeds the maximum of {}", depth, max)
            }
            BuildError::BatchTooLarge { lines, max } => write!(
                f,
                "Batch has {} entries, the maximum per operation is {}",
                lines, max
            ),
            BuildError::Sanitize(e) => write!(f, "{}", e),
            BuildError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<SanitizeError> for BuildError {
    fn from(error: SanitizeError) -> Self {
        BuildError::Sanitize(error)
    }
}

impl From<StorageError> for BuildError {
    fn from(error: StorageError) -> Self {
        BuildError::Storage(error)
    }
}

/// Configuration and settings persistence errors
#[derive(Debug)]
pub enum SettingsError {
    Load(config::ConfigError),
    Serialize(toml::ser::Error),
    InvalidTemplate(SanitizeError),
    IoError(io::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Load(e) => write!(f, "Failed to load settings: {}", e),
            SettingsError::Serialize(e) => write!(f, "Failed to serialize settings: {}", e),
            SettingsError::InvalidTemplate(e) => write!(f, "Invalid default content: {}", e),
            SettingsError::IoError(e) => write!(f, "Settings I/O error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<config::ConfigError> for SettingsError {
    fn from(error: config::ConfigError) -> Self {
        SettingsError::Load(error)
    }
}

impl From<toml::ser::Error> for SettingsError {
    fn from(error: toml::ser::Error) -> Self {
        SettingsError::Serialize(error)
    }
}

impl From<io::Error> for SettingsError {
    fn from(error: io::Error) -> Self {
        SettingsError::IoError(error)
    }
}

/// General error that encompasses all error types
#[derive(Debug)]
pub enum TreeforgeError {
    Storage(StorageError),
    Build(BuildError),
    Settings(SettingsError),
    Config(config::ConfigError),
    IoError(io::Error),
}

impl fmt::Display for TreeforgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeforgeError::Storage(e) => write!(f, "Storage error: {}", e),
            TreeforgeError::Build(e) => write!(f, "Build error: {}", e),
            TreeforgeError::Settings(e) => write!(f, "Settings error: {}", e),
            TreeforgeError::Config(e) => write!(f, "Configuration error: {}", e),
            TreeforgeError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for TreeforgeError {}

impl From<StorageError> for TreeforgeError {
    fn from(error: StorageError) -> Self {
        TreeforgeError::Storage(error)
    }
}

impl From<BuildError> for TreeforgeError {
    fn from(error: BuildError) -> Self {
        TreeforgeError::Build(error)
    }
}

impl From<SettingsError> for TreeforgeError {
    fn from(error: SettingsError) -> Self {
        TreeforgeError::Settings(error)
    }
}

impl From<config::ConfigError> for TreeforgeError {
    fn from(error: config::ConfigError) -> Self {
        TreeforgeError::Config(error)
    }
}

impl From<io::Error> for TreeforgeError {
    fn from(error: io::Error) -> Self {
        TreeforgeError::IoError(error)
    }
}

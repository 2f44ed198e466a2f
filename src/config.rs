//! Configuration management for treeforge
//!
//! Built-in defaults, then an optional `treeforge.toml` (or an explicit
//! file), then `TREEFORGE_*` environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings file location, relative to the vault root unless absolute
pub const DEFAULT_SETTINGS_FILE: &str = ".treeforge/settings.toml";

/// Depth limit when walking the vault tree
pub const DEFAULT_TREE_DEPTH_LIMIT: usize = 20;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Root directory every operation is sandboxed to.
    /// Environment: TREEFORGE_VAULT_ROOT
    pub vault_root: String,

    /// Where persisted settings live.
    /// Environment: TREEFORGE_SETTINGS_FILE
    pub settings_file: String,

    /// Maximum nesting shown by the tree view.
    pub tree_depth_limit: usize,
}

impl AppConfig {
    /// Load configuration, optionally from an explicit file
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("vault_root", ".")?
            .set_default("settings_file", DEFAULT_SETTINGS_FILE)?
            .set_default("tree_depth_limit", DEFAULT_TREE_DEPTH_LIMIT as i64)?;

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("treeforge").required(false)),
        };

        let config: AppConfig = builder
            .add_source(Environment::with_prefix("TREEFORGE"))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.vault_root.trim().is_empty() {
            return Err(ConfigError::Message("vault_root cannot be empty".into()));
        }

        if self.settings_file.trim().is_empty() {
            return Err(ConfigError::Message("settings_file cannot be empty".into()));
        }

        if self.tree_depth_limit == 0 {
            return Err(ConfigError::Message(
                "tree_depth_limit must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get vault root as PathBuf
    pub fn vault_root_path(&self) -> PathBuf {
        PathBuf::from(&self.vault_root)
    }

    /// Resolve the settings file against the vault root
    pub fn settings_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.settings_file);
        if path.is_absolute() {
            path
        } else {
            self.vault_root_path().join(path)
        }
    }
}

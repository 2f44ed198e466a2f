//! Persisted user settings
//!
//! The template for new files, the case flag and the last base folder used.
//! The template is checked against the placeholder whitelist whenever
//! settings are loaded or saved.

use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{SanitizeError, SettingsError};
use crate::sanitize::{ALLOWED_VARIABLES, sanitize_content};

pub const DEFAULT_CONTENT: &str = "# {{tag}}";
pub const DEFAULT_FOLDER_NAME: &str = "tags";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Template for created files; `{{tag}}` is replaced by the entry name
    pub default_content: String,
    /// Stored and shown, but the batch does not act on it yet
    pub ignore_case: bool,
    /// Base folder of the last batch, offered as the default next time
    pub last_folder_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_content: DEFAULT_CONTENT.to_string(),
            ignore_case: false,
            last_folder_name: DEFAULT_FOLDER_NAME.to_string(),
        }
    }
}

impl Settings {
    /// Replaces a template that uses disallowed placeholders with the default.
    pub fn revert_invalid_content(&mut self) {
        if let Err(e) = sanitize_content(&self.default_content, ALLOWED_VARIABLES) {
            warn!("Default content is invalid ({}), using built-in default", e);
            self.default_content = DEFAULT_CONTENT.to_string();
        }
    }

    /// Sets the template, rejecting it if it uses disallowed placeholders.
    pub fn set_default_content(&mut self, content: &str) -> Result<(), SanitizeError> {
        self.default_content = sanitize_content(content, ALLOWED_VARIABLES)?;
        Ok(())
    }

    /// The template after whitelist validation.
    pub fn content_template(&self) -> Result<String, SanitizeError> {
        sanitize_content(&self.default_content, ALLOWED_VARIABLES)
    }
}

/// Loads and saves [`Settings`] as a TOML file
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; a missing file yields the defaults.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        let mut settings: Settings = Config::builder()
            .add_source(
                File::from(self.path.as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .build()?
            .try_deserialize()?;

        settings.revert_invalid_content();
        debug!("Loaded settings from {}", self.path.display());
        Ok(settings)
    }

    pub async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let mut settings = settings.clone();
        settings.revert_invalid_content();

        let serialized = toml::to_string_pretty(&settings)?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, serialized).await?;

        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

//! Batch application
//!
//! Applies a tree description against a storage backend, one line at a
//! time and strictly in order. Per-line failures are counted and logged;
//! only an invalid base folder or an oversized batch stops the run.

use log::{debug, error, info, warn};

use crate::builder::plan::{Planner, split_lines};
use crate::builder::results::{BatchOutcome, OperationResult, ResolvedEntry};
use crate::error::{BuildError, StorageError};
use crate::sanitize::{SanitizedName, render_template, validate_folder_name};
use crate::settings::{Settings, SettingsStore};
use crate::storage::{NodeKind, Storage};

enum LineOutcome {
    Created,
    Skipped,
}

/// Creates folders and files described by a line-oriented tree spec
pub struct TreeBuilder<'a, S: Storage + ?Sized> {
    storage: &'a S,
    settings: &'a mut Settings,
    settings_store: Option<&'a SettingsStore>,
}

impl<'a, S: Storage + ?Sized> TreeBuilder<'a, S> {
    pub fn new(storage: &'a S, settings: &'a mut Settings) -> Self {
        Self {
            storage,
            settings,
            settings_store: None,
        }
    }

    /// Persist settings (the last used folder) through `store` after each batch.
    pub fn with_settings_store(mut self, store: &'a SettingsStore) -> Self {
        self.settings_store = Some(store);
        self
    }

    /// Applies `spec_text` under the base folder `base_folder_raw`.
    ///
    /// # Errors
    ///
    /// * [`BuildError::InvalidBaseFolder`] if the base folder fails validation.
    /// * [`BuildError::BatchTooLarge`] if there are more than 1000 entries.
    ///
    /// No storage call is made in either case.
    pub async fn apply(
        &mut self,
        base_folder_raw: &str,
        spec_text: &str,
    ) -> Result<BatchOutcome, BuildError> {
        let base = validate_folder_name(base_folder_raw).map_err(|e| {
            debug!("Invalid base folder {:?}: {}", base_folder_raw, e);
            BuildError::InvalidBaseFolder(e)
        })?;

        let lines = split_lines(spec_text).inspect_err(|e| debug!("Batch rejected: {}", e))?;
        if lines.is_empty() {
            info!("No file or folder names found, nothing to do");
            return Ok(BatchOutcome::NothingToDo);
        }

        if self.settings.ignore_case {
            debug!("ignore_case is set; it does not change how names are created");
        }

        info!("Applying {} entries under \"{}\"", lines.len(), base);
        self.ensure_base_folder(&base).await;

        let mut result = OperationResult::default();
        let mut planner = Planner::new(base.clone());

        for raw_line in &lines {
            match self.apply_line(&mut planner, raw_line).await {
                Ok(LineOutcome::Created) => result.created += 1,
                Ok(LineOutcome::Skipped) => result.skipped += 1,
                Err(e) => {
                    warn!("Error processing line {:?}: {}", raw_line, e);
                    result.errors += 1;
                }
            }
        }

        self.remember_folder(&base).await;
        info!("Batch under \"{}\" finished: {}", base, result);

        Ok(BatchOutcome::Completed {
            base_folder: base,
            result,
        })
    }

    async fn ensure_base_folder(&self, base: &SanitizedName) {
        match self.storage.create_folder(base.as_str()).await {
            Ok(()) => info!("Created base folder \"{}\"", base),
            Err(StorageError::AlreadyExists(_)) => debug!("Base folder \"{}\" exists", base),
            // Lines below will surface the problem one by one
            Err(e) => error!("Failed to create base folder \"{}\": {}", base, e),
        }
    }

    async fn apply_line(
        &self,
        planner: &mut Planner,
        raw_line: &str,
    ) -> Result<LineOutcome, BuildError> {
        let resolved = planner.resolve(raw_line)?;
        match resolved.kind {
            NodeKind::Folder => self.create_folder(&resolved).await,
            NodeKind::File => self.create_file(&resolved).await,
        }
    }

    async fn create_folder(&self, resolved: &ResolvedEntry) -> Result<LineOutcome, BuildError> {
        match self.storage.create_folder(&resolved.path).await {
            Ok(()) => Ok(LineOutcome::Created),
            Err(StorageError::AlreadyExists(_)) => {
                debug!("Folder {} already exists", resolved.path);
                Ok(LineOutcome::Skipped)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn create_file(&self, resolved: &ResolvedEntry) -> Result<LineOutcome, BuildError> {
        if self.storage.get_node_at(&resolved.path).await?.is_some() {
            debug!("File {} already exists", resolved.path);
            return Ok(LineOutcome::Skipped);
        }

        let template = self.settings.content_template()?;
        let content = render_template(&template, resolved.entry.name.as_str());

        match self.storage.create_file(&resolved.path, &content).await {
            Ok(()) => Ok(LineOutcome::Created),
            Err(StorageError::AlreadyExists(_)) => Ok(LineOutcome::Skipped),
            Err(e) => Err(e.into()),
        }
    }

    async fn remember_folder(&mut self, base: &SanitizedName) {
        self.settings.last_folder_name = base.to_string();

        if let Some(store) = self.settings_store {
            if let Err(e) = store.save(&*self.settings).await {
                warn!("Failed to save last folder name: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[tokio::test]
    async fn test_apply_creates_tree() {
        let storage = MemoryStorage::new();
        let mut settings = Settings::default();
        let mut builder = TreeBuilder::new(&storage, &mut settings);

        let outcome = builder.apply("base", "a/\n/b/\n//c\nd\n").await.unwrap();
        assert_eq!(
            outcome,
            BatchOutcome::Completed {
                base_folder: validate_folder_name("base").unwrap(),
                result: OperationResult {
                    created: 4,
                    skipped: 0,
                    errors: 0
                },
            }
        );

        assert_eq!(
            storage.snapshot().await,
            vec![
                ("base".to_string(), NodeKind::Folder),
                ("base/a".to_string(), NodeKind::Folder),
                ("base/a/b".to_string(), NodeKind::Folder),
                ("base/a/b/c.md".to_string(), NodeKind::File),
                ("base/d.md".to_string(), NodeKind::File),
            ]
        );
        assert_eq!(settings.last_folder_name, "base");
    }

    #[tokio::test]
    async fn test_empty_input_is_nothing_to_do() {
        let storage = MemoryStorage::new();
        let mut settings = Settings::default();
        let mut builder = TreeBuilder::new(&storage, &mut settings);

        let outcome = builder.apply("base", "\n  \r\n").await.unwrap();
        assert_eq!(outcome, BatchOutcome::NothingToDo);
        assert_eq!(storage.mutation_count(), 0);
        assert_eq!(settings.last_folder_name, "tags");
    }

    #[tokio::test]
    async fn test_invalid_template_counts_file_errors() {
        let storage = MemoryStorage::new();
        let mut settings = Settings {
            default_content: "{{date}}".into(),
            ..Settings::default()
        };
        let mut builder = TreeBuilder::new(&storage, &mut settings);

        let outcome = builder.apply("base", "folder/\n/file\n").await.unwrap();
        let BatchOutcome::Completed { result, .. } = outcome else {
            panic!("expected a completed batch");
        };
        assert_eq!(result.created, 1);
        assert_eq!(result.errors, 1);
    }

    #[tokio::test]
    async fn test_file_without_parent_is_an_error() {
        let storage = MemoryStorage::new();
        let mut settings = Settings::default();
        let mut builder = TreeBuilder::new(&storage, &mut settings);

        // "missing" is never created as a folder, so its file has no parent
        let outcome = builder.apply("base", "missing/note\n").await.unwrap();
        let BatchOutcome::Completed { result, .. } = outcome else {
            panic!("expected a completed batch");
        };
        assert_eq!(result.errors, 1);
        assert!(storage.get_node_at("base/missing/note.md").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ignore_case_keeps_names_as_written() {
        let storage = MemoryStorage::new();
        let mut settings = Settings {
            ignore_case: true,
            ..Settings::default()
        };
        storage.create_folder("base").await.unwrap();
        storage.create_file("base/idea.md", "lower").await.unwrap();

        let outcome = TreeBuilder::new(&storage, &mut settings)
            .apply("base", "Idea\nProjects/\n")
            .await
            .unwrap();
        let BatchOutcome::Completed { result, .. } = outcome else {
            panic!("expected a completed batch");
        };
        assert_eq!(result.created, 2);
        assert_eq!(result.skipped, 0);

        assert_eq!(
            storage.snapshot().await,
            vec![
                ("base".to_string(), NodeKind::Folder),
                ("base/Idea.md".to_string(), NodeKind::File),
                ("base/Projects".to_string(), NodeKind::Folder),
                ("base/idea.md".to_string(), NodeKind::File),
            ]
        );
        assert_eq!(storage.read_file("base/idea.md").await.as_deref(), Some("lower"));
    }
}

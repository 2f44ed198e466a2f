//! Command handlers
//!
//! Thin adapter between the command line and the library core. Every
//! handler resolves its inputs, calls into the builder, storage or settings,
//! and prints a short report.

use std::path::Path;

use log::info;
use tokio::io::AsyncReadExt;

use crate::builder::{BatchOutcome, OperationResult, Preview, TreeBuilder, preview};
use crate::commands::parser::{Cli, Command, SettingsAction};
use crate::config::AppConfig;
use crate::error::{SettingsError, TreeforgeError};
use crate::navigate::{TreeEntry, walk_tree};
use crate::settings::{Settings, SettingsStore};
use crate::storage::validation::normalize_relative_path;
use crate::storage::{FsStorage, delete_node};

/// Preview lines printed before the listing is cut short
pub const PREVIEW_LIMIT: usize = 100;

/// Runs a parsed command line to completion
pub async fn run(cli: Cli) -> Result<(), TreeforgeError> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(root) = &cli.root {
        config.vault_root = root.to_string_lossy().to_string();
    }

    let storage = FsStorage::new(config.vault_root_path());
    storage.ensure_root().await?;
    let settings_store = SettingsStore::new(config.settings_path());
    let protected = settings_location(storage.root(), settings_store.path());
    info!("Vault root: {}", storage.root().display());

    match cli.command {
        Command::Create { folder, file } => {
            let mut settings = settings_store.load()?;
            let folder = folder.unwrap_or_else(|| settings.last_folder_name.clone());
            let text = read_spec_text(file.as_deref()).await?;

            let outcome = TreeBuilder::new(&storage, &mut settings)
                .with_settings_store(&settings_store)
                .apply(&folder, &text)
                .await?;
            for line in format_outcome(&outcome) {
                println!("{}", line);
            }
        }
        Command::Preview { folder, file } => {
            let settings = settings_store.load()?;
            let folder = folder.unwrap_or_else(|| settings.last_folder_name.clone());
            let text = read_spec_text(file.as_deref()).await?;

            let preview = preview(&folder, &text)?;
            for line in format_preview(&preview, PREVIEW_LIMIT) {
                println!("{}", line);
            }
        }
        Command::Delete { path, folder } => {
            let kind = if folder { "Folder" } else { "File" };
            if let Some(protected) = protected.as_deref().filter(|p| touches(p, &path)) {
                println!(
                    "Nothing deleted at \"{}\": settings are kept in \"{}\"",
                    path, protected
                );
            } else if delete_node(&storage, &path, folder).await {
                println!("{} \"{}\" deleted", kind, path);
            } else {
                println!("Nothing deleted at \"{}\"", path);
            }
        }
        Command::Tree { path } => {
            let start = path.unwrap_or_default();
            let mut entries = walk_tree(&storage, &start, config.tree_depth_limit).await?;
            if let Some(protected) = &protected {
                entries.retain(|entry| !is_under(&entry.node.path, protected));
            }
            for line in format_tree(&entries) {
                println!("{}", line);
            }
        }
        Command::Settings { action } => {
            handle_settings(&settings_store, action.unwrap_or(SettingsAction::Show)).await?;
        }
    }

    Ok(())
}

/// Vault-relative location of the settings, if they live inside the vault.
///
/// That is the folder holding the settings file, or the file itself when it
/// sits directly in the vault root.
pub fn settings_location(root: &Path, settings_path: &Path) -> Option<String> {
    let relative = settings_path.strip_prefix(root).ok()?;
    let relative = normalize_relative_path(&relative.to_string_lossy()).ok()?;
    match relative.rsplit_once('/') {
        Some((parent, _)) => Some(parent.to_string()),
        None if relative.is_empty() => None,
        None => Some(relative),
    }
}

fn is_under(path: &str, location: &str) -> bool {
    path == location
        || path
            .strip_prefix(location)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Whether deleting `target` would remove anything at or below `location`.
fn touches(location: &str, target: &str) -> bool {
    match normalize_relative_path(target) {
        Ok(target) => is_under(location, &target) || is_under(&target, location),
        // Rejected later by `delete_node`
        Err(_) => false,
    }
}

async fn handle_settings(
    store: &SettingsStore,
    action: SettingsAction,
) -> Result<(), TreeforgeError> {
    let mut settings = store.load()?;

    match action {
        SettingsAction::Show => {
            for line in format_settings(&settings) {
                println!("{}", line);
            }
            return Ok(());
        }
        SettingsAction::SetContent { template } => {
            settings
                .set_default_content(&template)
                .map_err(SettingsError::InvalidTemplate)?;
        }
        SettingsAction::SetIgnoreCase { value } => settings.ignore_case = value,
    }

    store.save(&settings).await?;
    println!("Settings saved to {}", store.path().display());
    Ok(())
}

async fn read_spec_text(file: Option<&Path>) -> Result<String, TreeforgeError> {
    match file {
        Some(path) => Ok(tokio::fs::read_to_string(path).await?),
        None => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            Ok(text)
        }
    }
}

/// Summary lines for a finished batch; counters that are zero are omitted.
pub fn format_outcome(outcome: &BatchOutcome) -> Vec<String> {
    match outcome {
        BatchOutcome::NothingToDo => vec!["No file or folder names found".to_string()],
        BatchOutcome::Completed {
            base_folder,
            result,
        } => format_result(base_folder.as_str(), result),
    }
}

fn format_result(base_folder: &str, result: &OperationResult) -> Vec<String> {
    let mut lines = Vec::new();
    if result.created > 0 {
        lines.push(format!(
            "{} item(s) created in \"{}\"",
            result.created, base_folder
        ));
    }
    if result.skipped > 0 {
        lines.push(format!("{} item(s) already existed", result.skipped));
    }
    if result.errors > 0 {
        lines.push(format!(
            "{} item(s) skipped because of validation errors",
            result.errors
        ));
    }
    lines
}

pub fn format_preview(preview: &Preview, limit: usize) -> Vec<String> {
    let total = preview.entries.len();
    let mut lines = if total > limit {
        vec![format!("Preview: {} item(s) (showing first {})", total, limit)]
    } else {
        vec![format!("Preview: {} item(s)", total)]
    };

    for entry in preview.entries.iter().take(limit) {
        match &entry.result {
            Ok(resolved) => {
                let marker = if resolved.entry.is_folder { "/" } else { "" };
                lines.push(format!(
                    "{}{}{}",
                    "  ".repeat(resolved.entry.depth),
                    resolved.path,
                    marker
                ));
            }
            Err(e) => lines.push(format!("! invalid: {} ({})", entry.line, e)),
        }
    }

    lines
}

pub fn format_tree(entries: &[TreeEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            let marker = if entry.node.is_folder() { "/" } else { "" };
            format!("{}{}{}", "  ".repeat(entry.level), entry.node.name, marker)
        })
        .collect()
}

fn format_settings(settings: &Settings) -> Vec<String> {
    vec![
        format!("default_content = {:?}", settings.default_content),
        format!("ignore_case = {}", settings.ignore_case),
        format!("last_folder_name = {:?}", settings.last_folder_name),
    ]
}

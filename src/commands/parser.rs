//! Command-line parsing
//!
//! Defines the commands accepted by the `treeforge` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "treeforge", version, about = "Create and delete folder trees from a line-oriented description")]
pub struct Cli {
    /// Configuration file (defaults to ./treeforge.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Vault root; overrides the configured `vault_root`
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum Command {
    /// Create files and folders under a base folder
    Create {
        /// Base folder; defaults to the last one used
        folder: Option<String>,
        /// Read the tree description from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Show what `create` would do without touching anything
    Preview {
        folder: Option<String>,
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Delete a file or folder (folders are deleted with their contents)
    Delete {
        /// Path relative to the vault root, including the extension for files
        path: String,
        /// The path is a folder
        #[arg(long)]
        folder: bool,
    },
    /// Print the vault tree
    Tree {
        /// Folder to start from, relative to the vault root
        path: Option<String>,
    },
    /// Show or change persisted settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum SettingsAction {
    /// Print current settings
    Show,
    /// Set the template for new files; only {{tag}} is allowed
    SetContent { template: String },
    /// Store the ignore-case flag
    SetIgnoreCase {
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
}

//! Error handlers
//!
//! Provides error reporting and exit-code mapping.

use std::io::Write;

use crate::error::types::{BuildError, TreeforgeError};
use log::debug;

/// Report a fatal error to the user as one line on `out`
pub fn handle_error<W: Write>(err: &TreeforgeError, out: &mut W) {
    debug!("Fatal error: {:?}", err);

    let message = err.to_string().replace(['\r', '\n'], " ");
    if let Err(e) = writeln!(out, "Error: {}", message) {
        debug!("Could not write error report: {}", e);
    }
}

/// Convert error to process exit code
pub fn error_to_exit_code(err: &TreeforgeError) -> i32 {
    match err {
        TreeforgeError::Build(BuildError::InvalidBaseFolder(_)) => 2,
        TreeforgeError::Build(BuildError::BatchTooLarge { .. }) => 3,
        TreeforgeError::Build(_) => 1,
        TreeforgeError::Storage(_) => 4,
        TreeforgeError::Settings(_) => 5,
        TreeforgeError::Config(_) => 5,
        TreeforgeError::IoError(_) => 4,
    }
}

//! Path sanitizer
//!
//! Pure validation and normalization of user-supplied names, paths and
//! content templates. Nothing in here touches storage.

pub mod content;
pub mod name;
pub mod path;

pub use content::{ALLOWED_VARIABLES, TAG_VARIABLE, render_template, sanitize_content};
pub use name::{
    MAX_FOLDER_NAME_LENGTH, RESERVED_NAMES, SEPARATOR, SanitizedName, sanitize_name,
    validate_folder_name,
};
pub use path::{is_within_base, sanitize_path};

//! Content templates
//!
//! Whitelists `{{variable}}` placeholders and renders the single supported one.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::SanitizeError;

/// The only placeholder a template may use; replaced by the entry name.
pub const TAG_VARIABLE: &str = "tag";

/// Variables accepted by [`sanitize_content`] for file templates.
pub const ALLOWED_VARIABLES: &[&str] = &[TAG_VARIABLE];

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder pattern is valid")
});

/// Checks every placeholder against `allowed_vars`.
///
/// Content is returned unchanged; substitution happens in [`render_template`].
pub fn sanitize_content(content: &str, allowed_vars: &[&str]) -> Result<String, SanitizeError> {
    for captures in PLACEHOLDER.captures_iter(content) {
        let var_name = &captures[1];
        if !allowed_vars.contains(&var_name) {
            return Err(SanitizeError::DisallowedVariable(var_name.to_string()));
        }
    }

    Ok(content.to_string())
}

/// Replaces every `{{tag}}` in `template` with `tag`.
pub fn render_template(template: &str, tag: &str) -> String {
    template.replace(&format!("{{{{{}}}}}", TAG_VARIABLE), tag)
}

//! Path composition
//!
//! Joins sanitized parts under a base path and enforces containment.

use crate::error::SanitizeError;
use crate::sanitize::name::{SEPARATOR, sanitize_name};

/// Returns true if `path` is strictly below `base`.
pub fn is_within_base(path: &str, base: &str) -> bool {
    path.strip_prefix(base)
        .is_some_and(|rest| rest.starts_with(SEPARATOR))
}

/// Sanitizes every part independently and joins them under `base_path`.
///
/// The result is either exactly `base_path` (no parts) or starts with
/// `base_path/`; anything else is reported as [`SanitizeError::PathEscape`].
pub fn sanitize_path<S: AsRef<str>>(base_path: &str, parts: &[S]) -> Result<String, SanitizeError> {
    let mut full_path = base_path.to_string();
    for part in parts {
        let name = sanitize_name(part.as_ref())?;
        full_path.push(SEPARATOR);
        full_path.push_str(name.as_str());
    }

    if full_path != base_path && !is_within_base(&full_path, base_path) {
        return Err(SanitizeError::PathEscape(full_path));
    }

    Ok(full_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joins_parts() {
        assert_eq!(sanitize_path("tags", &["a", "b"]).unwrap(), "tags/a/b");
        assert_eq!(sanitize_path("tags", &["/a/", "b//c"]).unwrap(), "tags/a/b/c");
    }

    #[test]
    fn test_no_parts_is_base() {
        let parts: [&str; 0] = [];
        assert_eq!(sanitize_path("tags", &parts).unwrap(), "tags");
    }

    #[test]
    fn test_adversarial_parts_never_escape() {
        let adversarial = [
            "../../etc/passwd",
            "/absolute",
            "\\\\server\\share",
            "a/../../b",
            "./hidden",
            "..\\windows",
            "C:\\Windows",
            "\u{0}nul",
            "   ",
            "",
        ];
        for part in adversarial {
            match sanitize_path("base", &["ok", part]) {
                Ok(path) => assert!(
                    path.starts_with("base/"),
                    "{part:?} produced escaping path {path}"
                ),
                Err(_) => {}
            }
        }
    }

    #[test]
    fn test_part_errors_propagate() {
        assert!(matches!(
            sanitize_path("base", &["../up"]),
            Err(SanitizeError::TraversalDetected(_))
        ));
        assert!(matches!(
            sanitize_path("base", &["ok", ""]),
            Err(SanitizeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_is_within_base() {
        assert!(is_within_base("base/a.md", "base"));
        assert!(!is_within_base("base", "base"));
        assert!(!is_within_base("basement/a.md", "base"));
        assert!(!is_within_base("other/a.md", "base"));
    }
}

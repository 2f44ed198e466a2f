//! Plan parsing
//!
//! Turns the line-oriented tree description into resolved entries. Depth is
//! the run of leading `/` on a line; a trailing `/` marks a folder.

use log::warn;

use crate::builder::results::{PlanEntry, Preview, PreviewEntry, ResolvedEntry};
use crate::builder::stack::AncestryStack;
use crate::error::{BuildError, SanitizeError};
use crate::sanitize::{
    SEPARATOR, SanitizedName, is_within_base, sanitize_name, sanitize_path, validate_folder_name,
};
use crate::storage::NodeKind;

/// Deepest nesting a single line may ask for
pub const MAX_DEPTH: usize = 10;

/// Maximum number of non-blank lines per batch
pub const MAX_BATCH_LINES: usize = 1000;

/// Extension appended to every created file
pub const FILE_EXTENSION: &str = "md";

/// Splits the input into non-blank lines with carriage returns removed.
pub fn split_lines(spec_text: &str) -> Result<Vec<String>, BuildError> {
    let lines: Vec<String> = spec_text
        .split('\n')
        .map(|line| line.replace('\r', ""))
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.len() > MAX_BATCH_LINES {
        return Err(BuildError::BatchTooLarge {
            lines: lines.len(),
            max: MAX_BATCH_LINES,
        });
    }

    Ok(lines)
}

/// Parses one line into a [`PlanEntry`].
pub fn parse_line(raw: &str) -> Result<PlanEntry, BuildError> {
    let depth = raw.chars().take_while(|c| *c == SEPARATOR).count();
    if depth > MAX_DEPTH {
        return Err(BuildError::ExcessiveDepth {
            depth,
            max: MAX_DEPTH,
        });
    }

    // Separators are ASCII, so `depth` is also a byte offset
    let line = &raw[depth..];
    let (name, is_folder) = match line.strip_suffix(SEPARATOR) {
        Some(name) => (name, true),
        None => (line, false),
    };

    Ok(PlanEntry {
        depth,
        name: sanitize_name(name)?,
        is_folder,
    })
}

/// Resolves lines one at a time against an ancestry stack.
#[derive(Debug, Clone)]
pub struct Planner {
    stack: AncestryStack,
}

impl Planner {
    pub fn new(base: SanitizedName) -> Self {
        Self {
            stack: AncestryStack::new(base),
        }
    }

    /// Resolves the next line to its storage path.
    ///
    /// Folders are pushed onto the stack as soon as they resolve so that
    /// their descendants find them, whatever storage later says.
    pub fn resolve(&mut self, raw: &str) -> Result<ResolvedEntry, BuildError> {
        let entry = parse_line(raw)?;
        self.stack.truncate_to_depth(entry.depth);

        let base = self.stack.base().as_str();
        let parts: Vec<&str> = self
            .stack
            .open_folders()
            .iter()
            .map(SanitizedName::as_str)
            .chain(std::iter::once(entry.name.as_str()))
            .collect();
        let target_path = sanitize_path(base, &parts)?;

        if entry.is_folder {
            self.stack.push(entry.name.clone());
            return Ok(ResolvedEntry {
                entry,
                path: target_path,
                kind: NodeKind::Folder,
            });
        }

        let file_path = format!("{}.{}", target_path, FILE_EXTENSION);
        if !is_within_base(&file_path, base) {
            return Err(SanitizeError::PathEscape(file_path).into());
        }

        Ok(ResolvedEntry {
            entry,
            path: file_path,
            kind: NodeKind::File,
        })
    }
}

/// Resolves a whole batch without touching storage.
///
/// Applies the same validation, caps and depth rule as a real run; each
/// line carries its planned path or the reason it would be rejected.
pub fn preview(base_folder_raw: &str, spec_text: &str) -> Result<Preview, BuildError> {
    let base = validate_folder_name(base_folder_raw).map_err(BuildError::InvalidBaseFolder)?;
    let lines = split_lines(spec_text)?;

    let mut planner = Planner::new(base.clone());
    let entries = lines
        .into_iter()
        .map(|line| {
            let result = planner.resolve(&line);
            if let Err(e) = &result {
                warn!("Preview: line {:?} would be rejected: {}", line, e);
            }
            PreviewEntry { line, result }
        })
        .collect();

    Ok(Preview {
        base_folder: base,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SanitizedName {
        validate_folder_name("base").unwrap()
    }

    #[test]
    fn test_split_lines() {
        let lines = split_lines("a\r\n\n   \n/b/\r\n\t\n").unwrap();
        assert_eq!(lines, vec!["a", "/b/"]);
        assert!(split_lines("").unwrap().is_empty());
    }

    #[test]
    fn test_batch_cap() {
        let ok = "x\n".repeat(MAX_BATCH_LINES);
        assert_eq!(split_lines(&ok).unwrap().len(), MAX_BATCH_LINES);

        let too_many = "x\n".repeat(MAX_BATCH_LINES + 1);
        assert!(matches!(
            split_lines(&too_many),
            Err(BuildError::BatchTooLarge { lines: 1001, max: 1000 })
        ));
    }

    #[test]
    fn test_parse_line() {
        let entry = parse_line("//notes/").unwrap();
        assert_eq!(entry.depth, 2);
        assert_eq!(entry.name.as_str(), "notes");
        assert!(entry.is_folder);

        let entry = parse_line("idea").unwrap();
        assert_eq!(entry.depth, 0);
        assert!(!entry.is_folder);
    }

    #[test]
    fn test_parse_line_depth_cap() {
        assert!(parse_line(&format!("{}x", "/".repeat(MAX_DEPTH))).is_ok());
        assert!(matches!(
            parse_line(&format!("{}x", "/".repeat(MAX_DEPTH + 1))),
            Err(BuildError::ExcessiveDepth { depth: 11, max: 10 })
        ));
    }

    #[test]
    fn test_parse_line_rejects_bad_names() {
        assert!(matches!(
            parse_line("/../up"),
            Err(BuildError::Sanitize(SanitizeError::TraversalDetected(_)))
        ));
        assert!(matches!(
            parse_line("///"),
            Err(BuildError::Sanitize(SanitizeError::InvalidInput(_)))
        ));
    }

    #[test]
    fn test_depth_reconstruction() {
        let mut planner = Planner::new(base());
        let paths: Vec<_> = ["a/", "/b/", "//c", "d"]
            .iter()
            .map(|line| {
                let resolved = planner.resolve(line).unwrap();
                (resolved.path, resolved.kind)
            })
            .collect();

        assert_eq!(
            paths,
            vec![
                ("base/a".to_string(), NodeKind::Folder),
                ("base/a/b".to_string(), NodeKind::Folder),
                ("base/a/b/c.md".to_string(), NodeKind::File),
                ("base/d.md".to_string(), NodeKind::File),
            ]
        );
    }

    #[test]
    fn test_depth_beyond_open_folders_stays_at_deepest() {
        let mut planner = Planner::new(base());
        planner.resolve("a/").unwrap();
        let resolved = planner.resolve("/////deep").unwrap();
        assert_eq!(resolved.path, "base/a/deep.md");
    }

    #[test]
    fn test_reparents_under_open_ancestor() {
        let mut planner = Planner::new(base());
        planner.resolve("a/").unwrap();
        planner.resolve("/b/").unwrap();
        planner.resolve("//c/").unwrap();
        let resolved = planner.resolve("/e").unwrap();
        assert_eq!(resolved.path, "base/a/e.md");
    }

    #[test]
    fn test_rejected_line_leaves_stack_alone() {
        let mut planner = Planner::new(base());
        planner.resolve("a/").unwrap();
        assert!(planner.resolve("../bad/").is_err());
        let resolved = planner.resolve("/f").unwrap();
        assert_eq!(resolved.path, "base/a/f.md");
    }

    #[test]
    fn test_preview() {
        let preview = preview("  base ", "a/\n/x\n../y\n").unwrap();
        assert_eq!(preview.base_folder.as_str(), "base");
        assert_eq!(preview.entries.len(), 3);
        assert_eq!(
            preview.entries[1].result.as_ref().unwrap().path,
            "base/a/x.md"
        );
        assert!(preview.entries[2].result.is_err());
    }

    #[test]
    fn test_preview_rejects_reserved_base() {
        assert!(matches!(
            preview("aux", "a"),
            Err(BuildError::InvalidBaseFolder(SanitizeError::ReservedName(_)))
        ));
    }
}

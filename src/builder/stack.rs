//! Ancestry stack
//!
//! The chain of currently open folders, rooted at the base folder. A flat
//! list of lines describes a tree because each entry is re-parented under
//! whichever ancestor is open at its depth.

use crate::sanitize::SanitizedName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestryStack {
    segments: Vec<SanitizedName>,
}

impl AncestryStack {
    pub fn new(base: SanitizedName) -> Self {
        Self {
            segments: vec![base],
        }
    }

    /// Keeps the base plus at most `depth` open folders.
    pub fn truncate_to_depth(&mut self, depth: usize) {
        self.segments.truncate(depth + 1);
    }

    pub fn push(&mut self, name: SanitizedName) {
        self.segments.push(name);
    }

    pub fn base(&self) -> &SanitizedName {
        &self.segments[0]
    }

    /// Open folders below the base, outermost first.
    pub fn open_folders(&self) -> &[SanitizedName] {
        &self.segments[1..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::sanitize_name;

    fn name(s: &str) -> SanitizedName {
        sanitize_name(s).unwrap()
    }

    #[test]
    fn test_truncate_reparents() {
        let mut stack = AncestryStack::new(name("base"));
        stack.push(name("a"));
        stack.push(name("b"));
        assert_eq!(stack.open_folders(), &[name("a"), name("b")]);

        stack.truncate_to_depth(1);
        assert_eq!(stack.open_folders(), &[name("a")]);

        stack.truncate_to_depth(0);
        assert!(stack.open_folders().is_empty());
        assert_eq!(stack.base().as_str(), "base");
    }

    #[test]
    fn test_truncate_beyond_length_is_noop() {
        let mut stack = AncestryStack::new(name("base"));
        stack.push(name("a"));
        stack.truncate_to_depth(5);
        assert_eq!(stack.open_folders(), &[name("a")]);
    }
}

//! Gitignore-style ignore matching using the ignore crate
//!
//! Patterns are glob rules evaluated against paths relative to a tool's
//! configuration directory. `**` matches across directories and a trailing
//! `/` matches everything below that directory. Negation (`!pattern`) is not
//! supported; such lines are dropped.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// Compiled union of ignore patterns
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    gitignore: Option<Gitignore>,
}

impl IgnoreMatcher {
    /// Matcher that ignores nothing
    #[must_use]
    pub const fn empty() -> Self {
        Self { gitignore: None }
    }

    /// Build a matcher from any number of pattern lists
    ///
    /// Building never fails: negated, blank or unparsable patterns are
    /// logged and treated as non-matching.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GitignoreBuilder::new("");
        let mut added = 0usize;

        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() {
                continue;
            }
            if pattern.starts_with('!') {
                tracing::warn!(pattern, "negated ignore patterns are not supported, skipping");
                continue;
            }
            match builder.add_line(None, pattern) {
                Ok(_) => added += 1,
                Err(e) => tracing::warn!(pattern, error = %e, "invalid ignore pattern, skipping"),
            }
        }

        if added == 0 {
            return Self::empty();
        }

        match builder.build() {
            Ok(gitignore) => Self {
                gitignore: Some(gitignore),
            },
            Err(e) => {
                tracing::warn!(error = %e, "failed to compile ignore patterns, ignoring none");
                Self::empty()
            }
        }
    }

    /// Check whether a relative path is excluded
    ///
    /// A path is excluded when it, or any directory above it, matches.
    #[must_use]
    pub fn is_ignored(&self, relative_path: &Path) -> bool {
        let Some(gitignore) = &self.gitignore else {
            return false;
        };
        if relative_path.has_root() || relative_path.as_os_str().is_empty() {
            return false;
        }
        gitignore
            .matched_path_or_any_parents(relative_path, false)
            .is_ignore()
    }
}

impl Default for IgnoreMatcher {
    fn default() -> Self {
        Self::empty()
    }
}

/// One-shot check of a relative path against a pattern list
#[must_use]
pub fn should_ignore<S: AsRef<str>>(relative_path: &Path, patterns: &[S]) -> bool {
    IgnoreMatcher::new(patterns).is_ignored(relative_path)
}

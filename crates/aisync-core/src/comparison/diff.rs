//! Diff generation with color-coded output

use std::fmt::Write;

use similar::{ChangeTag, TextDiff};

/// Lines of context around each change
const DIFF_CONTEXT_LINES: usize = 3;

/// Line counts of a diff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeCount {
    /// Lines only in the new text
    pub added: usize,
    /// Lines only in the old text
    pub removed: usize,
}

/// Diff generator for creating visual diffs
pub struct DiffGenerator;

impl DiffGenerator {
    /// Plain unified diff from `old` to `new`
    #[must_use]
    pub fn unified(old: &str, new: &str, old_label: &str, new_label: &str) -> String {
        TextDiff::from_lines(old, new)
            .unified_diff()
            .context_radius(DIFF_CONTEXT_LINES)
            .header(old_label, new_label)
            .to_string()
    }

    /// Color-coded diff from `old` to `new` for terminal display
    #[must_use]
    pub fn colored(old: &str, new: &str, old_label: &str, new_label: &str) -> String {
        let diff = TextDiff::from_lines(old, new);
        let mut output = String::new();

        let _ = writeln!(output, "\x1b[1m--- {old_label}\x1b[0m");
        let _ = writeln!(output, "\x1b[1m+++ {new_label}\x1b[0m");

        for (idx, group) in diff.grouped_ops(DIFF_CONTEXT_LINES).iter().enumerate() {
            if idx > 0 {
                output.push_str("...\n");
            }

            for op in group {
                for change in diff.iter_changes(op) {
                    let (sign, color) = match change.tag() {
                        ChangeTag::Delete => ("-", "\x1b[31m"),
                        ChangeTag::Insert => ("+", "\x1b[32m"),
                        ChangeTag::Equal => (" ", "\x1b[0m"),
                    };

                    let newline = if change.value().ends_with('\n') {
                        ""
                    } else {
                        "\n"
                    };

                    let _ = write!(output, "{color}{sign}{}{newline}\x1b[0m", change.value());
                }
            }
        }

        output
    }

    /// Count added and removed lines between two texts
    #[must_use]
    pub fn count_changes(old: &str, new: &str) -> ChangeCount {
        let diff = TextDiff::from_lines(old, new);
        let mut count = ChangeCount::default();

        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => count.added += 1,
                ChangeTag::Delete => count.removed += 1,
                ChangeTag::Equal => {}
            }
        }

        count
    }
}

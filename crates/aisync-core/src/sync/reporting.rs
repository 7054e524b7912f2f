//! Human-readable sync summaries

use std::collections::BTreeMap;
use std::fmt::Write;

use super::SyncReport;
use crate::config::SyncDirection;

/// Sync operation reporter
pub struct SyncReporter;

impl SyncReporter {
    /// Per-file listing followed by totals
    #[must_use]
    pub fn generate_summary(report: &SyncReport) -> String {
        let result = &report.comparison;
        let mut output = String::new();

        let arrow = match report.direction {
            SyncDirection::ToRemote => "local -> mirror",
            SyncDirection::FromRemote => "mirror -> local",
        };
        let prefix = if report.dry_run { "[dry run] " } else { "" };
        let _ = writeln!(output, "{prefix}{} ({arrow})", report.tool);

        for path in &result.added {
            let _ = writeln!(output, "  + {}", path.display());
        }
        for path in &result.modified {
            let _ = writeln!(output, "  ~ {}", path.display());
        }
        for file in &result.sensitive {
            let kinds: Vec<_> = file.matches.iter().map(|m| m.kind.as_str()).collect();
            let _ = writeln!(
                output,
                "  ! {} (possible secrets: {})",
                file.path.display(),
                kinds.join(", ")
            );
            for m in &file.matches {
                let _ = writeln!(output, "      {}: {}", m.kind, m.preview);
            }
        }

        let _ = write!(
            output,
            "  added: {}, modified: {}, unchanged: {}, sensitive: {}",
            result.added.len(),
            result.modified.len(),
            result.unchanged.len(),
            result.sensitive.len()
        );

        let mut reasons: BTreeMap<&str, usize> = BTreeMap::new();
        for skipped in &result.skipped {
            *reasons.entry(skipped.reason.as_str()).or_insert(0) += 1;
        }
        let _ = write!(output, ", skipped: {}", result.skipped.len());
        for (reason, count) in reasons {
            let _ = write!(output, " ({reason}: {count})");
        }
        output.push('\n');

        if let Some(backup) = &report.backup {
            let _ = writeln!(output, "  backup: {}", backup.id);
        }
        for warning in &report.warnings {
            let _ = writeln!(output, "  warning: {warning}");
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::{SecretKind, SecretMatch};
    use crate::sync::{ComparisonResult, SensitiveFile, SkipReason, SkippedFile};
    use std::path::PathBuf;

    #[test]
    fn test_summary_lists_changes_and_reasons() {
        let report = SyncReport {
            tool: "cursor".into(),
            direction: SyncDirection::ToRemote,
            dry_run: true,
            comparison: ComparisonResult {
                added: vec![PathBuf::from("rules/a.md")],
                modified: vec![PathBuf::from("settings.json")],
                unchanged: vec![],
                skipped: vec![
                    SkippedFile {
                        path: PathBuf::from("cache.log"),
                        reason: SkipReason::Ignored,
                    },
                    SkippedFile {
                        path: PathBuf::from("mcp.json"),
                        reason: SkipReason::NotFound,
                    },
                ],
                sensitive: vec![SensitiveFile {
                    path: PathBuf::from("env.json"),
                    matches: vec![SecretMatch {
                        kind: SecretKind::Password,
                        preview: "passw...et1".into(),
                    }],
                }],
            },
            backup: None,
            warnings: vec![],
        };

        let summary = SyncReporter::generate_summary(&report);

        assert!(summary.starts_with("[dry run] cursor (local -> mirror)"));
        assert!(summary.contains("  + rules/a.md"));
        assert!(summary.contains("  ~ settings.json"));
        assert!(summary.contains("possible secrets: password"));
        assert!(summary.contains("passw...et1"));
        assert!(summary.contains("skipped: 2 (ignored: 1) (not_found: 1)"));
    }
}

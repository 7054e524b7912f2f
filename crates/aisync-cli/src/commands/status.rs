use aisync_core::SyncContext;
use aisync_core::comparison::{DifferenceKind, StatusReporter, SyncState, ToolStatus};

use super::common::select_targets;
use crate::cli::TargetArgs;

pub struct Status;

impl Status {
    pub fn execute(ctx: &SyncContext, targets: &TargetArgs, json: bool) -> anyhow::Result<()> {
        let tools = select_targets(ctx, targets)?;
        let reporter = StatusReporter::new(ctx);
        let statuses: Vec<ToolStatus> = tools.iter().map(|tool| reporter.status(tool)).collect();

        if json {
            println!("{}", serde_json::to_string_pretty(&statuses)?);
            return Ok(());
        }

        for status in &statuses {
            print!("{}", Self::render(status));
        }
        Ok(())
    }

    fn render(status: &ToolStatus) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        let label = match status.state {
            SyncState::Synced => "in sync",
            SyncState::OutOfSync => "out of sync",
            SyncState::NoLocal => "no local configuration",
            SyncState::NoRemote => "not in mirror",
        };
        let _ = writeln!(out, "{}: {label}", status.tool);

        for difference in &status.differences {
            let marker = match difference.kind {
                DifferenceKind::LocalOnly => "local only",
                DifferenceKind::RemoteOnly => "mirror only",
                DifferenceKind::Modified => "modified",
            };
            let _ = writeln!(out, "  {marker:<12} {}", difference.path.display());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aisync_core::comparison::FileDifference;
    use std::path::PathBuf;

    #[test]
    fn test_render_lists_differences() {
        let status = ToolStatus {
            tool: "cursor".into(),
            state: SyncState::OutOfSync,
            differences: vec![
                FileDifference {
                    path: PathBuf::from("rules/a.md"),
                    kind: DifferenceKind::LocalOnly,
                },
                FileDifference {
                    path: PathBuf::from("settings.json"),
                    kind: DifferenceKind::Modified,
                },
            ],
        };

        let out = Status::render(&status);
        assert!(out.starts_with("cursor: out of sync\n"));
        assert!(out.contains("local only   rules/a.md"));
        assert!(out.contains("modified     settings.json"));
    }
}

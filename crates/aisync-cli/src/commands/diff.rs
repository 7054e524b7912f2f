use aisync_core::SyncContext;
use aisync_core::comparison::ConflictDetector;

use super::common::select_targets;
use crate::cli::TargetArgs;

pub struct Diff;

impl Diff {
    pub fn execute(ctx: &SyncContext, targets: &TargetArgs, no_color: bool) -> anyhow::Result<()> {
        use std::io::IsTerminal;

        let tools = select_targets(ctx, targets)?;
        let detector = ConflictDetector::new(ctx);
        let color = !no_color && std::io::stdout().is_terminal();

        for tool in &tools {
            let conflicts = detector.detect(tool);
            if conflicts.is_empty() {
                println!("{tool}: no differences");
                continue;
            }

            println!("{tool}: {} file(s) differ", conflicts.len());
            for conflict in &conflicts {
                let count = conflict.change_count();
                println!(
                    "  {} (+{} -{})",
                    conflict.path.display(),
                    count.added,
                    count.removed
                );
            }
            for conflict in &conflicts {
                let diff = if color {
                    conflict.colored_diff()
                } else {
                    conflict.diff()
                };
                println!("{diff}");
            }
        }
        Ok(())
    }
}

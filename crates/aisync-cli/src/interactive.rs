//! Interactive conflict resolution for pulls

use aisync_core::comparison::{ConflictRecord, ConflictResolution, FileChoice, ResolutionPlan};
use anyhow::{Context, Result};
use dialoguer::Select;

/// Tool-wide choices, in menu order
const RESOLUTIONS: [(ConflictResolution, &str); 4] = [
    (ConflictResolution::UseRemote, "Use mirror version for all files"),
    (ConflictResolution::KeepLocal, "Keep all local files"),
    (ConflictResolution::PerFile, "Decide file by file"),
    (ConflictResolution::Abort, "Skip this tool"),
];

/// Per-file menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileAction {
    Choose(FileChoice),
    ShowDiff,
}

const FILE_ACTIONS: [(FileAction, &str); 4] = [
    (FileAction::Choose(FileChoice::UseRemote), "Use mirror version"),
    (FileAction::Choose(FileChoice::KeepLocal), "Keep local file"),
    (
        FileAction::Choose(FileChoice::BackupThenRemote),
        "Back up, then use mirror version",
    ),
    (FileAction::ShowDiff, "Show diff"),
];

/// Asks the user how to handle files a pull would overwrite
pub struct ConflictPrompter;

impl ConflictPrompter {
    /// Create a new prompter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Ask how to resolve `conflicts`; `None` means skip the tool
    ///
    /// # Errors
    ///
    /// Returns an error if terminal interaction fails.
    pub fn resolve(
        &self,
        tool: &str,
        conflicts: &[ConflictRecord],
    ) -> Result<Option<ResolutionPlan>> {
        println!(
            "\n{tool}: {} local file(s) differ from the mirror:",
            conflicts.len()
        );
        for conflict in conflicts {
            let count = conflict.change_count();
            println!(
                "  ~ {} (+{} -{})",
                conflict.path.display(),
                count.added,
                count.removed
            );
        }

        let labels: Vec<&str> = RESOLUTIONS.iter().map(|(_, label)| *label).collect();
        let index = Select::new()
            .with_prompt("How should these conflicts be resolved?")
            .items(&labels)
            .default(0)
            .interact()
            .context("Failed to show prompt")?;

        let resolution = RESOLUTIONS[index].0;
        if resolution != ConflictResolution::PerFile {
            return Ok(ResolutionPlan::uniform(resolution, conflicts));
        }

        let mut choices = Vec::with_capacity(conflicts.len());
        for conflict in conflicts {
            let choice = Self::choose_file(conflict)?;
            choices.push((conflict.path.as_path(), choice));
        }
        Ok(Some(ResolutionPlan::from_choices(choices)))
    }

    fn choose_file(conflict: &ConflictRecord) -> Result<FileChoice> {
        let labels: Vec<&str> = FILE_ACTIONS.iter().map(|(_, label)| *label).collect();

        loop {
            let index = Select::new()
                .with_prompt(conflict.path.display().to_string())
                .items(&labels)
                .default(0)
                .interact()
                .context("Failed to show prompt")?;

            match FILE_ACTIONS[index].0 {
                FileAction::Choose(choice) => return Ok(choice),
                FileAction::ShowDiff => println!("\n{}", conflict.colored_diff()),
            }
        }
    }
}

impl Default for ConflictPrompter {
    fn default() -> Self {
        Self::new()
    }
}

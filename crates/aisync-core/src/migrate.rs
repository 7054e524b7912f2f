//! Carry instruction and settings files from one tool to another
//!
//! Tools keep the same kind of content under different names: the
//! free-form instructions file is `CLAUDE.md` for Claude Code and
//! `GEMINI.md` for Gemini CLI, settings live in `settings.json` or
//! `config.json`. Migration copies one tool's file onto the other's,
//! rewriting tool mentions in instructions and re-indenting JSON settings.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use crate::context::SyncContext;
use crate::error::{Error, Result};

/// Kind of file carried between tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationKind {
    /// Free-form instructions or rules file
    Instructions,
    /// JSON settings file
    Settings,
}

impl MigrationKind {
    /// Every kind, in migration order
    pub const ALL: [Self; 2] = [Self::Instructions, Self::Settings];

    /// Stable identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instructions => "instructions",
            Self::Settings => "settings",
        }
    }

    /// File of this kind for `tool`, relative to its configuration directory
    #[must_use]
    pub fn file_for(self, tool: &str) -> Option<&'static str> {
        let file = match (self, tool) {
            (Self::Instructions, "opencode") => "AGENTS.md",
            (Self::Instructions, "claude") => "CLAUDE.md",
            (Self::Instructions, "gemini") => "GEMINI.md",
            (Self::Instructions, "kiro") => "steering/default.md",
            (Self::Instructions, "cursor") => "rules/default.mdc",
            (Self::Instructions, "windsurf") => "rules/default.md",
            (Self::Instructions, "continue") => ".continuerules",
            (Self::Settings, "opencode" | "continue") => "config.json",
            (Self::Settings, "kiro") => "settings/settings.json",
            (Self::Settings, "claude" | "gemini" | "cursor" | "windsurf" | "cody") => {
                "settings.json"
            }
            _ => return None,
        };
        Some(file)
    }
}

impl fmt::Display for MigrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a kind was left out of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationSkip {
    /// One of the tools has no file of this kind
    Unsupported,
    /// The source tool's file does not exist
    SourceMissing,
}

impl fmt::Display for MigrationSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unsupported => "unsupported",
            Self::SourceMissing => "source_missing",
        })
    }
}

/// One file to carry over
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStep {
    /// Kind of file
    pub kind: MigrationKind,
    /// Absolute source file
    pub source: PathBuf,
    /// Absolute target file
    pub target: PathBuf,
    /// The target already exists and would be overwritten
    pub target_exists: bool,
}

/// Everything a migration between two tools would do
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationPlan {
    /// Source tool
    pub from: String,
    /// Target tool
    pub to: String,
    /// Files to write
    pub steps: Vec<MigrationStep>,
    /// Kinds left out and why
    pub skipped: Vec<(MigrationKind, MigrationSkip)>,
}

/// Plans and applies migrations between installed tools
pub struct Migrator<'a> {
    ctx: &'a SyncContext,
}

impl<'a> Migrator<'a> {
    /// Create a migrator over `ctx`
    #[must_use]
    pub const fn new(ctx: &'a SyncContext) -> Self {
        Self { ctx }
    }

    /// Work out which files of `kinds` can be carried from `from` to `to`
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidMigration`] if `from` and `to` are the same tool
    /// - [`Error::ToolNotInstalled`] if either tool has no installed mapping
    pub fn plan(&self, from: &str, to: &str, kinds: &[MigrationKind]) -> Result<MigrationPlan> {
        if from == to {
            return Err(Error::InvalidMigration(format!(
                "source and target are both '{from}'"
            )));
        }
        let source_dir = self.local_dir(from)?;
        let target_dir = self.local_dir(to)?;

        let mut plan = MigrationPlan {
            from: from.to_string(),
            to: to.to_string(),
            steps: Vec::new(),
            skipped: Vec::new(),
        };

        for &kind in kinds {
            let (Some(source_file), Some(target_file)) = (kind.file_for(from), kind.file_for(to))
            else {
                debug!(from, to, %kind, "no migration path");
                plan.skipped.push((kind, MigrationSkip::Unsupported));
                continue;
            };

            let source = source_dir.join(source_file);
            if !source.is_file() {
                debug!(from, path = %source.display(), "migration source missing");
                plan.skipped.push((kind, MigrationSkip::SourceMissing));
                continue;
            }

            let target = target_dir.join(target_file);
            plan.steps.push(MigrationStep {
                kind,
                target_exists: target.exists(),
                source,
                target,
            });
        }

        Ok(plan)
    }

    /// Convert and write one step of `plan`
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or the target written.
    pub fn apply(&self, plan: &MigrationPlan, step: &MigrationStep) -> Result<()> {
        let content = fs::read_to_string(&step.source)
            .map_err(|e| Error::io("failed to read", &step.source, e))?;

        let target_name = self
            .ctx
            .registry()
            .get(&plan.to)
            .map_or(plan.to.as_str(), |def| def.display_name.as_str());
        let converted = convert(step.kind, &content, &plan.from, target_name);

        if let Some(parent) = step.target.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::io("failed to create directory", parent, e))?;
        }
        fs::write(&step.target, converted)
            .map_err(|e| Error::io("failed to write", &step.target, e))?;

        info!(
            from = %plan.from,
            to = %plan.to,
            kind = %step.kind,
            target = %step.target.display(),
            "migrated"
        );
        Ok(())
    }

    fn local_dir(&self, tool: &str) -> Result<PathBuf> {
        let installed = self.ctx.state().mapping(tool).is_some_and(|m| m.installed);
        match self.ctx.layout(tool) {
            Some(layout) if installed => Ok(layout.local_dir),
            _ => Err(Error::ToolNotInstalled(tool.to_string())),
        }
    }
}

/// Names a tool goes by in instruction text
fn mentions(tool: &str) -> &'static [&'static str] {
    match tool {
        "opencode" => &["OpenCode", "opencode"],
        "claude" => &["Claude", "claude"],
        "gemini" => &["Gemini", "gemini"],
        "kiro" => &["Kiro", "kiro"],
        "cursor" => &["Cursor", "cursor"],
        "windsurf" => &["Windsurf", "windsurf"],
        "continue" => &["Continue", "continue"],
        _ => &[],
    }
}

/// Rewrite `content` of `kind` from tool `from` for a tool called `target_name`
///
/// Instructions get every mention of the source tool replaced. Settings
/// that parse as JSON are re-indented; anything else passes through.
#[must_use]
pub fn convert(kind: MigrationKind, content: &str, from: &str, target_name: &str) -> String {
    match kind {
        MigrationKind::Instructions => mentions(from)
            .iter()
            .fold(content.to_string(), |text, name| text.replace(name, target_name)),
        MigrationKind::Settings => serde_json::from_str::<serde_json::Value>(content)
            .and_then(|value| serde_json::to_string_pretty(&value))
            .map_or_else(|_| content.to_string(), |json| json + "\n"),
    }
}

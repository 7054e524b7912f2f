//! Debouncing of file-change notifications
//!
//! A watcher reports changes per tool. Bursts are coalesced: tool names
//! collect in a set and are released together once no notification has
//! arrived for the quiet interval, so each tool syncs at most once per
//! window no matter how many of its files changed.

use std::collections::BTreeSet;
use std::path::{Component, Path};
use std::time::{Duration, Instant};

/// Directory names whose contents never trigger a sync
const NOISY_DIRECTORIES: &[&str] = &[".git", "node_modules"];

/// Coalesces change notifications per tool
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    pending: BTreeSet<String>,
    last_event: Option<Instant>,
}

impl Debouncer {
    /// Release pending tools after `quiet` without new notifications
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: BTreeSet::new(),
            last_event: None,
        }
    }

    /// Quiet interval
    #[must_use]
    pub const fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Record a change for `tool` at `now`, restarting the quiet interval
    pub fn notify(&mut self, tool: &str, now: Instant) {
        self.pending.insert(tool.to_string());
        self.last_event = Some(now);
    }

    /// Whether any tool is waiting
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Take the pending tools if the quiet interval has elapsed at `now`
    pub fn take_ready(&mut self, now: Instant) -> Option<Vec<String>> {
        let last = self.last_event?;
        if self.pending.is_empty() || now.saturating_duration_since(last) < self.quiet {
            return None;
        }
        self.last_event = None;
        Some(std::mem::take(&mut self.pending).into_iter().collect())
    }

    /// Time left until pending tools become ready, if any are pending
    #[must_use]
    pub fn time_until_ready(&self, now: Instant) -> Option<Duration> {
        let last = self.last_event.filter(|_| self.has_pending())?;
        Some(self.quiet.saturating_sub(now.saturating_duration_since(last)))
    }
}

/// Whether a change to `path` should trigger a sync
///
/// Changes inside `.git` or `node_modules`, and to `*.log` files, are noise.
#[must_use]
pub fn is_relevant_change(path: &Path) -> bool {
    let noisy_dir = path.components().any(|c| match c {
        Component::Normal(name) => NOISY_DIRECTORIES.iter().any(|d| name == *d),
        _ => false,
    });
    let log_file = path.extension().is_some_and(|ext| ext == "log");
    !noisy_dir && !log_file
}

//! Content comparison between a tool's local directory and its mirror
//!
//! - Fingerprints: SHA-256 of raw file bytes, used for equality checks
//! - Conflict detection before a pull, with resolution choices
//! - Status: tri-state report of how the two trees differ
//! - Visual diffs for conflicting files

mod conflicts;
mod diff;
mod hash;
mod status;


pub use conflicts::{
    ConflictDetector, ConflictRecord, ConflictResolution, FileChoice, ResolutionPlan,
};
pub use diff::{ChangeCount, DiffGenerator};
pub use hash::Fingerprint;
pub use status::{DifferenceKind, FileDifference, StatusReporter, SyncState, ToolStatus};

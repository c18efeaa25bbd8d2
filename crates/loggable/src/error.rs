//! Replay failures.

use loggable_patch::PatchError;
use thiserror::Error;

/// Errors surfaced by the replay controller.
///
/// None of these leave the revision log partially mutated: the replayed
/// snapshot is computed in full before any state is committed.
#[derive(Debug, Error, PartialEq)]
pub enum ReplayError {
    /// Undo requested with no revision behind the cursor.
    #[error("nothing to undo")]
    NothingToUndo,
    /// Redo requested with no revision ahead of the cursor.
    #[error("nothing to redo")]
    NothingToRedo,
    /// Replaying a revision produced a snapshot that is not a plain object.
    #[error("replayed snapshot is not an object")]
    InvalidSnapshot,
    /// The patch algebra rejected the revision being replayed.
    #[error(transparent)]
    Patch(#[from] PatchError),
}

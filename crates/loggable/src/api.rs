//! Public API: the composition wrapper and the free-function surface.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use loggable_observe::{ObservableObject, ObserveError};
use loggable_patch::Patch;

use crate::error::ReplayError;
use crate::observer::arm;
use crate::replay;
use crate::snapshot::capture;
use crate::state::LoggableState;

/// An observable object carrying revision-log metadata.
///
/// An explicit composition: the metadata lives beside the object rather
/// than hidden inside it. Clones are cheap and share both the object and
/// the log.
#[derive(Clone, Debug)]
pub struct Loggable {
    object: ObservableObject,
    state: Rc<RefCell<LoggableState>>,
}

// ── Free-function surface ─────────────────────────────────────────────────

/// Attaches fresh revision-tracking state to an object, capturing its
/// current fields as the baseline snapshot. Does not start observation.
pub fn make_loggable(object: ObservableObject) -> Loggable {
    let baseline = capture(&object);
    Loggable {
        object,
        state: Rc::new(RefCell::new(LoggableState::new(baseline))),
    }
}

/// Starts recording mutations of the logged object.
///
/// With `skip_first_run` set, the subscription's immediate establishment
/// run is not logged. With it clear, that run is recorded as an (empty)
/// first revision and `step` starts at 1 — the legacy shape some callers
/// rely on for the undo-availability flag.
pub fn start_logging(loggable: &Loggable, skip_first_run: bool) {
    arm(loggable, skip_first_run);
}

/// Rewinds the most recently applied revision. See [`Loggable::undo`].
pub fn undo(loggable: &Loggable) -> Result<(), ReplayError> {
    replay::undo(loggable)
}

/// Re-applies the revision just ahead of the cursor. See [`Loggable::redo`].
pub fn redo(loggable: &Loggable) -> Result<(), ReplayError> {
    replay::redo(loggable)
}

/// Whether an undo step is currently advertised.
pub fn can_undo(loggable: &Loggable) -> bool {
    loggable.state.borrow().can_undo
}

/// Whether a redo step is currently available.
pub fn can_redo(loggable: &Loggable) -> bool {
    loggable.state.borrow().can_redo
}

// ── Bound surface ─────────────────────────────────────────────────────────

impl Loggable {
    /// Bundles attach and start: the object is made loggable and
    /// observation begins immediately, with the establishment run
    /// suppressed so the history starts empty.
    pub fn new(object: ObservableObject) -> Self {
        let loggable = make_loggable(object);
        start_logging(&loggable, true);
        loggable
    }

    /// Builds a loggable object from any serializable value that converts
    /// to a plain JSON object, and starts logging it.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, ObserveError> {
        Ok(Self::new(ObservableObject::from_serialize(value)?))
    }

    /// Rewinds the most recently applied revision.
    ///
    /// Fails with [`ReplayError::NothingToUndo`] when the cursor is at the
    /// baseline. Note that [`can_undo`](Loggable::can_undo) only turns on
    /// once two revisions are behind the cursor; at `step == 1` the flag is
    /// off but `undo` still succeeds.
    pub fn undo(&self) -> Result<(), ReplayError> {
        replay::undo(self)
    }

    /// Re-applies the revision just ahead of the cursor.
    ///
    /// Fails with [`ReplayError::NothingToRedo`] at the tip of history.
    pub fn redo(&self) -> Result<(), ReplayError> {
        replay::redo(self)
    }

    pub fn can_undo(&self) -> bool {
        can_undo(self)
    }

    pub fn can_redo(&self) -> bool {
        can_redo(self)
    }

    /// The live object, for reading and mutating fields.
    pub fn object(&self) -> &ObservableObject {
        &self.object
    }

    /// How many revisions are applied forward from the baseline snapshot.
    pub fn step(&self) -> usize {
        self.state.borrow().step
    }

    /// Total recorded revisions, including any still ahead of the cursor.
    pub fn revision_count(&self) -> usize {
        self.state.borrow().revisions.len()
    }

    /// A copy of the recorded revision at `index`, if any.
    pub fn revision(&self, index: usize) -> Option<Patch> {
        self.state.borrow().revisions.get(index).cloned()
    }

    /// Fresh plain snapshot of the live object.
    pub fn snapshot(&self) -> Value {
        capture(&self.object)
    }

    /// The snapshot recorded after the most recent logged or replayed
    /// change.
    pub fn last_snapshot(&self) -> Value {
        self.state.borrow().last.clone()
    }

    pub(crate) fn state_rc(&self) -> Rc<RefCell<LoggableState>> {
        Rc::clone(&self.state)
    }
}

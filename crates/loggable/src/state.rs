//! Revision-tracking state.

use loggable_observe::Disposer;
use loggable_patch::Patch;
use serde_json::Value;

/// Revision log attached to one logged object.
///
/// `step` is the cursor into `revisions`: how many patches are currently
/// applied forward from the baseline snapshot, with
/// `0 <= step <= revisions.len()`. `last` is the snapshot reached after the
/// most recent recorded or replayed change — always equal to the baseline
/// with `revisions[0..step]` applied in order.
#[derive(Debug)]
pub struct LoggableState {
    pub(crate) revisions: Vec<Patch>,
    pub(crate) last: Value,
    pub(crate) step: usize,
    pub(crate) can_undo: bool,
    pub(crate) can_redo: bool,
    pub(crate) disposer: Option<Disposer>,
}

impl LoggableState {
    pub(crate) fn new(baseline: Value) -> Self {
        Self {
            revisions: Vec::new(),
            last: baseline,
            step: 0,
            can_undo: false,
            can_redo: false,
            disposer: None,
        }
    }

    /// The single mutation path for adding history: any redoable future past
    /// `step` is discarded, then `patch` becomes the new tip.
    pub(crate) fn append(&mut self, patch: Patch) {
        self.revisions.truncate(self.step);
        self.revisions.push(patch);
        self.step += 1;
    }

    /// Recomputes the derived availability flags.
    ///
    /// The undo threshold is `step > 1`, not `step > 0`: the first recorded
    /// revision is never advertised as undoable, even though replaying it
    /// works. Kept as observed behavior; see the test suite.
    pub(crate) fn recompute_flags(&mut self) {
        self.can_undo = self.step > 1;
        self.can_redo = self.step < self.revisions.len();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use loggable_patch::diff;
    use serde_json::json;

    fn patch(n: i64) -> Patch {
        diff(&json!({"x": n}), &json!({"x": n + 1}))
    }

    #[test]
    fn append_advances_the_cursor() {
        let mut state = LoggableState::new(json!({}));
        state.append(patch(1));
        state.append(patch(2));
        assert_eq!(state.step, 2);
        assert_eq!(state.revisions.len(), 2);
    }

    #[test]
    fn append_discards_the_redoable_future() {
        let mut state = LoggableState::new(json!({}));
        state.append(patch(1));
        state.append(patch(2));
        state.append(patch(3));
        state.step = 1; // as after two undos

        state.append(patch(9));
        assert_eq!(state.revisions.len(), 2);
        assert_eq!(state.step, 2);
        assert_eq!(state.revisions[1], patch(9));
    }

    #[test]
    fn undo_flag_turns_on_one_step_late() {
        let mut state = LoggableState::new(json!({}));
        state.recompute_flags();
        assert!(!state.can_undo);

        state.append(patch(1));
        state.recompute_flags();
        // One recorded revision: the threshold is step > 1, so the flag
        // stays off even though there is history behind the cursor.
        assert!(!state.can_undo);

        state.append(patch(2));
        state.recompute_flags();
        assert!(state.can_undo);
    }

    #[test]
    fn redo_flag_tracks_the_gap_to_the_tip() {
        let mut state = LoggableState::new(json!({}));
        state.append(patch(1));
        state.append(patch(2));
        state.recompute_flags();
        assert!(!state.can_redo);

        state.step = 1;
        state.recompute_flags();
        assert!(state.can_redo);

        state.step = 0;
        state.recompute_flags();
        assert!(state.can_redo);
    }
}

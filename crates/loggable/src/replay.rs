//! The replay controller.
//!
//! Undo and redo reconstruct a neighboring snapshot from the revision log
//! and write it back onto the live object. The write-back must not be
//! recorded as a fresh change, so replay always disposes the observer
//! first and re-arms it afterwards with the establishment run suppressed.
//!
//! Ordering is apply-then-commit: the new snapshot is computed (and checked
//! to be a plain object) before the subscription, `step`, or `last` are
//! touched, so a failing patch leaves everything as it was.

use serde_json::{Map, Value};
use tracing::debug;

use loggable_patch::{apply_patch, inverse};

use crate::api::Loggable;
use crate::error::ReplayError;
use crate::observer::arm;

/// Rewinds the most recently applied revision.
///
/// Requires a revision behind the cursor; the `can_undo` flag lags this by
/// one step at `step == 1`.
pub(crate) fn undo(loggable: &Loggable) -> Result<(), ReplayError> {
    let state = loggable.state_rc();
    let new_fields = {
        let st = state.borrow();
        if st.step == 0 {
            return Err(ReplayError::NothingToUndo);
        }
        let undo_patch = inverse(&st.revisions[st.step - 1])?;
        into_fields(apply_patch(&st.last, &undo_patch)?)?
    };

    dispose_observer(loggable);
    loggable.object().extend(new_fields.clone());

    {
        let mut st = state.borrow_mut();
        st.step -= 1;
        st.last = Value::Object(new_fields);
        st.recompute_flags();
        debug!(step = st.step, "undo applied");
    }

    arm(loggable, true);
    Ok(())
}

/// Re-applies the revision just ahead of the cursor.
pub(crate) fn redo(loggable: &Loggable) -> Result<(), ReplayError> {
    let state = loggable.state_rc();
    let new_fields = {
        let st = state.borrow();
        if st.step >= st.revisions.len() {
            return Err(ReplayError::NothingToRedo);
        }
        into_fields(apply_patch(&st.last, &st.revisions[st.step])?)?
    };

    dispose_observer(loggable);
    loggable.object().extend(new_fields.clone());

    {
        let mut st = state.borrow_mut();
        st.step += 1;
        st.last = Value::Object(new_fields);
        st.recompute_flags();
        debug!(step = st.step, "redo applied");
    }

    arm(loggable, true);
    Ok(())
}

fn dispose_observer(loggable: &Loggable) {
    let disposer = loggable.state_rc().borrow_mut().disposer.take();
    if let Some(disposer) = disposer {
        disposer.dispose();
    }
}

fn into_fields(snapshot: Value) -> Result<Map<String, Value>, ReplayError> {
    match snapshot {
        Value::Object(map) => Ok(map),
        _ => Err(ReplayError::InvalidSnapshot),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

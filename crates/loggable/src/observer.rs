//! The change observer.
//!
//! Two states: Armed (subscription live, recording settled mutations) and
//! Disposed. Disposal is permanent — returning to Armed means installing a
//! fresh subscription via [`arm`]. Exactly one subscription is live per
//! logged object at any time.

use std::cell::Cell;

use loggable_patch::diff;
use tracing::{debug, trace};

use crate::api::Loggable;
use crate::snapshot::capture;

/// Installs the change observer.
///
/// Any previous subscription is torn down first — two live observers would
/// double-record every mutation. The new subscription's immediate
/// establishment run reflects state already captured in `last`, so when
/// `skip_first_run` is set it is suppressed from the log; the flag is
/// consumed by that first cycle and never reapplied.
pub(crate) fn arm(loggable: &Loggable, skip_first_run: bool) {
    let state = loggable.state_rc();

    let previous = state.borrow_mut().disposer.take();
    if let Some(previous) = previous {
        trace!("replacing live subscription");
        previous.dispose();
    }

    let object = loggable.object().clone();
    let record_state = loggable.state_rc();
    let first_run = Cell::new(skip_first_run);
    let disposer = object.clone().observe(move || {
        if first_run.replace(false) {
            trace!("establishment run suppressed");
            return;
        }
        let snapshot = capture(&object);
        let mut state = record_state.borrow_mut();
        let patch = diff(&state.last, &snapshot);
        state.last = snapshot;
        state.append(patch);
        state.recompute_flags();
        debug!(step = state.step, revisions = state.revisions.len(), "recorded revision");
    });

    state.borrow_mut().disposer = Some(disposer);
    trace!(skip_first_run, "observer armed");
}

// ── Tests ─────────────────────────────────────────────────────────────────

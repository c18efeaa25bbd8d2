//! Snapshot capture.

use loggable_observe::ObservableObject;
use serde_json::Value;

/// Captures the object's current observable fields as a plain value.
///
/// The result is deeply cloned — no live references back into the object —
/// so later mutation cannot retroactively alter a stored snapshot. Capture
/// is deterministic for a given state and triggers no observation side
/// effects.
pub fn capture(object: &ObservableObject) -> Value {
    object.to_plain()
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn capture_is_stable_under_later_mutation() {
        let object = ObservableObject::new();
        object.set("x", json!({"deep": [1]}));
        let snapshot = capture(&object);
        object.set("x", json!({"deep": [1, 2]}));
        assert_eq!(snapshot, json!({"x": {"deep": [1]}}));
    }

    #[test]
    fn capture_does_not_notify() {
        let object = ObservableObject::new();
        object.set("x", json!(1));
        let runs = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = std::rc::Rc::clone(&runs);
        let _disposer = object.observe(move || counter.set(counter.get() + 1));
        let _ = capture(&object);
        assert_eq!(runs.get(), 1);
    }
}

//! The observable object.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::subscription::{Callback, Disposer, Subscriber};

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ObserveError {
    /// The seed value converts to something other than a JSON object.
    #[error("NOT_AN_OBJECT")]
    NotAnObject,
    /// The seed value could not be serialized to a plain value at all.
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

// ── Observable object ─────────────────────────────────────────────────────

#[derive(Default)]
struct Inner {
    fields: RefCell<Map<String, Value>>,
    subscribers: Rc<RefCell<Vec<Subscriber>>>,
    next_id: Cell<u64>,
}

/// A shared, mutable map of named JSON fields with change notification.
///
/// Cloning the handle shares the underlying object. All mutation methods
/// settle synchronously: by the time they return, every live subscriber has
/// run. Writes that leave a field's value unchanged do not notify.
#[derive(Clone, Default)]
pub struct ObservableObject {
    inner: Rc<Inner>,
}

impl ObservableObject {
    /// Creates an object with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing plain JSON object.
    pub fn from_value(value: Value) -> Result<Self, ObserveError> {
        match value {
            Value::Object(map) => Ok(Self {
                inner: Rc::new(Inner {
                    fields: RefCell::new(map),
                    ..Inner::default()
                }),
            }),
            _ => Err(ObserveError::NotAnObject),
        }
    }

    /// Converts any serializable value to a plain object and wraps it.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, ObserveError> {
        Self::from_value(serde_json::to_value(value)?)
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    /// Current value of a field, deeply cloned.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.fields.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.fields.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.fields.borrow().is_empty()
    }

    /// Plain, deeply cloned view of all fields. The returned value holds no
    /// references back into the object, so later mutation cannot alter it.
    pub fn to_plain(&self) -> Value {
        Value::Object(self.inner.fields.borrow().clone())
    }

    // ── Writes ────────────────────────────────────────────────────────────

    /// Installs or overwrites one field, then notifies. Writing the value a
    /// field already holds is a silent no-op.
    pub fn set(&self, key: &str, value: Value) {
        let changed = {
            let mut fields = self.inner.fields.borrow_mut();
            match fields.get(key) {
                Some(existing) if *existing == value => false,
                _ => {
                    fields.insert(key.to_string(), value);
                    true
                }
            }
        };
        if changed {
            self.notify();
        }
    }

    /// Merges a set of fields in one settling: present keys are installed or
    /// overwritten, absent keys are left alone, and subscribers run at most
    /// once for the whole batch.
    pub fn extend(&self, props: Map<String, Value>) {
        let changed = {
            let mut fields = self.inner.fields.borrow_mut();
            let mut changed = false;
            for (key, value) in props {
                if fields.get(&key) != Some(&value) {
                    fields.insert(key, value);
                    changed = true;
                }
            }
            changed
        };
        if changed {
            self.notify();
        }
    }

    /// Deletes a field, notifying only when it existed.
    pub fn remove(&self, key: &str) {
        let removed = self.inner.fields.borrow_mut().remove(key).is_some();
        if removed {
            self.notify();
        }
    }

    // ── Observation ───────────────────────────────────────────────────────

    /// Registers a side effect and runs it once immediately, so it observes
    /// the state it starts from. After that it re-runs after every settled
    /// mutation until the returned [`Disposer`] is used.
    pub fn observe(&self, effect: impl FnMut() + 'static) -> Disposer {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let callback: Callback = Rc::new(RefCell::new(effect));
        self.inner
            .subscribers
            .borrow_mut()
            .push(Subscriber { id, callback: Rc::clone(&callback) });

        (&mut *callback.borrow_mut())();

        Disposer {
            registry: Rc::downgrade(&self.inner.subscribers),
            id,
            disposed: Cell::new(false),
        }
    }

    fn notify(&self) {
        // Run against a snapshot of the list so subscribers disposed (or
        // added) mid-notification don't shift the iteration.
        let live: Vec<(u64, Callback)> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|s| (s.id, Rc::clone(&s.callback)))
            .collect();
        for (id, callback) in live {
            let still_subscribed =
                self.inner.subscribers.borrow().iter().any(|s| s.id == id);
            if !still_subscribed {
                continue;
            }
            // A callback re-entering itself (mutating inside its own run)
            // is skipped rather than re-invoked.
            if let Ok(mut effect) = callback.try_borrow_mut() {
                (&mut *effect)();
            }
        }
    }
}

impl fmt::Debug for ObservableObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableObject")
            .field("fields", &*self.inner.fields.borrow())
            .field("subscribers", &self.inner.subscribers.borrow().len())
            .finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn counter() -> (Rc<Cell<usize>>, impl Fn() -> usize) {
        let runs = Rc::new(Cell::new(0));
        let reader = Rc::clone(&runs);
        (runs, move || reader.get())
    }

    #[test]
    fn set_and_get() {
        let object = ObservableObject::new();
        object.set("x", json!(1));
        assert_eq!(object.get("x"), Some(json!(1)));
        assert_eq!(object.get("y"), None);
        assert_eq!(object.len(), 1);
    }

    #[test]
    fn from_value_requires_object() {
        assert!(ObservableObject::from_value(json!({"a": 1})).is_ok());
        assert!(matches!(
            ObservableObject::from_value(json!([1, 2])),
            Err(ObserveError::NotAnObject)
        ));
    }

    #[test]
    fn from_serialize_seeds_fields() {
        #[derive(serde::Serialize)]
        struct Seed {
            x: i32,
            name: String,
        }
        let object =
            ObservableObject::from_serialize(&Seed { x: 7, name: "n".to_string() }).unwrap();
        assert_eq!(object.get("x"), Some(json!(7)));
        assert_eq!(object.get("name"), Some(json!("n")));
    }

    #[test]
    fn observe_runs_immediately_then_per_mutation() {
        let object = ObservableObject::new();
        let (runs, count) = counter();
        let _disposer = object.observe(move || runs.set(runs.get() + 1));
        assert_eq!(count(), 1);

        object.set("x", json!(1));
        object.set("x", json!(2));
        assert_eq!(count(), 3);
    }

    #[test]
    fn unchanged_write_does_not_notify() {
        let object = ObservableObject::new();
        object.set("x", json!(1));
        let (runs, count) = counter();
        let _disposer = object.observe(move || runs.set(runs.get() + 1));

        object.set("x", json!(1));
        assert_eq!(count(), 1);
    }

    #[test]
    fn extend_settles_once() {
        let object = ObservableObject::new();
        object.set("x", json!(1));
        let (runs, count) = counter();
        let _disposer = object.observe(move || runs.set(runs.get() + 1));

        let mut props = Map::new();
        props.insert("x".to_string(), json!(2));
        props.insert("y".to_string(), json!(3));
        object.extend(props);
        assert_eq!(count(), 2);
        assert_eq!(object.get("y"), Some(json!(3)));
    }

    #[test]
    fn extend_with_identical_fields_is_silent() {
        let object = ObservableObject::new();
        object.set("x", json!(1));
        let (runs, count) = counter();
        let _disposer = object.observe(move || runs.set(runs.get() + 1));

        let mut props = Map::new();
        props.insert("x".to_string(), json!(1));
        object.extend(props);
        assert_eq!(count(), 1);
    }

    #[test]
    fn remove_notifies_only_when_present() {
        let object = ObservableObject::new();
        object.set("x", json!(1));
        let (runs, count) = counter();
        let _disposer = object.observe(move || runs.set(runs.get() + 1));

        object.remove("missing");
        assert_eq!(count(), 1);
        object.remove("x");
        assert_eq!(count(), 2);
        assert_eq!(object.get("x"), None);
    }

    #[test]
    fn dispose_stops_notifications() {
        let object = ObservableObject::new();
        let (runs, count) = counter();
        let disposer = object.observe(move || runs.set(runs.get() + 1));

        object.set("x", json!(1));
        assert_eq!(count(), 2);

        disposer.dispose();
        object.set("x", json!(2));
        assert_eq!(count(), 2);
        assert!(disposer.is_disposed());
    }

    #[test]
    fn double_dispose_is_a_no_op() {
        let object = ObservableObject::new();
        let disposer = object.observe(|| {});
        disposer.dispose();
        disposer.dispose();
        assert!(disposer.is_disposed());
    }

    #[test]
    fn dispose_after_object_dropped_is_a_no_op() {
        let object = ObservableObject::new();
        let disposer = object.observe(|| {});
        drop(object);
        disposer.dispose();
        assert!(disposer.is_disposed());
    }

    #[test]
    fn to_plain_is_alias_free() {
        let object = ObservableObject::new();
        object.set("list", json!([1, 2]));
        let snapshot = object.to_plain();
        object.set("list", json!([1, 2, 3]));
        assert_eq!(snapshot, json!({"list": [1, 2]}));
    }

    #[test]
    fn clone_shares_state_and_subscribers() {
        let object = ObservableObject::new();
        let alias = object.clone();
        let (runs, count) = counter();
        let _disposer = object.observe(move || runs.set(runs.get() + 1));

        alias.set("x", json!(1));
        assert_eq!(count(), 2);
        assert_eq!(object.get("x"), Some(json!(1)));
    }

    #[test]
    fn subscriber_disposed_mid_notification_is_skipped() {
        let object = ObservableObject::new();

        // First subscriber disposes the second during its run.
        let pending: Rc<RefCell<Option<Disposer>>> = Rc::new(RefCell::new(None));
        let trigger = Rc::clone(&pending);
        let _first = object.observe(move || {
            if let Some(disposer) = trigger.borrow_mut().take() {
                disposer.dispose();
            }
        });

        let (runs, count) = counter();
        let second = object.observe(move || runs.set(runs.get() + 1));
        assert_eq!(count(), 1);
        *pending.borrow_mut() = Some(second);

        object.set("x", json!(1));
        assert_eq!(count(), 1);
    }
}

//! Single-threaded observable objects.
//!
//! An [`ObservableObject`] is a shared, mutable map of named JSON fields.
//! Side effects registered with [`ObservableObject::observe`] run once
//! immediately (so the effect sees the state it starts from) and again after
//! every settled mutation. Observation stops only through the returned
//! [`Disposer`], which tears the subscription down permanently.
//!
//! Everything here is cooperative and synchronous on one thread: handles are
//! `Rc`-based and deliberately not `Send`.
//!
//! ```
//! use loggable_observe::ObservableObject;
//! use serde_json::json;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let object = ObservableObject::new();
//! let runs = Rc::new(Cell::new(0));
//!
//! let counter = Rc::clone(&runs);
//! let disposer = object.observe(move || counter.set(counter.get() + 1));
//! assert_eq!(runs.get(), 1); // establishment run
//!
//! object.set("x", json!(1));
//! assert_eq!(runs.get(), 2);
//!
//! disposer.dispose();
//! object.set("x", json!(2));
//! assert_eq!(runs.get(), 2);
//! ```

pub mod object;
pub mod subscription;

pub use object::{ObservableObject, ObserveError};
pub use subscription::Disposer;

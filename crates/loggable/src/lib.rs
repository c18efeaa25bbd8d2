//! Transparent undo/redo for observable objects.
//!
//! Any settled mutation of an object under logging is captured as an
//! invertible patch in an ordered, truncatable revision log. The object can
//! then be rewound and replayed one change at a time; the replay's own
//! write-back is never recorded as new history.
//!
//! The moving parts, leaves first:
//!
//! - snapshot capture ([`capture`]) turns the live object into a plain,
//!   comparable value;
//! - the revision log (`step` cursor plus ordered patches) holds history
//!   and the derived undo/redo availability flags;
//! - the change observer subscribes to mutations and appends one patch per
//!   settled change;
//! - the replay controller ([`undo`]/[`redo`]) applies an inverse or
//!   forward patch, writes the result back, and re-arms observation while
//!   suppressing the spurious cycle the write-back would otherwise log.
//!
//! ```
//! use loggable::{Loggable, ObservableObject};
//! use serde_json::json;
//!
//! let object = ObservableObject::new();
//! object.set("x", json!(1));
//! let log = Loggable::new(object);
//!
//! log.object().set("x", json!(2));
//! log.object().set("x", json!(3));
//!
//! log.undo().unwrap();
//! assert_eq!(log.object().get("x"), Some(json!(2)));
//! log.redo().unwrap();
//! assert_eq!(log.object().get("x"), Some(json!(3)));
//! ```

pub mod api;
pub mod error;
mod observer;
mod replay;
pub mod snapshot;
mod state;

pub use api::{can_redo, can_undo, make_loggable, redo, start_logging, undo, Loggable};
pub use error::ReplayError;
pub use snapshot::capture;

pub use loggable_observe::{Disposer, ObservableObject, ObserveError};
pub use loggable_patch::{Op, Patch, PatchError};

/// Returns the crate version at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

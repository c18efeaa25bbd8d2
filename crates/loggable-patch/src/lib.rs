//! Invertible structural patches over plain JSON values.
//!
//! A [`Patch`] is an ordered sequence of [`Op`]s that transforms one plain
//! value into another. Patches are produced by [`diff`], applied with
//! [`apply_patch`], and reversed with [`inverse`]; consumers that only need
//! to store and replay them can treat the type as opaque.
//!
//! Every `remove` and `replace` emitted by [`diff`] records the value it
//! displaces, so diff output is always invertible. Hand-built ops may omit
//! that context, in which case [`inverse`] reports
//! [`PatchError::NotInvertible`] instead of guessing.
//!
//! ```
//! use loggable_patch::{apply_patch, diff, inverse};
//! use serde_json::json;
//!
//! let before = json!({"title": "draft", "tags": ["a"]});
//! let after = json!({"title": "final", "tags": ["a", "b"]});
//!
//! let patch = diff(&before, &after);
//! assert_eq!(apply_patch(&before, &patch).unwrap(), after);
//!
//! let undo = inverse(&patch).unwrap();
//! assert_eq!(apply_patch(&after, &undo).unwrap(), before);
//! ```

pub mod apply;
pub mod codec;
pub mod diff;
pub mod invert;
pub mod types;

pub use apply::{apply_op, apply_patch};
pub use codec::{from_json, to_json};
pub use diff::diff;
pub use invert::inverse;
pub use types::{Op, Patch, PatchError, Path};

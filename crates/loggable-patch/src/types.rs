//! Core types for the patch algebra.

use serde_json::Value;
use thiserror::Error;

/// Location of a value inside a JSON document, as RFC 6901 path segments.
pub type Path = Vec<String>;

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq)]
pub enum PatchError {
    #[error("NOT_FOUND")]
    NotFound,
    #[error("INVALID_INDEX")]
    InvalidIndex,
    #[error("INVALID_TARGET")]
    InvalidTarget,
    #[error("NOT_INVERTIBLE: {0}")]
    NotInvertible(&'static str),
    #[error("INVALID_OP: {0}")]
    InvalidOp(String),
}

// ── Op ────────────────────────────────────────────────────────────────────

/// A single mutation of a JSON document.
///
/// `Remove` and `Replace` carry the value they displace. [`diff`] always
/// fills it in; ops built by hand may leave it `None` and then cannot be
/// inverted.
///
/// [`diff`]: crate::diff
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Insert `value` at `path`. Object targets insert or overwrite the key;
    /// array targets insert at the index, shifting the tail right.
    Add { path: Path, value: Value },
    /// Delete the value at `path`, which must exist.
    Remove { path: Path, old_value: Option<Value> },
    /// Overwrite the value at `path`, which must exist. An empty path
    /// replaces the whole document.
    Replace {
        path: Path,
        value: Value,
        old_value: Option<Value>,
    },
}

impl Op {
    pub fn path(&self) -> &[String] {
        match self {
            Op::Add { path, .. } | Op::Remove { path, .. } | Op::Replace { path, .. } => path,
        }
    }

    pub fn op_name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Remove { .. } => "remove",
            Op::Replace { .. } => "replace",
        }
    }
}

// ── Patch ─────────────────────────────────────────────────────────────────

/// An ordered sequence of ops transforming one snapshot into another.
///
/// Ops apply strictly in order; array indices in later ops account for the
/// shifts performed by earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    pub ops: Vec<Op>,
}

impl Patch {
    pub fn new(ops: Vec<Op>) -> Self {
        Self { ops }
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl From<Vec<Op>> for Patch {
    fn from(ops: Vec<Op>) -> Self {
        Self::new(ops)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn op_accessors() {
        let op = Op::Add {
            path: vec!["a".to_string(), "b".to_string()],
            value: json!(1),
        };
        assert_eq!(op.op_name(), "add");
        assert_eq!(op.path(), ["a", "b"]);
    }

    #[test]
    fn empty_patch() {
        let patch = Patch::default();
        assert!(patch.is_empty());
        assert_eq!(patch.len(), 0);
    }
}

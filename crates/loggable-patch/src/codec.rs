//! JSON codec for patches.
//!
//! Ops serialize as RFC 6902-style objects (`{"op", "path", "value"}`) with
//! paths rendered as RFC 6901 pointers. The displaced value rides along in a
//! nonstandard `oldValue` member so decoded patches stay invertible.

use serde_json::{json, Value};

use crate::types::{Op, Patch, PatchError, Path};

// ── Pointer formatting ────────────────────────────────────────────────────

pub fn format_pointer(path: &[String]) -> String {
    let mut out = String::new();
    for segment in path {
        out.push('/');
        out.push_str(&segment.replace('~', "~0").replace('/', "~1"));
    }
    out
}

pub fn parse_pointer(pointer: &str) -> Result<Path, PatchError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    let rest = pointer
        .strip_prefix('/')
        .ok_or_else(|| PatchError::InvalidOp(format!("invalid pointer: {pointer}")))?;
    Ok(rest
        .split('/')
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect())
}

// ── Encode ────────────────────────────────────────────────────────────────

/// Encode a patch as a JSON array of op objects.
pub fn to_json(patch: &Patch) -> Value {
    Value::Array(patch.ops.iter().map(op_to_json).collect())
}

fn op_to_json(op: &Op) -> Value {
    match op {
        Op::Add { path, value } => json!({
            "op": "add",
            "path": format_pointer(path),
            "value": value,
        }),
        Op::Remove { path, old_value } => {
            let mut out = json!({"op": "remove", "path": format_pointer(path)});
            if let Some(old) = old_value {
                out["oldValue"] = old.clone();
            }
            out
        }
        Op::Replace { path, value, old_value } => {
            let mut out = json!({
                "op": "replace",
                "path": format_pointer(path),
                "value": value,
            });
            if let Some(old) = old_value {
                out["oldValue"] = old.clone();
            }
            out
        }
    }
}

// ── Decode ────────────────────────────────────────────────────────────────

/// Decode a patch from its JSON array form.
pub fn from_json(value: &Value) -> Result<Patch, PatchError> {
    let items = value
        .as_array()
        .ok_or_else(|| PatchError::InvalidOp("patch must be an array".to_string()))?;
    let mut ops = Vec::with_capacity(items.len());
    for item in items {
        ops.push(op_from_json(item)?);
    }
    Ok(Patch::new(ops))
}

fn op_from_json(value: &Value) -> Result<Op, PatchError> {
    let obj = value
        .as_object()
        .ok_or_else(|| PatchError::InvalidOp("op must be an object".to_string()))?;
    let name = obj
        .get("op")
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidOp("missing op name".to_string()))?;
    let pointer = obj
        .get("path")
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidOp("missing path".to_string()))?;
    let path = parse_pointer(pointer)?;

    let required = |key: &str| -> Result<Value, PatchError> {
        obj.get(key)
            .cloned()
            .ok_or_else(|| PatchError::InvalidOp(format!("{name} requires {key}")))
    };

    match name {
        "add" => Ok(Op::Add { path, value: required("value")? }),
        "remove" => Ok(Op::Remove { path, old_value: obj.get("oldValue").cloned() }),
        "replace" => Ok(Op::Replace {
            path,
            value: required("value")?,
            old_value: obj.get("oldValue").cloned(),
        }),
        other => Err(PatchError::InvalidOp(format!("unknown op: {other}"))),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

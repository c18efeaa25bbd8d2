//! Patch application.

use serde_json::Value;

use crate::types::{Op, Patch, PatchError};

// ── Path navigation ───────────────────────────────────────────────────────

/// Convert RFC 6901 path segments to a JSON Pointer string.
fn path_to_pointer(path: &[String]) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut ptr = String::with_capacity(path.len() * 8);
    for key in path {
        ptr.push('/');
        ptr.push_str(&key.replace('~', "~0").replace('/', "~1"));
    }
    ptr
}

/// Mutable navigation to the value at `path` (must exist).
fn get_mut_at<'a>(doc: &'a mut Value, path: &[String]) -> Result<&'a mut Value, PatchError> {
    let ptr = path_to_pointer(path);
    doc.pointer_mut(&ptr).ok_or(PatchError::NotFound)
}

// ── Individual operation applicators ─────────────────────────────────────

fn apply_add(doc: &mut Value, path: &[String], value: Value) -> Result<Option<Value>, PatchError> {
    if path.is_empty() {
        let old = std::mem::replace(doc, value);
        return Ok(Some(old));
    }
    let (parent_path, key) = path.split_at(path.len() - 1);
    let key = &key[0];
    let parent = get_mut_at(doc, parent_path)?;
    match parent {
        Value::Object(map) => Ok(map.insert(key.clone(), value)),
        Value::Array(arr) => {
            if key == "-" {
                arr.push(value);
                Ok(None)
            } else {
                let idx: usize = key.parse().map_err(|_| PatchError::InvalidIndex)?;
                if idx > arr.len() {
                    return Err(PatchError::InvalidIndex);
                }
                arr.insert(idx, value);
                Ok(None)
            }
        }
        _ => Err(PatchError::InvalidTarget),
    }
}

fn apply_remove(doc: &mut Value, path: &[String]) -> Result<Option<Value>, PatchError> {
    if path.is_empty() {
        return Err(PatchError::InvalidTarget);
    }
    let (parent_path, key) = path.split_at(path.len() - 1);
    let key = &key[0];
    let parent = get_mut_at(doc, parent_path)?;
    match parent {
        Value::Object(map) => map.remove(key).ok_or(PatchError::NotFound).map(Some),
        Value::Array(arr) => {
            let idx: usize = key.parse().map_err(|_| PatchError::InvalidIndex)?;
            if idx >= arr.len() {
                return Err(PatchError::NotFound);
            }
            Ok(Some(arr.remove(idx)))
        }
        _ => Err(PatchError::InvalidTarget),
    }
}

fn apply_replace(
    doc: &mut Value,
    path: &[String],
    value: Value,
) -> Result<Option<Value>, PatchError> {
    if path.is_empty() {
        let old = std::mem::replace(doc, value);
        return Ok(Some(old));
    }
    let (parent_path, key) = path.split_at(path.len() - 1);
    let key = &key[0];
    let parent = get_mut_at(doc, parent_path)?;
    match parent {
        Value::Object(map) => {
            if !map.contains_key(key) {
                return Err(PatchError::NotFound);
            }
            Ok(map.insert(key.clone(), value))
        }
        Value::Array(arr) => {
            let idx: usize = key.parse().map_err(|_| PatchError::InvalidIndex)?;
            if idx >= arr.len() {
                return Err(PatchError::NotFound);
            }
            Ok(Some(std::mem::replace(&mut arr[idx], value)))
        }
        _ => Err(PatchError::InvalidTarget),
    }
}

// ── Main apply functions ──────────────────────────────────────────────────

/// Apply a single op to the document (in-place mutation).
///
/// Returns the displaced value, when one existed at the target path.
pub fn apply_op(doc: &mut Value, op: &Op) -> Result<Option<Value>, PatchError> {
    match op {
        Op::Add { path, value } => apply_add(doc, path, value.clone()),
        Op::Remove { path, .. } => apply_remove(doc, path),
        Op::Replace { path, value, .. } => apply_replace(doc, path, value.clone()),
    }
}

/// Apply a whole patch to a document, returning the transformed copy.
///
/// The input document is never mutated: on error the caller's value is
/// exactly as it was, which lets replay logic compute a full result before
/// committing anything.
pub fn apply_patch(doc: &Value, patch: &Patch) -> Result<Value, PatchError> {
    let mut working = doc.clone();
    for op in &patch.ops {
        apply_op(&mut working, op)?;
    }
    Ok(working)
}

// ── Tests ─────────────────────────────────────────────────────────────────

//! Structural diff: generate a patch from two document values.
//!
//! Objects diff by key, arrays by common prefix/suffix with the middle
//! replaced element-wise, anything else by whole-value replacement. The
//! output is minimal enough for history purposes and, because every
//! `remove`/`replace` records the value it displaces, always invertible.

use serde_json::{Map, Value};

use crate::types::{Op, Patch};

// ── Public API ────────────────────────────────────────────────────────────

/// Generate a patch that transforms `src` into `dst`.
///
/// `diff(a, a)` is empty. Ops are emitted in apply order: later array
/// indices account for shifts performed by earlier ops.
pub fn diff(src: &Value, dst: &Value) -> Patch {
    let mut ops = Vec::new();
    diff_at_path(&mut ops, &[], src, dst);
    Patch::new(ops)
}

// ── Core recursive differ ─────────────────────────────────────────────────

fn diff_at_path(ops: &mut Vec<Op>, path: &[String], src: &Value, dst: &Value) {
    if src == dst {
        return;
    }
    match (src, dst) {
        (Value::Object(s), Value::Object(d)) => diff_obj(ops, path, s, d),
        (Value::Array(s), Value::Array(d)) => diff_arr(ops, path, s, d),
        _ => ops.push(Op::Replace {
            path: path.to_vec(),
            value: dst.clone(),
            old_value: Some(src.clone()),
        }),
    }
}

fn child(path: &[String], key: &str) -> Vec<String> {
    let mut p = path.to_vec();
    p.push(key.to_string());
    p
}

fn child_index(path: &[String], index: usize) -> Vec<String> {
    let mut p = path.to_vec();
    p.push(index.to_string());
    p
}

fn diff_obj(
    ops: &mut Vec<Op>,
    path: &[String],
    src: &Map<String, Value>,
    dst: &Map<String, Value>,
) {
    // Keys in src that are gone from dst.
    for (key, src_val) in src {
        if !dst.contains_key(key) {
            ops.push(Op::Remove {
                path: child(path, key),
                old_value: Some(src_val.clone()),
            });
        }
    }
    // New keys, then recurse into shared ones.
    for (key, dst_val) in dst {
        let p = child(path, key);
        match src.get(key) {
            None => ops.push(Op::Add { path: p, value: dst_val.clone() }),
            Some(src_val) => diff_at_path(ops, &p, src_val, dst_val),
        }
    }
}

fn diff_arr(ops: &mut Vec<Op>, path: &[String], src: &[Value], dst: &[Value]) {
    // Anchor on the longest common prefix and suffix; only the middle
    // differs.
    let mut prefix = 0;
    while prefix < src.len() && prefix < dst.len() && src[prefix] == dst[prefix] {
        prefix += 1;
    }
    let mut suffix = 0;
    while suffix < src.len() - prefix
        && suffix < dst.len() - prefix
        && src[src.len() - 1 - suffix] == dst[dst.len() - 1 - suffix]
    {
        suffix += 1;
    }

    let src_mid = src.len() - prefix - suffix;
    let dst_mid = dst.len() - prefix - suffix;
    let common = src_mid.min(dst_mid);

    // Pairwise recurse over the overlapping middle.
    for i in 0..common {
        let p = child_index(path, prefix + i);
        diff_at_path(ops, &p, &src[prefix + i], &dst[prefix + i]);
    }

    // Surplus src elements: repeated removal at the same index walks the
    // remaining middle left to right.
    for k in common..src_mid {
        ops.push(Op::Remove {
            path: child_index(path, prefix + common),
            old_value: Some(src[prefix + k].clone()),
        });
    }

    // Surplus dst elements: insert at ascending indices.
    for k in common..dst_mid {
        ops.push(Op::Add {
            path: child_index(path, prefix + k),
            value: dst[prefix + k].clone(),
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

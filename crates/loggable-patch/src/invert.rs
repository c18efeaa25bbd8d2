//! Patch inversion.

use crate::types::{Op, Patch, PatchError};

/// Build the patch that undoes `patch`.
///
/// Ops are inverted individually and emitted in reverse order, so array
/// index shifts unwind exactly. Fails when an op lacks the displaced-value
/// context required to reconstruct what it overwrote.
pub fn inverse(patch: &Patch) -> Result<Patch, PatchError> {
    let mut ops = Vec::with_capacity(patch.ops.len());
    for op in patch.ops.iter().rev() {
        ops.push(invert_op(op)?);
    }
    Ok(Patch::new(ops))
}

fn invert_op(op: &Op) -> Result<Op, PatchError> {
    match op {
        Op::Add { path, value } => Ok(Op::Remove {
            path: path.clone(),
            old_value: Some(value.clone()),
        }),
        Op::Remove { path, old_value: Some(old) } => Ok(Op::Add {
            path: path.clone(),
            value: old.clone(),
        }),
        Op::Replace { path, value, old_value: Some(old) } => Ok(Op::Replace {
            path: path.clone(),
            value: old.clone(),
            old_value: Some(value.clone()),
        }),
        Op::Remove { old_value: None, .. } => {
            Err(PatchError::NotInvertible("remove without recorded value"))
        }
        Op::Replace { old_value: None, .. } => {
            Err(PatchError::NotInvertible("replace without recorded value"))
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

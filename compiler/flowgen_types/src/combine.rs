//! Lattice combination of a slot's candidate types.
//!
//! Candidates are folded pairwise into the most specific common type.
//! When two candidates cannot be reconciled the accumulator is set
//! aside and folding continues with the next candidate; every value set
//! aside survives into the result, which is then ambiguous.
//!
//! # Rules
//!
//! Applied in order, first match wins (`?` stripped from both sides
//! unless noted):
//!
//! 1. Equal after stripping `?`: the stripped form.
//! 2. `interface{}` / `[]interface{}` loses to anything else.
//! 3. Equal after stripping one slice level: the shared form.
//! 4. One side is a slice of the other: the shared form.
//! 5. `@number` against a numeric kind: the numeric kind.
//! 6. `@single` against anything: its element type.
//! 7. `?bool` (unstripped) against anything: the other side.
//!
//! Rules 3 and 4 keep or drop the outer slice according to
//! [`SlicePolicy`].
//!
//! Input order never affects the result: candidates are deduplicated
//! and folded in their canonical [`Ord`] order.

use std::collections::BTreeSet;
use std::fmt;

use crate::{SlicePolicy, TypeExpr};

/// Outcome of combining one slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResolvedType {
    /// Exactly one type survived.
    Resolved(TypeExpr),
    /// Two or more irreconcilable types, in canonical order.
    ///
    /// Not an error: the caller needs more hints or emits a diagnostic.
    Ambiguous(Vec<TypeExpr>),
}

impl ResolvedType {
    #[inline]
    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolvedType::Resolved(_))
    }

    pub fn as_resolved(&self) -> Option<&TypeExpr> {
        match self {
            ResolvedType::Resolved(ty) => Some(ty),
            ResolvedType::Ambiguous(_) => None,
        }
    }

    /// The surviving candidates: one when resolved, several otherwise.
    pub fn candidates(&self) -> &[TypeExpr] {
        match self {
            ResolvedType::Resolved(ty) => std::slice::from_ref(ty),
            ResolvedType::Ambiguous(types) => types,
        }
    }

    pub fn into_candidates(self) -> Vec<TypeExpr> {
        match self {
            ResolvedType::Resolved(ty) => vec![ty],
            ResolvedType::Ambiguous(types) => types,
        }
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedType::Resolved(ty) => write!(f, "{ty}"),
            ResolvedType::Ambiguous(types) => {
                f.write_str("{")?;
                for (i, ty) in types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{ty}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Combine a slot's candidates.
///
/// Returns `None` for an empty candidate list.
pub fn combine(candidates: &[TypeExpr], policy: SlicePolicy) -> Option<ResolvedType> {
    let mut members: BTreeSet<&TypeExpr> = candidates.iter().collect();

    // Any concrete hint beats "anything".
    if members.len() > 1 {
        members.remove(&TypeExpr::any());
    }

    let mut members = members.into_iter();
    let mut current = members.next()?.clone();
    let mut unresolved: BTreeSet<TypeExpr> = BTreeSet::new();

    for next in members {
        if let Some(merged) = unify_pair(&current, next, policy) {
            tracing::trace!(%current, %next, %merged, "unified candidates");
            current = merged;
        } else {
            tracing::trace!(%current, %next, "candidates do not unify");
            unresolved.insert(std::mem::replace(&mut current, next.clone()));
        }
    }
    unresolved.insert(current);

    if unresolved.len() == 1 {
        let ty = unresolved.pop_first()?;
        Some(ResolvedType::Resolved(ty.trim_optional()))
    } else {
        Some(ResolvedType::Ambiguous(unresolved.into_iter().collect()))
    }
}

/// Unify two candidates, or `None` when no rule applies.
pub fn unify_pair(current: &TypeExpr, next: &TypeExpr, policy: SlicePolicy) -> Option<TypeExpr> {
    let cc = current.trim_optional();
    let nn = next.trim_optional();

    // A concrete value anywhere beats the optional qualifier.
    if cc == nn {
        return Some(cc);
    }

    match (cc.is_empty_interface(), nn.is_empty_interface()) {
        (true, true) => return Some(current.clone()),
        (true, false) => return Some(nn),
        (false, true) => return Some(cc),
        (false, false) => {}
    }

    let c_elem = cc.trim_slice();
    let n_elem = nn.trim_slice();

    // Exactly one side is a slice here, since `cc != nn`.
    if c_elem == n_elem {
        return Some(match policy {
            SlicePolicy::DropWrapper => c_elem,
            SlicePolicy::PreserveWrapper if cc.slice_depth() > nn.slice_depth() => cc,
            SlicePolicy::PreserveWrapper => nn,
        });
    }
    if cc.is_slice() && c_elem == nn {
        return Some(pick_slice_side(policy, cc, nn));
    }
    if nn.is_slice() && n_elem == cc {
        return Some(pick_slice_side(policy, nn, cc));
    }

    if cc.is_number_directive() && n_elem.is_numeric() {
        return Some(n_elem);
    }
    if nn.is_number_directive() && c_elem.is_numeric() {
        return Some(c_elem);
    }

    if cc.is_single_directive() {
        return Some(n_elem);
    }
    if nn.is_single_directive() {
        return Some(c_elem);
    }

    if current.is_optional_bool() {
        return Some(next.clone());
    }
    if next.is_optional_bool() {
        return Some(current.clone());
    }

    None
}

fn pick_slice_side(policy: SlicePolicy, slice: TypeExpr, element: TypeExpr) -> TypeExpr {
    match policy {
        SlicePolicy::PreserveWrapper => slice,
        SlicePolicy::DropWrapper => element,
    }
}

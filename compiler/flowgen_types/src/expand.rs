//! Directive expansion.
//!
//! Rewrites a slot's raw hints into the candidate list the combiner
//! works on:
//!
//! | Hint | Becomes |
//! |---|---|
//! | `@from[a]` | the candidates stored for `a` |
//! | `@from[a,b]` | the candidates of `a` and `b`, each made a slice |
//! | `@type[t1,t2]` | `t1`, `t2` |
//! | `[]@single` | `@any` |
//! | `untyped int`, `untyped float` | `@number` |
//! | `untyped string` | `?string` |
//!
//! Everything else is passed through. Only the bare spellings above are
//! rewritten; `?@type[...]` for instance is left alone.

use rustc_hash::FxHashMap;

use crate::{
    ExpansionMode, PossibleTypesTable, ResolveError, SlotName, TypeBase, TypeExpr, UntypedKind,
};

/// Expands the hints of slots in one table.
pub struct Expander<'table> {
    table: &'table PossibleTypesTable,
    mode: ExpansionMode,
    /// Fully expanded slots, filled in fixed-point mode.
    expanded: FxHashMap<SlotName, Vec<TypeExpr>>,
}

impl<'table> Expander<'table> {
    pub fn new(table: &'table PossibleTypesTable, mode: ExpansionMode) -> Self {
        Expander {
            table,
            mode,
            expanded: FxHashMap::default(),
        }
    }

    /// Expand the hints of `slot`.
    ///
    /// An unknown slot expands to nothing.
    pub fn expand_slot(&mut self, slot: &SlotName) -> Result<Vec<TypeExpr>, ResolveError> {
        let mut stack = vec![slot.clone()];
        self.expand_slot_in(slot, &mut stack)
    }

    fn expand_slot_in(
        &mut self,
        slot: &SlotName,
        stack: &mut Vec<SlotName>,
    ) -> Result<Vec<TypeExpr>, ResolveError> {
        if let Some(done) = self.expanded.get(slot) {
            return Ok(done.clone());
        }

        let table = self.table;
        let mut out = Vec::new();
        for hint in table.get(slot.as_str()).unwrap_or_default() {
            self.expand_hint(hint, &mut out, stack)?;
        }

        if self.mode == ExpansionMode::FixedPoint {
            self.expanded.insert(slot.clone(), out.clone());
        }
        Ok(out)
    }

    fn expand_hint(
        &mut self,
        hint: &TypeExpr,
        out: &mut Vec<TypeExpr>,
        stack: &mut Vec<SlotName>,
    ) -> Result<(), ResolveError> {
        if hint.slice_depth() == 1 && !hint.is_optional() && hint.base() == &TypeBase::Single {
            out.push(TypeExpr::any());
            return Ok(());
        }
        if !hint.is_bare() {
            out.push(hint.clone());
            return Ok(());
        }

        match hint.base() {
            TypeBase::From(slots) => {
                let as_slices = slots.len() > 1;
                for slot in slots {
                    for candidate in self.referenced(slot, stack)? {
                        let candidate = if as_slices {
                            candidate.ensure_slice()
                        } else {
                            candidate
                        };
                        out.push(candidate.normalized());
                    }
                }
            }
            TypeBase::TypeList(types) => out.extend(types.iter().cloned()),
            TypeBase::Untyped(UntypedKind::Int | UntypedKind::Float) => {
                out.push(TypeExpr::number());
            }
            TypeBase::Untyped(UntypedKind::String) => {
                out.push(optional_string());
            }
            _ => out.push(hint.clone()),
        }
        Ok(())
    }

    /// Candidates substituted for a `@from` reference to `slot`.
    fn referenced(
        &mut self,
        slot: &SlotName,
        stack: &mut Vec<SlotName>,
    ) -> Result<Vec<TypeExpr>, ResolveError> {
        let Some(raw) = self.table.get(slot.as_str()) else {
            tracing::warn!(%slot, "reference to unknown slot");
            return Ok(Vec::new());
        };

        match self.mode {
            ExpansionMode::SinglePass => Ok(raw.to_vec()),
            ExpansionMode::FixedPoint => {
                if stack.contains(slot) {
                    let mut path = stack.clone();
                    path.push(slot.clone());
                    return Err(ResolveError::ReferenceCycle { path });
                }
                stack.push(slot.clone());
                let expanded = self.expand_slot_in(slot, stack);
                stack.pop();
                expanded
            }
        }
    }
}

/// An untyped string literal may also stand for an absent value.
fn optional_string() -> TypeExpr {
    TypeExpr::from(TypeBase::Named("string".to_owned())).into_optional()
}

//! Resolution pipeline: expand every slot's hints, then combine them.

use crate::{
    combine, Expander, PossibleTypesTable, ResolveError, ResolveOptions, ResolvedTable,
    ResolvedType,
};

/// Resolve every slot of `table`.
///
/// The result has exactly the slots of `table`. Ambiguous slots are part
/// of the result; an error means a slot could not be combined at all.
#[tracing::instrument(level = "debug", skip_all, fields(slots = table.len()))]
pub fn resolve_types(
    table: &PossibleTypesTable,
    options: &ResolveOptions,
) -> Result<ResolvedTable, ResolveError> {
    let mut expander = Expander::new(table, options.expansion);
    let mut resolved = ResolvedTable::default();

    for slot in table.slot_names() {
        let candidates = expander.expand_slot(slot)?;
        let Some(result) = combine(&candidates, options.slice_policy) else {
            return Err(ResolveError::EmptySlot { slot: slot.clone() });
        };
        if let ResolvedType::Ambiguous(_) = &result {
            tracing::debug!(%slot, %result, "slot is ambiguous");
        }
        resolved.insert(slot.clone(), result);
    }

    tracing::debug!(
        unresolved = resolved.unresolved_slots().count(),
        "resolution complete"
    );
    Ok(resolved)
}

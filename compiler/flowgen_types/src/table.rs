//! Slot tables: the analyzer's raw hints and the resolved result.
//!
//! Both tables are keyed by [`SlotName`] in sorted order, so iteration
//! and therefore logging and emitted code are deterministic.

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::{ParseError, ResolvedType, SlotName, TypeExpr};

/// Candidate type hints per slot, as gathered from the edges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PossibleTypesTable {
    slots: BTreeMap<SlotName, Vec<TypeExpr>>,
}

impl PossibleTypesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from textual hints.
    ///
    /// ```text
    /// PossibleTypesTable::parse([("in", &["int", "?int"][..]), ("out", &["@from[in]"][..])])
    /// ```
    pub fn parse<'a, I, S>(entries: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = (&'a str, S)>,
        S: AsRef<[&'a str]>,
    {
        let mut table = Self::new();
        for (slot, hints) in entries {
            let slot = SlotName::new(slot)?;
            let hints = hints
                .as_ref()
                .iter()
                .map(|h| TypeExpr::parse(h))
                .collect::<Result<Vec<_>, _>>()?;
            table.extend_slot(slot, hints);
        }
        Ok(table)
    }

    /// Replace a slot's candidates.
    pub fn insert(&mut self, slot: SlotName, candidates: Vec<TypeExpr>) -> Option<Vec<TypeExpr>> {
        self.slots.insert(slot, candidates)
    }

    /// Add one hint to a slot, creating the slot if needed.
    pub fn push(&mut self, slot: SlotName, candidate: TypeExpr) {
        self.slots.entry(slot).or_default().push(candidate);
    }

    /// Append hints to a slot, creating the slot if needed.
    pub fn extend_slot(&mut self, slot: SlotName, candidates: impl IntoIterator<Item = TypeExpr>) {
        self.slots.entry(slot).or_default().extend(candidates);
    }

    pub fn get(&self, slot: &str) -> Option<&[TypeExpr]> {
        self.slots.get(slot).map(Vec::as_slice)
    }

    pub fn contains(&self, slot: &str) -> bool {
        self.slots.contains_key(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SlotName, &[TypeExpr])> {
        self.slots.iter().map(|(name, c)| (name, c.as_slice()))
    }

    pub fn slot_names(&self) -> impl Iterator<Item = &SlotName> {
        self.slots.keys()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl FromIterator<(SlotName, Vec<TypeExpr>)> for PossibleTypesTable {
    fn from_iter<T: IntoIterator<Item = (SlotName, Vec<TypeExpr>)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (slot, candidates) in iter {
            table.extend_slot(slot, candidates);
        }
        table
    }
}

/// Resolution result per slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedTable {
    slots: BTreeMap<SlotName, ResolvedType>,
}

impl ResolvedTable {
    pub(crate) fn insert(&mut self, slot: SlotName, resolved: ResolvedType) {
        self.slots.insert(slot, resolved);
    }

    pub fn get(&self, slot: &str) -> Option<&ResolvedType> {
        self.slots.get(slot)
    }

    /// The resolved type of a slot, if it has exactly one.
    pub fn resolved(&self, slot: &str) -> Option<&TypeExpr> {
        self.get(slot).and_then(ResolvedType::as_resolved)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, SlotName, ResolvedType> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots the emitter cannot declare yet: ambiguous ones, and ones whose
    /// single survivor is still a directive or optional.
    pub fn unresolved_slots(&self) -> impl Iterator<Item = (&SlotName, &ResolvedType)> {
        self.slots.iter().filter(|(_, resolved)| match resolved {
            ResolvedType::Resolved(ty) => !ty.is_resolved(),
            ResolvedType::Ambiguous(_) => true,
        })
    }

    /// Whether every slot has a single concrete type.
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved_slots().next().is_none()
    }

    /// Turn the results back into hints, e.g. to merge them with hints
    /// from another pass.
    pub fn into_possible_types(self) -> PossibleTypesTable {
        self.slots
            .into_iter()
            .map(|(slot, resolved)| (slot, resolved.into_candidates()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a ResolvedTable {
    type Item = (&'a SlotName, &'a ResolvedType);
    type IntoIter = btree_map::Iter<'a, SlotName, ResolvedType>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

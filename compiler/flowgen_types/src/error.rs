//! Errors for type-expression parsing and slot resolution.
//!
//! Ambiguity is not represented here: an ambiguous slot is a normal
//! [`ResolvedType::Ambiguous`](crate::ResolvedType::Ambiguous) result.

use crate::SlotName;

/// A type hint or slot name that does not match the grammar.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum ParseError {
    /// Blank input.
    #[error("empty type expression")]
    Empty,

    /// Only wrappers, e.g. `?[]`.
    #[error("type expression `{0}` has no base type")]
    MissingBase(String),

    /// A concrete token starting with a wrapper or directive marker.
    #[error("`{0}` is not a valid type token")]
    InvalidToken(String),

    /// `@from[` or `@type[` without the closing bracket.
    #[error("directive `{0}` is missing its closing `]`")]
    Unterminated(String),

    /// `@from[]` or `@type[]`.
    #[error("directive `{0}` needs at least one argument")]
    EmptyArguments(String),

    /// An `@` token that is not a known directive.
    #[error("unknown directive `{0}`")]
    UnknownDirective(String),

    /// Empty, or contains `,`, `[`, `]` or whitespace.
    #[error("invalid slot name `{0}`")]
    InvalidSlotName(String),

    /// More `[]` levels than fit in the slice depth.
    #[error("too many slice levels in `{0}`")]
    SliceTooDeep(String),
}

/// Failure to produce a result table.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum ResolveError {
    /// A slot had no candidates left to combine.
    ///
    /// Happens when a slot is empty in the input, or when all of its
    /// candidates were references to unknown slots.
    #[error("slot `{slot}` has no candidate types")]
    EmptySlot {
        /// The slot left without candidates.
        slot: SlotName,
    },

    /// `@from` references loop back on themselves under fixed-point expansion.
    #[error("reference cycle between slots: {}", format_path(.path))]
    ReferenceCycle {
        /// Slots in reference order, ending with the slot that closes the loop.
        path: Vec<SlotName>,
    },
}

fn format_path(path: &[SlotName]) -> String {
    path.iter()
        .map(SlotName::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

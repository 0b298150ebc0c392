//! Type resolution for flow code generation.
//!
//! Every generically-typed slot of a workflow (a node port or type
//! parameter) collects type hints from the edges touching it. Before
//! wrapper code can be emitted, each slot needs one concrete type.
//!
//! # Pipeline
//!
//! 1. [`Expander`] rewrites directive hints (`@from`, `@type`, untyped
//!    literals) into plain candidates.
//! 2. [`combine`] folds a slot's candidates into the most specific
//!    common type, or reports the irreconcilable remainder as
//!    [`ResolvedType::Ambiguous`].
//!
//! [`resolve_types`] runs both over a whole [`PossibleTypesTable`].
//!
//! # Tracing
//!
//! - `RUST_LOG=flowgen_types=debug`: per-table summaries and ambiguous slots.
//! - `RUST_LOG=flowgen_types=trace`: every pairwise unification step.

mod combine;
mod error;
mod expand;
mod expr;
mod options;
mod resolve;
mod table;

pub use combine::{combine, unify_pair, ResolvedType};
pub use error::{ParseError, ResolveError};
pub use expand::Expander;
pub use expr::{SlotName, TypeBase, TypeExpr, UntypedKind};
pub use options::{ExpansionMode, ResolveOptions, SlicePolicy};
pub use resolve::resolve_types;
pub use table::{PossibleTypesTable, ResolvedTable};

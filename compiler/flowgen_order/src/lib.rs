//! Emission ordering for workflow nodes.
//!
//! Generated code declares nodes in an order where every node comes
//! after the nodes it depends on. Among nodes with no constraint between
//! them, input order is kept, so the same workflow always produces the
//! same source.
//!
//! The direct dependencies come from a [`DependencyIndex`] built by the
//! caller; ordering is transitive over it.

mod error;
mod index;
mod sequence;

pub use error::OrderError;
pub use index::DependencyIndex;
pub use sequence::{sequence, sequence_indices, CyclePolicy, Node, OrderOptions};

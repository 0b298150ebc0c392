//! One generation run: resolve slot types, then order nodes.

use flowgen_order::{sequence, DependencyIndex, Node, OrderOptions};
use flowgen_types::{resolve_types, PossibleTypesTable, ResolveOptions, ResolvedTable};

use crate::GenerateError;

/// Options for a generation run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GenerationOptions {
    /// Options for slot type resolution.
    pub resolve: ResolveOptions,
    /// Options for node ordering.
    pub order: OrderOptions,
}

impl GenerationOptions {
    #[must_use]
    pub fn with_resolve(mut self, resolve: ResolveOptions) -> Self {
        self.resolve = resolve;
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: OrderOptions) -> Self {
        self.order = order;
        self
    }
}

/// Everything the emitter needs: a type per slot, and nodes in
/// declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationPlan<N> {
    /// The resolution result for every slot.
    pub types: ResolvedTable,
    /// Nodes with every dependency before its dependents.
    pub nodes: Vec<N>,
}

impl<N: Node> GenerationPlan<N> {
    /// Node ids in declaration order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(Node::id)
    }

    /// Whether code can be emitted without type diagnostics.
    pub fn is_complete(&self) -> bool {
        self.types.is_fully_resolved()
    }
}

/// Resolve `types` and order `nodes` for one run.
///
/// Ambiguous slots do not fail the run; they show up in
/// [`ResolvedTable::unresolved_slots`] for the caller to report.
#[tracing::instrument(level = "debug", skip_all, fields(slots = types.len(), nodes = nodes.len()))]
pub fn plan<N: Node>(
    types: &PossibleTypesTable,
    nodes: Vec<N>,
    deps: &DependencyIndex,
    options: &GenerationOptions,
) -> Result<GenerationPlan<N>, GenerateError> {
    let types = resolve_types(types, &options.resolve)?;
    let nodes = sequence(nodes, deps, options.order)?;

    for (slot, resolved) in types.unresolved_slots() {
        tracing::debug!(%slot, %resolved, "slot left unresolved");
    }

    Ok(GenerationPlan { types, nodes })
}

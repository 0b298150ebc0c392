//! Stable topological ordering.
//!
//! Kahn's algorithm with a min-heap of ready nodes keyed by input
//! position: at every step the earliest node whose dependencies have
//! all been placed is emitted next. This gives:
//!
//! - every dependency precedes every dependent, transitively;
//! - nodes that are never constrained keep their relative input order;
//! - O((n + e) log n) time for n nodes and e edges.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{DependencyIndex, OrderError};

/// Anything with a stable identifier.
pub trait Node {
    fn id(&self) -> &str;
}

impl Node for str {
    fn id(&self) -> &str {
        self
    }
}

impl Node for String {
    fn id(&self) -> &str {
        self
    }
}

impl<T: Node + ?Sized> Node for &T {
    fn id(&self) -> &str {
        (**self).id()
    }
}

/// What to do with nodes caught in a dependency cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CyclePolicy {
    /// Fail with [`OrderError::Cycle`].
    #[default]
    Fail,
    /// Place the unorderable nodes last, in input order.
    AppendRemaining,
}

/// Options for [`sequence`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct OrderOptions {
    /// Handling of nodes that sit on or behind a dependency cycle.
    pub on_cycle: CyclePolicy,
}

/// Order `nodes` for emission.
pub fn sequence<N: Node>(
    nodes: Vec<N>,
    index: &DependencyIndex,
    options: OrderOptions,
) -> Result<Vec<N>, OrderError> {
    let order = sequence_indices(&nodes, index, options)?;
    let mut slots: Vec<Option<N>> = nodes.into_iter().map(Some).collect();
    Ok(order.into_iter().filter_map(|i| slots[i].take()).collect())
}

/// Order `nodes` for emission, as positions into `nodes`.
///
/// Dependencies on ids that are not in `nodes` are ignored.
#[tracing::instrument(level = "debug", skip_all, fields(nodes = nodes.len()))]
pub fn sequence_indices<N: Node>(
    nodes: &[N],
    index: &DependencyIndex,
    options: OrderOptions,
) -> Result<Vec<usize>, OrderError> {
    let mut position: FxHashMap<&str, usize> = FxHashMap::default();
    for (i, node) in nodes.iter().enumerate() {
        if position.insert(node.id(), i).is_some() {
            return Err(OrderError::DuplicateNode {
                id: node.id().to_owned(),
            });
        }
    }

    // Number of unplaced dependencies per node, and the reverse edges.
    let mut pending = vec![0usize; nodes.len()];
    let mut dependents: Vec<SmallVec<[usize; 4]>> = vec![SmallVec::new(); nodes.len()];
    for (i, node) in nodes.iter().enumerate() {
        for dep in index.dependencies_of(node.id()) {
            if let Some(&d) = position.get(dep) {
                pending[i] += 1;
                dependents[d].push(i);
            } else {
                tracing::debug!(node = node.id(), dep, "ignoring dependency outside node list");
            }
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = pending
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count == 0)
        .map(|(i, _)| Reverse(i))
        .collect();

    let mut order = Vec::with_capacity(nodes.len());
    while let Some(Reverse(i)) = ready.pop() {
        order.push(i);
        for &j in &dependents[i] {
            pending[j] -= 1;
            if pending[j] == 0 {
                ready.push(Reverse(j));
            }
        }
    }

    if order.len() < nodes.len() {
        let unordered: Vec<usize> = (0..nodes.len()).filter(|&i| pending[i] > 0).collect();
        match options.on_cycle {
            CyclePolicy::Fail => {
                return Err(OrderError::Cycle {
                    unordered: unordered
                        .into_iter()
                        .map(|i| nodes[i].id().to_owned())
                        .collect(),
                });
            }
            CyclePolicy::AppendRemaining => {
                tracing::warn!(
                    count = unordered.len(),
                    "dependency cycle; appending unordered nodes in input order"
                );
                order.extend(unordered);
            }
        }
    }

    Ok(order)
}

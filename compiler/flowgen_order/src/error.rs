//! Ordering errors.

/// Failure to order a node list.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum OrderError {
    /// Two nodes share an identifier.
    #[error("duplicate node id `{id}`")]
    DuplicateNode {
        /// The repeated identifier.
        id: String,
    },

    /// The dependencies contain a cycle.
    ///
    /// `unordered` lists, in input order, every node that could not be
    /// placed: the cycle members and everything depending on them.
    #[error("dependency cycle among nodes: {}", .unordered.join(", "))]
    Cycle {
        /// Ids of the nodes left unplaced.
        unordered: Vec<String>,
    },
}

use flowgen_order::OrderError;
use flowgen_types::ResolveError;

/// Failure to plan a generation run.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum GenerateError {
    /// Slot types could not be resolved.
    #[error("type resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    /// Nodes could not be ordered.
    #[error("node ordering failed: {0}")]
    Order(#[from] OrderError),
}

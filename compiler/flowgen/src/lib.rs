//! Flow code generation planning.
//!
//! Ties the two engines together for one generation run:
//!
//! - [`flowgen_types`] resolves every generic slot to a concrete type;
//! - [`flowgen_order`] orders nodes so dependencies are declared first.
//!
//! [`plan`] runs both and returns a [`GenerationPlan`] the emitter walks.

mod error;
mod plan;

pub use error::GenerateError;
pub use plan::{plan, GenerationOptions, GenerationPlan};

pub use flowgen_order::{
    sequence, sequence_indices, CyclePolicy, DependencyIndex, Node, OrderError, OrderOptions,
};
pub use flowgen_types::{
    resolve_types, ExpansionMode, ParseError, PossibleTypesTable, ResolveError, ResolveOptions,
    ResolvedTable, ResolvedType, SlicePolicy, SlotName, TypeExpr,
};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Log filter for the flowgen crates only.
const LOG_ENV: &str = "FLOWGEN_LOG";

const LOG_TARGETS: [&str; 3] = ["flowgen", "flowgen_types", "flowgen_order"];

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Reads `FLOWGEN_LOG` first: a bare level
/// such as `FLOWGEN_LOG=trace` applies to the flowgen crates only, full
/// directives are used as given. Falls back to `RUST_LOG`. Does nothing
/// when neither is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let flowgen_log = std::env::var(LOG_ENV).ok();
        let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let Some(directives) = filter_directives(flowgen_log.as_deref(), rust_log.as_deref())
        else {
            return;
        };

        tracing_subscriber::registry()
            .with(fmt::layer().without_time().with_writer(std::io::stderr))
            .with(EnvFilter::builder().parse_lossy(directives))
            .init();
    });
}

fn filter_directives(flowgen_log: Option<&str>, rust_log: Option<&str>) -> Option<String> {
    match flowgen_log.map(str::trim).filter(|v| !v.is_empty()) {
        Some(level) if level.parse::<tracing::Level>().is_ok() => Some(
            LOG_TARGETS
                .iter()
                .map(|target| format!("{target}={level}"))
                .collect::<Vec<_>>()
                .join(","),
        ),
        Some(directives) => Some(directives.to_owned()),
        None => rust_log.map(str::to_owned),
    }
}

#[cfg(test)]
mod tests {
    use super::filter_directives;
    use pretty_assertions::assert_eq;

    #[test]
    fn bare_level_is_scoped_to_flowgen_crates() {
        assert_eq!(
            filter_directives(Some("debug"), Some("trace")).as_deref(),
            Some("flowgen=debug,flowgen_types=debug,flowgen_order=debug")
        );
    }

    #[test]
    fn full_directives_pass_through() {
        assert_eq!(
            filter_directives(Some("flowgen_order=trace"), None).as_deref(),
            Some("flowgen_order=trace")
        );
    }

    #[test]
    fn falls_back_to_rust_log() {
        assert_eq!(
            filter_directives(Some("  "), Some("info")).as_deref(),
            Some("info")
        );
        assert_eq!(filter_directives(None, None), None);
    }
}

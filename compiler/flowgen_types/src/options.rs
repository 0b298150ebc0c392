//! Resolution options.

/// How `@from[...]` references are expanded.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExpansionMode {
    /// Substitute the raw candidates stored for the referenced slots.
    ///
    /// Directives inside the substituted candidates (including further
    /// `@from` references) are left as they are.
    #[default]
    SinglePass,
    /// Expand referenced slots recursively until no `@from` remains.
    ///
    /// Reference cycles are reported as
    /// [`ResolveError::ReferenceCycle`](crate::ResolveError::ReferenceCycle).
    FixedPoint,
}

/// What slice narrowing keeps when a slice meets its own element type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SlicePolicy {
    /// `{[]T, T}` resolves to `[]T`.
    #[default]
    PreserveWrapper,
    /// `{[]T, T}` resolves to `T`; the emitter is expected to know the
    /// slot is collection-typed from other metadata.
    DropWrapper,
}

/// Options for [`resolve_types`](crate::resolve_types).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ResolveOptions {
    /// How `@from` references are expanded.
    pub expansion: ExpansionMode,
    /// What slice narrowing keeps.
    pub slice_policy: SlicePolicy,
}

impl ResolveOptions {
    /// Legacy behavior: one expansion pass, and
    /// slice narrowing drops the outer slice.
    pub fn legacy() -> Self {
        ResolveOptions {
            expansion: ExpansionMode::SinglePass,
            slice_policy: SlicePolicy::DropWrapper,
        }
    }

    #[must_use]
    pub fn with_expansion(mut self, expansion: ExpansionMode) -> Self {
        self.expansion = expansion;
        self
    }

    #[must_use]
    pub fn with_slice_policy(mut self, slice_policy: SlicePolicy) -> Self {
        self.slice_policy = slice_policy;
        self
    }
}

//! Direct dependencies between nodes.

use rustc_hash::{FxHashMap, FxHashSet};

/// Node id -> ids of the nodes it directly depends on.
///
/// A node without an entry has no dependencies.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencyIndex {
    deps: FxHashMap<String, FxHashSet<String>>,
}

impl DependencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `dependent` directly depends on `dependency`.
    pub fn add_dependency(&mut self, dependent: impl Into<String>, dependency: impl Into<String>) {
        self.deps
            .entry(dependent.into())
            .or_default()
            .insert(dependency.into());
    }

    /// Direct dependencies of `id`, in no particular order.
    pub fn dependencies_of<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.deps
            .get(id)
            .into_iter()
            .flat_map(|deps| deps.iter().map(String::as_str))
    }

    /// Whether `dependent` directly depends on `dependency`.
    pub fn depends_on(&self, dependent: &str, dependency: &str) -> bool {
        self.deps
            .get(dependent)
            .is_some_and(|deps| deps.contains(dependency))
    }

    /// Number of nodes with at least one recorded dependency.
    pub fn len(&self) -> usize {
        self.deps.values().filter(|deps| !deps.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, D, I> FromIterator<(K, I)> for DependencyIndex
where
    K: Into<String>,
    D: Into<String>,
    I: IntoIterator<Item = D>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut index = Self::new();
        for (dependent, deps) in iter {
            let entry = index.deps.entry(dependent.into()).or_default();
            entry.extend(deps.into_iter().map(Into::into));
        }
        index
    }
}

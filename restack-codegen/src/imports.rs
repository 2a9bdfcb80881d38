//! Import collection.

use indexmap::IndexSet;

/// Tracks imported packages and deduplicates them.
///
/// Keeps insertion order; [`sorted`](Self::sorted) gives the canonical
/// ordering for syntaxes that sort their imports.
///
/// # Example
///
/// ```
/// use restack_codegen::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("time");
/// imports.add("context");
/// imports.add("time");
///
/// assert_eq!(imports.sorted(), ["context", "time"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    paths: IndexSet<String>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an import path. Adding it again is a no-op.
    pub fn add(&mut self, path: &str) {
        if !self.paths.contains(path) {
            self.paths.insert(path.to_string());
        }
    }

    /// Iterate over all imports in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Imports ordered by path.
    pub fn sorted(&self) -> Vec<&str> {
        let mut paths: Vec<_> = self.iter().collect();
        paths.sort_unstable();
        paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }
}

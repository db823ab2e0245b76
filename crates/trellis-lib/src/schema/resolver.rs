//! Include resolution: the seam between the core and file I/O.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::element::FileElement;

/// An include resolved to a concrete file.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedInclude {
    /// Canonical path. Two includes resolving to the same path share one
    /// file in the schema.
    pub path: String,
    pub element: FileElement,
}

impl ResolvedInclude {
    pub fn new(path: impl Into<String>, element: FileElement) -> Self {
        Self {
            path: path.into(),
            element,
        }
    }
}

/// Supplies parsed element trees for include directives.
///
/// Called at most once per distinct `(from, include)` pair of a build.
pub trait IncludeResolver {
    /// Resolve `include` as written in the file at path `from`.
    fn resolve(&mut self, from: &str, include: &str) -> Option<ResolvedInclude>;
}

/// Keyed by include string; the key doubles as the canonical path.
impl IncludeResolver for HashMap<String, FileElement> {
    fn resolve(&mut self, _from: &str, include: &str) -> Option<ResolvedInclude> {
        let element = self.get(include)?;
        Some(ResolvedInclude::new(include, element.clone()))
    }
}

/// Keyed by include string; the key doubles as the canonical path.
impl IncludeResolver for IndexMap<String, FileElement> {
    fn resolve(&mut self, _from: &str, include: &str) -> Option<ResolvedInclude> {
        let element = self.get(include)?;
        Some(ResolvedInclude::new(include, element.clone()))
    }
}

impl<F> IncludeResolver for F
where
    F: FnMut(&str, &str) -> Option<ResolvedInclude>,
{
    fn resolve(&mut self, from: &str, include: &str) -> Option<ResolvedInclude> {
        self(from, include)
    }
}

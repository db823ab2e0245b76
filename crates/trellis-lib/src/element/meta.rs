//! Attributes shared by every named declaration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Location;

/// Annotation key that marks a declaration as deprecated.
pub const DEPRECATED_ANNOTATION: &str = "deprecated";

/// Documentation tag that marks a declaration as deprecated.
pub const DEPRECATED_DOC_TAG: &str = "@deprecated";

/// Name, position, documentation, and annotations of a declaration.
///
/// Embedded in every element and in every linked model type, so all of them
/// answer the same questions through [`UserElement`]. Equality ignores the
/// location.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ElementMeta {
    pub name: String,
    pub location: Location,
    #[serde(default)]
    pub documentation: String,
    #[serde(default)]
    pub annotations: IndexMap<String, String>,
}

impl ElementMeta {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
            documentation: String::new(),
            annotations: IndexMap::new(),
        }
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }
}

impl PartialEq for ElementMeta {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.documentation == other.documentation
            && self.annotations == other.annotations
    }
}

impl Eq for ElementMeta {}

/// Uniform read access to [`ElementMeta`].
pub trait UserElement {
    fn meta(&self) -> &ElementMeta;

    fn name(&self) -> &str {
        &self.meta().name
    }

    fn location(&self) -> &Location {
        &self.meta().location
    }

    fn documentation(&self) -> &str {
        &self.meta().documentation
    }

    fn annotations(&self) -> &IndexMap<String, String> {
        &self.meta().annotations
    }

    fn has_documentation(&self) -> bool {
        !self.meta().documentation.trim().is_empty()
    }

    fn is_deprecated(&self) -> bool {
        let meta = self.meta();
        meta.annotations.contains_key(DEPRECATED_ANNOTATION)
            || meta.documentation.contains(DEPRECATED_DOC_TAG)
    }
}

impl UserElement for ElementMeta {
    fn meta(&self) -> &ElementMeta {
        self
    }
}

/// Implements [`UserElement`] for types with a `meta: ElementMeta` field.
macro_rules! impl_user_element {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::element::UserElement for $ty {
                fn meta(&self) -> &$crate::element::ElementMeta {
                    &self.meta
                }
            }
        )+
    };
}

pub(crate) use impl_user_element;

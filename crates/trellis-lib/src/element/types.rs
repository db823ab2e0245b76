//! Type references as written in the source.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Location;

/// A symbolic type reference.
///
/// `Named` covers both built-in keywords (`i32`, `string`, ...) and user
/// types, optionally qualified with an include prefix (`shared.Foo`).
/// Equality ignores locations.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeElement {
    Named {
        location: Location,
        name: String,
        #[serde(default)]
        annotations: IndexMap<String, String>,
    },
    List {
        location: Location,
        element: Box<TypeElement>,
        #[serde(default)]
        annotations: IndexMap<String, String>,
    },
    Set {
        location: Location,
        element: Box<TypeElement>,
        #[serde(default)]
        annotations: IndexMap<String, String>,
    },
    Map {
        location: Location,
        key: Box<TypeElement>,
        value: Box<TypeElement>,
        #[serde(default)]
        annotations: IndexMap<String, String>,
    },
}

impl TypeElement {
    pub fn named(location: Location, name: impl Into<String>) -> Self {
        Self::Named {
            location,
            name: name.into(),
            annotations: IndexMap::new(),
        }
    }

    pub fn list(location: Location, element: TypeElement) -> Self {
        Self::List {
            location,
            element: Box::new(element),
            annotations: IndexMap::new(),
        }
    }

    pub fn set(location: Location, element: TypeElement) -> Self {
        Self::Set {
            location,
            element: Box::new(element),
            annotations: IndexMap::new(),
        }
    }

    pub fn map(location: Location, key: TypeElement, value: TypeElement) -> Self {
        Self::Map {
            location,
            key: Box::new(key),
            value: Box::new(value),
            annotations: IndexMap::new(),
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            Self::Named { location, .. }
            | Self::List { location, .. }
            | Self::Set { location, .. }
            | Self::Map { location, .. } => location,
        }
    }

    pub fn annotations(&self) -> &IndexMap<String, String> {
        match self {
            Self::Named { annotations, .. }
            | Self::List { annotations, .. }
            | Self::Set { annotations, .. }
            | Self::Map { annotations, .. } => annotations,
        }
    }
}

impl PartialEq for TypeElement {
    fn eq(&self, other: &Self) -> bool {
        if self.annotations() != other.annotations() {
            return false;
        }
        match (self, other) {
            (Self::Named { name: a, .. }, Self::Named { name: b, .. }) => a == b,
            (Self::List { element: a, .. }, Self::List { element: b, .. })
            | (Self::Set { element: a, .. }, Self::Set { element: b, .. }) => a == b,
            (
                Self::Map { key: ka, value: va, .. },
                Self::Map { key: kb, value: vb, .. },
            ) => ka == kb && va == vb,
            _ => false,
        }
    }
}

impl Eq for TypeElement {}

impl std::fmt::Display for TypeElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named { name, .. } => f.write_str(name),
            Self::List { element, .. } => write!(f, "list<{}>", element),
            Self::Set { element, .. } => write!(f, "set<{}>", element),
            Self::Map { key, value, .. } => write!(f, "map<{}, {}>", key, value),
        }
    }
}

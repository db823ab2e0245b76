//! Constant literals as written in the source.

use serde::{Deserialize, Serialize};

use crate::Location;

/// A literal value together with its position. Equality ignores the
/// position.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConstValueElement {
    pub location: Location,
    pub value: ConstValueKind,
}

impl PartialEq for ConstValueElement {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// Literal kinds the grammar can produce.
///
/// `Identifier` is unresolved: it may name a constant, an enum member, or
/// one of the words `true`/`false`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ConstValueKind {
    Integer(i64),
    Double(f64),
    String(String),
    Identifier(String),
    List(Vec<ConstValueElement>),
    Map(Vec<(ConstValueElement, ConstValueElement)>),
}

impl ConstValueElement {
    pub fn new(location: Location, value: ConstValueKind) -> Self {
        Self { location, value }
    }

    pub fn integer(location: Location, value: i64) -> Self {
        Self::new(location, ConstValueKind::Integer(value))
    }

    pub fn double(location: Location, value: f64) -> Self {
        Self::new(location, ConstValueKind::Double(value))
    }

    pub fn string(location: Location, value: impl Into<String>) -> Self {
        Self::new(location, ConstValueKind::String(value.into()))
    }

    pub fn identifier(location: Location, value: impl Into<String>) -> Self {
        Self::new(location, ConstValueKind::Identifier(value.into()))
    }

    pub fn list(location: Location, items: Vec<ConstValueElement>) -> Self {
        Self::new(location, ConstValueKind::List(items))
    }

    pub fn map(location: Location, entries: Vec<(ConstValueElement, ConstValueElement)>) -> Self {
        Self::new(location, ConstValueKind::Map(entries))
    }
}

impl ConstValueKind {
    /// Short description used in mismatch messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Integer(_) => "an integer",
            Self::Double(_) => "a double",
            Self::String(_) => "a string",
            Self::Identifier(_) => "an identifier",
            Self::List(_) => "a list",
            Self::Map(_) => "a map",
        }
    }
}

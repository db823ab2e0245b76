//! Source positions attached to every element and diagnostic.

use serde::{Deserialize, Serialize};

/// A position inside an IDL file.
///
/// Lines and columns are 1-based. Ordering is by path, then line, then
/// column, which is the order diagnostics are presented in.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    #[serde(default = "first")]
    pub line: u32,
    #[serde(default = "first")]
    pub column: u32,
}

fn first() -> u32 {
    1
}

impl Location {
    pub fn new(path: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            path: path.into(),
            line,
            column,
        }
    }

    /// Location pointing at the start of a file.
    pub fn file(path: impl Into<String>) -> Self {
        Self::new(path, 1, 1)
    }

    /// Same file, different position.
    pub fn at(&self, line: u32, column: u32) -> Self {
        Self::new(self.path.clone(), line, column)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.column)
    }
}

//! Trellis: semantic core of an IDL compiler.
//!
//! Takes parsed element trees for a set of IDL files and links them into a
//! single resolved, validated [`Schema`]: every type reference points at a
//! node in the [`TypeGraph`](types::TypeGraph), every constant is type
//! checked, and every semantic rule the grammar cannot express has run.
//!
//! # Example
//!
//! ```
//! use trellis_lib::element::{ElementMeta, FieldElement, FileElement, StructElement, StructKind, TypeElement};
//! use trellis_lib::{Location, Schema};
//!
//! let at = Location::file("user.thrift");
//! let mut file = FileElement::new("user.thrift");
//! file.structs.push(StructElement::new(
//!     ElementMeta::new("User", at.at(1, 8)),
//!     StructKind::Struct,
//!     vec![FieldElement::new(
//!         ElementMeta::new("name", at.at(2, 13)),
//!         1,
//!         TypeElement::named(at.at(2, 6), "string"),
//!     )],
//! ));
//!
//! let schema = Schema::builder().file(file).build().expect("valid schema");
//! assert_eq!(schema.structs().count(), 1);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod diagnostics;
pub mod element;
pub mod model;
pub mod schema;
pub mod types;
pub mod validate;

mod location;

#[cfg(test)]
mod test_utils;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use location::Location;
pub use schema::{IncludeResolver, Schema, SchemaBuilder};

/// Errors that can occur while building a schema.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Linking or validation reported at least one error (or, in strict
    /// mode, a warning). Carries every diagnostic, sorted by location.
    #[error(
        "schema linking failed with {} errors and {} warnings",
        .0.error_count(),
        .0.warning_count()
    )]
    InvalidSchema(Diagnostics),
}

impl Error {
    pub fn diagnostics(&self) -> &Diagnostics {
        match self {
            Self::InvalidSchema(diagnostics) => diagnostics,
        }
    }
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, Error>;

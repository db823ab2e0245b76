//! Raw element trees: the parser's output and this crate's input.
//!
//! Elements are immutable values. Each declaration embeds an
//! [`ElementMeta`]; the [`UserElement`] trait gives uniform access to it.
//! All element types are serde-serializable so trees can be exchanged as
//! JSON.

mod decls;
mod meta;
mod types;
mod values;

#[cfg(test)]
mod element_tests;

pub use decls::{
    ConstElement, EnumElement, EnumMemberElement, FieldElement, FileElement, FunctionElement,
    IncludeElement, NamespaceElement, Requiredness, ServiceElement, StructElement, StructKind,
    TypedefElement, file_prefix,
};
pub use meta::{DEPRECATED_ANNOTATION, DEPRECATED_DOC_TAG, ElementMeta, UserElement};
pub(crate) use meta::impl_user_element;
pub use types::TypeElement;
pub use values::{ConstValueElement, ConstValueKind};

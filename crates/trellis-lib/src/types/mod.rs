//! The type graph: every type a schema can mention.
//!
//! Built-in and parametrized types are interned by shape, so equal shapes
//! share one [`TypeId`]. Named user types are interned by identity: each
//! declaration gets its own node regardless of what it looks like.

mod builtin;
mod graph;


pub use builtin::BuiltinType;
pub use graph::{
    GraphError, QualifiedName, TYPE_BINARY, TYPE_BOOL, TYPE_BYTE, TYPE_DOUBLE, TYPE_I8, TYPE_I16,
    TYPE_I32, TYPE_I64, TYPE_INVALID, TYPE_STRING, TYPE_VOID, TypeGraph, TypeId, TypeShape,
    UserType, UserTypeId, UserTypeKind,
};

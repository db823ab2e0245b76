//! Linked declarations.
//!
//! The model mirrors the element trees with every symbolic reference
//! replaced by a [`TypeId`](crate::types::TypeId) or a resolved
//! [`ConstValue`]. Model values are built once by the linker and never
//! mutated afterwards.

mod decls;
mod value;

pub use decls::{
    Constant, EnumMember, EnumType, Field, ServiceMethod, ServiceType, StructType, TypedefType,
};
pub use value::ConstValue;

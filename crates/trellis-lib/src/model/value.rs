use crate::types::TypeId;

/// A type-checked constant value.
///
/// References to other constants are inlined, so a `ConstValue` never
/// points at another declaration except through an enum member.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstValue {
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
    EnumMember {
        enum_type: TypeId,
        name: String,
        value: i32,
    },
    /// Elements of a list or set literal.
    List(Vec<ConstValue>),
    Map(Vec<(ConstValue, ConstValue)>),
    /// Struct literal, fields in source order.
    Struct(Vec<(String, ConstValue)>),
}

impl ConstValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::EnumMember { value, .. } => Some((*value).into()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }
}

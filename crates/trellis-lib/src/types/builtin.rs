//! Built-in types.

/// The built-in type keywords.
///
/// Keywords resolve before any symbol lookup and cannot be shadowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinType {
    Bool,
    Byte,
    I8,
    I16,
    I32,
    I64,
    Double,
    String,
    Binary,
    Void,
}

impl BuiltinType {
    pub const ALL: [BuiltinType; 10] = [
        Self::Bool,
        Self::Byte,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::Double,
        Self::String,
        Self::Binary,
        Self::Void,
    ];

    /// Position in [`Self::ALL`]; also the builtin's `TypeId`.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "bool" => Self::Bool,
            "byte" => Self::Byte,
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" => Self::I64,
            "double" => Self::Double,
            "string" => Self::String,
            "binary" => Self::Binary,
            "void" => Self::Void,
            _ => return None,
        })
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Double => "double",
            Self::String => "string",
            Self::Binary => "binary",
            Self::Void => "void",
        }
    }

    /// Inclusive value range for integer types.
    pub fn integer_range(self) -> Option<(i64, i64)> {
        match self {
            Self::Byte | Self::I8 => Some((i8::MIN.into(), i8::MAX.into())),
            Self::I16 => Some((i16::MIN.into(), i16::MAX.into())),
            Self::I32 => Some((i32::MIN.into(), i32::MAX.into())),
            Self::I64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }
}

impl std::fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

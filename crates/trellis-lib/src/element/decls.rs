//! Declaration elements: one per construct the grammar recognises.
//!
//! These are plain values handed over by the parser. Nothing here is
//! resolved; type and constant references are still strings.

use serde::{Deserialize, Serialize};

use super::meta::{ElementMeta, impl_user_element};
use super::types::TypeElement;
use super::values::ConstValueElement;
use crate::Location;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requiredness {
    Required,
    Optional,
    #[default]
    Default,
}

impl std::fmt::Display for Requiredness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => f.write_str("required"),
            Self::Optional => f.write_str("optional"),
            Self::Default => f.write_str("default"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructKind {
    #[default]
    Struct,
    Union,
    Exception,
}

impl std::fmt::Display for StructKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Struct => f.write_str("struct"),
            Self::Union => f.write_str("union"),
            Self::Exception => f.write_str("exception"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldElement {
    #[serde(flatten)]
    pub meta: ElementMeta,
    pub id: i16,
    #[serde(default)]
    pub requiredness: Requiredness,
    #[serde(rename = "type")]
    pub ty: TypeElement,
    #[serde(default)]
    pub default_value: Option<ConstValueElement>,
}

impl FieldElement {
    pub fn new(meta: ElementMeta, id: i16, ty: TypeElement) -> Self {
        Self {
            meta,
            id,
            requiredness: Requiredness::Default,
            ty,
            default_value: None,
        }
    }

    pub fn with_requiredness(mut self, requiredness: Requiredness) -> Self {
        self.requiredness = requiredness;
        self
    }

    pub fn with_default(mut self, value: ConstValueElement) -> Self {
        self.default_value = Some(value);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionElement {
    #[serde(flatten)]
    pub meta: ElementMeta,
    #[serde(default)]
    pub one_way: bool,
    pub return_type: TypeElement,
    #[serde(default)]
    pub params: Vec<FieldElement>,
    #[serde(default)]
    pub exceptions: Vec<FieldElement>,
}

impl FunctionElement {
    pub fn new(meta: ElementMeta, return_type: TypeElement) -> Self {
        Self {
            meta,
            one_way: false,
            return_type,
            params: Vec::new(),
            exceptions: Vec::new(),
        }
    }

    pub fn one_way(mut self) -> Self {
        self.one_way = true;
        self
    }

    pub fn with_param(mut self, param: FieldElement) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_exception(mut self, exception: FieldElement) -> Self {
        self.exceptions.push(exception);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMemberElement {
    #[serde(flatten)]
    pub meta: ElementMeta,
    /// Explicit value; members without one continue from the previous member.
    #[serde(default)]
    pub value: Option<i32>,
}

impl EnumMemberElement {
    pub fn new(meta: ElementMeta, value: Option<i32>) -> Self {
        Self { meta, value }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumElement {
    #[serde(flatten)]
    pub meta: ElementMeta,
    #[serde(default)]
    pub members: Vec<EnumMemberElement>,
}

impl EnumElement {
    pub fn new(meta: ElementMeta, members: Vec<EnumMemberElement>) -> Self {
        Self { meta, members }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StructElement {
    #[serde(flatten)]
    pub meta: ElementMeta,
    #[serde(default)]
    pub kind: StructKind,
    #[serde(default)]
    pub fields: Vec<FieldElement>,
}

impl StructElement {
    pub fn new(meta: ElementMeta, kind: StructKind, fields: Vec<FieldElement>) -> Self {
        Self { meta, kind, fields }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedefElement {
    #[serde(flatten)]
    pub meta: ElementMeta,
    pub old_type: TypeElement,
}

impl TypedefElement {
    pub fn new(meta: ElementMeta, old_type: TypeElement) -> Self {
        Self { meta, old_type }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceElement {
    #[serde(flatten)]
    pub meta: ElementMeta,
    #[serde(default)]
    pub extends: Option<TypeElement>,
    #[serde(default)]
    pub functions: Vec<FunctionElement>,
}

impl ServiceElement {
    pub fn new(meta: ElementMeta, functions: Vec<FunctionElement>) -> Self {
        Self {
            meta,
            extends: None,
            functions,
        }
    }

    pub fn with_extends(mut self, extends: TypeElement) -> Self {
        self.extends = Some(extends);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstElement {
    #[serde(flatten)]
    pub meta: ElementMeta,
    #[serde(rename = "type")]
    pub ty: TypeElement,
    pub value: ConstValueElement,
}

impl ConstElement {
    pub fn new(meta: ElementMeta, ty: TypeElement, value: ConstValueElement) -> Self {
        Self { meta, ty, value }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IncludeElement {
    pub location: Location,
    pub path: String,
}

impl IncludeElement {
    pub fn new(location: Location, path: impl Into<String>) -> Self {
        Self {
            location,
            path: path.into(),
        }
    }

    /// Prefix that qualifies names from the included file.
    ///
    /// The file name up to its first `.`: `include "idl/shared.thrift"`
    /// is referenced as `shared.Foo`.
    pub fn prefix(&self) -> &str {
        file_prefix(&self.path)
    }
}

impl PartialEq for IncludeElement {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for IncludeElement {}

/// File name of `path` up to its first `.`.
pub fn file_prefix(path: &str) -> &str {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    file_name.split('.').next().unwrap_or(file_name)
}

/// A `namespace <scope> <name>` declaration, passed through untouched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NamespaceElement {
    pub location: Location,
    pub scope: String,
    pub namespace: String,
}

impl PartialEq for NamespaceElement {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope && self.namespace == other.namespace
    }
}

impl Eq for NamespaceElement {}

/// Everything the parser produced for one file.
///
/// The location names the file; two trees for the same path with the same
/// declarations are equal wherever those declarations sit.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FileElement {
    pub location: Location,
    #[serde(default)]
    pub namespaces: Vec<NamespaceElement>,
    #[serde(default)]
    pub includes: Vec<IncludeElement>,
    #[serde(default)]
    pub constants: Vec<ConstElement>,
    #[serde(default)]
    pub typedefs: Vec<TypedefElement>,
    #[serde(default)]
    pub enums: Vec<EnumElement>,
    #[serde(default)]
    pub structs: Vec<StructElement>,
    #[serde(default)]
    pub services: Vec<ServiceElement>,
}

impl PartialEq for FileElement {
    fn eq(&self, other: &Self) -> bool {
        self.location.path == other.location.path
            && self.namespaces == other.namespaces
            && self.includes == other.includes
            && self.constants == other.constants
            && self.typedefs == other.typedefs
            && self.enums == other.enums
            && self.structs == other.structs
            && self.services == other.services
    }
}

impl FileElement {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            location: Location::file(path),
            ..Self::default()
        }
    }

    pub fn path(&self) -> &str {
        &self.location.path
    }
}

impl_user_element!(
    FieldElement,
    FunctionElement,
    EnumMemberElement,
    EnumElement,
    StructElement,
    TypedefElement,
    ServiceElement,
    ConstElement,
);

use crate::element::{ElementMeta, Requiredness, StructKind, impl_user_element};
use crate::schema::FileId;
use crate::types::TypeId;

use super::ConstValue;

/// A struct field, method parameter, or declared exception.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub(crate) meta: ElementMeta,
    pub(crate) id: i16,
    pub(crate) requiredness: Requiredness,
    pub(crate) ty: TypeId,
    pub(crate) default_value: Option<ConstValue>,
}

impl Field {
    pub fn id(&self) -> i16 {
        self.id
    }

    pub fn requiredness(&self) -> Requiredness {
        self.requiredness
    }

    pub fn is_required(&self) -> bool {
        self.requiredness == Requiredness::Required
    }

    pub fn ty(&self) -> TypeId {
        self.ty
    }

    pub fn default_value(&self) -> Option<&ConstValue> {
        self.default_value.as_ref()
    }
}

/// A top-level constant.
#[derive(Clone, Debug, PartialEq)]
pub struct Constant {
    pub(crate) meta: ElementMeta,
    pub(crate) file: FileId,
    pub(crate) ty: TypeId,
    pub(crate) value: ConstValue,
}

impl Constant {
    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn ty(&self) -> TypeId {
        self.ty
    }

    pub fn value(&self) -> &ConstValue {
        &self.value
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedefType {
    pub(crate) meta: ElementMeta,
    pub(crate) file: FileId,
    pub(crate) type_id: TypeId,
    pub(crate) old_type: TypeId,
}

impl TypedefType {
    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The aliased type, which may itself be a typedef.
    pub fn old_type(&self) -> TypeId {
        self.old_type
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumMember {
    pub(crate) meta: ElementMeta,
    pub(crate) value: i32,
}

impl EnumMember {
    /// Effective value: explicit, or one past the previous member.
    pub fn value(&self) -> i32 {
        self.value
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumType {
    pub(crate) meta: ElementMeta,
    pub(crate) file: FileId,
    pub(crate) type_id: TypeId,
    pub(crate) members: Vec<EnumMember>,
}

impl EnumType {
    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.meta.name == name)
    }

    pub fn member_by_value(&self, value: i32) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.value == value)
    }
}

/// A struct, union, or exception.
#[derive(Clone, Debug, PartialEq)]
pub struct StructType {
    pub(crate) meta: ElementMeta,
    pub(crate) file: FileId,
    pub(crate) type_id: TypeId,
    pub(crate) kind: StructKind,
    pub(crate) fields: Vec<Field>,
}

impl StructType {
    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn kind(&self) -> StructKind {
        self.kind
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.meta.name == name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServiceMethod {
    pub(crate) meta: ElementMeta,
    pub(crate) one_way: bool,
    pub(crate) return_type: TypeId,
    pub(crate) parameters: Vec<Field>,
    pub(crate) exceptions: Vec<Field>,
}

impl ServiceMethod {
    pub fn one_way(&self) -> bool {
        self.one_way
    }

    pub fn return_type(&self) -> TypeId {
        self.return_type
    }

    pub fn parameters(&self) -> &[Field] {
        &self.parameters
    }

    pub fn exceptions(&self) -> &[Field] {
        &self.exceptions
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServiceType {
    pub(crate) meta: ElementMeta,
    pub(crate) file: FileId,
    pub(crate) type_id: TypeId,
    /// Base service. A relation only; the base is owned by the schema.
    pub(crate) extends: Option<TypeId>,
    pub(crate) methods: Vec<ServiceMethod>,
}

impl ServiceType {
    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn extends(&self) -> Option<TypeId> {
        self.extends
    }

    pub fn methods(&self) -> &[ServiceMethod] {
        &self.methods
    }

    pub fn method(&self, name: &str) -> Option<&ServiceMethod> {
        self.methods.iter().find(|m| m.meta.name == name)
    }
}

impl_user_element!(
    Field,
    Constant,
    TypedefType,
    EnumMember,
    EnumType,
    StructType,
    ServiceMethod,
    ServiceType,
);

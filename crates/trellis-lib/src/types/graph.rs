//! TypeGraph: interned type shapes plus the registry of named user types.
//!
//! Every type is addressed by a [`TypeId`]. Shapes are interned, so two
//! requests for `list<i32>` return the same id and structural equality of
//! parametrized types reduces to id equality. A user type's shape is just a
//! pointer to its registry entry, which gives named types identity
//! semantics: two structs with identical fields are still distinct types.
//!
//! User entries are created unresolved by [`TypeGraph::declare`] and flipped
//! to resolved by the linker once their references are linked.

use std::collections::{HashMap, HashSet};

use super::BuiltinType;
use crate::Location;
use crate::element::StructKind;
use crate::schema::FileId;

/// Handle to an interned type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

pub const TYPE_BOOL: TypeId = TypeId(0);
pub const TYPE_BYTE: TypeId = TypeId(1);
pub const TYPE_I8: TypeId = TypeId(2);
pub const TYPE_I16: TypeId = TypeId(3);
pub const TYPE_I32: TypeId = TypeId(4);
pub const TYPE_I64: TypeId = TypeId(5);
pub const TYPE_DOUBLE: TypeId = TypeId(6);
pub const TYPE_STRING: TypeId = TypeId(7);
pub const TYPE_BINARY: TypeId = TypeId(8);
pub const TYPE_VOID: TypeId = TypeId(9);
/// Placeholder for references that failed to link.
pub const TYPE_INVALID: TypeId = TypeId(10);

/// Index into the user type registry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct UserTypeId(u32);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TypeShape {
    Builtin(BuiltinType),
    List(TypeId),
    Set(TypeId),
    Map { key: TypeId, value: TypeId },
    User(UserTypeId),
    /// A reference that did not resolve. Checks treat it as compatible with
    /// everything so one bad name does not cascade into more diagnostics.
    Invalid,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum UserTypeKind {
    Typedef,
    Enum,
    Struct(StructKind),
    Service,
}

impl std::fmt::Display for UserTypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Typedef => f.write_str("typedef"),
            Self::Enum => f.write_str("enum"),
            Self::Struct(kind) => write!(f, "{}", kind),
            Self::Service => f.write_str("service"),
        }
    }
}

/// Globally unique name of a user type.
///
/// Identity is the declaring file plus the declared name; the prefix only
/// affects how the name is displayed.
#[derive(Clone, Debug)]
pub struct QualifiedName {
    file: FileId,
    prefix: String,
    name: String,
}

impl QualifiedName {
    pub fn new(file: FileId, prefix: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            file,
            prefix: prefix.into(),
            name: name.into(),
        }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for QualifiedName {
    fn eq(&self, other: &Self) -> bool {
        self.file == other.file && self.name == other.name
    }
}

impl Eq for QualifiedName {}

impl std::hash::Hash for QualifiedName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.file.hash(state);
        self.name.hash(state);
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.prefix.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}.{}", self.prefix, self.name)
        }
    }
}

/// Registry entry for a named user type.
#[derive(Clone, Debug)]
pub struct UserType {
    name: QualifiedName,
    kind: UserTypeKind,
    location: Location,
    deprecated: bool,
    type_id: TypeId,
    /// Target of a typedef, set during linking.
    alias: Option<TypeId>,
    resolved: bool,
}

impl UserType {
    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    pub fn kind(&self) -> UserTypeKind {
        self.kind
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn alias(&self) -> Option<TypeId> {
        self.alias
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }
}

/// Programmer errors from the graph API.
///
/// User mistakes are reported as diagnostics; these only surface when a
/// caller breaks the declare/link/resolve protocol.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("`{name}` is already declared")]
    DuplicateSymbol { name: String, existing: TypeId },

    #[error("`{0}` has not been linked yet")]
    UnresolvedType(String),
}

/// Central registry for every type of one schema build.
#[derive(Clone, Debug)]
pub struct TypeGraph {
    shapes: Vec<TypeShape>,
    shape_ids: HashMap<TypeShape, TypeId>,
    user_types: Vec<UserType>,
    by_name: HashMap<QualifiedName, TypeId>,
}

impl Default for TypeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeGraph {
    pub fn new() -> Self {
        let mut graph = Self {
            shapes: Vec::new(),
            shape_ids: HashMap::new(),
            user_types: Vec::new(),
            by_name: HashMap::new(),
        };

        // Pre-register builtins at their fixed ids
        for builtin in BuiltinType::ALL {
            let id = graph.intern(TypeShape::Builtin(builtin));
            debug_assert_eq!(id, graph.builtin(builtin));
        }
        let invalid = graph.intern(TypeShape::Invalid);
        debug_assert_eq!(invalid, TYPE_INVALID);

        graph
    }

    pub fn builtin(&self, builtin: BuiltinType) -> TypeId {
        TypeId(builtin.index() as u32)
    }

    /// Intern a shape, returning its id. Identical shapes share one id.
    pub fn intern(&mut self, shape: TypeShape) -> TypeId {
        if let Some(&id) = self.shape_ids.get(&shape) {
            return id;
        }

        let id = TypeId(self.shapes.len() as u32);
        self.shapes.push(shape);
        self.shape_ids.insert(shape, id);
        id
    }

    pub fn list(&mut self, element: TypeId) -> TypeId {
        self.intern(TypeShape::List(element))
    }

    pub fn set(&mut self, element: TypeId) -> TypeId {
        self.intern(TypeShape::Set(element))
    }

    pub fn map(&mut self, key: TypeId, value: TypeId) -> TypeId {
        self.intern(TypeShape::Map { key, value })
    }

    /// Create the skeleton entry for a named type.
    ///
    /// The entry starts unresolved; [`TypeGraph::resolve`] refuses it until
    /// the linker calls [`TypeGraph::mark_resolved`].
    pub fn declare(
        &mut self,
        name: QualifiedName,
        kind: UserTypeKind,
        location: Location,
        deprecated: bool,
    ) -> Result<TypeId, GraphError> {
        if let Some(&existing) = self.by_name.get(&name) {
            return Err(GraphError::DuplicateSymbol {
                name: name.to_string(),
                existing,
            });
        }

        let user = UserTypeId(self.user_types.len() as u32);
        let type_id = self.intern(TypeShape::User(user));
        self.by_name.insert(name.clone(), type_id);
        self.user_types.push(UserType {
            name,
            kind,
            location,
            deprecated,
            type_id,
            alias: None,
            resolved: false,
        });
        Ok(type_id)
    }

    /// Find a user type by declaring file and name.
    pub fn lookup(&self, file: FileId, name: &str) -> Option<TypeId> {
        self.by_name
            .get(&QualifiedName::new(file, "", name))
            .copied()
    }

    /// Record the target of a typedef.
    pub fn set_alias(&mut self, typedef: TypeId, target: TypeId) {
        if let Some(entry) = self.user_type_mut(typedef) {
            debug_assert_eq!(entry.kind, UserTypeKind::Typedef);
            entry.alias = Some(target);
        }
    }

    pub fn mark_resolved(&mut self, id: TypeId) {
        if let Some(entry) = self.user_type_mut(id) {
            entry.resolved = true;
        }
    }

    /// Shape of a fully linked type.
    ///
    /// Fails with [`GraphError::UnresolvedType`] if the type, or any type it
    /// is built from, has not been linked yet.
    pub fn resolve(&self, id: TypeId) -> Result<&TypeShape, GraphError> {
        self.check_resolved(id)?;
        Ok(self.shape(id))
    }

    fn check_resolved(&self, id: TypeId) -> Result<(), GraphError> {
        match *self.shape(id) {
            TypeShape::User(_) => match self.user_type(id) {
                Some(entry) if !entry.resolved => {
                    Err(GraphError::UnresolvedType(entry.name.to_string()))
                }
                _ => Ok(()),
            },
            TypeShape::List(element) | TypeShape::Set(element) => self.check_resolved(element),
            TypeShape::Map { key, value } => {
                self.check_resolved(key)?;
                self.check_resolved(value)
            }
            TypeShape::Builtin(_) | TypeShape::Invalid => Ok(()),
        }
    }

    /// Shape of any type, linked or not.
    pub fn shape(&self, id: TypeId) -> &TypeShape {
        &self.shapes[id.index()]
    }

    pub fn user_type(&self, id: TypeId) -> Option<&UserType> {
        match self.shapes.get(id.index())? {
            TypeShape::User(user) => self.user_types.get(user.0 as usize),
            _ => None,
        }
    }

    fn user_type_mut(&mut self, id: TypeId) -> Option<&mut UserType> {
        match self.shapes.get(id.index())? {
            TypeShape::User(user) => self.user_types.get_mut(user.0 as usize),
            _ => None,
        }
    }

    /// User types in declaration order.
    pub fn user_types(&self) -> impl Iterator<Item = &UserType> {
        self.user_types.iter()
    }

    pub fn kind(&self, id: TypeId) -> Option<UserTypeKind> {
        self.user_type(id).map(|entry| entry.kind)
    }

    pub fn builtin_of(&self, id: TypeId) -> Option<BuiltinType> {
        match self.shape(id) {
            TypeShape::Builtin(builtin) => Some(*builtin),
            _ => None,
        }
    }

    /// Follow typedef aliases to the first non-typedef type.
    ///
    /// Returns `None` for a typedef whose target is not linked yet or whose
    /// alias chain loops.
    pub fn true_type(&self, id: TypeId) -> Option<TypeId> {
        let mut current = id;
        for _ in 0..=self.user_types.len() {
            match self.user_type(current) {
                Some(entry) if entry.kind == UserTypeKind::Typedef => current = entry.alias?,
                _ => return Some(current),
            }
        }
        None
    }

    pub fn is_void(&self, id: TypeId) -> bool {
        self.true_type(id) == Some(TYPE_VOID)
    }

    /// True for a failed lookup, and for an alias that never reaches a
    /// concrete type. Both were already reported when linking.
    pub fn is_invalid(&self, id: TypeId) -> bool {
        self.true_type(id).is_none_or(|ty| ty == TYPE_INVALID)
    }

    pub fn is_exception(&self, id: TypeId) -> bool {
        self.true_kind(id) == Some(UserTypeKind::Struct(StructKind::Exception))
    }

    pub fn is_service(&self, id: TypeId) -> bool {
        self.true_kind(id) == Some(UserTypeKind::Service)
    }

    /// Kind of the type behind any typedefs.
    pub fn true_kind(&self, id: TypeId) -> Option<UserTypeKind> {
        self.kind(self.true_type(id)?)
    }

    /// Structural equality with typedefs stripped at every level.
    ///
    /// Named types still compare by identity; `Invalid` matches anything.
    pub fn same_type(&self, a: TypeId, b: TypeId) -> bool {
        self.same_type_inner(a, b, &mut HashSet::new())
    }

    fn same_type_inner(&self, a: TypeId, b: TypeId, seen: &mut HashSet<(TypeId, TypeId)>) -> bool {
        if a == b || !seen.insert((a, b)) {
            return true;
        }
        let (Some(a), Some(b)) = (self.true_type(a), self.true_type(b)) else {
            return false;
        };
        if a == b {
            return true;
        }
        match (*self.shape(a), *self.shape(b)) {
            (TypeShape::Invalid, _) | (_, TypeShape::Invalid) => true,
            (TypeShape::List(x), TypeShape::List(y)) | (TypeShape::Set(x), TypeShape::Set(y)) => {
                self.same_type_inner(x, y, seen)
            }
            (
                TypeShape::Map { key: ka, value: va },
                TypeShape::Map { key: kb, value: vb },
            ) => self.same_type_inner(ka, kb, seen) && self.same_type_inner(va, vb, seen),
            _ => false,
        }
    }

    /// Human-readable type name, user types qualified with their prefix.
    pub fn display(&self, id: TypeId) -> String {
        match *self.shape(id) {
            TypeShape::Builtin(builtin) => builtin.keyword().to_string(),
            TypeShape::List(element) => format!("list<{}>", self.display(element)),
            TypeShape::Set(element) => format!("set<{}>", self.display(element)),
            TypeShape::Map { key, value } => {
                format!("map<{}, {}>", self.display(key), self.display(value))
            }
            TypeShape::User(_) => self
                .user_type(id)
                .map(|entry| entry.name.to_string())
                .unwrap_or_default(),
            TypeShape::Invalid => "<invalid>".to_string(),
        }
    }

    /// Number of interned shapes, builtins included.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

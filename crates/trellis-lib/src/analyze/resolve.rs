//! Type name resolution.
//!
//! Lookup order for a reference `N` in file `F`:
//! 1. Built-in keywords, which user declarations cannot shadow.
//! 2. `prefix.N`: only the included file with that prefix.
//! 3. `N`: declarations of `F`, then each direct include of `F`. A name
//!    found in more than one include is ambiguous.
//!
//! Failed lookups are reported and resolve to [`TYPE_INVALID`] so linking
//! can carry on.

use crate::Location;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::element::TypeElement;
use crate::schema::{FileId, FileMap};
use crate::types::{BuiltinType, TYPE_INVALID, TypeGraph, TypeId, TypeShape, UserTypeKind};

/// Position a type reference appears in.
///
/// Value positions reject `void` and service types.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Usage {
    Field,
    Parameter,
    TypedefTarget,
    Constant,
    ReturnType,
    /// Checked by the validator, which has a dedicated diagnostic.
    Exception,
    /// Checked by the validator, which has a dedicated diagnostic.
    Extends,
}

impl Usage {
    fn value_position(self) -> Option<&'static str> {
        match self {
            Self::Field => Some("field"),
            Self::Parameter => Some("parameter"),
            Self::TypedefTarget => Some("typedef target"),
            Self::Constant => Some("constant"),
            Self::ReturnType | Self::Exception | Self::Extends => None,
        }
    }
}

pub struct TypeResolver<'a> {
    pub files: &'a FileMap,
    pub graph: &'a mut TypeGraph,
    pub diagnostics: &'a mut Diagnostics,
    pub deprecation_warnings: bool,
}

impl TypeResolver<'_> {
    pub fn resolve(&mut self, file: FileId, element: &TypeElement, usage: Usage) -> TypeId {
        let id = self.resolve_element(file, element);
        if let Some(position) = usage.value_position() {
            self.check_value_type(id, position, element.location());
        }
        id
    }

    fn resolve_element(&mut self, file: FileId, element: &TypeElement) -> TypeId {
        match element {
            TypeElement::Named { location, name, .. } => self.resolve_name(file, name, location),
            TypeElement::List { element, .. } => {
                let inner = self.resolve_parameter(file, element);
                self.graph.list(inner)
            }
            TypeElement::Set { element, .. } => {
                let inner = self.resolve_parameter(file, element);
                self.graph.set(inner)
            }
            TypeElement::Map { key, value, .. } => {
                let key = self.resolve_parameter(file, key);
                let value = self.resolve_parameter(file, value);
                self.graph.map(key, value)
            }
        }
    }

    fn resolve_parameter(&mut self, file: FileId, element: &TypeElement) -> TypeId {
        let id = self.resolve_element(file, element);
        self.check_value_type(id, "collection element", element.location());
        id
    }

    /// Reject `void` and services where a value is stored.
    ///
    /// Only the direct reference is checked; a typedef of `void` is reported
    /// once, at the typedef.
    fn check_value_type(&mut self, id: TypeId, position: &str, location: &Location) {
        let detail = match self.graph.shape(id) {
            TypeShape::Builtin(BuiltinType::Void) => format!("`void` cannot be used as a {position} type"),
            TypeShape::User(_) if self.graph.kind(id) == Some(UserTypeKind::Service) => format!(
                "service `{}` cannot be used as a {position} type",
                self.graph.display(id)
            ),
            _ => return,
        };
        self.diagnostics
            .report(DiagnosticKind::InvalidFieldType, location)
            .message(detail)
            .emit();
    }

    pub fn resolve_name(&mut self, file: FileId, name: &str, location: &Location) -> TypeId {
        if let Some(builtin) = BuiltinType::from_keyword(name) {
            return self.graph.builtin(builtin);
        }

        let found = match name.split_once('.') {
            Some((prefix, rest)) => self.resolve_qualified(file, prefix, rest, name, location),
            None => self.resolve_unqualified(file, name, location),
        };
        let Some(id) = found else {
            return TYPE_INVALID;
        };

        log::trace!("resolved `{}` to {}", name, self.graph.display(id));
        self.warn_if_deprecated(id, location);
        id
    }

    fn resolve_qualified(
        &mut self,
        file: FileId,
        prefix: &str,
        rest: &str,
        name: &str,
        location: &Location,
    ) -> Option<TypeId> {
        let files = self.files;
        let includes: Vec<FileId> = files
            .get(file)
            .includes()
            .iter()
            .copied()
            .filter(|&include| files.get(include).prefix() == prefix)
            .collect();

        match includes.as_slice() {
            [] => {
                self.diagnostics
                    .report(DiagnosticKind::UnresolvedType, location)
                    .message(name)
                    .hint(format!("no included file has the prefix `{}`", prefix))
                    .emit();
                None
            }
            [include] => {
                let found = self.graph.lookup(*include, rest);
                if found.is_none() {
                    self.diagnostics
                        .report(DiagnosticKind::UnresolvedType, location)
                        .message(name)
                        .emit();
                }
                found
            }
            _ => {
                let mut builder = self
                    .diagnostics
                    .report(DiagnosticKind::AmbiguousType, location)
                    .message(name);
                for &include in &includes {
                    let path = files.get(include).path();
                    builder = builder.related_to(
                        format!("`{}` may refer to `{}`", prefix, path),
                        &Location::file(path),
                    );
                }
                builder.emit();
                None
            }
        }
    }

    fn resolve_unqualified(&mut self, file: FileId, name: &str, location: &Location) -> Option<TypeId> {
        if let Some(id) = self.graph.lookup(file, name) {
            return Some(id);
        }

        let candidates: Vec<TypeId> = self
            .files
            .get(file)
            .includes()
            .iter()
            .filter_map(|&include| self.graph.lookup(include, name))
            .collect();

        match candidates.as_slice() {
            [] => {
                self.diagnostics
                    .report(DiagnosticKind::UnresolvedType, location)
                    .message(name)
                    .emit();
                None
            }
            [id] => Some(*id),
            _ => {
                let mut builder = self
                    .diagnostics
                    .report(DiagnosticKind::AmbiguousType, location)
                    .message(name);
                for &candidate in &candidates {
                    if let Some(entry) = self.graph.user_type(candidate) {
                        builder = builder.related_to(
                            format!("`{}` is declared here", entry.name()),
                            entry.location(),
                        );
                    }
                }
                builder.emit();
                None
            }
        }
    }

    fn warn_if_deprecated(&mut self, id: TypeId, location: &Location) {
        if !self.deprecation_warnings {
            return;
        }
        if let Some(entry) = self.graph.user_type(id)
            && entry.is_deprecated()
        {
            self.diagnostics
                .report(DiagnosticKind::DeprecatedUsage, location)
                .message(entry.name().to_string())
                .emit();
        }
    }
}

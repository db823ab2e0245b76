//! The linked, validated, immutable schema.

mod builder;
mod files;
mod loader;
mod printer;
mod resolver;

#[cfg(test)]
mod schema_tests;

pub use builder::{SchemaBuilder, SchemaConfig};
pub use files::{FileId, FileMap, SchemaFile};
pub use printer::SchemaPrinter;
pub use resolver::{IncludeResolver, ResolvedInclude};

use crate::diagnostics::Diagnostics;
use crate::element::{StructKind, UserElement};
use crate::model::{Constant, EnumType, ServiceType, StructType, TypedefType};
use crate::types::{TypeGraph, TypeId};

/// Every declaration of a build, fully resolved.
///
/// Only obtainable from a successful [`SchemaBuilder::build`], so a `Schema`
/// never contains an unresolved reference. Declarations are listed in file
/// dependency order (includes first), then source order.
#[derive(Clone, Debug)]
pub struct Schema {
    files: FileMap,
    graph: TypeGraph,
    typedefs: Vec<TypedefType>,
    enums: Vec<EnumType>,
    structs: Vec<StructType>,
    services: Vec<ServiceType>,
    constants: Vec<Constant>,
    warnings: Diagnostics,
}

impl Schema {
    pub fn builder<'r>() -> SchemaBuilder<'r> {
        SchemaBuilder::new()
    }

    pub fn files(&self) -> impl Iterator<Item = &SchemaFile> {
        self.files.iter()
    }

    pub fn file(&self, id: FileId) -> &SchemaFile {
        self.files.get(id)
    }

    pub fn graph(&self) -> &TypeGraph {
        &self.graph
    }

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    pub fn typedefs(&self) -> &[TypedefType] {
        &self.typedefs
    }

    pub fn enums(&self) -> &[EnumType] {
        &self.enums
    }

    /// Structs, unions, and exceptions together.
    pub fn all_structs(&self) -> &[StructType] {
        &self.structs
    }

    pub fn structs(&self) -> impl Iterator<Item = &StructType> {
        self.structs_of_kind(StructKind::Struct)
    }

    pub fn unions(&self) -> impl Iterator<Item = &StructType> {
        self.structs_of_kind(StructKind::Union)
    }

    pub fn exceptions(&self) -> impl Iterator<Item = &StructType> {
        self.structs_of_kind(StructKind::Exception)
    }

    fn structs_of_kind(&self, kind: StructKind) -> impl Iterator<Item = &StructType> {
        self.structs.iter().filter(move |s| s.kind() == kind)
    }

    pub fn services(&self) -> &[ServiceType] {
        &self.services
    }

    /// Warnings collected during the build.
    pub fn warnings(&self) -> &Diagnostics {
        &self.warnings
    }

    /// Find a user type by `prefix.Name`, or by bare `Name` in any file.
    ///
    /// A bare name declared in several files resolves to the first file in
    /// registration order (roots first, then includes as they were found).
    pub fn find_type(&self, name: &str) -> Option<TypeId> {
        match name.split_once('.') {
            Some((prefix, rest)) => self
                .files
                .iter()
                .filter(|file| file.prefix() == prefix)
                .find_map(|file| self.graph.lookup(file.id(), rest)),
            None => self
                .files
                .iter()
                .find_map(|file| self.graph.lookup(file.id(), name)),
        }
    }

    /// Find a constant by `prefix.NAME` or bare `NAME`.
    pub fn find_constant(&self, name: &str) -> Option<&Constant> {
        match name.split_once('.') {
            Some((prefix, rest)) => self
                .constants
                .iter()
                .find(|c| c.name() == rest && self.files.get(c.file()).prefix() == prefix),
            None => self.constants.iter().find(|c| c.name() == name),
        }
    }

    pub fn find_typedef(&self, id: TypeId) -> Option<&TypedefType> {
        self.typedefs.iter().find(|t| t.type_id() == id)
    }

    pub fn find_enum(&self, id: TypeId) -> Option<&EnumType> {
        self.enums.iter().find(|e| e.type_id() == id)
    }

    pub fn find_struct(&self, id: TypeId) -> Option<&StructType> {
        self.structs.iter().find(|s| s.type_id() == id)
    }

    pub fn find_service(&self, id: TypeId) -> Option<&ServiceType> {
        self.services.iter().find(|s| s.type_id() == id)
    }

    /// Display name of a type: keyword, `list<...>`, or `prefix.Name`.
    pub fn type_name(&self, id: TypeId) -> String {
        self.graph.display(id)
    }

    pub fn printer(&self) -> SchemaPrinter<'_> {
        SchemaPrinter::new(self)
    }
}

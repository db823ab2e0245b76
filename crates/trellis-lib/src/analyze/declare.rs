//! Declaration pass: one skeleton graph entry per named declaration.
//!
//! Runs over every file before any reference is linked, so forward
//! references and cross-file references see every name.

use super::symbol_table::SymbolTable;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::element::{
    ConstElement, ElementMeta, EnumElement, ServiceElement, StructElement, TypedefElement,
    UserElement,
};
use crate::schema::{FileId, FileMap};
use crate::types::{BuiltinType, GraphError, QualifiedName, TypeGraph, TypeId, UserTypeKind};

/// A successfully declared element and its graph node.
#[derive(Debug)]
pub struct Declaration<'f, E> {
    pub file: FileId,
    pub element: &'f E,
    pub type_id: TypeId,
}

impl<E> Clone for Declaration<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Declaration<'_, E> {}

/// A declaration rejected as a duplicate, kept so its references can still
/// be checked.
#[derive(Clone, Copy, Debug)]
pub enum Rejected<'f> {
    Typedef(FileId, &'f TypedefElement),
    Struct(FileId, &'f StructElement),
    Service(FileId, &'f ServiceElement),
    Constant(FileId, &'f ConstElement),
}

/// Output of the declaration pass, in file order then source order.
#[derive(Debug)]
pub struct Declared<'f> {
    pub symbols: SymbolTable<'f>,
    pub typedefs: Vec<Declaration<'f, TypedefElement>>,
    pub enums: Vec<Declaration<'f, EnumElement>>,
    pub structs: Vec<Declaration<'f, StructElement>>,
    pub services: Vec<Declaration<'f, ServiceElement>>,
    pub rejected: Vec<Rejected<'f>>,
}

pub fn declare<'f>(
    files: &'f FileMap,
    order: &[FileId],
    graph: &mut TypeGraph,
    diagnostics: &mut Diagnostics,
) -> Declared<'f> {
    let mut declarer = Declarer {
        files,
        graph,
        diagnostics,
        output: Declared {
            symbols: SymbolTable::new(files.len()),
            typedefs: Vec::new(),
            enums: Vec::new(),
            structs: Vec::new(),
            services: Vec::new(),
            rejected: Vec::new(),
        },
    };
    for &file in order {
        declarer.declare_file(file);
    }

    let output = declarer.output;
    log::debug!(
        "declared {} typedefs, {} enums, {} structs, {} services, {} constants",
        output.typedefs.len(),
        output.enums.len(),
        output.structs.len(),
        output.services.len(),
        output.symbols.len()
    );
    output
}

struct Declarer<'a, 'f> {
    files: &'f FileMap,
    graph: &'a mut TypeGraph,
    diagnostics: &'a mut Diagnostics,
    output: Declared<'f>,
}

impl<'f> Declarer<'_, 'f> {
    fn declare_file(&mut self, file: FileId) {
        let files = self.files;
        let element = files.get(file).element();

        for typedef in &element.typedefs {
            match self.declare_type(file, &typedef.meta, UserTypeKind::Typedef) {
                Some(type_id) => self.output.typedefs.push(Declaration {
                    file,
                    element: typedef,
                    type_id,
                }),
                None => self.output.rejected.push(Rejected::Typedef(file, typedef)),
            }
        }
        for enum_element in &element.enums {
            if let Some(type_id) = self.declare_type(file, &enum_element.meta, UserTypeKind::Enum) {
                self.output.enums.push(Declaration {
                    file,
                    element: enum_element,
                    type_id,
                });
            }
        }
        for struct_element in &element.structs {
            let kind = UserTypeKind::Struct(struct_element.kind);
            match self.declare_type(file, &struct_element.meta, kind) {
                Some(type_id) => self.output.structs.push(Declaration {
                    file,
                    element: struct_element,
                    type_id,
                }),
                None => self
                    .output
                    .rejected
                    .push(Rejected::Struct(file, struct_element)),
            }
        }
        for service in &element.services {
            match self.declare_type(file, &service.meta, UserTypeKind::Service) {
                Some(type_id) => self.output.services.push(Declaration {
                    file,
                    element: service,
                    type_id,
                }),
                None => self.output.rejected.push(Rejected::Service(file, service)),
            }
        }
        for constant in &element.constants {
            if let Err(existing) = self.output.symbols.declare(file, constant) {
                let first = self.output.symbols.get(existing).element;
                self.diagnostics
                    .report(DiagnosticKind::DuplicateSymbol, constant.location())
                    .message(constant.name())
                    .related_to("first declared here", first.location())
                    .emit();
                self.output.rejected.push(Rejected::Constant(file, constant));
            }
        }
    }

    fn declare_type(&mut self, file: FileId, meta: &ElementMeta, kind: UserTypeKind) -> Option<TypeId> {
        if BuiltinType::from_keyword(&meta.name).is_some() {
            self.diagnostics
                .report(DiagnosticKind::DuplicateSymbol, &meta.location)
                .message(&meta.name)
                .hint("built-in type names cannot be redeclared")
                .emit();
            return None;
        }

        let prefix = self.files.get(file).prefix();
        let name = QualifiedName::new(file, prefix, meta.name.as_str());
        match self
            .graph
            .declare(name, kind, meta.location.clone(), meta.is_deprecated())
        {
            Ok(type_id) => {
                log::trace!("declared {} `{}`", kind, meta.name);
                Some(type_id)
            }
            Err(err) => {
                let mut builder = self
                    .diagnostics
                    .report(DiagnosticKind::DuplicateSymbol, &meta.location)
                    .message(&meta.name);
                if let GraphError::DuplicateSymbol { existing, .. } = err
                    && let Some(first) = self.graph.user_type(existing)
                {
                    builder = builder.related_to("first declared here", first.location());
                }
                builder.emit();
                None
            }
        }
    }
}

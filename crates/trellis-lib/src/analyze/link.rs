//! Link pass: turn declared elements into model values.
//!
//! Three phases, each over every file in dependency order:
//! 1. Declare: one unresolved graph node per named type (see `declare`).
//! 2. Types: resolve every type reference and fill in the model.
//! 3. Values: with all typedef targets known, type check constants and
//!    field defaults.
//!
//! Typedef cycles are detected between phases 2 and 3.

use super::constants::ConstantLinker;
use super::declare::{Declaration, Rejected, declare};
use super::resolve::{TypeResolver, Usage};
use super::typedef_cycles::check_typedef_cycles;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::element::{
    ConstValueElement, EnumElement, FieldElement, ServiceElement, StructElement, TypedefElement,
    UserElement,
};
use crate::model::{
    Constant, EnumMember, EnumType, Field, ServiceMethod, ServiceType, StructType, TypedefType,
};
use crate::schema::{FileId, FileMap};
use crate::types::{TYPE_INVALID, TypeGraph, TypeId};

#[derive(Clone, Copy, Debug)]
pub struct LinkOptions {
    pub deprecation_warnings: bool,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            deprecation_warnings: true,
        }
    }
}

/// Every linked declaration, in file order then source order.
///
/// Declarations rejected as duplicates are absent; their type references
/// are still resolved and reported.
#[derive(Clone, Debug, Default)]
pub struct LinkOutput {
    pub typedefs: Vec<TypedefType>,
    pub enums: Vec<EnumType>,
    pub structs: Vec<StructType>,
    pub services: Vec<ServiceType>,
    pub constants: Vec<Constant>,
}

/// Link all files of a build.
///
/// `order` lists files with includes before includers; files in an include
/// cycle may come in any order.
pub fn link(
    files: &FileMap,
    order: &[FileId],
    graph: &mut TypeGraph,
    options: LinkOptions,
    diagnostics: &mut Diagnostics,
) -> LinkOutput {
    let declared = declare(files, order, graph, diagnostics);

    let mut types = TypeLinker {
        resolver: TypeResolver {
            files,
            graph,
            diagnostics,
            deprecation_warnings: options.deprecation_warnings,
        },
        output: LinkOutput::default(),
        defaults: Vec::new(),
    };
    for &typedef in &declared.typedefs {
        types.link_typedef(typedef);
    }
    for &enum_decl in &declared.enums {
        types.link_enum(enum_decl);
    }
    for &struct_decl in &declared.structs {
        types.link_struct(struct_decl);
    }
    for &service in &declared.services {
        types.link_service(service);
    }
    for &rejected in &declared.rejected {
        types.check_rejected(rejected);
    }
    let constant_types: Vec<TypeId> = declared
        .symbols
        .iter()
        .map(|(_, decl)| {
            types
                .resolver
                .resolve(decl.file, &decl.element.ty, Usage::Constant)
        })
        .collect();
    let TypeLinker {
        mut output,
        defaults,
        ..
    } = types;
    log::debug!("type graph holds {} types", graph.len());

    check_typedef_cycles(graph, &output.typedefs, diagnostics);

    let mut values = ConstantLinker::new(
        files,
        graph,
        &declared.symbols,
        &constant_types,
        &output.enums,
        &output.structs,
        diagnostics,
    );
    let default_values: Vec<_> = defaults
        .iter()
        .map(|pending| values.check(pending.file, pending.ty, pending.value))
        .collect();
    let constant_values = values.link_all();

    for (pending, value) in defaults.iter().zip(default_values) {
        if let Some(field) = pending.slot.field_mut(&mut output) {
            field.default_value = value;
        }
    }
    for ((id, decl), value) in declared.symbols.iter().zip(constant_values) {
        let Some(value) = value else { continue };
        output.constants.push(Constant {
            meta: decl.element.meta.clone(),
            file: decl.file,
            ty: constant_types[id.index()],
            value,
        });
    }
    log::debug!("linked {} constants", output.constants.len());

    output
}

/// Where a field with a pending default value lives in the output.
#[derive(Clone, Copy, Debug)]
enum FieldSlot {
    Struct {
        owner: usize,
        field: usize,
    },
    Parameter {
        owner: usize,
        method: usize,
        field: usize,
    },
    Exception {
        owner: usize,
        method: usize,
        field: usize,
    },
}

impl FieldSlot {
    fn field_mut(self, output: &mut LinkOutput) -> Option<&mut Field> {
        match self {
            Self::Struct { owner, field } => output.structs.get_mut(owner)?.fields.get_mut(field),
            Self::Parameter {
                owner,
                method,
                field,
            } => output
                .services
                .get_mut(owner)?
                .methods
                .get_mut(method)?
                .parameters
                .get_mut(field),
            Self::Exception {
                owner,
                method,
                field,
            } => output
                .services
                .get_mut(owner)?
                .methods
                .get_mut(method)?
                .exceptions
                .get_mut(field),
        }
    }
}

struct PendingDefault<'f> {
    file: FileId,
    slot: FieldSlot,
    ty: TypeId,
    value: &'f ConstValueElement,
}

struct TypeLinker<'a, 'f> {
    resolver: TypeResolver<'a>,
    output: LinkOutput,
    defaults: Vec<PendingDefault<'f>>,
}

impl<'f> TypeLinker<'_, 'f> {
    fn link_typedef(&mut self, decl: Declaration<'f, TypedefElement>) {
        let old_type = self
            .resolver
            .resolve(decl.file, &decl.element.old_type, Usage::TypedefTarget);
        self.resolver.graph.set_alias(decl.type_id, old_type);
        self.resolver.graph.mark_resolved(decl.type_id);

        self.output.typedefs.push(TypedefType {
            meta: decl.element.meta.clone(),
            file: decl.file,
            type_id: decl.type_id,
            old_type,
        });
    }

    fn link_enum(&mut self, decl: Declaration<'f, EnumElement>) {
        let mut members = Vec::with_capacity(decl.element.members.len());
        let mut next: i64 = 0;
        for member in &decl.element.members {
            let value = member.value.map_or(next, i64::from);
            let Ok(value) = i32::try_from(value) else {
                self.resolver
                    .diagnostics
                    .report(DiagnosticKind::TypeMismatch, member.location())
                    .message(format!("implicit value of `{}` overflows i32", member.name()))
                    .emit();
                continue;
            };
            next = i64::from(value) + 1;
            members.push(EnumMember {
                meta: member.meta.clone(),
                value,
            });
        }
        self.resolver.graph.mark_resolved(decl.type_id);

        self.output.enums.push(EnumType {
            meta: decl.element.meta.clone(),
            file: decl.file,
            type_id: decl.type_id,
            members,
        });
    }

    fn link_struct(&mut self, decl: Declaration<'f, StructElement>) {
        let owner = self.output.structs.len();
        let fields = self.link_fields(decl.file, &decl.element.fields, Usage::Field, |field| {
            FieldSlot::Struct { owner, field }
        });
        self.resolver.graph.mark_resolved(decl.type_id);

        self.output.structs.push(StructType {
            meta: decl.element.meta.clone(),
            file: decl.file,
            type_id: decl.type_id,
            kind: decl.element.kind,
            fields,
        });
    }

    fn link_service(&mut self, decl: Declaration<'f, ServiceElement>) {
        let owner = self.output.services.len();
        let extends = decl
            .element
            .extends
            .as_ref()
            .map(|base| self.resolver.resolve(decl.file, base, Usage::Extends))
            .filter(|&base| base != TYPE_INVALID);

        let mut methods = Vec::with_capacity(decl.element.functions.len());
        for (method, function) in decl.element.functions.iter().enumerate() {
            let return_type = self
                .resolver
                .resolve(decl.file, &function.return_type, Usage::ReturnType);
            let parameters = self.link_fields(decl.file, &function.params, Usage::Parameter, |field| {
                FieldSlot::Parameter {
                    owner,
                    method,
                    field,
                }
            });
            let exceptions =
                self.link_fields(decl.file, &function.exceptions, Usage::Exception, |field| {
                    FieldSlot::Exception {
                        owner,
                        method,
                        field,
                    }
                });
            methods.push(ServiceMethod {
                meta: function.meta.clone(),
                one_way: function.one_way,
                return_type,
                parameters,
                exceptions,
            });
        }
        self.resolver.graph.mark_resolved(decl.type_id);

        self.output.services.push(ServiceType {
            meta: decl.element.meta.clone(),
            file: decl.file,
            type_id: decl.type_id,
            extends,
            methods,
        });
    }

    /// Resolve the type references of a rejected declaration. Nothing
    /// reaches the output.
    fn check_rejected(&mut self, rejected: Rejected<'f>) {
        match rejected {
            Rejected::Typedef(file, typedef) => {
                self.resolver
                    .resolve(file, &typedef.old_type, Usage::TypedefTarget);
            }
            Rejected::Struct(file, struct_element) => {
                self.check_fields(file, &struct_element.fields, Usage::Field);
            }
            Rejected::Service(file, service) => {
                if let Some(base) = &service.extends {
                    self.resolver.resolve(file, base, Usage::Extends);
                }
                for function in &service.functions {
                    self.resolver
                        .resolve(file, &function.return_type, Usage::ReturnType);
                    self.check_fields(file, &function.params, Usage::Parameter);
                    self.check_fields(file, &function.exceptions, Usage::Exception);
                }
            }
            Rejected::Constant(file, constant) => {
                self.resolver.resolve(file, &constant.ty, Usage::Constant);
            }
        }
    }

    fn check_fields(&mut self, file: FileId, elements: &[FieldElement], usage: Usage) {
        for element in elements {
            self.resolver.resolve(file, &element.ty, usage);
        }
    }

    fn link_fields(
        &mut self,
        file: FileId,
        elements: &'f [FieldElement],
        usage: Usage,
        slot: impl Fn(usize) -> FieldSlot,
    ) -> Vec<Field> {
        let mut fields = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            let ty = self.resolver.resolve(file, &element.ty, usage);
            if let Some(value) = &element.default_value {
                self.defaults.push(PendingDefault {
                    file,
                    slot: slot(index),
                    ty,
                    value,
                });
            }
            fields.push(Field {
                meta: element.meta.clone(),
                id: element.id,
                requiredness: element.requiredness,
                ty,
                default_value: None,
            });
        }
        fields
    }
}

//! Constant value linking.
//!
//! Checks literal values against their expected type (after stripping
//! typedefs) and resolves identifiers to `true`/`false`, enum members, or
//! other constants. Referenced constants are linked on demand, memoised,
//! and inlined into the referring value.

use std::collections::HashMap;

use super::symbol_table::{ConstId, SymbolTable};
use crate::Location;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::element::{ConstValueElement, ConstValueKind, UserElement};
use crate::model::{ConstValue, EnumType, StructType};
use crate::schema::{FileId, FileMap};
use crate::types::{BuiltinType, TYPE_BOOL, TYPE_INVALID, TypeGraph, TypeId, TypeShape};

#[derive(Clone, Debug)]
enum State {
    Pending,
    InProgress,
    Done(Option<ConstValue>),
}

pub struct ConstantLinker<'a, 'f> {
    files: &'a FileMap,
    graph: &'a TypeGraph,
    symbols: &'a SymbolTable<'f>,
    /// Declared type of each constant, indexed by `ConstId`.
    constant_types: &'a [TypeId],
    enums: HashMap<TypeId, &'a EnumType>,
    structs: HashMap<TypeId, &'a StructType>,
    states: Vec<State>,
    diagnostics: &'a mut Diagnostics,
}

impl<'a, 'f> ConstantLinker<'a, 'f> {
    pub fn new(
        files: &'a FileMap,
        graph: &'a TypeGraph,
        symbols: &'a SymbolTable<'f>,
        constant_types: &'a [TypeId],
        enums: &'a [EnumType],
        structs: &'a [StructType],
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            files,
            graph,
            symbols,
            constant_types,
            enums: enums.iter().map(|e| (e.type_id(), e)).collect(),
            structs: structs.iter().map(|s| (s.type_id(), s)).collect(),
            states: vec![State::Pending; symbols.len()],
            diagnostics,
        }
    }

    /// Link every declared constant; `None` where linking failed.
    pub fn link_all(&mut self) -> Vec<Option<ConstValue>> {
        let ids: Vec<ConstId> = self.symbols.iter().map(|(id, _)| id).collect();
        for &id in &ids {
            self.link_constant(id);
        }

        std::mem::take(&mut self.states)
            .into_iter()
            .map(|state| match state {
                State::Done(value) => value,
                State::Pending | State::InProgress => None,
            })
            .collect()
    }

    fn link_constant(&mut self, id: ConstId) -> Option<ConstValue> {
        match &self.states[id.index()] {
            State::Done(value) => return value.clone(),
            State::InProgress => return None,
            State::Pending => {}
        }

        self.states[id.index()] = State::InProgress;
        let decl = self.symbols.get(id);
        let value = self.check(decl.file, self.constant_types[id.index()], &decl.element.value);
        log::trace!("linked constant `{}`", decl.element.name());
        self.states[id.index()] = State::Done(value.clone());
        value
    }

    /// Type check `value` against `expected` in the scope of `file`.
    ///
    /// Every problem is reported; `None` means at least one was found (or the
    /// expected type itself is broken and was reported elsewhere).
    pub fn check(
        &mut self,
        file: FileId,
        expected: TypeId,
        value: &ConstValueElement,
    ) -> Option<ConstValue> {
        let true_type = self.graph.true_type(expected)?;
        if true_type == TYPE_INVALID {
            return None;
        }
        if let ConstValueKind::Identifier(name) = &value.value {
            return self.check_identifier(file, expected, true_type, name, &value.location);
        }

        match *self.graph.shape(true_type) {
            TypeShape::Invalid => None,
            TypeShape::Builtin(builtin) => self.check_builtin(expected, builtin, value),
            TypeShape::List(element) | TypeShape::Set(element) => {
                let ConstValueKind::List(items) = &value.value else {
                    return self.mismatch(expected, value);
                };
                let checked: Vec<_> = items
                    .iter()
                    .map(|item| self.check(file, element, item))
                    .collect();
                checked
                    .into_iter()
                    .collect::<Option<Vec<_>>>()
                    .map(ConstValue::List)
            }
            TypeShape::Map { key, value: value_type } => {
                let ConstValueKind::Map(entries) = &value.value else {
                    return self.mismatch(expected, value);
                };
                let checked: Vec<_> = entries
                    .iter()
                    .map(|(k, v)| (self.check(file, key, k), self.check(file, value_type, v)))
                    .collect();
                checked
                    .into_iter()
                    .map(|(k, v)| Some((k?, v?)))
                    .collect::<Option<Vec<_>>>()
                    .map(ConstValue::Map)
            }
            TypeShape::User(_) => {
                if let Some(enum_type) = self.enums.get(&true_type).copied() {
                    self.check_enum_value(expected, enum_type, value)
                } else if let Some(struct_type) = self.structs.get(&true_type).copied() {
                    self.check_struct(file, expected, struct_type, value)
                } else {
                    self.mismatch(expected, value)
                }
            }
        }
    }

    fn check_builtin(
        &mut self,
        expected: TypeId,
        builtin: BuiltinType,
        value: &ConstValueElement,
    ) -> Option<ConstValue> {
        match (builtin, &value.value) {
            (BuiltinType::Bool, ConstValueKind::Integer(0)) => Some(ConstValue::Bool(false)),
            (BuiltinType::Bool, ConstValueKind::Integer(1)) => Some(ConstValue::Bool(true)),
            (BuiltinType::Double, ConstValueKind::Integer(i)) => Some(ConstValue::Double(*i as f64)),
            (BuiltinType::Double, ConstValueKind::Double(d)) => Some(ConstValue::Double(*d)),
            (BuiltinType::String | BuiltinType::Binary, ConstValueKind::String(s)) => {
                Some(ConstValue::String(s.clone()))
            }
            (_, ConstValueKind::Integer(i)) => {
                let Some((min, max)) = builtin.integer_range() else {
                    return self.mismatch(expected, value);
                };
                if (min..=max).contains(i) {
                    return Some(ConstValue::Integer(*i));
                }
                self.diagnostics
                    .report(DiagnosticKind::TypeMismatch, &value.location)
                    .message(format!(
                        "value {} is out of range for `{}`",
                        i,
                        self.graph.display(expected)
                    ))
                    .emit();
                None
            }
            _ => self.mismatch(expected, value),
        }
    }

    fn check_enum_value(
        &mut self,
        expected: TypeId,
        enum_type: &EnumType,
        value: &ConstValueElement,
    ) -> Option<ConstValue> {
        let ConstValueKind::Integer(i) = value.value else {
            return self.mismatch(expected, value);
        };
        let member = i32::try_from(i)
            .ok()
            .and_then(|v| enum_type.member_by_value(v));
        let Some(member) = member else {
            self.diagnostics
                .report(DiagnosticKind::TypeMismatch, &value.location)
                .message(format!(
                    "`{}` has no member with value {}",
                    self.graph.display(expected),
                    i
                ))
                .emit();
            return None;
        };
        Some(ConstValue::EnumMember {
            enum_type: enum_type.type_id(),
            name: member.name().to_string(),
            value: member.value(),
        })
    }

    fn check_struct(
        &mut self,
        file: FileId,
        expected: TypeId,
        struct_type: &StructType,
        value: &ConstValueElement,
    ) -> Option<ConstValue> {
        let ConstValueKind::Map(entries) = &value.value else {
            return self.mismatch(expected, value);
        };

        let mut fields = Vec::with_capacity(entries.len());
        let mut valid = true;
        for (key, field_value) in entries {
            let ConstValueKind::String(field_name) = &key.value else {
                self.diagnostics
                    .report(DiagnosticKind::TypeMismatch, &key.location)
                    .message(format!("expected a field name, found {}", key.value.describe()))
                    .emit();
                valid = false;
                continue;
            };
            let Some(field) = struct_type.field(field_name) else {
                self.diagnostics
                    .report(DiagnosticKind::TypeMismatch, &key.location)
                    .message(format!(
                        "`{}` has no field `{}`",
                        self.graph.display(expected),
                        field_name
                    ))
                    .emit();
                valid = false;
                continue;
            };
            match self.check(file, field.ty(), field_value) {
                Some(checked) => fields.push((field_name.clone(), checked)),
                None => valid = false,
            }
        }
        valid.then_some(ConstValue::Struct(fields))
    }

    fn check_identifier(
        &mut self,
        file: FileId,
        expected: TypeId,
        true_type: TypeId,
        name: &str,
        location: &Location,
    ) -> Option<ConstValue> {
        if true_type == TYPE_BOOL {
            match name {
                "true" => return Some(ConstValue::Bool(true)),
                "false" => return Some(ConstValue::Bool(false)),
                _ => {}
            }
        }

        let enum_type = self.enums.get(&true_type).copied();
        if let Some(enum_type) = enum_type
            && let Some(member) = self.enum_member(enum_type, name)
        {
            return Some(member);
        }

        match self.lookup_constant(file, name) {
            Some(id) => self.inline_constant(id, expected, name, location),
            None => {
                match enum_type {
                    Some(_) => self
                        .diagnostics
                        .report(DiagnosticKind::TypeMismatch, location)
                        .message(format!(
                            "`{}` is not a member of `{}`",
                            name,
                            self.graph.display(expected)
                        ))
                        .emit(),
                    None => self
                        .diagnostics
                        .report(DiagnosticKind::UnresolvedConstant, location)
                        .message(name)
                        .emit(),
                }
                None
            }
        }
    }

    /// Match `MEMBER`, `Enum.MEMBER`, or `prefix.Enum.MEMBER`.
    fn enum_member(&self, enum_type: &EnumType, name: &str) -> Option<ConstValue> {
        let prefix = self.files.get(enum_type.file()).prefix();
        let parts: Vec<&str> = name.split('.').collect();
        let member_name = match parts.as_slice() {
            [member] => *member,
            [enum_name, member] if *enum_name == enum_type.name() => *member,
            [p, enum_name, member] if *p == prefix && *enum_name == enum_type.name() => *member,
            _ => return None,
        };
        let member = enum_type.member(member_name)?;
        Some(ConstValue::EnumMember {
            enum_type: enum_type.type_id(),
            name: member.name().to_string(),
            value: member.value(),
        })
    }

    /// `NAME` searches the file, then its includes in order; `prefix.NAME`
    /// searches only includes with that prefix.
    fn lookup_constant(&self, file: FileId, name: &str) -> Option<ConstId> {
        let files = self.files;
        let includes = files.get(file).includes();
        match name.split_once('.') {
            Some((prefix, rest)) => includes
                .iter()
                .filter(|&&include| files.get(include).prefix() == prefix)
                .find_map(|&include| self.symbols.lookup(include, rest)),
            None => self.symbols.lookup(file, name).or_else(|| {
                includes
                    .iter()
                    .find_map(|&include| self.symbols.lookup(include, name))
            }),
        }
    }

    fn inline_constant(
        &mut self,
        id: ConstId,
        expected: TypeId,
        name: &str,
        location: &Location,
    ) -> Option<ConstValue> {
        if matches!(self.states[id.index()], State::InProgress) {
            self.diagnostics
                .report(DiagnosticKind::CyclicConstant, location)
                .message(format!("`{}` depends on itself", name))
                .emit();
            return None;
        }

        let value = self.link_constant(id)?;
        let actual = self.constant_types[id.index()];
        if !self.graph.same_type(actual, expected) {
            self.diagnostics
                .report(DiagnosticKind::TypeMismatch, location)
                .message(format!(
                    "expected `{}`, found constant `{}` of type `{}`",
                    self.graph.display(expected),
                    name,
                    self.graph.display(actual)
                ))
                .emit();
            return None;
        }
        Some(value)
    }

    fn mismatch(&mut self, expected: TypeId, value: &ConstValueElement) -> Option<ConstValue> {
        self.diagnostics
            .report(DiagnosticKind::TypeMismatch, &value.location)
            .message(format!(
                "expected `{}`, found {}",
                self.graph.display(expected),
                value.value.describe()
            ))
            .emit();
        None
    }
}

//! Field list rules: unique ids, unique names, union shape.

use std::collections::HashMap;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::element::{StructKind, UserElement};
use crate::model::{Field, StructType};

/// What a field list belongs to; only changes how fields are named in
/// messages.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FieldRole {
    Field,
    Parameter,
    Exception,
}

impl FieldRole {
    fn noun(self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Parameter => "param",
            Self::Exception => "exception",
        }
    }
}

pub fn validate_struct(struct_type: &StructType, diagnostics: &mut Diagnostics) {
    validate_fields(struct_type.fields(), FieldRole::Field, diagnostics);

    if struct_type.kind() == StructKind::Union {
        validate_union(struct_type, diagnostics);
    }
}

/// Ids and names must be unique within one list.
///
/// Each later duplicate is reported once, against the first field that
/// used the id or name.
pub fn validate_fields(fields: &[Field], role: FieldRole, diagnostics: &mut Diagnostics) {
    let noun = role.noun();
    let mut by_id: HashMap<i16, &Field> = HashMap::new();
    let mut by_name: HashMap<&str, &Field> = HashMap::new();

    for field in fields {
        if let Some(first) = by_id.get(&field.id()) {
            diagnostics
                .report(DiagnosticKind::DuplicateFieldId, field.location())
                .message(format!(
                    "{noun} `{}` has the same id ({}) as {noun} `{}`",
                    field.name(),
                    field.id(),
                    first.name()
                ))
                .related_to(format!("`{}` is declared here", first.name()), first.location())
                .emit();
        } else {
            by_id.insert(field.id(), field);
        }

        if let Some(first) = by_name.get(field.name()) {
            diagnostics
                .report(DiagnosticKind::DuplicateFieldName, field.location())
                .message(format!("{noun} `{}` is declared more than once", field.name()))
                .related_to("first declared here", first.location())
                .emit();
        } else {
            by_name.insert(field.name(), field);
        }
    }
}

fn validate_union(union: &StructType, diagnostics: &mut Diagnostics) {
    let mut first_default: Option<&Field> = None;

    for field in union.fields() {
        if field.is_required() {
            diagnostics
                .report(DiagnosticKind::InvalidUnionField, field.location())
                .message(format!("union member `{}` cannot be required", field.name()))
                .emit();
        }

        if field.default_value().is_none() {
            continue;
        }
        match first_default {
            None => first_default = Some(field),
            Some(first) => diagnostics
                .report(DiagnosticKind::InvalidUnionField, field.location())
                .message(format!(
                    "union `{}` has more than one default value",
                    union.name()
                ))
                .related_to(format!("`{}` has a default", first.name()), first.location())
                .emit(),
        }
    }
}

//! Service method rules.

use super::fields::{FieldRole, validate_fields};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::element::UserElement;
use crate::model::ServiceMethod;
use crate::types::TypeGraph;

/// Parameter and exception ids are checked as two independent lists.
pub fn validate_method(method: &ServiceMethod, graph: &TypeGraph, diagnostics: &mut Diagnostics) {
    validate_fields(method.parameters(), FieldRole::Parameter, diagnostics);
    validate_fields(method.exceptions(), FieldRole::Exception, diagnostics);

    for exception in method.exceptions() {
        let ty = exception.ty();
        if graph.is_invalid(ty) || graph.is_exception(ty) {
            continue;
        }
        diagnostics
            .report(DiagnosticKind::InvalidExceptionType, exception.location())
            .message(graph.display(ty))
            .emit();
    }

    if !method.one_way() {
        return;
    }

    let return_type = method.return_type();
    if !graph.is_void(return_type) && !graph.is_invalid(return_type) {
        diagnostics
            .report(DiagnosticKind::OneWayReturnType, method.location())
            .message(method.name())
            .hint(format!("declared return type is `{}`", graph.display(return_type)))
            .emit();
    }

    if !method.exceptions().is_empty() {
        diagnostics
            .report(DiagnosticKind::OneWayThrows, method.location())
            .message(method.name())
            .emit();
    }
}

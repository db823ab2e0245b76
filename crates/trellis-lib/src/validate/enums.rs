use std::collections::HashMap;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::element::UserElement;
use crate::model::{EnumMember, EnumType};

/// Member names and effective values must each be unique.
pub fn validate_enum(enum_type: &EnumType, diagnostics: &mut Diagnostics) {
    let mut by_name: HashMap<&str, &EnumMember> = HashMap::new();
    let mut by_value: HashMap<i32, &EnumMember> = HashMap::new();

    for member in enum_type.members() {
        if let Some(first) = by_name.get(member.name()) {
            diagnostics
                .report(DiagnosticKind::DuplicateEnumMember, member.location())
                .message(format!(
                    "`{}` is already a member of `{}`",
                    member.name(),
                    enum_type.name()
                ))
                .related_to("first declared here", first.location())
                .emit();
        } else {
            by_name.insert(member.name(), member);
        }

        if let Some(first) = by_value.get(&member.value()) {
            diagnostics
                .report(DiagnosticKind::DuplicateEnumMember, member.location())
                .message(format!(
                    "`{}` has the same value ({}) as `{}`",
                    member.name(),
                    member.value(),
                    first.name()
                ))
                .related_to(format!("`{}` is declared here", first.name()), first.location())
                .emit();
        } else {
            by_value.insert(member.value(), member);
        }
    }
}

//! Semantic rules the grammar cannot express.
//!
//! Each rule looks at one kind of linked declaration and reports every
//! violation it finds. Rules are independent of each other and of the order
//! they run in.
//!
//! A `required` field with a default value is allowed and not reported.

mod enums;
mod fields;
mod methods;
mod services;


pub use enums::validate_enum;
pub use fields::{FieldRole, validate_fields, validate_struct};
pub use methods::validate_method;
pub use services::validate_services;

use crate::analyze::LinkOutput;
use crate::diagnostics::Diagnostics;
use crate::types::TypeGraph;

/// Run every rule over a linked build.
pub fn validate(output: &LinkOutput, graph: &TypeGraph, diagnostics: &mut Diagnostics) {
    let before = diagnostics.len();

    for struct_type in &output.structs {
        validate_struct(struct_type, diagnostics);
    }
    for enum_type in &output.enums {
        validate_enum(enum_type, diagnostics);
    }
    for service in &output.services {
        for method in service.methods() {
            validate_method(method, graph, diagnostics);
        }
    }
    validate_services(&output.services, graph, diagnostics);

    log::debug!("validation reported {} diagnostics", diagnostics.len() - before);
}

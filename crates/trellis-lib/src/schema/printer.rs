//! Deterministic text dump of a schema.
//!
//! One block per file, in registration order; inside a block typedefs,
//! enums, structs, services, then constants, each in source order.

use std::fmt::Write;

use super::{FileId, Schema};
use crate::element::UserElement;
use crate::model::{ConstValue, Field};

pub struct SchemaPrinter<'s> {
    schema: &'s Schema,
    annotations: bool,
}

impl<'s> SchemaPrinter<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            annotations: false,
        }
    }

    /// Also print annotations of each declaration.
    pub fn annotations(mut self, value: bool) -> Self {
        self.annotations = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        for (i, file) in self.schema.files().enumerate() {
            if i > 0 {
                writeln!(w)?;
            }
            writeln!(w, "file {} (prefix {})", file.path(), file.prefix())?;
            for namespace in file.namespaces() {
                writeln!(w, "  namespace {} {}", namespace.scope, namespace.namespace)?;
            }
            for &include in file.includes() {
                writeln!(w, "  include {}", self.schema.file(include).path())?;
            }
            self.format_file(file.id(), w)?;
        }
        Ok(())
    }

    fn format_file(&self, file: FileId, w: &mut impl Write) -> std::fmt::Result {
        let schema = self.schema;

        for typedef in schema.typedefs().iter().filter(|t| t.file() == file) {
            writeln!(
                w,
                "typedef {} = {}",
                schema.type_name(typedef.type_id()),
                schema.type_name(typedef.old_type())
            )?;
            self.format_annotations(typedef, "  ", w)?;
        }

        for enum_type in schema.enums().iter().filter(|e| e.file() == file) {
            writeln!(w, "enum {}", schema.type_name(enum_type.type_id()))?;
            self.format_annotations(enum_type, "  ", w)?;
            for member in enum_type.members() {
                writeln!(w, "  {} = {}", member.name(), member.value())?;
            }
        }

        for struct_type in schema.all_structs().iter().filter(|s| s.file() == file) {
            writeln!(
                w,
                "{} {}",
                struct_type.kind(),
                schema.type_name(struct_type.type_id())
            )?;
            self.format_annotations(struct_type, "  ", w)?;
            for field in struct_type.fields() {
                writeln!(w, "  {}", self.field(field, true))?;
            }
        }

        for service in schema.services().iter().filter(|s| s.file() == file) {
            write!(w, "service {}", schema.type_name(service.type_id()))?;
            if let Some(base) = service.extends() {
                write!(w, " extends {}", schema.type_name(base))?;
            }
            writeln!(w)?;
            self.format_annotations(service, "  ", w)?;
            for method in service.methods() {
                let params: Vec<String> = method
                    .parameters()
                    .iter()
                    .map(|p| self.field(p, false))
                    .collect();
                write!(
                    w,
                    "  {}{} {}({})",
                    if method.one_way() { "oneway " } else { "" },
                    schema.type_name(method.return_type()),
                    method.name(),
                    params.join(", ")
                )?;
                if !method.exceptions().is_empty() {
                    let exceptions: Vec<String> = method
                        .exceptions()
                        .iter()
                        .map(|e| self.field(e, false))
                        .collect();
                    write!(w, " throws ({})", exceptions.join(", "))?;
                }
                writeln!(w)?;
            }
        }

        for constant in schema.constants().iter().filter(|c| c.file() == file) {
            writeln!(
                w,
                "const {}: {} = {}",
                constant.name(),
                schema.type_name(constant.ty()),
                self.value(constant.value())
            )?;
        }

        Ok(())
    }

    fn format_annotations(
        &self,
        element: &impl UserElement,
        indent: &str,
        w: &mut impl Write,
    ) -> std::fmt::Result {
        if !self.annotations {
            return Ok(());
        }
        for (key, value) in element.annotations() {
            writeln!(w, "{}@{} = {:?}", indent, key, value)?;
        }
        Ok(())
    }

    fn field(&self, field: &Field, with_requiredness: bool) -> String {
        let mut out = format!("{}: ", field.id());
        if with_requiredness {
            out.push_str(&format!("{} ", field.requiredness()));
        }
        out.push_str(&format!(
            "{} {}",
            self.schema.type_name(field.ty()),
            field.name()
        ));
        if let Some(value) = field.default_value() {
            out.push_str(&format!(" = {}", self.value(value)));
        }
        out
    }

    fn value(&self, value: &ConstValue) -> String {
        match value {
            ConstValue::Bool(b) => b.to_string(),
            ConstValue::Integer(i) => i.to_string(),
            ConstValue::Double(d) => format!("{:?}", d),
            ConstValue::String(s) => format!("{:?}", s),
            ConstValue::EnumMember {
                enum_type, name, ..
            } => format!("{}.{}", self.schema.type_name(*enum_type), name),
            ConstValue::List(items) => {
                let items: Vec<String> = items.iter().map(|i| self.value(i)).collect();
                format!("[{}]", items.join(", "))
            }
            ConstValue::Map(entries) => {
                let entries: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", self.value(k), self.value(v)))
                    .collect();
                format!("{{{}}}", entries.join(", "))
            }
            ConstValue::Struct(fields) => {
                let fields: Vec<String> = fields
                    .iter()
                    .map(|(name, v)| format!("{}: {}", name, self.value(v)))
                    .collect();
                format!("{{{}}}", fields.join(", "))
            }
        }
    }
}

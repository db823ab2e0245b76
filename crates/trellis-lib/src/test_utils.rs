//! Compact element-tree builders and schema assertions for tests.
//!
//! Elements are created without positions; [`FileBuilder`] places every
//! declaration on its own line (members on the lines below it), so
//! diagnostics in snapshots point at predictable locations:
//! names at column 1 (members at column 3), types at column 10, values at
//! column 20.

use crate::diagnostics::Diagnostics;
use crate::element::{
    ConstElement, ConstValueElement, ConstValueKind, ElementMeta, EnumElement, EnumMemberElement,
    FieldElement, FileElement, FunctionElement, IncludeElement, NamespaceElement, Requiredness,
    ServiceElement, StructElement, StructKind, TypeElement, TypedefElement,
};
use crate::{Location, Schema, SchemaBuilder};

const NAME_COLUMN: u32 = 1;
const MEMBER_COLUMN: u32 = 3;
const TYPE_COLUMN: u32 = 10;
const VALUE_COLUMN: u32 = 20;

/// Parse a type expression like `map<string, list<shared.Foo>>`.
pub fn ty(text: &str) -> TypeElement {
    let text = text.trim();
    let location = Location::default();
    if let Some(inner) = generic(text, "list") {
        return TypeElement::list(location, ty(inner));
    }
    if let Some(inner) = generic(text, "set") {
        return TypeElement::set(location, ty(inner));
    }
    if let Some(inner) = generic(text, "map") {
        let mut depth = 0;
        let split = inner
            .char_indices()
            .find(|&(_, c)| {
                match c {
                    '<' => depth += 1,
                    '>' => depth -= 1,
                    _ => {}
                }
                c == ',' && depth == 0
            })
            .map(|(i, _)| i)
            .expect("map type needs a key and a value");
        return TypeElement::map(location, ty(&inner[..split]), ty(&inner[split + 1..]));
    }
    TypeElement::named(location, text)
}

fn generic<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    text.strip_prefix(name)?.strip_prefix('<')?.strip_suffix('>')
}

pub fn int(value: i64) -> ConstValueElement {
    ConstValueElement::integer(Location::default(), value)
}

pub fn double(value: f64) -> ConstValueElement {
    ConstValueElement::double(Location::default(), value)
}

pub fn string(value: &str) -> ConstValueElement {
    ConstValueElement::string(Location::default(), value)
}

pub fn ident(value: &str) -> ConstValueElement {
    ConstValueElement::identifier(Location::default(), value)
}

pub fn list(items: Vec<ConstValueElement>) -> ConstValueElement {
    ConstValueElement::list(Location::default(), items)
}

pub fn map(entries: Vec<(ConstValueElement, ConstValueElement)>) -> ConstValueElement {
    ConstValueElement::map(Location::default(), entries)
}

pub fn field(id: i16, type_text: &str, name: &str) -> FieldElement {
    FieldElement::new(ElementMeta::new(name, Location::default()), id, ty(type_text))
}

pub fn required(id: i16, type_text: &str, name: &str) -> FieldElement {
    field(id, type_text, name).with_requiredness(Requiredness::Required)
}

pub fn optional(id: i16, type_text: &str, name: &str) -> FieldElement {
    field(id, type_text, name).with_requiredness(Requiredness::Optional)
}

pub fn member(name: &str, value: Option<i32>) -> EnumMemberElement {
    EnumMemberElement::new(ElementMeta::new(name, Location::default()), value)
}

pub fn method(return_type: &str, name: &str) -> FunctionElement {
    FunctionElement::new(ElementMeta::new(name, Location::default()), ty(return_type))
}

/// Which declaration `annotate`/`document` apply to.
#[derive(Clone, Copy)]
enum Last {
    Typedef,
    Enum,
    Struct,
    Service,
    Constant,
}

pub struct FileBuilder {
    element: FileElement,
    line: u32,
    last: Option<Last>,
}

impl FileBuilder {
    pub fn new(path: &str) -> Self {
        Self {
            element: FileElement::new(path),
            line: 0,
            last: None,
        }
    }

    fn next_line(&mut self) -> u32 {
        self.line += 1;
        self.line
    }

    fn at(&self, line: u32, column: u32) -> Location {
        self.element.location.at(line, column)
    }

    fn meta(&mut self, mut meta: ElementMeta, column: u32) -> ElementMeta {
        let line = self.next_line();
        meta.location = self.at(line, column);
        meta
    }

    fn place_type(&self, ty: &mut TypeElement, line: u32) {
        let location = self.at(line, TYPE_COLUMN);
        match ty {
            TypeElement::Named { location: l, .. } => *l = location,
            TypeElement::List { location: l, element, .. }
            | TypeElement::Set { location: l, element, .. } => {
                *l = location;
                self.place_type(element, line);
            }
            TypeElement::Map {
                location: l,
                key,
                value,
                ..
            } => {
                *l = location;
                self.place_type(key, line);
                self.place_type(value, line);
            }
        }
    }

    fn place_value(&self, value: &mut ConstValueElement, line: u32) {
        value.location = self.at(line, VALUE_COLUMN);
        match &mut value.value {
            ConstValueKind::List(items) => {
                for item in items {
                    self.place_value(item, line);
                }
            }
            ConstValueKind::Map(entries) => {
                for (k, v) in entries {
                    self.place_value(k, line);
                    self.place_value(v, line);
                }
            }
            _ => {}
        }
    }

    fn place_field(&mut self, mut field: FieldElement) -> FieldElement {
        field.meta = self.meta(field.meta, MEMBER_COLUMN);
        let line = self.line;
        self.place_type(&mut field.ty, line);
        if let Some(value) = &mut field.default_value {
            self.place_value(value, line);
        }
        field
    }

    pub fn include(mut self, path: &str) -> Self {
        let line = self.next_line();
        let location = self.at(line, NAME_COLUMN);
        self.element.includes.push(IncludeElement::new(location, path));
        self
    }

    pub fn namespace(mut self, scope: &str, namespace: &str) -> Self {
        let line = self.next_line();
        self.element.namespaces.push(NamespaceElement {
            location: self.at(line, NAME_COLUMN),
            scope: scope.to_string(),
            namespace: namespace.to_string(),
        });
        self
    }

    pub fn typedef(mut self, old_type: &str, name: &str) -> Self {
        let meta = self.meta(ElementMeta::new(name, Location::default()), NAME_COLUMN);
        let mut old_type = ty(old_type);
        self.place_type(&mut old_type, self.line);
        self.element
            .typedefs
            .push(TypedefElement::new(meta, old_type));
        self.last = Some(Last::Typedef);
        self
    }

    pub fn enumeration(mut self, name: &str, members: Vec<EnumMemberElement>) -> Self {
        let meta = self.meta(ElementMeta::new(name, Location::default()), NAME_COLUMN);
        let members = members
            .into_iter()
            .map(|mut m| {
                m.meta = self.meta(m.meta, MEMBER_COLUMN);
                m
            })
            .collect();
        self.element.enums.push(EnumElement::new(meta, members));
        self.last = Some(Last::Enum);
        self
    }

    fn struct_of(mut self, kind: StructKind, name: &str, fields: Vec<FieldElement>) -> Self {
        let meta = self.meta(ElementMeta::new(name, Location::default()), NAME_COLUMN);
        let fields = fields.into_iter().map(|f| self.place_field(f)).collect();
        self.element
            .structs
            .push(StructElement::new(meta, kind, fields));
        self.last = Some(Last::Struct);
        self
    }

    pub fn structure(self, name: &str, fields: Vec<FieldElement>) -> Self {
        self.struct_of(StructKind::Struct, name, fields)
    }

    pub fn union(self, name: &str, fields: Vec<FieldElement>) -> Self {
        self.struct_of(StructKind::Union, name, fields)
    }

    pub fn exception(self, name: &str, fields: Vec<FieldElement>) -> Self {
        self.struct_of(StructKind::Exception, name, fields)
    }

    pub fn service(self, name: &str, methods: Vec<FunctionElement>) -> Self {
        self.service_of(name, None, methods)
    }

    pub fn service_extends(self, name: &str, base: &str, methods: Vec<FunctionElement>) -> Self {
        self.service_of(name, Some(base), methods)
    }

    fn service_of(mut self, name: &str, base: Option<&str>, methods: Vec<FunctionElement>) -> Self {
        let meta = self.meta(ElementMeta::new(name, Location::default()), NAME_COLUMN);
        let line = self.line;
        let mut service = ServiceElement::new(meta, Vec::new());
        if let Some(base) = base {
            let mut base = ty(base);
            self.place_type(&mut base, line);
            service = service.with_extends(base);
        }
        for mut function in methods {
            function.meta = self.meta(function.meta, MEMBER_COLUMN);
            let line = self.line;
            self.place_type(&mut function.return_type, line);
            function.params = std::mem::take(&mut function.params)
                .into_iter()
                .map(|p| self.place_field(p))
                .collect();
            function.exceptions = std::mem::take(&mut function.exceptions)
                .into_iter()
                .map(|e| self.place_field(e))
                .collect();
            service.functions.push(function);
        }
        self.element.services.push(service);
        self.last = Some(Last::Service);
        self
    }

    pub fn constant(mut self, type_text: &str, name: &str, mut value: ConstValueElement) -> Self {
        let meta = self.meta(ElementMeta::new(name, Location::default()), NAME_COLUMN);
        let line = self.line;
        let mut const_type = ty(type_text);
        self.place_type(&mut const_type, line);
        self.place_value(&mut value, line);
        self.element
            .constants
            .push(ConstElement::new(meta, const_type, value));
        self.last = Some(Last::Constant);
        self
    }

    fn last_meta(&mut self) -> &mut ElementMeta {
        let file = &mut self.element;
        let meta = match self.last.expect("no declaration to modify") {
            Last::Typedef => file.typedefs.last_mut().map(|d| &mut d.meta),
            Last::Enum => file.enums.last_mut().map(|d| &mut d.meta),
            Last::Struct => file.structs.last_mut().map(|d| &mut d.meta),
            Last::Service => file.services.last_mut().map(|d| &mut d.meta),
            Last::Constant => file.constants.last_mut().map(|d| &mut d.meta),
        };
        meta.expect("declaration exists")
    }

    /// Add an annotation to the most recent declaration.
    pub fn annotate(mut self, key: &str, value: &str) -> Self {
        self.last_meta()
            .annotations
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Set the documentation of the most recent declaration.
    pub fn document(mut self, text: &str) -> Self {
        self.last_meta().documentation = text.to_string();
        self
    }

    pub fn build(self) -> FileElement {
        self.element
    }
}

pub fn builder(files: Vec<FileElement>) -> SchemaBuilder<'static> {
    SchemaBuilder::new().files(files)
}

pub fn expect_valid(files: Vec<FileElement>) -> Schema {
    match builder(files).build() {
        Ok(schema) => schema,
        Err(err) => panic!(
            "expected a valid schema, got:\n{}",
            err.diagnostics().render()
        ),
    }
}

/// Build, expect failure, and render the sorted diagnostics one per line.
pub fn expect_invalid(files: Vec<FileElement>) -> String {
    match builder(files).build() {
        Ok(_) => panic!("expected diagnostics, schema built successfully"),
        Err(err) => err.diagnostics().render(),
    }
}

/// Link without the fail-fast boundary.
pub fn link_unchecked(files: Vec<FileElement>) -> (Schema, Diagnostics) {
    let (schema, diagnostics) = builder(files).link();
    (schema, diagnostics.sorted())
}

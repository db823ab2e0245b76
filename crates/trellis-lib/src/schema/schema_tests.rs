use crate::element::{StructKind, UserElement};
use crate::model::ConstValue;
use crate::test_utils::*;
use crate::types::{TYPE_I32, TYPE_INVALID};

fn sample() -> crate::Schema {
    let shared = FileBuilder::new("shared.thrift")
        .namespace("java", "com.example.shared")
        .constant("i32", "LIMIT", int(10))
        .structure("Foo", vec![])
        .document("Shared value type.")
        .build();
    let main = FileBuilder::new("main.thrift")
        .include("shared.thrift")
        .structure("Foo", vec![field(1, "shared.Foo", "inner")])
        .union("Either", vec![field(1, "i32", "left"), field(2, "string", "right")])
        .exception("Failed", vec![])
        .service("Api", vec![method("Foo", "get")])
        .constant("i32", "LIMIT", ident("shared.LIMIT"))
        .build();
    expect_valid(vec![main, shared])
}

#[test]
fn declarations_by_kind() {
    let schema = sample();
    assert_eq!(schema.all_structs().len(), 4);
    assert_eq!(schema.structs().count(), 2);
    assert_eq!(schema.unions().count(), 1);
    assert_eq!(schema.exceptions().count(), 1);
    assert_eq!(schema.services().len(), 1);
    assert_eq!(schema.constants().len(), 2);
    assert!(schema.typedefs().is_empty());
    assert!(schema.enums().is_empty());
}

#[test]
fn find_type_by_qualified_and_bare_name() {
    let schema = sample();
    let main_foo = schema.find_type("main.Foo").unwrap();
    let shared_foo = schema.find_type("shared.Foo").unwrap();
    assert_ne!(main_foo, shared_foo);

    // Bare names resolve in file registration order
    assert_eq!(schema.find_type("Foo"), Some(main_foo));
    assert_eq!(schema.find_type("Either"), schema.find_type("main.Either"));
    assert_eq!(schema.find_type("Missing"), None);
    assert_eq!(schema.find_type("nope.Foo"), None);

    let foo = schema.find_struct(main_foo).unwrap();
    assert_eq!(foo.kind(), StructKind::Struct);
    assert_eq!(foo.fields()[0].ty(), shared_foo);
}

#[test]
fn find_declaration_by_id() {
    let schema = sample();
    let api = schema.find_type("Api").unwrap();
    assert!(schema.find_service(api).is_some());
    assert!(schema.find_struct(api).is_none());
    assert!(schema.find_enum(api).is_none());
    assert!(schema.find_typedef(api).is_none());
}

#[test]
fn find_constant() {
    let schema = sample();
    let main_limit = schema.find_constant("main.LIMIT").unwrap();
    assert_eq!(main_limit.value(), &ConstValue::Integer(10));
    assert_eq!(main_limit.ty(), TYPE_I32);
    assert_eq!(schema.file(main_limit.file()).path(), "main.thrift");

    let shared_limit = schema.find_constant("shared.LIMIT").unwrap();
    assert_eq!(schema.file(shared_limit.file()).prefix(), "shared");
    assert!(schema.find_constant("LIMIT").is_some());
    assert!(schema.find_constant("OTHER").is_none());
}

#[test]
fn files_keep_namespaces_and_includes() {
    let schema = sample();
    let files: Vec<_> = schema.files().collect();
    assert_eq!(files.len(), 2);

    let [main, shared] = files.as_slice() else {
        unreachable!();
    };
    assert_eq!(main.includes(), &[shared.id()]);
    assert_eq!(shared.namespaces()[0].scope, "java");
    assert_eq!(shared.namespaces()[0].namespace, "com.example.shared");
}

#[test]
fn documentation_is_preserved() {
    let schema = sample();
    let foo = schema.find_struct(schema.find_type("shared.Foo").unwrap()).unwrap();
    assert!(foo.has_documentation());
    assert_eq!(foo.documentation(), "Shared value type.");
}

#[test]
fn type_names() {
    let schema = sample();
    let api = schema.find_type("Api").unwrap();
    let get = schema.find_service(api).unwrap().method("get").unwrap();
    assert_eq!(schema.type_name(get.return_type()), "main.Foo");
    assert_eq!(schema.type_name(TYPE_I32), "i32");
    assert_eq!(schema.type_name(TYPE_INVALID), "<invalid>");
}

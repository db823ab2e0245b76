use indoc::indoc;

use super::*;
use crate::Location;

fn loc(line: u32, column: u32) -> Location {
    Location::new("a.thrift", line, column)
}

#[test]
fn has_documentation_ignores_whitespace() {
    let blank = ElementMeta::new("A", loc(1, 1)).with_documentation("  \n\t");
    let documented = ElementMeta::new("A", loc(1, 1)).with_documentation("A user id.");

    assert!(!blank.has_documentation());
    assert!(documented.has_documentation());
}

#[test]
fn deprecated_from_annotation() {
    let meta = ElementMeta::new("Old", loc(1, 1)).with_annotation("deprecated", "");
    assert!(meta.is_deprecated());
}

#[test]
fn deprecated_from_doc_tag() {
    let meta = ElementMeta::new("Old", loc(1, 1))
        .with_documentation("Do not use.\n@deprecated use New instead");
    assert!(meta.is_deprecated());
}

#[test]
fn not_deprecated_by_default() {
    let meta = ElementMeta::new("New", loc(1, 1)).with_annotation("python.name", "new");
    assert!(!meta.is_deprecated());
}

#[test]
fn include_prefix_is_file_stem() {
    let include = IncludeElement::new(loc(1, 1), "idl/common/shared.thrift");
    assert_eq!(include.prefix(), "shared");
    assert_eq!(file_prefix("base.v2.thrift"), "base");
    assert_eq!(file_prefix("plain"), "plain");
}

#[test]
fn type_element_display() {
    let ty = TypeElement::map(
        loc(1, 1),
        TypeElement::named(loc(1, 5), "string"),
        TypeElement::list(loc(1, 13), TypeElement::named(loc(1, 18), "shared.Foo")),
    );
    insta::assert_snapshot!(ty.to_string(), @"map<string, list<shared.Foo>>");
}

#[test]
fn file_element_from_json() {
    let json = indoc! {r#"
        {
          "location": { "path": "user.thrift" },
          "namespaces": [
            { "location": { "path": "user.thrift", "line": 1, "column": 1 }, "scope": "java", "namespace": "com.example" }
          ],
          "typedefs": [
            {
              "name": "UserId",
              "location": { "path": "user.thrift", "line": 3, "column": 16 },
              "old_type": { "kind": "named", "location": { "path": "user.thrift", "line": 3, "column": 9 }, "name": "string" }
            }
          ],
          "structs": [
            {
              "name": "User",
              "location": { "path": "user.thrift", "line": 5, "column": 8 },
              "documentation": "A user.",
              "fields": [
                {
                  "name": "id",
                  "location": { "path": "user.thrift", "line": 6, "column": 3 },
                  "id": 1,
                  "requiredness": "required",
                  "type": { "kind": "named", "location": { "path": "user.thrift", "line": 6, "column": 15 }, "name": "UserId" },
                  "default_value": { "location": { "path": "user.thrift", "line": 6, "column": 27 }, "value": { "kind": "string", "value": "anonymous" } }
                }
              ]
            }
          ]
        }
    "#};

    let file: FileElement = serde_json::from_str(json).expect("valid element tree");

    assert_eq!(file.path(), "user.thrift");
    assert_eq!(file.location.line, 1);
    assert_eq!(file.namespaces[0].namespace, "com.example");
    assert_eq!(file.typedefs[0].name(), "UserId");
    assert_eq!(file.typedefs[0].old_type.to_string(), "string");

    let user = &file.structs[0];
    assert_eq!(user.kind, StructKind::Struct);
    assert!(user.has_documentation());

    let id = &user.fields[0];
    assert_eq!(id.id, 1);
    assert_eq!(id.requiredness, Requiredness::Required);
    assert_eq!(id.ty.to_string(), "UserId");
    assert_eq!(
        id.default_value.as_ref().map(|v| &v.value),
        Some(&ConstValueKind::String("anonymous".into()))
    );
}

#[test]
fn const_value_map_from_json() {
    let json = indoc! {r#"
        {
          "location": { "path": "a.thrift", "line": 2, "column": 30 },
          "value": {
            "kind": "map",
            "value": [
              [
                { "location": { "path": "a.thrift", "line": 2, "column": 31 }, "value": { "kind": "string", "value": "a" } },
                { "location": { "path": "a.thrift", "line": 2, "column": 36 }, "value": { "kind": "integer", "value": 1 } }
              ]
            ]
          }
        }
    "#};

    let value: ConstValueElement = serde_json::from_str(json).expect("valid literal");
    let ConstValueKind::Map(entries) = &value.value else {
        panic!("expected a map literal, got {:?}", value.value);
    };
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].1.value, ConstValueKind::Integer(1));
}

#[test]
fn equality_ignores_location() {
    assert_eq!(ElementMeta::new("id", loc(1, 1)), ElementMeta::new("id", loc(9, 9)));
    assert_ne!(ElementMeta::new("id", loc(1, 1)), ElementMeta::new("name", loc(1, 1)));

    let a = FieldElement::new(
        ElementMeta::new("id", loc(2, 3)),
        1,
        TypeElement::list(loc(2, 6), TypeElement::named(loc(2, 11), "i32")),
    )
    .with_default(ConstValueElement::list(loc(2, 20), vec![]));
    let b = FieldElement::new(
        ElementMeta::new("id", Location::new("b.thrift", 7, 5)),
        1,
        TypeElement::list(loc(7, 8), TypeElement::named(loc(7, 13), "i32")),
    )
    .with_default(ConstValueElement::list(loc(7, 22), vec![]));
    assert_eq!(a, b);

    let c = FieldElement::new(
        ElementMeta::new("id", loc(2, 3)),
        1,
        TypeElement::set(loc(2, 6), TypeElement::named(loc(2, 11), "i32")),
    );
    assert_ne!(a, c);
}

#[test]
fn file_equality_keeps_the_path() {
    let mut a = FileElement::new("a.thrift");
    a.includes.push(IncludeElement::new(loc(1, 1), "shared.thrift"));
    let mut moved = FileElement::new("a.thrift");
    moved.includes.push(IncludeElement::new(loc(4, 1), "shared.thrift"));
    let mut other = FileElement::new("b.thrift");
    other.includes.push(IncludeElement::new(loc(1, 1), "shared.thrift"));

    assert_eq!(a, moved);
    assert_ne!(a, other);
}

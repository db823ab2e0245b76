use super::*;

fn loc(path: &str, line: u32, column: u32) -> Location {
    Location::new(path, line, column)
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateFieldId, &loc("a.thrift", 1, 1))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    insta::assert_snapshot!(diagnostics.render(), @"error at a.thrift:1:1: duplicate field id");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedType, &loc("a.thrift", 3, 7))
        .message("Foo")
        .emit();

    insta::assert_snapshot!(diagnostics.render(), @"error at a.thrift:3:7: `Foo` is not a known type");
}

#[test]
fn default_hint_is_attached() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::AmbiguousType, &loc("a.thrift", 2, 5))
        .message("Foo")
        .emit();

    insta::assert_snapshot!(
        diagnostics.render(),
        @"error at a.thrift:2:5: `Foo` is ambiguous (hint: qualify the name with its include prefix)"
    );
}

#[test]
fn builder_with_related() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateSymbol, &loc("a.thrift", 4, 1))
        .message("Foo")
        .related_to("first declared here", &loc("a.thrift", 1, 1))
        .emit();

    insta::assert_snapshot!(
        diagnostics.render(),
        @"error at a.thrift:4:1: `Foo` is already declared (related: first declared here at a.thrift:1:1)"
    );
}

#[test]
fn warnings_do_not_count_as_errors() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DeprecatedUsage, &loc("a.thrift", 1, 1))
        .message("Old")
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(diagnostics.error_count(), 0);
}

#[test]
fn sorted_orders_by_file_then_position() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::TypeMismatch, &loc("b.thrift", 1, 1))
        .emit();
    diagnostics
        .report(DiagnosticKind::DuplicateFieldId, &loc("a.thrift", 9, 2))
        .emit();
    diagnostics
        .report(DiagnosticKind::UnresolvedType, &loc("a.thrift", 9, 1))
        .emit();
    diagnostics
        .report(DiagnosticKind::DuplicateSymbol, &loc("a.thrift", 2, 8))
        .emit();

    insta::assert_snapshot!(diagnostics.sorted().render(), @r"
    error at a.thrift:2:8: duplicate declaration
    error at a.thrift:9:1: unknown type
    error at a.thrift:9:2: duplicate field id
    error at b.thrift:1:1: type mismatch
    ");
}

#[test]
fn sorted_uses_kind_as_tiebreak() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::OneWayThrows, &loc("a.thrift", 1, 1))
        .emit();
    diagnostics
        .report(DiagnosticKind::OneWayReturnType, &loc("a.thrift", 1, 1))
        .emit();

    let kinds: Vec<_> = diagnostics.sorted().iter().map(|d| d.kind()).collect();
    assert_eq!(
        kinds,
        vec![DiagnosticKind::OneWayReturnType, DiagnosticKind::OneWayThrows]
    );
}

#[test]
fn extend_and_count_of() {
    let mut a = Diagnostics::new();
    a.report(DiagnosticKind::DuplicateFieldId, &loc("a.thrift", 1, 1))
        .emit();
    let mut b = Diagnostics::new();
    b.report(DiagnosticKind::DuplicateFieldId, &loc("a.thrift", 2, 1))
        .emit();
    b.report(DiagnosticKind::DeprecatedUsage, &loc("a.thrift", 3, 1))
        .emit();

    a.extend(b);
    assert_eq!(a.len(), 3);
    assert_eq!(a.count_of(DiagnosticKind::DuplicateFieldId), 2);
    assert_eq!(a.warnings().len(), 1);
}

#[test]
fn printer_renders_snippet_when_source_known() {
    let source = "struct User {\n  1: UserId id\n}\n";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedType, &loc("user.thrift", 2, 6))
        .message("UserId")
        .emit();

    let out = diagnostics
        .printer()
        .source("user.thrift", source)
        .render();

    assert!(out.contains("error: `UserId` is not a known type"), "{out}");
    assert!(out.contains("1: UserId id"), "{out}");
    assert!(out.contains("^^^^^^"), "{out}");
}

#[test]
fn printer_falls_back_to_plain_for_unknown_source() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedType, &loc("other.thrift", 2, 6))
        .message("UserId")
        .emit();

    let out = diagnostics
        .printer()
        .source("user.thrift", "struct User {}")
        .render();

    insta::assert_snapshot!(out, @"error at other.thrift:2:6: `UserId` is not a known type");
}

#[test]
fn printer_handles_multibyte_source() {
    let source = "// éé Foo\nstruct A {}\n";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedType, &loc("a.thrift", 1, 7))
        .message("Foo")
        .emit();
    diagnostics
        .report(DiagnosticKind::UnresolvedType, &loc("a.thrift", 1, 5))
        .message("é")
        .emit();

    let out = diagnostics.printer().source("a.thrift", source).render();

    assert!(out.contains("`Foo` is not a known type"), "{out}");
    assert!(out.contains("// éé Foo"), "{out}");
}

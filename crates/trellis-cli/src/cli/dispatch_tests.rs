//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Params extraction: flags end up in the right fields
//! 2. Defaults: omitted flags fall back to the library defaults
//! 3. Help: every command documents its own flags

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{check_command, dump_command};
use crate::commands::check::OutputFormat;

#[test]
fn check_params_extracts_all_fields() {
    let m = check_command()
        .try_get_matches_from([
            "check",
            "a.json",
            "b.json",
            "-I",
            "idl",
            "--include-dir",
            "vendor",
            "--strict",
            "--no-deprecation-warnings",
            "--max-include-depth",
            "8",
            "--format",
            "json",
            "--color",
            "never",
        ])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(
        params.files,
        vec![PathBuf::from("a.json"), PathBuf::from("b.json")]
    );
    assert_eq!(
        params.include_dirs,
        vec![PathBuf::from("idl"), PathBuf::from("vendor")]
    );
    assert!(params.strict);
    assert!(!params.deprecation_warnings);
    assert_eq!(params.max_include_depth, 8);
    assert_eq!(params.format, OutputFormat::Json);
    assert_eq!(params.color, ColorChoice::Never);
}

#[test]
fn check_defaults() {
    let m = check_command()
        .try_get_matches_from(["check", "a.json"])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert!(params.include_dirs.is_empty());
    assert!(!params.strict);
    assert!(params.deprecation_warnings);
    assert_eq!(params.max_include_depth, 64);
    assert_eq!(params.format, OutputFormat::Text);
    assert_eq!(params.color, ColorChoice::Auto);
}

#[test]
fn check_requires_a_file() {
    let result = check_command().try_get_matches_from(["check"]);
    assert!(result.is_err());
}

#[test]
fn check_rejects_unknown_format() {
    let result = check_command().try_get_matches_from(["check", "a.json", "--format", "xml"]);
    assert!(result.is_err());
}

#[test]
fn dump_params_extracts_all_fields() {
    let m = dump_command()
        .try_get_matches_from([
            "dump",
            "a.json",
            "--annotations",
            "-o",
            "out.txt",
            "--color",
            "always",
            "-vv",
        ])
        .unwrap();
    let params = DumpParams::from_matches(&m);

    assert_eq!(params.files, vec![PathBuf::from("a.json")]);
    assert!(params.annotations);
    assert_eq!(params.output, Some(PathBuf::from("out.txt")));
    assert_eq!(params.color, ColorChoice::Always);
    assert_eq!(m.get_count("verbose"), 2);
}

#[test]
fn dump_does_not_accept_check_flags() {
    let result = dump_command().try_get_matches_from(["dump", "a.json", "--strict"]);
    assert!(result.is_err());
}

#[test]
fn help_lists_command_flags() {
    let check = check_command().render_help().to_string();
    assert!(check.contains("--strict"));
    assert!(check.contains("--include-dir"));
    assert!(!check.contains("--annotations"));

    let dump = dump_command().render_help().to_string();
    assert!(dump.contains("--annotations"));
    assert!(!dump.contains("--format"));
}

#[test]
fn cli_requires_subcommand() {
    let result = build_cli().try_get_matches_from(["trellis"]);
    assert!(result.is_err());
}

//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Element tree files to link (positional, one or more).
pub fn input_files_arg() -> Arg {
    Arg::new("files")
        .value_name("FILE")
        .num_args(1..)
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("JSON element trees of the root IDL files")
}

/// Include search directory (-I/--include-dir), repeatable.
pub fn include_dir_arg() -> Arg {
    Arg::new("include_dirs")
        .short('I')
        .long("include-dir")
        .value_name("DIR")
        .action(ArgAction::Append)
        .value_parser(value_parser!(PathBuf))
        .help("Directory to search for included files")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Silence deprecation warnings (--no-deprecation-warnings).
pub fn no_deprecation_warnings_arg() -> Arg {
    Arg::new("no_deprecation_warnings")
        .long("no-deprecation-warnings")
        .action(ArgAction::SetTrue)
        .help("Do not warn about uses of deprecated types")
}

/// Maximum include nesting (--max-include-depth).
pub fn max_include_depth_arg() -> Arg {
    Arg::new("max_include_depth")
        .long("max-include-depth")
        .value_name("N")
        .default_value("64")
        .value_parser(value_parser!(u32))
        .help("Maximum include nesting depth")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Diagnostic output format (--format).
pub fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .default_value("text")
        .value_parser(["text", "json"])
        .help("Diagnostic format (text, json)")
}

/// Print annotations in the dump (--annotations).
pub fn annotations_arg() -> Arg {
    Arg::new("annotations")
        .long("annotations")
        .action(ArgAction::SetTrue)
        .help("Include annotations in the dump")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for debug logs, -vv for trace logs)")
}

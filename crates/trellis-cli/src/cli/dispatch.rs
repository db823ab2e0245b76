//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` structs mirror the command `*Args` but are populated from clap;
//! the `Into<*Args>` impls bridge dispatch to the command handlers.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::{CheckArgs, OutputFormat};
use crate::commands::dump::DumpArgs;
use crate::commands::run_common::SchemaOptions;

pub struct CheckParams {
    pub files: Vec<PathBuf>,
    pub include_dirs: Vec<PathBuf>,
    pub strict: bool,
    pub deprecation_warnings: bool,
    pub max_include_depth: u32,
    pub format: OutputFormat,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            files: paths(m, "files"),
            include_dirs: paths(m, "include_dirs"),
            strict: m.get_flag("strict"),
            deprecation_warnings: !m.get_flag("no_deprecation_warnings"),
            max_include_depth: parse_max_include_depth(m),
            format: match m.get_one::<String>("format").map(|s| s.as_str()) {
                Some("json") => OutputFormat::Json,
                _ => OutputFormat::Text,
            },
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            schema: SchemaOptions {
                files: p.files,
                include_dirs: p.include_dirs,
                strict: p.strict,
                deprecation_warnings: p.deprecation_warnings,
                max_include_depth: p.max_include_depth,
            },
            format: p.format,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub files: Vec<PathBuf>,
    pub include_dirs: Vec<PathBuf>,
    pub deprecation_warnings: bool,
    pub max_include_depth: u32,
    pub annotations: bool,
    pub output: Option<PathBuf>,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            files: paths(m, "files"),
            include_dirs: paths(m, "include_dirs"),
            deprecation_warnings: !m.get_flag("no_deprecation_warnings"),
            max_include_depth: parse_max_include_depth(m),
            annotations: m.get_flag("annotations"),
            output: m.get_one::<PathBuf>("output").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            schema: SchemaOptions {
                files: p.files,
                include_dirs: p.include_dirs,
                strict: false,
                deprecation_warnings: p.deprecation_warnings,
                max_include_depth: p.max_include_depth,
            },
            annotations: p.annotations,
            output: p.output,
            color: p.color.should_colorize(),
        }
    }
}

fn paths(m: &ArgMatches, id: &str) -> Vec<PathBuf> {
    m.get_many::<PathBuf>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn parse_max_include_depth(m: &ArgMatches) -> u32 {
    m.get_one::<u32>("max_include_depth").copied().unwrap_or(64)
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

//! Shared plumbing for commands that build a schema.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use trellis_lib::{Diagnostics, Schema};

use super::schema_loader::load_inputs;

pub struct SchemaOptions {
    pub files: Vec<PathBuf>,
    pub include_dirs: Vec<PathBuf>,
    pub strict: bool,
    pub deprecation_warnings: bool,
    pub max_include_depth: u32,
}

/// Load the inputs and build; exits on unreadable input.
pub fn build_schema(options: &SchemaOptions) -> trellis_lib::Result<Schema> {
    let inputs = match load_inputs(&options.files, &options.include_dirs) {
        Ok(inputs) => inputs,
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    };

    Schema::builder()
        .files(inputs.roots)
        .include_resolver(inputs.resolver)
        .with_strict(options.strict)
        .with_deprecation_warnings(options.deprecation_warnings)
        .with_max_include_depth(options.max_include_depth)
        .build()
}

/// Render diagnostics, with source snippets for files readable from disk.
pub fn render_diagnostics(diagnostics: &Diagnostics, color: bool) -> String {
    let paths: BTreeSet<&str> = diagnostics
        .iter()
        .map(|d| d.location().path.as_str())
        .collect();
    let sources: Vec<(&str, String)> = paths
        .into_iter()
        .filter_map(|path| fs::read_to_string(path).ok().map(|text| (path, text)))
        .collect();

    let mut printer = diagnostics.printer().colored(color);
    for (path, text) in &sources {
        printer = printer.source(path, text);
    }
    printer.render()
}

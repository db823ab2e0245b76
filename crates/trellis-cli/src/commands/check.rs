use serde::Serialize;
use trellis_lib::Diagnostics;
use trellis_lib::diagnostics::DiagnosticMessage;

use super::run_common::{SchemaOptions, build_schema, render_diagnostics};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub struct CheckArgs {
    pub schema: SchemaOptions,
    pub format: OutputFormat,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let (diagnostics, valid) = match build_schema(&args.schema) {
        Ok(schema) => (schema.warnings().clone(), true),
        Err(err) => (err.diagnostics().clone(), false),
    };

    match args.format {
        OutputFormat::Json => println!("{}", diagnostics_json(&diagnostics)),
        OutputFormat::Text if !diagnostics.is_empty() => {
            eprintln!("{}", render_diagnostics(&diagnostics, args.color));
        }
        // Silent on success (like cargo check)
        OutputFormat::Text => {}
    }

    if !valid {
        std::process::exit(1);
    }
}

#[derive(Serialize)]
struct DiagnosticRecord<'a> {
    severity: String,
    kind: String,
    path: &'a str,
    line: u32,
    column: u32,
    message: &'a str,
    hints: &'a [String],
}

impl<'a> From<&'a DiagnosticMessage> for DiagnosticRecord<'a> {
    fn from(d: &'a DiagnosticMessage) -> Self {
        Self {
            severity: d.severity().to_string(),
            kind: format!("{:?}", d.kind()),
            path: &d.location().path,
            line: d.location().line,
            column: d.location().column,
            message: d.message(),
            hints: d.hints(),
        }
    }
}

pub fn diagnostics_json(diagnostics: &Diagnostics) -> String {
    let records: Vec<DiagnosticRecord<'_>> = diagnostics.iter().map(Into::into).collect();
    serde_json::to_string_pretty(&records).expect("diagnostic records always serialize")
}

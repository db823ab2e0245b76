use std::fs;
use std::path::PathBuf;

use super::run_common::{SchemaOptions, build_schema, render_diagnostics};

pub struct DumpArgs {
    pub schema: SchemaOptions,
    pub annotations: bool,
    pub output: Option<PathBuf>,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let schema = match build_schema(&args.schema) {
        Ok(schema) => schema,
        Err(err) => {
            eprintln!("{}", render_diagnostics(err.diagnostics(), args.color));
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    };

    if !schema.warnings().is_empty() {
        eprintln!("{}", render_diagnostics(schema.warnings(), args.color));
    }

    let dump = schema.printer().annotations(args.annotations).render();
    match &args.output {
        Some(path) => {
            if let Err(err) = fs::write(path, dump) {
                eprintln!("error: failed to write '{}': {}", path.display(), err);
                std::process::exit(1);
            }
        }
        None => print!("{}", dump),
    }
}

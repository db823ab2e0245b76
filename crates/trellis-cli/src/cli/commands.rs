//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Flags every command that builds a schema accepts.
fn with_schema_args(cmd: Command) -> Command {
    cmd.arg(input_files_arg())
        .arg(include_dir_arg())
        .arg(no_deprecation_warnings_arg())
        .arg(max_include_depth_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("trellis")
        .about("Link and validate Thrift-style IDL schemas")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(dump_command())
}

/// Link and validate, reporting diagnostics.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Link and validate element trees")
        .override_usage(
            "\
  trellis check <FILE>... [-I <DIR>]...
  trellis check <FILE>... --strict
  trellis check <FILE>... --format json",
        )
        .after_help(
            r#"EXAMPLES:
  trellis check user.thrift.json               # silent when valid
  trellis check api.json -I idl/ -I vendor/    # search include dirs
  trellis check api.json --strict              # warnings fail the check
  trellis check api.json --format json         # machine-readable diagnostics"#,
        )
        .arg(strict_arg())
        .arg(format_arg());

    with_schema_args(cmd)
}

/// Print the linked schema.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show the linked schema")
        .override_usage(
            "\
  trellis dump <FILE>... [-I <DIR>]...
  trellis dump <FILE>... -o <OUT>",
        )
        .after_help(
            r#"EXAMPLES:
  trellis dump user.thrift.json                # resolved declarations
  trellis dump api.json --annotations          # include annotations
  trellis dump api.json -o schema.txt          # write to a file"#,
        )
        .arg(annotations_arg())
        .arg(output_file_arg());

    with_schema_args(cmd)
}

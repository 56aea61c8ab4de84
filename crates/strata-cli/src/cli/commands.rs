//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.
//! The unified flags feature is implemented here: check/closure/emit accept
//! each other's flags, with irrelevant ones hidden from `--help`.

use clap::Command;

use super::args::*;

/// Add hidden selector args (for commands that don't pick a module).
fn with_hidden_selector_args(cmd: Command) -> Command {
    cmd.arg(module_arg().hide(true)).arg(target_arg().hide(true))
}

/// Add hidden emit args (for commands that don't render an artifact).
fn with_hidden_emit_args(cmd: Command) -> Command {
    cmd.arg(family_arg().hide(true))
        .arg(layered_arg().hide(true))
        .arg(with_arg_arg().hide(true))
        .arg(output_file_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("strata")
        .about("Derive visitor and builder traversals from node-kind tables")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(closure_command())
        .subcommand(emit_command())
        .subcommand(apply_command())
}

/// Validate descriptor tables.
///
/// Accepts selector and emit flags for unified CLI experience, but only uses
/// tables/strict/color.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate descriptor tables")
        .override_usage(
            "\
  strata check <TABLE>...
  strata check -t <TEXT>
  strata check - < table.tbl",
        )
        .after_help(
            r#"EXAMPLES:
  strata check core.tbl                # one table
  strata check core.tbl data.tbl       # layered stack, upstream first
  strata check core.tbl --strict       # warnings fail the check
  strata check -t 'module core'        # inline table text"#,
        )
        .arg(table_paths_arg())
        .arg(table_text_arg())
        .arg(strict_arg())
        .arg(color_arg());

    // Hidden unified flags
    with_hidden_emit_args(with_hidden_selector_args(cmd)).arg(json_arg().hide(true))
}

/// Show which kinds need hooks for a module/target pair.
///
/// Accepts emit flags for unified CLI experience, but ignores them.
pub fn closure_command() -> Command {
    let cmd = Command::new("closure")
        .about("Show which kinds need hooks for a module and target type")
        .override_usage(
            "\
  strata closure <TABLE>... -m <MODULE> --target <TYPE>
  strata closure <TABLE>... -m <MODULE> --target <TYPE> --json",
        )
        .after_help(
            r#"EXAMPLES:
  strata closure core.tbl -m core --target expr           # member list
  strata closure core.tbl data.tbl -m data --target expr  # across the chain
  strata closure core.tbl -m core --target expr --json    # full closure"#,
        )
        .arg(table_paths_arg())
        .arg(table_text_arg())
        .arg(module_arg().required(true))
        .arg(target_arg().required(true))
        .arg(json_arg())
        .arg(color_arg());

    // Hidden unified flags
    with_hidden_emit_args(cmd).arg(strict_arg().hide(true))
}

/// Render one artifact to stdout or a file.
///
/// Accepts check/closure flags for unified CLI experience, but ignores them.
pub fn emit_command() -> Command {
    let cmd = Command::new("emit")
        .about("Render one generated artifact")
        .override_usage(
            "\
  strata emit <TABLE>... -m <MODULE> --target <TYPE> --family <FAMILY>
  strata emit <TABLE>... -m <MODULE> --family predicates",
        )
        .after_help(
            r#"EXAMPLES:
  strata emit core.tbl -m core --target expr --family visitor
  strata emit core.tbl -m core --target expr --family builder --with-arg
  strata emit core.tbl data.tbl -m data --target expr --family visitor --layered
  strata emit core.tbl -m core --family predicates -o predicates.rs"#,
        )
        .arg(table_paths_arg())
        .arg(table_text_arg())
        .arg(module_arg().required(true))
        .arg(target_arg())
        .arg(family_arg().required(true))
        .arg(layered_arg())
        .arg(with_arg_arg())
        .arg(output_file_arg())
        .arg(color_arg());

    // Hidden unified flags
    cmd.arg(json_arg().hide(true)).arg(strict_arg().hide(true))
}

/// Run every task in a generation plan.
pub fn apply_command() -> Command {
    Command::new("apply")
        .about("Splice every task in a generation plan into its artifact")
        .override_usage("  strata apply <PLAN>")
        .after_help(
            r#"EXAMPLES:
  strata apply gen.json                # patch all marked regions
  strata apply gen.json --color never  # plain diagnostics"#,
        )
        .arg(plan_path_arg().required(true))
        .arg(color_arg())
}

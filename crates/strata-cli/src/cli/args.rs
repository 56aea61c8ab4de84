//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.
//! This allows the same arg definition to be reused across commands with
//! different visibility settings (via `.hide(true)`).

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Descriptor table files, upstream modules first (positional).
pub fn table_paths_arg() -> Arg {
    Arg::new("tables")
        .value_name("TABLE")
        .num_args(1..)
        .value_parser(value_parser!(PathBuf))
        .help("Descriptor table files, upstream modules first ('-' reads stdin)")
}

/// Inline table text (-t/--table).
pub fn table_text_arg() -> Arg {
    Arg::new("table_text")
        .short('t')
        .long("table")
        .value_name("TEXT")
        .help("Inline table text")
}

/// Module whose hooks to derive (-m/--module).
pub fn module_arg() -> Arg {
    Arg::new("module")
        .short('m')
        .long("module")
        .value_name("NAME")
        .help("Module whose hooks to derive")
}

/// Root type the traversal covers (--target).
pub fn target_arg() -> Arg {
    Arg::new("target")
        .long("target")
        .value_name("TYPE")
        .help("Root type the traversal covers")
}

/// Artifact family to render (--family).
pub fn family_arg() -> Arg {
    Arg::new("family")
        .long("family")
        .value_name("FAMILY")
        .value_parser(["visitor", "builder", "predicates"])
        .help("Artifact family to render")
}

/// Split hooks into per-module mixins (--layered).
pub fn layered_arg() -> Arg {
    Arg::new("layered")
        .long("layered")
        .action(ArgAction::SetTrue)
        .help("Split hooks into per-module mixins along the upstream chain")
}

/// Thread a caller argument through hooks (--with-arg).
pub fn with_arg_arg() -> Arg {
    Arg::new("with_arg")
        .long("with-arg")
        .action(ArgAction::SetTrue)
        .help("Thread a caller-supplied argument through hooks and entry points")
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

/// Emit machine-readable JSON (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Emit machine-readable JSON")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
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

/// Generation plan file (positional).
pub fn plan_path_arg() -> Arg {
    Arg::new("plan")
        .value_name("PLAN")
        .value_parser(value_parser!(PathBuf))
        .help("Generation plan file (JSON)")
}

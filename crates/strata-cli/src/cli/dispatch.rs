//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors that pull relevant fields (ignoring hidden ones)
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use strata_gen::dispatch::{Family, Strategy};

use super::ColorChoice;
use crate::commands::apply::ApplyArgs;
use crate::commands::check::CheckArgs;
use crate::commands::closure::ClosureArgs;
use crate::commands::emit::EmitArgs;

pub struct CheckParams {
    pub tables: Vec<PathBuf>,
    pub table_text: Option<String>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            tables: table_paths(m),
            table_text: m.get_one::<String>("table_text").cloned(),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            tables: p.tables,
            table_text: p.table_text,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ClosureParams {
    pub tables: Vec<PathBuf>,
    pub table_text: Option<String>,
    pub module: String,
    pub target: String,
    pub json: bool,
    pub color: ColorChoice,
}

impl ClosureParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            tables: table_paths(m),
            table_text: m.get_one::<String>("table_text").cloned(),
            module: m.get_one::<String>("module").cloned().unwrap(),
            target: m.get_one::<String>("target").cloned().unwrap(),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<ClosureParams> for ClosureArgs {
    fn from(p: ClosureParams) -> Self {
        Self {
            tables: p.tables,
            table_text: p.table_text,
            module: p.module,
            target: p.target,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

pub struct EmitParams {
    pub tables: Vec<PathBuf>,
    pub table_text: Option<String>,
    pub module: String,
    pub target: Option<String>,
    pub family: String,
    pub layered: bool,
    pub with_arg: bool,
    pub output: Option<PathBuf>,
    pub color: ColorChoice,
}

impl EmitParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            tables: table_paths(m),
            table_text: m.get_one::<String>("table_text").cloned(),
            module: m.get_one::<String>("module").cloned().unwrap(),
            target: m.get_one::<String>("target").cloned(),
            family: m.get_one::<String>("family").cloned().unwrap(),
            layered: m.get_flag("layered"),
            with_arg: m.get_flag("with_arg"),
            output: m.get_one::<PathBuf>("output").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<EmitParams> for EmitArgs {
    fn from(p: EmitParams) -> Self {
        let family = match p.family.as_str() {
            "visitor" => Family::Visitor,
            "builder" => Family::Builder,
            "predicates" => Family::Predicates,
            _ => unreachable!("clap validates --family"),
        };
        let strategy = if p.layered {
            Strategy::Layered
        } else {
            Strategy::Closed
        };

        Self {
            tables: p.tables,
            table_text: p.table_text,
            module: p.module,
            target: p.target,
            family,
            strategy,
            with_arg: p.with_arg,
            output: p.output,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ApplyParams {
    pub plan: PathBuf,
    pub color: ColorChoice,
}

impl ApplyParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            plan: m.get_one::<PathBuf>("plan").cloned().unwrap(),
            color: parse_color(m),
        }
    }
}

impl From<ApplyParams> for ApplyArgs {
    fn from(p: ApplyParams) -> Self {
        Self {
            plan: p.plan,
            color: p.color.should_colorize(),
        }
    }
}

/// Collect the variadic table positionals in command-line order.
fn table_paths(m: &ArgMatches) -> Vec<PathBuf> {
    m.get_many::<PathBuf>("tables")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default()
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

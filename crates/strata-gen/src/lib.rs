//! strata-gen: traversal code generation for layered term languages.
//!
//! A language is described by declarative tables of node kinds. From those
//! this crate derives visitor and builder infrastructure: which kinds need
//! hooks for a given target type, how dispatch recurses through constructor
//! parameters, and the text spliced into marker-delimited artifact regions.
//!
//! # Example
//!
//! ```
//! use strata_gen::source_map::SourceMap;
//! use strata_gen::table::TableParser;
//!
//! let table = "\
//! module values
//! VAL | value | any value
//! LIT | lit(n: Int) : value | integer literal
//! NEG | neg(arg: value) : value | negation
//! ";
//!
//! let mut sources = SourceMap::new();
//! let id = sources.add_inline(table);
//! let mut parser = TableParser::new();
//! parser.parse(id, table);
//! let (registry, _, diagnostics) = parser.finish();
//!
//! assert!(diagnostics.is_empty());
//! assert_eq!(registry.len(), 3);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod closure;
pub mod diagnostics;
pub mod dispatch;
pub mod patch;
pub mod print;
pub mod source_map;
pub mod table;
pub mod tasks;
pub mod walk;

#[cfg(test)]
mod patch_tests;
#[cfg(test)]
mod source_map_tests;
#[cfg(test)]
mod tasks_tests;

pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use source_map::{SourceId, SourceMap};

/// Result type for passes that produce both output and diagnostics.
///
/// Diagnosed problems ride alongside the output; the outer `Result` is for
/// conditions that leave nothing to hand back, like unreadable input files.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

/// Errors that leave a generation pass without a result.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read table `{path}`: {source}")]
    ReadTable {
        path: String,
        source: std::io::Error,
    },

    #[error("cannot read plan `{path}`: {source}")]
    ReadPlan {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed plan `{path}`: {source}")]
    ParsePlan {
        path: String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Registry(#[from] strata_model::RegistryError),
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, Error>;

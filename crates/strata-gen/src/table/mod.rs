//! Declarative node-kind tables: reading, parsing, and cross-file checks.

pub mod lexer;
pub mod parser;
pub mod reader;

#[cfg(test)]
mod reader_tests;

pub use parser::{SpanTable, TableParser};

use strata_model::{Registry, RegistryError};

use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Checks that only make sense once every table of a run has been read:
/// superclass resolution and upstream chain health.
///
/// Parameter types are deliberately not checked. They may reference atomic or
/// external types that no table declares, and the closure treats those as not
/// containing the target. A dangling superclass, in contrast, is almost
/// always a typo.
///
/// Kinds and modules without recorded spans (programmatic registries) are
/// skipped; there is no text to point at.
pub fn validate(registry: &Registry, spans: &SpanTable) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    let known = |name: &str| registry.kinds().any(|k| k.name == name);

    for kind in registry.kinds() {
        if kind.is_foreign() {
            continue;
        }
        let Some(superclass) = &kind.superclass else {
            continue;
        };
        if known(superclass) {
            continue;
        }
        let Some(span) = spans.kind(&kind.key()) else {
            continue;
        };
        diagnostics
            .report(DiagnosticKind::UnresolvedType, span)
            .message(superclass)
            .emit();
    }

    for module in registry.modules() {
        let err = match registry.chain(module.name()) {
            Ok(_) => continue,
            Err(err) => err,
        };
        // Every module revalidates its whole chain, so only report failures
        // at the module that owns the bad link.
        match err {
            RegistryError::UnknownUpstream {
                module: offender,
                upstream,
            } if offender == module.name() => {
                if let Some(span) = spans.module(&offender) {
                    diagnostics
                        .report(DiagnosticKind::UnknownUpstream, span)
                        .message(&upstream)
                        .emit();
                }
            }
            RegistryError::UpstreamCycle(offender) if offender == module.name() => {
                if let Some(span) = spans.module(&offender) {
                    diagnostics
                        .report(DiagnosticKind::UpstreamCycle, span)
                        .message(&offender)
                        .emit();
                }
            }
            _ => {}
        }
    }

    diagnostics
}

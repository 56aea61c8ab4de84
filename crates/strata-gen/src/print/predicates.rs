//! Predicate, guard, and accessor rendering.

use strata_model::{NodeKind, Registry, RegistryError};
use strata_model::utils::to_snake_case;

use crate::Result;
use crate::print::emitter::Emitter;

/// Renders tag predicates, child accessors, and presence guards for every
/// kind a module defines.
///
/// Accessors index by declaration position and fall back to the shared `Nil`
/// when the child is missing, so malformed values read as absent rather than
/// panicking. The text references `Term` and `nil_ref` unqualified; the file
/// receiving the splice owns the imports.
pub fn render_predicates(registry: &Registry, module: &str) -> Result<String> {
    let defining = registry
        .module(module)
        .ok_or_else(|| RegistryError::UnknownModule(module.to_string()))?;
    let mut em = Emitter::new();
    let mut first = true;
    for kind in defining.kinds().iter().filter(|k| !k.is_foreign()) {
        if !first {
            em.blank();
        }
        first = false;
        render_kind(&mut em, kind);
    }
    Ok(em.finish())
}

fn render_kind(em: &mut Emitter, kind: &NodeKind) {
    let name = to_snake_case(&kind.name);
    if kind.description.is_empty() {
        em.line(format!("/// True when `term` carries the `{}` tag.", kind.tag));
    } else {
        em.line(format!("/// True when `term` is {}.", kind.description));
    }
    em.open(format!("pub fn is_{name}(term: &Term) -> bool {{"));
    em.line(format!("term.has(\"{}\")", kind.tag));
    em.close("}");

    for (index, param) in kind.params.iter().enumerate() {
        let param_name = to_snake_case(&param.name);
        em.blank();
        em.line(format!(
            "/// The `{}` child of a `{}` term.",
            param.name, kind.name
        ));
        em.open(format!(
            "pub fn {name}_{param_name}(term: &Term) -> &Term {{"
        ));
        em.line(format!(
            "term.as_appl().and_then(|a| a.child({index})).unwrap_or_else(nil_ref)"
        ));
        em.close("}");
        if param.guarded {
            em.blank();
            em.line(format!(
                "/// Whether the optional `{}` child is present.",
                param.name
            ));
            em.open(format!(
                "pub fn has_{name}_{param_name}(term: &Term) -> bool {{"
            ));
            em.line(format!("!{name}_{param_name}(term).is_nil()"));
            em.close("}");
        }
    }
}

//! Hook and dispatch-arm text shared by the closed and layered renderers.

use strata_model::utils::to_snake_case;

use crate::dispatch::{DispatchArm, PlanParam};
use crate::print::emitter::Emitter;

/// Suffix of hook parameter lists when the traversal threads an argument.
pub(crate) fn arg_param(with_arg: bool) -> &'static str {
    if with_arg { ", arg: &Self::Arg" } else { "" }
}

/// Suffix of hook and entry call sites when the traversal threads an
/// argument.
pub(crate) fn arg_value(with_arg: bool) -> &'static str {
    if with_arg { ", arg" } else { "" }
}

fn silence(with_arg: bool) -> &'static str {
    if with_arg { "let _ = (term, arg);" } else { "let _ = term;" }
}

/// Renders the defaulted `visit_*`/`leave_*` pair of one visitor arm.
pub(crate) fn visitor_hooks(em: &mut Emitter, arm: &DispatchArm, with_arg: bool) {
    let kind = to_snake_case(&arm.kind);
    em.open(format!(
        "fn visit_{kind}(&mut self, term: &Term{}) -> Control {{",
        arg_param(with_arg)
    ));
    em.line(silence(with_arg));
    em.line("Control::Continue");
    em.close("}");
    em.blank();
    em.open(format!(
        "fn leave_{kind}(&mut self, term: &Term{}) {{",
        arg_param(with_arg)
    ));
    em.line(silence(with_arg));
    em.close("}");
}

/// Renders the defaulted `visit_*`/`leave_*` pair of one builder arm.
pub(crate) fn builder_hooks(em: &mut Emitter, arm: &DispatchArm, with_arg: bool) {
    let kind = to_snake_case(&arm.kind);
    em.open(format!(
        "fn visit_{kind}(&mut self, term: &Term{}) -> Option<Term> {{",
        arg_param(with_arg)
    ));
    em.line(silence(with_arg));
    em.line("None");
    em.close("}");
    em.blank();
    em.open(format!(
        "fn leave_{kind}(&mut self, term: &Term{}) {{",
        arg_param(with_arg)
    ));
    em.line(silence(with_arg));
    em.close("}");
}

fn accessor(arm: &DispatchArm, param: &PlanParam) -> String {
    format!(
        "{}_{}(term)",
        to_snake_case(&arm.kind),
        to_snake_case(&param.name)
    )
}

fn guard(arm: &DispatchArm, param: &PlanParam) -> String {
    format!(
        "has_{}_{}(term)",
        to_snake_case(&arm.kind),
        to_snake_case(&param.name)
    )
}

/// Renders the body of one visitor dispatch arm: hook, guarded recursion
/// into matching children, leave hook.
pub(crate) fn visitor_arm(em: &mut Emitter, arm: &DispatchArm, entry: &str, with_arg: bool) {
    let kind = to_snake_case(&arm.kind);
    let call = arg_value(with_arg);
    let recursing: Vec<&PlanParam> = arm.params.iter().filter(|p| p.recurse).collect();
    if recursing.is_empty() {
        em.line(format!("self.visit_{kind}(term{call});"));
    } else {
        em.open(format!(
            "if self.visit_{kind}(term{call}) == Control::Continue {{"
        ));
        for param in recursing {
            let child = accessor(arm, param);
            if param.repeat.is_many() {
                em.open(format!("if let Term::List(items) = {child} {{"));
                em.open("for item in items {");
                em.line(format!("self.{entry}(item{call});"));
                em.close("}");
                em.close("}");
            } else if param.guarded {
                em.open(format!("if {} {{", guard(arm, param)));
                em.line(format!("self.{entry}({child}{call});"));
                em.close("}");
            } else {
                em.line(format!("self.{entry}({child}{call});"));
            }
        }
        em.close("}");
    }
    em.line(format!("self.leave_{kind}(term{call});"));
}

/// Renders a full visitor entry body: an `is_*` chain over the arms, then
/// the fallback for unmatched tags (delegation to the upstream layer, or
/// nothing when this is the last resort).
pub(crate) fn visitor_dispatch(
    em: &mut Emitter,
    arms: &[DispatchArm],
    entry: &str,
    with_arg: bool,
    fallback: Option<&str>,
) {
    if arms.is_empty() {
        match fallback {
            Some(call) => em.line(call),
            None => em.line(silence(with_arg)),
        }
        return;
    }
    for (i, arm) in arms.iter().enumerate() {
        let test = format!("is_{}(term)", to_snake_case(&arm.kind));
        if i == 0 {
            em.open(format!("if {test} {{"));
        } else {
            em.chain(format!("}} else if {test} {{"));
        }
        visitor_arm(em, arm, entry, with_arg);
    }
    if let Some(call) = fallback {
        em.chain("} else {");
        em.line(call);
    }
    em.close("}");
}

/// Renders a full builder entry body. Arms return early; the tail expression
/// handles unmatched tags.
pub(crate) fn builder_dispatch(
    em: &mut Emitter,
    arms: &[DispatchArm],
    entry: &str,
    with_arg: bool,
    fallback: &str,
) {
    for (i, arm) in arms.iter().enumerate() {
        let test = format!("is_{}(term)", to_snake_case(&arm.kind));
        if i == 0 {
            em.open(format!("if {test} {{"));
        } else {
            em.chain(format!("}} else if {test} {{"));
        }
        builder_arm(em, arm, entry, with_arg);
    }
    if !arms.is_empty() {
        em.close("}");
    }
    em.line(fallback);
}

/// Renders the body of one builder dispatch arm: replacement check, child
/// rebuilds, reassembly, leave hook on the rebuilt node.
///
/// Child bindings carry a `new_` prefix so a parameter named `term` or
/// `arg` cannot shadow the entry's own parameters.
pub(crate) fn builder_arm(em: &mut Emitter, arm: &DispatchArm, entry: &str, with_arg: bool) {
    let kind = to_snake_case(&arm.kind);
    let call = arg_value(with_arg);
    em.open(format!(
        "if let Some(replacement) = self.visit_{kind}(term{call}) {{"
    ));
    em.line("return replacement;");
    em.close("}");
    for param in &arm.params {
        let binding = format!("new_{}", to_snake_case(&param.name));
        let child = accessor(arm, param);
        if !param.rebuild {
            em.line(format!("let {binding} = {child}.clone();"));
        } else if param.repeat.is_many() {
            em.open(format!("let {binding} = match {child} {{"));
            em.line(format!(
                "Term::List(items) => Term::list(items.iter().map(|item| self.{entry}(item{call})).collect()),"
            ));
            em.line("other => other.clone(),");
            em.close("};");
        } else if param.guarded {
            em.open(format!("let {binding} = if {} {{", guard(arm, param)));
            em.line(format!("self.{entry}({child}{call})"));
            em.chain("} else {");
            em.line(format!("{child}.clone()"));
            em.close("};");
        } else {
            em.line(format!("let {binding} = self.{entry}({child}{call});"));
        }
    }
    if arm.params.is_empty() {
        em.line(format!("let rebuilt = Term::appl(\"{}\", Vec::new());", arm.tag));
    } else {
        let children: Vec<String> = arm
            .params
            .iter()
            .map(|p| format!("new_{}", to_snake_case(&p.name)))
            .collect();
        em.line(format!(
            "let rebuilt = Term::appl(\"{}\", vec![{}]);",
            arm.tag,
            children.join(", ")
        ));
    }
    em.line(format!("self.leave_{kind}(&rebuilt{call});"));
    em.line("return rebuilt;");
}

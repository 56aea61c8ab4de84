//! Closed-variant trait rendering: one visitor or builder trait per sum
//! type, with hooks for every variant and a single dispatching entry point.

use strata_model::utils::to_pascal_case;

use crate::dispatch::DispatchPlan;
use crate::print::emitter::Emitter;
use crate::print::hooks;

pub fn render_closed_visitor(plan: &DispatchPlan, with_arg: bool) -> String {
    let mut em = Emitter::new();
    let target = to_pascal_case(&plan.target);
    let suffix = if with_arg { "With" } else { "" };
    em.line(format!(
        "/// Read-only traversal over `{}` terms.",
        plan.target
    ));
    em.line("///");
    em.line("/// A `visit_*` hook runs before the children of its kind, the matching");
    em.line("/// `leave_*` hook after. Returning `Control::Stop` from a visit hook");
    em.line("/// skips the children; the leave hook still runs.");
    em.open(format!("pub trait {target}Visitor{suffix} {{"));
    if with_arg {
        em.line("type Arg;");
        em.blank();
    }
    for arm in &plan.arms {
        hooks::visitor_hooks(&mut em, arm, with_arg);
        em.blank();
    }
    let entry = if with_arg { "apply_with" } else { "apply" };
    em.line("/// Dispatches on the tag and walks matching children.");
    em.open(format!(
        "fn {entry}(&mut self, term: &Term{}) {{",
        hooks::arg_param(with_arg)
    ));
    hooks::visitor_dispatch(&mut em, &plan.arms, entry, with_arg, None);
    em.close("}");
    em.close("}");
    em.finish()
}

pub fn render_closed_builder(plan: &DispatchPlan, with_arg: bool) -> String {
    let mut em = Emitter::new();
    let target = to_pascal_case(&plan.target);
    let suffix = if with_arg { "With" } else { "" };
    em.line(format!(
        "/// Rebuilding traversal over `{}` terms.",
        plan.target
    ));
    em.line("///");
    em.line("/// A `visit_*` hook may return a replacement, taken as-is with no");
    em.line("/// recursion. Returning `None` rebuilds the node from rebuilt children");
    em.line("/// and runs the `leave_*` hook on the result.");
    em.open(format!("pub trait {target}Builder{suffix} {{"));
    if with_arg {
        em.line("type Arg;");
        em.blank();
    }
    for arm in &plan.arms {
        hooks::builder_hooks(&mut em, arm, with_arg);
        em.blank();
    }
    let entry = if with_arg { "build_with" } else { "build" };
    em.line("/// Dispatches on the tag and returns the rebuilt term.");
    em.open(format!(
        "fn {entry}(&mut self, term: &Term{}) -> Term {{",
        hooks::arg_param(with_arg)
    ));
    hooks::builder_dispatch(&mut em, &plan.arms, entry, with_arg, "term.clone()");
    em.close("}");
    em.close("}");
    em.finish()
}

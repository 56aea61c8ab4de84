//! Layered mixin rendering: one trait per module of an upstream chain.
//!
//! Each trait declares hooks for its own module's reachable kinds plus an
//! entry that dispatches them and hands every other tag to the upstream
//! layer. Instantiating the most-downstream trait therefore covers the whole
//! chain without re-declaring upstream hooks.

use strata_model::utils::{to_pascal_case, to_snake_case};

use crate::dispatch::DispatchPlan;
use crate::print::emitter::Emitter;
use crate::print::hooks;

fn trait_name(target: &str, family: &str, module: &str, with_arg: bool) -> String {
    let suffix = if with_arg { "With" } else { "" };
    format!(
        "{}{family}{}{suffix}",
        to_pascal_case(target),
        to_pascal_case(module)
    )
}

pub fn render_layered_visitor(plan: &DispatchPlan, with_arg: bool) -> String {
    let mut em = Emitter::new();
    let name = trait_name(&plan.target, "Visitor", &plan.module, with_arg);
    let entry = entry_name("apply", &plan.module, with_arg);
    em.line(format!(
        "/// `{}`-layer hooks for traversing `{}` terms.",
        plan.module, plan.target
    ));
    match &plan.base {
        Some(base) => {
            let upstream = trait_name(&plan.target, "Visitor", base, with_arg);
            em.line("///");
            em.line(format!(
                "/// Tags this layer does not dispatch fall through to [`{upstream}`]."
            ));
            em.open(format!("pub trait {name}: {upstream} {{"));
        }
        None => {
            em.open(format!("pub trait {name} {{"));
            if with_arg {
                em.line("type Arg;");
                em.blank();
            }
        }
    }
    for arm in &plan.arms {
        hooks::visitor_hooks(&mut em, arm, with_arg);
        em.blank();
    }
    em.line("/// Walks this layer's kinds, deferring other tags upstream.");
    em.open(format!(
        "fn {entry}(&mut self, term: &Term{}) {{",
        hooks::arg_param(with_arg)
    ));
    let fallback = plan.base.as_ref().map(|base| {
        format!(
            "self.{}(term{});",
            entry_name("apply", base, with_arg),
            hooks::arg_value(with_arg)
        )
    });
    hooks::visitor_dispatch(&mut em, &plan.arms, &entry, with_arg, fallback.as_deref());
    em.close("}");
    em.close("}");
    em.finish()
}

pub fn render_layered_builder(plan: &DispatchPlan, with_arg: bool) -> String {
    let mut em = Emitter::new();
    let name = trait_name(&plan.target, "Builder", &plan.module, with_arg);
    let entry = entry_name("build", &plan.module, with_arg);
    em.line(format!(
        "/// `{}`-layer rebuilding hooks for `{}` terms.",
        plan.module, plan.target
    ));
    match &plan.base {
        Some(base) => {
            let upstream = trait_name(&plan.target, "Builder", base, with_arg);
            em.line("///");
            em.line(format!(
                "/// Tags this layer does not dispatch fall through to [`{upstream}`]."
            ));
            em.open(format!("pub trait {name}: {upstream} {{"));
        }
        None => {
            em.open(format!("pub trait {name} {{"));
            if with_arg {
                em.line("type Arg;");
                em.blank();
            }
        }
    }
    for arm in &plan.arms {
        hooks::builder_hooks(&mut em, arm, with_arg);
        em.blank();
    }
    em.line("/// Rebuilds this layer's kinds, deferring other tags upstream.");
    em.open(format!(
        "fn {entry}(&mut self, term: &Term{}) -> Term {{",
        hooks::arg_param(with_arg)
    ));
    let fallback = match &plan.base {
        Some(base) => format!(
            "self.{}(term{})",
            entry_name("build", base, with_arg),
            hooks::arg_value(with_arg)
        ),
        None => "term.clone()".to_string(),
    };
    hooks::builder_dispatch(&mut em, &plan.arms, &entry, with_arg, &fallback);
    em.close("}");
    em.close("}");
    em.finish()
}

fn entry_name(verb: &str, module: &str, with_arg: bool) -> String {
    if with_arg {
        format!("{verb}_{}_with", to_snake_case(module))
    } else {
        format!("{verb}_{}", to_snake_case(module))
    }
}

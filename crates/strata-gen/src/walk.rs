//! Plan-driven traversal of term values.
//!
//! The walker interprets dispatch plans over [`Term`] trees with the same
//! semantics the rendered traits compile to: tag dispatch in arm order,
//! recursion only into `recurse` parameters, guarded children skipped when
//! absent, unknown tags treated as leaves. Checks and tooling use it to
//! exercise a plan without compiling generated text.

use indexmap::IndexMap;

use strata_model::{Appl, Control, Term};

use crate::dispatch::{DispatchArm, DispatchPlan};

/// Read-only hooks, dispatched per matched arm.
pub trait VisitHooks {
    fn visit(&mut self, arm: &DispatchArm, term: &Term) -> Control {
        let _ = (arm, term);
        Control::Continue
    }

    fn leave(&mut self, arm: &DispatchArm, term: &Term) {
        let _ = (arm, term);
    }
}

/// Rebuilding hooks. A `Some` from `visit` replaces the node without
/// recursion; `leave` observes only auto-rebuilt nodes.
pub trait RewriteHooks {
    fn visit(&mut self, arm: &DispatchArm, term: &Term) -> Option<Term> {
        let _ = (arm, term);
        None
    }

    fn leave(&mut self, arm: &DispatchArm, term: &Term) {
        let _ = (arm, term);
    }
}

/// Interprets a set of dispatch plans over term trees.
pub struct Walker<'p> {
    arms: IndexMap<&'p str, &'p DispatchArm>,
}

impl<'p> Walker<'p> {
    /// Merges the plans' arms into one tag table. Chained plans partition
    /// their kinds, so the first arm seen for a tag is the defining one.
    pub fn new(plans: &'p [DispatchPlan]) -> Self {
        let mut arms = IndexMap::new();
        for plan in plans {
            for arm in &plan.arms {
                arms.entry(arm.tag.as_str()).or_insert(arm);
            }
        }
        Walker { arms }
    }

    pub fn is_dispatched(&self, tag: &str) -> bool {
        self.arms.contains_key(tag)
    }

    /// Walks `term`, firing hooks for every dispatched node.
    pub fn traverse(&self, term: &Term, hooks: &mut impl VisitHooks) {
        match term {
            Term::List(items) => {
                for item in items {
                    self.traverse(item, hooks);
                }
            }
            Term::Appl(appl) => {
                let Some(arm) = self.arms.get(appl.tag.as_str()).copied() else {
                    return;
                };
                if hooks.visit(arm, term) == Control::Continue {
                    for (index, param) in arm.params.iter().enumerate() {
                        if !param.recurse {
                            continue;
                        }
                        let Some(child) = appl.child(index) else {
                            continue;
                        };
                        if param.guarded && child.is_nil() {
                            continue;
                        }
                        self.traverse(child, hooks);
                    }
                }
                hooks.leave(arm, term);
            }
            _ => {}
        }
    }

    /// Rebuilds `term`, letting hooks replace dispatched nodes.
    pub fn rewrite(&self, term: &Term, hooks: &mut impl RewriteHooks) -> Term {
        match term {
            Term::List(items) => {
                Term::list(items.iter().map(|item| self.rewrite(item, hooks)).collect())
            }
            Term::Appl(appl) => {
                let Some(arm) = self.arms.get(appl.tag.as_str()).copied() else {
                    return term.clone();
                };
                if let Some(replacement) = hooks.visit(arm, term) {
                    return replacement;
                }
                let children = appl
                    .children
                    .iter()
                    .enumerate()
                    .map(|(index, child)| match arm.params.get(index) {
                        Some(param) if param.rebuild => {
                            if param.guarded && child.is_nil() {
                                child.clone()
                            } else {
                                self.rewrite(child, hooks)
                            }
                        }
                        _ => child.clone(),
                    })
                    .collect();
                let rebuilt = Term::Appl(Appl::new(appl.tag.clone(), children));
                hooks.leave(arm, &rebuilt);
                rebuilt
            }
            _ => term.clone(),
        }
    }
}

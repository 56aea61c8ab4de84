use serde::{Deserialize, Serialize};
use strata_model::{NodeKind, Param, Registry, Repeat, Tag};

/// How hooks for a target type are organized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// One trait per sum type; every variant gets a hook pair.
    Closed,
    /// One mixin per module, chained along the upstream order.
    Layered,
}

/// Which artifact family a generation task produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Read-only traversal hooks.
    Visitor,
    /// Rebuilding traversal hooks.
    Builder,
    /// Tag predicates, presence guards, and child accessors.
    Predicates,
}

/// Dispatch for one module's hooks over one target type.
///
/// Printers turn a plan into trait text; the runtime walker interprets the
/// same plan directly. Both see identical arm order, so generated and
/// interpreted traversal agree on which hook fires.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchPlan {
    pub module: String,
    /// Root type whose occurrences the hooks cover.
    pub target: String,
    /// Module whose plan this one extends. `None` for the chain head and for
    /// every closed plan.
    pub base: Option<String>,
    pub strategy: Strategy,
    /// One arm per reachable kind, in dispatch order.
    pub arms: Vec<DispatchArm>,
}

impl DispatchPlan {
    pub fn arm_for_tag(&self, tag: &str) -> Option<&DispatchArm> {
        self.arms.iter().find(|a| a.tag.as_str() == tag)
    }
}

/// One alternative of a dispatch chain.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchArm {
    /// Kind name; hook names derive from it.
    pub kind: String,
    /// Module that defines the kind.
    pub module: String,
    pub tag: Tag,
    pub params: Vec<PlanParam>,
}

impl DispatchArm {
    /// Builds an arm, deciding per parameter whether traversal descends and
    /// whether a rebuild may replace the value.
    ///
    /// `recurses` is the strategy's type rule. Rebuild additionally requires
    /// the parameter to be modifiable: target-typed values are the rewrite
    /// domain itself, everything else must be declared in some table.
    pub(crate) fn from_kind(
        registry: &Registry,
        kind: &NodeKind,
        target: &str,
        recurses: impl Fn(&Param) -> bool,
    ) -> DispatchArm {
        let params = kind
            .params
            .iter()
            .map(|p| {
                let recurse = recurses(p);
                PlanParam {
                    name: p.name.clone(),
                    repeat: p.repeat,
                    guarded: p.guarded,
                    recurse,
                    rebuild: recurse && (p.ty == target || registry.is_modifiable(p)),
                }
            })
            .collect();
        DispatchArm {
            kind: kind.name.clone(),
            module: kind.module.clone(),
            tag: kind.tag.clone(),
            params,
        }
    }
}

/// One constructor parameter as dispatch sees it.
#[derive(Debug, Clone, Serialize)]
pub struct PlanParam {
    pub name: String,
    pub repeat: Repeat,
    /// Traversal consults the presence predicate before descending.
    pub guarded: bool,
    /// Whether hooks descend into this child at all.
    pub recurse: bool,
    /// Whether a rebuilding pass may replace this child. Never set without
    /// `recurse`.
    pub rebuild: bool,
}

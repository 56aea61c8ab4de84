use strata_model::Registry;

use crate::Result;
use crate::closure::closure;
use crate::dispatch::{DispatchArm, DispatchPlan, Strategy};

/// Builds one mixin plan per module of `module`'s upstream chain, upstream
/// first.
///
/// The chain-wide closure is computed once and split by defining module, so
/// every reachable kind lands in exactly one plan and the union over the
/// chain is the whole closure. Each plan names the previous chain module as
/// its base; instantiating a plan's trait over its base's yields the combined
/// traversal without duplicating upstream hooks.
pub fn layered_plans(
    registry: &Registry,
    module: &str,
    target: &str,
) -> Result<Vec<DispatchPlan>> {
    let whole = closure(registry, module, target)?;
    let chain = registry.chain(module)?;
    let mut plans = Vec::with_capacity(chain.len());
    let mut base: Option<String> = None;
    for link in chain {
        let arms: Vec<DispatchArm> = whole
            .members
            .iter()
            .filter(|key| key.module == link.name())
            .map(|key| {
                let kind = registry
                    .kind(&key.module, &key.name)
                    .expect("closure member missing from registry");
                DispatchArm::from_kind(registry, kind, target, |p| {
                    whole.recursable.contains(&p.ty)
                })
            })
            .collect();
        plans.push(DispatchPlan {
            module: link.name().to_string(),
            target: target.to_string(),
            base: base.take(),
            strategy: Strategy::Layered,
            arms,
        });
        base = Some(link.name().to_string());
    }
    Ok(plans)
}

use strata_model::{Registry, RegistryError};

use crate::Result;
use crate::dispatch::{DispatchArm, DispatchPlan, Strategy};

/// Builds the closed-variant plan for one sum type.
///
/// Arms are the module's defining kinds whose superclass is the sum, in
/// declaration order. The tags are mutually exclusive by construction, so a
/// dispatch chain over them is exhaustive for well-formed values and each
/// value selects exactly one arm.
///
/// Traversal descends into sum-typed children only; atomic children are left
/// to the hook body. A guarded child still gets a `recurse` arm, the walker
/// and printers wrap the descent in its presence predicate.
pub fn closed_plan(registry: &Registry, module: &str, sum: &str) -> Result<DispatchPlan> {
    let defining = registry
        .module(module)
        .ok_or_else(|| RegistryError::UnknownModule(module.to_string()))?;
    let arms: Vec<DispatchArm> = defining
        .kinds()
        .iter()
        .filter(|k| !k.is_foreign() && k.superclass.as_deref() == Some(sum))
        .map(|k| DispatchArm::from_kind(registry, k, sum, |p| p.ty == sum))
        .collect();
    Ok(DispatchPlan {
        module: module.to_string(),
        target: sum.to_string(),
        base: None,
        strategy: Strategy::Closed,
        arms,
    })
}

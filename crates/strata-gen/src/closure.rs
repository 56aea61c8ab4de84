//! Dependency closure: which node kinds participate in a target type's
//! traversal.
//!
//! Seeded with every kind whose parameter list references the target type
//! (repetition stripped), then grown to a fixed point by adding kinds whose
//! superclass is already included. Types that resolve nowhere are treated as
//! not containing the target; external references are legitimate.

use indexmap::IndexSet;
use serde::Serialize;

use strata_model::{KindKey, NodeKind, Registry};

use crate::Result;

/// Closure of one `(module, target type)` pair over the module's chain.
#[derive(Debug, Clone, Serialize)]
pub struct Closure {
    /// Most-downstream module of the chain the closure was computed over.
    pub module: String,
    /// The target type.
    pub target: String,
    /// Member kinds, pinned kinds first, then by declaration index.
    pub members: Vec<KindKey>,
    /// Type names a traversal must recurse into: the target itself, every
    /// member, and every member's superclass. Parameters of other types
    /// cannot contain the target and are skipped at runtime.
    pub recursable: IndexSet<String>,
}

impl Closure {
    pub fn contains(&self, key: &KindKey) -> bool {
        self.members.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }
}

/// Computes the dependency closure of `target` over `module`'s upstream chain.
///
/// Deterministic for a given registry, and monotone: growing the registry can
/// only grow the result. Runs in O(kinds x parameters).
pub fn closure(registry: &Registry, module: &str, target: &str) -> Result<Closure> {
    let chain = registry.chain(module)?;
    let kinds: Vec<&NodeKind> = chain
        .iter()
        .flat_map(|m| m.kinds().iter())
        .filter(|k| !k.is_foreign())
        .collect();

    let mut included: IndexSet<&str> = IndexSet::new();
    for kind in &kinds {
        if references(kind, target) {
            included.insert(kind.name.as_str());
        }
    }

    // Grow by superclass membership until nothing new joins.
    loop {
        let mut grew = false;
        for kind in &kinds {
            if included.contains(kind.name.as_str()) {
                continue;
            }
            let Some(superclass) = &kind.superclass else {
                continue;
            };
            if included.contains(superclass.as_str()) {
                included.insert(kind.name.as_str());
                grew = true;
            }
        }
        if !grew {
            break;
        }
    }

    let mut members: Vec<&NodeKind> = kinds
        .iter()
        .copied()
        .filter(|k| included.contains(k.name.as_str()))
        .collect();
    members.sort_by_key(|k| (!k.modifiers.pinned, k.index));

    let mut recursable = IndexSet::new();
    recursable.insert(target.to_string());
    for kind in &members {
        recursable.insert(kind.name.clone());
        if let Some(superclass) = &kind.superclass {
            recursable.insert(superclass.clone());
        }
    }

    Ok(Closure {
        module: module.to_string(),
        target: target.to_string(),
        members: members.iter().map(|k| k.key()).collect(),
        recursable,
    })
}

/// Whether any parameter references `target`, through any repetition wrapping.
fn references(kind: &NodeKind, target: &str) -> bool {
    kind.params.iter().any(|p| p.ty == target)
}

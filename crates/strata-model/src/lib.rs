#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for strata language descriptions.
//!
//! Two layers:
//! - **Descriptor layer**: node kinds, modules, and the registry assembled
//!   from declarative tables
//! - **Value layer**: [`Term`], the tagged tree values generated code walks
//!
//! The registry is built once per run and read-only afterwards; everything
//! downstream (closure computation, plan building, printing) borrows it.

use indexmap::IndexMap;
use serde::Serialize;

pub mod term;
pub mod utils;


pub use term::{Appl, Control, Term};

// ============================================================================
// Descriptors
// ============================================================================

/// Discriminant tag of a node kind.
///
/// Every constructible value carries exactly one tag, and generated dispatch
/// tests tags as mutually exclusive alternatives. Kept as a distinct type so
/// tags never mix with kind or type names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Tag(String);

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Tag(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Repetition of a constructor parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Repeat {
    One,
    ZeroOrMore,
    OneOrMore,
}

impl Repeat {
    /// Whether the parameter holds a list of elements.
    pub fn is_many(self) -> bool {
        matches!(self, Repeat::ZeroOrMore | Repeat::OneOrMore)
    }
}

/// One constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    /// Declared type, repetition stripped.
    pub ty: String,
    pub repeat: Repeat,
    /// Present only when the companion presence predicate holds; traversal
    /// and rebuild consult the predicate before descending.
    pub guarded: bool,
}

/// Modifier flags parsed from the tag column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Modifiers {
    /// `S`: reachability deferred to the superclass.
    pub reach_via_superclass: bool,
    /// `O`: ordered ahead of unflagged kinds in closure membership.
    pub pinned: bool,
}

/// Kind data as parsed from one table row, before registry placement.
#[derive(Debug, Clone)]
pub struct RawKind {
    pub name: String,
    pub tag: Tag,
    /// Module qualifier on the constructor name. Non-empty means the kind is
    /// defined elsewhere and excluded from generation in this module.
    pub qualifier: Option<String>,
    pub superclass: Option<String>,
    pub params: Vec<Param>,
    pub modifiers: Modifiers,
    pub description: String,
}

/// Descriptor of one tree-node kind in one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeKind {
    pub name: String,
    pub tag: Tag,
    pub module: String,
    pub qualifier: Option<String>,
    pub superclass: Option<String>,
    pub params: Vec<Param>,
    pub modifiers: Modifiers,
    pub description: String,
    /// Global insertion index; stable source order across modules.
    pub index: usize,
}

impl NodeKind {
    /// Whether this row merely references a kind defined by another module.
    pub fn is_foreign(&self) -> bool {
        self.qualifier.is_some()
    }

    /// The single guarded parameter, if one is declared.
    pub fn guarded_param(&self) -> Option<&Param> {
        self.params.iter().find(|p| p.guarded)
    }

    pub fn key(&self) -> KindKey {
        KindKey {
            module: self.module.clone(),
            name: self.name.clone(),
        }
    }
}

/// Identity of a kind: `(module, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct KindKey {
    pub module: String,
    pub name: String,
}

impl std::fmt::Display for KindKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.module, self.name)
    }
}

// ============================================================================
// Modules and the registry
// ============================================================================

/// Ordered collection of kinds sharing a root expression type.
#[derive(Debug, Clone, Serialize)]
pub struct Module {
    name: String,
    upstream: Option<String>,
    kinds: Vec<NodeKind>,
}

impl Module {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The module whose mixin this module's mixin chains onto.
    pub fn upstream(&self) -> Option<&str> {
        self.upstream.as_deref()
    }

    pub fn kinds(&self) -> &[NodeKind] {
        &self.kinds
    }

    pub fn kind(&self, name: &str) -> Option<&NodeKind> {
        self.kinds.iter().find(|k| k.name == name)
    }
}

/// Registry construction errors.
///
/// The table parser downgrades these to diagnostics; they are `Err` only at
/// the registry API boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown module `{0}`")]
    UnknownModule(String),
    #[error("module `{module}` redeclared with upstream `{new}` (was `{old}`)")]
    ConflictingUpstream {
        module: String,
        old: String,
        new: String,
    },
    #[error("duplicate kind `{name}` in module `{module}`")]
    DuplicateKind { module: String, name: String },
    #[error("module `{module}` names unknown upstream `{upstream}`")]
    UnknownUpstream { module: String, upstream: String },
    #[error("module dependency cycle through `{0}`")]
    UpstreamCycle(String),
}

/// All modules of a run, in declaration order.
///
/// Built once by the table parser, then treated as immutable. Generation
/// tasks only read it, so they are independent of each other.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Registry {
    modules: IndexMap<String, Module>,
    next_index: usize,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a module, creating it on first sight.
    ///
    /// Reopening is allowed so a module's table can span several files; the
    /// upstream declaration must agree across reopenings.
    pub fn open_module(
        &mut self,
        name: &str,
        upstream: Option<&str>,
    ) -> Result<(), RegistryError> {
        match self.modules.get_mut(name) {
            Some(module) => match (&module.upstream, upstream) {
                (Some(old), Some(new)) if old != new => {
                    Err(RegistryError::ConflictingUpstream {
                        module: name.to_string(),
                        old: old.clone(),
                        new: new.to_string(),
                    })
                }
                (None, Some(new)) => {
                    module.upstream = Some(new.to_string());
                    Ok(())
                }
                _ => Ok(()),
            },
            None => {
                self.modules.insert(
                    name.to_string(),
                    Module {
                        name: name.to_string(),
                        upstream: upstream.map(str::to_string),
                        kinds: Vec::new(),
                    },
                );
                Ok(())
            }
        }
    }

    /// Appends a kind to an open module, assigning its global index.
    pub fn add_kind(&mut self, module: &str, raw: RawKind) -> Result<(), RegistryError> {
        let index = self.next_index;
        let entry = self
            .modules
            .get_mut(module)
            .ok_or_else(|| RegistryError::UnknownModule(module.to_string()))?;
        if entry.kind(&raw.name).is_some() {
            return Err(RegistryError::DuplicateKind {
                module: module.to_string(),
                name: raw.name,
            });
        }
        entry.kinds.push(NodeKind {
            name: raw.name,
            tag: raw.tag,
            module: module.to_string(),
            qualifier: raw.qualifier,
            superclass: raw.superclass,
            params: raw.params,
            modifiers: raw.modifiers,
            description: raw.description,
            index,
        });
        self.next_index += 1;
        Ok(())
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    /// All kinds, grouped by module in declaration order.
    pub fn kinds(&self) -> impl Iterator<Item = &NodeKind> {
        self.modules.values().flat_map(|m| m.kinds.iter())
    }

    pub fn kind(&self, module: &str, name: &str) -> Option<&NodeKind> {
        self.modules.get(module)?.kind(name)
    }

    /// First defining (non-foreign) kind with the given name, across modules.
    pub fn find_kind(&self, name: &str) -> Option<&NodeKind> {
        self.kinds().find(|k| !k.is_foreign() && k.name == name)
    }

    /// Whether `ty` names a kind defined by some module.
    pub fn is_declared(&self, ty: &str) -> bool {
        self.find_kind(ty).is_some()
    }

    /// Whether a rewrite pass may replace this parameter's value.
    ///
    /// Atomic and opaque types are not declared in any table, so they default
    /// to non-modifiable and rebuilds pass them through unchanged.
    pub fn is_modifiable(&self, param: &Param) -> bool {
        self.is_declared(&param.ty)
    }

    pub fn is_empty(&self) -> bool {
        self.modules.values().all(|m| m.kinds.is_empty())
    }

    /// Number of kinds across all modules.
    pub fn len(&self) -> usize {
        self.modules.values().map(|m| m.kinds.len()).sum()
    }

    /// Resolves the upstream chain ending at `last`, upstream-most first.
    pub fn chain(&self, last: &str) -> Result<Vec<&Module>, RegistryError> {
        let mut order: Vec<&Module> = Vec::new();
        let mut current = self
            .modules
            .get(last)
            .ok_or_else(|| RegistryError::UnknownModule(last.to_string()))?;
        loop {
            if order.iter().any(|m| m.name == current.name) {
                return Err(RegistryError::UpstreamCycle(current.name.clone()));
            }
            order.push(current);
            match &current.upstream {
                Some(up) => {
                    current = self.modules.get(up).ok_or_else(|| {
                        RegistryError::UnknownUpstream {
                            module: current.name.clone(),
                            upstream: up.clone(),
                        }
                    })?;
                }
                None => break,
            }
        }
        order.reverse();
        Ok(order)
    }
}

//! Tagged tree values.
//!
//! Generated traversal code and the plan walker both operate on these. A
//! `Term` is either a tagged application with positional children, an atomic
//! leaf, or a list holding the elements of a repeated parameter.

use std::sync::OnceLock;

use crate::Tag;

/// Tag of the reserved empty application standing in for an absent guarded
/// child. Constructor arity stays fixed; presence predicates test against it.
pub const NIL: &str = "Nil";

/// Shared `Nil` with a `'static` lifetime, so generated accessors can hand
/// out `&Term` for missing children without allocating.
pub fn nil_ref() -> &'static Term {
    static NIL_TERM: OnceLock<Term> = OnceLock::new();
    NIL_TERM.get_or_init(Term::nil)
}

/// Traversal control returned by visitor hooks.
///
/// `Stop` suppresses recursion into the current node's children; the leave
/// hook still runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Control {
    #[default]
    Continue,
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Appl(Appl),
    Int(i64),
    Str(String),
    List(Vec<Term>),
}

/// A tagged application node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Appl {
    pub tag: Tag,
    pub children: Vec<Term>,
}

impl Term {
    pub fn appl(tag: impl Into<String>, children: Vec<Term>) -> Self {
        Term::Appl(Appl::new(Tag::new(tag), children))
    }

    pub fn int(value: i64) -> Self {
        Term::Int(value)
    }

    pub fn str(value: impl Into<String>) -> Self {
        Term::Str(value.into())
    }

    pub fn list(items: Vec<Term>) -> Self {
        Term::List(items)
    }

    /// The absent-child placeholder.
    pub fn nil() -> Self {
        Term::appl(NIL, Vec::new())
    }

    pub fn as_appl(&self) -> Option<&Appl> {
        match self {
            Term::Appl(appl) => Some(appl),
            _ => None,
        }
    }

    pub fn tag(&self) -> Option<&Tag> {
        self.as_appl().map(|a| &a.tag)
    }

    /// Discriminant test; the shape every generated `is_<kind>` takes.
    pub fn has(&self, tag: &str) -> bool {
        self.tag().is_some_and(|t| t.as_str() == tag)
    }

    /// True for the empty `Nil` application that stands in for an absent
    /// optional child.
    pub fn is_nil(&self) -> bool {
        self.as_appl()
            .is_some_and(|a| a.tag.as_str() == NIL && a.children.is_empty())
    }
}

impl Appl {
    pub fn new(tag: Tag, children: Vec<Term>) -> Self {
        Appl { tag, children }
    }

    pub fn child(&self, index: usize) -> Option<&Term> {
        self.children.get(index)
    }

    pub fn arity(&self) -> usize {
        self.children.len()
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Appl(appl) => appl.fmt(f),
            Term::Int(value) => write!(f, "{value}"),
            Term::Str(value) => write!(f, "{value:?}"),
            Term::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl std::fmt::Display for Appl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag.as_str())?;
        if self.children.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            child.fmt(f)?;
        }
        f.write_str(")")
    }
}

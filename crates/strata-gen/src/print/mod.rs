//! Text rendering of generated artifacts.
//!
//! Each renderer turns a dispatch plan (or a module, for predicates) into
//! the complete replacement text of one marker-delimited region. Rendering
//! never touches the filesystem; the patcher owns that.

mod closed;
mod emitter;
mod hooks;
mod layered;
mod predicates;

#[cfg(test)]
mod closed_tests;
#[cfg(test)]
mod layered_tests;
#[cfg(test)]
mod predicates_tests;

pub use closed::{render_closed_builder, render_closed_visitor};
pub use emitter::Emitter;
pub use layered::{render_layered_builder, render_layered_visitor};
pub use predicates::render_predicates;

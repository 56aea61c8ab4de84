//! Dispatch plans: the in-memory model between closure computation and text
//! rendering.
//!
//! Printers and the runtime walker both consume plans, so formatting never
//! leaks into the closure algorithm and tests can exercise dispatch semantics
//! without parsing generated text.

mod closed;
mod layered;
mod model;


pub use closed::closed_plan;
pub use layered::layered_plans;
pub use model::{DispatchArm, DispatchPlan, Family, PlanParam, Strategy};

//! Domain layer for the Resolution Engine.

pub mod majority;
pub mod plan;
pub mod resolution;

pub use majority::{determine_outcome, Outcome};
pub use plan::{invariant_value_conserved, plan_resolution, ResolutionPlan};
pub use resolution::Resolution;

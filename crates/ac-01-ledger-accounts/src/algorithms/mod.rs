//! Pure arithmetic used by the ledger.

pub mod yield_math;

pub use yield_math::{compute_yield, YieldRate};

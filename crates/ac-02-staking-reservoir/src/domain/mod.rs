//! Domain layer for the Staking Reservoir.

pub mod audit;
pub mod totals;

pub use audit::AuditError;
pub use totals::PoolTotals;

//! # AC-02 Staking Reservoir
//!
//! Pool-level view of the ledger: global staked and locked totals, yield
//! settlement, the protocol dust account and an auditor that proves the
//! books balance.
//!
//! ```text
//! Period Manager (3) ──lock/unlock──┐
//!                                   ├──→ Staking Reservoir (2) ──→ Ledger Accounts (1)
//! Resolution Engine (4) ──batch─────┘            │
//!                                                └── PoolTotals / audit()
//! ```

pub mod config;
pub mod domain;
pub mod reservoir;

pub use config::{ReservoirConfig, DEFAULT_REWARDS_RATE_BPS, SECONDS_PER_YEAR};
pub use domain::{AuditError, PoolTotals};
pub use reservoir::StakingReservoir;

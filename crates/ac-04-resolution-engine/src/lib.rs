//! # AC-04 Resolution Engine
//!
//! Finalizes an expired attestation period: computes the majority, slashes
//! the minority, distributes the slash pool to the majority and transitions
//! the period to a terminal state, exactly once.
//!
//! ```text
//! Period Manager (3) ──tallies/attestations──→ Resolution Engine (4)
//!                                                 │
//!                                                 ├── one LedgerOp batch ──→ Staking Reservoir (2)
//!                                                 └── Resolution ──→ Court Service (5) ──→ events
//! ```
//!
//! Resolution is permissionless and idempotent. A second call on a
//! terminal period returns `StateError::AlreadyResolved`, which callers
//! treat as success.
//!
//! ## Rounding
//!
//! Slashes and rewards are floored. The remainder of the pool after
//! flooring (`dust`) goes to the protocol account and is reported on the
//! `Resolution`; `invariant_value_conserved` is checked before any fund moves.

pub mod config;
pub mod domain;
pub mod engine;
pub mod metrics;
pub mod ports;

pub use config::{ResolutionConfig, TiePolicy, DEFAULT_SLASH_PERCENTAGE};
pub use domain::{
    determine_outcome, invariant_value_conserved, plan_resolution, Outcome, Resolution,
    ResolutionPlan,
};
pub use engine::ResolutionEngine;
pub use ports::SettlementLedger;

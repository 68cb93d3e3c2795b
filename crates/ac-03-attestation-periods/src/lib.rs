//! # AC-03 Attestation Period Manager
//!
//! Per-submission voting windows. Opens a period when a submission is
//! created, records and revokes staked attestations while the window is
//! open, and keeps the running valid/invalid tallies in step with the live
//! attestation records.
//!
//! ## Voting Rules
//!
//! | Rule | Error |
//! |------|-------|
//! | period must be Active and `now < end_time` | `WindowClosed` |
//! | stake at least the configured minimum | `StakeBelowMinimum` |
//! | author may not attest on own submission | `SelfAttestationForbidden` |
//! | one live attestation per attestor | `DuplicateVote` |
//! | revoke needs a live attestation | `NoExistingVote` |

pub mod config;
pub mod domain;

pub use config::{PeriodConfig, ATTESTATION_WINDOW_SECS, DEFAULT_MINIMUM_ATTESTATION_STAKE};
pub use domain::{
    invariant_attestations_belong, invariant_tally_matches, sum_stake, Attestation,
    AttestationId, AttestationPeriod, PeriodBook, PeriodStatus,
};

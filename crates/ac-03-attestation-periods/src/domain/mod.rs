//! Domain layer for the Attestation Period Manager.

pub mod attestation;
pub mod book;
pub mod invariants;
pub mod period;

pub use attestation::{Attestation, AttestationId};
pub use book::PeriodBook;
pub use invariants::{invariant_attestations_belong, invariant_tally_matches, sum_stake};
pub use period::{AttestationPeriod, PeriodStatus};

//! # Domain Invariants
//!
//! Cached tallies must equal the sum over the live attestations they cache.

use super::attestation::Attestation;
use super::period::AttestationPeriod;
use shared_types::{Amount, AttestationChoice};

/// Sum of live stake on one side.
pub fn sum_stake(attestations: &[&Attestation], choice: AttestationChoice) -> Amount {
    attestations
        .iter()
        .filter(|a| a.choice == choice)
        .fold(0, |acc: Amount, a| acc.saturating_add(a.stake_amount))
}

/// Invariant: `total_valid_stake` and `total_invalid_stake` match the records.
pub fn invariant_tally_matches(period: &AttestationPeriod, attestations: &[&Attestation]) -> bool {
    period.total_valid_stake == sum_stake(attestations, AttestationChoice::Valid)
        && period.total_invalid_stake == sum_stake(attestations, AttestationChoice::Invalid)
}

/// Invariant: every attestation belongs to the period and none is by the author.
pub fn invariant_attestations_belong(
    period: &AttestationPeriod,
    attestations: &[&Attestation],
) -> bool {
    attestations
        .iter()
        .all(|a| a.submission_id == period.submission_id && a.attestor != period.author_id)
}

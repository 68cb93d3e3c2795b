//! # Attestation
//!
//! A staked vote. At most one live attestation per (submission, attestor);
//! revoking deletes it and a fresh vote creates a new one with a new id.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared_types::{AccountId, Amount, AttestationChoice, SubmissionId, Timestamp};
use std::fmt;

/// SHA-256 identity of one attestation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttestationId(pub [u8; 32]);

impl AttestationId {
    /// Hashes the vote together with a book-wide sequence number so that a
    /// re-vote identical to a revoked one still gets a fresh id.
    pub fn derive(
        submission_id: &SubmissionId,
        attestor: &AccountId,
        choice: AttestationChoice,
        stake_amount: Amount,
        made_at: Timestamp,
        sequence: u64,
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((submission_id.as_str().len() as u64).to_le_bytes());
        hasher.update(submission_id.as_str().as_bytes());
        hasher.update((attestor.as_str().len() as u64).to_le_bytes());
        hasher.update(attestor.as_str().as_bytes());
        hasher.update([choice.is_valid() as u8]);
        hasher.update(stake_amount.to_le_bytes());
        hasher.update(made_at.to_le_bytes());
        hasher.update(sequence.to_le_bytes());

        let mut id = [0u8; 32];
        id.copy_from_slice(&hasher.finalize());
        Self(id)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for AttestationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for AttestationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttestationId({}..)", &self.to_hex()[..8])
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    pub id: AttestationId,
    pub submission_id: SubmissionId,
    pub attestor: AccountId,
    pub choice: AttestationChoice,
    pub stake_amount: Amount,
    pub made_at: Timestamp,
}

//! # Attestation Period
//!
//! One voting window per submission.
//!
//! ```text
//! [NotStarted] ──start──→ [Active] ──resolve──→ [Resolved]
//!                             │
//!                             └────resolve (tie, dispute policy)──→ [Disputed]
//! ```
//!
//! Resolved and Disputed are terminal. Tallies are frozen once terminal.

use serde::{Deserialize, Serialize};
use shared_types::{
    AccountId, Amount, AttestationChoice, CourtResult, FundsError, StateError, SubmissionId,
    Timestamp,
};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodStatus {
    /// Accepting attestations until `end_time`.
    Active,
    /// Majority decided; funds moved.
    Resolved,
    /// Tie escalated; every stake returned in full.
    Disputed,
}

impl PeriodStatus {
    pub fn is_terminal(self) -> bool {
        match self {
            Self::Active => false,
            Self::Resolved | Self::Disputed => true,
        }
    }

    /// Only `Active` may move, and only to a terminal state.
    pub fn can_transition_to(self, next: PeriodStatus) -> bool {
        match (self, next) {
            (Self::Active, Self::Resolved) | (Self::Active, Self::Disputed) => true,
            (Self::Active, Self::Active)
            | (Self::Resolved, _)
            | (Self::Disputed, _) => false,
        }
    }
}

impl fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Resolved => f.write_str("resolved"),
            Self::Disputed => f.write_str("disputed"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationPeriod {
    pub submission_id: SubmissionId,
    pub author_id: AccountId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub status: PeriodStatus,
    pub total_valid_stake: Amount,
    pub total_invalid_stake: Amount,
    /// Set only when the period reaches `Resolved`.
    pub resolved_is_valid: Option<bool>,
}

impl AttestationPeriod {
    pub fn new(
        submission_id: SubmissionId,
        author_id: AccountId,
        now: Timestamp,
        window_secs: u64,
    ) -> Self {
        Self {
            submission_id,
            author_id,
            start_time: now,
            end_time: now.saturating_add(window_secs),
            status: PeriodStatus::Active,
            total_valid_stake: 0,
            total_invalid_stake: 0,
            resolved_is_valid: None,
        }
    }

    /// Active and `now < end_time`.
    pub fn is_open(&self, now: Timestamp) -> bool {
        self.status == PeriodStatus::Active && now < self.end_time
    }

    pub fn tally(&self, choice: AttestationChoice) -> Amount {
        match choice {
            AttestationChoice::Valid => self.total_valid_stake,
            AttestationChoice::Invalid => self.total_invalid_stake,
        }
    }

    /// The tally after adding `amount` to `choice`, without applying it.
    pub(crate) fn tally_with(
        &self,
        choice: AttestationChoice,
        amount: Amount,
        attestor: &AccountId,
    ) -> CourtResult<Amount> {
        self.tally(choice).checked_add(amount).ok_or_else(|| {
            FundsError::ArithmeticOverflow {
                account: attestor.clone(),
            }
            .into()
        })
    }

    pub(crate) fn set_tally(&mut self, choice: AttestationChoice, value: Amount) {
        match choice {
            AttestationChoice::Valid => self.total_valid_stake = value,
            AttestationChoice::Invalid => self.total_invalid_stake = value,
        }
    }

    pub(crate) fn transition(
        &mut self,
        next: PeriodStatus,
        resolved_is_valid: Option<bool>,
    ) -> CourtResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(StateError::AlreadyResolved(self.submission_id.clone()).into());
        }
        self.status = next;
        self.resolved_is_valid = resolved_is_valid;
        Ok(())
    }
}

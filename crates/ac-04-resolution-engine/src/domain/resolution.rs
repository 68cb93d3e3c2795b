//! Resolution record handed to external consumers.

use super::plan::ResolutionPlan;
use ac_03_attestation_periods::PeriodStatus;
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, Amount, SubmissionId, Timestamp};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub submission_id: SubmissionId,
    /// `Resolved` or `Disputed`.
    pub status: PeriodStatus,
    /// Majority side. `false` for a disputed or empty period.
    pub resolved_is_valid: bool,
    pub total_valid_stake: Amount,
    pub total_invalid_stake: Amount,
    pub winners: Vec<AccountId>,
    pub amounts: Vec<Amount>,
    pub losers: Vec<AccountId>,
    pub slashed_amounts: Vec<Amount>,
    pub pool: Amount,
    /// Flooring remainder retained by the protocol.
    pub dust: Amount,
    pub resolved_at: Timestamp,
}

impl Resolution {
    pub(crate) fn from_plan(plan: ResolutionPlan, status: PeriodStatus, now: Timestamp) -> Self {
        Self {
            resolved_is_valid: plan.outcome.resolved_is_valid().unwrap_or(false),
            submission_id: plan.submission_id,
            status,
            total_valid_stake: plan.total_valid_stake,
            total_invalid_stake: plan.total_invalid_stake,
            winners: plan.winners,
            amounts: plan.rewards,
            losers: plan.losers,
            slashed_amounts: plan.slashed,
            pool: plan.pool,
            dust: plan.dust,
            resolved_at: now,
        }
    }

    pub fn is_disputed(&self) -> bool {
        self.status == PeriodStatus::Disputed
    }

    pub fn total_slashed(&self) -> Amount {
        self.slashed_amounts.iter().sum()
    }

    pub fn total_rewarded(&self) -> Amount {
        self.amounts.iter().sum()
    }
}

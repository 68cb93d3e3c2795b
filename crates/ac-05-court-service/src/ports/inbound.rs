//! Driving Ports (API - Inbound)

use ac_01_ledger_accounts::Account;
use ac_02_staking_reservoir::PoolTotals;
use ac_03_attestation_periods::{AttestationId, AttestationPeriod};
use ac_04_resolution_engine::Resolution;
use async_trait::async_trait;
use shared_types::{AccountId, Amount, AttestationChoice, CourtResult, SubmissionId, Timestamp};

/// Result of a `resolve` call.
///
/// A period that some earlier caller already finalized is a success, not
/// an error: `resolve` is permissionless and may race.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// This call performed the terminal transition.
    Finalized(Resolution),
    /// Some earlier call did; nothing changed.
    AlreadyResolved,
}

impl ResolveOutcome {
    pub fn resolution(&self) -> Option<&Resolution> {
        match self {
            Self::Finalized(resolution) => Some(resolution),
            Self::AlreadyResolved => None,
        }
    }

    pub fn is_already_resolved(&self) -> bool {
        matches!(self, Self::AlreadyResolved)
    }
}

/// Primary Court API
///
/// Every call is one atomic unit: it either fully applies or fails leaving
/// the court unchanged. `now` always comes from the caller.
#[async_trait]
pub trait CourtApi: Send + Sync {
    /// Adds stake, creating the account on first stake.
    async fn stake(&self, account: &AccountId, amount: Amount, now: Timestamp)
        -> CourtResult<Account>;

    /// Withdraws stake not locked behind an attestation.
    async fn unstake(
        &self,
        account: &AccountId,
        amount: Amount,
        now: Timestamp,
    ) -> CourtResult<Account>;

    /// Settles staking yield into pending rewards.
    async fn accrue_yield(&self, account: &AccountId, now: Timestamp) -> CourtResult<Amount>;

    /// Settles yield and releases all pending rewards for payout.
    async fn claim_rewards(&self, account: &AccountId, now: Timestamp) -> CourtResult<Amount>;

    /// Opens the attestation window for a submission.
    async fn start_period(
        &self,
        submission_id: &SubmissionId,
        author_id: &AccountId,
        now: Timestamp,
    ) -> CourtResult<AttestationPeriod>;

    /// Locks stake behind a judgment on a submission.
    async fn attest(
        &self,
        submission_id: &SubmissionId,
        attestor: &AccountId,
        choice: AttestationChoice,
        stake_amount: Amount,
        now: Timestamp,
    ) -> CourtResult<AttestationId>;

    /// Withdraws a live attestation and unlocks its stake.
    async fn revoke_attestation(
        &self,
        submission_id: &SubmissionId,
        attestor: &AccountId,
        now: Timestamp,
    ) -> CourtResult<()>;

    /// Finalizes an expired period. Idempotent.
    async fn resolve(&self, submission_id: &SubmissionId, now: Timestamp)
        -> CourtResult<ResolveOutcome>;

    async fn get_period(&self, submission_id: &SubmissionId) -> CourtResult<AttestationPeriod>;

    async fn get_account(&self, account: &AccountId) -> CourtResult<Account>;

    /// Live attestors as `(valid, invalid)`, each ordered by id.
    async fn get_attestors(
        &self,
        submission_id: &SubmissionId,
    ) -> CourtResult<(Vec<AccountId>, Vec<AccountId>)>;

    async fn pool_totals(&self) -> PoolTotals;
}

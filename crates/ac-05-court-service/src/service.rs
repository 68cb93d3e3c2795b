//! Court Service - serialized facade over every subsystem
//!
//! Each API call takes the state write guard once, runs its whole
//! read-validate-write sequence, and releases the guard. Events and
//! verdicts are delivered only after release, so no external call ever
//! runs inside the atomic unit.
//!
//! Mutating calls also hold the emission gate from before the commit until
//! their events are out, so subscribers see events in commit order. Queries
//! never touch the gate.

use crate::config::CourtConfig;
use crate::ports::inbound::{CourtApi, ResolveOutcome};
use crate::ports::outbound::{SubmissionRegistry, SubmissionVerdict};
use crate::state::{CourtSnapshot, CourtState};
use ac_01_ledger_accounts::{Account, LedgerAccounts};
use ac_02_staking_reservoir::{AuditError, PoolTotals};
use ac_03_attestation_periods::{AttestationId, AttestationPeriod};
use ac_04_resolution_engine::Resolution;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_bus::{CourtEvent, EventPublisher};
use shared_types::{
    AccountId, Amount, AttestationChoice, CourtResult, SubmissionId, Timestamp,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

pub struct CourtService<R, P>
where
    R: SubmissionRegistry,
    P: EventPublisher,
{
    config: CourtConfig,
    state: Arc<RwLock<CourtState>>,
    emission: Mutex<()>,
    registry: Arc<R>,
    publisher: Arc<P>,
}

impl<R, P> CourtService<R, P>
where
    R: SubmissionRegistry,
    P: EventPublisher,
{
    pub fn new(config: CourtConfig, registry: Arc<R>, publisher: Arc<P>) -> Self {
        let state = CourtState::new(&config);
        Self {
            config,
            state: Arc::new(RwLock::new(state)),
            emission: Mutex::new(()),
            registry,
            publisher,
        }
    }

    pub fn config(&self) -> &CourtConfig {
        &self.config
    }

    pub fn snapshot(&self) -> CourtSnapshot {
        self.state.read().snapshot()
    }

    /// Checks the pool totals against every account.
    pub fn audit(&self) -> Result<(), AuditError> {
        self.state.read().audit()
    }

    async fn emit(&self, events: Vec<CourtEvent>) {
        for event in events {
            self.publisher.publish(event).await;
        }
    }

    async fn finalize(&self, resolution: &Resolution) {
        let mut events = Vec::with_capacity(3);
        if resolution.is_disputed() {
            events.push(CourtEvent::PeriodDisputed {
                submission_id: resolution.submission_id.clone(),
                total_valid: resolution.total_valid_stake,
                total_invalid: resolution.total_invalid_stake,
            });
        } else {
            if !resolution.losers.is_empty() {
                events.push(CourtEvent::StakeSlashed {
                    submission_id: resolution.submission_id.clone(),
                    losers: resolution.losers.clone(),
                    amounts: resolution.slashed_amounts.clone(),
                });
            }
            if !resolution.winners.is_empty() {
                events.push(CourtEvent::RewardsDistributed {
                    submission_id: resolution.submission_id.clone(),
                    winners: resolution.winners.clone(),
                    amounts: resolution.amounts.clone(),
                    dust: resolution.dust,
                });
            }
            events.push(CourtEvent::PeriodResolved {
                submission_id: resolution.submission_id.clone(),
                is_valid: resolution.resolved_is_valid,
                total_valid: resolution.total_valid_stake,
                total_invalid: resolution.total_invalid_stake,
            });
        }
        self.emit(events).await;

        self.registry
            .report_verdict(SubmissionVerdict {
                correlation_id: Uuid::new_v4(),
                submission_id: resolution.submission_id.clone(),
                status: resolution.status,
                is_valid: resolution.resolved_is_valid,
                resolved_at: resolution.resolved_at,
            })
            .await;
    }
}

#[async_trait]
impl<R, P> CourtApi for CourtService<R, P>
where
    R: SubmissionRegistry,
    P: EventPublisher,
{
    async fn stake(
        &self,
        account: &AccountId,
        amount: Amount,
        now: Timestamp,
    ) -> CourtResult<Account> {
        let _emission = self.emission.lock().await;
        let updated = self.state.write().reservoir.stake(account, amount, now)?;
        self.emit(vec![CourtEvent::Staked {
            account: account.clone(),
            amount,
            staked_balance: updated.staked_balance,
            at: now,
        }])
        .await;
        Ok(updated)
    }

    async fn unstake(
        &self,
        account: &AccountId,
        amount: Amount,
        now: Timestamp,
    ) -> CourtResult<Account> {
        let _emission = self.emission.lock().await;
        let updated = self.state.write().reservoir.unstake(account, amount, now)?;
        self.emit(vec![CourtEvent::Unstaked {
            account: account.clone(),
            amount,
            staked_balance: updated.staked_balance,
            at: now,
        }])
        .await;
        Ok(updated)
    }

    async fn accrue_yield(&self, account: &AccountId, now: Timestamp) -> CourtResult<Amount> {
        let _emission = self.emission.lock().await;
        let accrued = self.state.write().reservoir.accrue_yield(account, now)?;
        if accrued > 0 {
            self.emit(vec![CourtEvent::YieldAccrued {
                account: account.clone(),
                amount: accrued,
                at: now,
            }])
            .await;
        }
        Ok(accrued)
    }

    async fn claim_rewards(&self, account: &AccountId, now: Timestamp) -> CourtResult<Amount> {
        let _emission = self.emission.lock().await;
        let claimed = self.state.write().reservoir.claim_rewards(account, now)?;
        self.emit(vec![CourtEvent::RewardsClaimed {
            account: account.clone(),
            amount: claimed,
            at: now,
        }])
        .await;
        Ok(claimed)
    }

    async fn start_period(
        &self,
        submission_id: &SubmissionId,
        author_id: &AccountId,
        now: Timestamp,
    ) -> CourtResult<AttestationPeriod> {
        let _emission = self.emission.lock().await;
        let period = self.state.write().periods.start(submission_id, author_id, now)?;
        self.emit(vec![CourtEvent::PeriodStarted {
            submission_id: period.submission_id.clone(),
            author_id: period.author_id.clone(),
            start_time: period.start_time,
            end_time: period.end_time,
        }])
        .await;
        Ok(period)
    }

    async fn attest(
        &self,
        submission_id: &SubmissionId,
        attestor: &AccountId,
        choice: AttestationChoice,
        stake_amount: Amount,
        now: Timestamp,
    ) -> CourtResult<AttestationId> {
        let _emission = self.emission.lock().await;
        let attestation = self
            .state
            .write()
            .attest(submission_id, attestor, choice, stake_amount, now)?;
        self.emit(vec![CourtEvent::AttestationRecorded {
            submission_id: attestation.submission_id.clone(),
            attestor: attestation.attestor.clone(),
            attestation_id: attestation.id.to_hex(),
            choice: attestation.choice,
            stake_amount: attestation.stake_amount,
            made_at: attestation.made_at,
        }])
        .await;
        Ok(attestation.id)
    }

    async fn revoke_attestation(
        &self,
        submission_id: &SubmissionId,
        attestor: &AccountId,
        now: Timestamp,
    ) -> CourtResult<()> {
        let _emission = self.emission.lock().await;
        let revoked = self.state.write().revoke(submission_id, attestor, now)?;
        self.emit(vec![CourtEvent::AttestationRevoked {
            submission_id: revoked.submission_id,
            attestor: revoked.attestor,
            choice: revoked.choice,
            stake_amount: revoked.stake_amount,
        }])
        .await;
        Ok(())
    }

    async fn resolve(
        &self,
        submission_id: &SubmissionId,
        now: Timestamp,
    ) -> CourtResult<ResolveOutcome> {
        let _emission = self.emission.lock().await;
        let result = self.state.write().resolve(submission_id, now);
        match result {
            Ok(resolution) => {
                self.finalize(&resolution).await;
                info!(
                    submission = %submission_id,
                    status = %resolution.status,
                    "Verdict delivered"
                );
                Ok(ResolveOutcome::Finalized(resolution))
            }
            Err(err) if err.is_idempotent_success() => {
                debug!(submission = %submission_id, "Resolve on finalized period is a no-op");
                Ok(ResolveOutcome::AlreadyResolved)
            }
            Err(err) => Err(err),
        }
    }

    async fn get_period(&self, submission_id: &SubmissionId) -> CourtResult<AttestationPeriod> {
        self.state.read().periods.require(submission_id).cloned()
    }

    async fn get_account(&self, account: &AccountId) -> CourtResult<Account> {
        self.state.read().reservoir.account(account)
    }

    async fn get_attestors(
        &self,
        submission_id: &SubmissionId,
    ) -> CourtResult<(Vec<AccountId>, Vec<AccountId>)> {
        self.state.read().periods.attestors(submission_id)
    }

    async fn pool_totals(&self) -> PoolTotals {
        self.state.read().reservoir.totals().clone()
    }
}

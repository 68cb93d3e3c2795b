//! Court state: every record the court owns, behind one lock in the service.

use crate::config::CourtConfig;
use ac_01_ledger_accounts::Account;
use ac_02_staking_reservoir::{AuditError, PoolTotals, StakingReservoir};
use ac_03_attestation_periods::{Attestation, AttestationPeriod, PeriodBook};
use ac_04_resolution_engine::{Resolution, ResolutionEngine};
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, Amount, AttestationChoice, CourtResult, SubmissionId, Timestamp};

#[derive(Clone, Debug)]
pub struct CourtState {
    pub reservoir: StakingReservoir,
    pub periods: PeriodBook,
    pub engine: ResolutionEngine,
}

impl CourtState {
    pub fn new(config: &CourtConfig) -> Self {
        Self {
            reservoir: StakingReservoir::new(config.reservoir.clone()),
            periods: PeriodBook::new(config.periods.clone()),
            engine: ResolutionEngine::new(config.resolution.clone()),
        }
    }

    pub fn attest(
        &mut self,
        submission_id: &SubmissionId,
        attestor: &AccountId,
        choice: AttestationChoice,
        stake_amount: Amount,
        now: Timestamp,
    ) -> CourtResult<Attestation> {
        self.periods.attest(
            &mut self.reservoir,
            submission_id,
            attestor,
            choice,
            stake_amount,
            now,
        )
    }

    pub fn revoke(
        &mut self,
        submission_id: &SubmissionId,
        attestor: &AccountId,
        now: Timestamp,
    ) -> CourtResult<Attestation> {
        self.periods
            .revoke(&mut self.reservoir, submission_id, attestor, now)
    }

    pub fn resolve(&mut self, submission_id: &SubmissionId, now: Timestamp) -> CourtResult<Resolution> {
        self.engine
            .resolve(&mut self.periods, &mut self.reservoir, submission_id, now)
    }

    pub fn audit(&self) -> Result<(), AuditError> {
        self.reservoir.audit()
    }

    pub fn snapshot(&self) -> CourtSnapshot {
        CourtSnapshot {
            accounts: self.reservoir.book().accounts().into_iter().cloned().collect(),
            periods: self.periods.periods().into_iter().cloned().collect(),
            totals: self.reservoir.totals().clone(),
        }
    }
}

/// Point-in-time copy of every account, period and pool total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtSnapshot {
    /// Ordered by account id.
    pub accounts: Vec<Account>,
    /// Ordered by submission id.
    pub periods: Vec<AttestationPeriod>,
    pub totals: PoolTotals,
}

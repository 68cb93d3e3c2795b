//! # Period Book
//!
//! Every attestation period and its live attestations.
//!
//! `attest` and `revoke` validate everything first, then perform the single
//! fallible ledger call, then apply the infallible tally and record writes.
//! A rejected call therefore leaves neither the ledger nor the book changed.

use super::attestation::{Attestation, AttestationId};
use super::period::{AttestationPeriod, PeriodStatus};
use crate::config::PeriodConfig;
use ac_01_ledger_accounts::EscrowLedger;
use shared_types::{
    AccountId, Amount, AttestationChoice, CourtResult, StateError, SubmissionId, Timestamp,
    ValidationError,
};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

#[derive(Clone, Debug, Default)]
pub struct PeriodBook {
    config: PeriodConfig,
    periods: HashMap<SubmissionId, AttestationPeriod>,
    /// Live attestations per period, ordered by attestor.
    attestations: HashMap<SubmissionId, BTreeMap<AccountId, Attestation>>,
    sequence: u64,
}

impl PeriodBook {
    pub fn new(config: PeriodConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &PeriodConfig {
        &self.config
    }

    /// Opens the voting window for a submission.
    pub fn start(
        &mut self,
        submission_id: &SubmissionId,
        author_id: &AccountId,
        now: Timestamp,
    ) -> CourtResult<AttestationPeriod> {
        if self.periods.contains_key(submission_id) {
            return Err(StateError::PeriodAlreadyExists(submission_id.clone()).into());
        }

        let period = AttestationPeriod::new(
            submission_id.clone(),
            author_id.clone(),
            now,
            self.config.attestation_window_secs,
        );
        self.periods.insert(submission_id.clone(), period.clone());
        self.attestations
            .insert(submission_id.clone(), BTreeMap::new());

        info!(
            submission = %submission_id,
            author = %author_id,
            end_time = period.end_time,
            "Attestation period started"
        );
        Ok(period)
    }

    /// Locks `stake_amount` from the attestor and records the vote.
    pub fn attest<L: EscrowLedger>(
        &mut self,
        ledger: &mut L,
        submission_id: &SubmissionId,
        attestor: &AccountId,
        choice: AttestationChoice,
        stake_amount: Amount,
        now: Timestamp,
    ) -> CourtResult<Attestation> {
        let period = self.require(submission_id)?;

        if !period.is_open(now) {
            debug!(submission = %submission_id, attestor = %attestor, now, "Attest after window");
            return Err(ValidationError::WindowClosed {
                submission_id: submission_id.clone(),
                end_time: period.end_time,
            }
            .into());
        }
        if stake_amount < self.config.minimum_attestation_stake {
            return Err(ValidationError::StakeBelowMinimum {
                offered: stake_amount,
                minimum: self.config.minimum_attestation_stake,
            }
            .into());
        }
        if &period.author_id == attestor {
            return Err(ValidationError::SelfAttestationForbidden {
                submission_id: submission_id.clone(),
                attestor: attestor.clone(),
            }
            .into());
        }
        if self.live(submission_id, attestor).is_some() {
            return Err(ValidationError::DuplicateVote {
                submission_id: submission_id.clone(),
                attestor: attestor.clone(),
            }
            .into());
        }
        let new_tally = period.tally_with(choice, stake_amount, attestor)?;

        ledger.lock(attestor, stake_amount)?;

        let sequence = self.sequence;
        self.sequence += 1;
        let attestation = Attestation {
            id: AttestationId::derive(
                submission_id,
                attestor,
                choice,
                stake_amount,
                now,
                sequence,
            ),
            submission_id: submission_id.clone(),
            attestor: attestor.clone(),
            choice,
            stake_amount,
            made_at: now,
        };

        if let Some(period) = self.periods.get_mut(submission_id) {
            period.set_tally(choice, new_tally);
        }
        self.attestations
            .entry(submission_id.clone())
            .or_default()
            .insert(attestor.clone(), attestation.clone());

        info!(
            submission = %submission_id,
            attestor = %attestor,
            choice = %choice,
            stake = stake_amount,
            id = %attestation.id,
            "Attestation recorded"
        );
        Ok(attestation)
    }

    /// Unlocks the attestor's stake and deletes the vote. Only while the
    /// window is open.
    pub fn revoke<L: EscrowLedger>(
        &mut self,
        ledger: &mut L,
        submission_id: &SubmissionId,
        attestor: &AccountId,
        now: Timestamp,
    ) -> CourtResult<Attestation> {
        let period = self.require(submission_id)?;

        if !period.is_open(now) {
            return Err(ValidationError::WindowClosed {
                submission_id: submission_id.clone(),
                end_time: period.end_time,
            }
            .into());
        }
        let existing = self
            .live(submission_id, attestor)
            .cloned()
            .ok_or_else(|| ValidationError::NoExistingVote {
                submission_id: submission_id.clone(),
                attestor: attestor.clone(),
            })?;
        let new_tally = period
            .tally(existing.choice)
            .saturating_sub(existing.stake_amount);

        ledger.unlock(attestor, existing.stake_amount)?;

        if let Some(period) = self.periods.get_mut(submission_id) {
            period.set_tally(existing.choice, new_tally);
        }
        if let Some(live) = self.attestations.get_mut(submission_id) {
            live.remove(attestor);
        }

        info!(
            submission = %submission_id,
            attestor = %attestor,
            choice = %existing.choice,
            stake = existing.stake_amount,
            "Attestation revoked"
        );
        Ok(existing)
    }

    pub fn get(&self, submission_id: &SubmissionId) -> Option<&AttestationPeriod> {
        self.periods.get(submission_id)
    }

    pub fn require(&self, submission_id: &SubmissionId) -> CourtResult<&AttestationPeriod> {
        self.periods
            .get(submission_id)
            .ok_or_else(|| StateError::PeriodNotFound(submission_id.clone()).into())
    }

    /// Periods in submission order.
    pub fn periods(&self) -> Vec<&AttestationPeriod> {
        let mut all: Vec<&AttestationPeriod> = self.periods.values().collect();
        all.sort_by(|a, b| a.submission_id.cmp(&b.submission_id));
        all
    }

    fn live(&self, submission_id: &SubmissionId, attestor: &AccountId) -> Option<&Attestation> {
        self.attestations
            .get(submission_id)
            .and_then(|live| live.get(attestor))
    }

    /// Live attestations ordered by attestor.
    pub fn attestations(&self, submission_id: &SubmissionId) -> CourtResult<Vec<&Attestation>> {
        self.require(submission_id)?;
        Ok(self
            .attestations
            .get(submission_id)
            .map(|live| live.values().collect())
            .unwrap_or_default())
    }

    /// Attestors split by side: `(valid, invalid)`, each ordered by id.
    pub fn attestors(
        &self,
        submission_id: &SubmissionId,
    ) -> CourtResult<(Vec<AccountId>, Vec<AccountId>)> {
        let (valid, invalid): (Vec<&Attestation>, Vec<&Attestation>) = self
            .attestations(submission_id)?
            .into_iter()
            .partition(|a| a.choice.is_valid());
        Ok((
            valid.into_iter().map(|a| a.attestor.clone()).collect(),
            invalid.into_iter().map(|a| a.attestor.clone()).collect(),
        ))
    }

    /// Active → Resolved. Fails `AlreadyResolved` if already terminal.
    pub fn mark_resolved(&mut self, submission_id: &SubmissionId, is_valid: bool) -> CourtResult<()> {
        self.period_mut(submission_id)?
            .transition(PeriodStatus::Resolved, Some(is_valid))
    }

    /// Active → Disputed. Fails `AlreadyResolved` if already terminal.
    pub fn mark_disputed(&mut self, submission_id: &SubmissionId) -> CourtResult<()> {
        self.period_mut(submission_id)?
            .transition(PeriodStatus::Disputed, None)
    }

    fn period_mut(&mut self, submission_id: &SubmissionId) -> CourtResult<&mut AttestationPeriod> {
        self.periods
            .get_mut(submission_id)
            .ok_or_else(|| StateError::PeriodNotFound(submission_id.clone()).into())
    }
}

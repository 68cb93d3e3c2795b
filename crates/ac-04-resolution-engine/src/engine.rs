//! # Resolution Engine
//!
//! Finalizes an expired period exactly once.
//!
//! 1. Reject terminal periods with `AlreadyResolved` (idempotent success).
//! 2. Reject `now < end_time` with `WindowNotClosed`.
//! 3. Plan every movement, check value conservation.
//! 4. Apply the plan as one ledger batch, retain dust.
//! 5. Transition the period to its terminal status.

use crate::config::ResolutionConfig;
use crate::domain::{invariant_value_conserved, plan_resolution, Outcome, Resolution};
use crate::metrics;
use crate::ports::SettlementLedger;
use ac_03_attestation_periods::{PeriodBook, PeriodStatus};
use shared_types::{CourtResult, FundsError, StateError, SubmissionId, Timestamp, ValidationError};
use tracing::{debug, error, info};

#[derive(Clone, Debug, Default)]
pub struct ResolutionEngine {
    config: ResolutionConfig,
}

impl ResolutionEngine {
    pub fn new(config: ResolutionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolutionConfig {
        &self.config
    }

    pub fn resolve<L: SettlementLedger>(
        &self,
        periods: &mut PeriodBook,
        ledger: &mut L,
        submission_id: &SubmissionId,
        now: Timestamp,
    ) -> CourtResult<Resolution> {
        let result = self.try_resolve(periods, ledger, submission_id, now);
        if let Err(err) = &result {
            metrics::record_resolve_rejected(err.kind());
        }
        result
    }

    fn try_resolve<L: SettlementLedger>(
        &self,
        periods: &mut PeriodBook,
        ledger: &mut L,
        submission_id: &SubmissionId,
        now: Timestamp,
    ) -> CourtResult<Resolution> {
        let period = periods.require(submission_id)?;

        if period.status.is_terminal() {
            debug!(submission = %submission_id, status = %period.status, "Already resolved");
            return Err(StateError::AlreadyResolved(submission_id.clone()).into());
        }
        if now < period.end_time {
            return Err(ValidationError::WindowNotClosed {
                submission_id: submission_id.clone(),
                end_time: period.end_time,
                now,
            }
            .into());
        }

        let attestations = periods.attestations(submission_id)?;
        let plan = plan_resolution(period, &attestations, &self.config)?;
        if !invariant_value_conserved(&plan) {
            error!(
                submission = %submission_id,
                pool = plan.pool,
                dust = plan.dust,
                "Resolution plan does not conserve value"
            );
            return Err(FundsError::ValueNotConserved(submission_id.clone()).into());
        }

        ledger.apply_batch(plan.ops.clone(), now)?;
        ledger.retain_dust(plan.dust);

        let status = match plan.outcome {
            Outcome::Disputed => {
                periods.mark_disputed(submission_id)?;
                PeriodStatus::Disputed
            }
            Outcome::NoAttestations | Outcome::Majority(_) => {
                let is_valid = plan.outcome.resolved_is_valid().unwrap_or(false);
                periods.mark_resolved(submission_id, is_valid)?;
                PeriodStatus::Resolved
            }
        };

        let resolution = Resolution::from_plan(plan, status, now);
        metrics::record_resolution(&resolution);

        info!(
            submission = %submission_id,
            status = %resolution.status,
            is_valid = resolution.resolved_is_valid,
            total_valid = resolution.total_valid_stake,
            total_invalid = resolution.total_invalid_stake,
            pool = resolution.pool,
            dust = resolution.dust,
            "Attestation period finalized"
        );
        Ok(resolution)
    }
}

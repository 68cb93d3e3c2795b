//! # Resolution Plan
//!
//! The pure half of resolution: given a period's tallies and live
//! attestations, compute every fund movement without touching the ledger.
//!
//! ```text
//! minority i:  slash_i  = floor(stake_i * pct / 100)
//!              unlock   = stake_i - slash_i
//! pool        = Σ slash_i
//! majority j:  unlock   = stake_j
//!              reward_j = floor(pool * stake_j / majority_total)
//! dust        = pool - Σ reward_j
//! ```

use super::majority::{determine_outcome, Outcome};
use crate::config::ResolutionConfig;
use ac_01_ledger_accounts::LedgerOp;
use ac_03_attestation_periods::{Attestation, AttestationPeriod};
use shared_types::{AccountId, Amount, CourtResult, FundsError, SubmissionId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolutionPlan {
    pub submission_id: SubmissionId,
    pub outcome: Outcome,
    pub total_valid_stake: Amount,
    pub total_invalid_stake: Amount,
    /// Majority attestors, ordered by id, and their rewards.
    pub winners: Vec<AccountId>,
    pub rewards: Vec<Amount>,
    /// Minority attestors, ordered by id, and what each forfeits.
    pub losers: Vec<AccountId>,
    pub slashed: Vec<Amount>,
    pub pool: Amount,
    pub dust: Amount,
    /// Every ledger movement, to be applied as one batch.
    pub ops: Vec<LedgerOp>,
}

pub fn plan_resolution(
    period: &AttestationPeriod,
    attestations: &[&Attestation],
    config: &ResolutionConfig,
) -> CourtResult<ResolutionPlan> {
    config.validate()?;
    let outcome = determine_outcome(
        period.total_valid_stake,
        period.total_invalid_stake,
        config.tie_policy,
    );
    let mut plan = ResolutionPlan {
        submission_id: period.submission_id.clone(),
        outcome,
        total_valid_stake: period.total_valid_stake,
        total_invalid_stake: period.total_invalid_stake,
        winners: Vec::new(),
        rewards: Vec::new(),
        losers: Vec::new(),
        slashed: Vec::new(),
        pool: 0,
        dust: 0,
        ops: Vec::new(),
    };

    let majority = match outcome {
        Outcome::NoAttestations => return Ok(plan),
        Outcome::Disputed => {
            for attestation in attestations {
                plan.ops.push(LedgerOp::unlock(
                    attestation.attestor.clone(),
                    attestation.stake_amount,
                ));
            }
            return Ok(plan);
        }
        Outcome::Majority(side) => side,
    };

    let (winners, losers): (Vec<&Attestation>, Vec<&Attestation>) =
        attestations.iter().copied().partition(|a| a.choice == majority);

    for loser in &losers {
        let slash = percent_of(loser.stake_amount, config.slash_percentage, &loser.attestor)?;
        if slash > 0 {
            plan.ops.push(LedgerOp::slash(loser.attestor.clone(), slash));
        }
        let remainder = loser
            .stake_amount
            .checked_sub(slash)
            .ok_or_else(|| overflow(&loser.attestor))?;
        if remainder > 0 {
            plan.ops.push(LedgerOp::unlock(loser.attestor.clone(), remainder));
        }
        plan.pool = plan.pool.checked_add(slash).ok_or_else(|| overflow(&loser.attestor))?;
        plan.losers.push(loser.attestor.clone());
        plan.slashed.push(slash);
    }

    let majority_total = period.tally(majority);
    let mut distributed: Amount = 0;
    for winner in &winners {
        plan.ops.push(LedgerOp::unlock(winner.attestor.clone(), winner.stake_amount));
        let reward = pro_rata(plan.pool, winner.stake_amount, majority_total, &winner.attestor)?;
        if reward > 0 {
            plan.ops.push(LedgerOp::credit(winner.attestor.clone(), reward));
        }
        distributed += reward;
        plan.winners.push(winner.attestor.clone());
        plan.rewards.push(reward);
    }
    plan.dust = plan.pool - distributed;

    Ok(plan)
}

/// Invariant: every slashed unit is either rewarded or retained as dust.
pub fn invariant_value_conserved(plan: &ResolutionPlan) -> bool {
    let slashed = plan
        .slashed
        .iter()
        .try_fold(0 as Amount, |acc, s| acc.checked_add(*s));
    let rewarded = plan
        .rewards
        .iter()
        .try_fold(0 as Amount, |acc, r| acc.checked_add(*r));
    match (slashed, rewarded) {
        (Some(slashed), Some(rewarded)) => {
            slashed == plan.pool && rewarded.checked_add(plan.dust) == Some(plan.pool)
        }
        _ => false,
    }
}

fn percent_of(amount: Amount, pct: u8, account: &AccountId) -> CourtResult<Amount> {
    amount
        .checked_mul(Amount::from(pct))
        .map(|v| v / 100)
        .ok_or_else(|| overflow(account).into())
}

fn pro_rata(
    pool: Amount,
    stake: Amount,
    total: Amount,
    account: &AccountId,
) -> CourtResult<Amount> {
    if total == 0 {
        return Ok(0);
    }
    pool.checked_mul(stake)
        .map(|v| v / total)
        .ok_or_else(|| overflow(account).into())
}

fn overflow(account: &AccountId) -> FundsError {
    FundsError::ArithmeticOverflow {
        account: account.clone(),
    }
}

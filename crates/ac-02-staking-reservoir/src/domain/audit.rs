//! # Pool Audit
//!
//! Recomputes per-account sums and checks them, and the flow identities,
//! against the tracked totals.

use super::totals::PoolTotals;
use ac_01_ledger_accounts::AccountBook;
use shared_types::{AccountId, Amount};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    /// An account holds more locked than staked.
    #[error("Account {0} has locked balance above staked balance")]
    InconsistentAccount(AccountId),

    /// A tracked total no longer equals the sum over accounts.
    #[error("Pool drift on {field}: tracked {tracked}, actual {actual}")]
    Drift {
        field: &'static str,
        tracked: Amount,
        actual: Amount,
    },

    /// A flow identity does not balance.
    #[error("Unbalanced {identity}: left {left}, right {right}")]
    Unbalanced {
        identity: &'static str,
        left: Amount,
        right: Amount,
    },
}

pub(crate) fn audit(book: &AccountBook, totals: &PoolTotals) -> Result<(), AuditError> {
    let mut staked: Amount = 0;
    let mut locked: Amount = 0;
    let mut pending: Amount = 0;
    for account in book.accounts() {
        if !account.is_consistent() {
            return Err(AuditError::InconsistentAccount(account.id.clone()));
        }
        staked = staked.saturating_add(account.staked_balance);
        locked = locked.saturating_add(account.locked_balance);
        pending = pending.saturating_add(account.pending_rewards);
    }

    drift("total_staked", totals.total_staked, staked)?;
    drift("total_locked", totals.total_locked, locked)?;
    drift("total_pending_rewards", totals.total_pending_rewards, pending)?;

    balanced(
        "stake flow",
        totals.total_staked,
        totals
            .total_deposited
            .saturating_sub(totals.total_withdrawn)
            .saturating_sub(totals.total_slashed),
    )?;
    balanced(
        "reward flow",
        totals
            .total_pending_rewards
            .saturating_add(totals.total_rewards_claimed),
        totals
            .total_yield_accrued
            .saturating_add(totals.total_rewards_distributed),
    )?;
    balanced(
        "slash conservation",
        totals.total_slashed,
        totals
            .total_rewards_distributed
            .saturating_add(totals.protocol_dust),
    )
}

fn drift(field: &'static str, tracked: Amount, actual: Amount) -> Result<(), AuditError> {
    if tracked != actual {
        return Err(AuditError::Drift {
            field,
            tracked,
            actual,
        });
    }
    Ok(())
}

fn balanced(identity: &'static str, left: Amount, right: Amount) -> Result<(), AuditError> {
    if left != right {
        return Err(AuditError::Unbalanced {
            identity,
            left,
            right,
        });
    }
    Ok(())
}

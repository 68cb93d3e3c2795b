//! # Account Entity
//!
//! Per-participant balances. An account is created on first stake and never
//! deleted; zero balances persist.
//!
//! ```text
//!  staked_balance ───────────────────────────────────────────┐
//!  ├── locked_balance (committed to open attestations) ──┐   │
//!  └── available = staked - locked ──────────────────────┘   │
//!  pending_rewards (separate, never touched by slash) ───────┘
//! ```

use crate::algorithms::yield_math::{compute_yield, YieldRate};
use serde::{Deserialize, Serialize};
use shared_types::{
    AccountId, Amount, CourtResult, FundsError, Timestamp, ValidationError,
};

/// Ledger balances for one participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub staked_balance: Amount,
    pub locked_balance: Amount,
    pub pending_rewards: Amount,
    pub last_accrual_time: Timestamp,
}

impl Account {
    /// Empty account whose yield clock starts at `now`.
    pub fn new(id: AccountId, now: Timestamp) -> Self {
        Self {
            id,
            staked_balance: 0,
            locked_balance: 0,
            pending_rewards: 0,
            last_accrual_time: now,
        }
    }

    /// Stake that may be withdrawn or locked.
    pub fn available(&self) -> Amount {
        self.staked_balance.saturating_sub(self.locked_balance)
    }

    /// `locked_balance <= staked_balance`.
    pub fn is_consistent(&self) -> bool {
        self.locked_balance <= self.staked_balance
    }

    pub(crate) fn stake(&mut self, amount: Amount) -> CourtResult<()> {
        require_positive(amount)?;
        self.staked_balance = self.checked_add(self.staked_balance, amount)?;
        Ok(())
    }

    pub(crate) fn unstake(&mut self, amount: Amount) -> CourtResult<()> {
        require_positive(amount)?;
        let available = self.available();
        if amount > available {
            return Err(FundsError::InsufficientAvailableBalance {
                account: self.id.clone(),
                requested: amount,
                available,
            }
            .into());
        }
        self.staked_balance -= amount;
        Ok(())
    }

    pub(crate) fn lock(&mut self, amount: Amount) -> CourtResult<()> {
        require_positive(amount)?;
        let available = self.available();
        if amount > available {
            return Err(self.overdraw(amount, available));
        }
        self.locked_balance += amount;
        Ok(())
    }

    pub(crate) fn unlock(&mut self, amount: Amount) -> CourtResult<()> {
        require_positive(amount)?;
        if amount > self.locked_balance {
            return Err(self.overdraw(amount, self.locked_balance));
        }
        self.locked_balance -= amount;
        Ok(())
    }

    /// Burns locked stake. Both balances shrink; pending rewards are untouched.
    pub(crate) fn slash(&mut self, amount: Amount) -> CourtResult<()> {
        require_positive(amount)?;
        if amount > self.locked_balance {
            return Err(self.overdraw(amount, self.locked_balance));
        }
        self.locked_balance -= amount;
        self.staked_balance -= amount;
        Ok(())
    }

    pub(crate) fn credit_rewards(&mut self, amount: Amount) -> CourtResult<()> {
        require_positive(amount)?;
        self.pending_rewards = self.checked_add(self.pending_rewards, amount)?;
        Ok(())
    }

    /// Settles yield up to `now` into pending rewards.
    ///
    /// Reads only `staked_balance`. The accrual clock never moves backwards:
    /// a `now` earlier than the last accrual accrues nothing.
    pub(crate) fn accrue_yield(&mut self, now: Timestamp, rate: YieldRate) -> CourtResult<Amount> {
        let elapsed = now.saturating_sub(self.last_accrual_time);
        let accrued = compute_yield(self.staked_balance, rate, elapsed).ok_or_else(|| {
            FundsError::ArithmeticOverflow {
                account: self.id.clone(),
            }
        })?;
        self.pending_rewards = self.checked_add(self.pending_rewards, accrued)?;
        self.last_accrual_time = self.last_accrual_time.max(now);
        Ok(accrued)
    }

    /// Zeroes pending rewards, returning what was there.
    pub(crate) fn take_rewards(&mut self) -> Amount {
        std::mem::take(&mut self.pending_rewards)
    }

    fn checked_add(&self, a: Amount, b: Amount) -> CourtResult<Amount> {
        a.checked_add(b).ok_or_else(|| {
            FundsError::ArithmeticOverflow {
                account: self.id.clone(),
            }
            .into()
        })
    }

    fn overdraw(&self, requested: Amount, limit: Amount) -> shared_types::CourtError {
        FundsError::OverdrawLocked {
            account: self.id.clone(),
            requested,
            limit,
        }
        .into()
    }
}

fn require_positive(amount: Amount) -> CourtResult<()> {
    if amount == 0 {
        return Err(ValidationError::ZeroAmount.into());
    }
    Ok(())
}

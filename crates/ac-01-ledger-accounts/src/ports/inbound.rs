//! # Driving Ports
//!
//! Two surfaces over the same balances. `LedgerAccounts` is what stakers may
//! call. `EscrowLedger` moves locked funds and is reserved for the period
//! manager and the resolution engine; it is never exposed by the service API.

use crate::domain::{Account, AccountBook, BatchReceipt, LedgerOp};
use shared_types::{AccountId, Amount, CourtResult, Timestamp};

/// Staker-facing ledger operations.
pub trait LedgerAccounts {
    /// Adds stake, creating the account on first stake.
    fn stake(&mut self, account: &AccountId, amount: Amount, now: Timestamp)
        -> CourtResult<Account>;

    /// Withdraws unlocked stake.
    fn unstake(
        &mut self,
        account: &AccountId,
        amount: Amount,
        now: Timestamp,
    ) -> CourtResult<Account>;

    /// Settles yield into pending rewards, returning the amount accrued.
    fn accrue_yield(&mut self, account: &AccountId, now: Timestamp) -> CourtResult<Amount>;

    /// Settles yield, then zeroes and returns pending rewards.
    fn claim_rewards(&mut self, account: &AccountId, now: Timestamp) -> CourtResult<Amount>;

    fn account(&self, account: &AccountId) -> CourtResult<Account>;
}

/// Escrow movements on locked stake.
pub trait EscrowLedger {
    fn lock(&mut self, account: &AccountId, amount: Amount) -> CourtResult<()>;

    fn unlock(&mut self, account: &AccountId, amount: Amount) -> CourtResult<()>;

    /// Burns locked stake. `now` lets implementations settle yield first.
    fn slash(&mut self, account: &AccountId, amount: Amount, now: Timestamp) -> CourtResult<()>;

    fn credit_rewards(&mut self, account: &AccountId, amount: Amount) -> CourtResult<()>;

    /// Applies all ops or none.
    fn apply_batch(&mut self, ops: Vec<LedgerOp>, now: Timestamp) -> CourtResult<BatchReceipt>;
}

impl LedgerAccounts for AccountBook {
    fn stake(
        &mut self,
        account: &AccountId,
        amount: Amount,
        now: Timestamp,
    ) -> CourtResult<Account> {
        AccountBook::stake(self, account, amount, now)
    }

    fn unstake(
        &mut self,
        account: &AccountId,
        amount: Amount,
        _now: Timestamp,
    ) -> CourtResult<Account> {
        AccountBook::unstake(self, account, amount)
    }

    fn accrue_yield(&mut self, account: &AccountId, now: Timestamp) -> CourtResult<Amount> {
        AccountBook::accrue_yield(self, account, now)
    }

    fn claim_rewards(&mut self, account: &AccountId, now: Timestamp) -> CourtResult<Amount> {
        AccountBook::accrue_yield(self, account, now)?;
        self.take_rewards(account)
    }

    fn account(&self, account: &AccountId) -> CourtResult<Account> {
        self.require(account).cloned()
    }
}

impl EscrowLedger for AccountBook {
    fn lock(&mut self, account: &AccountId, amount: Amount) -> CourtResult<()> {
        AccountBook::lock(self, account, amount)
    }

    fn unlock(&mut self, account: &AccountId, amount: Amount) -> CourtResult<()> {
        AccountBook::unlock(self, account, amount)
    }

    fn slash(&mut self, account: &AccountId, amount: Amount, _now: Timestamp) -> CourtResult<()> {
        AccountBook::slash(self, account, amount)
    }

    fn credit_rewards(&mut self, account: &AccountId, amount: Amount) -> CourtResult<()> {
        AccountBook::credit_rewards(self, account, amount)
    }

    fn apply_batch(&mut self, ops: Vec<LedgerOp>, _now: Timestamp) -> CourtResult<BatchReceipt> {
        AccountBook::apply_batch(self, &ops)
    }
}

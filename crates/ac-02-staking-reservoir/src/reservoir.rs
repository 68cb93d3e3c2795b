//! # Staking Reservoir
//!
//! Pool-level operations on top of the account book. Every change to an
//! account's staked balance is preceded by settling its yield, inside the
//! same atomic batch, so yield is only ever paid on stake held for the whole
//! interval.

use crate::config::ReservoirConfig;
use crate::domain::audit::audit;
use crate::domain::{AuditError, PoolTotals};
use ac_01_ledger_accounts::{
    Account, AccountBook, BatchReceipt, EscrowLedger, LedgerAccounts, LedgerOp,
};
use shared_types::{AccountId, Amount, CourtResult, Timestamp};
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Clone, Debug)]
pub struct StakingReservoir {
    book: AccountBook,
    config: ReservoirConfig,
    totals: PoolTotals,
}

impl Default for StakingReservoir {
    fn default() -> Self {
        Self::new(ReservoirConfig::default())
    }
}

impl StakingReservoir {
    pub fn new(config: ReservoirConfig) -> Self {
        Self {
            book: AccountBook::new(config.yield_rate()),
            config,
            totals: PoolTotals::default(),
        }
    }

    pub fn config(&self) -> &ReservoirConfig {
        &self.config
    }

    pub fn totals(&self) -> &PoolTotals {
        &self.totals
    }

    pub fn book(&self) -> &AccountBook {
        &self.book
    }

    pub fn get(&self, account: &AccountId) -> Option<&Account> {
        self.book.get(account)
    }

    /// Credits flooring remainder to the protocol.
    pub fn retain_dust(&mut self, amount: Amount) {
        if amount > 0 {
            debug!(dust = amount, "Retaining reward dust");
            self.totals.record_dust(amount);
        }
    }

    /// Recomputes every aggregate and checks the flow identities.
    pub fn audit(&self) -> Result<(), AuditError> {
        audit(&self.book, &self.totals)
    }

    /// Runs `ops` after settling yield for every account whose staked
    /// balance the batch changes.
    fn commit(&mut self, ops: Vec<LedgerOp>, now: Timestamp) -> CourtResult<BatchReceipt> {
        let mut settled: HashSet<AccountId> = HashSet::new();
        let mut staged = Vec::with_capacity(ops.len() * 2);
        for op in ops {
            let changes_stake = matches!(
                op,
                LedgerOp::Stake { .. } | LedgerOp::Unstake { .. } | LedgerOp::Slash { .. }
            );
            let id = op.account().clone();
            if changes_stake && self.book.get(&id).is_some() && settled.insert(id.clone()) {
                staged.push(LedgerOp::accrue(id, now));
            }
            staged.push(op);
        }

        let receipt = self.book.apply_batch(&staged)?;
        self.totals.record(&receipt);
        Ok(receipt)
    }
}

impl LedgerAccounts for StakingReservoir {
    fn stake(
        &mut self,
        account: &AccountId,
        amount: Amount,
        now: Timestamp,
    ) -> CourtResult<Account> {
        let receipt = self.commit(vec![LedgerOp::stake(account.clone(), amount, now)], now)?;
        let updated = self.book.require(account)?.clone();
        info!(
            account = %account,
            amount,
            staked_balance = updated.staked_balance,
            settled_yield = receipt.yield_accrued,
            "Stake added"
        );
        Ok(updated)
    }

    fn unstake(
        &mut self,
        account: &AccountId,
        amount: Amount,
        now: Timestamp,
    ) -> CourtResult<Account> {
        self.commit(vec![LedgerOp::unstake(account.clone(), amount)], now)?;
        let updated = self.book.require(account)?.clone();
        info!(
            account = %account,
            amount,
            staked_balance = updated.staked_balance,
            "Stake withdrawn"
        );
        Ok(updated)
    }

    fn accrue_yield(&mut self, account: &AccountId, now: Timestamp) -> CourtResult<Amount> {
        let receipt = self.commit(vec![LedgerOp::accrue(account.clone(), now)], now)?;
        debug!(account = %account, accrued = receipt.yield_accrued, "Yield accrued");
        Ok(receipt.yield_accrued)
    }

    fn claim_rewards(&mut self, account: &AccountId, now: Timestamp) -> CourtResult<Amount> {
        self.commit(vec![LedgerOp::accrue(account.clone(), now)], now)?;
        let claimed = self.book.take_rewards(account)?;
        self.totals.record_claim(claimed);
        info!(account = %account, claimed, "Rewards claimed");
        Ok(claimed)
    }

    fn account(&self, account: &AccountId) -> CourtResult<Account> {
        self.book.require(account).cloned()
    }
}

impl EscrowLedger for StakingReservoir {
    fn lock(&mut self, account: &AccountId, amount: Amount) -> CourtResult<()> {
        self.book
            .apply_batch(&[LedgerOp::lock(account.clone(), amount)])
            .map(|receipt| self.totals.record(&receipt))
    }

    fn unlock(&mut self, account: &AccountId, amount: Amount) -> CourtResult<()> {
        self.book
            .apply_batch(&[LedgerOp::unlock(account.clone(), amount)])
            .map(|receipt| self.totals.record(&receipt))
    }

    fn slash(&mut self, account: &AccountId, amount: Amount, now: Timestamp) -> CourtResult<()> {
        self.commit(vec![LedgerOp::slash(account.clone(), amount)], now)
            .map(|_| ())
    }

    fn credit_rewards(&mut self, account: &AccountId, amount: Amount) -> CourtResult<()> {
        self.book
            .apply_batch(&[LedgerOp::credit(account.clone(), amount)])
            .map(|receipt| self.totals.record(&receipt))
    }

    fn apply_batch(&mut self, ops: Vec<LedgerOp>, now: Timestamp) -> CourtResult<BatchReceipt> {
        self.commit(ops, now)
    }
}

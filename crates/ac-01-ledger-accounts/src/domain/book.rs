//! # Account Book
//!
//! In-memory store of every account plus the yield schedule they accrue on.

use super::account::Account;
use super::batch::{BatchReceipt, LedgerOp};
use crate::algorithms::YieldRate;
use shared_types::{AccountId, Amount, CourtResult, StateError, Timestamp};
use std::collections::HashMap;
use tracing::debug;

/// All ledger accounts, keyed by id.
#[derive(Clone, Debug, Default)]
pub struct AccountBook {
    accounts: HashMap<AccountId, Account>,
    rate: YieldRate,
}

impl AccountBook {
    pub fn new(rate: YieldRate) -> Self {
        Self {
            accounts: HashMap::new(),
            rate,
        }
    }

    pub fn rate(&self) -> YieldRate {
        self.rate
    }

    pub fn get(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn require(&self, id: &AccountId) -> CourtResult<&Account> {
        self.accounts
            .get(id)
            .ok_or_else(|| StateError::AccountNotFound(id.clone()).into())
    }

    fn require_mut(&mut self, id: &AccountId) -> CourtResult<&mut Account> {
        self.accounts
            .get_mut(id)
            .ok_or_else(|| StateError::AccountNotFound(id.clone()).into())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Accounts in id order.
    pub fn accounts(&self) -> Vec<&Account> {
        let mut all: Vec<&Account> = self.accounts.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// Adds stake, creating the account on first stake.
    pub fn stake(&mut self, id: &AccountId, amount: Amount, now: Timestamp) -> CourtResult<Account> {
        let mut account = self
            .accounts
            .get(id)
            .cloned()
            .unwrap_or_else(|| Account::new(id.clone(), now));
        account.stake(amount)?;
        self.accounts.insert(id.clone(), account.clone());
        Ok(account)
    }

    pub fn unstake(&mut self, id: &AccountId, amount: Amount) -> CourtResult<Account> {
        let account = self.require_mut(id)?;
        account.unstake(amount)?;
        Ok(account.clone())
    }

    pub fn lock(&mut self, id: &AccountId, amount: Amount) -> CourtResult<()> {
        self.require_mut(id)?.lock(amount)
    }

    pub fn unlock(&mut self, id: &AccountId, amount: Amount) -> CourtResult<()> {
        self.require_mut(id)?.unlock(amount)
    }

    pub fn slash(&mut self, id: &AccountId, amount: Amount) -> CourtResult<()> {
        self.require_mut(id)?.slash(amount)
    }

    pub fn credit_rewards(&mut self, id: &AccountId, amount: Amount) -> CourtResult<()> {
        self.require_mut(id)?.credit_rewards(amount)
    }

    pub fn accrue_yield(&mut self, id: &AccountId, now: Timestamp) -> CourtResult<Amount> {
        let rate = self.rate;
        self.require_mut(id)?.accrue_yield(now, rate)
    }

    pub fn take_rewards(&mut self, id: &AccountId) -> CourtResult<Amount> {
        Ok(self.require_mut(id)?.take_rewards())
    }

    /// Applies every op or none.
    ///
    /// Touched accounts are copied into an overlay, the ops run against the
    /// overlay in order, and the overlay replaces the originals only when all
    /// ops succeeded.
    pub fn apply_batch(&mut self, ops: &[LedgerOp]) -> CourtResult<BatchReceipt> {
        let mut overlay: HashMap<AccountId, Account> = HashMap::new();
        let mut receipt = BatchReceipt::default();

        for op in ops {
            let id = op.account();
            if !overlay.contains_key(id) {
                let account = match (self.accounts.get(id), op) {
                    (Some(existing), _) => existing.clone(),
                    (None, LedgerOp::Stake { now, .. }) => Account::new(id.clone(), *now),
                    (None, _) => return Err(StateError::AccountNotFound(id.clone()).into()),
                };
                overlay.insert(id.clone(), account);
            }
            let account = overlay
                .get_mut(id)
                .ok_or_else(|| StateError::AccountNotFound(id.clone()))?;

            let moved = match op {
                LedgerOp::AccrueYield { now, .. } => {
                    let accrued = account.accrue_yield(*now, self.rate)?;
                    receipt.yield_accrued += accrued;
                    accrued
                }
                LedgerOp::Stake { amount, .. } => {
                    account.stake(*amount)?;
                    receipt.staked += amount;
                    *amount
                }
                LedgerOp::Unstake { amount, .. } => {
                    account.unstake(*amount)?;
                    receipt.unstaked += amount;
                    *amount
                }
                LedgerOp::Lock { amount, .. } => {
                    account.lock(*amount)?;
                    receipt.locked += amount;
                    *amount
                }
                LedgerOp::Unlock { amount, .. } => {
                    account.unlock(*amount)?;
                    receipt.unlocked += amount;
                    *amount
                }
                LedgerOp::Slash { amount, .. } => {
                    account.slash(*amount)?;
                    receipt.slashed += amount;
                    *amount
                }
                LedgerOp::CreditRewards { amount, .. } => {
                    account.credit_rewards(*amount)?;
                    receipt.credited += amount;
                    *amount
                }
            };
            receipt.moved.push(moved);
        }

        debug!(
            ops = ops.len(),
            accounts = overlay.len(),
            slashed = receipt.slashed,
            credited = receipt.credited,
            "Committing ledger batch"
        );
        self.accounts.extend(overlay);
        Ok(receipt)
    }
}

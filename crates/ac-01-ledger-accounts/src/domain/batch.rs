//! # Ledger Batch Operations
//!
//! A batch is a list of movements applied all-or-nothing. Resolution moves
//! every fund it touches through one batch so that a failure half way through
//! never leaves some losers slashed and others not.

use serde::{Deserialize, Serialize};
use shared_types::{amount_serde, AccountId, Amount, Timestamp};

/// One movement inside an atomic batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LedgerOp {
    /// Settle yield up to `now` into pending rewards.
    AccrueYield { account: AccountId, now: Timestamp },
    /// Add stake. Creates the account (yield clock at `now`) if missing.
    Stake {
        account: AccountId,
        #[serde(with = "amount_serde")]
        amount: Amount,
        now: Timestamp,
    },
    /// Withdraw available stake.
    Unstake {
        account: AccountId,
        #[serde(with = "amount_serde")]
        amount: Amount,
    },
    /// Commit available stake to escrow.
    Lock {
        account: AccountId,
        #[serde(with = "amount_serde")]
        amount: Amount,
    },
    /// Release locked stake back to available.
    Unlock {
        account: AccountId,
        #[serde(with = "amount_serde")]
        amount: Amount,
    },
    /// Burn locked stake into the caller's reward pool.
    Slash {
        account: AccountId,
        #[serde(with = "amount_serde")]
        amount: Amount,
    },
    /// Credit pending rewards.
    CreditRewards {
        account: AccountId,
        #[serde(with = "amount_serde")]
        amount: Amount,
    },
}

impl LedgerOp {
    pub fn accrue(account: AccountId, now: Timestamp) -> Self {
        Self::AccrueYield { account, now }
    }

    pub fn stake(account: AccountId, amount: Amount, now: Timestamp) -> Self {
        Self::Stake {
            account,
            amount,
            now,
        }
    }

    pub fn unstake(account: AccountId, amount: Amount) -> Self {
        Self::Unstake { account, amount }
    }

    pub fn lock(account: AccountId, amount: Amount) -> Self {
        Self::Lock { account, amount }
    }

    pub fn unlock(account: AccountId, amount: Amount) -> Self {
        Self::Unlock { account, amount }
    }

    pub fn slash(account: AccountId, amount: Amount) -> Self {
        Self::Slash { account, amount }
    }

    pub fn credit(account: AccountId, amount: Amount) -> Self {
        Self::CreditRewards { account, amount }
    }

    /// Account this op touches.
    pub fn account(&self) -> &AccountId {
        match self {
            Self::AccrueYield { account, .. }
            | Self::Stake { account, .. }
            | Self::Unstake { account, .. }
            | Self::Lock { account, .. }
            | Self::Unlock { account, .. }
            | Self::Slash { account, .. }
            | Self::CreditRewards { account, .. } => account,
        }
    }
}

/// What a committed batch moved, per op and in aggregate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReceipt {
    /// Amount each op moved, aligned with the input ops.
    pub moved: Vec<Amount>,
    pub yield_accrued: Amount,
    pub staked: Amount,
    pub unstaked: Amount,
    pub locked: Amount,
    pub unlocked: Amount,
    pub slashed: Amount,
    pub credited: Amount,
}

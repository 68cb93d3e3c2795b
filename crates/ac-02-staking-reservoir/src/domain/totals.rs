//! # Pool Totals
//!
//! Running aggregates over every account, plus the cumulative flows that let
//! an auditor prove no value was created or destroyed.
//!
//! ```text
//! total_staked          = deposited - withdrawn - slashed
//! total_pending_rewards = yield_accrued + rewards_distributed - rewards_claimed
//! total_slashed         = rewards_distributed + protocol_dust
//! ```

use ac_01_ledger_accounts::BatchReceipt;
use serde::{Deserialize, Serialize};
use shared_types::Amount;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolTotals {
    pub total_staked: Amount,
    pub total_locked: Amount,
    pub total_pending_rewards: Amount,

    pub total_deposited: Amount,
    pub total_withdrawn: Amount,
    pub total_yield_accrued: Amount,
    pub total_slashed: Amount,
    pub total_rewards_distributed: Amount,
    pub total_rewards_claimed: Amount,

    /// Flooring remainders from reward distribution, owned by the protocol.
    pub protocol_dust: Amount,
}

impl PoolTotals {
    /// Folds a committed batch into the aggregates.
    pub(crate) fn record(&mut self, receipt: &BatchReceipt) {
        self.total_deposited = self.total_deposited.saturating_add(receipt.staked);
        self.total_withdrawn = self.total_withdrawn.saturating_add(receipt.unstaked);
        self.total_yield_accrued = self.total_yield_accrued.saturating_add(receipt.yield_accrued);
        self.total_slashed = self.total_slashed.saturating_add(receipt.slashed);
        self.total_rewards_distributed =
            self.total_rewards_distributed.saturating_add(receipt.credited);

        self.total_staked = self
            .total_staked
            .saturating_add(receipt.staked)
            .saturating_sub(receipt.unstaked)
            .saturating_sub(receipt.slashed);
        self.total_locked = self
            .total_locked
            .saturating_add(receipt.locked)
            .saturating_sub(receipt.unlocked)
            .saturating_sub(receipt.slashed);
        self.total_pending_rewards = self
            .total_pending_rewards
            .saturating_add(receipt.yield_accrued)
            .saturating_add(receipt.credited);
    }

    pub(crate) fn record_claim(&mut self, amount: Amount) {
        self.total_rewards_claimed = self.total_rewards_claimed.saturating_add(amount);
        self.total_pending_rewards = self.total_pending_rewards.saturating_sub(amount);
    }

    pub(crate) fn record_dust(&mut self, amount: Amount) {
        self.protocol_dust = self.protocol_dust.saturating_add(amount);
    }

    /// Stake that is neither locked nor withdrawn.
    pub fn total_available(&self) -> Amount {
        self.total_staked.saturating_sub(self.total_locked)
    }
}

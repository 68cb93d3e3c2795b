//! Reservoir configuration.

use ac_01_ledger_accounts::YieldRate;
use serde::{Deserialize, Serialize};

/// 365 days.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// 5% annual.
pub const DEFAULT_REWARDS_RATE_BPS: u32 = 500;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservoirConfig {
    /// Annual yield on staked balance, in basis points.
    pub rewards_rate_bps: u32,
    pub seconds_per_year: u64,
}

impl Default for ReservoirConfig {
    fn default() -> Self {
        Self {
            rewards_rate_bps: DEFAULT_REWARDS_RATE_BPS,
            seconds_per_year: SECONDS_PER_YEAR,
        }
    }
}

impl ReservoirConfig {
    pub fn yield_rate(&self) -> YieldRate {
        YieldRate::new(self.rewards_rate_bps, self.seconds_per_year)
    }
}

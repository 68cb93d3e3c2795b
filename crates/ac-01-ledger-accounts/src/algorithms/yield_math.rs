//! # Yield Arithmetic
//!
//! `yield = staked * rate_bps * elapsed / (10_000 * seconds_per_year)`, floored.
//!
//! The whole numerator is formed before the single division so that short
//! accrual intervals on small balances do not truncate to zero one factor at
//! a time.

use serde::{Deserialize, Serialize};
use shared_types::{Amount, BASIS_POINTS_DENOMINATOR};

/// Annual yield rate in basis points over a fixed-length year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldRate {
    pub rate_bps: u32,
    pub seconds_per_year: u64,
}

impl YieldRate {
    pub const fn new(rate_bps: u32, seconds_per_year: u64) -> Self {
        Self {
            rate_bps,
            seconds_per_year,
        }
    }

    /// A rate that never accrues anything.
    pub const fn zero() -> Self {
        Self::new(0, 1)
    }
}

impl Default for YieldRate {
    fn default() -> Self {
        Self::zero()
    }
}

/// Yield earned by `staked` over `elapsed` seconds.
///
/// Returns `None` on overflow. A zero-length year accrues nothing.
pub fn compute_yield(staked: Amount, rate: YieldRate, elapsed: u64) -> Option<Amount> {
    if staked == 0 || elapsed == 0 || rate.rate_bps == 0 || rate.seconds_per_year == 0 {
        return Some(0);
    }
    let numerator = staked
        .checked_mul(Amount::from(rate.rate_bps))?
        .checked_mul(Amount::from(elapsed))?;
    let denominator = BASIS_POINTS_DENOMINATOR.checked_mul(Amount::from(rate.seconds_per_year))?;
    Some(numerator / denominator)
}

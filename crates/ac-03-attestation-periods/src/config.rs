//! Period configuration.

use serde::{Deserialize, Serialize};
use shared_types::Amount;

/// 48 hours.
pub const ATTESTATION_WINDOW_SECS: u64 = 172_800;

pub const DEFAULT_MINIMUM_ATTESTATION_STAKE: Amount = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodConfig {
    /// Length of the voting window from `start`.
    pub attestation_window_secs: u64,
    /// Smallest stake an attestation may lock.
    pub minimum_attestation_stake: Amount,
}

impl Default for PeriodConfig {
    fn default() -> Self {
        Self {
            attestation_window_secs: ATTESTATION_WINDOW_SECS,
            minimum_attestation_stake: DEFAULT_MINIMUM_ATTESTATION_STAKE,
        }
    }
}

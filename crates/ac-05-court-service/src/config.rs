//! Court configuration from environment variables.

use ac_02_staking_reservoir::ReservoirConfig;
use ac_03_attestation_periods::PeriodConfig;
use ac_04_resolution_engine::{ResolutionConfig, TiePolicy};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Rejected configuration values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Slash percentage must be at most 100, got {0}")]
    SlashPercentageOutOfRange(u8),

    #[error("Attestation window must be positive")]
    ZeroAttestationWindow,

    #[error("Minimum attestation stake must be positive")]
    ZeroMinimumStake,

    #[error("Seconds per year must be positive")]
    ZeroSecondsPerYear,

    #[error("Event bus capacity must be positive")]
    ZeroBusCapacity,
}

/// Configuration for every court subsystem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtConfig {
    pub periods: PeriodConfig,
    pub resolution: ResolutionConfig,
    pub reservoir: ReservoirConfig,
    /// Events buffered per subscriber before it lags.
    pub bus_capacity: usize,
}

impl Default for CourtConfig {
    fn default() -> Self {
        Self {
            periods: PeriodConfig::default(),
            resolution: ResolutionConfig::default(),
            reservoir: ReservoirConfig::default(),
            bus_capacity: shared_bus::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl CourtConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AC_ATTESTATION_WINDOW_SECS`: voting window length (default: 172800)
    /// - `AC_MINIMUM_ATTESTATION_STAKE`: smallest accepted stake (default: 10)
    /// - `AC_SLASH_PERCENTAGE`: share of minority stake forfeited (default: 15)
    /// - `AC_TIE_POLICY`: `favor_invalid` or `dispute` (default: favor_invalid)
    /// - `AC_REWARDS_RATE_BPS`: annual yield in basis points (default: 500)
    /// - `AC_SECONDS_PER_YEAR`: yield year length (default: 31536000)
    /// - `AC_BUS_CAPACITY`: per-subscriber event buffer (default: 1000)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`CourtConfig::from_env`] with a caller-supplied variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            periods: PeriodConfig {
                attestation_window_secs: parse_var(&lookup, "AC_ATTESTATION_WINDOW_SECS")
                    .unwrap_or(defaults.periods.attestation_window_secs),
                minimum_attestation_stake: parse_var(&lookup, "AC_MINIMUM_ATTESTATION_STAKE")
                    .unwrap_or(defaults.periods.minimum_attestation_stake),
            },
            resolution: ResolutionConfig {
                slash_percentage: parse_var(&lookup, "AC_SLASH_PERCENTAGE")
                    .unwrap_or(defaults.resolution.slash_percentage),
                tie_policy: lookup("AC_TIE_POLICY")
                    .and_then(|v| parse_tie_policy(&v))
                    .unwrap_or(defaults.resolution.tie_policy),
            },
            reservoir: ReservoirConfig {
                rewards_rate_bps: parse_var(&lookup, "AC_REWARDS_RATE_BPS")
                    .unwrap_or(defaults.reservoir.rewards_rate_bps),
                seconds_per_year: parse_var(&lookup, "AC_SECONDS_PER_YEAR")
                    .unwrap_or(defaults.reservoir.seconds_per_year),
            },
            bus_capacity: parse_var(&lookup, "AC_BUS_CAPACITY")
                .unwrap_or(defaults.bus_capacity),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution.validate().is_err() {
            return Err(ConfigError::SlashPercentageOutOfRange(
                self.resolution.slash_percentage,
            ));
        }
        if self.periods.attestation_window_secs == 0 {
            return Err(ConfigError::ZeroAttestationWindow);
        }
        if self.periods.minimum_attestation_stake == 0 {
            return Err(ConfigError::ZeroMinimumStake);
        }
        if self.reservoir.seconds_per_year == 0 {
            return Err(ConfigError::ZeroSecondsPerYear);
        }
        if self.bus_capacity == 0 {
            return Err(ConfigError::ZeroBusCapacity);
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

fn parse_tie_policy(value: &str) -> Option<TiePolicy> {
    match value.trim().to_lowercase().as_str() {
        "favor_invalid" | "favor-invalid" | "invalid" => Some(TiePolicy::FavorInvalid),
        "dispute" | "disputed" => Some(TiePolicy::Dispute),
        _ => None,
    }
}

//! Resolution configuration.

use serde::{Deserialize, Serialize};
use shared_types::ValidationError;

pub const DEFAULT_SLASH_PERCENTAGE: u8 = 15;

/// What a `V == I` tally with stake on both sides resolves to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiePolicy {
    /// Resolve as invalid and slash the valid side.
    #[default]
    FavorInvalid,
    /// Mark the period Disputed and return every stake in full.
    Dispute,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Percent of each minority stake forfeited, floored.
    pub slash_percentage: u8,
    pub tie_policy: TiePolicy,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            slash_percentage: DEFAULT_SLASH_PERCENTAGE,
            tie_policy: TiePolicy::FavorInvalid,
        }
    }
}

impl ResolutionConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.slash_percentage > 100 {
            return Err(ValidationError::SlashPercentageOutOfRange(self.slash_percentage));
        }
        Ok(())
    }
}

//! Majority rule.

use crate::config::TiePolicy;
use serde::{Deserialize, Serialize};
use shared_types::{Amount, AttestationChoice};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Nobody attested. Resolves invalid with no fund movement.
    NoAttestations,
    /// One side carries more stake, or wins the tie under `FavorInvalid`.
    Majority(AttestationChoice),
    /// Tie under `TiePolicy::Dispute`.
    Disputed,
}

impl Outcome {
    /// `resolvedIsValid` for a Resolved period; `None` when disputed.
    pub fn resolved_is_valid(self) -> Option<bool> {
        match self {
            Self::NoAttestations => Some(false),
            Self::Majority(side) => Some(side.is_valid()),
            Self::Disputed => None,
        }
    }
}

pub fn determine_outcome(total_valid: Amount, total_invalid: Amount, policy: TiePolicy) -> Outcome {
    if total_valid == 0 && total_invalid == 0 {
        return Outcome::NoAttestations;
    }
    if total_valid > total_invalid {
        return Outcome::Majority(AttestationChoice::Valid);
    }
    if total_invalid > total_valid {
        return Outcome::Majority(AttestationChoice::Invalid);
    }
    match policy {
        TiePolicy::FavorInvalid => Outcome::Majority(AttestationChoice::Invalid),
        TiePolicy::Dispute => Outcome::Disputed,
    }
}

//! # Core Entities
//!
//! Identifiers and value types that flow between subsystems.
//!
//! ## Type Decisions
//!
//! - `Amount = u128`: token quantities in base units. Wide enough that
//!   `stake * rate_bps * elapsed` never needs a big-integer type for any
//!   realistic supply.
//! - `Timestamp = u64`: unix seconds, always supplied by the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token amount in base units.
pub type Amount = u128;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Denominator for basis-point rates (1 bp = 0.01%).
pub const BASIS_POINTS_DENOMINATOR: u128 = 10_000;

/// Identity of a ledger participant (staker, attestor or submission author).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identity of a submission under dispute. One attestation period per id.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub String);

impl SubmissionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubmissionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The judgment an attestor stakes behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttestationChoice {
    /// The submission is valid.
    Valid,
    /// The submission is invalid.
    Invalid,
}

impl AttestationChoice {
    /// The other side of the vote.
    pub fn opposite(self) -> Self {
        match self {
            Self::Valid => Self::Invalid,
            Self::Invalid => Self::Valid,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn from_is_valid(is_valid: bool) -> Self {
        if is_valid {
            Self::Valid
        } else {
            Self::Invalid
        }
    }
}

impl fmt::Display for AttestationChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("valid"),
            Self::Invalid => f.write_str("invalid"),
        }
    }
}

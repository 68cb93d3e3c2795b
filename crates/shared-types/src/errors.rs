//! # Error Types
//!
//! The error taxonomy used across subsystems.
//!
//! - `ValidationError`: the request breaks a voting rule.
//! - `StateError`: the referenced record is missing or in the wrong state.
//! - `FundsError`: the ledger cannot cover the movement.
//!
//! Every error aborts only the operation that raised it. `AlreadyResolved`
//! is the one exception to "error means failure": it signals an idempotent
//! no-op and callers must treat it as success.

use crate::entities::{AccountId, Amount, SubmissionId, Timestamp};
use thiserror::Error;

/// A request that violates a voting rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Attestation window has closed (or the period is no longer active).
    #[error("Attestation window closed for {submission_id} at {end_time}")]
    WindowClosed {
        submission_id: SubmissionId,
        end_time: Timestamp,
    },

    /// Resolution attempted before the window elapsed.
    #[error("Attestation window still open for {submission_id}: closes at {end_time}, now {now}")]
    WindowNotClosed {
        submission_id: SubmissionId,
        end_time: Timestamp,
        now: Timestamp,
    },

    /// The submission author tried to attest on their own submission.
    #[error("Author {attestor} may not attest on own submission {submission_id}")]
    SelfAttestationForbidden {
        submission_id: SubmissionId,
        attestor: AccountId,
    },

    /// A live attestation already exists for (submission, attestor).
    #[error("Duplicate vote by {attestor} on {submission_id}")]
    DuplicateVote {
        submission_id: SubmissionId,
        attestor: AccountId,
    },

    /// Revocation requested without a live attestation.
    #[error("No existing vote by {attestor} on {submission_id}")]
    NoExistingVote {
        submission_id: SubmissionId,
        attestor: AccountId,
    },

    /// Stake offered is below the configured minimum.
    #[error("Stake below minimum: offered {offered}, minimum {minimum}")]
    StakeBelowMinimum { offered: Amount, minimum: Amount },

    /// Ledger movements must be strictly positive.
    #[error("Amount must be greater than zero")]
    ZeroAmount,

    /// Slash percentage configured above 100.
    #[error("Slash percentage {0} exceeds 100")]
    SlashPercentageOutOfRange(u8),
}

/// A record that is missing or in the wrong lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// `start` called twice for the same submission.
    #[error("Attestation period already exists for {0}")]
    PeriodAlreadyExists(SubmissionId),

    /// No period was ever started for the submission.
    #[error("Attestation period not found for {0}")]
    PeriodNotFound(SubmissionId),

    /// Account has never staked.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Period already reached a terminal state. Idempotent success.
    #[error("Attestation period for {0} already resolved")]
    AlreadyResolved(SubmissionId),
}

/// A ledger movement that cannot be covered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FundsError {
    /// Unstake exceeds `staked - locked`.
    #[error("Insufficient available balance for {account}: requested {requested}, available {available}")]
    InsufficientAvailableBalance {
        account: AccountId,
        requested: Amount,
        available: Amount,
    },

    /// Lock exceeds available, or unlock/slash exceeds locked.
    #[error("Locked balance overdraw for {account}: requested {requested}, limit {limit}")]
    OverdrawLocked {
        account: AccountId,
        requested: Amount,
        limit: Amount,
    },

    /// A balance or total would overflow `Amount`.
    #[error("Arithmetic overflow updating {account}")]
    ArithmeticOverflow { account: AccountId },

    /// A resolution would create or destroy value. Nothing was applied.
    #[error("Resolution of {0} does not conserve value")]
    ValueNotConserved(SubmissionId),
}

/// Umbrella error returned at subsystem boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourtError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("Funds error: {0}")]
    Funds(#[from] FundsError),
}

impl CourtError {
    /// True for errors that callers must treat as success.
    pub fn is_idempotent_success(&self) -> bool {
        matches!(self, Self::State(StateError::AlreadyResolved(_)))
    }

    /// Short machine-readable label, used for metrics and replay reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(e) => match e {
                ValidationError::WindowClosed { .. } => "window_closed",
                ValidationError::WindowNotClosed { .. } => "window_not_closed",
                ValidationError::SelfAttestationForbidden { .. } => "self_attestation_forbidden",
                ValidationError::DuplicateVote { .. } => "duplicate_vote",
                ValidationError::NoExistingVote { .. } => "no_existing_vote",
                ValidationError::StakeBelowMinimum { .. } => "stake_below_minimum",
                ValidationError::ZeroAmount => "zero_amount",
                ValidationError::SlashPercentageOutOfRange(_) => "slash_percentage_out_of_range",
            },
            Self::State(e) => match e {
                StateError::PeriodAlreadyExists(_) => "period_already_exists",
                StateError::PeriodNotFound(_) => "period_not_found",
                StateError::AccountNotFound(_) => "account_not_found",
                StateError::AlreadyResolved(_) => "already_resolved",
            },
            Self::Funds(e) => match e {
                FundsError::InsufficientAvailableBalance { .. } => "insufficient_available_balance",
                FundsError::OverdrawLocked { .. } => "overdraw_locked",
                FundsError::ArithmeticOverflow { .. } => "arithmetic_overflow",
                FundsError::ValueNotConserved(_) => "value_not_conserved",
            },
        }
    }
}

/// Result type for court operations.
pub type CourtResult<T> = Result<T, CourtError>;

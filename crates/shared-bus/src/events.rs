//! # Court Events
//!
//! Defines all event types that flow through the shared bus.

use serde::{Deserialize, Serialize};
use shared_types::{amount_serde, AccountId, Amount, AttestationChoice, SubmissionId, Timestamp};

/// Component identifiers used as event sources.
pub mod components {
    /// External Submission Registry.
    pub const SUBMISSION_REGISTRY: u8 = 0;
    /// Ledger Accounts (ac-01).
    pub const LEDGER_ACCOUNTS: u8 = 1;
    /// Staking Reservoir (ac-02).
    pub const STAKING_RESERVOIR: u8 = 2;
    /// Attestation Period Manager (ac-03).
    pub const ATTESTATION_PERIODS: u8 = 3;
    /// Resolution Engine (ac-04).
    pub const RESOLUTION_ENGINE: u8 = 4;
    /// Court Service (ac-05).
    pub const COURT_SERVICE: u8 = 5;
}

/// All events that can be published to the event bus.
///
/// Amounts go over the wire as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CourtEvent {
    // =========================================================================
    // SUBMISSION REGISTRY (consumed)
    // =========================================================================
    /// A submission was created and needs an attestation period.
    SubmissionCreated {
        submission_id: SubmissionId,
        author_id: AccountId,
        created_at: Timestamp,
    },

    // =========================================================================
    // STAKING RESERVOIR
    // =========================================================================
    /// Tokens were added to an account's stake.
    Staked {
        account: AccountId,
        #[serde(with = "amount_serde")]
        amount: Amount,
        #[serde(with = "amount_serde")]
        staked_balance: Amount,
        at: Timestamp,
    },

    /// Tokens were withdrawn from an account's stake.
    Unstaked {
        account: AccountId,
        #[serde(with = "amount_serde")]
        amount: Amount,
        #[serde(with = "amount_serde")]
        staked_balance: Amount,
        at: Timestamp,
    },

    /// Yield was settled into an account's pending rewards.
    YieldAccrued {
        account: AccountId,
        #[serde(with = "amount_serde")]
        amount: Amount,
        at: Timestamp,
    },

    /// Pending rewards were released for payout.
    RewardsClaimed {
        account: AccountId,
        #[serde(with = "amount_serde")]
        amount: Amount,
        at: Timestamp,
    },

    // =========================================================================
    // ATTESTATION PERIOD MANAGER
    // =========================================================================
    /// A voting window opened for a submission.
    PeriodStarted {
        submission_id: SubmissionId,
        author_id: AccountId,
        start_time: Timestamp,
        end_time: Timestamp,
    },

    /// A staked vote was recorded.
    AttestationRecorded {
        submission_id: SubmissionId,
        attestor: AccountId,
        attestation_id: String,
        choice: AttestationChoice,
        #[serde(with = "amount_serde")]
        stake_amount: Amount,
        made_at: Timestamp,
    },

    /// A staked vote was withdrawn and its stake unlocked.
    AttestationRevoked {
        submission_id: SubmissionId,
        attestor: AccountId,
        choice: AttestationChoice,
        #[serde(with = "amount_serde")]
        stake_amount: Amount,
    },

    // =========================================================================
    // RESOLUTION ENGINE
    // =========================================================================
    /// A period reached its Resolved terminal state.
    PeriodResolved {
        submission_id: SubmissionId,
        is_valid: bool,
        #[serde(with = "amount_serde")]
        total_valid: Amount,
        #[serde(with = "amount_serde")]
        total_invalid: Amount,
    },

    /// A tied period was moved to Disputed under the dispute tie policy.
    PeriodDisputed {
        submission_id: SubmissionId,
        #[serde(with = "amount_serde")]
        total_valid: Amount,
        #[serde(with = "amount_serde")]
        total_invalid: Amount,
    },

    /// Majority attestors were credited from the slash pool.
    RewardsDistributed {
        submission_id: SubmissionId,
        winners: Vec<AccountId>,
        #[serde(with = "amount_serde::vec")]
        amounts: Vec<Amount>,
        #[serde(with = "amount_serde")]
        dust: Amount,
    },

    /// Minority attestors were slashed.
    StakeSlashed {
        submission_id: SubmissionId,
        losers: Vec<AccountId>,
        #[serde(with = "amount_serde::vec")]
        amounts: Vec<Amount>,
    },

    // =========================================================================
    // COURT SERVICE
    // =========================================================================
    /// Terminal verdict reported back to the Submission Registry.
    VerdictReported {
        correlation_id: String,
        submission_id: SubmissionId,
        is_valid: bool,
        disputed: bool,
        resolved_at: Timestamp,
    },
}

impl CourtEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::SubmissionCreated { .. } | Self::VerdictReported { .. } => {
                EventTopic::SubmissionRegistry
            }
            Self::Staked { .. }
            | Self::Unstaked { .. }
            | Self::YieldAccrued { .. }
            | Self::RewardsClaimed { .. } => EventTopic::Ledger,
            Self::PeriodStarted { .. }
            | Self::AttestationRecorded { .. }
            | Self::AttestationRevoked { .. } => EventTopic::Attestation,
            Self::PeriodResolved { .. }
            | Self::PeriodDisputed { .. }
            | Self::RewardsDistributed { .. }
            | Self::StakeSlashed { .. } => EventTopic::Resolution,
        }
    }

    /// Get the originating component ID.
    #[must_use]
    pub fn source_component(&self) -> u8 {
        match self {
            Self::SubmissionCreated { .. } => components::SUBMISSION_REGISTRY,
            Self::Staked { .. }
            | Self::Unstaked { .. }
            | Self::YieldAccrued { .. }
            | Self::RewardsClaimed { .. } => components::STAKING_RESERVOIR,
            Self::PeriodStarted { .. }
            | Self::AttestationRecorded { .. }
            | Self::AttestationRevoked { .. } => components::ATTESTATION_PERIODS,
            Self::PeriodResolved { .. }
            | Self::PeriodDisputed { .. }
            | Self::RewardsDistributed { .. }
            | Self::StakeSlashed { .. } => components::RESOLUTION_ENGINE,
            Self::VerdictReported { .. } => components::COURT_SERVICE,
        }
    }

    /// Submission this event concerns, if any.
    #[must_use]
    pub fn submission_id(&self) -> Option<&SubmissionId> {
        match self {
            Self::SubmissionCreated { submission_id, .. }
            | Self::PeriodStarted { submission_id, .. }
            | Self::AttestationRecorded { submission_id, .. }
            | Self::AttestationRevoked { submission_id, .. }
            | Self::PeriodResolved { submission_id, .. }
            | Self::PeriodDisputed { submission_id, .. }
            | Self::RewardsDistributed { submission_id, .. }
            | Self::StakeSlashed { submission_id, .. }
            | Self::VerdictReported { submission_id, .. } => Some(submission_id),
            Self::Staked { .. }
            | Self::Unstaked { .. }
            | Self::YieldAccrued { .. }
            | Self::RewardsClaimed { .. } => None,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Submission intake and verdict reporting.
    SubmissionRegistry,
    /// Stake, unstake, yield and reward claims.
    Ledger,
    /// Period start and attestation changes.
    Attestation,
    /// Resolution, slashing and reward distribution.
    Resolution,
    /// All events (no filtering).
    All,
}

impl EventTopic {
    /// Every topic an event can actually carry.
    pub const CONCRETE: [EventTopic; 4] = [
        EventTopic::SubmissionRegistry,
        EventTopic::Ledger,
        EventTopic::Attestation,
        EventTopic::Resolution,
    ];
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Source components to include. Empty means all sources.
    pub source_components: Vec<u8>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            source_components: Vec::new(),
        }
    }

    /// Create a filter for events from specific components.
    #[must_use]
    pub fn from_components(components: Vec<u8>) -> Self {
        Self {
            topics: Vec::new(),
            source_components: components,
        }
    }

    /// Concrete topics this filter can receive.
    #[must_use]
    pub fn covered_topics(&self) -> Vec<EventTopic> {
        if self.topics.is_empty() || self.topics.contains(&EventTopic::All) {
            return EventTopic::CONCRETE.to_vec();
        }
        EventTopic::CONCRETE
            .into_iter()
            .filter(|t| self.topics.contains(t))
            .collect()
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &CourtEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let source_match = self.source_components.is_empty()
            || self.source_components.contains(&event.source_component());

        topic_match && source_match
    }
}

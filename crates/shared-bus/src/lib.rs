//! # Shared Bus - Event Bus for Court Events
//!
//! Carries every event the court emits (period lifecycle, attestations,
//! slashing, reward distribution, ledger movements) and the one event it
//! consumes (`SubmissionCreated` from the external Submission Registry).
//!
//! ```text
//! ┌──────────────────────┐                    ┌──────────────────────┐
//! │ Submission Registry  │ SubmissionCreated  │    Court Service     │
//! │     (external)       │ ──────┐            │  (ac-05, intake)     │
//! └──────────────────────┘       │            └──────────────────────┘
//!                                ▼                    ↑        │
//!                          ┌──────────────┐           │        │ publish()
//!                          │  Event Bus   │ ──────────┘        │
//!                          │              │ ←──────────────────┘
//!                          └──────────────┘
//!                                │ subscribe()
//!                                ▼
//!                       Indexers / UI (external)
//! ```
//!
//! Publishing never blocks: a bus without subscribers drops the event and
//! logs a warning. Slow subscribers lag and skip, they never stall the court.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{components, CourtEvent, EventFilter, EventTopic};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

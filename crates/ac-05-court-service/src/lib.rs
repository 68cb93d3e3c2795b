//! # AC-05 Court Service
//!
//! The court's public surface. Wraps the reservoir, the period book and the
//! resolution engine in one serialized state and turns every successful
//! operation into bus events.
//!
//! ```text
//! Submission Registry ──SubmissionCreated──→ SubmissionIntakeHandler
//!                                                    │ start_period
//!                                                    ▼
//!          callers ──CourtApi──→ CourtService ──RwLock──→ CourtState
//!                                    │                   ├── StakingReservoir (2)
//!                                    │                   ├── PeriodBook (3)
//!                                    │                   └── ResolutionEngine (4)
//!                                    ├── CourtEvent ──→ EventPublisher
//!                                    └── SubmissionVerdict ──→ SubmissionRegistry
//! ```
//!
//! ## Atomicity
//!
//! One write guard per call covers the whole read-validate-write sequence.
//! Publishing and verdict reporting happen after the guard is dropped.
//! A failed call publishes nothing.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ac_05_court_service::{CourtApi, CourtConfig, CourtService, NoopSubmissionRegistry};
//!
//! let court = CourtService::new(CourtConfig::from_env(), Arc::new(NoopSubmissionRegistry), bus);
//! court.stake(&alice, 1_000, now).await?;
//! court.attest(&submission, &alice, AttestationChoice::Valid, 300, now).await?;
//! ```

pub mod adapters;
pub mod config;
pub mod ipc;
pub mod ports;
pub mod service;
pub mod state;

pub use adapters::BusSubmissionRegistry;
pub use config::{ConfigError, CourtConfig};
pub use ipc::{handle_event, IntakeResult, SubmissionIntakeHandler};
pub use ports::{
    CorrelationId, CourtApi, NoopSubmissionRegistry, RecordingSubmissionRegistry, ResolveOutcome,
    SubmissionRegistry, SubmissionVerdict,
};
pub use service::CourtService;
pub use state::{CourtSnapshot, CourtState};

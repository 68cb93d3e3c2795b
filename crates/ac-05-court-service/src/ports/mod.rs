//! Ports module for the Court Service

pub mod inbound;
pub mod outbound;

pub use inbound::{CourtApi, ResolveOutcome};
pub use outbound::{
    CorrelationId, NoopSubmissionRegistry, RecordingSubmissionRegistry, SubmissionRegistry,
    SubmissionVerdict,
};

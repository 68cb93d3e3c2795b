//! Driven Ports (SPI - Outbound Dependencies)

use ac_03_attestation_periods::PeriodStatus;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{SubmissionId, Timestamp};
use uuid::Uuid;

/// Correlation ID for tracking verdict deliveries
pub type CorrelationId = Uuid;

/// Terminal verdict for one submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionVerdict {
    pub correlation_id: CorrelationId,
    pub submission_id: SubmissionId,
    /// `Resolved` or `Disputed`.
    pub status: PeriodStatus,
    /// Majority side. `false` when disputed.
    pub is_valid: bool,
    pub resolved_at: Timestamp,
}

/// External Submission Registry, told about every terminal transition.
///
/// Called only after the court's state lock is released. Delivery failures
/// are the registry's concern; the verdict is already final.
#[async_trait]
pub trait SubmissionRegistry: Send + Sync {
    async fn report_verdict(&self, verdict: SubmissionVerdict);
}

/// Registry that discards verdicts.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSubmissionRegistry;

#[async_trait]
impl SubmissionRegistry for NoopSubmissionRegistry {
    async fn report_verdict(&self, _verdict: SubmissionVerdict) {}
}

/// Registry that keeps every verdict, for tests and replay.
#[derive(Debug, Default)]
pub struct RecordingSubmissionRegistry {
    verdicts: Mutex<Vec<SubmissionVerdict>>,
}

impl RecordingSubmissionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verdicts(&self) -> Vec<SubmissionVerdict> {
        self.verdicts.lock().clone()
    }
}

#[async_trait]
impl SubmissionRegistry for RecordingSubmissionRegistry {
    async fn report_verdict(&self, verdict: SubmissionVerdict) {
        self.verdicts.lock().push(verdict);
    }
}

//! Submission Registry adapter over the shared bus.
//!
//! The registry is external; the court reaches it by publishing
//! `CourtEvent::VerdictReported` for the registry to pick up.

use crate::ports::outbound::{SubmissionRegistry, SubmissionVerdict};
use ac_03_attestation_periods::PeriodStatus;
use async_trait::async_trait;
use shared_bus::{CourtEvent, EventPublisher};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct BusSubmissionRegistry<P: EventPublisher> {
    publisher: Arc<P>,
}

impl<P: EventPublisher> BusSubmissionRegistry<P> {
    pub fn new(publisher: Arc<P>) -> Self {
        Self { publisher }
    }
}

#[async_trait]
impl<P: EventPublisher> SubmissionRegistry for BusSubmissionRegistry<P> {
    async fn report_verdict(&self, verdict: SubmissionVerdict) {
        let submission_id = verdict.submission_id.clone();
        let event = CourtEvent::VerdictReported {
            correlation_id: verdict.correlation_id.to_string(),
            submission_id: verdict.submission_id,
            is_valid: verdict.is_valid,
            disputed: verdict.status == PeriodStatus::Disputed,
            resolved_at: verdict.resolved_at,
        };

        let receivers = self.publisher.publish(event).await;
        if receivers == 0 {
            warn!(submission = %submission_id, "Verdict published with no registry listening");
        } else {
            debug!(submission = %submission_id, receivers, "Verdict reported");
        }
    }
}

//! # Submission Intake
//!
//! Opens an attestation period for every `SubmissionCreated` the external
//! registry publishes. The registry may redeliver; a period that already
//! exists is logged and skipped.

use crate::ports::inbound::CourtApi;
use shared_bus::{CourtEvent, EventFilter, EventSubscriber, EventTopic, Subscription};
use shared_types::{CourtError, StateError};
use std::sync::Arc;
use tracing::{error, info, warn};

/// What intake did with one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntakeResult {
    Started,
    /// Redelivery of a submission that already has a period.
    Duplicate,
    /// Not a `SubmissionCreated` event.
    Ignored,
    Failed(CourtError),
}

pub struct SubmissionIntakeHandler<S: CourtApi> {
    subscription: Subscription,
    court: Arc<S>,
}

impl<S: CourtApi> SubmissionIntakeHandler<S> {
    /// Subscribes to the registry topic on `bus`.
    pub fn new<B: EventSubscriber + ?Sized>(bus: &B, court: Arc<S>) -> Self {
        Self {
            subscription: bus.subscribe(EventFilter::topics(vec![EventTopic::SubmissionRegistry])),
            court,
        }
    }

    /// Run until the bus closes.
    pub async fn run(mut self) {
        info!("Submission intake handler started");

        while let Some(event) = self.subscription.recv().await {
            handle_event(self.court.as_ref(), event).await;
        }

        info!("Event bus closed, submission intake handler stopped");
    }
}

/// Starts the period a `SubmissionCreated` asks for.
pub async fn handle_event<S: CourtApi + ?Sized>(court: &S, event: CourtEvent) -> IntakeResult {
    let CourtEvent::SubmissionCreated {
        submission_id,
        author_id,
        created_at,
    } = event
    else {
        return IntakeResult::Ignored;
    };

    match court.start_period(&submission_id, &author_id, created_at).await {
        Ok(period) => {
            info!(
                submission = %submission_id,
                end_time = period.end_time,
                "Period opened from submission event"
            );
            IntakeResult::Started
        }
        Err(CourtError::State(StateError::PeriodAlreadyExists(_))) => {
            warn!(submission = %submission_id, "Duplicate SubmissionCreated skipped");
            IntakeResult::Duplicate
        }
        Err(err) => {
            error!(submission = %submission_id, error = %err, "Failed to open period");
            IntakeResult::Failed(err)
        }
    }
}

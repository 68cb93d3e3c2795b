//! # Bus Flows
//!
//! The court as a bus participant:
//!
//! 1. **Registry → Intake**: `SubmissionCreated` opens a period
//! 2. **Court → Indexers**: every state change fans out as a `CourtEvent`
//! 3. **Court → Registry**: terminal verdicts come back as `VerdictReported`

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::time::timeout;

    use ac_03_attestation_periods::PeriodStatus;
    use ac_05_court_service::{
        handle_event, BusSubmissionRegistry, CourtApi, CourtConfig, CourtService, IntakeResult,
        SubmissionIntakeHandler,
    };
    use shared_bus::{CourtEvent, EventFilter, EventPublisher, EventTopic, InMemoryEventBus};
    use shared_types::{AccountId, AttestationChoice, SubmissionId, Timestamp};

    const T0: Timestamp = 5_000;
    const WINDOW: Timestamp = 172_800;

    type Court = CourtService<BusSubmissionRegistry<InMemoryEventBus>, InMemoryEventBus>;

    fn wire() -> (Arc<InMemoryEventBus>, Arc<Court>) {
        let bus = Arc::new(InMemoryEventBus::new());
        let registry = Arc::new(BusSubmissionRegistry::new(Arc::clone(&bus)));
        let court = Arc::new(CourtService::new(
            CourtConfig::default(),
            registry,
            Arc::clone(&bus),
        ));
        (bus, court)
    }

    fn id(s: &str) -> AccountId {
        AccountId::from(s)
    }

    async fn wait_for_period(court: &Court, submission: &SubmissionId) {
        timeout(Duration::from_secs(2), async {
            while court.get_period(submission).await.is_err() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("period never opened");
    }

    #[tokio::test]
    async fn test_submission_created_drives_full_lifecycle() {
        let (bus, court) = wire();
        let mut resolution_feed = bus.subscribe(EventFilter::topics(vec![EventTopic::Resolution]));
        let mut registry_feed =
            bus.subscribe(EventFilter::topics(vec![EventTopic::SubmissionRegistry]));
        let intake = SubmissionIntakeHandler::new(bus.as_ref(), Arc::clone(&court));
        let intake_task = tokio::spawn(intake.run());

        court.stake(&id("alice"), 1_000, T0).await.unwrap();
        court.stake(&id("bob"), 1_000, T0).await.unwrap();

        let submission = SubmissionId::from("sub-1");
        bus.publish(CourtEvent::SubmissionCreated {
            submission_id: submission.clone(),
            author_id: id("xavier"),
            created_at: T0,
        })
        .await;
        wait_for_period(&court, &submission).await;

        court
            .attest(&submission, &id("alice"), AttestationChoice::Valid, 300, T0 + 10)
            .await
            .unwrap();
        court
            .attest(&submission, &id("bob"), AttestationChoice::Invalid, 100, T0 + 20)
            .await
            .unwrap();
        court.resolve(&submission, T0 + WINDOW).await.unwrap();

        let resolution_events = resolution_feed.drain();
        assert!(matches!(
            resolution_events.as_slice(),
            [
                CourtEvent::StakeSlashed { .. },
                CourtEvent::RewardsDistributed { .. },
                CourtEvent::PeriodResolved { is_valid: true, total_valid: 300, total_invalid: 100, .. },
            ]
        ));
        if let CourtEvent::StakeSlashed { losers, amounts, .. } = &resolution_events[0] {
            assert_eq!(losers, &vec![id("bob")]);
            assert_eq!(amounts, &vec![15]);
        }

        let registry_events = registry_feed.drain();
        assert_eq!(registry_events.len(), 2);
        assert!(matches!(registry_events[0], CourtEvent::SubmissionCreated { .. }));
        assert!(matches!(
            &registry_events[1],
            CourtEvent::VerdictReported { submission_id, is_valid: true, disputed: false, .. }
                if *submission_id == submission
        ));

        intake_task.abort();
    }

    #[tokio::test]
    async fn test_redelivered_submission_keeps_original_period() {
        let (bus, court) = wire();
        let intake = SubmissionIntakeHandler::new(bus.as_ref(), Arc::clone(&court));
        let intake_task = tokio::spawn(intake.run());
        let submission = SubmissionId::from("sub-2");

        for created_at in [T0, T0 + 999] {
            bus.publish(CourtEvent::SubmissionCreated {
                submission_id: submission.clone(),
                author_id: id("xavier"),
                created_at,
            })
            .await;
        }
        wait_for_period(&court, &submission).await;
        // Let the redelivery be processed too.
        tokio::time::sleep(Duration::from_millis(50)).await;

        let period = court.get_period(&submission).await.unwrap();
        assert_eq!(period.start_time, T0);
        assert_eq!(period.status, PeriodStatus::Active);

        intake_task.abort();
    }

    #[tokio::test]
    async fn test_ledger_events_fan_out() {
        let (bus, court) = wire();
        let mut ledger_feed = bus.subscribe(EventFilter::topics(vec![EventTopic::Ledger]));

        court.stake(&id("carol"), 1_000_000, 0).await.unwrap();
        court.accrue_yield(&id("carol"), 31_536_000).await.unwrap();
        court.claim_rewards(&id("carol"), 31_536_000).await.unwrap();
        court.unstake(&id("carol"), 400_000, 31_536_000).await.unwrap();

        let events = ledger_feed.drain();
        assert_eq!(events.len(), 4);
        assert!(matches!(events[1], CourtEvent::YieldAccrued { amount: 50_000, .. }));
        assert!(matches!(events[2], CourtEvent::RewardsClaimed { amount: 50_000, .. }));
        assert!(matches!(
            events[3],
            CourtEvent::Unstaked { amount: 400_000, staked_balance: 600_000, .. }
        ));
    }

    #[tokio::test]
    async fn test_events_serialize_with_type_tag() {
        let (bus, court) = wire();
        let mut feed = bus.subscribe(EventFilter::all());
        court
            .start_period(&SubmissionId::from("sub-3"), &id("xavier"), T0)
            .await
            .unwrap();

        let event = feed.try_recv().unwrap().unwrap();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "period_started");
        assert_eq!(json["end_time"], T0 + WINDOW);

        let back: CourtEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[tokio::test]
    async fn test_resolution_events_round_trip_through_json() {
        let (bus, court) = wire();
        let mut feed = bus.subscribe(EventFilter::topics(vec![EventTopic::Resolution]));
        let submission = SubmissionId::from("sub-4");
        court.stake(&id("alice"), 1_000, T0).await.unwrap();
        court.stake(&id("bob"), 1_000, T0).await.unwrap();
        court.start_period(&submission, &id("xavier"), T0).await.unwrap();
        court
            .attest(&submission, &id("alice"), AttestationChoice::Valid, 300, T0 + 1)
            .await
            .unwrap();
        court
            .attest(&submission, &id("bob"), AttestationChoice::Invalid, 100, T0 + 1)
            .await
            .unwrap();
        court.resolve(&submission, T0 + WINDOW).await.unwrap();

        let events = feed.drain();
        assert_eq!(events.len(), 3);
        for event in events {
            let json = serde_json::to_string(&event).unwrap();
            let back: CourtEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(back, event);
        }
    }

    #[tokio::test]
    async fn test_redelivered_submission_is_duplicate() {
        let (_bus, court) = wire();
        let created = CourtEvent::SubmissionCreated {
            submission_id: SubmissionId::from("again"),
            author_id: id("author"),
            created_at: T0,
        };

        assert!(matches!(
            handle_event(court.as_ref(), created.clone()).await,
            IntakeResult::Started
        ));
        assert!(matches!(
            handle_event(court.as_ref(), created).await,
            IntakeResult::Duplicate
        ));
        assert!(matches!(
            handle_event(
                court.as_ref(),
                CourtEvent::PeriodDisputed {
                    submission_id: SubmissionId::from("again"),
                    total_valid: 0,
                    total_invalid: 0,
                }
            )
            .await,
            IntakeResult::Ignored
        ));

        let period = court.get_period(&SubmissionId::from("again")).await.unwrap();
        assert_eq!(period.start_time, T0);
    }
}

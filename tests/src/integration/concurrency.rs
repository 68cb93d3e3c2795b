//! # Concurrency
//!
//! Many callers racing on one submission. Tallies must never lose an
//! update, exactly one resolver may finalize, and subscribers see events
//! in the order their operations committed.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ac_03_attestation_periods::PeriodStatus;
    use ac_05_court_service::{
        CourtApi, CourtConfig, CourtService, NoopSubmissionRegistry, RecordingSubmissionRegistry,
        ResolveOutcome,
    };
    use shared_bus::{CourtEvent, EventFilter, EventTopic, InMemoryEventBus};
    use shared_types::{AccountId, AttestationChoice, SubmissionId, Timestamp};

    const T0: Timestamp = 10_000;
    const WINDOW: Timestamp = 172_800;
    const ATTESTORS: u128 = 40;

    fn attestor(i: u128) -> AccountId {
        AccountId::new(format!("attestor-{i:03}"))
    }

    fn choice(i: u128) -> AttestationChoice {
        AttestationChoice::from_is_valid(i % 3 != 0)
    }

    fn stake_for(i: u128) -> u128 {
        10 + i * 7
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_attestations_keep_tallies_exact() {
        let court = Arc::new(CourtService::new(
            CourtConfig::default(),
            Arc::new(NoopSubmissionRegistry),
            Arc::new(InMemoryEventBus::new()),
        ));
        let submission = SubmissionId::from("hot");
        for i in 0..ATTESTORS {
            court.stake(&attestor(i), 1_000, T0).await.unwrap();
        }
        court
            .start_period(&submission, &AccountId::from("author"), T0)
            .await
            .unwrap();

        let mut handles = Vec::new();
        for i in 0..ATTESTORS {
            let court = Arc::clone(&court);
            let submission = submission.clone();
            handles.push(tokio::spawn(async move {
                court
                    .attest(&submission, &attestor(i), choice(i), stake_for(i), T0 + 1)
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let expected_valid: u128 = (0..ATTESTORS)
            .filter(|i| choice(*i).is_valid())
            .map(stake_for)
            .sum();
        let expected_invalid: u128 = (0..ATTESTORS)
            .filter(|i| !choice(*i).is_valid())
            .map(stake_for)
            .sum();

        let period = court.get_period(&submission).await.unwrap();
        assert_eq!(period.total_valid_stake, expected_valid);
        assert_eq!(period.total_invalid_stake, expected_invalid);
        assert_eq!(
            court.pool_totals().await.total_locked,
            expected_valid + expected_invalid
        );

        let (valid, invalid) = court.get_attestors(&submission).await.unwrap();
        assert_eq!(valid.len() + invalid.len(), ATTESTORS as usize);
        assert!(valid.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_resolvers_finalize_once() {
        let registry = Arc::new(RecordingSubmissionRegistry::new());
        let court = Arc::new(CourtService::new(
            CourtConfig::default(),
            Arc::clone(&registry),
            Arc::new(InMemoryEventBus::new()),
        ));
        let submission = SubmissionId::from("race");
        for i in 0..4 {
            court.stake(&attestor(i), 1_000, T0).await.unwrap();
        }
        court
            .start_period(&submission, &AccountId::from("author"), T0)
            .await
            .unwrap();
        for i in 0..4 {
            let side = AttestationChoice::from_is_valid(i != 0);
            court
                .attest(&submission, &attestor(i), side, 100, T0 + 1)
                .await
                .unwrap();
        }

        let mut handles = Vec::new();
        for _ in 0..16 {
            let court = Arc::clone(&court);
            let submission = submission.clone();
            handles.push(tokio::spawn(async move {
                court.resolve(&submission, T0 + WINDOW).await
            }));
        }

        let mut finalized = 0;
        let mut already = 0;
        for handle in handles {
            match handle.await.unwrap().unwrap() {
                ResolveOutcome::Finalized(_) => finalized += 1,
                ResolveOutcome::AlreadyResolved => already += 1,
            }
        }

        assert_eq!(finalized, 1);
        assert_eq!(already, 15);
        assert_eq!(registry.verdicts().len(), 1);

        // attestor-000 voted invalid, the other three valid.
        let totals = court.pool_totals().await;
        assert_eq!(totals.total_slashed, 15);
        assert_eq!(totals.total_locked, 0);
        assert_eq!(court.audit(), Ok(()));

        let snapshot = court.snapshot();
        assert_eq!(snapshot.periods[0].status, PeriodStatus::Resolved);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_attest_and_revoke_interleaved() {
        let court = Arc::new(CourtService::new(
            CourtConfig::default(),
            Arc::new(NoopSubmissionRegistry),
            Arc::new(InMemoryEventBus::new()),
        ));
        let submission = SubmissionId::from("churn");
        for i in 0..ATTESTORS {
            court.stake(&attestor(i), 1_000, T0).await.unwrap();
        }
        court
            .start_period(&submission, &AccountId::from("author"), T0)
            .await
            .unwrap();

        let mut handles = Vec::new();
        for i in 0..ATTESTORS {
            let court = Arc::clone(&court);
            let submission = submission.clone();
            handles.push(tokio::spawn(async move {
                court
                    .attest(&submission, &attestor(i), choice(i), stake_for(i), T0 + 1)
                    .await
                    .unwrap();
                if i % 2 == 0 {
                    court
                        .revoke_attestation(&submission, &attestor(i), T0 + 2)
                        .await
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let state = court.snapshot();
        let expected_locked: u128 = (0..ATTESTORS).filter(|i| i % 2 == 1).map(stake_for).sum();
        assert_eq!(state.totals.total_locked, expected_locked);
        let period = &state.periods[0];
        assert_eq!(
            period.total_valid_stake + period.total_invalid_stake,
            expected_locked
        );
        assert!(state.accounts.iter().all(|a| a.locked_balance <= a.staked_balance));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_ledger_events_follow_commit_order() {
        let bus = Arc::new(InMemoryEventBus::new());
        let mut feed = bus.subscribe(EventFilter::topics(vec![EventTopic::Ledger]));
        let court = Arc::new(CourtService::new(
            CourtConfig::default(),
            Arc::new(NoopSubmissionRegistry),
            bus,
        ));
        let whale = AccountId::from("whale");
        court.stake(&whale, 1_000_000, T0).await.unwrap();

        // Same account, same instant: no yield, only stake and unstake.
        let mut handles = Vec::new();
        for i in 0..200u128 {
            let court = Arc::clone(&court);
            let whale = whale.clone();
            handles.push(tokio::spawn(async move {
                if i % 2 == 0 {
                    court.stake(&whale, 10 + i, T0).await.map(|_| ())
                } else {
                    court.unstake(&whale, 5 + i, T0).await.map(|_| ())
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let events = feed.drain();
        assert_eq!(events.len(), 201);
        assert_eq!(feed.skipped(), 0);

        // Replaying the feed must reproduce every reported balance.
        let mut balance: u128 = 0;
        for event in &events {
            match event {
                CourtEvent::Staked {
                    amount,
                    staked_balance,
                    ..
                } => {
                    balance += amount;
                    assert_eq!(*staked_balance, balance);
                }
                CourtEvent::Unstaked {
                    amount,
                    staked_balance,
                    ..
                } => {
                    balance -= amount;
                    assert_eq!(*staked_balance, balance);
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert_eq!(court.get_account(&whale).await.unwrap().staked_balance, balance);
    }
}

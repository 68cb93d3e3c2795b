//! # End-to-End Court Scenarios
//!
//! Drives the full stake → start → attest → resolve lifecycle through
//! `CourtApi` and checks balances, period state and pool totals.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ac_03_attestation_periods::PeriodStatus;
    use ac_04_resolution_engine::TiePolicy;
    use ac_05_court_service::{
        CourtApi, CourtConfig, CourtService, RecordingSubmissionRegistry, ResolveOutcome,
    };
    use shared_bus::InMemoryEventBus;
    use shared_types::{
        AccountId, AttestationChoice, CourtError, FundsError, StateError, SubmissionId,
        Timestamp, ValidationError,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const T0: Timestamp = 1_000;
    const WINDOW: Timestamp = 172_800;

    type Court = CourtService<RecordingSubmissionRegistry, InMemoryEventBus>;

    fn court(config: CourtConfig) -> Court {
        CourtService::new(
            config,
            Arc::new(RecordingSubmissionRegistry::new()),
            Arc::new(InMemoryEventBus::new()),
        )
    }

    fn id(s: &str) -> AccountId {
        AccountId::from(s)
    }

    fn submission() -> SubmissionId {
        SubmissionId::from("S")
    }

    // =============================================================================
    // LIFECYCLE
    // =============================================================================

    #[tokio::test]
    async fn test_documented_end_to_end_scenario() {
        let court = court(CourtConfig::default());
        court.stake(&id("A"), 1_000, T0).await.unwrap();
        court.stake(&id("B"), 1_000, T0).await.unwrap();
        court.start_period(&submission(), &id("X"), T0).await.unwrap();

        court
            .attest(&submission(), &id("A"), AttestationChoice::Valid, 300, T0 + 10)
            .await
            .unwrap();
        court
            .attest(&submission(), &id("B"), AttestationChoice::Invalid, 100, T0 + 20)
            .await
            .unwrap();

        let early = court.resolve(&submission(), T0 + 100).await.unwrap_err();
        assert!(matches!(
            early,
            CourtError::Validation(ValidationError::WindowNotClosed { .. })
        ));

        let outcome = court.resolve(&submission(), T0 + WINDOW).await.unwrap();
        let resolution = outcome.resolution().unwrap();
        assert!(resolution.resolved_is_valid);
        assert_eq!(resolution.losers, vec![id("B")]);
        assert_eq!(resolution.slashed_amounts, vec![15]);
        assert_eq!(resolution.winners, vec![id("A")]);
        assert_eq!(resolution.amounts, vec![15]);
        assert_eq!(resolution.dust, 0);

        let b = court.get_account(&id("B")).await.unwrap();
        assert_eq!(b.staked_balance, 985);
        assert_eq!(b.locked_balance, 0);

        let a = court.get_account(&id("A")).await.unwrap();
        assert_eq!(a.staked_balance, 1_000);
        assert_eq!(a.locked_balance, 0);
        assert_eq!(a.pending_rewards, 15);

        let period = court.get_period(&submission()).await.unwrap();
        assert_eq!(period.status, PeriodStatus::Resolved);
        assert_eq!(period.resolved_is_valid, Some(true));
        assert_eq!(court.audit(), Ok(()));
    }

    #[tokio::test]
    async fn test_three_attestor_majority() {
        let court = court(CourtConfig::default());
        for name in ["A", "B", "C"] {
            court.stake(&id(name), 500, T0).await.unwrap();
        }
        court.start_period(&submission(), &id("X"), T0).await.unwrap();
        court
            .attest(&submission(), &id("A"), AttestationChoice::Valid, 100, T0 + 1)
            .await
            .unwrap();
        court
            .attest(&submission(), &id("B"), AttestationChoice::Invalid, 40, T0 + 2)
            .await
            .unwrap();
        court
            .attest(&submission(), &id("C"), AttestationChoice::Invalid, 30, T0 + 3)
            .await
            .unwrap();

        court.resolve(&submission(), T0 + WINDOW).await.unwrap();

        let totals = court.pool_totals().await;
        assert_eq!(totals.total_slashed, 10);
        assert_eq!(totals.total_rewards_distributed, 10);
        assert_eq!(totals.total_locked, 0);
        assert_eq!(totals.total_staked, 1_490);
        assert_eq!(court.get_account(&id("A")).await.unwrap().pending_rewards, 10);
        assert_eq!(court.get_account(&id("B")).await.unwrap().staked_balance, 494);
        assert_eq!(court.get_account(&id("C")).await.unwrap().staked_balance, 496);
    }

    #[tokio::test]
    async fn test_tie_under_each_policy() {
        for (policy, status, is_valid) in [
            (TiePolicy::FavorInvalid, PeriodStatus::Resolved, Some(false)),
            (TiePolicy::Dispute, PeriodStatus::Disputed, None),
        ] {
            let mut config = CourtConfig::default();
            config.resolution.tie_policy = policy;
            let court = court(config);
            court.stake(&id("A"), 100, T0).await.unwrap();
            court.stake(&id("B"), 100, T0).await.unwrap();
            court.start_period(&submission(), &id("X"), T0).await.unwrap();
            court
                .attest(&submission(), &id("A"), AttestationChoice::Valid, 50, T0 + 1)
                .await
                .unwrap();
            court
                .attest(&submission(), &id("B"), AttestationChoice::Invalid, 50, T0 + 1)
                .await
                .unwrap();

            court.resolve(&submission(), T0 + WINDOW).await.unwrap();

            let period = court.get_period(&submission()).await.unwrap();
            assert_eq!(period.status, status);
            assert_eq!(period.resolved_is_valid, is_valid);
            assert_eq!(court.pool_totals().await.total_locked, 0);
        }
    }

    #[tokio::test]
    async fn test_resolve_is_idempotent() {
        let court = court(CourtConfig::default());
        court.stake(&id("A"), 100, T0).await.unwrap();
        court.start_period(&submission(), &id("X"), T0).await.unwrap();
        court
            .attest(&submission(), &id("A"), AttestationChoice::Valid, 20, T0 + 1)
            .await
            .unwrap();

        court.resolve(&submission(), T0 + WINDOW).await.unwrap();
        let before = court.snapshot();

        let again = court.resolve(&submission(), T0 + WINDOW * 2).await.unwrap();

        assert_eq!(again, ResolveOutcome::AlreadyResolved);
        assert_eq!(court.snapshot(), before);
    }

    #[tokio::test]
    async fn test_empty_period_resolves_invalid() {
        let court = court(CourtConfig::default());
        court.start_period(&submission(), &id("X"), T0).await.unwrap();

        let outcome = court.resolve(&submission(), T0 + WINDOW).await.unwrap();

        let resolution = outcome.resolution().unwrap();
        assert!(!resolution.resolved_is_valid);
        assert!(resolution.winners.is_empty() && resolution.losers.is_empty());
    }

    // =============================================================================
    // VOTING RULES
    // =============================================================================

    #[tokio::test]
    async fn test_voting_rules() {
        let court = court(CourtConfig::default());
        court.stake(&id("A"), 1_000, T0).await.unwrap();
        court.stake(&id("X"), 1_000, T0).await.unwrap();
        court.start_period(&submission(), &id("X"), T0).await.unwrap();

        let own = court
            .attest(&submission(), &id("X"), AttestationChoice::Valid, 100, T0 + 1)
            .await
            .unwrap_err();
        assert!(matches!(
            own,
            CourtError::Validation(ValidationError::SelfAttestationForbidden { .. })
        ));

        let small = court
            .attest(&submission(), &id("A"), AttestationChoice::Valid, 9, T0 + 1)
            .await
            .unwrap_err();
        assert!(matches!(
            small,
            CourtError::Validation(ValidationError::StakeBelowMinimum { offered: 9, minimum: 10 })
        ));

        court
            .attest(&submission(), &id("A"), AttestationChoice::Valid, 100, T0 + 1)
            .await
            .unwrap();
        let twice = court
            .attest(&submission(), &id("A"), AttestationChoice::Invalid, 100, T0 + 2)
            .await
            .unwrap_err();
        assert!(matches!(
            twice,
            CourtError::Validation(ValidationError::DuplicateVote { .. })
        ));

        // Revoke then vote again on the other side.
        court
            .revoke_attestation(&submission(), &id("A"), T0 + 3)
            .await
            .unwrap();
        court
            .attest(&submission(), &id("A"), AttestationChoice::Invalid, 200, T0 + 4)
            .await
            .unwrap();
        let period = court.get_period(&submission()).await.unwrap();
        assert_eq!((period.total_valid_stake, period.total_invalid_stake), (0, 200));

        let late = court
            .attest(&submission(), &id("A"), AttestationChoice::Valid, 100, T0 + WINDOW)
            .await
            .unwrap_err();
        assert!(matches!(
            late,
            CourtError::Validation(ValidationError::WindowClosed { .. })
        ));
    }

    #[tokio::test]
    async fn test_locked_stake_cannot_be_withdrawn() {
        let court = court(CourtConfig::default());
        court.stake(&id("A"), 1_000, T0).await.unwrap();
        court.start_period(&submission(), &id("X"), T0).await.unwrap();
        court
            .attest(&submission(), &id("A"), AttestationChoice::Valid, 800, T0 + 1)
            .await
            .unwrap();

        let err = court.unstake(&id("A"), 300, T0 + 2).await.unwrap_err();
        assert!(matches!(
            err,
            CourtError::Funds(FundsError::InsufficientAvailableBalance { available: 200, .. })
        ));

        let over = court
            .attest(&SubmissionId::from("other"), &id("A"), AttestationChoice::Valid, 10, T0)
            .await
            .unwrap_err();
        assert_eq!(
            over,
            CourtError::State(StateError::PeriodNotFound(SubmissionId::from("other")))
        );

        court.unstake(&id("A"), 200, T0 + 2).await.unwrap();
        assert_eq!(court.get_account(&id("A")).await.unwrap().staked_balance, 800);
    }

    #[tokio::test]
    async fn test_attest_without_stake_fails_cleanly() {
        let court = court(CourtConfig::default());
        court.start_period(&submission(), &id("X"), T0).await.unwrap();

        let err = court
            .attest(&submission(), &id("ghost"), AttestationChoice::Valid, 50, T0 + 1)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CourtError::State(StateError::AccountNotFound(id("ghost")))
        );
        let period = court.get_period(&submission()).await.unwrap();
        assert_eq!(period.total_valid_stake, 0);
        assert_eq!(court.get_attestors(&submission()).await.unwrap(), (vec![], vec![]));
    }
}

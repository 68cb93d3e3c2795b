//! # Resolution Properties
//!
//! For any set of attestations and any slash percentage:
//!
//! - the plan conserves value (`Σ slashed == Σ rewards + dust`)
//! - applying it leaves no stake locked and the pool audit clean
//! - total stake drops by exactly the slashed amount
//! - a second resolve is an idempotent no-op

#[cfg(test)]
mod tests {
    use ac_01_ledger_accounts::{LedgerAccounts, LedgerOp};
    use ac_02_staking_reservoir::StakingReservoir;
    use ac_03_attestation_periods::{PeriodBook, PeriodConfig, PeriodStatus};
    use ac_04_resolution_engine::{
        invariant_value_conserved, plan_resolution, ResolutionConfig, ResolutionEngine,
        TiePolicy,
    };
    use proptest::prelude::*;
    use shared_types::{AccountId, Amount, AttestationChoice, SubmissionId, Timestamp};

    const T0: Timestamp = 1_000;

    fn submission() -> SubmissionId {
        SubmissionId::from("s")
    }

    fn tie_policy() -> impl Strategy<Value = TiePolicy> {
        prop_oneof![Just(TiePolicy::FavorInvalid), Just(TiePolicy::Dispute)]
    }

    prop_compose! {
        fn config()(slash_percentage in 0u8..=100, tie_policy in tie_policy())
            -> ResolutionConfig {
            ResolutionConfig { slash_percentage, tie_policy }
        }
    }

    prop_compose! {
        /// Up to twelve attestors, each staking between the minimum and 10k.
        fn votes()(votes in prop::collection::vec((any::<bool>(), 10u128..10_000), 0..12))
            -> Vec<(AttestationChoice, Amount)> {
            votes
                .into_iter()
                .map(|(is_valid, stake)| (AttestationChoice::from_is_valid(is_valid), stake))
                .collect()
        }
    }

    fn populated(votes: &[(AttestationChoice, Amount)]) -> (PeriodBook, StakingReservoir) {
        let mut pool = StakingReservoir::default();
        let mut periods = PeriodBook::new(PeriodConfig::default());
        periods
            .start(&submission(), &AccountId::from("author"), T0)
            .unwrap();
        for (i, (choice, stake)) in votes.iter().enumerate() {
            let attestor = AccountId::new(format!("attestor-{i:02}"));
            pool.stake(&attestor, 10_000, 0).unwrap();
            periods
                .attest(&mut pool, &submission(), &attestor, *choice, *stake, T0 + 1)
                .unwrap();
        }
        (periods, pool)
    }

    fn end_of_window(periods: &PeriodBook) -> Timestamp {
        periods.require(&submission()).unwrap().end_time
    }

    proptest! {
        #[test]
        fn test_plan_conserves_value(votes in votes(), config in config()) {
            let (periods, _pool) = populated(&votes);
            let period = periods.require(&submission()).unwrap();
            let attestations = periods.attestations(&submission()).unwrap();

            let plan = plan_resolution(period, &attestations, &config).unwrap();

            prop_assert!(invariant_value_conserved(&plan));
            prop_assert_eq!(
                plan.rewards.iter().sum::<Amount>() + plan.dust,
                plan.slashed.iter().sum::<Amount>()
            );

            // Every locked unit is either released or slashed.
            let settled: Amount = plan
                .ops
                .iter()
                .map(|op| match op {
                    LedgerOp::Unlock { amount, .. } | LedgerOp::Slash { amount, .. } => *amount,
                    _ => 0,
                })
                .sum();
            prop_assert_eq!(settled, plan.total_valid_stake + plan.total_invalid_stake);
        }

        #[test]
        fn test_resolution_settles_every_lock(votes in votes(), config in config()) {
            let (mut periods, mut pool) = populated(&votes);
            let staked_before = pool.totals().total_staked;
            let now = end_of_window(&periods);

            let resolution = ResolutionEngine::new(config)
                .resolve(&mut periods, &mut pool, &submission(), now)
                .unwrap();

            let totals = pool.totals();
            prop_assert_eq!(totals.total_locked, 0);
            prop_assert_eq!(totals.total_staked, staked_before - resolution.total_slashed());
            prop_assert_eq!(
                totals.total_slashed,
                totals.total_rewards_distributed + totals.protocol_dust
            );
            prop_assert_eq!(pool.audit(), Ok(()));

            let status = periods.require(&submission()).unwrap().status;
            prop_assert!(status.is_terminal());
            if status == PeriodStatus::Disputed {
                prop_assert_eq!(resolution.total_slashed(), 0);
            }
        }

        #[test]
        fn test_second_resolve_changes_nothing(votes in votes(), config in config()) {
            let (mut periods, mut pool) = populated(&votes);
            let engine = ResolutionEngine::new(config);
            let now = end_of_window(&periods);
            engine.resolve(&mut periods, &mut pool, &submission(), now).unwrap();

            let totals = pool.totals().clone();
            let period = periods.require(&submission()).unwrap().clone();

            let again = engine.resolve(&mut periods, &mut pool, &submission(), now + 1);

            prop_assert!(again.unwrap_err().is_idempotent_success());
            prop_assert_eq!(pool.totals(), &totals);
            prop_assert_eq!(periods.require(&submission()).unwrap(), &period);
        }
    }
}

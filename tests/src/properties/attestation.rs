//! # Attestation Properties
//!
//! Random attest/revoke traffic on a handful of submissions. After every
//! step each period's tallies equal the sum over its live attestations, and
//! the pool's locked total equals the sum of all live stake.

#[cfg(test)]
mod tests {
    use ac_01_ledger_accounts::LedgerAccounts;
    use ac_02_staking_reservoir::StakingReservoir;
    use ac_03_attestation_periods::{
        invariant_attestations_belong, invariant_tally_matches, PeriodBook, PeriodConfig,
    };
    use proptest::prelude::*;
    use shared_types::{AccountId, Amount, AttestationChoice, SubmissionId, Timestamp};

    const ATTESTORS: [&str; 5] = ["a", "b", "c", "d", "author"];
    const SUBMISSIONS: [&str; 3] = ["s1", "s2", "s3"];
    const T0: Timestamp = 1_000;

    #[derive(Clone, Debug)]
    enum Step {
        Attest {
            submission: usize,
            attestor: usize,
            is_valid: bool,
            stake: Amount,
        },
        Revoke {
            submission: usize,
            attestor: usize,
        },
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            3 => (0..SUBMISSIONS.len(), 0..ATTESTORS.len(), any::<bool>(), 0u128..400)
                .prop_map(|(submission, attestor, is_valid, stake)| Step::Attest {
                    submission,
                    attestor,
                    is_valid,
                    stake,
                }),
            1 => (0..SUBMISSIONS.len(), 0..ATTESTORS.len())
                .prop_map(|(submission, attestor)| Step::Revoke { submission, attestor }),
        ]
    }

    fn setup() -> (PeriodBook, StakingReservoir) {
        let mut pool = StakingReservoir::default();
        for name in ATTESTORS {
            pool.stake(&AccountId::from(name), 1_000, 0).unwrap();
        }
        let mut periods = PeriodBook::new(PeriodConfig::default());
        for submission in SUBMISSIONS {
            periods
                .start(&SubmissionId::from(submission), &AccountId::from("author"), T0)
                .unwrap();
        }
        (periods, pool)
    }

    fn run(periods: &mut PeriodBook, pool: &mut StakingReservoir, step: &Step, now: Timestamp) {
        let _ = match step {
            Step::Attest {
                submission,
                attestor,
                is_valid,
                stake,
            } => periods
                .attest(
                    pool,
                    &SubmissionId::from(SUBMISSIONS[*submission]),
                    &AccountId::from(ATTESTORS[*attestor]),
                    AttestationChoice::from_is_valid(*is_valid),
                    *stake,
                    now,
                )
                .map(|_| ()),
            Step::Revoke {
                submission,
                attestor,
            } => periods
                .revoke(
                    pool,
                    &SubmissionId::from(SUBMISSIONS[*submission]),
                    &AccountId::from(ATTESTORS[*attestor]),
                    now,
                )
                .map(|_| ()),
        };
    }

    fn live_stake(periods: &PeriodBook) -> Amount {
        SUBMISSIONS
            .iter()
            .flat_map(|s| periods.attestations(&SubmissionId::from(*s)).unwrap())
            .map(|a| a.stake_amount)
            .sum()
    }

    proptest! {
        #[test]
        fn test_tallies_match_live_attestations(steps in prop::collection::vec(step(), 1..80)) {
            let (mut periods, mut pool) = setup();
            for (i, step) in steps.iter().enumerate() {
                run(&mut periods, &mut pool, step, T0 + 1 + i as Timestamp);

                for period in periods.periods() {
                    let attestations = periods.attestations(&period.submission_id).unwrap();
                    prop_assert!(invariant_tally_matches(period, &attestations));
                    prop_assert!(invariant_attestations_belong(period, &attestations));
                }
            }
        }

        #[test]
        fn test_locked_total_equals_live_stake(steps in prop::collection::vec(step(), 1..80)) {
            let (mut periods, mut pool) = setup();
            for (i, step) in steps.iter().enumerate() {
                run(&mut periods, &mut pool, step, T0 + 1 + i as Timestamp);
            }

            prop_assert_eq!(pool.totals().total_locked, live_stake(&periods));
            prop_assert_eq!(pool.audit(), Ok(()));
        }

        #[test]
        fn test_closed_window_rejects_everything(steps in prop::collection::vec(step(), 1..30)) {
            let (mut periods, mut pool) = setup();
            let end = periods.config().attestation_window_secs + T0;
            for step in &steps {
                run(&mut periods, &mut pool, step, end);
            }

            prop_assert_eq!(live_stake(&periods), 0);
            prop_assert_eq!(pool.totals().total_locked, 0);
        }
    }
}

use chrono::{Days, NaiveDate};
use feeledger::application::allocator::{Allocation, allocate};
use feeledger::domain::installment::PaymentStatus;
use feeledger::domain::money::Money;
use feeledger::domain::policy::{AllocationMode, AllocationPolicy, BaseRatePolicy};
use feeledger::domain::release::Release;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const CASES: usize = 500;

fn random_releases(rng: &mut StdRng) -> Vec<Release> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 25).unwrap();
    let count = rng.gen_range(0..12);
    (0..count)
        .map(|i| {
            let cents: i64 = rng.gen_range(0..800_000);
            let status = if rng.gen_bool(0.2) {
                PaymentStatus::Paid
            } else {
                PaymentStatus::Pending
            };
            Release::new(
                start + Days::new(30 * i as u64),
                Money::new(Decimal::new(cents, 2)),
                status,
            )
        })
        .collect()
}

fn random_policy(rng: &mut StdRng) -> AllocationPolicy {
    let mode = if rng.gen_bool(0.5) {
        AllocationMode::Tiered
    } else {
        AllocationMode::LumpSum
    };
    let base_rate = if rng.gen_bool(0.5) {
        BaseRatePolicy::Position
    } else {
        BaseRatePolicy::Size
    };
    AllocationPolicy::default()
        .with_mode(mode)
        .with_base_rate(base_rate)
        .with_charge_paid_releases(rng.gen_bool(0.3))
}

fn for_each_case(mut check: impl FnMut(&[Release], Money, &AllocationPolicy, &Allocation)) {
    let mut rng = StdRng::seed_from_u64(0x5eed_f00d);
    for _ in 0..CASES {
        let releases = random_releases(&mut rng);
        let balance = Money::new(Decimal::new(rng.gen_range(0..1_500_000), 2));
        let policy = random_policy(&mut rng);
        let allocation = allocate(&releases, balance, &policy).unwrap();
        check(&releases, balance, &policy, &allocation);
    }
}

#[test]
fn test_conservation() {
    for_each_case(|_, balance, _, allocation| {
        assert_eq!(allocation.total_charged() + allocation.final_remaining, balance);
    });
}

#[test]
fn test_non_negativity() {
    for_each_case(|_, _, _, allocation| {
        for row in &allocation.rows {
            assert!(!row.fee_charged.is_negative());
            assert!(!row.client_net.is_negative());
            assert!(!row.balance_after.is_negative());
        }
        assert!(!allocation.final_remaining.is_negative());
    });
}

#[test]
fn test_floor_holds_on_non_final_releases() {
    for_each_case(|releases, _, policy, allocation| {
        if policy.mode == AllocationMode::LumpSum {
            return;
        }
        let chargeable: Vec<usize> = releases
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_pending() || policy.charge_paid_releases)
            .map(|(i, _)| i)
            .collect();
        let Some((_, non_final)) = chargeable.split_last() else {
            return;
        };
        for &i in non_final {
            let row = &allocation.rows[i];
            if row.installment_amount.is_zero() {
                continue;
            }
            // One cent of tolerance for output rounding
            let floor = row.installment_amount.value() * dec!(0.60) - dec!(0.01);
            assert!(
                row.client_net.value() >= floor,
                "client kept {} of {}",
                row.client_net,
                row.installment_amount
            );
        }
    });
}

#[test]
fn test_final_release_zeroes_balance_or_is_exhausted() {
    for_each_case(|releases, balance, policy, allocation| {
        if allocation.final_remaining.is_zero() {
            return;
        }
        let last = releases
            .iter()
            .rposition(|r| r.is_pending() || policy.charge_paid_releases);
        match last {
            // Nothing chargeable: the balance is untouched
            None => assert_eq!(allocation.final_remaining, balance),
            // Balance left over only when the last release was taken whole
            Some(i) => assert_eq!(allocation.rows[i].client_net, Money::ZERO),
        }
    });
}

#[test]
fn test_idempotence() {
    for_each_case(|releases, balance, policy, allocation| {
        let again = allocate(releases, balance, policy).unwrap();
        assert_eq!(&again, allocation);
    });
}

use crate::domain::distribution::DistributionRow;
use crate::domain::money::Money;
use crate::domain::policy::{AllocationMode, AllocationPolicy};
use crate::domain::release::Release;
use crate::error::{FeeError, Result};
use tracing::debug;

/// Result of one allocation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// One row per release, in chronological order.
    pub rows: Vec<DistributionRow>,
    /// Fee still outstanding after every release has been charged.
    pub final_remaining: Money,
}

impl Allocation {
    pub fn total_charged(&self) -> Money {
        self.rows.iter().map(|row| row.fee_charged).sum()
    }
}

/// Decides how much fee each release pays towards `remaining_balance`.
///
/// Releases must be in ascending date order, as produced by
/// [`normalize`](super::normalizer::normalize). Only pending releases are
/// charged unless the policy charges paid releases too; the others pass through
/// with a zero charge.
///
/// Charges are computed exactly and rounded once, when the rows are built: each
/// row's charge is the difference between consecutive cumulative totals rounded
/// half-to-even to cents, so the rounded charges always add up to the rounded
/// amount collected.
pub fn allocate(
    releases: &[Release],
    remaining_balance: Money,
    policy: &AllocationPolicy,
) -> Result<Allocation> {
    for release in releases {
        if release.total_net.is_negative() {
            return Err(FeeError::InvalidInputError(format!(
                "release on {} has negative amount {}",
                release.date, release.total_net
            )));
        }
    }

    let opening = remaining_balance.clamp_zero();
    let chargeable: Vec<usize> = releases
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_pending() || policy.charge_paid_releases)
        .map(|(i, _)| i)
        .collect();

    let mut charges = vec![Money::ZERO; releases.len()];
    let lump_sum = match policy.mode {
        AllocationMode::LumpSum => lump_sum_target(releases, &chargeable, opening, policy),
        AllocationMode::Tiered => None,
    };
    match lump_sum {
        Some(index) => {
            debug!(date = %releases[index].date, "lump-sum test passed");
            charges[index] = opening;
        }
        None => tiered(releases, &chargeable, opening, policy, &mut charges),
    }

    check_conservation(releases, &charges, opening)?;
    Ok(build_rows(releases, &charges, opening))
}

/// Picks the largest chargeable release if it can absorb the whole balance while
/// the client keeps the required share of it. Ties go to the earliest release.
fn lump_sum_target(
    releases: &[Release],
    chargeable: &[usize],
    balance: Money,
    policy: &AllocationPolicy,
) -> Option<usize> {
    let mut largest: Option<usize> = None;
    for &i in chargeable {
        match largest {
            Some(best) if releases[best].total_net >= releases[i].total_net => {}
            _ => largest = Some(i),
        }
    }

    let index = largest?;
    let amount = releases[index].total_net;
    if amount.is_zero() {
        return None;
    }
    let client_share = (amount - balance).ratio_of(amount);
    debug!(%amount, %balance, share = %client_share, "lump-sum test");
    (client_share >= policy.lump_sum_client_share).then_some(index)
}

/// Walks chargeable releases chronologically, charging the base rate for each
/// position, capped by the balance and the client floor. The last chargeable
/// release takes whatever balance is left, up to its own amount.
fn tiered(
    releases: &[Release],
    chargeable: &[usize],
    opening: Money,
    policy: &AllocationPolicy,
    charges: &mut [Money],
) {
    let mut balance = opening;
    let last = chargeable.len();

    for (position, &i) in chargeable.iter().enumerate().map(|(p, i)| (p + 1, i)) {
        if balance.is_zero() {
            break;
        }
        let amount = releases[i].total_net;

        let charge = if position == last {
            balance.min(amount)
        } else {
            let candidate = amount * policy.base_rate_for(position, amount);
            let ceiling = candidate.min(balance);
            ceiling.min(amount * policy.max_charge_share())
        };

        charges[i] = charge;
        balance = (balance - charge).clamp_zero();
    }
}

fn check_conservation(releases: &[Release], charges: &[Money], opening: Money) -> Result<()> {
    for (release, charge) in releases.iter().zip(charges) {
        if charge.is_negative() || *charge > release.total_net {
            return Err(FeeError::OverAllocationError(format!(
                "charge {} on release {} outside [0, {}]",
                charge, release.date, release.total_net
            )));
        }
    }
    let total: Money = charges.iter().copied().sum();
    if total > opening {
        return Err(FeeError::OverAllocationError(format!(
            "charged {} against a balance of {}",
            total, opening
        )));
    }
    Ok(())
}

fn build_rows(releases: &[Release], charges: &[Money], opening: Money) -> Allocation {
    let opening_rounded = opening.round_cents();
    let mut cumulative = Money::ZERO;
    let mut collected = Money::ZERO;
    let mut rows = Vec::with_capacity(releases.len());

    for (release, &charge) in releases.iter().zip(charges) {
        cumulative += charge;
        let collected_now = cumulative.round_cents();
        let fee_charged = collected_now - collected;
        collected = collected_now;

        let amount = release.total_net.round_cents();
        rows.push(DistributionRow {
            release_date: release.date,
            competences: release.competences.clone(),
            status: release.status,
            installment_amount: amount,
            client_net: (amount - fee_charged).clamp_zero(),
            fee_charged,
            effective_rate: fee_charged.ratio_of(amount).round(),
            balance_after: (opening_rounded - collected).clamp_zero(),
        });
    }

    Allocation {
        rows,
        final_remaining: (opening_rounded - collected).clamp_zero(),
    }
}

use super::money::{Money, Rate};
use clap::ValueEnum;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// How the allocator decides where the fee is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AllocationMode {
    /// Charge an escalating share of each release in chronological order.
    #[default]
    Tiered,
    /// Clear the whole balance from the largest release when the client keeps
    /// at least half of it, otherwise fall back to `Tiered`.
    LumpSum,
}

/// How the tiered walk picks the base rate for a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BaseRatePolicy {
    /// 40% for the first chargeable release, 35% for the second, 30% after.
    #[default]
    Position,
    /// 40% for releases at or above the size threshold, 35% below it.
    Size,
}

/// Rules for one allocation run. Built once by the caller and handed to the
/// engine; nothing in here is read from the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPolicy {
    pub mode: AllocationMode,
    pub base_rate: BaseRatePolicy,
    /// Charge releases that were already paid out (first run for a client).
    pub charge_paid_releases: bool,
    /// Base rates by 1-based position; the last entry applies to every later position.
    pub position_rates: Vec<Rate>,
    pub size_threshold: Money,
    pub large_release_rate: Rate,
    pub small_release_rate: Rate,
    /// Minimum share a client keeps of every non-final release.
    pub client_floor: Rate,
    /// Minimum share a client must keep for the lump-sum test to pass.
    pub lump_sum_client_share: Rate,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            mode: AllocationMode::Tiered,
            base_rate: BaseRatePolicy::Position,
            charge_paid_releases: false,
            position_rates: vec![Rate(dec!(0.40)), Rate(dec!(0.35)), Rate(dec!(0.30))],
            size_threshold: Money(dec!(1600)),
            large_release_rate: Rate(dec!(0.40)),
            small_release_rate: Rate(dec!(0.35)),
            client_floor: Rate(dec!(0.60)),
            lump_sum_client_share: Rate(dec!(0.50)),
        }
    }
}

impl AllocationPolicy {
    pub fn with_mode(mut self, mode: AllocationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_base_rate(mut self, base_rate: BaseRatePolicy) -> Self {
        self.base_rate = base_rate;
        self
    }

    pub fn with_charge_paid_releases(mut self, charge_paid_releases: bool) -> Self {
        self.charge_paid_releases = charge_paid_releases;
        self
    }

    /// Base rate for the release at 1-based `position` with the given amount.
    pub fn base_rate_for(&self, position: usize, amount: Money) -> Rate {
        match self.base_rate {
            BaseRatePolicy::Position => {
                let index = position.saturating_sub(1);
                self.position_rates
                    .get(index)
                    .or_else(|| self.position_rates.last())
                    .copied()
                    .unwrap_or(Rate::ZERO)
            }
            BaseRatePolicy::Size => {
                if amount >= self.size_threshold {
                    self.large_release_rate
                } else {
                    self.small_release_rate
                }
            }
        }
    }

    /// Largest share of a non-final release that may be charged.
    pub fn max_charge_share(&self) -> Rate {
        self.client_floor.complement()
    }
}

/// How the contractual fee total is established.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "basis", content = "value")]
pub enum FeeBasis {
    /// A fixed figure agreed outside the statement.
    Fixed(Money),
    /// A percentage of the total net benefit across all releases.
    PercentOfNet(Rate),
}

impl FeeBasis {
    pub fn total_fee(&self, total_net: Money) -> Money {
        match *self {
            FeeBasis::Fixed(amount) => amount,
            FeeBasis::PercentOfNet(rate) => total_net * rate,
        }
    }
}

impl Default for FeeBasis {
    fn default() -> Self {
        FeeBasis::Fixed(Money(Decimal::ZERO))
    }
}

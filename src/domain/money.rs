use crate::error::FeeError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// Number of decimal places carried by monetary output.
pub const CENTS: u32 = 2;
/// Number of decimal places carried by rate output.
pub const RATE_SCALE: u32 = 4;

/// Represents a monetary value.
///
/// This is a wrapper around `rust_decimal::Decimal`. Arithmetic is exact; rounding
/// to cents happens only through [`Money::round_cents`], which the ledger calls at
/// the output step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Builds a non-negative amount, rejecting anything below zero.
    pub fn non_negative(amount: Decimal) -> Result<Self, FeeError> {
        if amount < Decimal::ZERO {
            Err(FeeError::InvalidInputError(format!(
                "amount {} must not be negative",
                amount
            )))
        } else {
            Ok(Self(amount))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Clamps negative values to zero.
    pub fn clamp_zero(self) -> Self {
        if self.is_negative() { Self::ZERO } else { self }
    }

    /// Rounds half-to-even to exactly two decimal places.
    pub fn round_cents(self) -> Self {
        let mut value = self
            .0
            .round_dp_with_strategy(CENTS, RoundingStrategy::MidpointNearestEven);
        value.rescale(CENTS);
        Self(value)
    }

    /// Share of `self` relative to `whole`, zero when `whole` is zero.
    pub fn ratio_of(self, whole: Money) -> Rate {
        if whole.is_zero() {
            Rate::ZERO
        } else {
            Rate(self.0 / whole.0)
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Mul<Rate> for Money {
    type Output = Self;
    fn mul(self, rhs: Rate) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, m| acc + m)
    }
}

/// A fraction in `[0, 1]` applied to a monetary amount (`0.40` is 40%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Rate(pub Decimal);

impl Rate {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Builds a rate from a fraction, rejecting values outside `[0, 1]`.
    pub fn new(value: Decimal) -> Result<Self, FeeError> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            Err(FeeError::ValidationError(format!(
                "rate {} must be between 0 and 1",
                value
            )))
        } else {
            Ok(Self(value))
        }
    }

    /// Builds a rate from a percentage such as `30` for 30%.
    pub fn from_percent(percent: Decimal) -> Result<Self, FeeError> {
        Self::new(percent / Decimal::ONE_HUNDRED)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The complementary share, `1 - self`.
    pub fn complement(self) -> Self {
        Self(Decimal::ONE - self.0)
    }

    /// Rounds half-to-even to exactly four decimal places.
    pub fn round(self) -> Self {
        let mut value = self
            .0
            .round_dp_with_strategy(RATE_SCALE, RoundingStrategy::MidpointNearestEven);
        value.rescale(RATE_SCALE);
        Self(value)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

use super::money::Money;
use crate::error::FeeError;
use serde::{Deserialize, Serialize};

/// Running state of the fee relationship with one client.
///
/// `total_fee_owed` and `already_paid` are fixed inputs for a run. The only
/// mutation is [`FeeAccount::collect`], applied once by the engine with the
/// amount collected in that run.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct FeeAccount {
    /// Contractual fee total.
    pub total_fee_owed: Money,
    /// Fee collected in prior cycles.
    pub already_paid: Money,
    /// Fee collected by the current run.
    pub collected: Money,
}

impl FeeAccount {
    pub fn new(total_fee_owed: Money, already_paid: Money) -> Result<Self, FeeError> {
        if total_fee_owed.is_negative() || already_paid.is_negative() {
            return Err(FeeError::InvalidInputError(
                "fee owed and already paid must not be negative".to_string(),
            ));
        }
        Ok(Self {
            total_fee_owed,
            already_paid,
            collected: Money::ZERO,
        })
    }

    /// Balance still owed before the current run, never below zero.
    pub fn opening_balance(&self) -> Money {
        (self.total_fee_owed - self.already_paid).clamp_zero()
    }

    /// Balance still owed after the current run, never below zero.
    pub fn remaining_balance(&self) -> Money {
        (self.opening_balance() - self.collected).clamp_zero()
    }

    /// Records the amount collected by this run.
    pub fn collect(&mut self, amount: Money) -> Result<(), FeeError> {
        if amount > self.opening_balance() - self.collected {
            return Err(FeeError::OverAllocationError(format!(
                "collecting {} exceeds the outstanding balance {}",
                amount,
                self.remaining_balance()
            )));
        }
        self.collected += amount;
        Ok(())
    }
}

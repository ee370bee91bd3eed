use super::installment::{Competence, PaymentStatus};
use super::money::{Money, Rate};
use super::policy::{AllocationMode, BaseRatePolicy};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The fee decision for one release.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct DistributionRow {
    pub release_date: NaiveDate,
    pub competences: Vec<Competence>,
    pub status: PaymentStatus,
    /// Release total before the fee.
    pub installment_amount: Money,
    /// What the client keeps, `installment_amount - fee_charged`.
    pub client_net: Money,
    pub fee_charged: Money,
    pub effective_rate: Rate,
    /// Outstanding fee once this release has been charged.
    pub balance_after: Money,
}

/// Aggregate totals over a distribution.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct LedgerTotals {
    pub total_gross: Money,
    pub total_net: Money,
    pub total_client_net: Money,
    pub total_fee_owed: Money,
    pub already_paid: Money,
    /// Fee collected across the rows of this run.
    pub total_fee_collected: Money,
    /// Outstanding fee before the first row.
    pub balance_before: Money,
    /// Outstanding fee after the last row.
    pub remaining_balance: Money,
}

/// The persisted shape of one allocation: totals plus per-release rows.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct Ledger {
    pub totals: LedgerTotals,
    pub rows: Vec<DistributionRow>,
}

/// A snapshot of one run, as handed to a [`LedgerStore`](super::ports::LedgerStore).
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct LedgerRecord {
    /// Client identifier the run was made for.
    pub client: String,
    pub first_run: bool,
    pub mode: AllocationMode,
    pub base_rate: BaseRatePolicy,
    pub ledger: Ledger,
}

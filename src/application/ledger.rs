use crate::domain::distribution::{DistributionRow, Ledger, LedgerTotals};
use crate::domain::fee_account::FeeAccount;
use crate::domain::money::Money;
use crate::domain::release::Release;

/// Builds the persisted ledger shape from allocated rows.
///
/// `releases` supplies the gross totals, which the rows do not carry. The
/// account is expected to have had this run's collection applied already.
pub fn assemble(rows: Vec<DistributionRow>, releases: &[Release], account: &FeeAccount) -> Ledger {
    let total_gross: Money = releases.iter().map(|r| r.total_gross).sum();
    let total_net: Money = rows.iter().map(|r| r.installment_amount).sum();
    let total_client_net: Money = rows.iter().map(|r| r.client_net).sum();
    let total_fee_collected: Money = rows.iter().map(|r| r.fee_charged).sum();

    let totals = LedgerTotals {
        total_gross: total_gross.round_cents(),
        total_net: total_net.round_cents(),
        total_client_net: total_client_net.round_cents(),
        total_fee_owed: account.total_fee_owed.round_cents(),
        already_paid: account.already_paid.round_cents(),
        total_fee_collected: total_fee_collected.round_cents(),
        balance_before: account.opening_balance().round_cents(),
        remaining_balance: account.remaining_balance().round_cents(),
    };

    Ledger { totals, rows }
}

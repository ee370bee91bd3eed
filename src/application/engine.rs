use crate::application::allocator::allocate;
use crate::application::ledger::assemble;
use crate::application::normalizer::normalize;
use crate::domain::distribution::{Ledger, LedgerRecord};
use crate::domain::fee_account::FeeAccount;
use crate::domain::installment::Installment;
use crate::domain::money::Money;
use crate::domain::policy::{AllocationPolicy, FeeBasis};
use crate::domain::ports::{DisbursementCalendar, LedgerStoreBox};
use crate::error::Result;
use tracing::{info, warn};

/// Everything one allocation run needs about a client.
#[derive(Debug, Clone)]
pub struct AllocationRequest {
    pub client: String,
    pub installments: Vec<Installment>,
    pub fee_basis: FeeBasis,
    /// Fee collected in prior cycles.
    pub already_paid: Money,
}

/// The computed ledger, plus a warning when the balance was not fully collected
/// or the ledger could not be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationOutcome {
    pub ledger: Ledger,
    pub warning: Option<String>,
}

/// The main entry point for fee allocation.
///
/// `FeeEngine` runs the pure pipeline (normalize, allocate, assemble) and then
/// hands the snapshot to its store. A shortfall on the final release and a failed
/// write are logged and reported on the outcome but never fail the run.
pub struct FeeEngine {
    store: LedgerStoreBox,
    policy: AllocationPolicy,
    calendar: Option<Box<dyn DisbursementCalendar>>,
}

impl FeeEngine {
    /// Creates a new `FeeEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `store` - Where allocation snapshots are persisted.
    /// * `policy` - The allocation rules applied to every run.
    pub fn new(store: LedgerStoreBox, policy: AllocationPolicy) -> Self {
        Self {
            store,
            policy,
            calendar: None,
        }
    }

    /// Sets the calendar used to project installments missing a payment date.
    pub fn with_calendar(mut self, calendar: Box<dyn DisbursementCalendar>) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Computes the fee distribution for one client and persists the snapshot.
    pub async fn run(&self, request: AllocationRequest) -> Result<AllocationOutcome> {
        let releases = normalize(&request.installments, self.calendar.as_deref())?;

        let total_net: Money = releases.iter().map(|r| r.total_net).sum();
        let total_fee = request.fee_basis.total_fee(total_net).round_cents();
        let mut account = FeeAccount::new(total_fee, request.already_paid.round_cents())?;

        let allocation = allocate(&releases, account.opening_balance(), &self.policy)?;
        account.collect(allocation.total_charged())?;

        let mut warnings = Vec::new();
        let chargeable = releases
            .iter()
            .any(|r| r.is_pending() || self.policy.charge_paid_releases);
        if chargeable && !allocation.final_remaining.is_zero() {
            warn!(
                client = %request.client,
                shortfall = %allocation.final_remaining,
                "final release cannot absorb the remaining balance"
            );
            warnings.push(format!(
                "final release short by {}: balance not fully collected",
                allocation.final_remaining
            ));
        }

        let ledger = assemble(allocation.rows, &releases, &account);

        info!(
            client = %request.client,
            releases = releases.len(),
            fee_owed = %ledger.totals.total_fee_owed,
            collected = %ledger.totals.total_fee_collected,
            remaining = %ledger.totals.remaining_balance,
            "allocation complete"
        );

        let record = LedgerRecord {
            client: request.client,
            first_run: self.policy.charge_paid_releases,
            mode: self.policy.mode,
            base_rate: self.policy.base_rate,
            ledger: ledger.clone(),
        };
        if let Err(e) = self.store.store(record).await {
            warn!(error = %e, "failed to persist allocation (non-fatal)");
            warnings.push(format!("allocation not persisted: {}", e));
        }

        let warning = (!warnings.is_empty()).then(|| warnings.join("; "));
        Ok(AllocationOutcome { ledger, warning })
    }

    /// Returns the last snapshot stored for `client`.
    pub async fn last_record(&self, client: &str) -> Result<Option<LedgerRecord>> {
        self.store.get(client).await
    }

    /// Consumes the engine and returns every stored snapshot.
    pub async fn into_results(self) -> Result<Vec<LedgerRecord>> {
        self.store.get_all().await
    }
}

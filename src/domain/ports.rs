use super::distribution::LedgerRecord;
use super::installment::Competence;
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Maps a competence to the date its payment is disbursed.
pub trait DisbursementCalendar: Send + Sync {
    fn disbursement_date(&self, competence: Competence) -> Option<NaiveDate>;
}

/// Storage for allocation snapshots.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn store(&self, record: LedgerRecord) -> Result<()>;
    async fn get(&self, client: &str) -> Result<Option<LedgerRecord>>;
    async fn get_all(&self) -> Result<Vec<LedgerRecord>>;
}

pub type LedgerStoreBox = Box<dyn LedgerStore>;
pub type LedgerStoreFactory = Box<dyn Fn() -> LedgerStoreBox + Send + Sync>;

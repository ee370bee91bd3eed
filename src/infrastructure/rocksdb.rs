use crate::domain::distribution::LedgerRecord;
use crate::domain::ports::LedgerStore;
use crate::error::{FeeError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing allocation snapshots.
pub const CF_LEDGERS: &str = "ledgers";

/// A persistent store implementation using RocksDB.
///
/// Snapshots live in their own column family, keyed by client identifier and
/// serialized as JSON. A later run for the same client replaces the earlier one.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "ledgers" column family exists.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the database will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_ledgers = ColumnFamilyDescriptor::new(CF_LEDGERS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_ledgers])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn missing_cf() -> FeeError {
        FeeError::PersistenceError(Box::new(std::io::Error::other(
            "Ledgers column family not found",
        )))
    }

    fn decode(bytes: &[u8]) -> Result<LedgerRecord> {
        serde_json::from_slice(bytes).map_err(|e| {
            FeeError::PersistenceError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Deserialization error: {}", e),
            )))
        })
    }
}

#[async_trait]
impl LedgerStore for RocksDBStore {
    async fn store(&self, record: LedgerRecord) -> Result<()> {
        let cf = self.db.cf_handle(CF_LEDGERS).ok_or_else(Self::missing_cf)?;

        let value = serde_json::to_vec(&record)?;
        self.db.put_cf(&cf, record.client.as_bytes(), value)?;

        Ok(())
    }

    async fn get(&self, client: &str) -> Result<Option<LedgerRecord>> {
        let cf = self.db.cf_handle(CF_LEDGERS).ok_or_else(Self::missing_cf)?;

        match self.db.get_cf(&cf, client.as_bytes())? {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> Result<Vec<LedgerRecord>> {
        let cf = self.db.cf_handle(CF_LEDGERS).ok_or_else(Self::missing_cf)?;

        let mut records = Vec::new();
        for item in self.db.iterator_cf(&cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            records.push(Self::decode(&value)?);
        }

        Ok(records)
    }
}

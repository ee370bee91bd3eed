use crate::domain::distribution::LedgerRecord;
use crate::domain::ports::LedgerStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for allocation snapshots.
///
/// Keeps the latest record per client behind `Arc<RwLock<..>>`; clones share the
/// same map. Used when no persistent database is configured, and in tests.
#[derive(Default, Clone)]
pub struct InMemoryLedgerStore {
    records: Arc<RwLock<HashMap<String, LedgerRecord>>>,
}

impl InMemoryLedgerStore {
    /// Creates a new, empty in-memory ledger store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn store(&self, record: LedgerRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.client.clone(), record);
        Ok(())
    }

    async fn get(&self, client: &str) -> Result<Option<LedgerRecord>> {
        let records = self.records.read().await;
        Ok(records.get(client).cloned())
    }

    async fn get_all(&self) -> Result<Vec<LedgerRecord>> {
        let records = self.records.read().await;
        let mut all: Vec<LedgerRecord> = records.values().cloned().collect();
        all.sort_by(|a, b| a.client.cmp(&b.client));
        Ok(all)
    }
}

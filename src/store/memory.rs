//! In-memory ledger store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{LedgerSnapshot, Record, RecordStatus};

use super::LedgerStore;

/// A [`LedgerStore`] held in process memory.
///
/// Seeded from a snapshot at startup. Can be switched to fail every call,
/// which lets callers exercise their handling of an unavailable store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    snapshot: RwLock<LedgerSnapshot>,
    unavailable: RwLock<bool>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `snapshot`.
    pub fn seeded(snapshot: LedgerSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
            unavailable: RwLock::new(false),
        }
    }

    /// Makes every subsequent call fail with `PersistenceUnavailable`.
    pub async fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write().await = unavailable;
    }

    /// Number of stored records.
    pub async fn record_count(&self) -> usize {
        self.snapshot.read().await.records.len()
    }

    async fn ensure_available(&self) -> LedgerResult<()> {
        if *self.unavailable.read().await {
            return Err(LedgerError::PersistenceUnavailable {
                message: "in-memory store is switched off".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for InMemoryStore {
    async fn load_all(&self) -> LedgerResult<LedgerSnapshot> {
        self.ensure_available().await?;
        Ok(self.snapshot.read().await.clone())
    }

    async fn append_record(&self, record: Record) -> LedgerResult<()> {
        self.ensure_available().await?;
        let mut snapshot = self.snapshot.write().await;
        if snapshot.records.iter().any(|r| r.id == record.id) {
            return Err(LedgerError::InvalidRecord {
                message: format!("record '{}' already exists", record.id),
            });
        }
        snapshot.records.push(record);
        Ok(())
    }

    async fn set_status(&self, record_id: &str, status: RecordStatus) -> LedgerResult<()> {
        self.ensure_available().await?;
        let mut snapshot = self.snapshot.write().await;
        let record = snapshot
            .records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| LedgerError::RecordNotFound {
                record_id: record_id.to_string(),
            })?;

        if record.status.is_terminal() {
            return Err(LedgerError::RecordFinalized {
                record_id: record.id.clone(),
                status: record.status,
            });
        }
        record.status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, Bucket, Category};
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn create_test_record(id: &str, status: RecordStatus) -> Record {
        Record {
            id: id.to_string(),
            user_id: "u_001".to_string(),
            user_name: "Chen".to_string(),
            category: Category::Leave,
            bucket: Bucket::Annual,
            amount: Amount::Hours(Decimal::from(8)),
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            start_time: None,
            end_time: None,
            reason: String::new(),
            status,
            submitted_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
            carry_over_until: None,
        }
    }

    #[tokio::test]
    async fn test_append_and_load() {
        let store = InMemoryStore::new();
        store
            .append_record(create_test_record("r_001", RecordStatus::Pending))
            .await
            .unwrap();

        let snapshot = store.load_all().await.unwrap();
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(store.record_count().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_refused() {
        let store = InMemoryStore::new();
        store
            .append_record(create_test_record("r_001", RecordStatus::Pending))
            .await
            .unwrap();
        let result = store
            .append_record(create_test_record("r_001", RecordStatus::Pending))
            .await;
        assert!(matches!(result, Err(LedgerError::InvalidRecord { .. })));
    }

    #[tokio::test]
    async fn test_set_status_only_from_pending() {
        let store = InMemoryStore::seeded(LedgerSnapshot {
            users: vec![],
            records: vec![create_test_record("r_001", RecordStatus::Pending)],
        });

        store.set_status("r_001", RecordStatus::Approved).await.unwrap();
        let snapshot = store.load_all().await.unwrap();
        assert_eq!(snapshot.records[0].status, RecordStatus::Approved);

        let result = store.set_status("r_001", RecordStatus::Rejected).await;
        assert!(matches!(result, Err(LedgerError::RecordFinalized { .. })));

        let result = store.set_status("r_404", RecordStatus::Approved).await;
        assert!(matches!(result, Err(LedgerError::RecordNotFound { .. })));
    }

    #[tokio::test]
    async fn test_unavailable_store_changes_nothing() {
        let store = InMemoryStore::new();
        store.set_unavailable(true).await;

        let result = store
            .append_record(create_test_record("r_001", RecordStatus::Pending))
            .await;
        match result {
            Err(err) => assert!(err.is_retryable()),
            Ok(_) => panic!("Expected PersistenceUnavailable"),
        }
        assert!(store.load_all().await.is_err());

        store.set_unavailable(false).await;
        assert_eq!(store.record_count().await, 0);
    }
}

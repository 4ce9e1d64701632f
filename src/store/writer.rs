//! Deadline-raced quote persistence.
//!
//! The insert is dispatched onto its own task so the caller can stop
//! waiting at the deadline instead of waiting out the driver's own
//! cancellation latency. An insert abandoned at the deadline keeps running
//! and may still land.

use std::time::Duration;

use crate::quote::QuoteRecord;
use crate::store::sqlite::{QuoteStore, StoreError};

/// Persist `record`, waiting at most `deadline` for the insert to land.
///
/// Returns `StoreError::DeadlineExceeded` when the timer wins the race.
/// The spawned insert is not cancelled; its eventual outcome is silent.
pub async fn persist(
    store: &QuoteStore,
    record: QuoteRecord,
    deadline: Duration,
) -> Result<(), StoreError> {
    let store = store.clone();
    let insert = tokio::spawn(async move { store.insert_quote(&record).await });

    match tokio::time::timeout(deadline, insert).await {
        Ok(joined) => joined?,
        Err(_) => Err(StoreError::DeadlineExceeded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;

    fn record_with_bid(bid: &str) -> QuoteRecord {
        let mut record = QuoteRecord::fallback();
        record.bid = bid.to_string();
        record
    }

    async fn temp_store(dir: &tempfile::TempDir) -> QuoteStore {
        let config = StorageConfig {
            path: dir.path().join("quotes.db").to_string_lossy().into_owned(),
            ..StorageConfig::default()
        };
        QuoteStore::connect(&config).await.unwrap()
    }

    #[tokio::test]
    async fn generous_deadline_persists_synchronously() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir).await;

        persist(&store, record_with_bid("5.55"), Duration::from_secs(5))
            .await
            .unwrap();

        let quotes = store.all_quotes().await.unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].bid, "5.55");
    }

    #[tokio::test]
    async fn expired_deadline_reports_timeout_but_the_write_still_lands() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir).await;

        let result = persist(&store, record_with_bid("5.55"), Duration::ZERO).await;
        assert!(matches!(result, Err(StoreError::DeadlineExceeded)));

        // The abandoned insert keeps running in the background.
        for _ in 0..100 {
            if !store.all_quotes().await.unwrap().is_empty() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("abandoned insert never landed");
    }
}

//! In-memory store of generated videos.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use vgen_models::VideoRecord;

use crate::metrics;

/// Number of records kept when not configured otherwise.
pub const DEFAULT_CAPACITY: usize = 50;

/// Bounded, most-recent-first list of generated videos.
///
/// Records are immutable once appended. Appending beyond capacity evicts
/// the oldest records. Contents live only as long as the process.
pub struct ResultStore {
    records: RwLock<VecDeque<Arc<VideoRecord>>>,
    capacity: usize,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: RwLock::new(VecDeque::with_capacity(capacity + 1)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insert a record at the front, evicting the oldest beyond capacity.
    pub async fn append(&self, record: VideoRecord) {
        let mut records = self.records.write().await;
        records.push_front(Arc::new(record));

        while records.len() > self.capacity {
            if let Some(evicted) = records.pop_back() {
                debug!(video_id = %evicted.id, "Evicted oldest video from store");
            }
        }

        metrics::set_stored_videos(records.len());
    }

    /// Current contents, most recent first.
    pub async fn list(&self) -> Vec<VideoRecord> {
        let records = self.records.read().await;
        records.iter().map(|r| VideoRecord::clone(r)).collect()
    }

    /// Look up a record by ID.
    pub async fn get(&self, id: &str) -> Option<VideoRecord> {
        let records = self.records.read().await;
        records
            .iter()
            .find(|r| r.id.as_str() == id)
            .map(|r| VideoRecord::clone(r))
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: usize) -> VideoRecord {
        VideoRecord::new(format!("topic {}", n), "mystery", "script", vec![])
    }

    #[tokio::test]
    async fn test_append_is_most_recent_first() {
        let store = ResultStore::new();
        store.append(record(1)).await;
        store.append(record(2)).await;

        let topics: Vec<_> = store.list().await.into_iter().map(|r| r.topic).collect();
        assert_eq!(topics, vec!["topic 2", "topic 1"]);
    }

    #[tokio::test]
    async fn test_51_appends_keep_latest_50() {
        let store = ResultStore::new();
        for n in 1..=51 {
            store.append(record(n)).await;
        }

        let records = store.list().await;
        assert_eq!(records.len(), 50);
        assert_eq!(records.first().unwrap().topic, "topic 51");
        assert_eq!(records.last().unwrap().topic, "topic 2");
        assert!(records.iter().all(|r| r.topic != "topic 1"));

        let expected: Vec<String> = (2..=51).rev().map(|n| format!("topic {}", n)).collect();
        let actual: Vec<String> = records.into_iter().map(|r| r.topic).collect();
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let store = ResultStore::with_capacity(2);
        let first = record(1);
        let first_id = first.id.clone();
        store.append(first).await;

        assert_eq!(store.get(first_id.as_str()).await.unwrap().topic, "topic 1");
        assert!(store.get("missing").await.is_none());

        store.append(record(2)).await;
        store.append(record(3)).await;
        assert!(store.get(first_id.as_str()).await.is_none());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let store = Arc::new(ResultStore::new());
        let mut handles = Vec::new();
        for n in 0..20 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move { store.append(record(n)).await }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.len().await, 20);
    }

    #[test]
    fn test_default_store() {
        let store = ResultStore::default();
        assert_eq!(store.capacity(), DEFAULT_CAPACITY);
        assert_eq!(tokio_test::block_on(store.len()), 0);
    }

    #[tokio::test]
    async fn test_zero_capacity_clamped() {
        let store = ResultStore::with_capacity(0);
        assert_eq!(store.capacity(), 1);
        assert!(store.is_empty().await);
    }
}

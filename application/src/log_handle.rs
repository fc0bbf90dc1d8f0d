//! Shared handle to the discussion log
//!
//! The log itself is a plain domain value; this handle is the single-writer
//! serialization boundary for the one global discussion that the HTTP and
//! WebSocket surfaces share. All appends go through the mutex, so sequence
//! numbers stay strictly increasing with no gaps no matter how many surfaces
//! are attached.

use roundtable_domain::{DiscussionEntry, DiscussionLog, Speaker};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Cloneable handle to one discussion's append-only log
#[derive(Debug, Clone, Default)]
pub struct SharedLog {
    inner: Arc<Mutex<DiscussionLog>>,
}

impl SharedLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an utterance, returning the committed entry
    pub async fn append(&self, speaker: Speaker, text: impl Into<String>) -> DiscussionEntry {
        self.inner.lock().await.append(speaker, text)
    }

    /// Point-in-time copy of the full ordered log
    pub async fn snapshot(&self) -> Vec<DiscussionEntry> {
        self.inner.lock().await.entries().to_vec()
    }

    /// Point-in-time copy of the log value, for prompt building
    pub async fn read(&self) -> DiscussionLog {
        self.inner.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_appends_serialize_across_clones() {
        let log = SharedLog::new();
        let mut handles = Vec::new();
        for i in 0..8 {
            let log = log.clone();
            handles.push(tokio::spawn(async move {
                log.append(Speaker::External, format!("msg {i}")).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let entries = log.snapshot().await;
        let sequences: Vec<u64> = entries.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, (0..8).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn test_snapshot_is_point_in_time() {
        let log = SharedLog::new();
        log.append(Speaker::External, "first").await;
        let snapshot = log.snapshot().await;
        log.append(Speaker::External, "second").await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.len().await, 2);
    }
}

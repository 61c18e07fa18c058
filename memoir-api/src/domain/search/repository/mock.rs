//! Mock record store for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use time::OffsetDateTime;

use crate::domain::models::{MemoryId, RecordingId, UserId};
use crate::domain::search::traits::{MemoryTitleSource, RecordingSource, Result, SearchError};
use crate::domain::search::types::Recording;

/// Failure the mock reports from `fetch_recordings_for_user`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFetchFailure {
    NotProvisioned,
    Unavailable,
}

/// Recording with the given transcript and empty defaults elsewhere.
pub fn recording_fixture(id: &str, transcript: &str, created_at: OffsetDateTime) -> Recording {
    Recording {
        id: RecordingId::new(id),
        session_id: Some(format!("session-{id}")),
        recording_type: "conversation".to_string(),
        storage_path: Some(format!("recordings/{id}.webm")),
        duration_seconds: Some(60),
        transcript_text: transcript.to_string(),
        conversation_summary: String::new(),
        linked_memory_ids: vec![],
        topics: vec![],
        session_mode: Some("guided".to_string()),
        created_at,
    }
}

/// In-memory record store with failure and latency injection.
///
/// # Examples
///
/// ```ignore
/// let store = MockRecordingStore::new()
///     .with_recordings("user-1", vec![recording])
///     .with_memory_title("mem-1", "Graduation Day");
/// ```
#[derive(Clone, Default)]
pub struct MockRecordingStore {
    recordings: Arc<RwLock<HashMap<UserId, Vec<Recording>>>>,
    titles: Arc<RwLock<HashMap<MemoryId, String>>>,
    failing_memories: Arc<RwLock<HashSet<MemoryId>>>,
    fetch_failure: Arc<RwLock<Option<MockFetchFailure>>>,
    title_delay: Arc<RwLock<Option<Duration>>>,
    fetch_calls: Arc<AtomicUsize>,
    title_calls: Arc<AtomicUsize>,
    titles_in_flight: Arc<AtomicUsize>,
    max_titles_in_flight: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockRecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add recordings owned by `user_id`.
    pub fn with_recordings(self, user_id: impl Into<UserId>, recordings: Vec<Recording>) -> Self {
        self.recordings
            .write()
            .unwrap()
            .entry(user_id.into())
            .or_default()
            .extend(recordings);
        self
    }

    /// Register the title of a memory.
    pub fn with_memory_title(self, memory_id: impl Into<MemoryId>, title: &str) -> Self {
        self.titles
            .write()
            .unwrap()
            .insert(memory_id.into(), title.to_string());
        self
    }

    /// Make every title lookup that includes `memory_id` fail.
    pub fn with_failing_memory(self, memory_id: impl Into<MemoryId>) -> Self {
        self.failing_memories
            .write()
            .unwrap()
            .insert(memory_id.into());
        self
    }

    /// Make candidate fetches fail.
    pub fn with_fetch_failure(self, failure: MockFetchFailure) -> Self {
        *self.fetch_failure.write().unwrap() = Some(failure);
        self
    }

    /// Delay every title lookup.
    pub fn with_title_delay(self, delay: Duration) -> Self {
        *self.title_delay.write().unwrap() = Some(delay);
        self
    }

    pub fn fetch_call_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn title_call_count(&self) -> usize {
        self.title_calls.load(Ordering::SeqCst)
    }

    /// Highest number of title lookups observed running at once.
    pub fn max_concurrent_title_calls(&self) -> usize {
        self.max_titles_in_flight.load(Ordering::SeqCst)
    }

    /// Title lookups currently running, including ones a caller abandoned.
    pub fn title_calls_in_flight(&self) -> usize {
        self.titles_in_flight.load(Ordering::SeqCst)
    }
}

/// Counts a running title lookup until dropped, so cancelled lookups are
/// released too.
struct InFlight {
    counter: Arc<AtomicUsize>,
    count: usize,
}

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        let count = counter.fetch_add(1, Ordering::SeqCst) + 1;
        Self {
            counter: Arc::clone(counter),
            count,
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecordingSource for MockRecordingStore {
    async fn fetch_recordings_for_user(&self, user_id: &UserId) -> Result<Vec<Recording>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        match *self.fetch_failure.read().unwrap() {
            Some(MockFetchFailure::NotProvisioned) => {
                return Err(SearchError::StorageNotProvisioned(
                    "relation \"voice_recordings\" does not exist".to_string(),
                ))
            }
            Some(MockFetchFailure::Unavailable) => {
                return Err(SearchError::Database("connection refused".to_string()))
            }
            None => {}
        }

        let mut recordings = self
            .recordings
            .read()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default();

        // Newest first, like the real store
        recordings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(recordings)
    }
}

#[async_trait]
impl MemoryTitleSource for MockRecordingStore {
    async fn fetch_memory_titles(&self, memory_ids: &[MemoryId]) -> Result<Vec<String>> {
        self.title_calls.fetch_add(1, Ordering::SeqCst);
        let in_flight = InFlight::enter(&self.titles_in_flight);
        self.max_titles_in_flight
            .fetch_max(in_flight.count, Ordering::SeqCst);

        let delay = *self.title_delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        drop(in_flight);

        let failing = self.failing_memories.read().unwrap();
        if let Some(id) = memory_ids.iter().find(|id| failing.contains(*id)) {
            return Err(SearchError::TitleLookup(format!("memory {id} unavailable")));
        }

        let titles = self.titles.read().unwrap();
        Ok(memory_ids
            .iter()
            .filter_map(|id| titles.get(id).cloned())
            .collect())
    }
}

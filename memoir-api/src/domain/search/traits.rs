//! Trait definitions for search domain abstractions.
//!
//! These traits enable dependency injection and easy testing through mocking.

use async_trait::async_trait;

use super::types::{EnrichedRecording, Recording, ScoredRecording};
use crate::domain::models::{MemoryId, UserId};

/// Postgres SQLSTATE for "relation does not exist".
const UNDEFINED_TABLE: &str = "42P01";

/// Error type for search operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The tables recordings live in have not been created yet.
    #[error("Recording storage is not provisioned: {0}")]
    StorageNotProvisioned(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Memory title lookup failed: {0}")]
    TitleLookup(String),

    #[error("Timed out after {0} ms")]
    Timeout(u64),
}

impl From<sqlx::Error> for SearchError {
    fn from(e: sqlx::Error) -> Self {
        let undefined_table = e
            .as_database_error()
            .and_then(|db| db.code())
            .is_some_and(|code| code == UNDEFINED_TABLE);

        if undefined_table {
            SearchError::StorageNotProvisioned(e.to_string())
        } else {
            SearchError::Database(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// Outbound port for loading a user's recordings.
#[async_trait]
pub trait RecordingSource: Send + Sync {
    /// Fetch every recording owned by the user, newest first.
    ///
    /// A failure here fails the whole search.
    async fn fetch_recordings_for_user(&self, user_id: &UserId) -> Result<Vec<Recording>>;
}

/// Outbound port for resolving linked memory titles.
#[async_trait]
pub trait MemoryTitleSource: Send + Sync {
    /// Titles for the given memory ids. Unknown ids are skipped.
    async fn fetch_memory_titles(&self, memory_ids: &[MemoryId]) -> Result<Vec<String>>;
}

/// Inbound port used by the HTTP layer.
#[async_trait]
pub trait RecordingSearch: Send + Sync + 'static {
    /// Rank the user's recordings against `query`.
    ///
    /// A missing `limit` falls back to the configured default; a given one is
    /// applied as is.
    async fn search(
        &self,
        user_id: &UserId,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ScoredRecording>>;

    /// Every recording of the user, enriched but unranked.
    async fn list_all(&self, user_id: &UserId) -> Result<Vec<EnrichedRecording>>;
}

//! PostgreSQL record store.
//!
//! Expects the application's existing tables:
//!
//! - `voice_recordings(id, user_id, session_id, recording_type, storage_path,
//!   duration_seconds, transcript_text, conversation_summary,
//!   linked_memory_ids, topics, session_mode, created_at)`
//! - `memories(id, title)`
//!
//! The search service never writes to either.

use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;

use crate::domain::models::{MemoryId, RecordingId, UserId};
use crate::domain::search::traits::{MemoryTitleSource, RecordingSource, Result, SearchError};
use crate::domain::search::types::Recording;

/// PostgreSQL-backed store for recordings and memory titles.
#[derive(Clone)]
pub struct PgRecordingStore {
    pool: PgPool,
}

impl PgRecordingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordingSource for PgRecordingStore {
    async fn fetch_recordings_for_user(&self, user_id: &UserId) -> Result<Vec<Recording>> {
        let rows = sqlx::query_as::<_, RecordingRow>(
            r#"
            SELECT
                id::text AS id,
                session_id::text AS session_id,
                recording_type,
                storage_path,
                duration_seconds,
                transcript_text,
                conversation_summary,
                linked_memory_ids::text[] AS linked_memory_ids,
                topics,
                session_mode,
                created_at
            FROM voice_recordings
            WHERE user_id::text = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Recording::from).collect())
    }
}

#[async_trait]
impl MemoryTitleSource for PgRecordingStore {
    async fn fetch_memory_titles(&self, memory_ids: &[MemoryId]) -> Result<Vec<String>> {
        if memory_ids.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<String> = memory_ids
            .iter()
            .map(|id| id.as_str().to_owned())
            .collect();
        let titles = sqlx::query_scalar::<_, String>(
            r#"
            SELECT title
            FROM memories
            WHERE id::text = ANY($1)
              AND title IS NOT NULL
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SearchError::TitleLookup(e.to_string()))?;

        Ok(titles)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RecordingRow {
    id: String,
    session_id: Option<String>,
    recording_type: Option<String>,
    storage_path: Option<String>,
    duration_seconds: Option<i32>,
    transcript_text: Option<String>,
    conversation_summary: Option<String>,
    linked_memory_ids: Option<Vec<String>>,
    topics: Option<Vec<String>>,
    session_mode: Option<String>,
    created_at: OffsetDateTime,
}

impl From<RecordingRow> for Recording {
    fn from(row: RecordingRow) -> Self {
        Recording {
            id: RecordingId::from(row.id),
            session_id: row.session_id,
            recording_type: row.recording_type.unwrap_or_else(|| "conversation".to_string()),
            storage_path: row.storage_path,
            duration_seconds: row.duration_seconds,
            transcript_text: row.transcript_text.unwrap_or_default(),
            conversation_summary: row.conversation_summary.unwrap_or_default(),
            linked_memory_ids: row
                .linked_memory_ids
                .unwrap_or_default()
                .into_iter()
                .map(MemoryId::from)
                .collect(),
            topics: row.topics.unwrap_or_default(),
            session_mode: row.session_mode,
            created_at: row.created_at,
        }
    }
}

//! Search service combining enrichment, matching and ranking.

use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tracing::{debug, instrument, trace};

use super::context::best_snippet;
use super::enricher::{EnricherConfig, RecordEnricher};
use super::matchers::RecordingMatches;
use super::parser::parse_query;
use super::scorer::{relevance_score, RELEVANCE_THRESHOLD};
use super::traits::{MemoryTitleSource, RecordingSearch, RecordingSource, Result};
use super::types::{EnrichedRecording, ScoredRecording};
use crate::domain::models::UserId;

/// Configuration for the search service.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of results returned when the caller gives no limit
    pub default_limit: usize,
    pub enrichment: EnricherConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            enrichment: EnricherConfig::default(),
        }
    }
}

/// Ranks a user's voice recordings against free-text queries.
///
/// Stateless apart from its injected collaborators; every call is a function
/// of its arguments, the store contents and the current time.
///
/// # Type Parameters
///
/// * `S` - RecordingSource implementation for loading candidates
/// * `T` - MemoryTitleSource implementation for enrichment
///
/// # Examples
///
/// ```ignore
/// let store = Arc::new(PgRecordingStore::new(pool));
/// let service = VoiceSearchService::new(store.clone(), store, SearchConfig::default());
/// let results = service.search(&user_id, "graduation", Some(10)).await?;
/// ```
pub struct VoiceSearchService<S, T>
where
    S: RecordingSource,
    T: MemoryTitleSource,
{
    recordings: Arc<S>,
    enricher: RecordEnricher<T>,
    config: SearchConfig,
}

impl<S, T> VoiceSearchService<S, T>
where
    S: RecordingSource,
    T: MemoryTitleSource,
{
    /// Create a new search service.
    pub fn new(recordings: Arc<S>, titles: Arc<T>, config: SearchConfig) -> Self {
        let enricher = RecordEnricher::new(titles, config.enrichment.clone());
        Self {
            recordings,
            enricher,
            config,
        }
    }

    /// Create a search service with default configuration.
    #[allow(dead_code)]
    pub fn with_defaults(recordings: Arc<S>, titles: Arc<T>) -> Self {
        Self::new(recordings, titles, SearchConfig::default())
    }

    fn effective_limit(&self, limit: Option<usize>) -> usize {
        limit.unwrap_or(self.config.default_limit)
    }

    async fn load_enriched(&self, user_id: &UserId) -> Result<Vec<EnrichedRecording>> {
        let recordings = self.recordings.fetch_recordings_for_user(user_id).await?;
        Ok(self.enricher.enrich(recordings).await)
    }
}

#[async_trait]
impl<S, T> RecordingSearch for VoiceSearchService<S, T>
where
    S: RecordingSource + 'static,
    T: MemoryTitleSource + 'static,
{
    /// Execute a search query.
    ///
    /// Returns recordings scoring above the relevance threshold, best first.
    /// Fails only when the candidate set itself cannot be loaded.
    #[instrument(skip(self))]
    async fn search(
        &self,
        user_id: &UserId,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ScoredRecording>> {
        let query = query.trim();
        let limit = self.effective_limit(limit);
        if query.is_empty() || limit == 0 {
            return Ok(vec![]);
        }

        let candidates = self.load_enriched(user_id).await?;
        let candidate_count = candidates.len();
        let results = rank(candidates, query, limit, OffsetDateTime::now_utc());

        debug!(
            candidates = candidate_count,
            results = results.len(),
            "Search completed"
        );

        Ok(results)
    }

    #[instrument(skip(self))]
    async fn list_all(&self, user_id: &UserId) -> Result<Vec<EnrichedRecording>> {
        self.load_enriched(user_id).await
    }
}

/// Score, filter, sort and truncate already enriched candidates.
///
/// Pure apart from `now`, which drives the recency bonus. Candidates with
/// equal scores keep their input order.
pub fn rank(
    candidates: Vec<EnrichedRecording>,
    query: &str,
    limit: usize,
    now: OffsetDateTime,
) -> Vec<ScoredRecording> {
    let parsed = parse_query(query);
    if candidates.is_empty() || parsed.is_empty() {
        return vec![];
    }

    let mut scored: Vec<ScoredRecording> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let content = candidate.searchable_content();
            let matches = RecordingMatches::collect(&candidate, &content, &parsed);
            let relevance_score = relevance_score(&matches, candidate.recording.created_at, now);
            trace!(
                recording_id = candidate.recording.id.as_str(),
                score = relevance_score,
                signals = ?matches.describe(),
                "Scored candidate"
            );

            if relevance_score <= RELEVANCE_THRESHOLD {
                return None;
            }

            Some(ScoredRecording {
                matched_content: best_snippet(&content, &parsed.raw),
                recording: candidate,
                relevance_score,
            })
        })
        .collect();

    // Stable: ties stay newest first
    scored.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    scored.truncate(limit);

    scored
}

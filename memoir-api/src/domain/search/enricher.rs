//! Resolves linked memory titles for recordings before matching.

use std::sync::Arc;
use std::time::Duration;

use futures::{stream, StreamExt};
use serde::Deserialize;
use strum::{Display, EnumString};
use tracing::warn;

use super::traits::{MemoryTitleSource, Result, SearchError};
use super::types::{EnrichedRecording, Recording};

/// What to do with a recording whose memory titles could not be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EnrichmentFailurePolicy {
    /// Keep the recording with no memory titles.
    #[default]
    Degrade,
    /// Leave the recording out of the result set.
    Exclude,
}

#[derive(Debug, Clone)]
pub struct EnricherConfig {
    /// Title lookups allowed in flight at once
    pub concurrency: usize,
    /// Upper bound for a single title lookup
    pub timeout: Duration,
    pub failure_policy: EnrichmentFailurePolicy,
}

impl Default for EnricherConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            timeout: Duration::from_secs(3),
            failure_policy: EnrichmentFailurePolicy::Degrade,
        }
    }
}

/// Augments recordings with their memory titles.
///
/// Lookups are independent, so they run concurrently up to
/// `config.concurrency`. Output keeps the input order. Dropping the returned
/// future abandons any lookups still in flight.
pub struct RecordEnricher<T: MemoryTitleSource> {
    titles: Arc<T>,
    config: EnricherConfig,
}

impl<T: MemoryTitleSource> RecordEnricher<T> {
    pub fn new(titles: Arc<T>, config: EnricherConfig) -> Self {
        Self { titles, config }
    }

    pub async fn enrich(&self, recordings: Vec<Recording>) -> Vec<EnrichedRecording> {
        let concurrency = self.config.concurrency.max(1);

        stream::iter(recordings)
            .map(|recording| enrich_one(Arc::clone(&self.titles), self.config.clone(), recording))
            .buffered(concurrency)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .flatten()
            .collect()
    }
}

async fn enrich_one<T: MemoryTitleSource>(
    titles: Arc<T>,
    config: EnricherConfig,
    recording: Recording,
) -> Option<EnrichedRecording> {
    if recording.linked_memory_ids.is_empty() {
        return Some(EnrichedRecording::new(recording, vec![]));
    }

    match resolve_titles(titles.as_ref(), &config, &recording).await {
        Ok(titles) => Some(EnrichedRecording::new(recording, titles)),
        Err(err) => {
            warn!(
                recording_id = recording.id.as_str(),
                error = %err,
                policy = %config.failure_policy,
                "Failed to resolve memory titles"
            );
            match config.failure_policy {
                EnrichmentFailurePolicy::Degrade => Some(EnrichedRecording::new(recording, vec![])),
                EnrichmentFailurePolicy::Exclude => None,
            }
        }
    }
}

async fn resolve_titles<T: MemoryTitleSource>(
    titles: &T,
    config: &EnricherConfig,
    recording: &Recording,
) -> Result<Vec<String>> {
    let lookup = titles.fetch_memory_titles(&recording.linked_memory_ids);

    tokio::time::timeout(config.timeout, lookup)
        .await
        .map_err(|_| SearchError::Timeout(config.timeout.as_millis() as u64))?
}

//! Core types for the recording search domain.

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::models::{MemoryId, RecordingId};

/// Score carried by an exact phrase match.
pub const EXACT_MATCH_SCORE: f64 = 1.0;
/// Score carried by each synonym-expanded term found in the content.
pub const SEMANTIC_TERM_SCORE: f64 = 0.8;
/// Score carried by each topic tag containing a query term.
pub const TOPIC_MATCH_SCORE: f64 = 0.7;
/// Score carried by each linked memory title containing a query term.
pub const MEMORY_TITLE_MATCH_SCORE: f64 = 0.9;

/// A voice conversation recording as stored by the record store.
///
/// Read-only for the search engine. The bookkeeping fields are passed
/// through to callers untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub id: RecordingId,
    pub session_id: Option<String>,
    /// e.g. "conversation", "memo"
    pub recording_type: String,
    /// Object storage path of the audio file
    pub storage_path: Option<String>,
    pub duration_seconds: Option<i32>,
    /// Full transcript, empty when transcription has not run
    pub transcript_text: String,
    pub conversation_summary: String,
    pub linked_memory_ids: Vec<MemoryId>,
    /// Topic tags in the order they were assigned
    pub topics: Vec<String>,
    pub session_mode: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A recording augmented with the titles of its linked memories.
///
/// Titles are resolved per search session and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecording {
    #[serde(flatten)]
    pub recording: Recording,
    pub memory_titles: Vec<String>,
}

impl EnrichedRecording {
    pub fn new(recording: Recording, memory_titles: Vec<String>) -> Self {
        Self {
            recording,
            memory_titles,
        }
    }

    /// Transcript, summary, topics and memory titles joined by single spaces.
    ///
    /// Empty parts are skipped so the content never starts or ends with a gap.
    pub fn searchable_content(&self) -> String {
        let recording = &self.recording;
        [
            recording.transcript_text.as_str(),
            recording.conversation_summary.as_str(),
        ]
        .into_iter()
        .chain(recording.topics.iter().map(String::as_str))
        .chain(self.memory_titles.iter().map(String::as_str))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// A search hit with its composite relevance and best excerpt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecording {
    #[serde(flatten)]
    pub recording: EnrichedRecording,
    /// Composite relevance in [0, 1]
    pub relevance_score: f64,
    /// Excerpt giving the best evidence for the match
    pub matched_content: String,
}

/// Signal family a match belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    Exact,
    Semantic,
    Topic,
    MemoryTitle,
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchKind::Exact => write!(f, "exact"),
            MatchKind::Semantic => write!(f, "semantic"),
            MatchKind::Topic => write!(f, "topic"),
            MatchKind::MemoryTitle => write!(f, "memory_title"),
        }
    }
}

/// One piece of evidence that a recording is relevant to a query.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchMatch {
    /// The whole query occurs verbatim; `context` is the window around it.
    Exact { context: String },
    /// A (possibly synonym-expanded) term occurs in the content.
    SemanticTerm { term: String },
    /// Share of expanded terms found, emitted once coverage passes 0.3.
    SemanticCoverage { matched: usize, total: usize },
    /// A topic tag contains a query term.
    Topic { topic: String },
    /// A linked memory title contains a query term.
    MemoryTitle { title: String },
}

impl SearchMatch {
    pub fn kind(&self) -> MatchKind {
        match self {
            SearchMatch::Exact { .. } => MatchKind::Exact,
            SearchMatch::SemanticTerm { .. } | SearchMatch::SemanticCoverage { .. } => {
                MatchKind::Semantic
            }
            SearchMatch::Topic { .. } => MatchKind::Topic,
            SearchMatch::MemoryTitle { .. } => MatchKind::MemoryTitle,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            SearchMatch::Exact { .. } => EXACT_MATCH_SCORE,
            SearchMatch::SemanticTerm { .. } => SEMANTIC_TERM_SCORE,
            SearchMatch::SemanticCoverage { matched, total } => {
                if *total == 0 {
                    0.0
                } else {
                    *matched as f64 / *total as f64 * SEMANTIC_TERM_SCORE
                }
            }
            SearchMatch::Topic { .. } => TOPIC_MATCH_SCORE,
            SearchMatch::MemoryTitle { .. } => MEMORY_TITLE_MATCH_SCORE,
        }
    }

    /// Human readable evidence: excerpt, term, tally, topic or title.
    pub fn content(&self) -> String {
        match self {
            SearchMatch::Exact { context } => context.clone(),
            SearchMatch::SemanticTerm { term } => term.clone(),
            SearchMatch::SemanticCoverage { matched, total } => {
                format!("Matched {matched}/{total} semantic terms")
            }
            SearchMatch::Topic { topic } => topic.clone(),
            SearchMatch::MemoryTitle { title } => title.clone(),
        }
    }
}

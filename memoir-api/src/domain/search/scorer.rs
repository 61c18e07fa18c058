//! Composite relevance scoring.
//!
//! A weighted, capped sum: one strong signal or several moderate ones can
//! each carry a recording past the threshold.

use time::OffsetDateTime;

use super::matchers::RecordingMatches;
use super::types::SearchMatch;

/// Flat contribution when the query occurs verbatim.
pub const EXACT_WEIGHT: f64 = 0.4;
pub const SEMANTIC_WEIGHT: f64 = 0.25;
pub const TOPIC_WEIGHT: f64 = 0.2;
pub const MEMORY_TITLE_WEIGHT: f64 = 0.15;
pub const RECENCY_WEIGHT: f64 = 0.05;

/// Recordings older than this earn no recency bonus.
pub const RECENCY_WINDOW_DAYS: f64 = 30.0;

/// Results must score strictly above this to be returned.
pub const RELEVANCE_THRESHOLD: f64 = 0.3;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Per-signal contributions to a recording's relevance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub exact: f64,
    pub semantic: f64,
    pub topic: f64,
    pub memory_title: f64,
    pub recency: f64,
}

impl ScoreBreakdown {
    pub fn compute(
        matches: &RecordingMatches,
        created_at: OffsetDateTime,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            exact: if matches.exact.is_empty() {
                0.0
            } else {
                EXACT_WEIGHT
            },
            semantic: max_score(&matches.semantic) * SEMANTIC_WEIGHT,
            topic: max_score(&matches.topic) * TOPIC_WEIGHT,
            memory_title: max_score(&matches.memory_title) * MEMORY_TITLE_WEIGHT,
            recency: recency_bonus(created_at, now),
        }
    }

    /// Sum of all contributions, clamped to [0, 1].
    pub fn total(&self) -> f64 {
        (self.exact + self.semantic + self.topic + self.memory_title + self.recency)
            .clamp(0.0, 1.0)
    }
}

/// Composite relevance of one recording in [0, 1].
pub fn relevance_score(
    matches: &RecordingMatches,
    created_at: OffsetDateTime,
    now: OffsetDateTime,
) -> f64 {
    ScoreBreakdown::compute(matches, created_at, now).total()
}

/// Linear bonus from [`RECENCY_WEIGHT`] for a brand new recording down to
/// zero at [`RECENCY_WINDOW_DAYS`]. Never negative and never above the weight,
/// even for timestamps in the future.
pub fn recency_bonus(created_at: OffsetDateTime, now: OffsetDateTime) -> f64 {
    let age_days = (now - created_at).as_seconds_f64() / SECONDS_PER_DAY;
    let factor = ((RECENCY_WINDOW_DAYS - age_days) / RECENCY_WINDOW_DAYS).clamp(0.0, 1.0);

    factor * RECENCY_WEIGHT
}

fn max_score(matches: &[SearchMatch]) -> f64 {
    matches.iter().map(SearchMatch::score).fold(0.0, f64::max)
}

//! Independent relevance signals.
//!
//! Every matcher is a pure function of the content and the parsed query. No
//! evidence means an empty vector, never an error.

use super::context::{extract_context, find_case_insensitive, DEFAULT_CONTEXT_WINDOW};
use super::parser::ParsedQuery;
use super::synonyms::expand_terms;
use super::types::{EnrichedRecording, SearchMatch};

/// Coverage of expanded terms that must be exceeded to emit a tally match.
pub const SEMANTIC_COVERAGE_THRESHOLD: f64 = 0.3;

/// Matches from every signal for a single recording.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingMatches {
    pub exact: Vec<SearchMatch>,
    pub semantic: Vec<SearchMatch>,
    pub topic: Vec<SearchMatch>,
    pub memory_title: Vec<SearchMatch>,
}

impl RecordingMatches {
    /// Run all four matchers. `content` is the recording's searchable content.
    pub fn collect(recording: &EnrichedRecording, content: &str, query: &ParsedQuery) -> Self {
        Self {
            exact: exact_matches(content, query),
            semantic: semantic_matches(content, query),
            topic: topic_matches(&recording.recording.topics, query),
            memory_title: memory_title_matches(&recording.memory_titles, query),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SearchMatch> {
        self.exact
            .iter()
            .chain(&self.semantic)
            .chain(&self.topic)
            .chain(&self.memory_title)
    }

    /// `kind: content` for every match, for diagnostics.
    pub fn describe(&self) -> Vec<String> {
        self.iter()
            .map(|m| format!("{}: {}", m.kind(), m.content()))
            .collect()
    }
}

/// One match when the whole query occurs in `content`, ignoring case.
///
/// Both sides are folded character by character in [`find_case_insensitive`],
/// so identical text always matches.
pub fn exact_matches(content: &str, query: &ParsedQuery) -> Vec<SearchMatch> {
    if query.is_empty() {
        return vec![];
    }

    match find_case_insensitive(content, &query.raw) {
        Some((offset, len)) => vec![SearchMatch::Exact {
            context: extract_context(content, offset, len, DEFAULT_CONTEXT_WINDOW),
        }],
        None => vec![],
    }
}

/// Synonym-expanded term overlap.
///
/// Emits one match per expanded term found in `content`, followed by a
/// coverage tally when more than [`SEMANTIC_COVERAGE_THRESHOLD`] of the
/// expanded terms were found.
pub fn semantic_matches(content: &str, query: &ParsedQuery) -> Vec<SearchMatch> {
    let expanded = expand_terms(&query.semantic_terms);
    if expanded.is_empty() || content.is_empty() {
        return vec![];
    }

    let content = content.to_lowercase();
    let mut matches: Vec<SearchMatch> = expanded
        .iter()
        .filter(|term| content.contains(term.as_str()))
        .map(|term| SearchMatch::SemanticTerm { term: term.clone() })
        .collect();

    let matched = matches.len();
    let total = expanded.len();
    if matched as f64 / total as f64 > SEMANTIC_COVERAGE_THRESHOLD {
        matches.push(SearchMatch::SemanticCoverage { matched, total });
    }

    matches
}

/// One match per (topic, query term) pair where the topic contains the term.
pub fn topic_matches(topics: &[String], query: &ParsedQuery) -> Vec<SearchMatch> {
    contained_terms(topics, &query.terms)
        .map(|topic| SearchMatch::Topic {
            topic: topic.to_string(),
        })
        .collect()
}

/// One match per (title, query term) pair where the title contains the term.
pub fn memory_title_matches(titles: &[String], query: &ParsedQuery) -> Vec<SearchMatch> {
    contained_terms(titles, &query.terms)
        .map(|title| SearchMatch::MemoryTitle {
            title: title.to_string(),
        })
        .collect()
}

/// Yields each label once for every term it contains, without deduplication.
fn contained_terms<'a>(
    labels: &'a [String],
    terms: &'a [String],
) -> impl Iterator<Item = &'a str> + 'a {
    labels.iter().flat_map(move |label| {
        let lowered = label.to_lowercase();
        terms
            .iter()
            .filter(move |term| lowered.contains(term.as_str()))
            .map(move |_| label.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::parser::parse_query;
    use crate::domain::search::types::MatchKind;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_match_found_case_insensitively() {
        let content = "We visited Chicago Booth for graduation in 2015";
        let matches = exact_matches(content, &parse_query("chicago BOOTH"));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].kind(), MatchKind::Exact);
        assert_eq!(matches[0].score(), 1.0);
        assert_eq!(matches[0].content(), content);
    }

    #[test]
    fn exact_match_folds_non_ascii_case_like_the_snippet() {
        // Whole-string lower-casing turns a final capital sigma into 'ς'
        let content = "Η ΟΔΟΣ προς το σπίτι";
        let query = parse_query("ΟΔΟΣ");

        let matches = exact_matches(content, &query);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].content(), content);
        assert_eq!(exact_matches("η οδοσ", &query).len(), 1);
    }

    #[test]
    fn exact_match_absent_yields_nothing() {
        assert!(exact_matches("birthday party", &parse_query("astrophysics")).is_empty());
    }

    #[test]
    fn exact_match_ignores_empty_query() {
        assert!(exact_matches("anything at all", &parse_query("  ")).is_empty());
    }

    #[test]
    fn semantic_finds_synonyms_without_literal_term() {
        let content = "The commencement ceremony was long";
        let matches = semantic_matches(content, &parse_query("graduation"));

        let terms: Vec<String> = matches
            .iter()
            .filter(|m| matches!(m, SearchMatch::SemanticTerm { .. }))
            .map(SearchMatch::content)
            .collect();
        assert_eq!(terms, vec!["ceremony", "commencement"]);

        // 2 of 6 expanded terms is above the 0.3 coverage bar
        let coverage = matches.last().unwrap();
        assert_eq!(
            *coverage,
            SearchMatch::SemanticCoverage {
                matched: 2,
                total: 6
            }
        );
        assert!((coverage.score() - 2.0 / 6.0 * 0.8).abs() < 1e-9);
        assert_eq!(coverage.content(), "Matched 2/6 semantic terms");
    }

    #[test]
    fn semantic_skips_tally_at_low_coverage() {
        // 1 of 6 expanded terms
        let matches = semantic_matches("got my diploma", &parse_query("graduation"));
        assert_eq!(
            matches,
            vec![SearchMatch::SemanticTerm {
                term: "diploma".to_string()
            }]
        );
    }

    #[test]
    fn semantic_ignores_short_terms() {
        assert!(semantic_matches("we at it", &parse_query("at it")).is_empty());
    }

    #[test]
    fn semantic_empty_content_yields_nothing() {
        assert!(semantic_matches("", &parse_query("graduation")).is_empty());
    }

    #[test]
    fn topic_matches_every_term_topic_pair() {
        let topics = strings(&["Family Reunion", "Travel", "family dinner"]);
        let matches = topic_matches(&topics, &parse_query("family reunion"));
        let found: Vec<String> = matches.iter().map(SearchMatch::content).collect();
        assert_eq!(
            found,
            vec!["Family Reunion", "Family Reunion", "family dinner"]
        );
        assert!(matches.iter().all(|m| m.score() == 0.7));
    }

    #[test]
    fn topic_matches_short_terms_too() {
        let topics = strings(&["Road trip to NY"]);
        assert_eq!(topic_matches(&topics, &parse_query("ny")).len(), 1);
    }

    #[test]
    fn memory_title_matches_substrings() {
        let titles = strings(&["Graduation Day 2015", "First job"]);
        let matches = memory_title_matches(&titles, &parse_query("graduation"));
        assert_eq!(
            matches,
            vec![SearchMatch::MemoryTitle {
                title: "Graduation Day 2015".to_string()
            }]
        );
        assert_eq!(matches[0].score(), 0.9);
    }

    #[test]
    fn collect_gathers_every_signal() {
        let mut recording = crate::domain::search::repository::recording_fixture(
            "r1",
            "graduation ceremony",
            time::OffsetDateTime::UNIX_EPOCH,
        );
        recording.topics = strings(&["Graduation"]);
        let enriched = EnrichedRecording::new(recording, strings(&["Graduation Day"]));
        let content = enriched.searchable_content();

        let matches = RecordingMatches::collect(&enriched, &content, &parse_query("graduation"));

        assert_eq!(matches.exact.len(), 1);
        assert_eq!(matches.topic.len(), 1);
        assert_eq!(matches.memory_title.len(), 1);
        let described = matches.describe();
        assert!(described.contains(&"topic: Graduation".to_string()));
        assert!(described.contains(&"memory_title: Graduation Day".to_string()));
        assert!(described.contains(&"semantic: ceremony".to_string()));
    }

    #[test]
    fn empty_lists_yield_nothing() {
        let query = parse_query("anything");
        assert!(topic_matches(&[], &query).is_empty());
        assert!(memory_title_matches(&[], &query).is_empty());
        assert!(topic_matches(&strings(&["x"]), &parse_query("")).is_empty());
    }
}

//! Query normalisation shared by all matchers.
//!
//! A query is lower-cased and split once per search so each matcher sees the
//! same view of it.

/// Minimum character count (exclusive) for a term to be synonym-expanded.
const MIN_SEMANTIC_TERM_CHARS: usize = 2;

/// A query prepared for matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Input with surrounding whitespace removed, used for exact phrase matching
    pub raw: String,
    /// Whitespace-split lower-cased terms, used for topic and title matching
    pub terms: Vec<String>,
    /// Terms longer than two characters, fed to synonym expansion
    pub semantic_terms: Vec<String>,
}

impl ParsedQuery {
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Parse a raw user query.
///
/// # Examples
///
/// ```ignore
/// let parsed = parse_query("  My Graduation day ");
/// assert_eq!(parsed.terms, vec!["my", "graduation", "day"]);
/// assert_eq!(parsed.semantic_terms, vec!["graduation", "day"]);
/// ```
pub fn parse_query(query: &str) -> ParsedQuery {
    let raw = query.trim().to_string();
    let lowered = raw.to_lowercase();

    let terms: Vec<String> = lowered.split_whitespace().map(str::to_string).collect();

    let semantic_terms = terms
        .iter()
        .filter(|term| term.chars().count() > MIN_SEMANTIC_TERM_CHARS)
        .cloned()
        .collect();

    ParsedQuery {
        raw,
        terms,
        semantic_terms,
    }
}

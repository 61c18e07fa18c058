//! Static thesaurus used to widen query terms.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Canonical term → synonyms, grouped by life domain.
///
/// Extend by adding rows; matcher code never branches on specific words.
const THESAURUS: &[(&str, &[&str])] = &[
    // Education
    (
        "graduation",
        &["graduated", "degree", "diploma", "ceremony", "commencement"],
    ),
    ("school", &["class", "teacher", "student", "campus", "education"]),
    ("college", &["university", "campus", "degree", "semester", "dorm"]),
    ("university", &["college", "campus", "degree", "professor"]),
    ("study", &["studied", "learning", "exam", "homework", "course"]),
    ("teacher", &["professor", "instructor", "mentor", "tutor"]),
    // Family
    ("family", &["parents", "siblings", "relatives", "children", "home"]),
    ("mother", &["mom", "mum", "mama", "mommy"]),
    ("father", &["dad", "papa", "daddy"]),
    ("parents", &["mother", "father", "mom", "dad"]),
    ("children", &["kids", "son", "daughter", "baby"]),
    ("wedding", &["marriage", "married", "bride", "groom", "vows"]),
    ("grandparents", &["grandmother", "grandfather", "grandma", "grandpa"]),
    // Work
    ("work", &["job", "career", "office", "colleague", "boss"]),
    ("job", &["work", "career", "position", "employer"]),
    ("career", &["job", "profession", "promotion", "work"]),
    ("business", &["company", "startup", "entrepreneur", "founded"]),
    ("retirement", &["retired", "pension", "retire"]),
    // Travel
    ("travel", &["trip", "journey", "vacation", "abroad", "flight"]),
    ("vacation", &["holiday", "trip", "getaway", "beach"]),
    ("trip", &["travel", "journey", "visit", "vacation"]),
    ("moved", &["relocated", "moving", "new home", "emigrated"]),
    // Emotion
    ("happy", &["joy", "joyful", "glad", "excited", "delighted"]),
    ("sad", &["grief", "unhappy", "tears", "cried", "loss"]),
    ("love", &["loved", "romance", "affection", "sweetheart"]),
    ("proud", &["pride", "accomplished", "achievement"]),
    ("scared", &["afraid", "fear", "frightened", "nervous"]),
    ("funny", &["laughed", "hilarious", "joke", "laughing"]),
];

static SYNONYMS: LazyLock<HashMap<&'static str, &'static [&'static str]>> =
    LazyLock::new(|| THESAURUS.iter().copied().collect());

/// Synonyms registered for `term`, empty when the term is unknown.
pub fn synonyms_for(term: &str) -> &'static [&'static str] {
    SYNONYMS.get(term).copied().unwrap_or(&[])
}

/// Expand lower-cased terms with every registered synonym.
///
/// Returns the input terms plus their synonyms with duplicates removed,
/// first occurrence wins.
pub fn expand_terms<S: AsRef<str>>(terms: &[S]) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    for term in terms {
        let term = term.as_ref();
        let candidates = std::iter::once(term).chain(synonyms_for(term).iter().copied());

        for candidate in candidates {
            if seen.insert(candidate.to_string()) {
                out.push(candidate.to_string());
            }
        }
    }

    out
}

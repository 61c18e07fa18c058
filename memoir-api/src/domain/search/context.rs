//! Excerpt extraction around matches.
//!
//! All offsets and lengths are in characters so excerpts never split a
//! multi-byte character.

/// Characters kept on each side of a match by default.
pub const DEFAULT_CONTEXT_WINDOW: usize = 100;
/// Characters kept on each side of the match for a result's best snippet.
pub const SNIPPET_CONTEXT_WINDOW: usize = 80;
/// Length of the leading excerpt used when nothing was located.
pub const FALLBACK_EXCERPT_CHARS: usize = 100;

const ELLIPSIS: &str = "...";

/// Locate `needle` in `content` ignoring case.
///
/// Returns the character offset and character length of the first
/// occurrence, measured in `content`'s original characters.
pub fn find_case_insensitive(content: &str, needle: &str) -> Option<(usize, usize)> {
    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return None;
    }

    // Lower-casing can expand one character into several; `origin` maps each
    // folded character back to the character it came from.
    let mut folded = Vec::with_capacity(content.len());
    let mut origin = Vec::with_capacity(content.len());
    for (index, ch) in content.chars().enumerate() {
        for lower in ch.to_lowercase() {
            folded.push(lower);
            origin.push(index);
        }
    }

    let start = folded
        .windows(needle.len())
        .position(|window| window == needle.as_slice())?;
    let first = origin[start];
    let last = origin[start + needle.len() - 1];

    Some((first, last - first + 1))
}

/// Excerpt of up to `window` characters either side of a match.
///
/// Prefixed with `...` unless it starts at the beginning of `content`, and
/// suffixed with `...` unless it reaches the end.
pub fn extract_context(content: &str, offset: usize, match_len: usize, window: usize) -> String {
    let chars: Vec<char> = content.chars().collect();
    let offset = offset.min(chars.len());
    let start = offset.saturating_sub(window);
    let end = offset
        .saturating_add(match_len)
        .saturating_add(window)
        .min(chars.len());

    let mut excerpt = String::with_capacity(end - start + 2 * ELLIPSIS.len());
    if start > 0 {
        excerpt.push_str(ELLIPSIS);
    }
    excerpt.extend(&chars[start..end]);
    if end < chars.len() {
        excerpt.push_str(ELLIPSIS);
    }

    excerpt
}

/// First [`FALLBACK_EXCERPT_CHARS`] characters, with `...` when truncated.
pub fn leading_excerpt(content: &str) -> String {
    match content.char_indices().nth(FALLBACK_EXCERPT_CHARS) {
        Some((byte_index, _)) => format!("{}{ELLIPSIS}", &content[..byte_index]),
        None => content.to_string(),
    }
}

/// The excerpt shown for a search hit.
///
/// Centres on the first occurrence of the query when there is one,
/// otherwise falls back to the start of the content.
pub fn best_snippet(content: &str, query: &str) -> String {
    match find_case_insensitive(content, query) {
        Some((offset, len)) => extract_context(content, offset, len, SNIPPET_CONTEXT_WINDOW),
        None => leading_excerpt(content),
    }
}

//! Small text helpers shared by the tolerance checks, the reference resolver
//! and the lexical similarity fallback.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

lazy_static! {
    static ref TOKEN_REGEX: Regex =
        Regex::new(r"[\p{L}\p{N}]+(?:'[\p{L}\p{N}]+)*").unwrap();
}

/// Lowercase text and fold typographic apostrophes into ASCII ones.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}

/// Find the byte offset of the first whole-word occurrence of `needle`.
///
/// Both arguments are expected to be normalized already. A match must not be
/// glued to a letter, digit, underscore or apostrophe on either side, so
/// `"no"` is not found in `"know"` and `"not"` is not found in `"cannot"`.
pub fn find_word(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }

    let mut from = 0;
    while let Some(offset) = haystack[from..].find(needle) {
        let start = from + offset;
        let end = start + needle.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
            return Some(start);
        }
        // Step one char so overlapping candidates are still considered
        from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

/// Whether `needle` occurs in `haystack` as a whole word.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    find_word(haystack, needle).is_some()
}

/// Split normalized text into its set of word tokens.
pub fn token_set(text: &str) -> BTreeSet<String> {
    TOKEN_REGEX
        .find_iter(&normalize(text))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Token-set overlap ratio (Jaccard index) between two texts.
///
/// Returns 0.0 when either side has no tokens. This is a heuristic stand-in
/// for embedding similarity and only meaningful against a tuned threshold.
pub fn token_overlap(a: &str, b: &str) -> f64 {
    let left = token_set(a);
    let right = token_set(b);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let shared = left.intersection(&right).count();
    let union = left.union(&right).count();
    shared as f64 / union as f64
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

// Term extraction for lexical similarity.
//
// Lowercases, splits on anything that isn't a letter or digit (apostrophes
// inside a word are kept, so "don't" stays one term), and drops English stop
// words. When a text is made entirely of stop words we keep them rather than
// return nothing, so short function-word phrases still compare to themselves.

use std::collections::HashSet;
use std::sync::OnceLock;

use stop_words::{get, LANGUAGE};

fn stop_words() -> &'static HashSet<String> {
    static STOP_WORDS: OnceLock<HashSet<String>> = OnceLock::new();
    STOP_WORDS.get_or_init(|| get(LANGUAGE::English).into_iter().collect())
}

/// Split text into lowercase word terms, keeping stop words.
pub fn raw_terms(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|word| word.trim_matches('\''))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract the terms used for weighting.
///
/// Stop words are removed unless that would leave no terms at all.
pub fn terms(text: &str) -> Vec<String> {
    let raw = raw_terms(text);
    let stop = stop_words();
    let content: Vec<String> = raw.iter().filter(|t| !stop.contains(*t)).cloned().collect();

    if content.is_empty() {
        raw
    } else {
        content
    }
}

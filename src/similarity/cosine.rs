// Cosine similarity between two TF-IDF term vectors.
//
//   cos(a, b) = dot(a, b) / (|a| * |b|)
//
// All weights are non-negative, so the result lies in [0, 1]. A zero norm on
// either side means there is nothing to compare and the score is 0.0. Keys
// are visited in sorted order so the sums are identical for (a, b) and (b, a).

use std::collections::BTreeSet;

use super::tfidf::{self, TermVector};

/// Compute cosine similarity from two sparse weight maps.
pub fn cosine_from_weights(weights_a: &TermVector, weights_b: &TermVector) -> f64 {
    let all_keys: BTreeSet<&String> = weights_a.keys().chain(weights_b.keys()).collect();

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for key in all_keys {
        let a = weights_a.get(key).copied().unwrap_or(0.0);
        let b = weights_b.get(key).copied().unwrap_or(0.0);
        dot += a * b;
        norm_a += a * a;
        norm_b += b * b;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let score = dot / (norm_a.sqrt() * norm_b.sqrt());
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Lexical similarity of two texts, from 0.0 (nothing shared) to 1.0.
///
/// The two texts form their own two-document corpus for IDF weighting.
pub fn similarity(a: &str, b: &str) -> f64 {
    let (weights_a, weights_b) = tfidf::vectorize_pair(a, b);
    cosine_from_weights(&weights_a, &weights_b)
}

// Pairwise TF-IDF weighting.
//
// The corpus is only ever the two texts being compared. A term shared by both
// documents gets a damped IDF, a term unique to one document gets the full
// IDF. Weights are:
//
//   tf(t, d)  = number of times t occurs in d
//   idf(t)    = 1 + ln(N / (1 + df(t)))      with N = 2
//   w(t, d)   = tf(t, d) * idf(t)
//
// With N = 2 a shared term weighs ~0.595 per occurrence and a unique term 1.0,
// so every present term has a positive weight and weights grow with tf.

use std::collections::{HashMap, HashSet};

use crate::text::tokenize;

/// Sparse term -> weight map for one document.
pub type TermVector = HashMap<String, f64>;

/// Count how often each term occurs.
fn term_frequencies(terms: &[String]) -> HashMap<&str, u32> {
    let mut counts = HashMap::new();
    for term in terms {
        *counts.entry(term.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Inverse document frequency over a corpus of `corpus_size` documents.
pub fn idf(document_frequency: usize, corpus_size: usize) -> f64 {
    1.0 + (corpus_size as f64 / (1.0 + document_frequency as f64)).ln()
}

/// Build the TF-IDF vectors for a pair of texts, treating the pair as the
/// whole corpus.
pub fn vectorize_pair(a: &str, b: &str) -> (TermVector, TermVector) {
    let terms_a = tokenize::terms(a);
    let terms_b = tokenize::terms(b);
    let tf_a = term_frequencies(&terms_a);
    let tf_b = term_frequencies(&terms_b);

    let vocabulary: HashSet<&str> = tf_a.keys().chain(tf_b.keys()).copied().collect();

    let mut vec_a = TermVector::new();
    let mut vec_b = TermVector::new();

    for term in vocabulary {
        let in_a = tf_a.get(term).copied().unwrap_or(0);
        let in_b = tf_b.get(term).copied().unwrap_or(0);
        let df = usize::from(in_a > 0) + usize::from(in_b > 0);
        let weight = idf(df, 2);

        if in_a > 0 {
            vec_a.insert(term.to_string(), in_a as f64 * weight);
        }
        if in_b > 0 {
            vec_b.insert(term.to_string(), in_b as f64 * weight);
        }
    }

    (vec_a, vec_b)
}

// Lexical similarity — pairwise TF-IDF vectors compared by cosine.

pub mod cosine;
pub mod tfidf;

pub use cosine::similarity;

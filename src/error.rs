// Error taxonomy for a plagiarism check.
//
// Only CheckError crosses the library boundary. RetrievalError describes a
// single failed search call; the pipeline logs it and carries on as if that
// sentence had no matches.

use std::time::Duration;

use thiserror::Error;

/// Errors returned by `Checker::check`.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Text missing or shorter than the minimum length. Never retried.
    #[error("{0}")]
    InvalidInput(String),

    /// Unexpected failure while scoring or aggregating.
    #[error("internal error: {0}")]
    Internal(String),
}

/// A failed or unusable response from the search provider for one sentence.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("search API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed search response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("search timed out after {0:?}")]
    Timeout(Duration),

    #[error("search unavailable: {0}")]
    Unavailable(String),
}

// Match retriever trait — the swap-ready abstraction over web search.
//
// The pipeline only needs "give me ranked snippets for this sentence", so any
// keyword search provider can sit behind this trait. Tests plug in canned
// retrievers without touching the network.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RetrievalError;

/// One search hit for a sentence, in the provider's rank order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Short excerpt of the matching page
    pub snippet: String,
    pub title: Option<String>,
    pub link: Option<String>,
}

impl MatchCandidate {
    /// A candidate with a snippet and no source metadata.
    pub fn from_snippet(snippet: impl Into<String>) -> Self {
        Self {
            snippet: snippet.into(),
            title: None,
            link: None,
        }
    }
}

/// Trait for finding web pages that contain a sentence.
/// Implementations must be async because providers are remote HTTP APIs.
#[async_trait]
pub trait MatchRetriever: Send + Sync {
    /// Return up to `limit` candidates for `sentence`, best first.
    /// An empty vector means the provider found nothing.
    async fn retrieve(
        &self,
        sentence: &str,
        limit: usize,
    ) -> Result<Vec<MatchCandidate>, RetrievalError>;
}

/// Retriever used when no search provider is configured.
/// Every call fails, so each sentence degrades to "no candidates".
pub struct NoopRetriever;

#[async_trait]
impl MatchRetriever for NoopRetriever {
    async fn retrieve(
        &self,
        _sentence: &str,
        _limit: usize,
    ) -> Result<Vec<MatchCandidate>, RetrievalError> {
        Err(RetrievalError::Unavailable(
            "no search provider configured".to_string(),
        ))
    }
}

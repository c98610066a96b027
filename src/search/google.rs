// Google Custom Search JSON API implementation.
//
// One GET per sentence: the sentence is the query, `cx` selects the search
// engine scope and `num` caps how many results come back. The response is a
// JSON object whose optional `items` array holds the ranked hits.
//
// API docs: https://developers.google.com/custom-search/v1/reference/rest/v1/cse/list

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::traits::{MatchCandidate, MatchRetriever};
use crate::error::RetrievalError;
use crate::output::truncate_chars;

/// Default endpoint for the Custom Search JSON API.
pub const DEFAULT_SEARCH_API_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// The API rejects `num` outside 1..=10.
const MAX_RESULTS_PER_QUERY: usize = 10;

/// Custom Search retriever.
pub struct GoogleSearchRetriever {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    engine_id: String,
}

impl GoogleSearchRetriever {
    /// Create a retriever for the given endpoint and credentials.
    ///
    /// `timeout` bounds each HTTP request end to end.
    pub fn new(base_url: &str, api_key: &str, engine_id: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("plagcheck/0.1")
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            engine_id: engine_id.to_string(),
        })
    }
}

#[async_trait]
impl MatchRetriever for GoogleSearchRetriever {
    async fn retrieve(
        &self,
        sentence: &str,
        limit: usize,
    ) -> Result<Vec<MatchCandidate>, RetrievalError> {
        let num = limit.clamp(1, MAX_RESULTS_PER_QUERY).to_string();

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", sentence),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RetrievalError::Status {
                status: status.as_u16(),
                body: truncate_chars(&body, 200),
            });
        }

        let candidates = parse_search_response(&body)?;

        debug!(
            candidates = candidates.len(),
            query_preview = truncate_chars(sentence, 50),
            "Search returned"
        );

        Ok(candidates.into_iter().take(limit).collect())
    }
}

/// Parse a Custom Search response body into ranked candidates.
///
/// A missing `items` array means no results. Items without a usable snippet
/// can't be scored and are skipped.
pub fn parse_search_response(body: &str) -> Result<Vec<MatchCandidate>, RetrievalError> {
    let response: SearchResponse = serde_json::from_str(body)?;

    Ok(response
        .items
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| {
            let snippet = item.snippet?.trim().to_string();
            if snippet.is_empty() {
                return None;
            }
            Some(MatchCandidate {
                snippet,
                title: item.title,
                link: item.link,
            })
        })
        .collect())
}

// --- Custom Search response types ---

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub snippet: Option<String>,
}

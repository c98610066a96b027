use std::env;
use std::time::Duration;

use anyhow::Result;
use tracing::warn;

use crate::scoring::aggregate::DenominatorPolicy;
use crate::search::google::DEFAULT_SEARCH_API_URL;

/// Inputs shorter than this many characters are rejected before any search.
pub const MIN_TEXT_CHARS: usize = 30;

/// Knobs that shape a single check. Cost controls (sentence cap, candidates
/// per sentence) live here rather than in the pipeline so they can be tuned
/// from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckSettings {
    /// Only the first N sentences are searched (default 5)
    pub max_sentences: usize,
    /// How many top-ranked search results are compared per sentence (default 1)
    pub candidates_per_sentence: usize,
    pub denominator: DenominatorPolicy,
    /// Upper bound on one search call
    pub retrieval_timeout: Duration,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            max_sentences: 5,
            candidates_per_sentence: 1,
            denominator: DenominatorPolicy::Checked,
            retrieval_timeout: Duration::from_secs(10),
        }
    }
}

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    pub search_api_key: String,
    /// Custom Search engine id (`cx`), which scopes the searched sites
    pub search_engine_id: String,
    pub search_api_url: String,
    pub port: u16,
    pub bind: String,
    pub check: CheckSettings,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default except the search credentials, which are
    /// only checked by `require_search`.
    pub fn load() -> Result<Self> {
        let defaults = CheckSettings::default();

        let denominator = match env::var("PLAGCHECK_DENOMINATOR") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.denominator,
        };

        let check = CheckSettings {
            max_sentences: parse_var("PLAGCHECK_MAX_SENTENCES", defaults.max_sentences).max(1),
            candidates_per_sentence: parse_var(
                "PLAGCHECK_CANDIDATES_PER_SENTENCE",
                defaults.candidates_per_sentence,
            )
            .max(1),
            denominator,
            retrieval_timeout: Duration::from_secs(parse_var(
                "PLAGCHECK_SEARCH_TIMEOUT_SECS",
                defaults.retrieval_timeout.as_secs(),
            )
            .max(1)),
        };

        Ok(Self {
            search_api_key: env::var("GOOGLE_API_KEY").unwrap_or_default(),
            search_engine_id: env::var("GOOGLE_CSE_ID").unwrap_or_default(),
            search_api_url: env::var("SEARCH_API_URL")
                .unwrap_or_else(|_| DEFAULT_SEARCH_API_URL.to_string()),
            port: parse_var("PORT", 3000),
            bind: env::var("PLAGCHECK_BIND").unwrap_or_else(|_| "0.0.0.0".to_string()),
            check,
        })
    }

    /// Check that the search API credentials are configured.
    /// Call this before building a retriever.
    pub fn require_search(&self) -> Result<()> {
        if self.search_api_key.is_empty() || self.search_engine_id.is_empty() {
            anyhow::bail!(
                "GOOGLE_API_KEY and GOOGLE_CSE_ID must both be set. Add them to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}

/// Read and parse an env var, falling back to `default` when it is unset or
/// doesn't parse.
fn parse_var<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(var = name, value = %raw, "Ignoring unparsable setting, using default");
            default
        }),
        Err(_) => default,
    }
}

// Plagiarism check pipeline: segment -> search + score per sentence -> aggregate.
//
// This is the end-to-end workflow behind both `plagcheck check` and
// POST /check. Given a text, it:
// 1. Rejects input shorter than MIN_TEXT_CHARS
// 2. Splits the text into sentences and keeps the first `max_sentences`
// 3. Searches each sentence concurrently, each call under its own timeout
// 4. Scores the sentence against its top-ranked snippet(s)
// 5. Reassembles results in sentence order and aggregates a percentage
//
// A failed search never fails the check: that sentence just has no match.
// The Checker holds no per-request state, so one instance serves every
// request concurrently.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use futures::FutureExt;
use tracing::{debug, info, warn};

use crate::config::{CheckSettings, MIN_TEXT_CHARS};
use crate::error::{CheckError, RetrievalError};
use crate::models::{CheckResult, SentenceResult};
use crate::output::truncate_chars;
use crate::scoring::aggregate::aggregate;
use crate::search::traits::{MatchCandidate, MatchRetriever};
use crate::similarity::similarity;
use crate::text::segment::segment;

/// Runs plagiarism checks against a search provider.
pub struct Checker {
    retriever: Arc<dyn MatchRetriever>,
    settings: CheckSettings,
}

impl Checker {
    pub fn new(retriever: Arc<dyn MatchRetriever>, settings: CheckSettings) -> Self {
        Self {
            retriever,
            settings,
        }
    }

    pub fn settings(&self) -> &CheckSettings {
        &self.settings
    }

    /// Check a text that may be absent (e.g. a missing JSON field).
    pub async fn check_optional(&self, text: Option<&str>) -> Result<CheckResult, CheckError> {
        let text = validate_text(text)?;
        self.check(text).await
    }

    /// Estimate how much of `text` appears on the web.
    ///
    /// Fails with `InvalidInput` before any search when the text is too short.
    pub async fn check(&self, text: &str) -> Result<CheckResult, CheckError> {
        validate_text(Some(text))?;

        // Owned, so the per-sentence futures hold no borrow of `text`
        let sentences: Vec<(usize, String)> = segment(text)
            .into_iter()
            .take(self.settings.max_sentences)
            .map(str::to_string)
            .enumerate()
            .collect();
        let total_sentences = sentences.len();

        let mut outcomes: Vec<(usize, Result<Option<SentenceResult>, ()>)> =
            stream::iter(sentences)
                .map(|(index, sentence)| async move {
                    let outcome = AssertUnwindSafe(self.check_sentence(index, &sentence))
                        .catch_unwind()
                        .await
                        .map_err(|_| ());
                    (index, outcome)
                })
                .buffer_unordered(total_sentences.max(1))
                .collect()
                .await;

        // Completion order is arbitrary; restore sentence order
        outcomes.sort_by_key(|(index, _)| *index);

        let mut sources = Vec::with_capacity(outcomes.len());
        for (index, outcome) in outcomes {
            match outcome {
                Ok(Some(result)) => sources.push(result),
                Ok(None) => {}
                Err(()) => {
                    return Err(CheckError::Internal(format!(
                        "scoring sentence {index} panicked"
                    )));
                }
            }
        }

        let scores: Vec<f64> = sources.iter().map(|s| s.score).collect();
        let (plagiarism, level) = aggregate(&scores, total_sentences, self.settings.denominator)
            .ok_or_else(|| CheckError::Internal("aggregate score is not a number".to_string()))?;

        info!(
            plagiarism,
            level = level.as_str(),
            sentences = total_sentences,
            matched = sources.len(),
            "Checked text"
        );

        Ok(CheckResult {
            plagiarism,
            level,
            total_sentences,
            sources,
        })
    }

    /// Search one sentence and score it against the returned snippets.
    ///
    /// Returns `None` when the search failed, timed out, or found nothing.
    async fn check_sentence(&self, index: usize, sentence: &str) -> Option<SentenceResult> {
        let limit = self.settings.candidates_per_sentence;
        let timeout = self.settings.retrieval_timeout;

        let retrieved = match tokio::time::timeout(timeout, self.retriever.retrieve(sentence, limit))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(RetrievalError::Timeout(timeout)),
        };

        let candidates = match retrieved {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(
                    error = %e,
                    sentence = index,
                    "Search failed, treating sentence as unmatched"
                );
                return None;
            }
        };

        let (candidate, score) = best_candidate(sentence, candidates.into_iter().take(limit))?;

        debug!(
            sentence = index,
            score = format!("{:.3}", score),
            preview = truncate_chars(sentence, 50),
            "Scored sentence"
        );

        Some(SentenceResult {
            index,
            sentence: sentence.to_string(),
            candidate,
            score,
        })
    }
}

/// Reject absent text and text below the minimum length.
pub fn validate_text(text: Option<&str>) -> Result<&str, CheckError> {
    match text {
        Some(t) if t.chars().count() >= MIN_TEXT_CHARS => Ok(t),
        Some(_) => Err(CheckError::InvalidInput(format!(
            "Text is too short: at least {MIN_TEXT_CHARS} characters are required"
        ))),
        None => Err(CheckError::InvalidInput("Text is required".to_string())),
    }
}

/// Pick the highest-scoring candidate. Ties go to the better-ranked one.
fn best_candidate(
    sentence: &str,
    candidates: impl Iterator<Item = MatchCandidate>,
) -> Option<(MatchCandidate, f64)> {
    candidates
        .map(|candidate| {
            let score = similarity(sentence, &candidate.snippet);
            (candidate, score)
        })
        .fold(None, |best: Option<(MatchCandidate, f64)>, (candidate, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((candidate, score)),
        })
}

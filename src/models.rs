// Data models — the values a check produces.
//
// Everything here lives for a single request. Nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::search::traits::MatchCandidate;

/// Qualitative risk bucket for a plagiarism percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Safe,
    Medium,
    High,
}

impl RiskLevel {
    /// Classify a percentage (0-100). Boundaries belong to the lower tier:
    /// 15 is Safe, 40 is Medium.
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            p if p > 40 => RiskLevel::High,
            p if p > 15 => RiskLevel::Medium,
            _ => RiskLevel::Safe,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "Safe",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The best match found for one sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceResult {
    /// Position of the sentence in the segmented input
    pub index: usize,
    pub sentence: String,
    pub candidate: MatchCandidate,
    /// Similarity between sentence and candidate snippet, 0.0 to 1.0
    pub score: f64,
}

/// Outcome of a whole-document check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Aggregated plagiarism percentage, 0-100
    pub plagiarism: u8,
    pub level: RiskLevel,
    /// Sentences sent to the search provider (after the sentence cap)
    pub total_sentences: usize,
    /// One entry per sentence that produced at least one candidate, in
    /// sentence order
    pub sources: Vec<SentenceResult>,
}

impl CheckResult {
    /// Number of sentences that produced a candidate.
    pub fn checked_sentences(&self) -> usize {
        self.sources.len()
    }
}

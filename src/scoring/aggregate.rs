// Document-level aggregation of per-sentence scores.
//
// The percentage is the mean best-match similarity scaled to 0-100. Which
// sentences count toward the mean is an explicit policy choice:
//
//   Checked: only sentences that produced a search candidate
//   Total:   every sentence sent to the search provider
//
// The two differ whenever some sentences find nothing on the web. Rounding is
// half away from zero (f64::round), i.e. half-up for these non-negative values.

use std::str::FromStr;

use crate::models::RiskLevel;

/// Which sentences form the denominator of the average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DenominatorPolicy {
    /// Divide by the number of sentences with at least one candidate
    #[default]
    Checked,
    /// Divide by the number of sentences considered, matched or not
    Total,
}

impl FromStr for DenominatorPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "checked" => Ok(DenominatorPolicy::Checked),
            "total" => Ok(DenominatorPolicy::Total),
            other => anyhow::bail!("unknown denominator policy '{other}' (expected 'checked' or 'total')"),
        }
    }
}

/// Combine per-sentence scores into a percentage and risk level.
///
/// `scores` holds one score per sentence that produced a candidate;
/// `total_sentences` is how many sentences were considered in all.
/// Returns `None` only if the scores are not finite numbers.
pub fn aggregate(
    scores: &[f64],
    total_sentences: usize,
    policy: DenominatorPolicy,
) -> Option<(u8, RiskLevel)> {
    let denominator = match policy {
        DenominatorPolicy::Checked => scores.len(),
        DenominatorPolicy::Total => total_sentences.max(scores.len()),
    };

    if denominator == 0 {
        return Some((0, RiskLevel::Safe));
    }

    let sum: f64 = scores.iter().sum();
    if !sum.is_finite() {
        return None;
    }

    let percent = (100.0 * sum / denominator as f64).min(100.0).round();
    let percent = percent.clamp(0.0, 100.0) as u8;
    Some((percent, RiskLevel::from_percent(percent)))
}

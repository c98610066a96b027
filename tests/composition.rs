// Composition tests — the full check pipeline with canned retrievers.
//
// These tests exercise the data flow between modules:
//   Segmenter -> Retriever -> Similarity -> Aggregator
// without any network calls. Each retriever below stands in for the web
// search provider with a fixed behavior (echo, empty, failing, slow, ...).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use plagcheck::config::CheckSettings;
use plagcheck::error::{CheckError, RetrievalError};
use plagcheck::models::RiskLevel;
use plagcheck::pipeline::Checker;
use plagcheck::scoring::aggregate::DenominatorPolicy;
use plagcheck::search::traits::{MatchCandidate, MatchRetriever, NoopRetriever};

const SIX_SENTENCES: &str = "Zebras graze on the open savanna. \
    Penguins huddle together for warmth. \
    Volcanoes erupt molten rock and ash. \
    Glaciers carve deep valleys slowly. \
    Honeybees pollinate flowering orchard trees. \
    Octopuses change color to hide.";

const FIVE_SENTENCES: &str = "Zebras graze on the open savanna. \
    Penguins huddle together for warmth. \
    Volcanoes erupt molten rock and ash. \
    Glaciers carve deep valleys slowly. \
    Honeybees pollinate flowering orchard trees.";

// ============================================================
// Canned retrievers
// ============================================================

/// Returns the sentence itself as the top snippet and counts calls.
#[derive(Default)]
struct EchoRetriever {
    calls: AtomicUsize,
}

#[async_trait]
impl MatchRetriever for EchoRetriever {
    async fn retrieve(
        &self,
        sentence: &str,
        _limit: usize,
    ) -> Result<Vec<MatchCandidate>, RetrievalError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![MatchCandidate {
            snippet: sentence.to_string(),
            title: Some(format!("Source {n}")),
            link: Some(format!("https://example.com/{n}")),
        }])
    }
}

/// Finds nothing for any sentence.
struct EmptyRetriever;

#[async_trait]
impl MatchRetriever for EmptyRetriever {
    async fn retrieve(
        &self,
        _sentence: &str,
        _limit: usize,
    ) -> Result<Vec<MatchCandidate>, RetrievalError> {
        Ok(vec![])
    }
}

/// Fails for sentences containing any of the given words, echoes the rest.
struct FlakyRetriever {
    fail_on: Vec<&'static str>,
}

#[async_trait]
impl MatchRetriever for FlakyRetriever {
    async fn retrieve(
        &self,
        sentence: &str,
        _limit: usize,
    ) -> Result<Vec<MatchCandidate>, RetrievalError> {
        if self.fail_on.iter().any(|w| sentence.contains(w)) {
            return Err(RetrievalError::Status {
                status: 503,
                body: "backend unavailable".to_string(),
            });
        }
        Ok(vec![MatchCandidate::from_snippet(sentence)])
    }
}

/// Earlier sentences answer later, so completion order is reversed.
struct ReverseOrderRetriever;

#[async_trait]
impl MatchRetriever for ReverseOrderRetriever {
    async fn retrieve(
        &self,
        sentence: &str,
        _limit: usize,
    ) -> Result<Vec<MatchCandidate>, RetrievalError> {
        let delay = match sentence.split_whitespace().next() {
            Some("Zebras") => 120,
            Some("Penguins") => 90,
            Some("Volcanoes") => 60,
            Some("Glaciers") => 30,
            _ => 0,
        };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(vec![MatchCandidate::from_snippet(sentence)])
    }
}

/// Never answers within any reasonable timeout.
struct HangingRetriever;

#[async_trait]
impl MatchRetriever for HangingRetriever {
    async fn retrieve(
        &self,
        _sentence: &str,
        _limit: usize,
    ) -> Result<Vec<MatchCandidate>, RetrievalError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(vec![])
    }
}

/// Returns several ranked candidates; the best match is ranked second.
struct RankedRetriever;

#[async_trait]
impl MatchRetriever for RankedRetriever {
    async fn retrieve(
        &self,
        sentence: &str,
        limit: usize,
    ) -> Result<Vec<MatchCandidate>, RetrievalError> {
        let candidates = vec![
            MatchCandidate {
                snippet: "walrus colonies bask on arctic ice floes".to_string(),
                title: Some("unrelated".to_string()),
                link: None,
            },
            MatchCandidate {
                snippet: sentence.to_string(),
                title: Some("exact".to_string()),
                link: None,
            },
        ];
        Ok(candidates.into_iter().take(limit).collect())
    }
}

/// Panics inside the retrieval task.
struct PanickingRetriever;

#[async_trait]
impl MatchRetriever for PanickingRetriever {
    async fn retrieve(
        &self,
        _sentence: &str,
        _limit: usize,
    ) -> Result<Vec<MatchCandidate>, RetrievalError> {
        panic!("retriever exploded");
    }
}

fn checker(retriever: Arc<dyn MatchRetriever>) -> Checker {
    Checker::new(retriever, CheckSettings::default())
}

// ============================================================
// Input validation
// ============================================================

#[tokio::test]
async fn text_of_29_chars_is_rejected_without_searching() {
    let echo = Arc::new(EchoRetriever::default());
    let checker = checker(echo.clone());

    let text = "Twenty-nine characters long!!";
    assert_eq!(text.chars().count(), 29);

    let err = checker.check(text).await.unwrap_err();
    assert!(matches!(err, CheckError::InvalidInput(_)));
    assert_eq!(echo.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn absent_text_is_rejected_without_searching() {
    let echo = Arc::new(EchoRetriever::default());
    let checker = checker(echo.clone());

    let err = checker.check_optional(None).await.unwrap_err();
    assert!(matches!(err, CheckError::InvalidInput(_)));
    assert_eq!(echo.calls.load(Ordering::SeqCst), 0);
}

// ============================================================
// End-to-end scoring
// ============================================================

#[tokio::test]
async fn verbatim_copy_scores_hundred_and_high() {
    let checker = checker(Arc::new(EchoRetriever::default()));
    let result = checker.check(FIVE_SENTENCES).await.unwrap();

    assert_eq!(result.plagiarism, 100);
    assert_eq!(result.level, RiskLevel::High);
    assert_eq!(result.total_sentences, 5);
    assert_eq!(result.checked_sentences(), 5);
}

#[tokio::test]
async fn single_sentence_text_is_checked() {
    let checker = checker(Arc::new(EchoRetriever::default()));
    let result = checker
        .check("A single sentence that is comfortably long enough")
        .await
        .unwrap();

    assert_eq!(result.total_sentences, 1);
    assert_eq!(result.plagiarism, 100);
}

#[tokio::test]
async fn no_results_anywhere_scores_zero_and_safe() {
    let checker = checker(Arc::new(EmptyRetriever));
    let result = checker.check(FIVE_SENTENCES).await.unwrap();

    assert_eq!(result.plagiarism, 0);
    assert_eq!(result.level, RiskLevel::Safe);
    assert!(result.sources.is_empty());
    assert_eq!(result.total_sentences, 5);
}

#[tokio::test]
async fn unconfigured_search_degrades_to_zero() {
    let checker = checker(Arc::new(NoopRetriever));
    let result = checker.check(FIVE_SENTENCES).await.unwrap();

    assert_eq!(result.plagiarism, 0);
    assert_eq!(result.level, RiskLevel::Safe);
}

// ============================================================
// Sentence cap
// ============================================================

#[tokio::test]
async fn at_most_five_sentences_are_searched() {
    let echo = Arc::new(EchoRetriever::default());
    let checker = checker(echo.clone());

    let result = checker.check(SIX_SENTENCES).await.unwrap();

    assert_eq!(echo.calls.load(Ordering::SeqCst), 5);
    assert_eq!(result.total_sentences, 5);
    assert!(result
        .sources
        .iter()
        .all(|s| !s.sentence.starts_with("Octopuses")));
}

#[tokio::test]
async fn sentence_cap_is_configurable() {
    let echo = Arc::new(EchoRetriever::default());
    let settings = CheckSettings {
        max_sentences: 2,
        ..CheckSettings::default()
    };
    let checker = Checker::new(echo.clone(), settings);

    let result = checker.check(SIX_SENTENCES).await.unwrap();

    assert_eq!(echo.calls.load(Ordering::SeqCst), 2);
    assert_eq!(result.total_sentences, 2);
}

// ============================================================
// Partial failures and denominator policies
// ============================================================

#[tokio::test]
async fn failed_searches_are_absorbed() {
    let retriever = Arc::new(FlakyRetriever {
        fail_on: vec!["Penguins", "Glaciers"],
    });
    let checker = checker(retriever);

    let result = checker.check(FIVE_SENTENCES).await.unwrap();

    // Checked policy: 3 matched sentences, each a verbatim copy
    assert_eq!(result.checked_sentences(), 3);
    assert_eq!(result.total_sentences, 5);
    assert_eq!(result.plagiarism, 100);
    assert_eq!(result.level, RiskLevel::High);
}

#[tokio::test]
async fn total_policy_counts_failed_sentences() {
    let retriever = Arc::new(FlakyRetriever {
        fail_on: vec!["Penguins", "Glaciers"],
    });
    let settings = CheckSettings {
        denominator: DenominatorPolicy::Total,
        ..CheckSettings::default()
    };
    let checker = Checker::new(retriever, settings);

    let result = checker.check(FIVE_SENTENCES).await.unwrap();

    // 3 of 5 sentences at 1.0
    assert_eq!(result.plagiarism, 60);
    assert_eq!(result.level, RiskLevel::High);
}

#[tokio::test]
async fn every_search_failing_still_succeeds() {
    let retriever = Arc::new(FlakyRetriever {
        fail_on: vec![" "],
    });
    let checker = checker(retriever);

    let result = checker.check(FIVE_SENTENCES).await.unwrap();
    assert_eq!(result.plagiarism, 0);
    assert_eq!(result.level, RiskLevel::Safe);
}

#[tokio::test]
async fn slow_search_times_out_as_unmatched() {
    let settings = CheckSettings {
        retrieval_timeout: Duration::from_millis(50),
        ..CheckSettings::default()
    };
    let checker = Checker::new(Arc::new(HangingRetriever), settings);

    let started = std::time::Instant::now();
    let result = checker.check(FIVE_SENTENCES).await.unwrap();

    assert_eq!(result.plagiarism, 0);
    assert!(result.sources.is_empty());
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "timeouts should run concurrently, took {:?}",
        started.elapsed()
    );
}

// ============================================================
// Ordering and candidate selection
// ============================================================

#[tokio::test]
async fn results_keep_sentence_order() {
    let checker = checker(Arc::new(ReverseOrderRetriever));
    let result = checker.check(FIVE_SENTENCES).await.unwrap();

    let indexes: Vec<usize> = result.sources.iter().map(|s| s.index).collect();
    assert_eq!(indexes, vec![0, 1, 2, 3, 4]);
    assert!(result.sources[0].sentence.starts_with("Zebras"));
    assert!(result.sources[4].sentence.starts_with("Honeybees"));
}

#[tokio::test]
async fn only_top_candidate_is_scored_by_default() {
    let checker = checker(Arc::new(RankedRetriever));
    let result = checker.check(FIVE_SENTENCES).await.unwrap();

    assert!(result
        .sources
        .iter()
        .all(|s| s.candidate.title.as_deref() == Some("unrelated")));
    assert_eq!(result.plagiarism, 0);
}

#[tokio::test]
async fn wider_candidate_window_picks_best_match() {
    let settings = CheckSettings {
        candidates_per_sentence: 2,
        ..CheckSettings::default()
    };
    let checker = Checker::new(Arc::new(RankedRetriever), settings);
    let result = checker.check(FIVE_SENTENCES).await.unwrap();

    assert!(result
        .sources
        .iter()
        .all(|s| s.candidate.title.as_deref() == Some("exact")));
    assert_eq!(result.plagiarism, 100);
}

#[tokio::test]
async fn sources_carry_title_and_link() {
    let checker = checker(Arc::new(EchoRetriever::default()));
    let result = checker.check(FIVE_SENTENCES).await.unwrap();

    for source in &result.sources {
        assert!(source.candidate.title.is_some());
        assert!(source
            .candidate
            .link
            .as_deref()
            .is_some_and(|l| l.starts_with("https://example.com/")));
        assert!((source.score - 1.0).abs() < 1e-9);
    }
}

// ============================================================
// Internal failures
// ============================================================

#[tokio::test]
async fn panicking_retriever_is_an_internal_error() {
    let checker = checker(Arc::new(PanickingRetriever));
    let err = checker.check(FIVE_SENTENCES).await.unwrap_err();
    assert!(matches!(err, CheckError::Internal(_)));
}

// ============================================================
// Running inside spawned tasks
// ============================================================

#[tokio::test]
async fn check_runs_on_a_spawned_task() {
    let checker = Arc::new(checker(Arc::new(EchoRetriever::default())));
    let text = FIVE_SENTENCES.to_string();

    let handle = tokio::spawn({
        let checker = Arc::clone(&checker);
        async move { checker.check(&text).await }
    });
    let result = handle.await.unwrap().unwrap();

    assert_eq!(result.plagiarism, 100);
    assert_eq!(result.checked_sentences(), 5);
}

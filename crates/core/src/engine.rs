//! Comparison engine that orchestrates classification and diffing
//!
//! A comparison moves through [`ComparisonStage`]s: both documents are
//! classified (`Extracting`), then either compared (`Comparing` → `Done`) or
//! stopped early because a document is image-based or has no text.

use log::{debug, warn};

use crate::algorithm::{self, DiffAlgorithm};
use crate::classifier::{DocumentAnalysis, PageClassifier};
use crate::config::CompareConfig;
use crate::diff::{diff_chars, diff_sentences, diff_words, DiffScript};
use crate::error::{CompareError, Result};
use crate::metrics::{
    bounded_levenshtein, jaccard, levenshtein_similarity, percentage, word_set, SetOverlap,
};
use crate::ngrams::common_phrases;
use crate::result::{
    ChangeSummary, ComparisonOutcome, ComparisonResult, ComparisonStage, EmptyInput, OcrRequired,
    ResultParts, SimilarityScores,
};
use crate::source::PageSource;
use crate::tokenizers::{tokenize_sentences, tokenize_words};

/// The main comparison engine
#[derive(Debug, Clone)]
pub struct ComparisonEngine {
    config: CompareConfig,
    classifier: PageClassifier,
}

impl ComparisonEngine {
    /// Create an engine with the given configuration
    pub fn new(config: CompareConfig) -> Self {
        let classifier = PageClassifier::new(&config);
        Self { config, classifier }
    }

    /// Create an engine after validating the configuration
    pub fn try_new(config: CompareConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    pub fn classifier(&self) -> &PageClassifier {
        &self.classifier
    }

    /// Compare two documents given as page texts
    pub fn compare<L, R, SL, SR>(&self, left_pages: L, right_pages: R) -> ComparisonOutcome
    where
        L: IntoIterator<Item = SL> + Send,
        R: IntoIterator<Item = SR> + Send,
        SL: Into<String>,
        SR: Into<String>,
    {
        self.compare_named("left", left_pages, "right", right_pages)
    }

    /// Compare two named documents given as page texts
    pub fn compare_named<L, R, SL, SR>(
        &self,
        left_name: &str,
        left_pages: L,
        right_name: &str,
        right_pages: R,
    ) -> ComparisonOutcome
    where
        L: IntoIterator<Item = SL> + Send,
        R: IntoIterator<Item = SR> + Send,
        SL: Into<String>,
        SR: Into<String>,
    {
        debug!("{} vs {}: {}", left_name, right_name, ComparisonStage::Extracting);

        let (left, right) = join(
            self.config.parallel,
            || self.classifier.analyze(left_name, left_pages),
            || self.classifier.analyze(right_name, right_pages),
        );

        self.compare_analyses(&left, &right)
    }

    /// Extract and compare two documents.
    ///
    /// Extraction failures are returned as [`CompareError::Extraction`]
    /// naming the document that failed.
    pub fn compare_sources(&self, left: &dyn PageSource, right: &dyn PageSource) -> Result<ComparisonOutcome> {
        debug!("{} vs {}: {}", left.name(), right.name(), ComparisonStage::Extracting);

        let (left_pages, right_pages) = join(self.config.parallel, || extract(left), || extract(right));
        let (left_pages, right_pages) = (left_pages?, right_pages?);

        let (left_analysis, right_analysis) = join(
            self.config.parallel,
            || self.classifier.analyze(left.name(), left_pages),
            || self.classifier.analyze(right.name(), right_pages),
        );

        Ok(self.compare_analyses(&left_analysis, &right_analysis))
    }

    /// Decide the outcome for two classified documents
    pub fn compare_analyses(&self, left: &DocumentAnalysis, right: &DocumentAnalysis) -> ComparisonOutcome {
        if left.is_empty() || right.is_empty() {
            return self.finish(empty_input(left, right));
        }

        if left.is_image_based() || right.is_image_based() {
            return self.finish(ComparisonOutcome::OcrRequired(OcrRequired {
                left_is_image_based: left.is_image_based(),
                right_is_image_based: right.is_image_based(),
                left_analysis: left.clone(),
                right_analysis: right.clone(),
            }));
        }

        if left.has_no_content() || right.has_no_content() {
            return self.finish(empty_input(left, right));
        }

        match self.compare_texts(&left.normalized_text, &right.normalized_text) {
            Some(result) => self.finish(ComparisonOutcome::Compared(Box::new(result))),
            None => self.finish(empty_input(left, right)),
        }
    }

    /// Compare two normalized texts.
    ///
    /// Returns `None` when either text is blank.
    pub fn compare_texts(&self, left: &str, right: &str) -> Option<ComparisonResult> {
        if left.trim().is_empty() || right.trim().is_empty() {
            return None;
        }

        debug!("{}", ComparisonStage::Comparing);

        let left = left.to_lowercase();
        let right = right.to_lowercase();
        let algorithm = algorithm::from_config(&self.config);
        let algorithm = algorithm.as_ref();
        let parallel = self.config.parallel;

        let ((word_diff, sentence_diff), ((char_diff, stats), distance)) = join(
            parallel,
            || {
                join(
                    parallel,
                    || diff_words(algorithm, &left, &right),
                    || {
                        let left_sentences = tokenize_sentences(&left);
                        let right_sentences = tokenize_sentences(&right);
                        diff_sentences(algorithm, &left_sentences, &right_sentences)
                    },
                )
            },
            || {
                join(
                    parallel,
                    || {
                        join(
                            parallel,
                            || self.char_diff(algorithm, &left, &right),
                            || self.word_stats(&left, &right),
                        )
                    },
                    || bounded_levenshtein(&left, &right, self.config.levenshtein_cell_limit),
                )
            },
        );

        let similarity = self.similarity(&left, &right, stats.jaccard, distance);
        let changes = change_summary(&word_diff);

        debug!(
            "similarity {}% (jaccard {}%), {} word diff segments, {} sentence diff segments",
            similarity.overall,
            similarity.jaccard,
            word_diff.len(),
            sentence_diff.len()
        );

        Some(ComparisonResult::assemble(ResultParts {
            similarity,
            changes,
            common_word_count: stats.overlap.common,
            unique_words_left: stats.overlap.unique_left,
            unique_words_right: stats.overlap.unique_right,
            common_phrases: stats.common_phrases,
            word_diff: word_diff.truncated(self.config.word_diff_limit),
            sentence_diff: sentence_diff.truncated(self.config.sentence_diff_limit),
            char_diff,
        }))
    }

    fn char_diff(&self, algorithm: &dyn DiffAlgorithm, left: &str, right: &str) -> Option<DiffScript> {
        if !self.config.compute_char_diff {
            return None;
        }

        let max_len = self.config.char_diff_max_len;
        let (left_len, right_len) = (left.chars().count(), right.chars().count());
        if left_len > max_len || right_len > max_len {
            warn!(
                "skipping character diff: {} / {} chars exceeds limit of {}",
                left_len, right_len, max_len
            );
            return None;
        }

        Some(diff_chars(algorithm, left, right).truncated(self.config.char_diff_limit))
    }

    fn word_stats(&self, left: &str, right: &str) -> WordStats {
        let left_words = tokenize_words(left);
        let right_words = tokenize_words(right);

        let left_set = word_set(&left_words, self.config.min_word_length);
        let right_set = word_set(&right_words, self.config.min_word_length);

        WordStats {
            jaccard: jaccard(&left_set, &right_set),
            overlap: SetOverlap::of(&left_set, &right_set),
            common_phrases: common_phrases(
                &left_words,
                &right_words,
                self.config.ngram_size,
                self.config.max_common_phrases,
            ),
        }
    }

    /// `jaccard` is the unrounded percentage; scores are rounded once, when stored
    fn similarity(&self, left: &str, right: &str, jaccard: f64, distance: Option<usize>) -> SimilarityScores {
        let levenshtein = match distance {
            Some(distance) => Some(levenshtein_similarity(
                distance,
                left.chars().count(),
                right.chars().count(),
            )),
            None => {
                warn!(
                    "skipping Levenshtein: input exceeds {} matrix cells, overall falls back to Jaccard",
                    self.config.levenshtein_cell_limit
                );
                None
            }
        };

        let overall = match levenshtein {
            Some(levenshtein) => (jaccard + f64::from(levenshtein)) / 2.0,
            None => jaccard,
        };

        SimilarityScores {
            jaccard: jaccard.round() as u32,
            levenshtein,
            overall: overall.round() as u32,
        }
    }

    fn finish(&self, outcome: ComparisonOutcome) -> ComparisonOutcome {
        debug!("{}", outcome.stage());
        outcome
    }
}

impl Default for ComparisonEngine {
    fn default() -> Self {
        Self::new(CompareConfig::default())
    }
}

/// Word-level statistics of a pair of texts
struct WordStats {
    jaccard: f64,
    overlap: SetOverlap,
    common_phrases: Vec<String>,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn extract(source: &dyn PageSource) -> Result<Vec<String>> {
    source.page_texts().map_err(|source_error| CompareError::Extraction {
        document: source.name().to_string(),
        source: source_error,
    })
}

fn empty_input(left: &DocumentAnalysis, right: &DocumentAnalysis) -> ComparisonOutcome {
    ComparisonOutcome::EmptyInput(EmptyInput {
        left_empty: left.has_no_content(),
        right_empty: right.has_no_content(),
    })
}

fn change_summary(word_diff: &DiffScript) -> ChangeSummary {
    let counts = word_diff.word_counts();
    let changed = counts.added + counts.removed;

    ChangeSummary {
        added: counts.added,
        removed: counts.removed,
        unchanged: counts.unchanged,
        change_percentage: percentage(changed, changed + counts.unchanged),
    }
}

/// Run both closures, on two threads when `parallel` is set.
///
/// A panic in the spawned closure is resumed on the calling thread.
fn join<A, B, RA, RB>(parallel: bool, a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    if !parallel {
        return (a(), b());
    }

    std::thread::scope(|scope| {
        let handle = scope.spawn(b);
        let ra = a();
        match handle.join() {
            Ok(rb) => (ra, rb),
            Err(payload) => std::panic::resume_unwind(payload),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::SegmentKind;
    use proptest::prelude::*;

    const LEFT: &str = "The quick brown fox jumps over the lazy dog near the river bank today.";
    const RIGHT: &str = "The slow brown fox jumps over the lazy dog near the river bank today.";

    #[test]
    fn test_compare_texts_single_word_edit() {
        let engine = ComparisonEngine::default();
        let result = engine.compare_texts("the quick fox", "the slow fox").unwrap();

        let segments = result.word_diff().segments();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[1].kind, SegmentKind::Removed);
        assert_eq!(segments[1].value.pieces(), vec!["quick "]);
        assert_eq!(segments[2].kind, SegmentKind::Added);
        assert_eq!(segments[2].value.pieces(), vec!["slow "]);

        let changes = result.changes();
        assert_eq!((changes.added, changes.removed, changes.unchanged), (1, 1, 2));
        assert_eq!(changes.change_percentage, 50);
    }

    #[test]
    fn test_compare_texts_identity() {
        let engine = ComparisonEngine::default();
        let similarity = engine.compare_texts("aaa bbb ccc", "aaa bbb ccc").unwrap().similarity();

        assert_eq!(similarity.jaccard, 100);
        assert_eq!(similarity.levenshtein, Some(100));
        assert_eq!(similarity.overall, 100);
    }

    #[test]
    fn test_overall_rounds_once() {
        let engine = ComparisonEngine::default();
        let similarity = engine.compare_texts("aaa bbb ccc dd", "aaa bbb").unwrap().similarity();

        // jaccard 66.67 and levenshtein 50 average to 58.33
        assert_eq!(similarity.jaccard, 67);
        assert_eq!(similarity.levenshtein, Some(50));
        assert_eq!(similarity.overall, 58);
    }

    #[test]
    fn test_compare_texts_appended_word() {
        let engine = ComparisonEngine::default();
        let changes = engine.compare_texts("the quick fox", "the quick fox jumps").unwrap().changes();

        assert_eq!((changes.added, changes.removed, changes.unchanged), (1, 0, 3));
        assert_eq!(changes.change_percentage, 25);
    }

    #[test]
    fn test_compare_texts_deleted_last_word() {
        let engine = ComparisonEngine::new(CompareConfig::default().with_algorithm(crate::DiffAlgorithm::Lcs));
        let changes = engine.compare_texts("alpha beta gamma", "alpha beta").unwrap().changes();

        assert_eq!((changes.added, changes.removed, changes.unchanged), (0, 1, 2));
        assert_eq!(changes.change_percentage, 33);
    }

    #[test]
    fn test_compare_texts_disjoint() {
        let engine = ComparisonEngine::default();
        let result = engine.compare_texts("alpha beta gamma", "delta epsilon zeta").unwrap();

        assert_eq!(result.common_word_count(), 0);
        assert_eq!(result.similarity().jaccard, 0);
        assert_eq!(result.unique_words_left(), 3);
        assert_eq!(result.changes().change_percentage, 100);
    }

    #[test]
    fn test_compare_texts_blank_input() {
        let engine = ComparisonEngine::default();
        assert!(engine.compare_texts("   ", "something").is_none());
        assert!(engine.compare_texts("something", "").is_none());
    }

    #[test]
    fn test_compare_texts_is_case_insensitive() {
        let engine = ComparisonEngine::default();
        let result = engine.compare_texts("Hello World again", "hello world AGAIN").unwrap();

        assert!(result.word_diff().is_unchanged());
        assert_eq!(result.similarity().overall, 100);
    }

    #[test]
    fn test_overall_is_mean_of_scores() {
        let engine = ComparisonEngine::default();
        let result = engine.compare_texts(LEFT, RIGHT).unwrap();
        let similarity = result.similarity();

        // jaccard 11/13 = 84.62, levenshtein (70 - 5) / 70 = 93
        assert_eq!(similarity.jaccard, 85);
        assert_eq!(similarity.levenshtein, Some(93));
        assert_eq!(similarity.overall, 89);
    }

    #[test]
    fn test_levenshtein_guard_falls_back_to_jaccard() {
        let engine = ComparisonEngine::new(CompareConfig::default().with_levenshtein_cell_limit(10));
        let result = engine.compare_texts(LEFT, RIGHT).unwrap();
        let similarity = result.similarity();

        assert_eq!(similarity.levenshtein, None);
        assert_eq!(similarity.overall, similarity.jaccard);
    }

    #[test]
    fn test_char_diff_guard() {
        let engine = ComparisonEngine::new(CompareConfig::default().with_char_diff_max_len(10));
        let result = engine.compare_texts(LEFT, RIGHT).unwrap();
        assert!(result.char_diff().is_none());

        let engine = ComparisonEngine::new(CompareConfig::minimal());
        assert!(engine.compare_texts(LEFT, RIGHT).unwrap().char_diff().is_none());

        let engine = ComparisonEngine::default();
        let char_diff = engine.compare_texts(LEFT, RIGHT).unwrap().char_diff().cloned().unwrap();
        assert!(!char_diff.is_unchanged());
    }

    #[test]
    fn test_lcs_char_diff_respects_cell_limit() {
        let config = CompareConfig::default()
            .with_algorithm(crate::DiffAlgorithm::Lcs)
            .with_lcs_cell_limit(16);
        let engine = ComparisonEngine::new(config);
        let char_diff = engine.compare_texts(LEFT, RIGHT).unwrap().char_diff().cloned().unwrap();

        assert_eq!(char_diff.reconstruct_left(), LEFT.to_lowercase());
        assert_eq!(char_diff.reconstruct_right(), RIGHT.to_lowercase());
    }

    #[test]
    fn test_diff_limits_truncate_output_not_counts() {
        let engine = ComparisonEngine::new(CompareConfig::default().with_diff_limits(1, 1));
        let result = engine.compare_texts("a b c d e", "a x c y e").unwrap();

        assert_eq!(result.word_diff().len(), 1);
        assert_eq!(result.changes().added, 2);
        assert_eq!(result.changes().removed, 2);
        assert_eq!(result.changes().unchanged, 3);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let parallel = ComparisonEngine::new(CompareConfig::default().with_parallel(true));
        let sequential = ComparisonEngine::new(CompareConfig::default().with_parallel(false));

        assert_eq!(
            parallel.compare_texts(LEFT, RIGHT),
            sequential.compare_texts(LEFT, RIGHT)
        );
    }

    #[test]
    fn test_try_new_rejects_invalid_config() {
        let engine = ComparisonEngine::try_new(CompareConfig::default().with_ngram_size(0));
        assert!(matches!(engine, Err(CompareError::Config(_))));
        assert!(ComparisonEngine::try_new(CompareConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_input_flags_follow_content() {
        let engine = ComparisonEngine::default();
        let classifier = engine.classifier();
        let no_pages = classifier.analyze("none.pdf", Vec::<String>::new());
        let symbols = classifier.analyze("symbols.pdf", vec!["#".repeat(60)]);
        let text = classifier.analyze("text.pdf", vec![LEFT]);

        match engine.compare_analyses(&symbols, &text) {
            ComparisonOutcome::EmptyInput(signal) => {
                assert!(signal.left_empty);
                assert!(!signal.right_empty);
            }
            other => panic!("expected empty input, got {:?}", other),
        }

        let outcome = engine.compare_analyses(&text, &no_pages);
        assert_eq!(outcome.stage(), ComparisonStage::Empty);
    }

    #[test]
    fn test_join_runs_both_sides() {
        assert_eq!(join(true, || 1, || "two"), (1, "two"));
        assert_eq!(join(false, || 1, || "two"), (1, "two"));
    }

    #[test]
    #[should_panic(expected = "worker failed")]
    fn test_join_resumes_panic() {
        join(true, || (), || panic!("worker failed"));
    }

    fn sentence() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-e]{1,4}", 1..12).prop_map(|words| words.join(" "))
    }

    proptest! {
        #[test]
        fn prop_scores_are_percentages(left in sentence(), right in sentence()) {
            let engine = ComparisonEngine::new(CompareConfig::minimal());
            let result = engine.compare_texts(&left, &right).unwrap();
            let similarity = result.similarity();

            prop_assert!(similarity.jaccard <= 100);
            prop_assert!(similarity.levenshtein.unwrap() <= 100);
            prop_assert!(similarity.overall <= 100);
            prop_assert!(result.changes().change_percentage <= 100);
        }

        #[test]
        fn prop_identical_texts_are_unchanged(text in sentence()) {
            let engine = ComparisonEngine::new(CompareConfig::minimal());
            let result = engine.compare_texts(&text, &text).unwrap();

            prop_assert_eq!(result.similarity().levenshtein, Some(100));
            prop_assert_eq!(result.changes().added + result.changes().removed, 0);
            prop_assert_eq!(result.changes().change_percentage, 0);
        }
    }
}

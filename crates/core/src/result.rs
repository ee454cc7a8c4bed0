//! Comparison results and outcomes

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classifier::DocumentAnalysis;
use crate::diff::DiffScript;

/// Similarity scores, each a percentage in `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityScores {
    /// Jaccard similarity of the word sets
    pub jaccard: u32,
    /// Normalized Levenshtein similarity; `None` when skipped for size
    pub levenshtein: Option<u32>,
    /// Mean of the two scores, or the Jaccard score alone when Levenshtein was skipped
    pub overall: u32,
}

/// Word-level change counts taken from the full word diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSummary {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
    /// `(added + removed) / (added + removed + unchanged)` as a percentage
    pub change_percentage: u32,
}

/// Result of comparing two text-based documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    requires_ocr: bool,
    similarity: SimilarityScores,
    changes: ChangeSummary,
    common_word_count: usize,
    unique_words_left: usize,
    unique_words_right: usize,
    common_phrases: Vec<String>,
    word_diff: DiffScript,
    sentence_diff: DiffScript,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    char_diff: Option<DiffScript>,
}

/// Parts of a [`ComparisonResult`], gathered by the engine before assembly
pub(crate) struct ResultParts {
    pub similarity: SimilarityScores,
    pub changes: ChangeSummary,
    pub common_word_count: usize,
    pub unique_words_left: usize,
    pub unique_words_right: usize,
    pub common_phrases: Vec<String>,
    pub word_diff: DiffScript,
    pub sentence_diff: DiffScript,
    pub char_diff: Option<DiffScript>,
}

impl ComparisonResult {
    pub(crate) fn assemble(parts: ResultParts) -> Self {
        Self {
            requires_ocr: false,
            similarity: parts.similarity,
            changes: parts.changes,
            common_word_count: parts.common_word_count,
            unique_words_left: parts.unique_words_left,
            unique_words_right: parts.unique_words_right,
            common_phrases: parts.common_phrases,
            word_diff: parts.word_diff,
            sentence_diff: parts.sentence_diff,
            char_diff: parts.char_diff,
        }
    }

    /// Always false: results only exist for text-based documents
    pub fn requires_ocr(&self) -> bool {
        self.requires_ocr
    }

    pub fn similarity(&self) -> SimilarityScores {
        self.similarity
    }

    pub fn changes(&self) -> ChangeSummary {
        self.changes
    }

    /// Words (longer than the minimum length) present in both documents
    pub fn common_word_count(&self) -> usize {
        self.common_word_count
    }

    pub fn unique_words_left(&self) -> usize {
        self.unique_words_left
    }

    pub fn unique_words_right(&self) -> usize {
        self.unique_words_right
    }

    /// Shared n-grams in left-hand order, deduplicated
    pub fn common_phrases(&self) -> &[String] {
        &self.common_phrases
    }

    /// Leading segments of the word diff
    pub fn word_diff(&self) -> &DiffScript {
        &self.word_diff
    }

    /// Leading segments of the sentence diff
    pub fn sentence_diff(&self) -> &DiffScript {
        &self.sentence_diff
    }

    /// Leading segments of the character diff, when it was computed
    pub fn char_diff(&self) -> Option<&DiffScript> {
        self.char_diff.as_ref()
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Get a summary of the comparison
    pub fn summary(&self) -> String {
        let levenshtein = self
            .similarity
            .levenshtein
            .map(|score| format!("{}%", score))
            .unwrap_or_else(|| "skipped".to_string());

        format!(
            "Similarity: {}% overall (Jaccard {}%, Levenshtein {}). \
             Words: +{} -{} ={}, {}% changed",
            self.similarity.overall,
            self.similarity.jaccard,
            levenshtein,
            self.changes.added,
            self.changes.removed,
            self.changes.unchanged,
            self.changes.change_percentage
        )
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Comparison Result ===")?;
        writeln!(f, "{}", self.summary())?;
        writeln!(
            f,
            "Common words: {} (left only: {}, right only: {})",
            self.common_word_count, self.unique_words_left, self.unique_words_right
        )?;

        if !self.common_phrases.is_empty() {
            writeln!(f, "\nCommon phrases:")?;
            for phrase in &self.common_phrases {
                writeln!(f, "  \"{}\"", phrase)?;
            }
        }

        writeln!(f, "\nWord diff:\n  {}", self.word_diff)
    }
}

/// Comparison stopped because at least one document needs OCR
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrRequired {
    pub left_is_image_based: bool,
    pub right_is_image_based: bool,
    pub left_analysis: DocumentAnalysis,
    pub right_analysis: DocumentAnalysis,
}

/// Comparison stopped because at least one document has no comparable text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyInput {
    pub left_empty: bool,
    pub right_empty: bool,
}

/// Stages of a comparison. `Extracting` leads to exactly one terminal stage:
/// `Done` through `Comparing`, or `OcrRequired` / `Empty` without diffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonStage {
    Extracting,
    Comparing,
    Done,
    OcrRequired,
    Empty,
}

impl fmt::Display for ComparisonStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComparisonStage::Extracting => "extracting",
            ComparisonStage::Comparing => "comparing",
            ComparisonStage::Done => "done",
            ComparisonStage::OcrRequired => "ocr-required",
            ComparisonStage::Empty => "empty",
        };
        f.write_str(name)
    }
}

/// Terminal outcome of a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ComparisonOutcome {
    /// Both documents were compared
    Compared(Box<ComparisonResult>),
    /// At least one document is image-based; route it to OCR
    OcrRequired(OcrRequired),
    /// At least one document is empty after normalization
    EmptyInput(EmptyInput),
}

impl ComparisonOutcome {
    /// Terminal stage this outcome corresponds to
    pub fn stage(&self) -> ComparisonStage {
        match self {
            ComparisonOutcome::Compared(_) => ComparisonStage::Done,
            ComparisonOutcome::OcrRequired(_) => ComparisonStage::OcrRequired,
            ComparisonOutcome::EmptyInput(_) => ComparisonStage::Empty,
        }
    }

    pub fn is_compared(&self) -> bool {
        matches!(self, ComparisonOutcome::Compared(_))
    }

    pub fn requires_ocr(&self) -> bool {
        matches!(self, ComparisonOutcome::OcrRequired(_))
    }

    pub fn is_empty_input(&self) -> bool {
        matches!(self, ComparisonOutcome::EmptyInput(_))
    }

    /// The comparison result, if both documents were compared
    pub fn result(&self) -> Option<&ComparisonResult> {
        match self {
            ComparisonOutcome::Compared(result) => Some(result),
            _ => None,
        }
    }

    pub fn into_result(self) -> Option<ComparisonResult> {
        match self {
            ComparisonOutcome::Compared(result) => Some(*result),
            _ => None,
        }
    }

    /// Serialize to JSON, tagged with an `outcome` field
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::MyersAlgorithm;
    use crate::diff::diff_words;

    fn sample() -> ComparisonResult {
        ComparisonResult::assemble(ResultParts {
            similarity: SimilarityScores {
                jaccard: 50,
                levenshtein: Some(80),
                overall: 65,
            },
            changes: ChangeSummary {
                added: 1,
                removed: 1,
                unchanged: 2,
                change_percentage: 50,
            },
            common_word_count: 2,
            unique_words_left: 1,
            unique_words_right: 1,
            common_phrases: vec![],
            word_diff: diff_words(&MyersAlgorithm::new(), "the quick fox", "the slow fox"),
            sentence_diff: DiffScript::new(),
            char_diff: None,
        })
    }

    #[test]
    fn test_summary() {
        let result = sample();
        assert_eq!(
            result.summary(),
            "Similarity: 65% overall (Jaccard 50%, Levenshtein 80%). Words: +1 -1 =2, 50% changed"
        );
        assert!(!result.requires_ocr());
    }

    #[test]
    fn test_display_contains_inline_diff() {
        let rendered = sample().to_string();
        assert!(rendered.contains("the [-quick -]{+slow +}fox"));
    }

    #[test]
    fn test_outcome_json_is_tagged() {
        let outcome = ComparisonOutcome::Compared(Box::new(sample()));
        let json: serde_json::Value = serde_json::from_str(&outcome.to_json().unwrap()).unwrap();

        assert_eq!(json["outcome"], "compared");
        assert_eq!(json["similarity"]["overall"], 65);
        assert_eq!(json["changes"]["changePercentage"], 50);
        assert_eq!(json["wordDiff"][1]["kind"], "removed");
        assert!(json.get("charDiff").is_none());
    }

    #[test]
    fn test_outcome_round_trips_through_json() {
        let outcome = ComparisonOutcome::EmptyInput(EmptyInput {
            left_empty: true,
            right_empty: false,
        });
        let json = outcome.to_json().unwrap();
        let parsed: ComparisonOutcome = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, outcome);
        assert!(parsed.is_empty_input());
        assert_eq!(parsed.stage(), ComparisonStage::Empty);
        assert!(parsed.result().is_none());
    }
}

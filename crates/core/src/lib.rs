//! # docdiff
//!
//! Classifies extracted document pages as text-based or image-based and
//! compares two text-based documents at word, sentence and character level.
//!
//! ## Core Concepts
//!
//! - **PageClassifier**: Decides per page whether usable text was extracted
//!   and aggregates a text-based / image-based verdict per document
//! - **Pipelines**: Chain normalizers that clean page text before comparison
//! - **DiffAlgorithm**: Myers or LCS, shared by every diff granularity
//! - **ComparisonEngine**: Runs the comparison and reports a [`ComparisonOutcome`]
//!
//! Image-based documents are never diffed; the outcome asks for OCR instead.
//!
//! ## Example
//!
//! ```rust
//! use docdiff_core::{CompareConfig, ComparisonEngine};
//!
//! let left = "The quick brown fox jumps over the lazy dog, again and again and again.";
//! let right = "The slow brown fox jumps over the lazy dog, again and again and again.";
//!
//! let engine = ComparisonEngine::new(CompareConfig::default());
//! let outcome = engine.compare(vec![left], vec![right]);
//!
//! let result = outcome.result().expect("both documents are text-based");
//! assert_eq!(result.changes().added, 1);
//! assert_eq!(result.changes().removed, 1);
//! ```

pub mod algorithm;
pub mod classifier;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod ngrams;
pub mod normalizers;
pub mod pipeline;
pub mod result;
pub mod source;
pub mod tokenizers;

// Re-export main types
pub use classifier::{DocumentAnalysis, FileType, PageClassifier, PageRecord};
pub use config::{CompareConfig, DiffAlgorithm};
pub use diff::{DiffScript, DiffSegment, DiffValue, SegmentKind};
pub use engine::ComparisonEngine;
pub use error::{CompareError, ConfigError, ExtractionError, Result};
pub use pipeline::TextPipeline;
pub use result::{
    ChangeSummary, ComparisonOutcome, ComparisonResult, ComparisonStage, EmptyInput, OcrRequired,
    SimilarityScores,
};
pub use source::{InMemoryDocument, PageSource};

/// Main entry point for comparing two documents given as page texts
///
/// # Arguments
///
/// * `left_pages` - Extracted text of each page of the first document
/// * `right_pages` - Extracted text of each page of the second document
/// * `config` - Optional configuration (uses default if None)
///
/// # Example
///
/// ```rust
/// use docdiff_core::compare;
///
/// let outcome = compare(vec![""], vec!["", ""], None);
/// assert!(outcome.requires_ocr());
/// ```
pub fn compare<L, R, SL, SR>(left_pages: L, right_pages: R, config: Option<CompareConfig>) -> ComparisonOutcome
where
    L: IntoIterator<Item = SL> + Send,
    R: IntoIterator<Item = SR> + Send,
    SL: Into<String>,
    SR: Into<String>,
{
    let config = config.unwrap_or_default();
    let engine = ComparisonEngine::new(config);
    engine.compare(left_pages, right_pages)
}

//! Page classification
//!
//! Decides per page whether the extractor found usable text, then aggregates
//! a document-level verdict. Documents whose pages are mostly text-less are
//! image-based (scanned) and need OCR before they can be compared.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::CompareConfig;
use crate::metrics::{percentage, TextMetrics};
use crate::pipeline::TextPipeline;

/// Separator appended after each text-bearing page before normalization
const PAGE_SEPARATOR: &str = "\n\n";

/// Extracted text of a single page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// 1-based page number
    pub page_number: usize,
    pub raw_text: String,
    /// Whether the trimmed text is longer than the minimum content threshold
    pub has_text: bool,
    /// Code points in the trimmed text
    pub text_length: usize,
}

/// Document-level classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileType {
    TextBased,
    ImageBased,
}

/// Classification and normalized text of one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAnalysis {
    pub file_name: String,
    pub total_pages: usize,
    pub text_pages: usize,
    pub image_pages: usize,
    /// Text of the text-bearing pages, punctuation filtered and whitespace collapsed
    pub normalized_text: String,
    pub file_type: FileType,
    /// Share of pages agreeing with `file_type`, 0..=100
    pub confidence: u32,
    pub word_count: usize,
    pub char_count: usize,
}

impl DocumentAnalysis {
    /// A document without pages
    pub fn is_empty(&self) -> bool {
        self.total_pages == 0
    }

    pub fn is_image_based(&self) -> bool {
        self.file_type == FileType::ImageBased
    }

    /// True when nothing comparable is left after normalization
    pub fn has_no_content(&self) -> bool {
        self.is_empty() || self.normalized_text.trim().is_empty()
    }
}

/// Classifies pages and builds [`DocumentAnalysis`] values
#[derive(Debug, Clone)]
pub struct PageClassifier {
    min_text_length: usize,
    pipeline: TextPipeline,
}

impl PageClassifier {
    pub fn new(config: &CompareConfig) -> Self {
        Self {
            min_text_length: config.min_text_length,
            pipeline: TextPipeline::document(config.unicode_nfc),
        }
    }

    /// Replace the normalization pipeline
    pub fn with_pipeline(mut self, pipeline: TextPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Classify one page. `page_number` is 1-based.
    pub fn classify_page(&self, page_number: usize, text: impl Into<String>) -> PageRecord {
        let raw_text = text.into();
        let text_length = raw_text.trim().chars().count();
        let has_text = text_length > self.min_text_length;

        trace!(
            "page {}: {} chars, {}",
            page_number,
            text_length,
            if has_text { "text" } else { "image" }
        );

        PageRecord {
            page_number,
            raw_text,
            has_text,
            text_length,
        }
    }

    /// Classify every page of a document and aggregate the result
    pub fn analyze<I, S>(&self, file_name: impl Into<String>, pages: I) -> DocumentAnalysis
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let records: Vec<PageRecord> = pages
            .into_iter()
            .enumerate()
            .map(|(index, text)| self.classify_page(index + 1, text))
            .collect();

        self.analyze_records(file_name, &records)
    }

    /// Aggregate already classified pages
    pub fn analyze_records(&self, file_name: impl Into<String>, records: &[PageRecord]) -> DocumentAnalysis {
        let file_name = file_name.into();
        let total_pages = records.len();
        let text_pages = records.iter().filter(|r| r.has_text).count();
        let image_pages = total_pages - text_pages;

        let mut combined = String::new();
        for record in records.iter().filter(|r| r.has_text) {
            combined.push_str(&record.raw_text);
            combined.push_str(PAGE_SEPARATOR);
        }
        let normalized_text = self.pipeline.process(&combined);
        let metrics = TextMetrics::compute(&normalized_text);

        let file_type = if text_pages > image_pages {
            FileType::TextBased
        } else {
            FileType::ImageBased
        };
        let confidence = percentage(text_pages.max(image_pages), total_pages);

        debug!(
            "{}: {} pages ({} text, {} image) -> {:?} ({}% confidence)",
            file_name, total_pages, text_pages, image_pages, file_type, confidence
        );

        DocumentAnalysis {
            file_name,
            total_pages,
            text_pages,
            image_pages,
            normalized_text,
            file_type,
            confidence,
            word_count: metrics.word_count,
            char_count: metrics.char_count,
        }
    }
}

impl Default for PageClassifier {
    fn default() -> Self {
        Self::new(&CompareConfig::default())
    }
}

//! Text normalization pipeline
//!
//! Chains normalizers so page text goes through the same ordered set of
//! transformations on both sides of a comparison.

use std::fmt;

use crate::normalizers::{Normalizer, PunctuationFilter, UnicodeNfc, WhitespaceNormalizer};

/// A pipeline of text normalizers applied in order
#[derive(Default, Clone)]
pub struct TextPipeline {
    /// Ordered list of normalizers to apply
    normalizers: Vec<Box<dyn Normalizer>>,
}

impl TextPipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            normalizers: Vec::new(),
        }
    }

    /// Pipeline used to build a document's normalized text: strip punctuation
    /// outside the allow-list, then collapse and trim whitespace
    pub fn document(unicode_nfc: bool) -> Self {
        let mut pipeline = Self::new();
        if unicode_nfc {
            pipeline = pipeline.add_normalizer(Box::new(UnicodeNfc));
        }
        pipeline
            .add_normalizer(Box::new(PunctuationFilter::document_default()))
            .add_normalizer(Box::new(WhitespaceNormalizer::new().with_trim(true)))
    }

    /// Add a normalizer to the pipeline
    pub fn add_normalizer(mut self, normalizer: Box<dyn Normalizer>) -> Self {
        self.normalizers.push(normalizer);
        self
    }

    /// Add multiple normalizers at once
    pub fn add_normalizers(mut self, normalizers: Vec<Box<dyn Normalizer>>) -> Self {
        self.normalizers.extend(normalizers);
        self
    }

    /// Process text through the entire pipeline
    pub fn process(&self, input: &str) -> String {
        let mut current = input.to_string();
        for normalizer in &self.normalizers {
            current = normalizer.normalize(&current);
        }
        current
    }

    /// Get the number of normalizers in the pipeline
    pub fn len(&self) -> usize {
        self.normalizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalizers.is_empty()
    }

    /// Get the names of all normalizers in the pipeline
    pub fn normalizer_names(&self) -> Vec<String> {
        self.normalizers
            .iter()
            .map(|n| n.name().to_string())
            .collect()
    }
}

impl fmt::Debug for TextPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextPipeline")
            .field("normalizers", &self.normalizer_names())
            .finish()
    }
}

//! Page sources
//!
//! The engine never extracts text itself. A [`PageSource`] is the seam to
//! whatever extractor the caller uses; its failures are passed through as-is.

use crate::error::ExtractionError;

/// A document that can hand out the raw text of its pages
pub trait PageSource: Send + Sync {
    /// Display name of the document
    fn name(&self) -> &str;

    /// Number of pages in the document
    fn page_count(&self) -> Result<usize, ExtractionError>;

    /// Raw text of the page at `index` (0-based). Text-less pages return an empty string.
    fn page_text(&self, index: usize) -> Result<String, ExtractionError>;

    /// Raw text of every page, in order
    fn page_texts(&self) -> Result<Vec<String>, ExtractionError> {
        (0..self.page_count()?).map(|index| self.page_text(index)).collect()
    }
}

/// A document whose page texts are already in memory
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InMemoryDocument {
    name: String,
    pages: Vec<String>,
}

impl InMemoryDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pages: Vec::new(),
        }
    }

    /// Build a document from its page texts
    pub fn from_pages<I, S>(name: impl Into<String>, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a page
    pub fn with_page(mut self, text: impl Into<String>) -> Self {
        self.pages.push(text.into());
        self
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }
}

impl PageSource for InMemoryDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn page_count(&self) -> Result<usize, ExtractionError> {
        Ok(self.pages.len())
    }

    fn page_text(&self, index: usize) -> Result<String, ExtractionError> {
        self.pages
            .get(index)
            .cloned()
            .ok_or(ExtractionError::PageOutOfRange {
                page: index + 1,
                total: self.pages.len(),
            })
    }

    fn page_texts(&self) -> Result<Vec<String>, ExtractionError> {
        Ok(self.pages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_document() {
        let doc = InMemoryDocument::new("memo.pdf")
            .with_page("first page")
            .with_page("");

        assert_eq!(doc.name(), "memo.pdf");
        assert_eq!(doc.page_count().unwrap(), 2);
        assert_eq!(doc.page_text(0).unwrap(), "first page");
        assert_eq!(doc.page_text(1).unwrap(), "");
        assert_eq!(doc.page_texts().unwrap(), vec!["first page", ""]);
    }

    #[test]
    fn test_page_out_of_range() {
        let doc = InMemoryDocument::from_pages("memo.pdf", ["only page"]);
        let err = doc.page_text(3).unwrap_err();

        assert!(matches!(err, ExtractionError::PageOutOfRange { page: 4, total: 1 }));
    }

    struct FailingSource;

    impl PageSource for FailingSource {
        fn name(&self) -> &str {
            "locked.pdf"
        }

        fn page_count(&self) -> Result<usize, ExtractionError> {
            Ok(2)
        }

        fn page_text(&self, index: usize) -> Result<String, ExtractionError> {
            if index == 0 {
                Ok("readable".to_string())
            } else {
                Err(ExtractionError::Encrypted)
            }
        }
    }

    #[test]
    fn test_default_page_texts_stops_at_first_failure() {
        let err = FailingSource.page_texts().unwrap_err();
        assert!(matches!(err, ExtractionError::Encrypted));
    }
}

//! Error types for the comparison engine
//!
//! Image-based and empty inputs are not errors; they are reported through
//! [`ComparisonOutcome`](crate::result::ComparisonOutcome). The types here
//! cover failures of external collaborators and invalid configuration.

use std::path::PathBuf;

/// Result type alias for comparison operations
pub type Result<T> = std::result::Result<T, CompareError>;

/// Failure reported by a page text extractor
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The requested page does not exist
    #[error("page {page} out of range (document has {total} pages)")]
    PageOutOfRange {
        /// 1-based page number that was requested
        page: usize,
        /// Number of pages in the document
        total: usize,
    },

    /// The document is password protected and could not be opened
    #[error("document is encrypted")]
    Encrypted,

    /// The extractor failed for another reason
    #[error("extraction failed: {0}")]
    Failed(String),

    /// IO error while reading the document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by [`ComparisonEngine`](crate::engine::ComparisonEngine)
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// Page text extraction failed upstream of the engine
    #[error("failed to extract text from '{document}': {source}")]
    Extraction {
        /// Name of the document whose extraction failed
        document: String,
        /// Underlying extractor error
        #[source]
        source: ExtractionError,
    },

    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A field holds a value the engine cannot work with
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// The configuration document is not valid JSON
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_error_is_wrapped_with_document_name() {
        let err = CompareError::Extraction {
            document: "contract.pdf".to_string(),
            source: ExtractionError::PageOutOfRange { page: 4, total: 3 },
        };

        let message = err.to_string();
        assert!(message.contains("contract.pdf"));
        assert!(message.contains("page 4 out of range"));
    }

    #[test]
    fn test_config_error_converts() {
        let err: CompareError = ConfigError::InvalidValue {
            field: "ngram_size",
            reason: "must be at least 1".to_string(),
        }
        .into();

        assert!(matches!(err, CompareError::Config(_)));
        assert_eq!(err.to_string(), "invalid value for 'ngram_size': must be at least 1");
    }
}

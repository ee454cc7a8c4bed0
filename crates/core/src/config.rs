//! Configuration for the comparison engine

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Diff algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffAlgorithm {
    /// Linear-space Myers O(ND) algorithm
    #[default]
    Myers,
    /// Dynamic-programming longest common subsequence, O(n·m) memory
    Lcs,
}

/// Configuration for document classification and comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// A page is text-bearing when its trimmed text is longer than this
    pub min_text_length: usize,

    /// Words must be longer than this to enter the Jaccard word sets
    pub min_word_length: usize,

    /// Size of the n-grams used for common phrases
    pub ngram_size: usize,

    /// Maximum number of common phrases reported
    pub max_common_phrases: usize,

    /// Number of word diff segments kept in the result
    pub word_diff_limit: usize,

    /// Number of sentence diff segments kept in the result
    pub sentence_diff_limit: usize,

    /// Number of character diff segments kept in the result
    pub char_diff_limit: usize,

    /// Whether to compute the character-level diff
    pub compute_char_diff: bool,

    /// Character diff is skipped when either side has more characters than this
    pub char_diff_max_len: usize,

    /// Levenshtein is skipped when `n * m` exceeds this many matrix cells
    pub levenshtein_cell_limit: usize,

    /// Algorithm used for all diff granularities
    pub algorithm: DiffAlgorithm,

    /// LCS falls back to Myers when its table would exceed this many cells
    pub lcs_cell_limit: usize,

    /// Run independent work on scoped worker threads
    pub parallel: bool,

    /// Compose page text to Unicode NFC before normalization
    pub unicode_nfc: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CompareConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self {
            min_text_length: 50,
            min_word_length: 2,
            ngram_size: 3,
            max_common_phrases: 10,
            word_diff_limit: 50,
            sentence_diff_limit: 20,
            char_diff_limit: 100,
            compute_char_diff: true,
            char_diff_max_len: 20_000,
            levenshtein_cell_limit: 50_000_000,
            algorithm: DiffAlgorithm::default(),
            lcs_cell_limit: 4_000_000,
            parallel: true,
            unicode_nfc: false,
        }
    }

    /// Fast, single-threaded configuration without the character diff
    pub fn minimal() -> Self {
        Self {
            compute_char_diff: false,
            parallel: false,
            ..Self::new()
        }
    }

    /// Everything enabled, with room for larger documents
    pub fn comprehensive() -> Self {
        Self {
            compute_char_diff: true,
            char_diff_max_len: 100_000,
            levenshtein_cell_limit: 400_000_000,
            unicode_nfc: true,
            ..Self::new()
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Check that the configuration values are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ngram_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ngram_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.levenshtein_cell_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "levenshtein_cell_limit",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.lcs_cell_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "lcs_cell_limit",
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Set the page text threshold
    pub fn with_min_text_length(mut self, length: usize) -> Self {
        self.min_text_length = length;
        self
    }

    /// Set the minimum word length for word sets
    pub fn with_min_word_length(mut self, length: usize) -> Self {
        self.min_word_length = length;
        self
    }

    /// Set the n-gram size used for common phrases
    pub fn with_ngram_size(mut self, n: usize) -> Self {
        self.ngram_size = n;
        self
    }

    /// Set the maximum number of common phrases
    pub fn with_max_common_phrases(mut self, limit: usize) -> Self {
        self.max_common_phrases = limit;
        self
    }

    /// Set the word and sentence diff truncation limits
    pub fn with_diff_limits(mut self, words: usize, sentences: usize) -> Self {
        self.word_diff_limit = words;
        self.sentence_diff_limit = sentences;
        self
    }

    /// Enable or disable the character diff
    pub fn with_char_diff(mut self, enable: bool) -> Self {
        self.compute_char_diff = enable;
        self
    }

    /// Set the character diff size guard
    pub fn with_char_diff_max_len(mut self, max_len: usize) -> Self {
        self.char_diff_max_len = max_len;
        self
    }

    /// Set the Levenshtein size guard
    pub fn with_levenshtein_cell_limit(mut self, cells: usize) -> Self {
        self.levenshtein_cell_limit = cells;
        self
    }

    /// Set the diff algorithm
    pub fn with_algorithm(mut self, algorithm: DiffAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the LCS table size guard
    pub fn with_lcs_cell_limit(mut self, cells: usize) -> Self {
        self.lcs_cell_limit = cells;
        self
    }

    /// Enable or disable worker threads
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enable or disable NFC composition of page text
    pub fn with_unicode_nfc(mut self, enable: bool) -> Self {
        self.unicode_nfc = enable;
        self
    }
}

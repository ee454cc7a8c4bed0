//! Text normalizers
//!
//! Provides the `Normalizer` trait and the implementations used to turn raw
//! extracted page text into the normalized text that documents are compared on.

/// Punctuation kept by [`PunctuationFilter::document_default`]
pub const ALLOWED_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '\'', '"', '(', ')', '-'];

/// Trait for text normalizers
pub trait Normalizer: Send + Sync {
    /// Normalize the input text
    fn normalize(&self, input: &str) -> String;

    /// Get the name of this normalizer
    fn name(&self) -> &str;

    /// Get metadata about this normalizer (e.g., configuration)
    fn metadata(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Clone this normalizer into a Box
    fn clone_box(&self) -> Box<dyn Normalizer>;
}

// Implement Clone for Box<dyn Normalizer>
impl Clone for Box<dyn Normalizer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

// ============================================================================
// Built-in Normalizers
// ============================================================================

/// Converts all text to lowercase
#[derive(Clone)]
pub struct Lowercase;

impl Normalizer for Lowercase {
    fn normalize(&self, input: &str) -> String {
        input.to_lowercase()
    }

    fn name(&self) -> &str {
        "lowercase"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Normalizes whitespace: collapses runs of spaces, tabs and newlines into one space
#[derive(Clone)]
pub struct WhitespaceNormalizer {
    /// Whether to collapse multiple consecutive whitespaces into one
    pub collapse: bool,
    /// Whether to trim leading/trailing whitespace
    pub trim: bool,
}

impl Default for WhitespaceNormalizer {
    fn default() -> Self {
        Self {
            collapse: true,
            trim: false,
        }
    }
}

impl WhitespaceNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collapse(mut self, collapse: bool) -> Self {
        self.collapse = collapse;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

impl Normalizer for WhitespaceNormalizer {
    fn normalize(&self, input: &str) -> String {
        let input = if self.trim { input.trim() } else { input };
        let mut normalized = String::with_capacity(input.len());
        let mut in_whitespace = false;

        for ch in input.chars() {
            if ch.is_whitespace() {
                if !self.collapse {
                    normalized.push(' ');
                } else if !in_whitespace {
                    normalized.push(' ');
                }
                in_whitespace = true;
            } else {
                normalized.push(ch);
                in_whitespace = false;
            }
        }

        normalized
    }

    fn name(&self) -> &str {
        "whitespace"
    }

    fn metadata(&self) -> Vec<(String, String)> {
        vec![
            ("collapse".to_string(), self.collapse.to_string()),
            ("trim".to_string(), self.trim.to_string()),
        ]
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Removes every character that is not a word character, whitespace or in the allow-list
#[derive(Clone)]
pub struct PunctuationFilter {
    /// Non-word characters that survive filtering
    pub allowed: Vec<char>,
}

impl PunctuationFilter {
    /// Filter that keeps only word characters and whitespace
    pub fn new() -> Self {
        Self {
            allowed: Vec::new(),
        }
    }

    /// Filter used for document text: keeps sentence and clause punctuation
    pub fn document_default() -> Self {
        Self {
            allowed: ALLOWED_PUNCTUATION.to_vec(),
        }
    }

    pub fn with_allowed(mut self, allowed: impl IntoIterator<Item = char>) -> Self {
        self.allowed.extend(allowed);
        self
    }

    fn keeps(&self, ch: char) -> bool {
        is_word_char(ch) || ch.is_whitespace() || self.allowed.contains(&ch)
    }
}

impl Default for PunctuationFilter {
    fn default() -> Self {
        Self::document_default()
    }
}

impl Normalizer for PunctuationFilter {
    fn normalize(&self, input: &str) -> String {
        input.chars().filter(|&ch| self.keeps(ch)).collect()
    }

    fn name(&self) -> &str {
        "punctuation_filter"
    }

    fn metadata(&self) -> Vec<(String, String)> {
        vec![("allowed".to_string(), self.allowed.iter().collect())]
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Composes text to Unicode NFC so decomposed accents compare equal to precomposed ones
#[derive(Clone)]
pub struct UnicodeNfc;

impl Normalizer for UnicodeNfc {
    fn normalize(&self, input: &str) -> String {
        use unicode_normalization::UnicodeNormalization;

        input.nfc().collect()
    }

    fn name(&self) -> &str {
        "unicode_nfc"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Word characters: Unicode letters and digits plus underscore
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase() {
        let normalizer = Lowercase;
        assert_eq!(normalizer.normalize("Hello World"), "hello world");
    }

    #[test]
    fn test_whitespace_collapse() {
        let normalizer = WhitespaceNormalizer::new().with_collapse(true);
        assert_eq!(normalizer.normalize("Hello  \t\n World"), "Hello World");
    }

    #[test]
    fn test_whitespace_trim() {
        let normalizer = WhitespaceNormalizer::new().with_trim(true);
        assert_eq!(normalizer.normalize("\n\n Hello   World \n\n"), "Hello World");
    }

    #[test]
    fn test_whitespace_without_collapse() {
        let normalizer = WhitespaceNormalizer::new().with_collapse(false);
        assert_eq!(normalizer.normalize("a\t\nb"), "a  b");
    }

    #[test]
    fn test_punctuation_filter_keeps_allow_list() {
        let normalizer = PunctuationFilter::document_default();
        assert_eq!(
            normalizer.normalize("Price: $40 (approx.) — see §3!"),
            "Price: 40 (approx.)  see 3!"
        );
    }

    #[test]
    fn test_punctuation_filter_keeps_unicode_letters() {
        let normalizer = PunctuationFilter::new();
        assert_eq!(normalizer.normalize("café, naïve_x!"), "café naïve_x");
    }

    #[test]
    fn test_unicode_nfc() {
        let decomposed = "cafe\u{0301}";
        assert_eq!(UnicodeNfc.normalize(decomposed), "caf\u{00e9}");
    }
}

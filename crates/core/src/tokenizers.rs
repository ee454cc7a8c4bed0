//! Text tokenizers
//!
//! Two kinds of tokenization live here:
//!
//! - [`tokenize_words`] and [`tokenize_sentences`] produce the normalized
//!   token sequences used for word sets, n-grams and sentence diffs.
//! - The [`Tokenizer`] implementations split text into borrowed, lossless
//!   slices for diffing. Concatenating their output always yields the input,
//!   which is what lets a diff script reconstruct both sides.

use crate::normalizers::is_word_char;

/// Characters that end a sentence
const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

/// Split text into sentences on runs of `.`, `!` and `?`.
///
/// Sentences are trimmed and empty results are dropped, so the terminators
/// themselves never appear in the output.
pub fn tokenize_sentences(text: &str) -> Vec<String> {
    sentence_slices(text).map(str::to_string).collect()
}

/// Split text into lowercase word tokens.
///
/// Every character that is neither a word character nor whitespace is
/// replaced with a space before splitting, so `"don't"` becomes `["don", "t"]`.
pub fn tokenize_words(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|ch| if is_word_char(ch) || ch.is_whitespace() { ch } else { ' ' })
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

/// [`tokenize_sentences`] for possibly absent text
pub fn tokenize_sentences_opt(text: Option<&str>) -> Vec<String> {
    text.map(tokenize_sentences).unwrap_or_default()
}

/// [`tokenize_words`] for possibly absent text
pub fn tokenize_words_opt(text: Option<&str>) -> Vec<String> {
    text.map(tokenize_words).unwrap_or_default()
}

fn sentence_slices(text: &str) -> impl Iterator<Item = &str> {
    text.split(SENTENCE_TERMINATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Trait for tokenizers that split text into diffable slices
pub trait Tokenizer: Send + Sync {
    /// Tokenize the text into slices borrowed from it
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// The part of a token that diff algorithms compare.
    ///
    /// Tokens with equal keys are aligned as unchanged even when the rest of
    /// the token differs.
    fn match_key<'a>(&self, token: &'a str) -> &'a str {
        token
    }

    /// Get the name of this tokenizer
    fn name(&self) -> &str;

    /// Clone this tokenizer into a Box
    fn clone_box(&self) -> Box<dyn Tokenizer>;
}

// Implement Clone for Box<dyn Tokenizer>
impl Clone for Box<dyn Tokenizer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

// ============================================================================
// Built-in Tokenizers
// ============================================================================

/// Character-level tokenizer (one token per Unicode code point)
#[derive(Clone)]
pub struct CharacterTokenizer;

impl Tokenizer for CharacterTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.char_indices()
            .map(|(pos, ch)| &text[pos..pos + ch.len_utf8()])
            .collect()
    }

    fn name(&self) -> &str {
        "character"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

/// Word tokenizer: each token is a word together with the whitespace after it.
///
/// Leading whitespace becomes a token of its own. No character is dropped.
#[derive(Clone, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut tokens = Vec::new();
        let mut start = 0;
        let mut prev_was_whitespace = false;

        for (pos, ch) in text.char_indices() {
            let is_whitespace = ch.is_whitespace();
            if !is_whitespace && prev_was_whitespace && pos > start {
                tokens.push(&text[start..pos]);
                start = pos;
            }
            prev_was_whitespace = is_whitespace;
        }

        if start < text.len() {
            tokens.push(&text[start..]);
        }

        tokens
    }

    /// The word without its trailing whitespace, so a text's last word
    /// matches the same word followed by a space
    fn match_key<'a>(&self, token: &'a str) -> &'a str {
        token.trim_end()
    }

    fn name(&self) -> &str {
        "word"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_sentences() {
        let sentences = tokenize_sentences("First one. Second one!! Third?  ...  ");
        assert_eq!(sentences, vec!["First one", "Second one", "Third"]);
    }

    #[test]
    fn test_tokenize_sentences_without_terminator() {
        assert_eq!(tokenize_sentences("no terminator here"), vec!["no terminator here"]);
        assert!(tokenize_sentences("").is_empty());
        assert!(tokenize_sentences(" .!? ").is_empty());
    }

    #[test]
    fn test_tokenize_words() {
        let words = tokenize_words("Hello, World! It's 2024_final.");
        assert_eq!(words, vec!["hello", "world", "it", "s", "2024_final"]);
    }

    #[test]
    fn test_tokenize_words_unicode() {
        assert_eq!(tokenize_words("Ärger über Öl"), vec!["ärger", "über", "öl"]);
    }

    #[test]
    fn test_absent_input_is_empty() {
        assert!(tokenize_words_opt(None).is_empty());
        assert!(tokenize_sentences_opt(None).is_empty());
        assert_eq!(tokenize_words_opt(Some("a b")), vec!["a", "b"]);
    }

    #[test]
    fn test_character_tokenizer() {
        let tokens = CharacterTokenizer.tokenize("aé c");
        assert_eq!(tokens, vec!["a", "é", " ", "c"]);
    }

    #[test]
    fn test_word_tokenizer() {
        let tokens = WordTokenizer::new().tokenize("the quick  fox");
        assert_eq!(tokens, vec!["the ", "quick  ", "fox"]);
    }

    #[test]
    fn test_word_tokenizer_leading_whitespace() {
        let tokens = WordTokenizer::new().tokenize("  hello world ");
        assert_eq!(tokens, vec!["  ", "hello ", "world "]);
        assert_eq!(tokens.concat(), "  hello world ");
    }

    #[test]
    fn test_word_match_key() {
        let tokenizer = WordTokenizer::new();
        assert_eq!(tokenizer.match_key("fox "), "fox");
        assert_eq!(tokenizer.match_key("fox"), "fox");
        assert_eq!(tokenizer.match_key("   "), "");
        assert_eq!(CharacterTokenizer.match_key(" "), " ");
    }

    #[test]
    fn test_word_tokenizer_empty() {
        assert!(WordTokenizer::new().tokenize("").is_empty());
        assert_eq!(WordTokenizer::new().tokenize("   "), vec!["   "]);
    }
}

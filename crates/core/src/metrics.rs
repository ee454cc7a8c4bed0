//! Text metrics, edit distance and set similarity
//!
//! Every ratio in this module guards its denominator explicitly; none of them
//! can produce `NaN` or infinity.

use std::collections::HashSet;
use std::hash::Hash;

/// Basic counts for a single text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextMetrics {
    /// Unicode code points
    pub char_count: usize,
    /// Whitespace-delimited tokens
    pub word_count: usize,
    /// Sentences as split by [`tokenize_sentences`](crate::tokenizers::tokenize_sentences)
    pub sentence_count: usize,
}

impl TextMetrics {
    /// Compute all metrics for a given text
    pub fn compute(text: &str) -> Self {
        Self {
            char_count: text.chars().count(),
            word_count: count_words(text),
            sentence_count: crate::tokenizers::tokenize_sentences(text).len(),
        }
    }
}

/// Number of whitespace-delimited, non-empty tokens
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `part / whole * 100`, rounded; `0` when `whole` is zero
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

// ============================================================================
// Edit distance
// ============================================================================

/// Levenshtein distance over Unicode code points (unit insert/delete/substitute costs)
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    levenshtein_chars(&a, &b)
}

/// Levenshtein distance, or `None` when the DP matrix would exceed `cell_limit` cells
pub fn bounded_levenshtein(a: &str, b: &str, cell_limit: usize) -> Option<usize> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    match a.len().checked_mul(b.len()) {
        Some(cells) if cells <= cell_limit => Some(levenshtein_chars(&a, &b)),
        _ => None,
    }
}

/// Two-row Levenshtein: the recurrence only reads the previous row and the
/// current row's previous cell, so memory is `O(min(n, m))`.
fn levenshtein_chars(a: &[char], b: &[char]) -> usize {
    // Iterate over the longer sequence; the rows span the shorter one
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            curr[j + 1] = if lc == sc {
                prev[j]
            } else {
                1 + prev[j].min(prev[j + 1]).min(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

/// `(max(n, m) - distance) / max(n, m) * 100`, rounded; `100` when both texts are empty
pub fn levenshtein_similarity(distance: usize, left_len: usize, right_len: usize) -> u32 {
    let max_len = left_len.max(right_len);
    if max_len == 0 {
        return 100;
    }
    percentage(max_len.saturating_sub(distance), max_len)
}

// ============================================================================
// Set similarity
// ============================================================================

/// Jaccard similarity as a percentage in `[0, 100]`; `0` when the union is empty
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64 * 100.0
    }
}

/// Deduplicated set of the tokens longer than `min_len` characters
pub fn word_set<S: AsRef<str>>(tokens: &[S], min_len: usize) -> HashSet<String> {
    tokens
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|token| token.chars().count() > min_len)
        .map(str::to_string)
        .collect()
}

/// Membership counts between two word sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetOverlap {
    /// Words present on both sides
    pub common: usize,
    /// Words only on the left
    pub unique_left: usize,
    /// Words only on the right
    pub unique_right: usize,
}

impl SetOverlap {
    pub fn of<T: Eq + Hash>(left: &HashSet<T>, right: &HashSet<T>) -> Self {
        let common = left.intersection(right).count();
        Self {
            common,
            unique_left: left.len() - common,
            unique_right: right.len() - common,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_text_metrics() {
        let metrics = TextMetrics::compute("The cat sat. On the mat!");
        assert_eq!(metrics.word_count, 6);
        assert_eq!(metrics.sentence_count, 2);
        assert_eq!(metrics.char_count, 24);
    }

    #[test]
    fn test_percentage_guards_zero() {
        assert_eq!(percentage(3, 0), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(2, 3), 67);
    }

    #[test]
    fn test_levenshtein_known_values() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("same", "same"), 0);
    }

    #[test]
    fn test_levenshtein_base_cases() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abcd", ""), 4);
        assert_eq!(levenshtein("", ""), 0);
    }

    #[test]
    fn test_levenshtein_counts_code_points() {
        assert_eq!(levenshtein("café", "cafe"), 1);
        assert_eq!(levenshtein("日本語", "日本"), 1);
    }

    #[test]
    fn test_bounded_levenshtein() {
        assert_eq!(bounded_levenshtein("abc", "abd", 9), Some(1));
        assert_eq!(bounded_levenshtein("abc", "abd", 8), None);
        assert_eq!(bounded_levenshtein("", "abd", 0), Some(3));
    }

    #[test]
    fn test_levenshtein_similarity() {
        assert_eq!(levenshtein_similarity(0, 0, 0), 100);
        assert_eq!(levenshtein_similarity(3, 6, 7), 57);
        assert_eq!(levenshtein_similarity(4, 4, 0), 0);
    }

    #[test]
    fn test_jaccard() {
        let a = set(&["alpha", "beta", "gamma"]);
        let b = set(&["beta", "gamma", "delta"]);
        assert_eq!(jaccard(&a, &b), 50.0);
        assert_eq!(jaccard(&a, &a), 100.0);
    }

    #[test]
    fn test_jaccard_empty_sets() {
        let empty: HashSet<String> = HashSet::new();
        assert_eq!(jaccard(&empty, &empty), 0.0);
        assert_eq!(jaccard(&empty, &set(&["word"])), 0.0);
    }

    #[test]
    fn test_word_set_filters_short_tokens() {
        let tokens = vec!["a", "an", "the", "fox", "the", "über"];
        let words = word_set(&tokens, 2);
        assert_eq!(words, set(&["the", "fox", "über"]));
    }

    #[test]
    fn test_set_overlap() {
        let overlap = SetOverlap::of(&set(&["one", "two", "three"]), &set(&["two", "four"]));
        assert_eq!(
            overlap,
            SetOverlap {
                common: 1,
                unique_left: 2,
                unique_right: 1
            }
        );
    }

    proptest! {
        #[test]
        fn prop_levenshtein_is_symmetric(a in "\\PC{0,24}", b in "\\PC{0,24}") {
            prop_assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
        }

        #[test]
        fn prop_levenshtein_bounded_by_longer_length(a in "[a-d]{0,20}", b in "[a-d]{0,20}") {
            let distance = levenshtein(&a, &b);
            prop_assert!(distance <= a.chars().count().max(b.chars().count()));
            prop_assert_eq!(distance == 0, a == b);
        }

        #[test]
        fn prop_jaccard_bounds(
            a in prop::collection::hash_set("[a-f]{1,3}", 0..12),
            b in prop::collection::hash_set("[a-f]{1,3}", 0..12),
        ) {
            let score = jaccard(&a, &b);
            prop_assert!((0.0..=100.0).contains(&score));
            if !a.is_empty() {
                prop_assert_eq!(jaccard(&a, &a), 100.0);
            }
        }
    }
}

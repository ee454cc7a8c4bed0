//! Word n-grams and the common phrases shared by two documents

use std::collections::HashSet;

/// Default n-gram size for common phrases
pub const DEFAULT_NGRAM_SIZE: usize = 3;

/// Every window of `n` consecutive tokens, joined by single spaces.
///
/// Returns `max(0, len - n + 1)` n-grams; empty when `n` is zero.
pub fn ngrams<S: AsRef<str>>(tokens: &[S], n: usize) -> Vec<String> {
    if n == 0 || tokens.len() < n {
        return Vec::new();
    }

    tokens
        .windows(n)
        .map(|window| {
            window
                .iter()
                .map(AsRef::<str>::as_ref)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// N-grams of `left` that also occur in `right`, in left-hand order,
/// deduplicated and truncated to `limit`.
pub fn common_phrases<S: AsRef<str>>(left: &[S], right: &[S], n: usize, limit: usize) -> Vec<String> {
    let right_ngrams: HashSet<String> = ngrams(right, n).into_iter().collect();
    let mut seen = HashSet::new();

    ngrams(left, n)
        .into_iter()
        .filter(|gram| right_ngrams.contains(gram))
        .filter(|gram| seen.insert(gram.clone()))
        .take(limit)
        .collect()
}

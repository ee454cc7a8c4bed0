//! Diff scripts: ordered runs of equal, added and removed content
//!
//! A [`DiffScript`] is built from an algorithm's per-token edit sequence by
//! merging adjacent tokens of the same kind. Within each change block every
//! `Removed` run precedes the `Added` run, and two adjacent segments never
//! share a kind. Concatenating the non-`Removed` segments rebuilds the
//! right-hand input; concatenating the non-`Added` segments rebuilds the left.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithm::{DiffAlgorithm, Edit};
use crate::metrics::count_words;
use crate::tokenizers::{CharacterTokenizer, Tokenizer, WordTokenizer};

/// Kind of a diff segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Present on both sides
    Equal,
    /// Only in the right-hand input
    Added,
    /// Only in the left-hand input
    Removed,
}

/// Content of a diff segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiffValue {
    /// Contiguous text (character and word diffs)
    Text(String),
    /// Whole items such as sentences (array diffs)
    Items(Vec<String>),
}

impl DiffValue {
    /// The pieces this value contributes when a side is rebuilt
    pub fn pieces(&self) -> Vec<&str> {
        match self {
            DiffValue::Text(text) => vec![text.as_str()],
            DiffValue::Items(items) => items.iter().map(String::as_str).collect(),
        }
    }

    /// Number of whitespace-delimited, non-empty tokens in this value
    pub fn word_count(&self) -> usize {
        match self {
            DiffValue::Text(text) => count_words(text),
            DiffValue::Items(items) => items.iter().map(|item| count_words(item)).sum(),
        }
    }
}

/// A single run of the diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub kind: SegmentKind,
    pub value: DiffValue,
}

impl DiffSegment {
    pub fn new(kind: SegmentKind, value: DiffValue) -> Self {
        Self { kind, value }
    }

    /// Whether this segment belongs to the left-hand input
    pub fn in_left(&self) -> bool {
        self.kind != SegmentKind::Added
    }

    /// Whether this segment belongs to the right-hand input
    pub fn in_right(&self) -> bool {
        self.kind != SegmentKind::Removed
    }
}

/// How tokens of one run are combined into a [`DiffValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueShape {
    Text,
    Items,
}

impl ValueShape {
    fn build(self, tokens: &[&str]) -> DiffValue {
        match self {
            ValueShape::Text => DiffValue::Text(tokens.concat()),
            ValueShape::Items => DiffValue::Items(tokens.iter().map(|t| t.to_string()).collect()),
        }
    }
}

/// Ordered sequence of diff segments
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiffScript {
    segments: Vec<DiffSegment>,
}

impl DiffScript {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_edits(edits: &[Edit], original: &[&str], modified: &[&str], shape: ValueShape) -> Self {
        let mut builder = ScriptBuilder::new(shape);
        let (mut i, mut j) = (0, 0);

        for edit in edits {
            match edit {
                Edit::Equal => {
                    builder.aligned(original[i], modified[j]);
                    i += 1;
                    j += 1;
                }
                Edit::Delete => {
                    builder.removed(original[i]);
                    i += 1;
                }
                Edit::Insert => {
                    builder.added(modified[j]);
                    j += 1;
                }
            }
        }

        builder.finish()
    }

    /// All segments in order
    pub fn segments(&self) -> &[DiffSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when the script contains only `Equal` segments
    pub fn is_unchanged(&self) -> bool {
        self.segments.iter().all(|s| s.kind == SegmentKind::Equal)
    }

    /// Copy of the first `limit` segments
    pub fn truncated(&self, limit: usize) -> Self {
        Self {
            segments: self.segments.iter().take(limit).cloned().collect(),
        }
    }

    /// Pieces of the left-hand input, in order
    pub fn left_pieces(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter(|s| s.in_left())
            .flat_map(|s| s.value.pieces())
            .collect()
    }

    /// Pieces of the right-hand input, in order
    pub fn right_pieces(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter(|s| s.in_right())
            .flat_map(|s| s.value.pieces())
            .collect()
    }

    /// The left-hand input rebuilt from the script
    pub fn reconstruct_left(&self) -> String {
        self.left_pieces().concat()
    }

    /// The right-hand input rebuilt from the script
    pub fn reconstruct_right(&self) -> String {
        self.right_pieces().concat()
    }

    /// Word totals per kind over the whole script
    pub fn word_counts(&self) -> WordCounts {
        let mut counts = WordCounts::default();
        for segment in &self.segments {
            let words = segment.value.word_count();
            match segment.kind {
                SegmentKind::Added => counts.added += words,
                SegmentKind::Removed => counts.removed += words,
                SegmentKind::Equal => counts.unchanged += words,
            }
        }
        counts
    }
}

impl fmt::Display for DiffScript {
    /// Inline rendering: `[-removed-]` and `{+added+}` around changed runs
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            let body = segment.value.pieces().join(" | ");
            match segment.kind {
                SegmentKind::Equal => write!(f, "{}", body)?,
                SegmentKind::Removed => write!(f, "[-{}-]", body)?,
                SegmentKind::Added => write!(f, "{{+{}+}}", body)?,
            }
        }
        Ok(())
    }
}

/// Word totals of a diff script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WordCounts {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
}

/// Accumulates runs and emits merged segments
struct ScriptBuilder<'a> {
    shape: ValueShape,
    segments: Vec<DiffSegment>,
    equal: Vec<&'a str>,
    removed: Vec<&'a str>,
    added: Vec<&'a str>,
}

impl<'a> ScriptBuilder<'a> {
    fn new(shape: ValueShape) -> Self {
        Self {
            shape,
            segments: Vec::new(),
            equal: Vec::new(),
            removed: Vec::new(),
            added: Vec::new(),
        }
    }

    /// Tokens aligned by the algorithm. Their shared prefix is unchanged and
    /// whatever follows it on either side becomes a change.
    fn aligned(&mut self, original: &'a str, modified: &'a str) {
        if original == modified {
            self.equal(original);
            return;
        }

        let shared = shared_prefix_len(original, modified);
        self.equal(&original[..shared]);
        self.removed(&original[shared..]);
        self.added(&modified[shared..]);
    }

    fn equal(&mut self, token: &'a str) {
        if token.is_empty() {
            return;
        }
        self.flush_changes();
        self.equal.push(token);
    }

    fn removed(&mut self, token: &'a str) {
        if token.is_empty() {
            return;
        }
        self.flush_equal();
        self.removed.push(token);
    }

    fn added(&mut self, token: &'a str) {
        if token.is_empty() {
            return;
        }
        self.flush_equal();
        self.added.push(token);
    }

    fn flush_equal(&mut self) {
        if !self.equal.is_empty() {
            let value = self.shape.build(&self.equal);
            self.segments.push(DiffSegment::new(SegmentKind::Equal, value));
            self.equal.clear();
        }
    }

    fn flush_changes(&mut self) {
        if !self.removed.is_empty() {
            let value = self.shape.build(&self.removed);
            self.segments.push(DiffSegment::new(SegmentKind::Removed, value));
            self.removed.clear();
        }
        if !self.added.is_empty() {
            let value = self.shape.build(&self.added);
            self.segments.push(DiffSegment::new(SegmentKind::Added, value));
            self.added.clear();
        }
    }

    fn finish(mut self) -> DiffScript {
        self.flush_equal();
        self.flush_changes();
        DiffScript {
            segments: self.segments,
        }
    }
}

/// Byte length of the longest common prefix, on a char boundary
fn shared_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((pos, _), _)| pos)
        .unwrap_or_else(|| a.len().min(b.len()))
}

// ============================================================================
// Diff entry points
// ============================================================================

/// Diff two texts after splitting them with `tokenizer`.
///
/// The tokenizer must be lossless for the script to rebuild the inputs.
/// Tokens are aligned on their [`Tokenizer::match_key`].
pub fn diff_text(
    algorithm: &dyn DiffAlgorithm,
    tokenizer: &dyn Tokenizer,
    original: &str,
    modified: &str,
) -> DiffScript {
    let original_tokens = tokenizer.tokenize(original);
    let modified_tokens = tokenizer.tokenize(modified);

    let original_keys: Vec<&str> = original_tokens.iter().map(|&t| tokenizer.match_key(t)).collect();
    let modified_keys: Vec<&str> = modified_tokens.iter().map(|&t| tokenizer.match_key(t)).collect();

    let edits = algorithm.compute(&original_keys, &modified_keys);
    DiffScript::from_edits(&edits, &original_tokens, &modified_tokens, ValueShape::Text)
}

/// Character-level diff
pub fn diff_chars(algorithm: &dyn DiffAlgorithm, original: &str, modified: &str) -> DiffScript {
    diff_text(algorithm, &CharacterTokenizer, original, modified)
}

/// Word-level diff; each word carries its trailing whitespace
pub fn diff_words(algorithm: &dyn DiffAlgorithm, original: &str, modified: &str) -> DiffScript {
    diff_text(algorithm, &WordTokenizer::new(), original, modified)
}

/// Array diff over opaque items, e.g. sentence lists
pub fn diff_items<S: AsRef<str>>(algorithm: &dyn DiffAlgorithm, original: &[S], modified: &[S]) -> DiffScript {
    let original: Vec<&str> = original.iter().map(AsRef::<str>::as_ref).collect();
    let modified: Vec<&str> = modified.iter().map(AsRef::<str>::as_ref).collect();
    let edits = algorithm.compute(&original, &modified);
    DiffScript::from_edits(&edits, &original, &modified, ValueShape::Items)
}

/// Sentence-level diff over sentence lists
pub fn diff_sentences<S: AsRef<str>>(algorithm: &dyn DiffAlgorithm, original: &[S], modified: &[S]) -> DiffScript {
    diff_items(algorithm, original, modified)
}

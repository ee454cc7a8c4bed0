//! Diff algorithms implementation
//!
//! Provides the algorithms that compute an edit sequence between two token
//! sequences. Tokens are opaque string slices: characters, words with their
//! trailing whitespace, or whole sentences.
pub mod lcs;
pub mod myers;

pub use lcs::LcsAlgorithm;
pub use myers::MyersAlgorithm;

use crate::config::{self, CompareConfig};

/// A single step of an edit sequence, covering exactly one token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edit {
    /// The token is present on both sides
    Equal,
    /// The token only exists in the original
    Delete,
    /// The token only exists in the modified sequence
    Insert,
}

/// Trait for diff algorithms
pub trait DiffAlgorithm: Send + Sync {
    /// Compute the edit sequence turning `original` into `modified`.
    ///
    /// The result holds one `Equal` or `Delete` per original token and one
    /// `Equal` or `Insert` per modified token, in order.
    fn compute(&self, original: &[&str], modified: &[&str]) -> Vec<Edit>;

    /// Get the name of this algorithm
    fn name(&self) -> &str;
}

/// Instantiate the algorithm selected in the configuration
pub fn from_config(config: &CompareConfig) -> Box<dyn DiffAlgorithm> {
    match config.algorithm {
        config::DiffAlgorithm::Myers => Box::new(MyersAlgorithm::new()),
        config::DiffAlgorithm::Lcs => Box::new(LcsAlgorithm::new().with_cell_limit(config.lcs_cell_limit)),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn common_prefix_len(original: &[&str], modified: &[&str]) -> usize {
    original
        .iter()
        .zip(modified)
        .take_while(|(a, b)| a == b)
        .count()
}

fn common_suffix_len(original: &[&str], modified: &[&str]) -> usize {
    original
        .iter()
        .rev()
        .zip(modified.iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}

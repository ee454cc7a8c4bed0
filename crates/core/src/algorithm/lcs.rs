use log::debug;

use crate::algorithm::{common_prefix_len, common_suffix_len, DiffAlgorithm, Edit, MyersAlgorithm};

/// Default upper bound on the number of table cells
pub const DEFAULT_CELL_LIMIT: usize = 4_000_000;

/// Dynamic-programming longest common subsequence diff.
///
/// Only the span between the common prefix and suffix gets a table. When
/// that table would hold more than `cell_limit` cells the span is diffed
/// with [`MyersAlgorithm`] instead, which finds a script of the same cost.
#[derive(Debug, Clone, Copy)]
pub struct LcsAlgorithm {
    cell_limit: usize,
}

impl LcsAlgorithm {
    pub fn new() -> Self {
        Self {
            cell_limit: DEFAULT_CELL_LIMIT,
        }
    }

    /// Set the table size above which Myers is used
    pub fn with_cell_limit(mut self, cells: usize) -> Self {
        self.cell_limit = cells;
        self
    }
}

impl Default for LcsAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffAlgorithm for LcsAlgorithm {
    fn compute(&self, original: &[&str], modified: &[&str]) -> Vec<Edit> {
        let prefix = common_prefix_len(original, modified);
        let suffix = common_suffix_len(&original[prefix..], &modified[prefix..]);
        let old = &original[prefix..original.len() - suffix];
        let new = &modified[prefix..modified.len() - suffix];

        let mut edits = Vec::with_capacity(original.len() + modified.len());
        edits.extend(std::iter::repeat(Edit::Equal).take(prefix));

        let cells = (old.len() + 1).saturating_mul(new.len() + 1);
        if cells > self.cell_limit {
            debug!(
                "lcs table of {} cells exceeds limit of {}, diffing with myers",
                cells, self.cell_limit
            );
            edits.extend(MyersAlgorithm::new().compute(old, new));
        } else {
            SuffixTable::build(old, new).walk(old, new, &mut edits);
        }

        edits.extend(std::iter::repeat(Edit::Equal).take(suffix));
        edits
    }

    fn name(&self) -> &str {
        "lcs"
    }
}

/// LCS lengths of every pair of suffixes, row-major
struct SuffixTable {
    width: usize,
    lengths: Vec<usize>,
}

impl SuffixTable {
    fn build(old: &[&str], new: &[&str]) -> Self {
        let width = new.len() + 1;
        let mut table = Self {
            width,
            lengths: vec![0; (old.len() + 1) * width],
        };

        for i in (0..old.len()).rev() {
            for j in (0..new.len()).rev() {
                let value = if old[i] == new[j] {
                    table.get(i + 1, j + 1) + 1
                } else {
                    table.get(i + 1, j).max(table.get(i, j + 1))
                };
                table.lengths[i * width + j] = value;
            }
        }

        table
    }

    fn get(&self, i: usize, j: usize) -> usize {
        self.lengths[i * self.width + j]
    }

    /// Emit edits front to back. On ties a deletion goes first.
    fn walk(&self, old: &[&str], new: &[&str], edits: &mut Vec<Edit>) {
        let (mut i, mut j) = (0, 0);

        while i < old.len() && j < new.len() {
            if old[i] == new[j] {
                edits.push(Edit::Equal);
                i += 1;
                j += 1;
            } else if self.get(i + 1, j) >= self.get(i, j + 1) {
                edits.push(Edit::Delete);
                i += 1;
            } else {
                edits.push(Edit::Insert);
                j += 1;
            }
        }

        edits.extend(std::iter::repeat(Edit::Delete).take(old.len() - i));
        edits.extend(std::iter::repeat(Edit::Insert).take(new.len() - j));
    }
}

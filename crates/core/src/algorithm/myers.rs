use std::ops::{Index, IndexMut, Range};

use crate::algorithm::{common_prefix_len, common_suffix_len, DiffAlgorithm, Edit};

/// Myers O(ND) diff algorithm, linear-space variant.
///
/// Each step finds the middle snake of the remaining region and recurses on
/// both halves, so memory stays `O(n + m)` while the script stays minimal.
pub struct MyersAlgorithm;

impl MyersAlgorithm {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MyersAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffAlgorithm for MyersAlgorithm {
    fn compute(&self, original: &[&str], modified: &[&str]) -> Vec<Edit> {
        let mut edits = Vec::with_capacity(original.len().max(modified.len()));
        if original.is_empty() && modified.is_empty() {
            return edits;
        }

        let max_d = max_d(original.len(), modified.len());
        let mut vf = V::new(max_d);
        let mut vb = V::new(max_d);

        conquer(
            original,
            0..original.len(),
            modified,
            0..modified.len(),
            &mut vf,
            &mut vb,
            &mut edits,
        );

        edits
    }

    fn name(&self) -> &str {
        "myers"
    }
}

/// Furthest-reaching x per diagonal, indexed by a signed diagonal `k`
struct V {
    offset: isize,
    v: Vec<usize>,
}

impl V {
    fn new(max_d: usize) -> Self {
        Self {
            offset: max_d as isize,
            v: vec![0; 2 * max_d],
        }
    }
}

impl Index<isize> for V {
    type Output = usize;

    fn index(&self, index: isize) -> &usize {
        &self.v[(index + self.offset) as usize]
    }
}

impl IndexMut<isize> for V {
    fn index_mut(&mut self, index: isize) -> &mut usize {
        &mut self.v[(index + self.offset) as usize]
    }
}

fn max_d(len1: usize, len2: usize) -> usize {
    (len1 + len2 + 1) / 2 + 1
}

/// Find the start of the middle snake of `original[old]` / `modified[new]`,
/// in absolute coordinates. Both ranges must be non-empty.
fn find_middle_snake(
    original: &[&str],
    old: Range<usize>,
    modified: &[&str],
    new: Range<usize>,
    vf: &mut V,
    vb: &mut V,
) -> Option<(usize, usize)> {
    let n = old.len();
    let m = new.len();

    let delta = n as isize - m as isize;
    let odd = delta & 1 == 1;

    vf[1] = 0;
    vb[1] = 0;

    let d_max = max_d(n, m) as isize;
    for d in 0..d_max {
        // Forward path
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vf[k - 1] < vf[k + 1]) {
                vf[k + 1]
            } else {
                vf[k - 1] + 1
            };
            let y = (x as isize - k) as usize;
            let (x0, y0) = (x, y);

            if x < n && y < m {
                x += common_prefix_len(
                    &original[old.start + x..old.end],
                    &modified[new.start + y..new.end],
                );
            }

            vf[k] = x;

            if odd && (k - delta).abs() <= d - 1 && vf[k] + vb[-(k - delta)] >= n {
                return Some((old.start + x0, new.start + y0));
            }
        }

        // Backward path
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vb[k - 1] < vb[k + 1]) {
                vb[k + 1]
            } else {
                vb[k - 1] + 1
            };
            let mut y = (x as isize - k) as usize;

            if x < n && y < m {
                let advance = common_suffix_len(
                    &original[old.start..old.start + n - x],
                    &modified[new.start..new.start + m - y],
                );
                x += advance;
                y += advance;
            }

            vb[k] = x;

            if !odd && (k - delta).abs() <= d && vb[k] + vf[-(k - delta)] >= n {
                return Some((old.start + n - x, new.start + m - y));
            }
        }
    }

    None
}

fn conquer(
    original: &[&str],
    mut old: Range<usize>,
    modified: &[&str],
    mut new: Range<usize>,
    vf: &mut V,
    vb: &mut V,
    edits: &mut Vec<Edit>,
) {
    let prefix = common_prefix_len(&original[old.clone()], &modified[new.clone()]);
    edits.extend(std::iter::repeat(Edit::Equal).take(prefix));
    old.start += prefix;
    new.start += prefix;

    let suffix = common_suffix_len(&original[old.clone()], &modified[new.clone()]);
    old.end -= suffix;
    new.end -= suffix;

    if old.is_empty() && new.is_empty() {
        // nothing left between prefix and suffix
    } else if new.is_empty() {
        edits.extend(std::iter::repeat(Edit::Delete).take(old.len()));
    } else if old.is_empty() {
        edits.extend(std::iter::repeat(Edit::Insert).take(new.len()));
    } else if let Some((x, y)) =
        find_middle_snake(original, old.clone(), modified, new.clone(), vf, vb)
    {
        conquer(original, old.start..x, modified, new.start..y, vf, vb, edits);
        conquer(original, x..old.end, modified, y..new.end, vf, vb, edits);
    } else {
        edits.extend(std::iter::repeat(Edit::Delete).take(old.len()));
        edits.extend(std::iter::repeat(Edit::Insert).take(new.len()));
    }

    edits.extend(std::iter::repeat(Edit::Equal).take(suffix));
}

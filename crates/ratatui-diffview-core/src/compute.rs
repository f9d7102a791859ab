use std::ops::Range;

#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::DiffError;
use crate::line::DiffLine;

/// Size ceilings for [`compute_diff_bounded`].
///
/// The alignment table costs `(old_lines + 1) * (new_lines + 1)` cells of memory and time, so
/// interactive callers should refuse very large documents up front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiffLimits {
    pub max_lines_per_side: usize,
    pub max_table_cells: usize,
}

impl Default for DiffLimits {
    fn default() -> Self {
        Self {
            max_lines_per_side: 10_000,
            max_table_cells: 25_000_000,
        }
    }
}

impl DiffLimits {
    pub fn unbounded() -> Self {
        Self {
            max_lines_per_side: usize::MAX,
            max_table_cells: usize::MAX,
        }
    }

    pub fn check(&self, old_lines: usize, new_lines: usize) -> Result<(), DiffError> {
        if old_lines > self.max_lines_per_side || new_lines > self.max_lines_per_side {
            return Err(DiffError::TooManyLines {
                old_lines,
                new_lines,
                limit: self.max_lines_per_side,
            });
        }
        let cells = old_lines
            .saturating_add(1)
            .saturating_mul(new_lines.saturating_add(1));
        if cells > self.max_table_cells {
            return Err(DiffError::TableTooLarge {
                cells,
                limit: self.max_table_cells,
            });
        }
        Ok(())
    }
}

/// Splits text on `\n` with no other normalization.
///
/// A trailing newline yields a trailing empty line and `\r` is kept as content. The empty
/// string has no lines at all.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').collect()
}

/// Computes a line diff of two texts from their longest common subsequence.
///
/// Lines compare by exact content. Within each gap between matched lines, removals are
/// emitted before additions.
pub fn compute_diff(old_text: &str, new_text: &str) -> Vec<DiffLine> {
    let old = split_lines(old_text);
    let new = split_lines(new_text);
    diff_lines(&old, &new)
}

/// Like [`compute_diff`], but refuses inputs that exceed `limits` instead of allocating an
/// arbitrarily large alignment table.
pub fn compute_diff_bounded(
    old_text: &str,
    new_text: &str,
    limits: &DiffLimits,
) -> Result<Vec<DiffLine>, DiffError> {
    let old = split_lines(old_text);
    let new = split_lines(new_text);
    if let Err(err) = limits.check(old.len(), new.len()) {
        log::warn!("refusing to diff: {err}");
        return Err(err);
    }
    Ok(diff_lines(&old, &new))
}

fn diff_lines(old: &[&str], new: &[&str]) -> Vec<DiffLine> {
    let table = LcsTable::build(old, new);
    let matches = table.backtrack(old, new);
    log::debug!(
        "line diff: {} old lines, {} new lines, {} in common",
        old.len(),
        new.len(),
        matches.len()
    );

    let mut out = Vec::with_capacity(old.len() + new.len() - matches.len());
    let mut old_next = 0usize;
    let mut new_next = 0usize;
    for &(old_idx, new_idx) in &matches {
        push_gap(&mut out, old, new, old_next..old_idx, new_next..new_idx);
        out.push(DiffLine::unchanged(
            old[old_idx],
            line_number(old_idx),
            line_number(new_idx),
        ));
        old_next = old_idx + 1;
        new_next = new_idx + 1;
    }
    push_gap(&mut out, old, new, old_next..old.len(), new_next..new.len());
    out
}

fn push_gap(
    out: &mut Vec<DiffLine>,
    old: &[&str],
    new: &[&str],
    old_range: Range<usize>,
    new_range: Range<usize>,
) {
    for idx in old_range {
        out.push(DiffLine::removed(old[idx], line_number(idx)));
    }
    for idx in new_range {
        out.push(DiffLine::added(new[idx], line_number(idx)));
    }
}

fn line_number(idx: usize) -> u32 {
    u32::try_from(idx).map_or(u32::MAX, |n| n.saturating_add(1))
}

/// `cells[i * cols + j]` is the LCS length of `old[..i]` and `new[..j]`.
struct LcsTable {
    cols: usize,
    cells: Vec<u32>,
}

impl LcsTable {
    fn build(old: &[&str], new: &[&str]) -> Self {
        let cols = new.len() + 1;
        let mut cells = vec![0u32; (old.len() + 1) * cols];
        for i in 1..=old.len() {
            for j in 1..=new.len() {
                cells[i * cols + j] = if old[i - 1] == new[j - 1] {
                    cells[(i - 1) * cols + (j - 1)] + 1
                } else {
                    cells[(i - 1) * cols + j].max(cells[i * cols + (j - 1)])
                };
            }
        }
        Self { cols, cells }
    }

    fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.cols + j]
    }

    /// Matched `(old_index, new_index)` pairs in ascending order.
    ///
    /// On a tie the new side is stepped; the old side only when it is strictly longer. This
    /// rule fixes which of several optimal alignments is reported.
    fn backtrack(&self, old: &[&str], new: &[&str]) -> Vec<(usize, usize)> {
        let mut matches = Vec::new();
        let mut i = old.len();
        let mut j = new.len();
        while i > 0 && j > 0 {
            if old[i - 1] == new[j - 1] {
                matches.push((i - 1, j - 1));
                i -= 1;
                j -= 1;
            } else if self.get(i - 1, j) > self.get(i, j - 1) {
                i -= 1;
            } else {
                j -= 1;
            }
        }
        matches.reverse();
        matches
    }
}

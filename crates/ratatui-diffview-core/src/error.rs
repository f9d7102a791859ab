use thiserror::Error;

/// Reasons [`compute_diff_bounded`](crate::compute::compute_diff_bounded) refuses an input.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DiffError {
    #[error("input too large to diff: {old_lines} old / {new_lines} new lines (limit {limit} per side)")]
    TooManyLines {
        old_lines: usize,
        new_lines: usize,
        limit: usize,
    },

    #[error("alignment table of {cells} cells exceeds the limit of {limit}")]
    TableTooLarge { cells: usize, limit: usize },
}

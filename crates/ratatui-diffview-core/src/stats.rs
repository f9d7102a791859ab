use std::fmt;

#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::line::DiffLine;
use crate::line::DiffLineKind;

/// Added/removed line counts; displays as `+added -removed`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
}

impl DiffStats {
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.removed == 0
    }

    pub fn total(&self) -> usize {
        self.added + self.removed
    }
}

impl fmt::Display for DiffStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{} -{}", self.added, self.removed)
    }
}

pub fn calculate_diff_stats(lines: &[DiffLine]) -> DiffStats {
    let mut stats = DiffStats::default();
    for line in lines {
        match line.kind {
            DiffLineKind::Added => stats.added += 1,
            DiffLineKind::Removed => stats.removed += 1,
            DiffLineKind::Unchanged | DiffLineKind::Header => {}
        }
    }
    stats
}

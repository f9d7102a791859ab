use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::line::DiffLine;
use crate::line::DiffLineKind;

/// Unchanged lines kept visible on each side of a collapsed region.
pub const CONTEXT_LINES: usize = 2;

/// Unchanged runs this short are never collapsed, whatever the threshold.
pub const MIN_COLLAPSIBLE_RUN: usize = 2 * CONTEXT_LINES + 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GroupMode {
    Expanded,
    Collapsed,
}

/// A contiguous slice of the flat line sequence rendered as one unit.
///
/// `start_index` is the position of the first line in the flat sequence, which makes it a
/// stable key for expansion requests across regroupings. A [`GroupMode::Collapsed`] group
/// only ever holds unchanged lines; `revealed` records whether its key was in the caller's
/// expansion set. The mode stays `Collapsed` either way and the renderer decides what to hide.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffGroup {
    pub mode: GroupMode,
    pub lines: Vec<DiffLine>,
    pub start_index: usize,
    pub revealed: bool,
}

impl DiffGroup {
    fn expanded(lines: Vec<DiffLine>, start_index: usize) -> Self {
        Self {
            mode: GroupMode::Expanded,
            lines,
            start_index,
            revealed: false,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.mode == GroupMode::Collapsed
    }

    /// Collapsed and not revealed by the caller.
    pub fn is_hidden(&self) -> bool {
        self.is_collapsed() && !self.revealed
    }

    /// Number of lines a placeholder stands in for; 0 for expanded groups.
    pub fn hidden_len(&self) -> usize {
        if self.is_collapsed() {
            self.lines.len()
        } else {
            0
        }
    }

    /// One past the flat index of the group's last line.
    pub fn end_index(&self) -> usize {
        self.start_index + self.lines.len()
    }
}

/// Grouping configuration for [`group_with_options`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GroupOptions {
    /// Unchanged runs up to this length stay fully expanded.
    pub max_unchanged_run: usize,
}

impl Default for GroupOptions {
    fn default() -> Self {
        Self {
            max_unchanged_run: 8,
        }
    }
}

pub fn group_with_options(
    lines: &[DiffLine],
    options: &GroupOptions,
    expanded: &HashSet<usize>,
) -> Vec<DiffGroup> {
    group_for_display(lines, options.max_unchanged_run, expanded)
}

/// Partitions a flat line sequence into display groups.
///
/// Every added, removed or header line becomes its own expanded group. A run of unchanged lines
/// longer than `max_unchanged_run` and at least [`MIN_COLLAPSIBLE_RUN`] long is split into a
/// two-line head, a collapsed middle and a two-line tail. Other runs stay whole.
pub fn group_for_display(
    lines: &[DiffLine],
    max_unchanged_run: usize,
    expanded: &HashSet<usize>,
) -> Vec<DiffGroup> {
    let mut groups = Vec::new();
    let mut run_start = 0usize;
    let mut run_len = 0usize;

    for (idx, line) in lines.iter().enumerate() {
        if line.kind == DiffLineKind::Unchanged {
            if run_len == 0 {
                run_start = idx;
            }
            run_len += 1;
            continue;
        }
        flush_run(
            &mut groups,
            &lines[run_start..run_start + run_len],
            run_start,
            max_unchanged_run,
            expanded,
        );
        run_len = 0;
        groups.push(DiffGroup::expanded(vec![line.clone()], idx));
    }
    flush_run(
        &mut groups,
        &lines[run_start..run_start + run_len],
        run_start,
        max_unchanged_run,
        expanded,
    );

    groups
}

fn flush_run(
    groups: &mut Vec<DiffGroup>,
    run: &[DiffLine],
    start_index: usize,
    max_unchanged_run: usize,
    expanded: &HashSet<usize>,
) {
    if run.is_empty() {
        return;
    }
    log::trace!(
        "unchanged run of {} lines at {start_index} (threshold {max_unchanged_run})",
        run.len()
    );

    if run.len() <= max_unchanged_run || run.len() < MIN_COLLAPSIBLE_RUN {
        groups.push(DiffGroup::expanded(run.to_vec(), start_index));
        return;
    }

    let tail = run.len() - CONTEXT_LINES;
    let middle_start = start_index + CONTEXT_LINES;
    groups.push(DiffGroup::expanded(run[..CONTEXT_LINES].to_vec(), start_index));
    groups.push(DiffGroup {
        mode: GroupMode::Collapsed,
        lines: run[CONTEXT_LINES..tail].to_vec(),
        start_index: middle_start,
        revealed: expanded.contains(&middle_start),
    });
    groups.push(DiffGroup::expanded(run[tail..].to_vec(), start_index + tail));
}

use std::collections::HashMap;
use std::collections::HashSet;

use proptest::prelude::*;
use ratatui_diffview_core::DiffLine;
use ratatui_diffview_core::DiffLineKind;
use ratatui_diffview_core::DiffStats;
use ratatui_diffview_core::GroupMode;
use ratatui_diffview_core::calculate_diff_stats;
use ratatui_diffview_core::compute::split_lines;
use ratatui_diffview_core::compute_diff;
use ratatui_diffview_core::group_for_display;
use ratatui_diffview_core::parse_unified_diff;
use similar::Algorithm;
use similar::DiffTag;

/// Short texts over a tiny alphabet so lines repeat often.
fn text() -> impl Strategy<Value = String> {
    prop::collection::vec("[abc]{0,2}", 0..12).prop_map(|lines| lines.join("\n"))
}

fn kind() -> impl Strategy<Value = DiffLineKind> {
    prop_oneof![
        4 => Just(DiffLineKind::Unchanged),
        1 => Just(DiffLineKind::Added),
        1 => Just(DiffLineKind::Removed),
        1 => Just(DiffLineKind::Header),
    ]
}

fn lines_of_kinds(kinds: &[DiffLineKind]) -> Vec<DiffLine> {
    kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let n = i as u32 + 1;
            match kind {
                DiffLineKind::Added => DiffLine::added(format!("l{n}"), n),
                DiffLineKind::Removed => DiffLine::removed(format!("l{n}"), n),
                DiffLineKind::Unchanged => DiffLine::unchanged(format!("l{n}"), n, n),
                DiffLineKind::Header => DiffLine::header("@@"),
            }
        })
        .collect()
}

/// Top-down memoized LCS length, kept independent of the table the engine builds.
fn lcs_len(a: &[&str], b: &[&str]) -> usize {
    fn go<'a>(
        a: &[&'a str],
        b: &[&'a str],
        i: usize,
        j: usize,
        memo: &mut HashMap<(usize, usize), usize>,
    ) -> usize {
        if i == a.len() || j == b.len() {
            return 0;
        }
        if let Some(&v) = memo.get(&(i, j)) {
            return v;
        }
        let v = if a[i] == b[j] {
            1 + go(a, b, i + 1, j + 1, memo)
        } else {
            go(a, b, i + 1, j, memo).max(go(a, b, i, j + 1, memo))
        };
        memo.insert((i, j), v);
        v
    }
    go(a, b, 0, 0, &mut HashMap::new())
}

fn is_subsequence(needle: &[&str], haystack: &[&str]) -> bool {
    let mut it = haystack.iter();
    needle.iter().all(|n| it.any(|h| h == n))
}

fn count(lines: &[DiffLine], kind: DiffLineKind) -> usize {
    lines.iter().filter(|l| l.kind == kind).count()
}

fn reference_stats(old: &str, new: &str) -> DiffStats {
    let old = split_lines(old);
    let new = split_lines(new);
    let mut stats = DiffStats::default();
    for op in similar::capture_diff_slices(Algorithm::Myers, &old, &new) {
        match op.tag() {
            DiffTag::Equal => {}
            DiffTag::Delete => stats.removed += op.old_range().len(),
            DiffTag::Insert => stats.added += op.new_range().len(),
            DiffTag::Replace => {
                stats.removed += op.old_range().len();
                stats.added += op.new_range().len();
            }
        }
    }
    stats
}

proptest! {
    #[test]
    fn removed_and_unchanged_conserve_old_lines(old in text(), new in text()) {
        let lines = compute_diff(&old, &new);
        let unchanged = count(&lines, DiffLineKind::Unchanged);
        prop_assert_eq!(count(&lines, DiffLineKind::Removed) + unchanged, split_lines(&old).len());
        prop_assert_eq!(count(&lines, DiffLineKind::Added) + unchanged, split_lines(&new).len());
    }

    #[test]
    fn unchanged_lines_form_a_longest_common_subsequence(old in text(), new in text()) {
        let old_lines = split_lines(&old);
        let new_lines = split_lines(&new);
        let lines = compute_diff(&old, &new);
        let common: Vec<&str> = lines
            .iter()
            .filter(|l| l.kind == DiffLineKind::Unchanged)
            .map(|l| l.content.as_str())
            .collect();
        prop_assert!(is_subsequence(&common, &old_lines));
        prop_assert!(is_subsequence(&common, &new_lines));
        prop_assert_eq!(common.len(), lcs_len(&old_lines, &new_lines));
    }

    #[test]
    fn line_numbers_count_up_from_one_on_each_side(old in text(), new in text()) {
        let lines = compute_diff(&old, &new);
        let olds: Vec<u32> = lines.iter().filter_map(|l| l.old_line_number).collect();
        let news: Vec<u32> = lines.iter().filter_map(|l| l.new_line_number).collect();
        prop_assert_eq!(olds, (1..=split_lines(&old).len() as u32).collect::<Vec<_>>());
        prop_assert_eq!(news, (1..=split_lines(&new).len() as u32).collect::<Vec<_>>());
        for line in &lines {
            match line.kind {
                DiffLineKind::Added => prop_assert!(line.old_line_number.is_none()),
                DiffLineKind::Removed => prop_assert!(line.new_line_number.is_none()),
                DiffLineKind::Unchanged => {}
                DiffLineKind::Header => prop_assert!(false, "computed diffs have no headers"),
            }
        }
    }

    #[test]
    fn identical_texts_have_no_changes(text in text()) {
        let lines = compute_diff(&text, &text);
        prop_assert!(lines.iter().all(|l| l.kind == DiffLineKind::Unchanged));
        prop_assert!(calculate_diff_stats(&lines).is_empty());
    }

    #[test]
    fn parsing_is_idempotent(
        body in prop::collection::vec("(@@ -[0-9] \\+[0-9] @@|[ +-][abc]{0,3}|@@ x|x?)", 0..16)
    ) {
        let diff = body.join("\n");
        prop_assert_eq!(parse_unified_diff(&diff), parse_unified_diff(&diff));
    }

    #[test]
    fn collapsed_groups_hold_only_unchanged_lines_and_never_touch(
        kinds in prop::collection::vec(kind(), 0..40),
        max_run in 0usize..8,
    ) {
        let lines = lines_of_kinds(&kinds);
        let groups = group_for_display(&lines, max_run, &HashSet::new());

        for pair in groups.windows(2) {
            prop_assert!(!(pair[0].is_collapsed() && pair[1].is_collapsed()));
        }
        for group in groups.iter().filter(|g| g.mode == GroupMode::Collapsed) {
            prop_assert!(group.lines.iter().all(|l| l.kind == DiffLineKind::Unchanged));
        }

        let flattened: Vec<DiffLine> = groups.iter().flat_map(|g| g.lines.clone()).collect();
        prop_assert_eq!(flattened, lines);
    }
}

#[test]
fn stats_agree_with_reference_diff_on_fixtures() {
    let fixtures = [
        ("a\nb\nc", "a\nx\nc"),
        ("", "one\ntwo"),
        ("one\ntwo", ""),
        ("a\nb\nc\nd\ne", "a\nc\ne\nf"),
        ("fn main() {\n}\n", "fn main() {\n    run();\n}\n"),
        ("x\ny\nz", "z\ny\nx"),
        ("same", "same"),
    ];
    for (old, new) in fixtures {
        assert_eq!(
            calculate_diff_stats(&compute_diff(old, new)),
            reference_stats(old, new),
            "old={old:?} new={new:?}"
        );
    }
}

#[test]
fn concrete_scenarios() {
    assert_eq!(
        compute_diff("a\nb\nc", "a\nx\nc"),
        vec![
            DiffLine::unchanged("a", 1, 1),
            DiffLine::removed("b", 2),
            DiffLine::added("x", 2),
            DiffLine::unchanged("c", 3, 3),
        ]
    );
    assert_eq!(
        parse_unified_diff("@@ -1,2 +1,3 @@\n a\n+b\n c"),
        vec![
            DiffLine::header("@@ -1,2 +1,3 @@"),
            DiffLine::unchanged("a", 1, 1),
            DiffLine::added("b", 2),
            DiffLine::unchanged("c", 2, 3),
        ]
    );
}

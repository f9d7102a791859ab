use std::borrow::Cow;
use std::collections::HashSet;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::text::Text;
use ratatui_diffview_core::DiffError;
use ratatui_diffview_core::DiffGroup;
use ratatui_diffview_core::DiffLimits;
use ratatui_diffview_core::DiffLine;
use ratatui_diffview_core::DiffLineKind;
use ratatui_diffview_core::DiffStats;
use ratatui_diffview_core::GroupOptions;
use ratatui_diffview_core::calculate_diff_stats;
use ratatui_diffview_core::compute_diff;
use ratatui_diffview_core::compute_diff_bounded;
use ratatui_diffview_core::group_for_display;
use ratatui_diffview_core::parse_unified_diff;

use crate::render;
use crate::theme::Theme;

/// Gutter marker of a placeholder row.
pub const PLACEHOLDER_MARKER: char = '⋯';

/// Options for [`DiffView`].
#[derive(Clone, Debug)]
pub struct DiffViewOptions {
    pub show_line_numbers: bool,
    pub show_scrollbar: bool,
    /// Unchanged runs longer than this collapse behind a placeholder row.
    pub max_unchanged_run: usize,
}

impl Default for DiffViewOptions {
    fn default() -> Self {
        Self {
            show_line_numbers: true,
            show_scrollbar: true,
            max_unchanged_run: GroupOptions::default().max_unchanged_run,
        }
    }
}

/// One rendered row: a line of the flat sequence, or a placeholder for a hidden group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Row {
    Line(usize),
    Placeholder { start_index: usize, hidden: usize },
}

/// A scrollable line-diff viewer with expandable "N unchanged lines" placeholders.
///
/// - Content comes from [`set_texts`](Self::set_texts) (computed diff) or
///   [`set_unified_diff`](Self::set_unified_diff) (parsed diff).
/// - The view owns the expansion set and regroups whenever it changes; expansion keys are the
///   `start_index` of collapsed groups and reset when new content is set.
/// - The view is event-loop agnostic: call [`toggle_group`](Self::toggle_group),
///   [`handle_click`](Self::handle_click) or the scroll methods from your app, then
///   [`render_ref`](Self::render_ref).
#[derive(Clone, Debug, Default)]
pub struct DiffView {
    lines: Vec<DiffLine>,
    groups: Vec<DiffGroup>,
    rows: Vec<Row>,
    expanded: HashSet<usize>,
    stats: DiffStats,
    options: DiffViewOptions,
    max_old_lineno: u32,
    max_new_lineno: u32,
    max_content_width: u32,
    scroll_x: u32,
    scroll_y: u32,
    viewport_w: u16,
    viewport_h: u16,
}

impl DiffView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DiffViewOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn set_options(&mut self, options: DiffViewOptions) {
        self.options = options;
        self.regroup();
    }

    /// Diffs two texts line by line and shows the result.
    pub fn set_texts(&mut self, old: &str, new: &str) {
        self.set_lines(compute_diff(old, new));
    }

    /// Like [`set_texts`](Self::set_texts), but leaves the view untouched when the input
    /// exceeds `limits`.
    pub fn set_texts_bounded(
        &mut self,
        old: &str,
        new: &str,
        limits: &DiffLimits,
    ) -> Result<(), DiffError> {
        let lines = compute_diff_bounded(old, new, limits)?;
        self.set_lines(lines);
        Ok(())
    }

    /// Parses a unified diff string and shows it.
    pub fn set_unified_diff(&mut self, diff: &str) {
        self.set_lines(parse_unified_diff(diff));
    }

    /// Shows an already classified flat line sequence.
    pub fn set_lines(&mut self, lines: Vec<DiffLine>) {
        self.stats = calculate_diff_stats(&lines);
        self.max_old_lineno = lines
            .iter()
            .filter_map(|l| l.old_line_number)
            .max()
            .unwrap_or(0);
        self.max_new_lineno = lines
            .iter()
            .filter_map(|l| l.new_line_number)
            .max()
            .unwrap_or(0);
        self.lines = lines;
        self.expanded.clear();
        self.scroll_x = 0;
        self.scroll_y = 0;
        self.regroup();
    }

    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }

    pub fn groups(&self) -> &[DiffGroup] {
        &self.groups
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn stats(&self) -> DiffStats {
        self.stats
    }

    pub fn scroll_offset(&self) -> (u32, u32) {
        (self.scroll_x, self.scroll_y)
    }

    pub fn is_expanded(&self, start_index: usize) -> bool {
        self.expanded.contains(&start_index)
    }

    /// Reveals or hides the collapsed group starting at `start_index`.
    ///
    /// Returns `false` if no collapsed group starts there.
    pub fn toggle_group(&mut self, start_index: usize) -> bool {
        let collapsible = self
            .groups
            .iter()
            .any(|g| g.is_collapsed() && g.start_index == start_index);
        if !collapsible {
            log::debug!("no collapsed group starts at line {start_index}");
            return false;
        }
        if !self.expanded.remove(&start_index) {
            self.expanded.insert(start_index);
        }
        self.regroup();
        true
    }

    pub fn expand_all(&mut self) {
        self.expanded = self
            .groups
            .iter()
            .filter(|g| g.is_collapsed())
            .map(|g| g.start_index)
            .collect();
        self.regroup();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
        self.regroup();
    }

    /// The collapsed group a row belongs to, hidden or revealed.
    pub fn group_at_row(&self, row: usize) -> Option<usize> {
        match *self.rows.get(row)? {
            Row::Placeholder { start_index, .. } => Some(start_index),
            Row::Line(idx) => {
                let pos = self.groups.partition_point(|g| g.start_index <= idx);
                let group = self.groups.get(pos.checked_sub(1)?)?;
                group.is_collapsed().then_some(group.start_index)
            }
        }
    }

    /// Toggles the collapsed group under a click at `(x, y)` inside `area`.
    ///
    /// Returns `true` if a redraw is needed.
    pub fn handle_click(&mut self, area: Rect, x: u16, y: u16) -> bool {
        let (content_area, _) = self.split_scrollbar(area);
        let inside = x >= content_area.x
            && x < content_area.x.saturating_add(content_area.width)
            && y >= content_area.y
            && y < content_area.y.saturating_add(content_area.height);
        if !inside {
            return false;
        }
        let row = self.scroll_y as usize + (y - content_area.y) as usize;
        match self.group_at_row(row) {
            Some(start_index) => self.toggle_group(start_index),
            None => false,
        }
    }

    /// Updates viewport size for `area` (accounting for gutter and scrollbar).
    pub fn set_viewport(&mut self, area: Rect) {
        let (content_area, _) = self.split_scrollbar(area);
        self.viewport_w = content_area.width.saturating_sub(self.gutter_width());
        self.viewport_h = content_area.height;
        self.clamp();
    }

    pub fn scroll_y_by(&mut self, delta: i32) {
        let next = self.scroll_y as i64 + delta as i64;
        self.scroll_y = next.clamp(0, self.max_scroll_y() as i64) as u32;
    }

    pub fn scroll_x_by(&mut self, delta: i32) {
        let next = self.scroll_x as i64 + delta as i64;
        self.scroll_x = next.clamp(0, self.max_scroll_x() as i64) as u32;
    }

    pub fn page_down(&mut self) {
        self.scroll_y_by(self.viewport_h.saturating_sub(1) as i32);
    }

    pub fn page_up(&mut self) {
        self.scroll_y_by(-(self.viewport_h.saturating_sub(1) as i32));
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.set_viewport(area);

        let (content_area, scrollbar_x) = self.split_scrollbar(area);
        let gutter_w = self.gutter_width().min(content_area.width);
        let content_w = content_area.width - gutter_w;

        for dy in 0..content_area.height {
            let y = content_area.y + dy;
            let row_area = Rect::new(content_area.x, y, content_area.width, 1);
            let Some(&row) = self.rows.get(self.scroll_y as usize + dy as usize) else {
                buf.set_style(row_area, theme.text_primary);
                continue;
            };

            let style = row_style(theme, &self.lines, row);
            buf.set_style(row_area, style);
            buf.set_stringn(
                content_area.x,
                y,
                self.gutter_text(row),
                gutter_w as usize,
                gutter_style(theme, &self.lines, row),
            );
            if content_w == 0 {
                continue;
            }
            let visible = render::slice_by_cols(&self.row_content(row), self.scroll_x, content_w);
            buf.set_stringn(
                content_area.x + gutter_w,
                y,
                visible,
                content_w as usize,
                style,
            );
        }

        if let Some(sb_x) = scrollbar_x {
            render::render_scrollbar(
                Rect::new(sb_x, area.y, 1, area.height),
                buf,
                self.scroll_y,
                self.rows.len() as u32,
                theme.text_muted,
            );
        }
    }

    /// All rows as styled lines (gutter + content), ignoring scroll and viewport.
    pub fn to_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        self.rows
            .iter()
            .map(|&row| {
                Line::from(vec![
                    Span::styled(self.gutter_text(row), gutter_style(theme, &self.lines, row)),
                    Span::styled(
                        self.row_content(row).into_owned(),
                        row_style(theme, &self.lines, row),
                    ),
                ])
            })
            .collect()
    }

    pub fn as_text(&self, theme: &Theme) -> Text<'static> {
        Text::from(self.to_lines(theme))
    }

    fn regroup(&mut self) {
        self.groups = group_for_display(
            &self.lines,
            self.options.max_unchanged_run,
            &self.expanded,
        );
        self.rows.clear();
        for group in &self.groups {
            if group.is_hidden() {
                self.rows.push(Row::Placeholder {
                    start_index: group.start_index,
                    hidden: group.hidden_len(),
                });
            } else {
                self.rows
                    .extend((group.start_index..group.end_index()).map(Row::Line));
            }
        }
        self.max_content_width = self
            .rows
            .iter()
            .map(|&row| render::display_width(&self.row_content(row)) as u32)
            .max()
            .unwrap_or(0);
        self.clamp();
    }

    fn clamp(&mut self) {
        self.scroll_y = self.scroll_y.min(self.max_scroll_y());
        self.scroll_x = self.scroll_x.min(self.max_scroll_x());
    }

    fn max_scroll_y(&self) -> u32 {
        (self.rows.len() as u32).saturating_sub(self.viewport_h as u32)
    }

    fn max_scroll_x(&self) -> u32 {
        self.max_content_width
            .saturating_sub(self.viewport_w as u32)
    }

    fn split_scrollbar(&self, area: Rect) -> (Rect, Option<u16>) {
        if self.options.show_scrollbar && area.width >= 2 {
            (
                Rect::new(area.x, area.y, area.width - 1, area.height),
                Some(area.x + area.width - 1),
            )
        } else {
            (area, None)
        }
    }

    fn number_widths(&self) -> (usize, usize) {
        (
            render::digits(self.max_old_lineno),
            render::digits(self.max_new_lineno),
        )
    }

    fn gutter_width(&self) -> u16 {
        if self.options.show_line_numbers {
            let (old_w, new_w) = self.number_widths();
            (old_w + 1 + new_w + 1 + 1 + 1) as u16
        } else {
            2
        }
    }

    fn gutter_text(&self, row: Row) -> String {
        let (old_no, new_no, marker) = match row {
            Row::Line(idx) => {
                let line = &self.lines[idx];
                (line.old_line_number, line.new_line_number, line.kind.marker())
            }
            Row::Placeholder { .. } => (None, None, PLACEHOLDER_MARKER),
        };
        if !self.options.show_line_numbers {
            return format!("{marker} ");
        }
        let (old_w, new_w) = self.number_widths();
        let old = old_no
            .map(|n| format!("{n:>old_w$}"))
            .unwrap_or_else(|| " ".repeat(old_w));
        let new = new_no
            .map(|n| format!("{n:>new_w$}"))
            .unwrap_or_else(|| " ".repeat(new_w));
        format!("{old} {new} {marker} ")
    }

    fn row_content(&self, row: Row) -> Cow<'_, str> {
        match row {
            Row::Line(idx) => Cow::Borrowed(self.lines[idx].content.as_str()),
            Row::Placeholder { hidden, .. } => Cow::Owned(placeholder_label(hidden)),
        }
    }
}

pub fn placeholder_label(hidden: usize) -> String {
    if hidden == 1 {
        "1 unchanged line".to_string()
    } else {
        format!("{hidden} unchanged lines")
    }
}

fn row_style(theme: &Theme, lines: &[DiffLine], row: Row) -> Style {
    match row {
        Row::Placeholder { .. } => theme.collapsed,
        Row::Line(idx) => match lines[idx].kind {
            DiffLineKind::Added => theme.diff_add,
            DiffLineKind::Removed => theme.diff_del,
            DiffLineKind::Header => theme.accent.add_modifier(Modifier::BOLD),
            DiffLineKind::Unchanged => theme.text_primary,
        },
    }
}

fn gutter_style(theme: &Theme, lines: &[DiffLine], row: Row) -> Style {
    match row {
        Row::Line(idx) => match lines[idx].kind {
            DiffLineKind::Added => theme.diff_add,
            DiffLineKind::Removed => theme.diff_del,
            _ => theme.text_muted,
        },
        Row::Placeholder { .. } => theme.text_muted,
    }
}

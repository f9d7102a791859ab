use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

/// Columns a tab expands to.
pub const TAB_WIDTH: usize = 4;

/// Display width of `input` in terminal columns, with tabs expanded.
pub fn display_width(input: &str) -> usize {
    input
        .chars()
        .map(|ch| {
            if ch == '\t' {
                TAB_WIDTH
            } else {
                UnicodeWidthChar::width(ch).unwrap_or(0)
            }
        })
        .sum()
}

/// Returns the part of `input` visible in columns `start_col..start_col + max_cols`.
///
/// Tabs expand to spaces. A wide character straddling either edge is dropped rather than
/// split.
pub fn slice_by_cols(input: &str, start_col: u32, max_cols: u16) -> String {
    let start_col = start_col as usize;
    let max_cols = max_cols as usize;
    let mut out = String::new();
    if max_cols == 0 {
        return out;
    }

    let mut col = 0usize;
    let mut out_cols = 0usize;
    for ch in input.chars() {
        let (w, piece) = if ch == '\t' {
            (1, ' ')
        } else {
            (UnicodeWidthChar::width(ch).unwrap_or(0), ch)
        };
        let repeat = if ch == '\t' { TAB_WIDTH } else { 1 };
        for _ in 0..repeat {
            if w == 0 {
                continue;
            }
            if col < start_col {
                col += w;
                continue;
            }
            if out_cols + w > max_cols {
                return out;
            }
            out.push(piece);
            col += w;
            out_cols += w;
        }
    }
    out
}

pub fn digits(n: u32) -> usize {
    if n == 0 {
        return 1;
    }
    let mut d = 0;
    let mut v = n;
    while v > 0 {
        v /= 10;
        d += 1;
    }
    d
}

/// Draws a one-column scrollbar for a vertical offset into `content_h` rows.
pub fn render_scrollbar(
    area: Rect,
    buf: &mut Buffer,
    offset: u32,
    content_h: u32,
    style: Style,
) {
    buf.set_style(area, style);
    if area.height == 0 {
        return;
    }
    let viewport_h = area.height as u32;
    if content_h <= viewport_h {
        for dy in 0..area.height {
            buf.set_stringn(area.x, area.y + dy, " ", 1, style);
        }
        return;
    }

    let track_h = area.height as f64;
    let thumb_h = ((viewport_h as f64 / content_h as f64) * track_h)
        .round()
        .clamp(1.0, track_h) as u16;
    let max_offset = content_h.saturating_sub(viewport_h).max(1) as f64;
    let thumb_top = ((offset as f64 / max_offset) * (track_h - thumb_h as f64))
        .round()
        .clamp(0.0, (track_h - thumb_h as f64).max(0.0)) as u16;

    for dy in 0..area.height {
        let ch = if dy >= thumb_top && dy < thumb_top + thumb_h {
            "█"
        } else {
            " "
        };
        buf.set_stringn(area.x, area.y + dy, ch, 1, style);
    }
}

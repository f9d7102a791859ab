use crate::line::DiffLine;

/// The ranges announced by a `@@ -OLD_START[,OLD_COUNT] +NEW_START[,NEW_COUNT] @@` line.
///
/// An omitted count means a single line, as in `git diff` output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HunkHeader {
    pub old_start: u32,
    pub old_count: u32,
    pub new_start: u32,
    pub new_count: u32,
}

impl HunkHeader {
    pub fn parse(line: &str) -> Option<Self> {
        let after = line.strip_prefix("@@")?.trim_start();
        let after = after.strip_prefix('-')?;
        let (old_part, rest) = after.split_once(' ')?;
        let rest = rest.trim_start().strip_prefix('+')?;
        let (new_part, rest) = rest.split_once(' ')?;
        if !rest.trim_start().starts_with("@@") {
            return None;
        }

        let (old_start, old_count) = parse_range(old_part)?;
        let (new_start, new_count) = parse_range(new_part)?;
        Some(Self {
            old_start,
            old_count,
            new_start,
            new_count,
        })
    }
}

fn parse_range(part: &str) -> Option<(u32, u32)> {
    match part.split_once(',') {
        Some((start, count)) => Some((parse_number(start)?, parse_number(count)?)),
        None => Some((parse_number(part)?, 1)),
    }
}

fn parse_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parses unified diff text into a flat, line-numbered sequence.
///
/// Hunk headers reset the running counters and are kept as [`DiffLineKind::Header`] lines.
/// File markers (`---`/`+++`), `diff --git`/`index` preambles and `\ No newline` notes are
/// dropped. A header that does not parse is still emitted, but the counters keep running from
/// wherever they were; numbering before the first hunk starts at 1.
///
/// Input is read with [`str::lines`]: a trailing newline does not produce an extra line and a
/// `\r` before each `\n` is stripped.
///
/// [`DiffLineKind::Header`]: crate::line::DiffLineKind::Header
pub fn parse_unified_diff(input: &str) -> Vec<DiffLine> {
    let mut out = Vec::new();
    let mut old_lineno: u32 = 1;
    let mut new_lineno: u32 = 1;

    for raw in input.lines() {
        if raw.starts_with("@@") {
            match HunkHeader::parse(raw) {
                Some(hunk) => {
                    old_lineno = hunk.old_start;
                    new_lineno = hunk.new_start;
                }
                None => log::debug!("unparseable hunk header, keeping counters: {raw:?}"),
            }
            out.push(DiffLine::header(raw));
        } else if let Some(content) = raw.strip_prefix('+') {
            if raw.starts_with("+++") {
                continue;
            }
            out.push(DiffLine::added(content, new_lineno));
            new_lineno = new_lineno.saturating_add(1);
        } else if let Some(content) = raw.strip_prefix('-') {
            if raw.starts_with("---") {
                continue;
            }
            out.push(DiffLine::removed(content, old_lineno));
            old_lineno = old_lineno.saturating_add(1);
        } else if raw.is_empty() || raw.starts_with(' ') {
            let content = raw.strip_prefix(' ').unwrap_or(raw);
            out.push(DiffLine::unchanged(content, old_lineno, new_lineno));
            old_lineno = old_lineno.saturating_add(1);
            new_lineno = new_lineno.saturating_add(1);
        }
    }

    out
}

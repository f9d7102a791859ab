#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

/// Classification of a single line in a comparison result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DiffLineKind {
    Added,
    Removed,
    Unchanged,
    Header,
}

impl DiffLineKind {
    /// The single-character gutter marker conventionally used for this kind.
    pub fn marker(self) -> char {
        match self {
            DiffLineKind::Added => '+',
            DiffLineKind::Removed => '-',
            DiffLineKind::Unchanged => ' ',
            DiffLineKind::Header => '@',
        }
    }
}

/// One line of a comparison result.
///
/// Line numbers are 1-based. `old_line_number` is set for [`DiffLineKind::Removed`] and
/// [`DiffLineKind::Unchanged`], `new_line_number` for [`DiffLineKind::Added`] and
/// [`DiffLineKind::Unchanged`]. Headers carry neither. Prefer the constructors, which keep
/// that pairing intact.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffLine {
    pub kind: DiffLineKind,
    pub content: String,
    pub old_line_number: Option<u32>,
    pub new_line_number: Option<u32>,
}

impl DiffLine {
    pub fn added(content: impl Into<String>, new_line_number: u32) -> Self {
        Self {
            kind: DiffLineKind::Added,
            content: content.into(),
            old_line_number: None,
            new_line_number: Some(new_line_number),
        }
    }

    pub fn removed(content: impl Into<String>, old_line_number: u32) -> Self {
        Self {
            kind: DiffLineKind::Removed,
            content: content.into(),
            old_line_number: Some(old_line_number),
            new_line_number: None,
        }
    }

    pub fn unchanged(content: impl Into<String>, old_line_number: u32, new_line_number: u32) -> Self {
        Self {
            kind: DiffLineKind::Unchanged,
            content: content.into(),
            old_line_number: Some(old_line_number),
            new_line_number: Some(new_line_number),
        }
    }

    pub fn header(content: impl Into<String>) -> Self {
        Self {
            kind: DiffLineKind::Header,
            content: content.into(),
            old_line_number: None,
            new_line_number: None,
        }
    }

    /// `true` for added and removed lines.
    pub fn is_change(&self) -> bool {
        matches!(self.kind, DiffLineKind::Added | DiffLineKind::Removed)
    }
}

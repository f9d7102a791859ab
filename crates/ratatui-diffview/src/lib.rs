//! `ratatui-diffview` renders line diffs in a ratatui terminal UI.
//!
//! - [`view::DiffView`] shows a computed or parsed diff with a line-number gutter, scrolling,
//!   and "N unchanged lines" placeholders that toggle open and closed.
//! - The diff engine is re-exported from [`ratatui_diffview_core`] as [`engine`], with the common
//!   entry points at the crate root.
//!
//! ```
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use ratatui_diffview::theme::Theme;
//! use ratatui_diffview::view::DiffView;
//!
//! let mut view = DiffView::new();
//! view.set_texts("a\nb\nc", "a\nx\nc");
//! assert_eq!(view.stats().to_string(), "+1 -1");
//!
//! let area = Rect::new(0, 0, 40, 6);
//! let mut buf = Buffer::empty(area);
//! view.render_ref(area, &mut buf, &Theme::default());
//! ```
pub use ratatui_diffview_core as engine;

pub use ratatui_diffview_core::DiffError;
pub use ratatui_diffview_core::DiffGroup;
pub use ratatui_diffview_core::DiffLimits;
pub use ratatui_diffview_core::DiffLine;
pub use ratatui_diffview_core::DiffLineKind;
pub use ratatui_diffview_core::DiffStats;
pub use ratatui_diffview_core::GroupMode;
pub use ratatui_diffview_core::calculate_diff_stats;
pub use ratatui_diffview_core::compute_diff;
pub use ratatui_diffview_core::group_for_display;
pub use ratatui_diffview_core::parse_unified_diff;

pub mod render;
pub mod theme;
pub mod view;

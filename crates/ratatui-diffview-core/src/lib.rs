//! `ratatui-diffview-core` computes read-only line diffs for display.
//!
//! The crate has no terminal or I/O dependencies. Rendering lives in the facade crate
//! `ratatui-diffview`.
//!
//! ## Pipeline
//!
//! - [`compute::compute_diff`] aligns two texts line by line (longest common subsequence), or
//!   [`parser::parse_unified_diff`] reads a diff produced elsewhere. Both yield a flat
//!   `Vec<`[`line::DiffLine`]`>`.
//! - [`group::group_for_display`] splits the flat sequence into [`group::DiffGroup`]s, collapsing
//!   long unchanged runs. The caller keeps the set of revealed groups and regroups when it
//!   changes.
//! - [`stats::calculate_diff_stats`] counts added and removed lines, independent of grouping.
//!
//! Every function is pure and synchronous. Alignment costs `O(m·n)` time and memory; use
//! [`compute::compute_diff_bounded`] to refuse inputs above a size ceiling.
//!
//! ```
//! use ratatui_diffview_core::{calculate_diff_stats, compute_diff};
//!
//! let lines = compute_diff("a\nb\nc", "a\nx\nc");
//! assert_eq!(calculate_diff_stats(&lines).to_string(), "+1 -1");
//! ```
pub mod compute;
pub mod error;
pub mod group;
pub mod line;
pub mod parser;
pub mod stats;

pub use compute::DiffLimits;
pub use compute::compute_diff;
pub use compute::compute_diff_bounded;
pub use error::DiffError;
pub use group::DiffGroup;
pub use group::GroupMode;
pub use group::GroupOptions;
pub use group::group_for_display;
pub use group::group_with_options;
pub use line::DiffLine;
pub use line::DiffLineKind;
pub use parser::parse_unified_diff;
pub use stats::DiffStats;
pub use stats::calculate_diff_stats;

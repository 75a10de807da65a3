//! Unified-diff presentation helpers.
//!
//! Patches arrive pre-computed from the API as unified-diff text. This module
//! classifies their lines, expands them into two aligned columns for the
//! side-by-side view, renders HTML fragments for both the unified and
//! side-by-side views, and highlights search terms inside rendered markup.
//!
//! Nothing here pairs removals with additions: each input line produces
//! exactly one row per column, in input order.

mod analyze;
mod classify;
mod commit_type;
mod highlight;
mod html;
mod side_by_side;

pub use analyze::{DetectedLines, NOTHING_PLACEHOLDER, REMOVED_PLACEHOLDER, detect_change};
pub use classify::{DiffLine, DiffLineKind, classify_line};
pub use commit_type::{commit_type_code, find_commit_type, split_commit_type};
pub use highlight::{highlight_plain, highlight_term};
pub use html::{escape_html, render_side_by_side, render_unified};
pub use side_by_side::{
    DEFAULT_FROM_LABEL, DEFAULT_TO_LABEL, DiffCell, DiffColumns, SideBySideDiff, reconstruct,
};

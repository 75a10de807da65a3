//! Export of result sets to files.
//!
//! Three data sets export as semicolon-delimited CSV (see [`csv`]). Migration
//! search results and single commits can also be rendered as standalone HTML
//! reports (see [`report`]).

pub mod csv;
mod model;
pub mod report;

pub use csv::{escape_field, write_detected_changes_csv, write_migration_csv, write_module_csv};
pub use model::ExportKind;
pub use report::{write_commit_report, write_migration_report};

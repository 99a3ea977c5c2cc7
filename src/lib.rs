//! Commit history analytics over line-of-code logs.
//!
//! Rows of the log are grouped into commits, summarised into a fixed set of
//! statistics, and filtered by brushing a time × hour-of-day scatter plot.

pub mod cli;
pub mod commits;
pub mod error;
pub mod ingest;
pub mod model;
pub mod scale;
pub mod select;
pub mod stats;
pub mod timeline;
pub mod util;

pub use error::{GlocError, Result};
pub use ingest::{group_into_commits, parse_rows, ParseMode};
pub use model::{Commit, LanguageShare, LineRecord, SelectionRegion, StatValue, Statistic};
pub use select::{is_selected, language_breakdown, selected_commits, Brush, BrushPhase};
pub use stats::compute_stats;

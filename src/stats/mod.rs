pub mod compute;
pub mod exec;
pub mod output;

pub use compute::{compute_stats, STAT_LABELS};
pub use exec::exec;
pub use output::{output_json, output_ndjson, output_table};

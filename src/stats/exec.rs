use super::{compute_stats, output_json, output_ndjson, output_table};
use crate::cli::CommonArgs;
use crate::ingest::fetch_log;
use anyhow::Context;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let data = fetch_log(&common, !(json || ndjson))?;

    let stats = compute_stats(&data.rows, &data.commits)
        .context("Failed to compute statistics")?;

    if json {
        output_json(&stats, &common)?;
    } else if ndjson {
        output_ndjson(&stats)?;
    } else {
        output_table(&stats)?;
    }

    Ok(())
}

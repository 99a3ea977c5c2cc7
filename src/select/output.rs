use super::{format_fraction, Brush};
use crate::cli::CommonArgs;
use crate::model::{SelectionOutput, SCHEMA_VERSION};
use anyhow::Result;
use chrono::Utc;
use console::style;

pub fn output_json(brush: &Brush, common: &CommonArgs) -> Result<()> {
    let output = SelectionOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        log_path: common.log.to_string_lossy().to_string(),
        region: brush.region().map(|r| r.corners()),
        selected: brush.selected().to_vec(),
        breakdown: brush.breakdown().to_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_ndjson(brush: &Brush) -> Result<()> {
    for share in brush.breakdown() {
        println!("{}", serde_json::to_string(share)?);
    }
    Ok(())
}

pub fn output_summary(brush: &Brush) -> Result<()> {
    println!("{}", style(brush.label()).bold());
    if brush.breakdown().is_empty() {
        return Ok(());
    }
    println!("{}", "─".repeat(40));
    for share in brush.breakdown() {
        println!(
            "{:<12} {:>6} lines ({})",
            share.kind,
            style(share.count).cyan(),
            format_fraction(share.fraction)
        );
    }
    Ok(())
}

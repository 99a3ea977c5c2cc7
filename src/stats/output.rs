use crate::cli::CommonArgs;
use crate::model::{Statistic, StatsOutput, SCHEMA_VERSION};
use anyhow::Result;
use chrono::Utc;
use console::style;

pub fn output_json(stats: &[Statistic], common: &CommonArgs) -> Result<()> {
    let output = StatsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        log_path: common.log.to_string_lossy().to_string(),
        stats: stats.to_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_ndjson(stats: &[Statistic]) -> Result<()> {
    for stat in stats {
        println!("{}", serde_json::to_string(stat)?);
    }
    Ok(())
}

pub fn output_table(stats: &[Statistic]) -> Result<()> {
    let width = stats.iter().map(|s| s.label.len()).max().unwrap_or(4).max(4);

    println!("{}", style("Codebase Statistics").bold());
    println!("{}", "─".repeat(width + 40));
    println!("{:<width$}  {}", style("Stat").bold(), style("Value").bold());
    for stat in stats {
        println!("{:<width$}  {}", stat.label, style(&stat.value).cyan());
    }
    Ok(())
}

use crate::cli::CommonArgs;
use crate::ingest::fetch_log;
use crate::model::{Commit, CommitsOutput, SCHEMA_VERSION};
use chrono::Utc;
use console::style;
use std::collections::HashSet;

pub fn exec(common: CommonArgs, limit: Option<usize>, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let data = fetch_log(&common, !(json || ndjson))?;
    let shown = &data.commits[..limit.unwrap_or(usize::MAX).min(data.commits.len())];

    if json {
        output_json(shown, &common)?;
    } else if ndjson {
        output_ndjson(shown)?;
    } else {
        output_table(shown, data.commits.len())?;
    }

    Ok(())
}

fn output_json(commits: &[Commit], common: &CommonArgs) -> anyhow::Result<()> {
    let output = CommitsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        log_path: common.log.to_string_lossy().to_string(),
        commits: commits.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(commits: &[Commit]) -> anyhow::Result<()> {
    for c in commits {
        println!("{}", serde_json::to_string(c)?);
    }
    Ok(())
}

fn output_table(commits: &[Commit], total: usize) -> anyhow::Result<()> {
    println!(
        "{:<9} {:<17} {:<20} {:>7} {:>6}",
        style("Commit").bold(),
        style("When").bold(),
        style("Author").bold(),
        style("Lines").bold(),
        style("Hour").bold()
    );
    println!("{}", "─".repeat(63));
    for c in commits {
        println!(
            "{:<9} {:<17} {:<20} {:>7} {:>6.2}",
            c.short_id(),
            c.datetime.format("%Y-%m-%d %H:%M"),
            c.author,
            c.total_lines,
            c.hour_frac
        );
    }
    if total > commits.len() {
        println!("\n... and {} more commits", total - commits.len());
    }

    let authors: HashSet<&str> = commits.iter().map(|c| c.author.as_str()).collect();
    if let (Some(first), Some(last)) = (commits.first(), commits.last()) {
        println!(
            "\n{} commits by {} authors, {} to {}",
            style(commits.len()).cyan(),
            style(authors.len()).yellow(),
            style(first.datetime.format("%Y-%m-%d")).dim(),
            style(last.datetime.format("%Y-%m-%d")).dim()
        );
    }
    Ok(())
}

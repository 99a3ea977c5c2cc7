use crate::cli::CommonArgs;
use crate::error::GlocError;
use crate::ingest::fetch_log;
use crate::model::{Commit, FileSummary, NarrativeStep, TimelineOutput, SCHEMA_VERSION};
use crate::scale::TimeScale;
use crate::util::ordered_groups;
use chrono::{DateTime, FixedOffset, Utc};
use console::style;
use log::debug;

/// Maps slider progress (0 to 100) onto the span of commit times.
#[derive(Debug, Clone)]
pub struct CommitTimeline {
    scale: TimeScale,
}

impl CommitTimeline {
    /// Returns `None` when there are no commits.
    pub fn new(commits: &[Commit]) -> Option<Self> {
        let first = commits.iter().map(|c| c.datetime).min()?;
        let last = commits.iter().map(|c| c.datetime).max()?;
        Some(Self {
            scale: TimeScale::new([first, last], [0.0, 100.0]),
        })
    }

    /// Latest commit time revealed at `progress`; out-of-range values clamp.
    pub fn cutoff(&self, progress: f64) -> DateTime<FixedOffset> {
        let progress = if progress.is_nan() { 100.0 } else { progress.clamp(0.0, 100.0) };
        self.scale.invert(progress)
    }
}

pub fn visible<'c>(commits: &'c [Commit], cutoff: &DateTime<FixedOffset>) -> Vec<&'c Commit> {
    commits.iter().filter(|c| c.datetime <= *cutoff).collect()
}

/// Rows per file across the given commits, largest first.
pub fn file_summaries(commits: &[&Commit]) -> Vec<FileSummary> {
    let lines: Vec<_> = commits.iter().flat_map(|c| c.lines.iter()).collect();
    let mut files: Vec<FileSummary> = ordered_groups(&lines, |l| l.file.as_str())
        .into_iter()
        .map(|(file, rows)| FileSummary {
            file: file.to_string(),
            lines: rows.len(),
            kind: rows[0].kind.clone(),
        })
        .collect();
    files.sort_by(|a, b| b.lines.cmp(&a.lines));
    files
}

pub fn narrative(commits: &[&Commit]) -> Vec<NarrativeStep> {
    let mut ordered: Vec<&Commit> = commits.to_vec();
    ordered.sort_by(|a, b| a.datetime.cmp(&b.datetime));

    ordered
        .iter()
        .enumerate()
        .map(|(i, commit)| {
            let which = if i == 0 { "the first commit" } else { "another commit" };
            let files = commit.file_count();
            let text = format!(
                "On {}, {} made {}. {} {} edited across {}.",
                commit.datetime.format("%A, %B %-d, %Y at %H:%M"),
                if commit.author.is_empty() { "someone" } else { commit.author.as_str() },
                which,
                counted(commit.total_lines, "line", "lines"),
                if commit.total_lines == 1 { "was" } else { "were" },
                counted(files, "file", "files"),
            );
            NarrativeStep {
                commit_id: commit.id.clone(),
                datetime: commit.datetime,
                text,
            }
        })
        .collect()
}

fn counted(n: usize, one: &str, many: &str) -> String {
    format!("{n} {}", if n == 1 { one } else { many })
}

pub fn exec(
    common: CommonArgs,
    progress: f64,
    with_narrative: bool,
    json: bool,
    ndjson: bool,
) -> anyhow::Result<()> {
    let data = fetch_log(&common, !(json || ndjson))?;

    let Some(timeline) = CommitTimeline::new(&data.commits) else {
        return Err(GlocError::EmptyInput("log has no commits".to_string()).into());
    };

    let cutoff = timeline.cutoff(progress);
    let shown = visible(&data.commits, &cutoff);
    let files = file_summaries(&shown);
    let steps = if with_narrative { narrative(&shown) } else { Vec::new() };
    debug!("progress {progress}: {} of {} commits", shown.len(), data.commits.len());

    if json {
        let output = TimelineOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            log_path: common.log.to_string_lossy().to_string(),
            progress,
            cutoff,
            commit_count: shown.len(),
            files,
            narrative: steps,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        for f in &files {
            println!("{}", serde_json::to_string(f)?);
        }
        for s in &steps {
            println!("{}", serde_json::to_string(s)?);
        }
    } else {
        output_table(&cutoff, shown.len(), &files, &steps);
    }

    Ok(())
}

fn output_table(
    cutoff: &DateTime<FixedOffset>,
    commit_count: usize,
    files: &[FileSummary],
    steps: &[NarrativeStep],
) {
    println!(
        "{} {}",
        style("Commits up to").bold(),
        style(cutoff.format("%B %-d, %Y %H:%M")).cyan()
    );
    println!("{}", "─".repeat(60));
    println!("{} commits, {} files", commit_count, files.len());
    println!();
    println!("{:<44} {:>8} {:>6}", style("File").bold(), style("Lines").bold(), style("Type").bold());
    for f in files.iter().take(50) {
        println!("{:<44} {:>8} {:>6}", f.file, f.lines, f.kind);
    }
    if files.len() > 50 {
        println!("\n... and {} more files", files.len() - 50);
    }
    if !steps.is_empty() {
        println!();
        for step in steps {
            println!("{}", step.text);
        }
    }
}

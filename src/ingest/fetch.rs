use super::{group_into_commits, load_log, ParseMode};
use crate::cli::CommonArgs;
use crate::model::{Commit, LineRecord};
use anyhow::Context;
use log::info;

/// Rows of the log together with the commits grouped from them.
pub struct LogData {
    pub rows: Vec<LineRecord>,
    pub commits: Vec<Commit>,
}

pub fn fetch_log(common: &CommonArgs, show_progress: bool) -> anyhow::Result<LogData> {
    let mode = if common.skip_invalid {
        ParseMode::SkipInvalid
    } else {
        ParseMode::Strict
    };

    let rows = load_log(&common.log, mode, show_progress)
        .with_context(|| format!("Failed to load log {}", common.log.display()))?;
    let commits = group_into_commits(&rows, &common.repo_url);

    info!("loaded {} rows across {} commits", rows.len(), commits.len());
    Ok(LogData { rows, commits })
}

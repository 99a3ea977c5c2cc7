use crate::model::{Commit, LineRecord};
use crate::util::{hour_frac, ordered_groups};

/// Partitions rows by commit id and sorts the commits by time.
///
/// Each commit keeps its rows in log order. Commits sharing a timestamp stay
/// in the order their first row appeared.
pub fn group_into_commits(rows: &[LineRecord], url_base: &str) -> Vec<Commit> {
    let mut commits: Vec<Commit> = ordered_groups(rows, |r| r.commit.as_str())
        .into_iter()
        .map(|(id, lines)| build_commit(id, lines, url_base))
        .collect();

    commits.sort_by(|a, b| a.datetime.cmp(&b.datetime));
    commits
}

fn build_commit(id: &str, lines: Vec<&LineRecord>, url_base: &str) -> Commit {
    let first = lines[0];
    Commit {
        id: id.to_string(),
        author: first.author.clone(),
        date: first.date.clone(),
        time: first.time.clone(),
        timezone: first.timezone.clone(),
        datetime: first.datetime,
        hour_frac: hour_frac(&first.datetime),
        total_lines: lines.len(),
        url: commit_url(url_base, id),
        lines: lines.into_iter().cloned().collect(),
    }
}

pub fn commit_url(base: &str, id: &str) -> String {
    format!("{}/commit/{}", base.trim_end_matches('/'), id)
}

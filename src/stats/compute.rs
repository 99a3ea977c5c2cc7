use crate::error::{GlocError, Result};
use crate::model::{Commit, LineRecord, StatValue, Statistic};
use crate::util::{
    first_max_index, mean, ordered_groups, time_of_day_counts, weekday_counts,
    TimeOfDay, DAY_NAMES,
};

pub const STAT_LABELS: [&str; 12] = [
    "Total LOC",
    "Total commits",
    "Number of files",
    "Longest file (lines)",
    "Average file length",
    "Average line length",
    "Longest line",
    "Average depth",
    "Deepest line",
    "Average file depth",
    "Busiest time of day",
    "Busiest day of week",
];

struct FileAccum<'a> {
    name: &'a str,
    max_line: u32,
    mean_depth: f64,
}

/// Computes the twelve summary statistics, always in the same order.
pub fn compute_stats(rows: &[LineRecord], commits: &[Commit]) -> Result<Vec<Statistic>> {
    if rows.is_empty() {
        return Err(GlocError::EmptyInput("log has no rows".to_string()));
    }

    let files: Vec<FileAccum> = ordered_groups(rows, |r| r.file.as_str())
        .into_iter()
        .map(|(name, lines)| FileAccum {
            name,
            max_line: lines.iter().map(|l| l.line).max().unwrap_or(0),
            mean_depth: mean(lines.iter().map(|l| l.depth as f64)).unwrap_or(0.0),
        })
        .collect();

    let longest_file = first_max_by(&files, |f| f.max_line).ok_or_else(no_files)?;
    let avg_file_length = mean(files.iter().map(|f| f.max_line as f64)).ok_or_else(no_files)?;
    let avg_file_depth = mean(files.iter().map(|f| f.mean_depth)).ok_or_else(no_files)?;

    let avg_line_length = mean(rows.iter().map(|r| r.length as f64)).ok_or_else(no_rows)?;
    let longest_line = first_max_by(rows, |r| r.length).ok_or_else(no_rows)?;
    let avg_depth = mean(rows.iter().map(|r| r.depth as f64)).ok_or_else(no_rows)?;
    let deepest_line = first_max_by(rows, |r| r.depth).ok_or_else(no_rows)?;

    let busiest_period = first_max_index(&time_of_day_counts(rows.iter().map(|r| &r.datetime)))
        .map(|i| TimeOfDay::ALL[i].label())
        .ok_or_else(no_rows)?;
    let busiest_day = first_max_index(&weekday_counts(rows.iter().map(|r| &r.datetime)))
        .map(|i| DAY_NAMES[i])
        .ok_or_else(no_rows)?;

    let values = [
        StatValue::Count(rows.len()),
        StatValue::Count(commits.len()),
        StatValue::Count(files.len()),
        StatValue::Text(format!("{} ({})", longest_file.name, longest_file.max_line)),
        StatValue::decimal(avg_file_length),
        StatValue::decimal(avg_line_length),
        StatValue::Text(line_location(longest_line)),
        StatValue::decimal(avg_depth),
        StatValue::Text(line_location(deepest_line)),
        StatValue::decimal(avg_file_depth),
        StatValue::Text(busiest_period.to_string()),
        StatValue::Text(busiest_day.to_string()),
    ];

    Ok(STAT_LABELS
        .into_iter()
        .zip(values)
        .map(|(label, value)| Statistic::new(label, value))
        .collect())
}

fn line_location(row: &LineRecord) -> String {
    format!("File: {}, line {}", row.file, row.line)
}

/// First item reaching the maximum key.
fn first_max_by<T, F>(items: &[T], key: F) -> Option<&T>
where
    F: Fn(&T) -> u32,
{
    items.iter().fold(None, |best, item| match best {
        Some(b) if key(item) <= key(b) => Some(b),
        _ => Some(item),
    })
}

fn no_rows() -> GlocError {
    GlocError::EmptyInput("log has no rows".to_string())
}

fn no_files() -> GlocError {
    GlocError::EmptyInput("log has no files".to_string())
}

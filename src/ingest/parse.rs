use crate::error::{GlocError, Result};
use crate::model::LineRecord;
use crate::util::parse_offset;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 7] = ["commit", "file", "line", "depth", "length", "type", "datetime"];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// What to do with a row whose numbers or dates do not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Reject the whole log, naming the offending row.
    #[default]
    Strict,
    /// Drop the row and log a warning.
    SkipInvalid,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    commit: String,
    file: String,
    line: String,
    depth: String,
    length: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    time: String,
    #[serde(default)]
    timezone: String,
    datetime: String,
}

pub fn load_log(path: &Path, mode: ParseMode, show_progress: bool) -> Result<Vec<LineRecord>> {
    let pb = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Loading {}...", path.display()));
        Some(pb)
    } else {
        None
    };

    let file = File::open(path)?;
    let rows = parse_rows(file, mode);

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    rows
}

pub fn parse_rows<R: Read>(reader: R, mode: ParseMode) -> Result<Vec<LineRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(GlocError::MissingColumn(column.to_string()));
        }
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (i, raw) in rdr.deserialize::<RawRow>().enumerate() {
        let row = i + 1;
        let parsed = raw
            .map_err(|e| GlocError::invalid_row(row, e.to_string()))
            .and_then(|raw| convert(row, raw));
        match (parsed, mode) {
            (Ok(record), _) => records.push(record),
            (Err(e), ParseMode::Strict) => return Err(e),
            (Err(e), ParseMode::SkipInvalid) => {
                warn!("skipping {e}");
                skipped += 1;
            }
        }
    }

    debug!("parsed {} rows, skipped {}", records.len(), skipped);
    Ok(records)
}

fn convert(row: usize, raw: RawRow) -> Result<LineRecord> {
    if raw.commit.is_empty() {
        return Err(GlocError::invalid_row(row, "empty commit id"));
    }
    let line = parse_number(row, "line", &raw.line)?;
    if line == 0 {
        return Err(GlocError::invalid_row(row, "line numbers start at 1"));
    }
    let depth = parse_number(row, "depth", &raw.depth)?;
    let length = parse_number(row, "length", &raw.length)?;

    let offset = if raw.timezone.is_empty() {
        None
    } else {
        let parsed = parse_offset(&raw.timezone)
            .ok_or_else(|| GlocError::invalid_row(row, format!("bad timezone '{}'", raw.timezone)))?;
        Some(parsed)
    };
    let datetime = parse_datetime(&raw.datetime, offset)
        .ok_or_else(|| GlocError::invalid_row(row, format!("bad datetime '{}'", raw.datetime)))?;
    let day = day_start(&raw.date, offset.unwrap_or(*datetime.offset()), &datetime)
        .ok_or_else(|| GlocError::invalid_row(row, format!("bad date '{}'", raw.date)))?;

    Ok(LineRecord {
        commit: raw.commit,
        file: raw.file,
        line,
        depth,
        length,
        kind: raw.kind,
        author: raw.author,
        date: raw.date,
        time: raw.time,
        timezone: raw.timezone,
        day,
        datetime,
    })
}

fn parse_number(row: usize, column: &str, value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|e| GlocError::invalid_row(row, format!("{column} '{value}': {e}")))
}

/// RFC 3339 first; naive timestamps take the row's timezone, or UTC.
fn parse_datetime(input: &str, offset: Option<FixedOffset>) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt);
    }
    let offset = offset.or_else(|| FixedOffset::east_opt(0))?;
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .and_then(|naive| offset.from_local_datetime(&naive).single())
}

fn day_start(
    date: &str,
    offset: FixedOffset,
    datetime: &DateTime<FixedOffset>,
) -> Option<DateTime<FixedOffset>> {
    let date = if date.is_empty() {
        datetime.date_naive()
    } else {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?
    };
    let midnight = date.and_hms_opt(0, 0, 0)?;
    offset.from_local_datetime(&midnight).single()
}

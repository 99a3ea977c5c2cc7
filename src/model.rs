use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use std::fmt;

pub const SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_REPO_URL: &str = "https://github.com/na-raghavan/portfolio";

/// One row of the line-of-code log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineRecord {
    pub commit: String,
    pub file: String,
    pub line: u32,
    pub depth: u32,
    pub length: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub author: String,
    pub date: String,
    pub time: String,
    pub timezone: String,
    /// Midnight of `date` in the row's own timezone.
    pub day: DateTime<FixedOffset>,
    pub datetime: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commit {
    pub id: String,
    pub author: String,
    pub date: String,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
    pub hour_frac: f64,
    pub total_lines: usize,
    pub url: String,
    #[serde(skip)]
    pub lines: Vec<LineRecord>,
}

impl Commit {
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(7)
            .map(|(i, _)| i)
            .unwrap_or(self.id.len());
        &self.id[..end]
    }

    /// Number of distinct files touched by this commit.
    pub fn file_count(&self) -> usize {
        let mut files: Vec<&str> = self.lines.iter().map(|l| l.file.as_str()).collect();
        files.sort_unstable();
        files.dedup();
        files.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(usize),
    Decimal(f64),
    Text(String),
}

impl StatValue {
    /// One-decimal value, rounded from the exact binary value the way
    /// `{:.1}` formats it, so `0.35` becomes `0.3`.
    pub fn decimal(value: f64) -> Self {
        let rounded = format!("{value:.1}").parse().unwrap_or(value);
        StatValue::Decimal(rounded)
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Count(n) => write!(f, "{n}"),
            StatValue::Decimal(v) => write!(f, "{v:.1}"),
            StatValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistic {
    pub label: &'static str,
    pub value: StatValue,
}

impl Statistic {
    pub fn new(label: &'static str, value: StatValue) -> Self {
        Self { label, value }
    }
}

/// Axis-aligned rectangle in projected chart coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionRegion {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl SelectionRegion {
    /// Builds a region from two corners in any order.
    pub fn new([xa, ya]: [f64; 2], [xb, yb]: [f64; 2]) -> Self {
        Self {
            x0: xa.min(xb),
            y0: ya.min(yb),
            x1: xa.max(xb),
            y1: ya.max(yb),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    pub fn is_empty(&self) -> bool {
        self.x0 == self.x1 || self.y0 == self.y1
    }

    pub fn corners(&self) -> [[f64; 2]; 2] {
        [[self.x0, self.y0], [self.x1, self.y1]]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: usize,
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSummary {
    pub file: String,
    pub lines: usize,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeStep {
    pub commit_id: String,
    pub datetime: DateTime<FixedOffset>,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub log_path: String,
    pub stats: Vec<Statistic>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub log_path: String,
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectionOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub log_path: String,
    pub region: Option<[[f64; 2]; 2]>,
    pub selected: Vec<String>,
    pub breakdown: Vec<LanguageShare>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub log_path: String,
    pub progress: f64,
    pub cutoff: DateTime<FixedOffset>,
    pub commit_count: usize,
    pub files: Vec<FileSummary>,
    pub narrative: Vec<NarrativeStep>,
}

use super::output::{output_json, output_ndjson, output_summary};
use super::{parse_region, Brush};
use crate::cli::CommonArgs;
use crate::error::GlocError;
use crate::ingest::fetch_log;
use crate::model::{Commit, SelectionRegion};
use crate::scale::{ChartLayout, ChartScales, Scale};
use crate::timeline::{visible, CommitTimeline};
use crate::util::parse_instant;
use anyhow::Context;
use chrono::{DateTime, FixedOffset};
use log::{debug, info};

/// Ways of describing the brushed rectangle on the command line.
pub struct RegionArgs {
    pub region: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub hours: Option<String>,
    pub progress: f64,
}

impl RegionArgs {
    fn is_data_space(&self) -> bool {
        self.from.is_some() || self.to.is_some() || self.hours.is_some()
    }
}

pub fn exec(common: CommonArgs, args: RegionArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let data = fetch_log(&common, !(json || ndjson))?;
    let commits = commits_in_view(&data.commits, args.progress);

    let layout = ChartLayout::default();
    let scales = ChartScales::for_commits(&commits, &layout);
    let region = match &scales {
        Some(scales) => resolve_region(&args, scales).context("Failed to resolve selection region")?,
        None => None,
    };

    let mut brush = Brush::new();
    let sx = scales.as_ref().map(|s| &s.x as &dyn Scale<DateTime<FixedOffset>>);
    let sy = scales.as_ref().map(|s| &s.y as &dyn Scale<f64>);
    brush.start(region, &commits, sx, sy);
    brush.end(region, &commits, sx, sy);
    info!("{}", brush.label());

    if json {
        output_json(&brush, &common)?;
    } else if ndjson {
        output_ndjson(&brush)?;
    } else {
        output_summary(&brush)?;
    }

    Ok(())
}

/// The commits the timeline shows at `progress`; the chart is drawn over these.
fn commits_in_view(commits: &[Commit], progress: f64) -> Vec<Commit> {
    match CommitTimeline::new(commits) {
        Some(timeline) => {
            let cutoff = timeline.cutoff(progress);
            let shown = visible(commits, &cutoff);
            debug!("progress {progress}: brushing {} of {} commits", shown.len(), commits.len());
            shown.into_iter().cloned().collect()
        }
        None => Vec::new(),
    }
}

fn resolve_region(
    args: &RegionArgs,
    scales: &ChartScales,
) -> crate::error::Result<Option<SelectionRegion>> {
    if let Some(region) = &args.region {
        return parse_region(region).map(Some);
    }
    if !args.is_data_space() {
        return Ok(None);
    }

    let [start, end] = scales.x.domain();
    let from = args.from.as_deref().map(parse_instant).transpose()?.unwrap_or(start);
    let to = args.to.as_deref().map(parse_instant).transpose()?.unwrap_or(end);
    if from > to {
        return Err(GlocError::InvalidRegion(format!(
            "from ({from}) is after to ({to})"
        )));
    }
    let (hour_min, hour_max) = match &args.hours {
        Some(h) => parse_hours(h)?,
        None => (0.0, 24.0),
    };
    Ok(Some(scales.region_for(&from, &to, hour_min, hour_max)))
}

/// Parses an hour window such as `9-17` or `8.5-12`.
pub fn parse_hours(input: &str) -> crate::error::Result<(f64, f64)> {
    let invalid = || GlocError::InvalidRegion(format!("hours '{input}': expected START-END within 0-24"));
    let (a, b) = input.split_once('-').ok_or_else(invalid)?;
    let a: f64 = a.trim().parse().map_err(|_| invalid())?;
    let b: f64 = b.trim().parse().map_err(|_| invalid())?;
    if !(0.0..=24.0).contains(&a) || !(0.0..=24.0).contains(&b) || a > b {
        return Err(invalid());
    }
    Ok((a, b))
}

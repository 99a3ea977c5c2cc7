//! Continuous scales mapping commit data onto chart coordinates.
//!
//! The selection engine never builds these itself; callers hand in whatever
//! scales their chart last drew with.

use crate::model::{Commit, SelectionRegion};
use chrono::{DateTime, Duration, FixedOffset, NaiveTime};

pub trait Scale<T: ?Sized> {
    fn apply(&self, value: &T) -> f64;
}

fn normalize(x: f64, a: f64, b: f64) -> f64 {
    let span = b - a;
    if span == 0.0 || span.is_nan() {
        0.5
    } else {
        (x - a) / span
    }
}

fn interpolate(t: f64, [a, b]: [f64; 2]) -> f64 {
    a + (b - a) * t
}

/// Linear map from timestamps to output coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeScale {
    domain: [DateTime<FixedOffset>; 2],
    range: [f64; 2],
}

impl TimeScale {
    pub fn new(domain: [DateTime<FixedOffset>; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> [DateTime<FixedOffset>; 2] {
        self.domain
    }

    /// Maps an output coordinate back to a timestamp. The ends of the range
    /// return the domain ends exactly.
    pub fn invert(&self, y: f64) -> DateTime<FixedOffset> {
        let [d0, d1] = self.domain;
        let t = normalize(y, self.range[0], self.range[1]);
        if t <= 0.0 {
            return d0;
        }
        if t >= 1.0 {
            return d1;
        }
        let span = d1 - d0;
        match span.num_nanoseconds() {
            Some(ns) => d0 + Duration::nanoseconds((ns as f64 * t).round() as i64),
            None => d0 + Duration::milliseconds((span.num_milliseconds() as f64 * t).round() as i64),
        }
    }

    /// Widens the domain outward to whole UTC days.
    pub fn nice(mut self) -> Self {
        let [d0, d1] = self.domain;
        let start = floor_day(&d0);
        let mut end = floor_day(&d1);
        if end < d1 {
            end += Duration::days(1);
        }
        self.domain = [start, end];
        self
    }
}

fn floor_day(dt: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let utc = dt.naive_utc().date().and_time(NaiveTime::MIN);
    utc.and_utc().with_timezone(dt.offset())
}

impl Scale<DateTime<FixedOffset>> for TimeScale {
    fn apply(&self, value: &DateTime<FixedOffset>) -> f64 {
        let [d0, d1] = self.domain;
        let t = normalize(
            value.timestamp_millis() as f64,
            d0.timestamp_millis() as f64,
            d1.timestamp_millis() as f64,
        );
        interpolate(t, self.range)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    pub fn invert(&self, y: f64) -> f64 {
        interpolate(normalize(y, self.range[0], self.range[1]), self.domain)
    }
}

impl Scale<f64> for LinearScale {
    fn apply(&self, value: &f64) -> f64 {
        interpolate(normalize(*value, self.domain[0], self.domain[1]), self.range)
    }
}

/// Square-root scale, used for dot radii so area tracks the value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl SqrtScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }
}

impl Scale<f64> for SqrtScale {
    fn apply(&self, value: &f64) -> f64 {
        let t = normalize(value.sqrt(), self.domain[0].sqrt(), self.domain[1].sqrt());
        interpolate(t, self.range)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            margin: Margin {
                top: 10.0,
                right: 10.0,
                bottom: 30.0,
                left: 40.0,
            },
        }
    }
}

impl ChartLayout {
    pub fn left(&self) -> f64 {
        self.margin.left
    }

    pub fn right(&self) -> f64 {
        self.width - self.margin.right
    }

    pub fn top(&self) -> f64 {
        self.margin.top
    }

    pub fn bottom(&self) -> f64 {
        self.height - self.margin.bottom
    }
}

pub const RADIUS_RANGE: [f64; 2] = [2.0, 30.0];

/// The scales of the commit scatter plot: time across, hour of day up.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScales {
    pub x: TimeScale,
    pub y: LinearScale,
    pub r: SqrtScale,
}

impl ChartScales {
    /// Returns `None` when there are no commits to span.
    pub fn for_commits(commits: &[Commit], layout: &ChartLayout) -> Option<Self> {
        let first = commits.iter().map(|c| c.datetime).min()?;
        let last = commits.iter().map(|c| c.datetime).max()?;
        let min_lines = commits.iter().map(|c| c.total_lines).min()? as f64;
        let max_lines = commits.iter().map(|c| c.total_lines).max()? as f64;

        Some(Self {
            x: TimeScale::new([first, last], [layout.left(), layout.right()]).nice(),
            y: LinearScale::new([0.0, 24.0], [layout.bottom(), layout.top()]),
            r: SqrtScale::new([min_lines, max_lines], RADIUS_RANGE),
        })
    }

    pub fn project(&self, commit: &Commit) -> (f64, f64) {
        (self.x.apply(&commit.datetime), self.y.apply(&commit.hour_frac))
    }

    pub fn radius(&self, commit: &Commit) -> f64 {
        self.r.apply(&(commit.total_lines as f64))
    }

    /// Projects a window of time and hours of day into chart coordinates.
    pub fn region_for(
        &self,
        from: &DateTime<FixedOffset>,
        to: &DateTime<FixedOffset>,
        hour_min: f64,
        hour_max: f64,
    ) -> SelectionRegion {
        SelectionRegion::new(
            [self.x.apply(from), self.y.apply(&hour_min)],
            [self.x.apply(to), self.y.apply(&hour_max)],
        )
    }
}

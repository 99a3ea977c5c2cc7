use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Timelike, Utc};
use std::collections::HashMap;
use std::hash::Hash;
use std::time::SystemTime;

use crate::error::{GlocError, Result};

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Night,
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
    ];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            h if h < 6 => TimeOfDay::Night,
            h if h < 12 => TimeOfDay::Morning,
            h if h < 18 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeOfDay::Night => "Night",
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Hour of day as a real number, in the timestamp's own offset.
pub fn hour_frac(datetime: &DateTime<FixedOffset>) -> f64 {
    datetime.hour() as f64 + datetime.minute() as f64 / 60.0
}

/// Row counts per time-of-day bucket, indexed in `TimeOfDay::ALL` order.
pub fn time_of_day_counts<'a, I>(datetimes: I) -> [usize; 4]
where
    I: IntoIterator<Item = &'a DateTime<FixedOffset>>,
{
    let mut counts = [0usize; 4];
    for dt in datetimes {
        counts[TimeOfDay::from_hour(dt.hour()).index()] += 1;
    }
    counts
}

pub fn weekday_counts<'a, I>(datetimes: I) -> [usize; 7]
where
    I: IntoIterator<Item = &'a DateTime<FixedOffset>>,
{
    let mut counts = [0usize; 7];
    for dt in datetimes {
        counts[dt.weekday().num_days_from_sunday() as usize] += 1;
    }
    counts
}

/// Index of the largest count; the earliest index wins ties.
pub fn first_max_index(counts: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, &c) in counts.iter().enumerate() {
        match best {
            Some((_, b)) if c <= b => {}
            _ => best = Some((i, c)),
        }
    }
    best.map(|(i, _)| i)
}

/// Groups items by key, keeping keys and members in first-seen order.
pub fn ordered_groups<'a, T, K, F>(items: &'a [T], mut key: F) -> Vec<(K, Vec<&'a T>)>
where
    K: Eq + Hash + Clone,
    F: FnMut(&'a T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a T>)> = Vec::new();
    for item in items {
        let k = key(item);
        match index.get(&k) {
            Some(&i) => groups[i].1.push(item),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }
    groups
}

pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

/// Parses a timezone column value: `+HH:MM`, `-HHMM`, `Z` or empty (UTC).
pub fn parse_offset(input: &str) -> Option<FixedOffset> {
    let s = input.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = match s.as_bytes()[0] {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Parses a user-supplied instant: RFC 3339, `YYYY-MM-DD`, or a relative
/// duration such as `3weeks ago` / `90d`.
pub fn parse_instant(input: &str) -> Result<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt);
    }

    if let Ok(date) = chrono::NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight).fixed_offset());
        }
    }

    let relative = input.trim().trim_end_matches("ago").trim();
    let duration = humantime::parse_duration(relative)
        .map_err(|e| GlocError::InvalidDate(format!("'{input}': {e}")))?;
    let target = SystemTime::now()
        .checked_sub(duration)
        .ok_or_else(|| GlocError::InvalidDate(format!("Duration overflow for '{input}'")))?;
    Ok(DateTime::<Utc>::from(target).fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hour_frac_includes_minutes() {
        let dt = DateTime::parse_from_rfc3339("2024-03-05T14:30:00-08:00").unwrap();
        assert_eq!(hour_frac(&dt), 14.5);
    }

    #[test]
    fn time_of_day_boundaries() {
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(18), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(23), TimeOfDay::Evening);
    }

    #[test]
    fn first_max_prefers_earliest() {
        assert_eq!(first_max_index(&[2, 0, 2, 1]), Some(0));
        assert_eq!(first_max_index(&[0, 1, 3, 3]), Some(2));
        assert_eq!(first_max_index(&[]), None);
    }

    #[test]
    fn ordered_groups_keep_first_seen_order() {
        let items = ["b1", "a1", "b2", "c1", "a2"];
        let groups = ordered_groups(&items, |s| s.chars().next().unwrap());
        let keys: Vec<char> = groups.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!['b', 'a', 'c']);
        assert_eq!(groups[0].1, vec![&"b1", &"b2"]);
    }

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(mean(std::iter::empty()), None);
        assert_eq!(mean([1.0, 2.0]), Some(1.5));
    }

    #[test]
    fn offsets_parse_in_common_spellings() {
        assert_eq!(parse_offset("-08:00"), FixedOffset::west_opt(8 * 3600));
        assert_eq!(parse_offset("+0530"), FixedOffset::east_opt(5 * 3600 + 1800));
        assert_eq!(parse_offset(""), FixedOffset::east_opt(0));
        assert_eq!(parse_offset("Z"), FixedOffset::east_opt(0));
        assert_eq!(parse_offset("PST"), None);
        assert_eq!(parse_offset("+8"), None);
    }

    #[test]
    fn instants_accept_dates_and_durations() {
        let d = parse_instant("2024-01-02").unwrap();
        assert_eq!(d.to_rfc3339(), "2024-01-02T00:00:00+00:00");
        assert!(parse_instant("2weeks ago").unwrap() < Utc::now());
        assert!(parse_instant("yesterday-ish").is_err());
    }
}

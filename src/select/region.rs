use crate::error::{GlocError, Result};
use crate::model::{Commit, SelectionRegion};
use crate::scale::Scale;
use chrono::{DateTime, FixedOffset};

pub type TimeAxis<'a> = &'a dyn Scale<DateTime<FixedOffset>>;
pub type HourAxis<'a> = &'a dyn Scale<f64>;

/// Whether a commit's plotted point lies inside the region, bounds inclusive.
///
/// Without a region or without both scales nothing is selected.
pub fn is_selected(
    region: Option<&SelectionRegion>,
    scale_x: Option<TimeAxis<'_>>,
    scale_y: Option<HourAxis<'_>>,
    commit: &Commit,
) -> bool {
    let (Some(region), Some(sx), Some(sy)) = (region, scale_x, scale_y) else {
        return false;
    };
    let x = sx.apply(&commit.datetime);
    let y = sy.apply(&commit.hour_frac);
    region.contains(x, y)
}

pub fn selected_commits<'c>(
    region: Option<&SelectionRegion>,
    commits: &'c [Commit],
    scale_x: Option<TimeAxis<'_>>,
    scale_y: Option<HourAxis<'_>>,
) -> Vec<&'c Commit> {
    if region.is_none() {
        return Vec::new();
    }
    commits
        .iter()
        .filter(|c| is_selected(region, scale_x, scale_y, c))
        .collect()
}

/// Parses `x0,y0,x1,y1` in chart coordinates.
pub fn parse_region(input: &str) -> Result<SelectionRegion> {
    let values: Vec<f64> = input
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| GlocError::InvalidRegion(format!("'{input}': {e}")))?;
    match values.as_slice() {
        [x0, y0, x1, y1] if values.iter().all(|v| v.is_finite()) => {
            Ok(SelectionRegion::new([*x0, *y0], [*x1, *y1]))
        }
        _ => Err(GlocError::InvalidRegion(format!(
            "'{input}': expected four finite numbers x0,y0,x1,y1"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::group_into_commits;
    use crate::ingest::test_rows::row;
    use crate::scale::{ChartLayout, ChartScales};
    use pretty_assertions::assert_eq;

    fn commits() -> Vec<Commit> {
        let rows = vec![
            row("a", "x.js", 1, 0, 1, "js", "2024-01-01T02:00:00+00:00"),
            row("b", "x.css", 1, 0, 1, "css", "2024-01-02T14:00:00+00:00"),
            row("c", "x.js", 2, 0, 1, "js", "2024-01-03T20:00:00+00:00"),
            row("d", "x.md", 1, 0, 1, "md", "2024-01-04T09:30:00+00:00"),
        ];
        group_into_commits(&rows, "u")
    }

    fn ids(selected: &[&Commit]) -> Vec<String> {
        selected.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn unset_scales_or_region_select_nothing() {
        let commits = commits();
        let scales = ChartScales::for_commits(&commits, &ChartLayout::default()).unwrap();
        let everything = SelectionRegion::new([0.0, 0.0], [1000.0, 600.0]);

        assert!(is_selected(Some(&everything), Some(&scales.x), Some(&scales.y), &commits[0]));
        assert!(!is_selected(None, Some(&scales.x), Some(&scales.y), &commits[0]));
        assert!(!is_selected(Some(&everything), None, Some(&scales.y), &commits[0]));
        assert!(!is_selected(Some(&everything), Some(&scales.x), None, &commits[0]));
        assert!(selected_commits(None, &commits, Some(&scales.x), Some(&scales.y)).is_empty());
    }

    #[test]
    fn regions_parse_from_corners() {
        let r = parse_region("300, 50,100,400").unwrap();
        assert_eq!(r.corners(), [[100.0, 50.0], [300.0, 400.0]]);
        assert!(parse_region("1,2,3").is_err());
        assert!(parse_region("a,b,c,d").is_err());
        assert!(parse_region("0,0,inf,1").is_err());
    }

    #[test]
    fn bounds_are_inclusive() {
        let commits = commits();
        let scales = ChartScales::for_commits(&commits, &ChartLayout::default()).unwrap();
        let (x, y) = scales.project(&commits[1]);
        let point = SelectionRegion::new([x, y], [x, y]);
        let hit = selected_commits(Some(&point), &commits, Some(&scales.x), Some(&scales.y));
        assert_eq!(ids(&hit), vec!["b"]);
    }

    #[test]
    fn data_space_window_selects_working_hours() {
        let commits = commits();
        let scales = ChartScales::for_commits(&commits, &ChartLayout::default()).unwrap();
        let [start, end] = scales.x.domain();
        let region = scales.region_for(&start, &end, 9.0, 17.0);
        let hit = selected_commits(Some(&region), &commits, Some(&scales.x), Some(&scales.y));
        assert_eq!(ids(&hit), vec!["b", "d"]);
    }

    #[test]
    fn empty_region_selects_nothing_without_panicking() {
        let commits = commits();
        let scales = ChartScales::for_commits(&commits, &ChartLayout::default()).unwrap();
        let off_chart = SelectionRegion::new([-50.0, -50.0], [-10.0, -10.0]);
        let hit = selected_commits(Some(&off_chart), &commits, Some(&scales.x), Some(&scales.y));
        assert!(hit.is_empty());
    }

    #[test]
    fn shrinking_never_selects_more() {
        let commits = commits();
        let scales = ChartScales::for_commits(&commits, &ChartLayout::default()).unwrap();
        let mut region = SelectionRegion::new([40.0, 10.0], [990.0, 570.0]);
        let mut previous = usize::MAX;
        for _ in 0..12 {
            let n = selected_commits(Some(&region), &commits, Some(&scales.x), Some(&scales.y)).len();
            assert!(n <= previous);
            previous = n;
            region = SelectionRegion::new(
                [region.x0 + 40.0, region.y0 + 20.0],
                [region.x1 - 30.0, region.y1 - 25.0],
            );
        }
    }
}

use crate::model::{Commit, LanguageShare};
use crate::util::ordered_groups;

/// Line counts per type across the selected commits, largest first.
pub fn language_breakdown(selected: &[&Commit]) -> Vec<LanguageShare> {
    let lines: Vec<_> = selected.iter().flat_map(|c| c.lines.iter()).collect();
    if lines.is_empty() {
        return Vec::new();
    }

    let total = lines.len() as f64;
    let mut shares: Vec<LanguageShare> = ordered_groups(&lines, |l| l.kind.as_str())
        .into_iter()
        .map(|(kind, rows)| LanguageShare {
            kind: kind.to_string(),
            count: rows.len(),
            fraction: rows.len() as f64 / total,
        })
        .collect();

    // stable: equal counts keep first-grouped order
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}

/// `"42.9%"`-style label with at most one decimal, trailing zero trimmed.
pub fn format_fraction(fraction: f64) -> String {
    let pct = format!("{:.1}", fraction * 100.0);
    let pct = pct.strip_suffix(".0").unwrap_or(&pct);
    format!("{pct}%")
}

pub fn selection_label(count: usize) -> String {
    match count {
        0 => "No commits selected".to_string(),
        n => format!("{n} commits selected"),
    }
}

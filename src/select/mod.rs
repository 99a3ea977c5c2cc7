pub mod breakdown;
pub mod brush;
pub mod exec;
pub mod output;
pub mod region;

pub use breakdown::{format_fraction, language_breakdown, selection_label};
pub use brush::{Brush, BrushPhase};
pub use exec::exec;
pub use region::{is_selected, parse_region, selected_commits, HourAxis, TimeAxis};

use super::breakdown::{language_breakdown, selection_label};
use super::region::{selected_commits, HourAxis, TimeAxis};
use crate::model::{Commit, LanguageShare, SelectionRegion};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushPhase {
    Idle,
    Dragging,
    Committed,
}

/// Lifecycle of a brush gesture and the selection it currently drives.
///
/// Every event fully replaces the previous selection.
#[derive(Debug, Clone)]
pub struct Brush {
    phase: BrushPhase,
    region: Option<SelectionRegion>,
    selected: Vec<String>,
    breakdown: Vec<LanguageShare>,
}

impl Default for Brush {
    fn default() -> Self {
        Self::new()
    }
}

impl Brush {
    pub fn new() -> Self {
        Self {
            phase: BrushPhase::Idle,
            region: None,
            selected: Vec::new(),
            breakdown: Vec::new(),
        }
    }

    pub fn phase(&self) -> BrushPhase {
        self.phase
    }

    pub fn region(&self) -> Option<&SelectionRegion> {
        self.region.as_ref()
    }

    /// Ids of the selected commits, in the order they were given.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn breakdown(&self) -> &[LanguageShare] {
        &self.breakdown
    }

    pub fn label(&self) -> String {
        selection_label(self.selected.len())
    }

    pub fn start(
        &mut self,
        region: Option<SelectionRegion>,
        commits: &[Commit],
        scale_x: Option<TimeAxis<'_>>,
        scale_y: Option<HourAxis<'_>>,
    ) {
        self.phase = BrushPhase::Dragging;
        self.recompute(region, commits, scale_x, scale_y);
    }

    /// Drag moved. Ignored unless a drag is in progress.
    pub fn update(
        &mut self,
        region: Option<SelectionRegion>,
        commits: &[Commit],
        scale_x: Option<TimeAxis<'_>>,
        scale_y: Option<HourAxis<'_>>,
    ) {
        if self.phase != BrushPhase::Dragging {
            return;
        }
        self.recompute(region, commits, scale_x, scale_y);
    }

    /// Drag released. Ignored unless a drag is in progress.
    pub fn end(
        &mut self,
        region: Option<SelectionRegion>,
        commits: &[Commit],
        scale_x: Option<TimeAxis<'_>>,
        scale_y: Option<HourAxis<'_>>,
    ) {
        if self.phase != BrushPhase::Dragging {
            return;
        }
        match region {
            Some(r) if !r.is_empty() => {
                self.recompute(Some(r), commits, scale_x, scale_y);
                self.phase = BrushPhase::Committed;
            }
            _ => self.clear(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn recompute(
        &mut self,
        region: Option<SelectionRegion>,
        commits: &[Commit],
        scale_x: Option<TimeAxis<'_>>,
        scale_y: Option<HourAxis<'_>>,
    ) {
        let hit = selected_commits(region.as_ref(), commits, scale_x, scale_y);
        self.breakdown = language_breakdown(&hit);
        self.selected = hit.iter().map(|c| c.id.clone()).collect();
        self.region = region;
        debug!("brush {:?}: {} commits selected", self.phase, self.selected.len());
    }
}

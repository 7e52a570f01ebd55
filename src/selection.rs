use crate::data_types::{RangeSelection, SelectionBar, ViewWindow};
use crate::scales::TimeScale;

/// Initial selection bounds as fractions of the visible window.
const INITIAL_START_PCT: f64 = 0.25;
const INITIAL_END_PCT: f64 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handle {
    Start,
    End,
}

/// Keeps the draggable start/end pair of the range selection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RangeSelectionManager {
    selection: Option<RangeSelection>,
}

impl RangeSelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<RangeSelection> {
        self.selection
    }

    /// Initializes the selection from `window` on first use. Later calls keep it.
    pub fn ensure_initialized(&mut self, window: &ViewWindow) -> RangeSelection {
        *self.selection.get_or_insert_with(|| RangeSelection {
            start: window.start + window.range * INITIAL_START_PCT,
            end: window.start + window.range * INITIAL_END_PCT,
        })
    }

    /// Moves one handle to the time under `offset_px`. Both bounds end up
    /// inside the window; the other handle is only re-clamped, never reordered.
    pub fn drag(
        &mut self,
        handle: Handle,
        offset_px: f64,
        scale: &TimeScale,
        window: &ViewWindow,
    ) -> RangeSelection {
        let mut selection = self.ensure_initialized(window);
        let time = scale.invert(offset_px);
        match handle {
            Handle::Start => selection.start = time,
            Handle::End => selection.end = time,
        }
        selection.start = window.clamp(selection.start);
        selection.end = window.clamp(selection.end);
        self.selection = Some(selection);
        selection
    }

    /// Handle and bar geometry. The bar spans the ordered pair even when the
    /// stored bounds are inverted.
    pub fn bar(&self, scale: &TimeScale) -> Option<SelectionBar> {
        let selection = self.selection?;
        let start_handle = scale.map(selection.start);
        let end_handle = scale.map(selection.end);
        Some(SelectionBar {
            start_handle,
            end_handle,
            bar_start: start_handle.min(end_handle),
            bar_end: start_handle.max(end_handle),
        })
    }
}

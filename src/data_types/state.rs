use serde::{Deserialize, Serialize};

/// Slider position when no bounds have been mapped yet.
pub const SLIDER_MIDPOINT: f64 = 500.0;
pub const SLIDER_MAX: f64 = 1000.0;

/// Visible time interval mapped onto the drawable surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewWindow {
    pub start: f64,
    pub end: f64,
    pub range: f64,
}

impl ViewWindow {
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    pub fn clamp(&self, time: f64) -> f64 {
        time.max(self.start).min(self.end)
    }

    /// Whether the window can be mapped onto a surface at all.
    pub fn is_degenerate(&self) -> bool {
        !(self.range.is_finite() && self.range > 0.0)
    }
}

/// Snapshot of the viewport. Transitions produce new snapshots, see
/// [`crate::view_controller::ViewController`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub zoom_level: f64,
    /// Unset until the first range sync. Never clamped to the bounds.
    pub center_time: Option<f64>,
    pub min_time: f64,
    pub max_time: f64,
    /// Last successfully mapped slider position in `[0, 1000]`.
    pub slider: f64,
}

impl ViewportState {
    pub fn new(zoom_level: f64) -> Self {
        Self {
            zoom_level,
            center_time: None,
            min_time: 0.0,
            max_time: 0.0,
            slider: SLIDER_MIDPOINT,
        }
    }

    /// Extent of the whole data range.
    pub fn full_range(&self) -> f64 {
        self.max_time - self.min_time
    }

    /// Halves before adding so bounds near `f64::MAX` stay finite.
    pub fn midpoint(&self) -> f64 {
        self.min_time / 2.0 + self.max_time / 2.0
    }

    /// Center used for layout; falls back to the bounds midpoint while unset.
    pub fn effective_center(&self) -> f64 {
        self.center_time.unwrap_or_else(|| self.midpoint())
    }

    pub fn view_window(&self) -> ViewWindow {
        let range = self.full_range() / self.zoom_level;
        let center = self.effective_center();
        ViewWindow {
            start: center - range / 2.0,
            end: center + range / 2.0,
            range,
        }
    }

    /// Integer slider position for display.
    pub fn slider_position(&self) -> u16 {
        self.slider.round().clamp(0.0, SLIDER_MAX) as u16
    }
}

/// The user-adjustable sub-range. Bounds are independent and may be inverted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RangeSelection {
    pub start: f64,
    pub end: f64,
}

impl RangeSelection {
    /// The selection as an ordered `(min, max)` pair.
    pub fn ordered(&self) -> (f64, f64) {
        (self.start.min(self.end), self.start.max(self.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_window_invariant() {
        let state = ViewportState {
            zoom_level: 2.0,
            center_time: Some(50.0),
            min_time: 0.0,
            max_time: 100.0,
            slider: SLIDER_MIDPOINT,
        };
        let window = state.view_window();
        assert_eq!(window.range, 50.0);
        assert_eq!(window.start, 25.0);
        assert_eq!(window.end, 75.0);
    }

    #[test]
    fn test_unset_center_uses_midpoint() {
        let state = ViewportState {
            min_time: 10.0,
            max_time: 30.0,
            ..ViewportState::new(1.0)
        };
        let window = state.view_window();
        assert_eq!((window.start, window.end), (10.0, 30.0));
    }

    #[test]
    fn test_zero_range_window_is_degenerate() {
        let state = ViewportState {
            min_time: 5.0,
            max_time: 5.0,
            center_time: Some(5.0),
            ..ViewportState::new(1.0)
        };
        assert!(state.view_window().is_degenerate());
    }

    #[test]
    fn test_selection_ordered() {
        let selection = RangeSelection {
            start: 8.0,
            end: 3.0,
        };
        assert_eq!(selection.ordered(), (3.0, 8.0));
    }
}

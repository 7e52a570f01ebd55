use crate::data_types::{TimelineConfig, ViewportState, SLIDER_MAX};
use crate::notifications::Notification;

/// A viewport mutation requested by the host or by the engine itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportCommand {
    SetZoom(f64),
    SetCenter(f64),
    /// Absolute slider position in `[0, 1000]`.
    SetSlider(f64),
    ZoomIn,
    ZoomOut,
    /// Modified wheel gesture; only the sign of the delta matters.
    ZoomByDelta(f64),
    /// Scroll/drag delta along the axis.
    PanByDelta(f64),
}

/// Result of applying a command to a snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: ViewportState,
    /// `None` when the command was a no-op.
    pub notification: Option<Notification>,
}

impl Transition {
    fn unchanged(state: ViewportState) -> Self {
        Self {
            state,
            notification: None,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.notification.is_none()
    }
}

/// ViewController holds the viewport business logic (zoom, pan, slider)
/// as pure functions over [`ViewportState`] snapshots.
pub struct ViewController;

impl ViewController {
    /// Applies a command and returns the new snapshot plus what to notify.
    pub fn apply(
        state: ViewportState,
        command: ViewportCommand,
        config: &TimelineConfig,
    ) -> Transition {
        match command {
            ViewportCommand::SetZoom(zoom) => Self::set_zoom(state, zoom, config),
            ViewportCommand::SetCenter(time) => Self::set_center(state, time),
            ViewportCommand::SetSlider(position) => {
                Self::set_center(state, Self::slider_to_center(&state, position))
            }
            ViewportCommand::ZoomIn => {
                Self::set_zoom(state, state.zoom_level + config.zoom_step, config)
            }
            ViewportCommand::ZoomOut => {
                Self::set_zoom(state, state.zoom_level - config.zoom_step, config)
            }
            ViewportCommand::ZoomByDelta(delta) => {
                let zoom = Self::wheel_zoom_target(state.zoom_level, delta, config.wheel_zoom_step);
                Self::set_zoom(state, zoom, config)
            }
            ViewportCommand::PanByDelta(delta) => {
                let center = Self::pan_target(&state, delta, config.pan_divisor);
                Self::set_center(state, center)
            }
        }
    }

    pub fn clamp_zoom(zoom: f64, min_zoom: f64, max_zoom: f64) -> f64 {
        min_zoom.max(max_zoom.min(zoom))
    }

    /// Clamped zoom change. Equal (post-clamp) zoom is a no-op.
    pub fn set_zoom(state: ViewportState, zoom: f64, config: &TimelineConfig) -> Transition {
        if zoom.is_nan() {
            return Transition::unchanged(state);
        }
        let clamped = Self::clamp_zoom(zoom, config.min_zoom, config.max_zoom);
        if clamped == state.zoom_level {
            return Transition::unchanged(state);
        }
        let state = Self::refresh_slider(ViewportState {
            zoom_level: clamped,
            ..state
        });
        Transition {
            state,
            notification: Some(Notification::Zoom(clamped)),
        }
    }

    /// Unclamped center change; always notifies.
    pub fn set_center(state: ViewportState, time: f64) -> Transition {
        if !time.is_finite() {
            return Transition::unchanged(state);
        }
        let state = Self::refresh_slider(ViewportState {
            center_time: Some(time),
            ..state
        });
        Transition {
            state,
            notification: Some(Notification::Move(time)),
        }
    }

    /// Recomputes the slider from the center. Skipped when the bounds are degenerate.
    pub fn refresh_slider(state: ViewportState) -> ViewportState {
        match Self::center_to_slider(&state) {
            Some(slider) => ViewportState { slider, ..state },
            None => state,
        }
    }

    /// Slider position of the current center, or `None` when `max_time == min_time`.
    pub fn center_to_slider(state: &ViewportState) -> Option<f64> {
        let total = state.full_range();
        if !total.is_finite() || total == 0.0 {
            return None;
        }
        let value = (state.effective_center() - state.min_time) / total * SLIDER_MAX;
        value.is_finite().then(|| value.clamp(0.0, SLIDER_MAX))
    }

    pub fn slider_to_center(state: &ViewportState, position: f64) -> f64 {
        let pct = position.clamp(0.0, SLIDER_MAX) / SLIDER_MAX;
        state.min_time + pct * state.full_range()
    }

    /// Wheel zoom: a positive delta zooms out, anything else zooms in.
    pub fn wheel_zoom_target(zoom: f64, delta: f64, step: f64) -> f64 {
        if delta > 0.0 {
            zoom - step
        } else {
            zoom + step
        }
    }

    /// Center after a pan gesture: `delta / pan_divisor` full data ranges.
    pub fn pan_target(state: &ViewportState, delta: f64, pan_divisor: f64) -> f64 {
        state.effective_center() + (delta / pan_divisor) * state.full_range()
    }
}

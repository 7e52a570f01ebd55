use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use super::event::Track;
use crate::error::{Result, TimelineError};

const DAY_MS: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Which surface dimension carries the time axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Picks the axis extent out of a surface's width and height.
    pub fn extent_of(self, width: f64, height: f64) -> f64 {
        match self {
            Self::Horizontal => width,
            Self::Vertical => height,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub orientation: Orientation,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Initial zoom level.
    pub zoom: f64,
    pub cluster_radius_px: f64,
    pub enable_auto_splits: bool,
    pub manual_splits: Vec<f64>,
    pub split_threshold_ms: f64,
    pub default_icon: String,
    pub range_selection: bool,
    pub tracks: Vec<Track>,
    /// Zoom increment of the zoom buttons and of aggregate-cluster activation.
    pub zoom_step: f64,
    /// Zoom increment of one wheel notch.
    pub wheel_zoom_step: f64,
    /// A pan delta of `pan_divisor` moves the center by one full data range.
    pub pan_divisor: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            min_zoom: 0.5,
            max_zoom: 6.0,
            zoom: 1.0,
            cluster_radius_px: 24.0,
            enable_auto_splits: false,
            manual_splits: Vec::new(),
            split_threshold_ms: 30.0 * DAY_MS,
            default_icon: "●".to_string(),
            range_selection: false,
            tracks: Vec::new(),
            zoom_step: 0.5,
            wheel_zoom_step: 0.2,
            pan_divisor: 500.0,
        }
    }
}

impl TimelineConfig {
    /// Loads defaults, then `path` (TOML) if given, then `TIMELINE_*` environment variables.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("TIMELINE_"));

        let config: Self = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the preconditions the engine relies on.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_zoom.is_finite() && self.min_zoom > 0.0) {
            return Err(TimelineError::invalid_config(format!(
                "min_zoom must be a positive number, got {}",
                self.min_zoom
            )));
        }
        if !(self.max_zoom.is_finite() && self.max_zoom >= self.min_zoom) {
            return Err(TimelineError::invalid_config(format!(
                "max_zoom ({}) must be finite and >= min_zoom ({})",
                self.max_zoom, self.min_zoom
            )));
        }
        if !self.zoom.is_finite() {
            return Err(TimelineError::invalid_config("zoom must be finite"));
        }
        if !(self.cluster_radius_px.is_finite() && self.cluster_radius_px >= 0.0) {
            return Err(TimelineError::invalid_config(format!(
                "cluster_radius_px must be finite and non-negative, got {}",
                self.cluster_radius_px
            )));
        }
        if !(self.pan_divisor.is_finite() && self.pan_divisor > 0.0) {
            return Err(TimelineError::invalid_config(format!(
                "pan_divisor must be a positive number, got {}",
                self.pan_divisor
            )));
        }
        if self.manual_splits.iter().any(|t| !t.is_finite()) {
            return Err(TimelineError::invalid_config("manual splits must be finite"));
        }
        Ok(())
    }

    /// Initial zoom clamped into the configured bounds.
    pub fn initial_zoom(&self) -> f64 {
        self.zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

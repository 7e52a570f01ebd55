use serde::{Deserialize, Serialize};

use crate::data_types::ViewWindow;

/// Linear mapping between time (ms) and surface pixels for one window.
///
/// Only constructible when both the window range and the surface extent are
/// finite and positive, so mapped positions of finite times stay finite.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    origin: f64,
    pixels_per_ms: f64,
}

impl TimeScale {
    pub fn new(window: &ViewWindow, extent_px: f64) -> Option<Self> {
        if window.is_degenerate() || !window.start.is_finite() {
            return None;
        }
        if !(extent_px.is_finite() && extent_px > 0.0) {
            return None;
        }
        Self::from_pixels_per_ms(window.start, extent_px / window.range)
    }

    /// Builds a scale directly from a known `pixels_per_ms` factor.
    pub fn from_pixels_per_ms(origin: f64, pixels_per_ms: f64) -> Option<Self> {
        if !(origin.is_finite() && pixels_per_ms.is_finite() && pixels_per_ms > 0.0) {
            return None;
        }
        Some(Self {
            origin,
            pixels_per_ms,
        })
    }

    pub fn pixels_per_ms(&self) -> f64 {
        self.pixels_per_ms
    }

    pub fn origin(&self) -> f64 {
        self.origin
    }

    /// Pixel offset of `time` from the window start.
    pub fn map(&self, time: f64) -> f64 {
        (time - self.origin) * self.pixels_per_ms
    }

    /// Time at a surface-relative pixel offset.
    pub fn invert(&self, pixel: f64) -> f64 {
        self.origin + pixel / self.pixels_per_ms
    }
}

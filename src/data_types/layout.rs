use serde::{Deserialize, Serialize};

use super::config::Orientation;
use super::event::{Event, Track};
use super::state::ViewWindow;
use crate::scales::TimeScale;

/// One continuous stretch of the axis, in `[0, 1]` fractions of the window.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
}

impl Segment {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClusterKind {
    Point,
    /// Pixel span from the earliest member start to the latest member end.
    Range { range_start: f64, range_end: f64 },
}

/// One or more events drawn as a single marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub events: Vec<Event>,
    pub count: usize,
    /// Mean of the member start times.
    pub center_time: f64,
    /// Pixel offset of `center_time` from the window start.
    pub position: f64,
    pub kind: ClusterKind,
    pub icon: String,
}

impl Cluster {
    pub fn is_range(&self) -> bool {
        matches!(self.kind, ClusterKind::Range { .. })
    }

    /// Aggregates are drawn with a count badge; singletons with their icon.
    pub fn is_aggregate(&self) -> bool {
        self.count > 1
    }
}

/// Pixel interval for drawing the bar of a range cluster.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RangeInterval {
    pub start: f64,
    pub end: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackClusters {
    pub clusters: Vec<Cluster>,
    pub intervals: Vec<RangeInterval>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackLayout {
    pub track: Track,
    pub clusters: Vec<Cluster>,
    pub intervals: Vec<RangeInterval>,
}

/// Pixel geometry of the range selection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionBar {
    pub start_handle: f64,
    pub end_handle: f64,
    pub bar_start: f64,
    pub bar_end: f64,
}

/// Everything a presentation layer needs to draw one pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub orientation: Orientation,
    pub window: ViewWindow,
    pub scale: TimeScale,
    pub segments: Vec<Segment>,
    pub tracks: Vec<TrackLayout>,
    pub selection: Option<SelectionBar>,
}

impl Layout {
    pub fn track(&self, track_id: &str) -> Option<&TrackLayout> {
        self.tracks.iter().find(|t| t.track.id == track_id)
    }

    pub fn cluster_count(&self) -> usize {
        self.tracks.iter().map(|t| t.clusters.len()).sum()
    }
}

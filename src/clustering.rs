//! Greedy 1-D clustering of events by on-axis pixel proximity.
//!
//! Each event is compared with the most recently added member of the open
//! cluster, not with a centroid, so a dense run of events drifting slowly
//! along the axis chains into one cluster wider than twice the radius.

use crate::data_types::{Cluster, ClusterKind, Event, RangeInterval, TrackClusters, ViewWindow};
use crate::scales::TimeScale;

/// Parameters shared by every track of one layout pass.
#[derive(Debug, Clone, Copy)]
pub struct ClusterParams<'a> {
    pub scale: &'a TimeScale,
    pub window: &'a ViewWindow,
    pub radius_px: f64,
    pub default_icon: &'a str,
}

struct OpenCluster<'e> {
    events: Vec<&'e Event>,
    last_position: f64,
}

/// Clusters one track's events. Events entirely outside the window are dropped.
///
/// Returns `None` if any computed time or position is not finite.
pub fn cluster_events<'e, I>(events: I, params: &ClusterParams<'_>) -> Option<TrackClusters>
where
    I: IntoIterator<Item = &'e Event>,
{
    let window = params.window;
    let mut visible: Vec<&Event> = events
        .into_iter()
        .filter(|e| e.overlaps(window.start, window.end))
        .collect();
    // Stable: ties keep their input order.
    visible.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    let mut clusters = Vec::new();
    let mut open: Option<OpenCluster<'_>> = None;

    for event in visible {
        let position = params.scale.map(event.start_time);
        if !position.is_finite() {
            return None;
        }

        match open.as_mut() {
            Some(current) if (position - current.last_position).abs() <= params.radius_px => {
                current.events.push(event);
                current.last_position = position;
            }
            _ => {
                if let Some(done) = open.take() {
                    clusters.push(finalize_cluster(&done.events, params)?);
                }
                open = Some(OpenCluster {
                    events: vec![event],
                    last_position: position,
                });
            }
        }
    }

    if let Some(done) = open {
        clusters.push(finalize_cluster(&done.events, params)?);
    }

    let intervals = clusters
        .iter()
        .filter_map(|c| match c.kind {
            ClusterKind::Range {
                range_start,
                range_end,
            } => Some(RangeInterval {
                start: range_start,
                end: range_end,
            }),
            ClusterKind::Point => None,
        })
        .collect();

    Some(TrackClusters {
        clusters,
        intervals,
    })
}

fn finalize_cluster(events: &[&Event], params: &ClusterParams<'_>) -> Option<Cluster> {
    let count = events.len();
    let center_time = mean_start(events);
    let position = params.scale.map(center_time);
    if !(center_time.is_finite() && position.is_finite()) {
        return None;
    }

    let kind = if events.iter().any(|e| e.is_range()) {
        let min_start = events
            .iter()
            .map(|e| e.start_time)
            .fold(f64::INFINITY, f64::min);
        let max_end = events
            .iter()
            .map(|e| e.end_time)
            .fold(f64::NEG_INFINITY, f64::max);
        let range_start = params.scale.map(min_start);
        let range_end = params.scale.map(max_end);
        if !(range_start.is_finite() && range_end.is_finite()) {
            return None;
        }
        ClusterKind::Range {
            range_start,
            range_end,
        }
    } else {
        ClusterKind::Point
    };

    let icon = events[0]
        .icon
        .clone()
        .unwrap_or_else(|| params.default_icon.to_string());

    Some(Cluster {
        events: events.iter().map(|e| (*e).clone()).collect(),
        count,
        center_time,
        position,
        kind,
        icon,
    })
}

/// Running mean of the start times; stays finite where a plain sum overflows.
fn mean_start(events: &[&Event]) -> f64 {
    events
        .iter()
        .enumerate()
        .fold(0.0, |acc, (i, e)| acc + (e.start_time - acc) / (i + 1) as f64)
}

use chrono::{Duration, Utc};

use crate::data_types::{Event, ViewportState};

/// Half width of the synthetic window used when there are no events.
pub fn synthetic_half_window_ms() -> f64 {
    Duration::days(7).num_milliseconds() as f64
}

/// Current wall-clock time in UTC milliseconds.
pub fn now_ms() -> f64 {
    Utc::now().timestamp_millis() as f64
}

/// Derives the data bounds from `events`.
///
/// An empty set yields a ±7 day window centered on `now`. Otherwise the
/// bounds span every start and end time, and the center is initialized to
/// the midpoint only if it was never set.
pub fn sync_range(state: ViewportState, events: &[Event], now: f64) -> ViewportState {
    let Some((min_time, max_time)) = event_bounds(events) else {
        let half = synthetic_half_window_ms();
        return ViewportState {
            min_time: now - half,
            max_time: now + half,
            center_time: Some(now),
            ..state
        };
    };

    let synced = ViewportState {
        min_time,
        max_time,
        ..state
    };
    ViewportState {
        center_time: state.center_time.or(Some(synced.midpoint())),
        ..synced
    }
}

/// `(min, max)` over every event's start and end time.
pub fn event_bounds(events: &[Event]) -> Option<(f64, f64)> {
    events.iter().fold(None, |acc, event| {
        let lo = event.start_time.min(event.end_time);
        let hi = event.start_time.max(event.end_time);
        Some(match acc {
            None => (lo, hi),
            Some((min, max)) => (f64::min(min, lo), f64::max(max, hi)),
        })
    })
}

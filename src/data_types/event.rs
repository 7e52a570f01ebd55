use serde::{Deserialize, Serialize};

use crate::error::TimelineError;

/// Track used for events that do not name one.
pub const DEFAULT_TRACK_ID: &str = "default";

/// The loose record shape hosts hand over: either a `time` or a `start`
/// with an optional `end`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A normalized timeline event. Times are milliseconds, `start_time <= end_time`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEvent", into = "RawEvent")]
pub struct Event {
    pub id: String,
    pub track_id: String,
    pub start_time: f64,
    pub end_time: f64,
    pub icon: Option<String>,
}

impl Event {
    pub fn point(id: impl Into<String>, time: f64) -> Self {
        Self::range(id, time, time)
    }

    /// Builds a ranged event; an inverted pair is swapped.
    pub fn range(id: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            id: id.into(),
            track_id: DEFAULT_TRACK_ID.to_string(),
            start_time: start.min(end),
            end_time: start.max(end),
            icon: None,
        }
    }

    pub fn with_track(mut self, track_id: impl Into<String>) -> Self {
        self.track_id = track_id.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn is_range(&self) -> bool {
        self.start_time != self.end_time
    }

    /// Whether `[start_time, end_time]` touches the closed window `[start, end]`.
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        self.end_time >= start && self.start_time <= end
    }
}

impl TryFrom<RawEvent> for Event {
    type Error = TimelineError;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        let start = match (raw.start, raw.time) {
            (Some(start), _) => start,
            (None, Some(time)) => time,
            (None, None) => {
                return Err(TimelineError::InvalidEvent {
                    id: raw.id,
                    reason: "event has neither `time` nor `start`",
                });
            }
        };
        let end = if raw.start.is_some() {
            raw.end.unwrap_or(start)
        } else {
            start
        };

        if !start.is_finite() || !end.is_finite() {
            return Err(TimelineError::InvalidEvent {
                id: raw.id,
                reason: "event time is not finite",
            });
        }

        let mut event = Event::range(raw.id, start, end);
        if let Some(track_id) = raw.track_id {
            event.track_id = track_id;
        }
        event.icon = raw.icon;
        Ok(event)
    }
}

impl From<Event> for RawEvent {
    fn from(event: Event) -> Self {
        let (time, start, end) = if event.is_range() {
            (None, Some(event.start_time), Some(event.end_time))
        } else {
            (Some(event.start_time), None, None)
        };
        let track_id = (event.track_id != DEFAULT_TRACK_ID).then_some(event.track_id);
        Self {
            id: event.id,
            track_id,
            time,
            start,
            end,
            icon: event.icon,
        }
    }
}

/// A layout row. Events join the track whose `id` matches their `track_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Track {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Default for Track {
    fn default() -> Self {
        Self::new(DEFAULT_TRACK_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_from_time() {
        let event: Event = serde_json::from_str(r#"{"id":"a","time":42}"#).unwrap();
        assert_eq!(event.start_time, 42.0);
        assert_eq!(event.end_time, 42.0);
        assert_eq!(event.track_id, DEFAULT_TRACK_ID);
        assert!(!event.is_range());
    }

    #[test]
    fn test_start_without_end_is_a_point() {
        let event: Event = serde_json::from_str(r#"{"id":"a","start":10}"#).unwrap();
        assert_eq!((event.start_time, event.end_time), (10.0, 10.0));
    }

    #[test]
    fn test_inverted_range_is_swapped() {
        let event: Event =
            serde_json::from_str(r#"{"id":"a","start":30,"end":10,"trackId":"ops","icon":"x"}"#)
                .unwrap();
        assert_eq!((event.start_time, event.end_time), (10.0, 30.0));
        assert_eq!(event.track_id, "ops");
        assert_eq!(event.icon.as_deref(), Some("x"));
    }

    #[test]
    fn test_missing_time_is_rejected() {
        let res = serde_json::from_str::<Event>(r#"{"id":"a"}"#);
        assert!(res.is_err());

        let err = Event::try_from(RawEvent {
            id: "b".into(),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, TimelineError::InvalidEvent { .. }));
    }

    #[test]
    fn test_non_finite_time_is_rejected() {
        let err = Event::try_from(RawEvent {
            id: "nan".into(),
            time: Some(f64::NAN),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, TimelineError::InvalidEvent { .. }));
    }

    #[test]
    fn test_serializes_back_to_host_shape() {
        let json = serde_json::to_value(Event::range("r", 1.0, 2.0).with_track("t")).unwrap();
        assert_eq!(json["start"], 1.0);
        assert_eq!(json["end"], 2.0);
        assert_eq!(json["trackId"], "t");
        assert!(json.get("time").is_none());
    }
}

#[cfg(test)]
mod tests {
    use timeline_engine::data_types::{ViewWindow, DEFAULT_TRACK_ID};
    use timeline_engine::scales::TimeScale;
    use timeline_engine::segments::SegmentBuilder;
    use timeline_engine::{Event, Timeline, TimelineConfig};

    #[test]
    fn test_scale_zero_domain() {
        // Case: min == max (e.g. a single event)
        let window = ViewWindow {
            start: 10.0,
            end: 10.0,
            range: 0.0,
        };
        assert!(
            TimeScale::new(&window, 100.0).is_none(),
            "A zero range must not produce a scale"
        );
    }

    #[test]
    fn test_identical_timestamps() {
        let events = (0..5).map(|i| Event::point(i.to_string(), 1_000.0)).collect();
        let mut timeline = Timeline::with_events(TimelineConfig::default(), events).unwrap();
        timeline.set_surface_extent(640.0);

        // No layout possible, but nothing panics and the slider is untouched.
        assert!(timeline.layout().is_none());
        timeline.pan_by_delta(120.0);
        timeline.zoom_in();
        assert_eq!(timeline.slider_position(), 500);
        assert!(timeline.layout().is_none());

        // A second distinct time makes the range usable again.
        timeline.add_events([Event::point("late", 2_000.0)]);
        assert!(timeline.layout().is_some());
    }

    #[test]
    fn test_empty_timeline() {
        let mut timeline = Timeline::new(TimelineConfig::default()).unwrap();
        timeline.set_surface_extent(1024.0);

        let layout = timeline.layout().expect("synthetic window is drawable");
        assert_eq!(layout.segments.len(), 1);
        let track = layout.track(DEFAULT_TRACK_ID).unwrap();
        assert!(track.clusters.is_empty());
        assert!(track.intervals.is_empty());
    }

    #[test]
    fn test_extreme_zoom_precision() {
        let events = (0..1000)
            .map(|i| Event::point(i.to_string(), 1_000_000.0 + i as f64 * 1e-9))
            .collect();
        let config = TimelineConfig {
            max_zoom: 1e6,
            ..Default::default()
        };
        let mut timeline = Timeline::with_events(config, events).unwrap();
        timeline.set_surface_extent(1920.0);
        timeline.set_zoom(1e6);

        if let Some(layout) = timeline.layout() {
            for track in &layout.tracks {
                for cluster in &track.clusters {
                    assert!(cluster.position.is_finite());
                }
            }
        }
    }

    #[test]
    fn test_segments_on_non_finite_window() {
        let segments = SegmentBuilder::new().build(&[], f64::NEG_INFINITY, f64::INFINITY);
        assert_eq!(segments.len(), 1);
        assert_eq!((segments[0].start, segments[0].end), (0.0, 1.0));
    }
}

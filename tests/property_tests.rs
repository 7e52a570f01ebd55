use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use timeline_engine::clustering::{cluster_events, ClusterParams};
use timeline_engine::data_types::ViewWindow;
use timeline_engine::scales::TimeScale;
use timeline_engine::segments::{SegmentBuilder, SplitRule};
use timeline_engine::{Event, Handle, Timeline, TimelineConfig};

fn random_events(rng: &mut StdRng, n: usize) -> Vec<Event> {
    (0..n)
        .map(|i| {
            let start = rng.random_range(-500.0..1500.0);
            if rng.random_bool(0.3) {
                Event::range(i.to_string(), start, start + rng.random_range(0.0..200.0))
            } else {
                Event::point(i.to_string(), start)
            }
        })
        .collect()
}

#[test]
fn test_clustering_invariants() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let n = rng.random_range(0..300);
        let events = random_events(&mut rng, n);
        let start = rng.random_range(-200.0..400.0);
        let end = start + rng.random_range(1.0..1000.0);
        let window = ViewWindow {
            start,
            end,
            range: end - start,
        };
        let extent = rng.random_range(50.0..4000.0);
        let scale = TimeScale::new(&window, extent).unwrap();
        let radius = rng.random_range(0.0..40.0);
        let params = ClusterParams {
            scale: &scale,
            window: &window,
            radius_px: radius,
            default_icon: "●",
        };

        let result = cluster_events(&events, &params).unwrap();

        // Count conservation.
        let visible = events.iter().filter(|e| e.overlaps(start, end)).count();
        let total: usize = result.clusters.iter().map(|c| c.count).sum();
        assert_eq!(total, visible);

        // Ordering.
        for pair in result.clusters.windows(2) {
            assert!(pair[0].center_time <= pair[1].center_time);
            assert!(pair[0].position <= pair[1].position);
        }

        // Chained proximity inside, separation between clusters.
        for cluster in &result.clusters {
            assert_eq!(cluster.count, cluster.events.len());
            for pair in cluster.events.windows(2) {
                let gap = scale.map(pair[1].start_time) - scale.map(pair[0].start_time);
                assert!(gap >= 0.0 && gap <= radius);
            }
        }
        for pair in result.clusters.windows(2) {
            let last = pair[0].events.last().unwrap();
            let first = &pair[1].events[0];
            assert!(scale.map(first.start_time) - scale.map(last.start_time) > radius);
        }

        let ranges = result.clusters.iter().filter(|c| c.is_range()).count();
        assert_eq!(result.intervals.len(), ranges);
    }
}

#[test]
fn test_segments_partition_unit_interval() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..200 {
        let n = rng.random_range(0..50);
        let events = random_events(&mut rng, n);
        let mut builder = SegmentBuilder::new();
        for _ in 0..rng.random_range(0..10) {
            builder.add_rule(SplitRule::Manual(rng.random_range(-600.0..1600.0)));
        }
        builder.add_rule(SplitRule::AutoGap {
            threshold_ms: rng.random_range(1.0..300.0),
        });

        let start = rng.random_range(-500.0..500.0);
        let end = start + rng.random_range(1.0..1500.0);
        let segments = builder.build(&events, start, end);

        assert!(!segments.is_empty());
        assert_eq!(segments[0].start, 0.0);
        assert_eq!(segments.last().unwrap().end, 1.0);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        for segment in &segments {
            assert!(segment.width() > 0.0);
        }
    }
}

#[test]
fn test_zoom_always_within_bounds() {
    let mut rng = StdRng::seed_from_u64(3);
    let config = TimelineConfig::default();
    let (min_zoom, max_zoom) = (config.min_zoom, config.max_zoom);
    let mut timeline = Timeline::with_events(config, random_events(&mut rng, 20)).unwrap();

    for _ in 0..500 {
        let z = rng.random_range(-20.0..20.0);
        timeline.set_zoom(z);
        assert!(timeline.zoom() >= min_zoom && timeline.zoom() <= max_zoom);
        timeline.zoom_by_delta(rng.random_range(-5.0..5.0));
        assert!(timeline.zoom() >= min_zoom && timeline.zoom() <= max_zoom);
    }
}

#[test]
fn test_selection_stays_in_window() {
    let mut rng = StdRng::seed_from_u64(5);
    let config = TimelineConfig {
        range_selection: true,
        ..Default::default()
    };
    let mut timeline = Timeline::with_events(config, random_events(&mut rng, 40)).unwrap();
    timeline.set_surface_extent(800.0);

    for _ in 0..300 {
        if rng.random_bool(0.2) {
            timeline.pan_by_delta(rng.random_range(-100.0..100.0));
        }
        if rng.random_bool(0.2) {
            timeline.set_zoom(rng.random_range(0.5..6.0));
        }
        let handle = if rng.random_bool(0.5) {
            Handle::Start
        } else {
            Handle::End
        };
        let selection = timeline
            .drag_handle(handle, rng.random_range(-400.0..1200.0))
            .unwrap();

        let window = timeline.view_window();
        assert!(window.contains(selection.start));
        assert!(window.contains(selection.end));
    }
}

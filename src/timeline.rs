//! Timeline engine
//!
//! `Timeline` is the single owner of the viewport and range selection. It
//! holds a read-only snapshot of the host's events, and every mutating call
//! synchronously recomputes the full [`Layout`] (segments, clusters per track,
//! selection bar) before returning. Notifications are delivered after the
//! layout has been refreshed.

use std::collections::HashSet;

use eyre::WrapErr;
use tracing::{debug, info, warn};

use crate::clustering::{cluster_events, ClusterParams};
use crate::data_types::{
    Cluster, Event, Layout, RangeSelection, Track, TrackLayout, TimelineConfig, ViewWindow,
    ViewportState,
};
use crate::error::{Result, TimelineError};
use crate::notifications::{EventBus, Notification, NotificationKind, SubscriptionId};
use crate::range_sync::{now_ms, sync_range};
use crate::scales::TimeScale;
use crate::segments::SegmentBuilder;
use crate::selection::{Handle, RangeSelectionManager};
use crate::view_controller::{ViewController, ViewportCommand};

/// Host hook run over every finalized cluster before the layout is published.
pub type ClusterHook = Box<dyn FnMut(&mut Cluster) + Send>;

pub struct Timeline {
    config: TimelineConfig,
    events: Vec<Event>,
    viewport: ViewportState,
    selection: RangeSelectionManager,
    segment_builder: SegmentBuilder,
    bus: EventBus,
    surface_extent: f64,
    cluster_hook: Option<ClusterHook>,
    layout: Option<Layout>,
}

impl Timeline {
    /// Creates an engine with no events. The viewport starts on a synthetic
    /// window around the current time.
    pub fn new(config: TimelineConfig) -> Result<Self> {
        Self::with_events(config, Vec::new())
    }

    /// Creates an engine whose first range sync already sees `events`, so the
    /// center starts on the midpoint of the data.
    pub fn with_events(config: TimelineConfig, events: Vec<Event>) -> Result<Self> {
        config.validate()?;
        let viewport = ViewportState::new(config.initial_zoom());
        let segment_builder = SegmentBuilder::from_config(&config);

        let mut timeline = Self {
            config,
            events,
            viewport,
            selection: RangeSelectionManager::new(),
            segment_builder,
            bus: EventBus::new(),
            surface_extent: 0.0,
            cluster_hook: None,
            layout: None,
        };
        timeline.sync_and_relayout();
        Ok(timeline)
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    pub fn view_window(&self) -> ViewWindow {
        self.viewport.view_window()
    }

    pub fn zoom(&self) -> f64 {
        self.viewport.zoom_level
    }

    pub fn center_time(&self) -> f64 {
        self.viewport.effective_center()
    }

    pub fn slider_position(&self) -> u16 {
        self.viewport.slider_position()
    }

    pub fn selection(&self) -> Option<RangeSelection> {
        self.selection.selection()
    }

    /// The layout of the latest pass, or `None` when nothing can be drawn
    /// (degenerate range, unmeasured surface or non-finite positions).
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Configured tracks, or the implicit default track.
    pub fn tracks(&self) -> Vec<Track> {
        if self.config.tracks.is_empty() {
            vec![Track::default()]
        } else {
            self.config.tracks.clone()
        }
    }

    // --- Ingestion ---

    pub fn set_events(&mut self, events: impl IntoIterator<Item = Event>) {
        self.events = events.into_iter().collect();
        info!(count = self.events.len(), "timeline events replaced");
        self.sync_and_relayout();
    }

    pub fn add_events(&mut self, events: impl IntoIterator<Item = Event>) {
        let before = self.events.len();
        self.events.extend(events);
        info!(
            added = self.events.len() - before,
            total = self.events.len(),
            "timeline events added"
        );
        self.sync_and_relayout();
    }

    pub fn remove_events<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: HashSet<String> = ids.into_iter().map(|id| id.as_ref().to_string()).collect();
        let before = self.events.len();
        self.events.retain(|e| !ids.contains(&e.id));
        info!(
            removed = before - self.events.len(),
            total = self.events.len(),
            "timeline events removed"
        );
        self.sync_and_relayout();
    }

    /// Replaces the events with a JSON array of host records.
    pub fn set_events_json(&mut self, json: &str) -> eyre::Result<()> {
        let events: Vec<Event> =
            serde_json::from_str(json).wrap_err("failed to parse timeline events")?;
        self.set_events(events);
        Ok(())
    }

    // --- Surface ---

    pub fn set_surface_extent(&mut self, extent_px: f64) {
        self.surface_extent = extent_px;
        self.relayout();
    }

    /// Picks the axis extent out of the surface size according to the orientation.
    pub fn set_surface_size(&mut self, width: f64, height: f64) {
        self.set_surface_extent(self.config.orientation.extent_of(width, height));
    }

    // --- Viewport ---

    /// Applies a viewport command. Returns `false` if it was a no-op.
    pub fn apply(&mut self, command: ViewportCommand) -> bool {
        let transition = ViewController::apply(self.viewport, command, &self.config);
        let Some(notification) = transition.notification else {
            debug!(?command, "viewport command was a no-op");
            return false;
        };

        debug!(?command, zoom = transition.state.zoom_level, center = ?transition.state.center_time, "viewport changed");
        self.viewport = transition.state;
        self.relayout();
        self.bus.emit(&notification);
        true
    }

    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        self.apply(ViewportCommand::SetZoom(zoom))
    }

    pub fn set_center_time(&mut self, time: f64) -> bool {
        self.apply(ViewportCommand::SetCenter(time))
    }

    pub fn zoom_in(&mut self) -> bool {
        self.apply(ViewportCommand::ZoomIn)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.apply(ViewportCommand::ZoomOut)
    }

    pub fn zoom_by_delta(&mut self, delta: f64) -> bool {
        self.apply(ViewportCommand::ZoomByDelta(delta))
    }

    pub fn pan_by_delta(&mut self, delta: f64) -> bool {
        self.apply(ViewportCommand::PanByDelta(delta))
    }

    pub fn set_slider(&mut self, position: u16) -> bool {
        self.apply(ViewportCommand::SetSlider(f64::from(position)))
    }

    // --- Interaction ---

    /// Moves a selection handle to a surface-relative pixel offset.
    pub fn drag_handle(&mut self, handle: Handle, offset_px: f64) -> Result<RangeSelection> {
        if !self.config.range_selection {
            return Err(TimelineError::SelectionDisabled);
        }
        if !offset_px.is_finite() {
            return Err(TimelineError::InvalidOffset(offset_px));
        }
        let window = self.viewport.view_window();
        let scale = TimeScale::new(&window, self.surface_extent).ok_or(TimelineError::NoLayout)?;

        let selection = self.selection.drag(handle, offset_px, &scale, &window);
        debug!(?handle, start = selection.start, end = selection.end, "selection dragged");
        self.relayout();
        Ok(selection)
    }

    /// Activates the cluster at `index` on `track_id` in the current layout.
    ///
    /// An aggregate zooms in one step and re-centers on its center time; a
    /// singleton notifies `Select` with its event.
    pub fn activate_cluster(&mut self, track_id: &str, index: usize) -> Result<()> {
        let cluster = self
            .layout
            .as_ref()
            .and_then(|layout| layout.track(track_id))
            .and_then(|track| track.clusters.get(index))
            .cloned()
            .ok_or_else(|| TimelineError::ClusterNotFound {
                track_id: track_id.to_string(),
                index,
            })?;

        if cluster.is_aggregate() {
            self.set_zoom(self.viewport.zoom_level + self.config.zoom_step);
            self.set_center_time(cluster.center_time);
        } else if let Some(event) = cluster.events.into_iter().next() {
            self.bus.emit(&Notification::Select(event));
        }
        Ok(())
    }

    // --- Notifications ---

    pub fn subscribe<F>(&mut self, kind: NotificationKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&Notification) + Send + 'static,
    {
        self.bus.subscribe(kind, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn set_cluster_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&mut Cluster) + Send + 'static,
    {
        self.cluster_hook = Some(Box::new(hook));
        self.relayout();
    }

    pub fn clear_cluster_hook(&mut self) {
        self.cluster_hook = None;
        self.relayout();
    }

    /// Drops every subscriber and the published layout.
    pub fn destroy(&mut self) {
        self.bus.clear();
        self.cluster_hook = None;
        self.layout = None;
    }

    // --- Layout ---

    fn sync_and_relayout(&mut self) {
        self.viewport = sync_range(self.viewport, &self.events, now_ms());
        self.relayout();
    }

    fn relayout(&mut self) {
        self.layout = self.compute_layout();
    }

    fn compute_layout(&mut self) -> Option<Layout> {
        let window = self.viewport.view_window();
        let Some(scale) = TimeScale::new(&window, self.surface_extent) else {
            debug!(
                range = window.range,
                extent = self.surface_extent,
                "no layout for degenerate viewport"
            );
            return None;
        };

        let segments = self
            .segment_builder
            .build(&self.events, window.start, window.end);

        let params = ClusterParams {
            scale: &scale,
            window: &window,
            radius_px: self.config.cluster_radius_px,
            default_icon: &self.config.default_icon,
        };

        let mut tracks = Vec::new();
        for track in self.tracks() {
            let track_events = self.events.iter().filter(|e| e.track_id == track.id);
            let Some(mut result) = cluster_events(track_events, &params) else {
                warn!(track = %track.id, "non-finite marker position, skipping layout pass");
                return None;
            };
            if let Some(hook) = self.cluster_hook.as_deref_mut() {
                for cluster in result.clusters.iter_mut() {
                    hook(cluster);
                }
            }
            tracks.push(TrackLayout {
                track,
                clusters: result.clusters,
                intervals: result.intervals,
            });
        }

        let selection = if self.config.range_selection {
            self.selection.ensure_initialized(&window);
            self.selection.bar(&scale)
        } else {
            None
        };

        debug!(
            segments = segments.len(),
            clusters = tracks.iter().map(|t| t.clusters.len()).sum::<usize>(),
            "timeline layout computed"
        );

        Some(Layout {
            orientation: self.config.orientation,
            window,
            scale,
            segments,
            tracks,
            selection,
        })
    }
}

impl std::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("config", &self.config)
            .field("events", &self.events.len())
            .field("viewport", &self.viewport)
            .field("selection", &self.selection)
            .field("surface_extent", &self.surface_extent)
            .field("bus", &self.bus)
            .finish()
    }
}

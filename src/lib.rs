//! timeline_engine: layout and clustering for pannable, zoomable event timelines

pub mod clustering;
pub mod data_types;
pub mod error;
pub mod notifications;
pub mod range_sync;
pub mod scales;
pub mod segments;
pub mod selection;
pub mod shared;
pub mod timeline;
pub mod view_controller;

pub use data_types::{Cluster, Event, Layout, Segment, TimelineConfig, Track};
pub use error::TimelineError;
pub use notifications::{Notification, NotificationKind};
pub use selection::Handle;
pub use shared::SharedTimeline;
pub use timeline::Timeline;

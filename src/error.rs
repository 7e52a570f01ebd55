use thiserror::Error;

/// Errors raised by the timeline engine.
#[derive(Debug, Error)]
pub enum TimelineError {
    /// The configuration cannot drive a layout.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// An event record could not be normalized.
    #[error("invalid event {id:?}: {reason}")]
    InvalidEvent { id: String, reason: &'static str },

    /// No cluster at the requested track/index in the current layout.
    #[error("no cluster {index} on track {track_id:?}")]
    ClusterNotFound { track_id: String, index: usize },

    /// Range selection is not enabled in the configuration.
    #[error("range selection is disabled")]
    SelectionDisabled,

    /// A handle was dragged to a pixel offset that is not a finite number.
    #[error("handle offset {0} is not finite")]
    InvalidOffset(f64),

    /// The current pass has no layout (degenerate range or missing surface).
    #[error("no layout is available for the current viewport")]
    NoLayout,

    /// Configuration sources could not be merged or extracted.
    #[error("failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl TimelineError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = TimelineError> = std::result::Result<T, E>;

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::data_types::TimelineConfig;
use crate::error::Result;
use crate::timeline::Timeline;

/// Cloneable handle serializing access to one [`Timeline`] across threads.
///
/// The engine itself is not synchronized; every call through this handle
/// holds the lock for the whole mutation and relayout.
#[derive(Clone, Debug)]
pub struct SharedTimeline {
    inner: Arc<Mutex<Timeline>>,
}

impl SharedTimeline {
    pub fn new(config: TimelineConfig) -> Result<Self> {
        Ok(Self::from(Timeline::new(config)?))
    }

    pub fn lock(&self) -> MutexGuard<'_, Timeline> {
        self.inner.lock()
    }

    /// Runs `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut Timeline) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<Timeline> for SharedTimeline {
    fn from(timeline: Timeline) -> Self {
        Self {
            inner: Arc::new(Mutex::new(timeline)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::Event;

    #[test]
    fn test_concurrent_ingestion_is_serialized() {
        let shared = SharedTimeline::new(TimelineConfig::default()).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    for i in 0..25 {
                        let id = format!("{t}-{i}");
                        shared.with(|tl| tl.add_events([Event::point(id, (t * 100 + i) as f64)]));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let timeline = shared.lock();
        assert_eq!(timeline.events().len(), 100);
        assert_eq!(timeline.viewport().min_time, 0.0);
        assert_eq!(timeline.viewport().max_time, 324.0);
    }
}

use crate::data_types::{Event, Segment, TimelineConfig};

/// A source of axis splits.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitRule {
    /// A fixed split at an absolute time (ms).
    Manual(f64),
    /// A split at the midpoint of every gap between consecutive event starts
    /// wider than `threshold_ms`.
    AutoGap { threshold_ms: f64 },
}

/// Builder producing the drawable segments of a window.
#[derive(Debug, Clone, Default)]
pub struct SegmentBuilder {
    rules: Vec<SplitRule>,
}

impl SegmentBuilder {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn from_config(config: &TimelineConfig) -> Self {
        let mut builder = Self::new();
        for split in &config.manual_splits {
            builder.add_rule(SplitRule::Manual(*split));
        }
        if config.enable_auto_splits {
            builder.add_rule(SplitRule::AutoGap {
                threshold_ms: config.split_threshold_ms,
            });
        }
        builder
    }

    pub fn add_rule(&mut self, rule: SplitRule) {
        self.rules.push(rule);
    }

    /// Split times strictly inside `(start, end)`, ascending and deduplicated.
    pub fn splits(&self, events: &[Event], start: f64, end: f64) -> Vec<f64> {
        let mut candidates = Vec::new();

        for rule in &self.rules {
            match rule {
                SplitRule::Manual(time) => candidates.push(*time),
                SplitRule::AutoGap { threshold_ms } => {
                    Self::generate_gap_splits(&mut candidates, events, *threshold_ms);
                }
            }
        }

        candidates.retain(|t| *t > start && *t < end);
        candidates.sort_by(f64::total_cmp);
        candidates.dedup();
        candidates
    }

    /// Partitions `[0, 1]` at the splits falling inside the window.
    pub fn build(&self, events: &[Event], start: f64, end: f64) -> Vec<Segment> {
        let span = end - start;
        if !(span.is_finite() && span > 0.0) {
            return vec![Segment {
                start: 0.0,
                end: 1.0,
            }];
        }

        let normalize = |t: f64| (t - start) / span;
        let mut segments = Vec::new();
        let mut segment_start = 0.0;

        for split in self.splits(events, start, end) {
            let boundary = normalize(split);
            segments.push(Segment {
                start: segment_start,
                end: boundary,
            });
            segment_start = boundary;
        }

        segments.push(Segment {
            start: segment_start,
            end: 1.0,
        });
        segments
    }

    fn generate_gap_splits(candidates: &mut Vec<f64>, events: &[Event], threshold_ms: f64) {
        let mut starts: Vec<f64> = events.iter().map(|e| e.start_time).collect();
        starts.sort_by(f64::total_cmp);

        for pair in starts.windows(2) {
            let gap = pair[1] - pair[0];
            if gap > threshold_ms {
                candidates.push(pair[0] + gap / 2.0);
            }
        }
    }
}

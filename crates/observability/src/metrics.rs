//! Render loop metric collection
//!
//! Facade recording per render tick, plus an in-memory aggregator for the
//! end-of-session summary.

use std::collections::HashMap;

use metrics::{counter, gauge, histogram};

/// Outcome of one render tick, as seen by the driver.
#[derive(Debug, Clone, Copy)]
pub struct TickOutcome {
    /// Active layout name
    pub layout: &'static str,

    /// Whether a composite was produced (false = Incomplete)
    pub composed: bool,

    /// Number of missing channels when incomplete
    pub missing: usize,

    /// Compose call duration in milliseconds
    pub compose_ms: f64,
}

/// Record metrics for one render tick.
pub fn record_render_tick(outcome: &TickOutcome, tick: u64) {
    counter!("multiview_ticks_total").increment(1);
    gauge!("multiview_last_tick").set(tick as f64);

    histogram!("multiview_compose_ms").record(outcome.compose_ms);

    if outcome.composed {
        counter!("multiview_composites_total", "layout" => outcome.layout).increment(1);
    } else {
        counter!("multiview_incomplete_ticks_total", "layout" => outcome.layout).increment(1);
        gauge!("multiview_channels_missing").set(outcome.missing as f64);
    }
}

/// Record a composite handed to a sink.
pub fn record_frame_dispatched(sink_name: &str, success: bool) {
    let status = if success { "success" } else { "dropped" };
    counter!(
        "multiview_frames_dispatched_total",
        "sink" => sink_name.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Running min/mean/max over pushed samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningStats {
    /// Sample count
    pub count: u64,
    /// Sample sum
    pub sum: f64,
    /// Minimum sample
    pub min: f64,
    /// Maximum sample
    pub max: f64,
}

impl RunningStats {
    /// Push one sample.
    pub fn push(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
        self.sum += value;
    }

    /// Mean of pushed samples, 0.0 when empty.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// In-memory aggregation of tick outcomes for the session summary.
#[derive(Debug, Clone, Default)]
pub struct RenderMetricsAggregator {
    /// Total ticks observed
    pub total_ticks: u64,

    /// Composites produced
    pub total_composed: u64,

    /// Incomplete ticks (cold start or channel gaps)
    pub total_skipped: u64,

    /// Composites per layout
    pub per_layout: HashMap<&'static str, u64>,

    /// Compose latency statistics (milliseconds)
    pub compose_stats: RunningStats,
}

impl RenderMetricsAggregator {
    /// Create a new aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one tick outcome into the aggregate.
    pub fn update(&mut self, outcome: &TickOutcome) {
        self.total_ticks += 1;
        self.compose_stats.push(outcome.compose_ms);

        if outcome.composed {
            self.total_composed += 1;
            *self.per_layout.entry(outcome.layout).or_insert(0) += 1;
        } else {
            self.total_skipped += 1;
        }
    }

    /// Produce the summary report.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_ticks: self.total_ticks,
            total_composed: self.total_composed,
            total_skipped: self.total_skipped,
            compose_ms_mean: self.compose_stats.mean(),
            compose_ms_max: self.compose_stats.max,
            per_layout: self.per_layout.clone(),
        }
    }
}

/// Summary report
#[derive(Debug, Clone, Default)]
pub struct MetricsSummary {
    /// Total ticks observed
    pub total_ticks: u64,
    /// Composites produced
    pub total_composed: u64,
    /// Incomplete ticks
    pub total_skipped: u64,
    /// Mean compose latency (ms)
    pub compose_ms_mean: f64,
    /// Max compose latency (ms)
    pub compose_ms_max: f64,
    /// Composites per layout
    pub per_layout: HashMap<&'static str, u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(composed: bool, ms: f64) -> TickOutcome {
        TickOutcome {
            layout: "panorama",
            composed,
            missing: if composed { 0 } else { 4 },
            compose_ms: ms,
        }
    }

    #[test]
    fn aggregator_counts_outcomes() {
        let mut agg = RenderMetricsAggregator::new();
        agg.update(&outcome(false, 0.1));
        agg.update(&outcome(true, 1.0));
        agg.update(&outcome(true, 3.0));

        let summary = agg.summary();
        assert_eq!(summary.total_ticks, 3);
        assert_eq!(summary.total_composed, 2);
        assert_eq!(summary.total_skipped, 1);
        assert_eq!(summary.per_layout.get("panorama"), Some(&2));
        assert!((summary.compose_ms_max - 3.0).abs() < 1e-9);
    }

    #[test]
    fn running_stats_track_min_max() {
        let mut stats = RunningStats::default();
        stats.push(2.0);
        stats.push(4.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 4.0);
        assert!((stats.mean() - 3.0).abs() < 1e-9);
    }
}

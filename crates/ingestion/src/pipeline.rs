//! View pipeline - binding registry and lifecycle

use std::collections::HashMap;
use std::sync::Arc;

use contracts::{BevConfig, Channel, SensorSource, ViewError};
use frame_store::FrameStore;
use tracing::{debug, info, instrument, warn};

use crate::binding::ChannelBinding;
use crate::metrics::IngestMetrics;

/// Manages the channel bindings for one view session.
///
/// Created at sensor-attach time, torn down when sensors are detached; the
/// frame store it feeds outlives individual bindings and stays valid (empty)
/// even if teardown of an external sensor handle fails.
pub struct ViewPipeline {
    /// Registered bindings, one per channel
    bindings: HashMap<Channel, ChannelBinding>,

    /// Shared frame store written by all bindings
    store: Arc<FrameStore>,

    /// Shared metrics
    metrics: Arc<IngestMetrics>,

    /// LiDAR projection parameters handed to every binding
    bev: BevConfig,
}

impl ViewPipeline {
    /// Create a pipeline writing into `store`.
    pub fn new(store: Arc<FrameStore>, bev: BevConfig) -> Self {
        Self {
            bindings: HashMap::new(),
            store,
            metrics: Arc::new(IngestMetrics::new()),
            bev,
        }
    }

    /// Register a sensor data source for its channel.
    ///
    /// A second source on the same channel replaces the first (the slot model
    /// allows only one conceptual writer per channel).
    #[instrument(name = "pipeline_register_source", skip(self, source), fields(channel = %source.channel()))]
    pub fn register_source(&mut self, source: Box<dyn SensorSource>) {
        let binding = ChannelBinding::new(source, self.bev);
        let channel = binding.channel();
        if self.bindings.insert(channel, binding).is_some() {
            warn!(channel = %channel, "replaced existing source for channel");
        }
        debug!(channel = %channel, "registered sensor source");
    }

    /// Start all registered bindings.
    #[instrument(name = "pipeline_start_all", skip(self))]
    pub fn start_all(&self) {
        info!(count = self.bindings.len(), "starting all channel bindings");
        for binding in self.bindings.values() {
            if !binding.is_listening() {
                binding.start(Arc::clone(&self.store), Arc::clone(&self.metrics));
            }
        }
    }

    /// Stop all bindings.
    ///
    /// A source that still reports listening after `stop` is a teardown
    /// failure: it is reported and skipped, never escalated - the store
    /// remains valid regardless.
    #[instrument(name = "pipeline_stop_all", skip(self))]
    pub fn stop_all(&self) {
        info!(count = self.bindings.len(), "stopping all channel bindings");
        for (channel, binding) in &self.bindings {
            binding.stop();
            if binding.source_listening() {
                let err = ViewError::teardown(*channel, "source still listening after stop");
                warn!(channel = %channel, error = %err, "sensor teardown failed");
            }
        }
    }

    /// Get metrics reference
    pub fn metrics(&self) -> Arc<IngestMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Get registered channel count
    pub fn channel_count(&self) -> usize {
        self.bindings.len()
    }

    /// Check if the channel's binding is listening
    pub fn is_channel_listening(&self, channel: Channel) -> bool {
        self.bindings
            .get(&channel)
            .map(|b| b.is_listening())
            .unwrap_or(false)
    }
}

impl Drop for ViewPipeline {
    fn drop(&mut self) {
        self.stop_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSensor;

    #[test]
    fn pipeline_starts_empty() {
        let pipeline = ViewPipeline::new(Arc::new(FrameStore::new()), BevConfig::default());
        assert_eq!(pipeline.channel_count(), 0);
        assert!(!pipeline.is_channel_listening(Channel::Front));
    }

    #[test]
    fn duplicate_channel_replaces_binding() {
        let mut pipeline = ViewPipeline::new(Arc::new(FrameStore::new()), BevConfig::default());
        pipeline.register_source(Box::new(MockSensor::camera(Channel::Front, 10.0, 8, 8)));
        pipeline.register_source(Box::new(MockSensor::camera(Channel::Front, 20.0, 8, 8)));
        assert_eq!(pipeline.channel_count(), 1);
    }
}

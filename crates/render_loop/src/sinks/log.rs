//! LogSink - logs composite summary via tracing

use contracts::{CompositeFrame, FrameSink, ViewError};
use tracing::{info, instrument};

/// Sink that logs composite summaries for debugging
pub struct LogSink {
    name: String,
}

impl LogSink {
    /// Create a new LogSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl FrameSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_sink_write",
        skip(self, frame, hud),
        fields(sink = %self.name, tick = frame.tick)
    )]
    async fn write(&mut self, frame: &CompositeFrame, hud: &str) -> Result<(), ViewError> {
        info!(
            sink = %self.name,
            tick = frame.tick,
            width = frame.width,
            height = frame.height,
            timestamp = frame.timestamp,
            hud = %hud,
            "CompositeFrame received"
        );
        Ok(())
    }

    #[instrument(name = "log_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ViewError> {
        // Nothing to flush for log sink
        Ok(())
    }

    #[instrument(name = "log_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ViewError> {
        info!(sink = %self.name, "LogSink closed");
        Ok(())
    }
}

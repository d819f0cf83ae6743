//! Sink implementations

mod log;
mod png;

pub use log::LogSink;
pub use png::PngSink;

use contracts::{SinkConfig, SinkType};
use tracing::instrument;

use crate::error::RenderLoopError;
use crate::handle::SinkHandle;

/// Create sink handles from configuration.
#[instrument(name = "create_sink_handles", skip(configs), fields(sink_count = configs.len()))]
pub fn create_sink_handles(configs: &[SinkConfig]) -> Result<Vec<SinkHandle>, RenderLoopError> {
    let mut handles = Vec::with_capacity(configs.len());
    for config in configs {
        handles.push(create_sink_handle(config)?);
    }
    Ok(handles)
}

fn create_sink_handle(config: &SinkConfig) -> Result<SinkHandle, RenderLoopError> {
    match config.sink_type {
        SinkType::Log => {
            let sink = LogSink::new(&config.name);
            Ok(SinkHandle::spawn(sink, config.queue_capacity))
        }
        SinkType::Png => {
            let sink = PngSink::from_params(&config.name, &config.params)
                .map_err(|e| RenderLoopError::sink_creation(&config.name, e.to_string()))?;
            Ok(SinkHandle::spawn(sink, config.queue_capacity))
        }
    }
}

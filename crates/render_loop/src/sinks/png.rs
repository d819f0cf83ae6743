//! PngSink - writes composites to disk as PNG files
//!
//! One file per delivered tick under the configured base directory, plus a
//! sidecar `hud.log` line so the text that belongs to each frame survives.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use contracts::{CompositeFrame, FrameSink, ViewError};
use tracing::{debug, instrument};

/// Configuration for PngSink
#[derive(Debug, Clone)]
pub struct PngSinkConfig {
    /// Base output directory
    pub base_path: PathBuf,

    /// Write only every n-th delivered frame (1 = all)
    pub every: u64,
}

impl PngSinkConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let base_path = params
            .get("base_path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./output"));

        let every = params
            .get("every")
            .and_then(|v| v.parse().ok())
            .filter(|&n| n > 0)
            .unwrap_or(1);

        Self { base_path, every }
    }
}

/// Sink that persists composites as PNG files
pub struct PngSink {
    name: String,
    config: PngSinkConfig,
    delivered: u64,
}

impl PngSink {
    /// Create a new PngSink
    pub fn new(name: impl Into<String>, config: PngSinkConfig) -> std::io::Result<Self> {
        // Create base directory if it doesn't exist
        fs::create_dir_all(&config.base_path)?;

        Ok(Self {
            name: name.into(),
            config,
            delivered: 0,
        })
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> std::io::Result<Self> {
        let config = PngSinkConfig::from_params(params);
        Self::new(name, config)
    }

    fn write_frame_to_disk(&self, frame: &CompositeFrame, hud: &str) -> std::io::Result<()> {
        let path = self.config.base_path.join(format!("{:06}.png", frame.tick));
        image::save_buffer(
            &path,
            &frame.pixels,
            frame.width,
            frame.height,
            image::ColorType::Rgb8,
        )
        .map_err(std::io::Error::other)?;

        let mut hud_log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.config.base_path.join("hud.log"))?;
        writeln!(hud_log, "{:06} {}", frame.tick, hud)?;

        Ok(())
    }

    fn persist_frame(&mut self, frame: &CompositeFrame, hud: &str) -> Result<(), ViewError> {
        self.delivered += 1;
        if !(self.delivered - 1).is_multiple_of(self.config.every) {
            return Ok(());
        }
        self.write_frame_to_disk(frame, hud)
            .map_err(|e| ViewError::sink_write(&self.name, e.to_string()))
    }
}

impl FrameSink for PngSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "png_sink_write",
        skip(self, frame, hud),
        fields(sink = %self.name, tick = frame.tick)
    )]
    async fn write(&mut self, frame: &CompositeFrame, hud: &str) -> Result<(), ViewError> {
        self.persist_frame(frame, hud)?;
        Ok(())
    }

    #[instrument(name = "png_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ViewError> {
        Ok(())
    }

    #[instrument(name = "png_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ViewError> {
        debug!(sink = %self.name, frames = self.delivered, "PngSink closed");
        Ok(())
    }
}

//! Session orchestrator - coordinates all components.
//!
//! The simulator is an external collaborator, so a session attaches mock
//! sensor sources for every configured channel; swapping in real sensors
//! means swapping the `SensorSource` boxes and nothing else.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use contracts::{ChannelConfig, ControlEvent, LayoutMode, SensorSource, ViewBlueprint};
use frame_store::FrameStore;
use ingestion::{MockSensor, MockSensorConfig, ViewPipeline};
use render_loop::{create_sink_handles, RenderLoop, RenderLoopConfig, StaticTelemetry};
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::SessionStats;

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// The view blueprint configuration
    pub blueprint: ViewBlueprint,

    /// Maximum number of render ticks (None = unlimited)
    pub max_ticks: Option<u64>,

    /// Session timeout (None = no timeout)
    pub timeout: Option<Duration>,

    /// Layout to start with (None = first configured)
    pub initial_layout: Option<LayoutMode>,

    /// Auto-cycle layouts at this period (None = manual only)
    pub cycle_every: Option<Duration>,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,
}

/// Main session orchestrator
pub struct ViewSession {
    config: SessionConfig,
}

impl ViewSession {
    /// Create a new session with the given configuration
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Run the session to completion
    pub async fn run(self) -> Result<SessionStats> {
        let blueprint = &self.config.blueprint;

        // Initialize Metrics (optional)
        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        // Frame store shared between sensor callbacks and the render thread
        let store = Arc::new(FrameStore::new());

        // Attach mock sensors for every configured channel
        info!("Attaching mock sensors...");
        let mut pipeline = ViewPipeline::new(Arc::clone(&store), blueprint.bev);
        for channel_config in &blueprint.channels {
            pipeline.register_source(mock_source(channel_config));
        }
        info!(channels = pipeline.channel_count(), "Sensors attached");

        // Sinks
        if blueprint.sinks.is_empty() {
            warn!("No sinks configured - composites will be dropped after the HUD");
        }
        let sinks = create_sink_handles(&blueprint.sinks).context("Failed to create sinks")?;
        let active_sinks = sinks.len();

        // Render loop
        let mut loop_config = RenderLoopConfig::from_blueprint(blueprint);
        loop_config.max_ticks = self.config.max_ticks;
        loop_config.layouts = initial_layout_order(&blueprint.layouts, self.config.initial_layout);

        let (control_tx, control_rx) = mpsc::unbounded_channel();
        let render_loop = RenderLoop::new(
            loop_config,
            Arc::clone(&store),
            sinks,
            control_rx,
            Arc::new(StaticTelemetry::default()),
        )
        .context("Failed to build render loop")?
        .with_ingest_metrics(pipeline.metrics());

        // Ctrl+C / SIGTERM quits the render loop
        let quit_tx = control_tx.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            warn!("Received shutdown signal, stopping session...");
            let _ = quit_tx.send(ControlEvent::Quit);
        });

        // Optional layout auto-cycling for headless demos
        if let Some(every) = self.config.cycle_every {
            let cycle_tx = control_tx.clone();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(every);
                interval.tick().await; // first tick fires immediately
                loop {
                    interval.tick().await;
                    if cycle_tx.send(ControlEvent::CycleLayout).is_err() {
                        break;
                    }
                }
            });
        }

        // Optional timeout via the cooperative stop flag
        if let Some(timeout) = self.config.timeout {
            let stop = render_loop.stop_flag();
            tokio::spawn(async move {
                tokio::time::sleep(timeout).await;
                warn!(timeout_secs = timeout.as_secs(), "Session timed out");
                stop.store(true, Ordering::Relaxed);
            });
        }

        // Start sensors and drive the loop
        info!("Starting sensor data ingestion...");
        pipeline.start_all();

        let render_stats = render_loop.run().await;

        // Shutdown
        info!("Shutting down session...");
        pipeline.stop_all();
        let ingest = pipeline.metrics().snapshot();

        Ok(SessionStats {
            render: render_stats,
            ingest,
            active_channels: pipeline.channel_count(),
            active_sinks,
        })
    }
}

/// Build the mock source for a configured channel.
fn mock_source(config: &ChannelConfig) -> Box<dyn SensorSource> {
    let frequency_hz = attribute_f64(config, "frequency_hz").unwrap_or(20.0);
    let lidar_points = attribute_f64(config, "points_per_frame")
        .map(|p| p as u32)
        .unwrap_or(2000);

    Box::new(MockSensor::new(
        config.channel,
        MockSensorConfig {
            frequency_hz,
            image_width: config.width,
            image_height: config.height,
            lidar_points,
        },
    ))
}

fn attribute_f64(config: &ChannelConfig, key: &str) -> Option<f64> {
    config.attributes.get(key).and_then(|v| v.parse().ok())
}

/// Rotate the layout cycle so the requested initial layout comes first.
fn initial_layout_order(layouts: &[LayoutMode], initial: Option<LayoutMode>) -> Vec<LayoutMode> {
    let mut ordered = layouts.to_vec();
    if let Some(initial) = initial {
        match ordered.iter().position(|m| *m == initial) {
            Some(pos) => ordered.rotate_left(pos),
            None => warn!(layout = ?initial, "requested initial layout is not configured"),
        }
    }
    ordered
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Channel;

    #[test]
    fn initial_layout_rotates_cycle() {
        let layouts = vec![
            LayoutMode::PanoramaStrip,
            LayoutMode::CubemapGrid,
            LayoutMode::Overlay,
        ];
        let ordered = initial_layout_order(&layouts, Some(LayoutMode::Overlay));
        assert_eq!(
            ordered,
            vec![
                LayoutMode::Overlay,
                LayoutMode::PanoramaStrip,
                LayoutMode::CubemapGrid,
            ]
        );
    }

    #[test]
    fn unknown_initial_layout_keeps_order() {
        let layouts = vec![LayoutMode::PanoramaStrip];
        let ordered = initial_layout_order(&layouts, Some(LayoutMode::Overlay));
        assert_eq!(ordered, layouts);
    }

    #[test]
    fn mock_source_uses_channel_attributes() {
        let mut attributes = std::collections::HashMap::new();
        attributes.insert("frequency_hz".to_string(), "5".to_string());
        let config = ChannelConfig {
            channel: Channel::Front,
            width: 64,
            height: 64,
            attributes,
        };
        let source = mock_source(&config);
        assert_eq!(source.channel(), Channel::Front);
    }
}

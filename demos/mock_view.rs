//! Mock View Demo
//!
//! Drives the full view pipeline with mock sensors: four panorama cameras,
//! two extra cubemap faces, a full-resolution RGB camera and the three
//! minimap providers. The demo cycles through every layout while running,
//! so one run exercises panorama, cubemap and overlay composition.
//!
//! Run with: cargo run --bin mock_view
//! Optionally pass a config path: cargo run --bin mock_view -- config.toml

use std::sync::Arc;
use std::time::Duration;

use contracts::{
    BevConfig, Channel, ChannelConfig, ConfigVersion, ControlEvent, LayoutMode, OverlayConfig,
    SinkConfig, SinkType, ViewBlueprint, ViewConfig,
};
use frame_store::FrameStore;
use ingestion::{MockSensor, MockSensorConfig, ViewPipeline};
use render_loop::{create_sink_handles, RenderLoop, RenderLoopConfig, StaticTelemetry};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("Starting Mock View Demo");

    // ==== Stage 1: Use default config or load from file ====
    let blueprint = if let Some(path) = std::env::args().nth(1) {
        tracing::info!(path = %path, "Loading blueprint config");
        config_loader::ConfigLoader::load_from_path(std::path::Path::new(&path))?
    } else {
        create_demo_blueprint()
    };

    // ==== Stage 2: Frame store and mock sensors ====
    let store = Arc::new(FrameStore::new());
    let mut pipeline = ViewPipeline::new(Arc::clone(&store), blueprint.bev);

    for channel_config in &blueprint.channels {
        pipeline.register_source(Box::new(MockSensor::new(
            channel_config.channel,
            MockSensorConfig {
                frequency_hz: 30.0,
                image_width: channel_config.width,
                image_height: channel_config.height,
                lidar_points: 2000,
            },
        )));
        tracing::info!(channel = %channel_config.channel, "Registered mock sensor");
    }

    tracing::info!(channels = pipeline.channel_count(), "Pipeline configured");

    // ==== Stage 3: Sinks and render loop ====
    let sinks = create_sink_handles(&blueprint.sinks)?;

    let (control_tx, control_rx) = mpsc::unbounded_channel();
    let mut loop_config = RenderLoopConfig::from_blueprint(&blueprint);
    loop_config.max_ticks = Some(300);

    let render_loop = RenderLoop::new(
        loop_config,
        Arc::clone(&store),
        sinks,
        control_rx,
        Arc::new(StaticTelemetry::default()),
    )?
    .with_ingest_metrics(pipeline.metrics());

    // ==== Stage 4: Run, cycling layouts every 2 seconds ====
    pipeline.start_all();

    let cycler = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(2));
        interval.tick().await;
        loop {
            interval.tick().await;
            if control_tx.send(ControlEvent::CycleLayout).is_err() {
                break;
            }
        }
    });

    let stats = render_loop.run().await;
    cycler.abort();

    // ==== Stage 5: Cleanup ====
    tracing::info!("Shutting down and cleaning up...");
    pipeline.stop_all();

    let ingest = pipeline.metrics().snapshot();
    tracing::info!(
        ticks = stats.ticks,
        composites = stats.composed,
        skipped = stats.skipped,
        payloads = ingest.payloads_received,
        fps = format!("{:.2}", stats.fps()),
        "Demo completed"
    );

    Ok(())
}

/// Blueprint matching the original view sessions: 400 px panorama faces,
/// 1280x720 primary RGB, 250 px minimap providers.
fn create_demo_blueprint() -> ViewBlueprint {
    let camera = |channel: Channel, size: u32| ChannelConfig {
        channel,
        width: size,
        height: size,
        attributes: Default::default(),
    };

    ViewBlueprint {
        version: ConfigVersion::V1,
        view: ViewConfig { target_fps: 30.0 },
        channels: vec![
            camera(Channel::Left, 400),
            camera(Channel::Front, 400),
            camera(Channel::Right, 400),
            camera(Channel::Back, 400),
            camera(Channel::Up, 400),
            camera(Channel::Down, 400),
            ChannelConfig {
                channel: Channel::Rgb,
                width: 1280,
                height: 720,
                attributes: Default::default(),
            },
            camera(Channel::Depth, 250),
            camera(Channel::Semantic, 250),
            camera(Channel::Lidar, 250),
        ],
        layouts: vec![
            LayoutMode::PanoramaStrip,
            LayoutMode::CubemapGrid,
            LayoutMode::Overlay,
        ],
        bev: BevConfig::default(),
        overlay: OverlayConfig::default(),
        sinks: vec![SinkConfig {
            name: "demo_log".to_string(),
            sink_type: SinkType::Log,
            queue_capacity: 32,
            params: Default::default(),
        }],
    }
}

//! # Integration Tests
//!
//! End-to-end tests over the whole view pipeline, no simulator required:
//! mock sensors -> projection -> frame store -> compositor -> render loop
//! -> sinks.

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::Arc;

    use contracts::{
        BevConfig, Channel, ControlEvent, Layout, LayoutMode, OverlayConfig, SinkConfig, SinkType,
    };
    use frame_store::FrameStore;
    use ingestion::{MockSensor, ViewPipeline};
    use render_loop::{create_sink_handles, RenderLoop, RenderLoopConfig, StaticTelemetry};
    use tokio::sync::mpsc;

    fn loop_config(layouts: Vec<LayoutMode>, max_ticks: u64) -> RenderLoopConfig {
        RenderLoopConfig {
            target_fps: 100.0,
            layouts,
            overlay: OverlayConfig::default(),
            max_ticks: Some(max_ticks),
        }
    }

    /// End-to-end: four mock cameras feed the store while the render loop
    /// drives the panorama layout. The loop must start incomplete (cold
    /// start) and produce composites once all four channels have delivered.
    #[tokio::test]
    async fn test_e2e_mock_panorama() {
        let store = Arc::new(FrameStore::new());
        let mut pipeline = ViewPipeline::new(Arc::clone(&store), BevConfig::default());
        for channel in Layout::PANORAMA_CHANNELS {
            pipeline.register_source(Box::new(MockSensor::camera(channel, 100.0, 64, 64)));
        }

        let sink_configs = vec![SinkConfig {
            name: "e2e_log".to_string(),
            sink_type: SinkType::Log,
            queue_capacity: 32,
            params: Default::default(),
        }];
        let sinks = create_sink_handles(&sink_configs).unwrap();

        let (_control_tx, control_rx) = mpsc::unbounded_channel();
        let render_loop = RenderLoop::new(
            loop_config(vec![LayoutMode::PanoramaStrip], 100),
            Arc::clone(&store),
            sinks,
            control_rx,
            Arc::new(StaticTelemetry::default()),
        )
        .unwrap()
        .with_ingest_metrics(pipeline.metrics());

        pipeline.start_all();
        let stats = render_loop.run().await;
        pipeline.stop_all();

        assert_eq!(stats.ticks, 100);
        assert!(
            stats.composed > 0,
            "all four cameras deliver within one second, composites expected"
        );

        let ingest = pipeline.metrics().snapshot();
        assert!(ingest.payloads_received > 0);
        assert_eq!(ingest.format_errors, 0);

        // The store ends up with a frame on every panorama channel.
        for channel in Layout::PANORAMA_CHANNELS {
            assert!(store.read(channel).is_some());
        }
    }

    /// End-to-end overlay session with all three minimap providers and
    /// minimap cycling mid-run.
    #[tokio::test]
    async fn test_e2e_overlay_with_minimap_cycling() {
        let store = Arc::new(FrameStore::new());
        let mut pipeline = ViewPipeline::new(Arc::clone(&store), BevConfig::default());
        pipeline.register_source(Box::new(MockSensor::camera(Channel::Rgb, 100.0, 320, 180)));
        pipeline.register_source(Box::new(MockSensor::lidar(100.0, 500)));
        pipeline.register_source(Box::new(MockSensor::depth(100.0, 64)));
        pipeline.register_source(Box::new(MockSensor::semantic(100.0, 64)));

        let (control_tx, control_rx) = mpsc::unbounded_channel();
        let overlay = OverlayConfig {
            minimap_size: 64,
            ..Default::default()
        };
        let config = RenderLoopConfig {
            target_fps: 100.0,
            layouts: vec![LayoutMode::Overlay],
            overlay,
            max_ticks: Some(60),
        };
        let render_loop = RenderLoop::new(
            config,
            Arc::clone(&store),
            vec![],
            control_rx,
            Arc::new(StaticTelemetry::default()),
        )
        .unwrap();

        pipeline.start_all();

        // Rotate through all three minimap channels while the loop runs.
        let cycler = tokio::spawn(async move {
            for _ in 0..2 {
                tokio::time::sleep(std::time::Duration::from_millis(150)).await;
                if control_tx.send(ControlEvent::CycleMinimap).is_err() {
                    break;
                }
            }
            control_tx
        });

        let stats = render_loop.run().await;
        pipeline.stop_all();
        cycler.await.unwrap();

        // Overlay needs only the primary, which arrives within the first
        // ticks; nearly the whole run composes.
        assert!(stats.composed > 0);
        assert!(stats.composed + stats.skipped == stats.ticks);
    }

    /// The render loop keeps ticking through a cold start with no sensors
    /// at all and never produces a partial panorama.
    #[tokio::test]
    async fn test_e2e_cold_start_never_composes() {
        let store = Arc::new(FrameStore::new());
        let (_control_tx, control_rx) = mpsc::unbounded_channel();
        let render_loop = RenderLoop::new(
            loop_config(vec![LayoutMode::PanoramaStrip, LayoutMode::CubemapGrid], 20),
            store,
            vec![],
            control_rx,
            Arc::new(StaticTelemetry::default()),
        )
        .unwrap();

        let stats = render_loop.run().await;
        assert_eq!(stats.composed, 0);
        assert_eq!(stats.skipped, 20);
    }

    /// A blueprint parsed from TOML drives the same pipeline the CLI wires
    /// up: parsed layouts reach the render loop config, and a compositor
    /// built from the parsed overlay settings assembles the stored frames.
    #[tokio::test]
    async fn test_e2e_blueprint_from_toml() {
        const CONFIG: &str = r#"
layouts = ["overlay"]

[view]
target_fps = 60.0

[overlay]
minimap_size = 50

[[channels]]
channel = "rgb"
width = 320
height = 180

[[channels]]
channel = "lidar"
width = 250
height = 250
"#;

        let blueprint =
            config_loader::ConfigLoader::load_from_str(CONFIG, config_loader::ConfigFormat::Toml)
                .unwrap();
        assert_eq!(blueprint.layouts, vec![LayoutMode::Overlay]);

        let mut config = RenderLoopConfig::from_blueprint(&blueprint);
        assert_eq!(config.target_fps, 60.0);
        config.target_fps = 200.0; // keep the test fast
        config.max_ticks = Some(40);

        let store = Arc::new(FrameStore::new());
        let mut pipeline = ViewPipeline::new(Arc::clone(&store), blueprint.bev);
        pipeline.register_source(Box::new(MockSensor::camera(Channel::Rgb, 200.0, 320, 180)));
        pipeline.register_source(Box::new(MockSensor::lidar(200.0, 500)));
        pipeline.start_all();

        let (_control_tx, control_rx) = mpsc::unbounded_channel();
        let render_loop = RenderLoop::new(
            config,
            Arc::clone(&store),
            vec![],
            control_rx,
            Arc::new(StaticTelemetry::default()),
        )
        .unwrap();
        let stats = render_loop.run().await;
        pipeline.stop_all();

        assert!(stats.composed > 0);

        // Composing the parsed overlay directly yields the primary geometry.
        let compositor = compositor::Compositor::new(blueprint.overlay.clone());
        let layout = Layout::Overlay {
            primary: blueprint.overlay.primary,
            minimap: Channel::Lidar,
        };
        let frame = compositor
            .compose(&layout, &store, 0)
            .into_frame()
            .unwrap();
        assert_eq!((frame.width, frame.height), (320, 180));
    }

    /// A sensor delivering malformed payloads never disturbs the other
    /// channels or crashes the loop.
    #[tokio::test]
    async fn test_e2e_format_errors_are_isolated() {
        use bytes::Bytes;
        use contracts::{
            ImageData, PayloadData, PixelFormat, RawPayload, SensorDataCallback, SensorSource,
        };
        use std::sync::atomic::{AtomicBool, Ordering};

        /// Mock source that declares 64x64 but ships a truncated buffer.
        struct BrokenCamera {
            listening: AtomicBool,
        }

        impl SensorSource for BrokenCamera {
            fn channel(&self) -> Channel {
                Channel::Front
            }

            fn listen(&self, callback: SensorDataCallback) {
                if self.listening.swap(true, Ordering::SeqCst) {
                    return;
                }
                std::thread::spawn(move || {
                    for i in 0..20u64 {
                        callback(RawPayload {
                            channel: Channel::Front,
                            timestamp: i as f64 * 0.01,
                            frame_id: Some(i),
                            data: PayloadData::Image(ImageData {
                                width: 64,
                                height: 64,
                                format: PixelFormat::Bgra8,
                                data: Bytes::from(vec![0u8; 16]),
                            }),
                        });
                        std::thread::sleep(std::time::Duration::from_millis(5));
                    }
                });
            }

            fn stop(&self) {
                self.listening.store(false, Ordering::SeqCst);
            }

            fn is_listening(&self) -> bool {
                self.listening.load(Ordering::Relaxed)
            }
        }

        let store = Arc::new(FrameStore::new());
        let mut pipeline = ViewPipeline::new(Arc::clone(&store), BevConfig::default());
        pipeline.register_source(Box::new(BrokenCamera {
            listening: AtomicBool::new(false),
        }));
        pipeline.register_source(Box::new(MockSensor::camera(Channel::Left, 100.0, 32, 32)));

        pipeline.start_all();
        tokio::time::sleep(std::time::Duration::from_millis(120)).await;
        pipeline.stop_all();

        let ingest = pipeline.metrics().snapshot();
        assert!(ingest.format_errors > 0, "broken payloads must be counted");

        // Broken channel never lands a frame; healthy channel does.
        assert!(store.read(Channel::Front).is_none());
        assert!(store.read(Channel::Left).is_some());
    }
}

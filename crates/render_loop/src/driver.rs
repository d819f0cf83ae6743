//! Render loop driver - fixed-cadence composition and fan-out

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use compositor::{describe_hud, Compositor, HudValues};
use contracts::{
    Channel, Composed, ControlEvent, Layout, LayoutMode, Telemetry, TelemetrySource, ViewBlueprint,
};
use frame_store::FrameStore;
use ingestion::IngestMetrics;
use observability::{record_frame_dispatched, record_render_tick, RenderMetricsAggregator, TickOutcome};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, trace};

use crate::error::RenderLoopError;
use crate::handle::SinkHandle;

/// Render loop configuration
#[derive(Debug, Clone)]
pub struct RenderLoopConfig {
    /// Target render cadence (ticks per second)
    pub target_fps: f64,

    /// Layouts available for cycling, in order
    pub layouts: Vec<LayoutMode>,

    /// Overlay parameters (primary channel, minimap size and cycle)
    pub overlay: contracts::OverlayConfig,

    /// Stop after this many ticks (None = run until stopped)
    pub max_ticks: Option<u64>,
}

impl RenderLoopConfig {
    /// Derive the loop configuration from a blueprint.
    pub fn from_blueprint(blueprint: &ViewBlueprint) -> Self {
        Self {
            target_fps: blueprint.view.target_fps,
            layouts: blueprint.layouts.clone(),
            overlay: blueprint.overlay.clone(),
            max_ticks: None,
        }
    }
}

/// Final statistics for one render session
#[derive(Debug, Clone, Default)]
pub struct RenderStats {
    /// Ticks driven
    pub ticks: u64,

    /// Composites produced and dispatched
    pub composed: u64,

    /// Ticks skipped because required channels were missing
    pub skipped: u64,

    /// Wall-clock session duration
    pub duration: Duration,

    /// Per-tick metric aggregation for the session summary
    pub metrics: RenderMetricsAggregator,
}

impl RenderStats {
    /// Effective composite rate.
    pub fn fps(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.composed as f64 / secs
        } else {
            0.0
        }
    }
}

/// Telemetry stand-in for sessions with no driving agent attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticTelemetry(pub Telemetry);

impl TelemetrySource for StaticTelemetry {
    fn sample(&self) -> Telemetry {
        self.0
    }
}

/// Fixed-cadence driver over the frame store.
///
/// Owns the session's view-mode state (active layout, minimap selection,
/// autopilot pass-through flag); everything else is shared references to the
/// store and sinks.
pub struct RenderLoop {
    config: RenderLoopConfig,
    store: Arc<FrameStore>,
    compositor: Compositor,
    sinks: Vec<SinkHandle>,
    control_rx: mpsc::UnboundedReceiver<ControlEvent>,
    telemetry: Arc<dyn TelemetrySource>,
    ingest_metrics: Option<Arc<IngestMetrics>>,
    stop: Arc<AtomicBool>,
    autopilot: bool,
    layout_idx: usize,
    minimap_idx: usize,
    control_open: bool,
}

impl RenderLoop {
    /// Create a render loop.
    ///
    /// # Errors
    /// `RenderLoopError::NoLayouts` when the layout cycle is empty.
    pub fn new(
        config: RenderLoopConfig,
        store: Arc<FrameStore>,
        sinks: Vec<SinkHandle>,
        control_rx: mpsc::UnboundedReceiver<ControlEvent>,
        telemetry: Arc<dyn TelemetrySource>,
    ) -> Result<Self, RenderLoopError> {
        if config.layouts.is_empty() {
            return Err(RenderLoopError::NoLayouts);
        }

        let compositor = Compositor::new(config.overlay.clone());

        Ok(Self {
            config,
            store,
            compositor,
            sinks,
            control_rx,
            telemetry,
            ingest_metrics: None,
            stop: Arc::new(AtomicBool::new(false)),
            autopilot: true,
            layout_idx: 0,
            minimap_idx: 0,
            control_open: true,
        })
    }

    /// Attach ingestion metrics so the HUD frame counter reflects sensor
    /// arrivals rather than composites.
    pub fn with_ingest_metrics(mut self, metrics: Arc<IngestMetrics>) -> Self {
        self.ingest_metrics = Some(metrics);
        self
    }

    /// Flag that stops the loop at the next tick boundary.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Layout the next tick will compose.
    pub fn active_layout(&self) -> Layout {
        match self.config.layouts[self.layout_idx] {
            LayoutMode::PanoramaStrip => Layout::PanoramaStrip,
            LayoutMode::CubemapGrid => Layout::CubemapGrid,
            LayoutMode::Overlay => Layout::Overlay {
                primary: self.config.overlay.primary,
                minimap: self
                    .config
                    .overlay
                    .minimap_cycle
                    .get(self.minimap_idx)
                    .copied()
                    .unwrap_or(Channel::Lidar),
            },
        }
    }

    /// Drive the loop until a quit event, the stop flag or the tick budget.
    #[instrument(name = "render_loop_run", skip(self))]
    pub async fn run(mut self) -> RenderStats {
        let start = Instant::now();
        let mut stats = RenderStats::default();

        let mut interval =
            tokio::time::interval(Duration::from_secs_f64(1.0 / self.config.target_fps));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            target_fps = self.config.target_fps,
            layouts = self.config.layouts.len(),
            sinks = self.sinks.len(),
            "Render loop started"
        );

        let mut tick: u64 = 0;
        'render: loop {
            interval.tick().await;

            if self.stop.load(Ordering::Relaxed) {
                debug!("stop flag set, leaving render loop");
                break;
            }

            if self.drain_control_events() {
                break 'render;
            }

            tick += 1;
            stats.ticks = tick;

            let layout = self.active_layout();
            let compose_start = Instant::now();
            let result = self.compositor.compose(&layout, &self.store, tick);
            let compose_ms = compose_start.elapsed().as_secs_f64() * 1000.0;

            match result {
                Composed::Frame(frame) => {
                    stats.composed += 1;
                    let outcome = TickOutcome {
                        layout: layout.name(),
                        composed: true,
                        missing: 0,
                        compose_ms,
                    };
                    record_render_tick(&outcome, tick);
                    stats.metrics.update(&outcome);

                    let hud = self.hud_line(&layout, &stats);
                    for sink in &self.sinks {
                        let sent = sink.try_send(frame.clone(), hud.clone());
                        record_frame_dispatched(sink.name(), sent);
                    }
                }
                Composed::Incomplete { missing } => {
                    // Deliberate skip: the previous frame stays on screen.
                    stats.skipped += 1;
                    let outcome = TickOutcome {
                        layout: layout.name(),
                        composed: false,
                        missing: missing.len(),
                        compose_ms,
                    };
                    record_render_tick(&outcome, tick);
                    stats.metrics.update(&outcome);
                    trace!(missing = ?missing, "tick skipped, waiting on channels");
                }
            }

            if let Some(max) = self.config.max_ticks {
                if tick >= max {
                    debug!(ticks = tick, "tick budget reached");
                    break;
                }
            }
        }

        for sink in self.sinks {
            sink.shutdown().await;
        }

        stats.duration = start.elapsed();
        info!(
            ticks = stats.ticks,
            composed = stats.composed,
            skipped = stats.skipped,
            fps = format!("{:.2}", stats.fps()),
            "Render loop stopped"
        );
        stats
    }

    /// Apply all pending control events. Returns true on quit.
    fn drain_control_events(&mut self) -> bool {
        if !self.control_open {
            return false;
        }

        loop {
            match self.control_rx.try_recv() {
                Ok(ControlEvent::Quit) => {
                    info!("quit requested");
                    return true;
                }
                Ok(ControlEvent::ToggleAutopilot) => {
                    self.autopilot = !self.autopilot;
                    info!(autopilot = self.autopilot, "autopilot toggled");
                }
                Ok(ControlEvent::CycleLayout) => {
                    self.layout_idx = (self.layout_idx + 1) % self.config.layouts.len();
                    info!(layout = self.active_layout().name(), "layout switched");
                }
                Ok(ControlEvent::CycleMinimap) => {
                    let cycle = self.config.overlay.minimap_cycle.len().max(1);
                    self.minimap_idx = (self.minimap_idx + 1) % cycle;
                    let label = match self.active_layout() {
                        Layout::Overlay { minimap, .. } => minimap.as_str(),
                        _ => "-",
                    };
                    info!(minimap = label, "minimap switched");
                }
                Err(mpsc::error::TryRecvError::Empty) => return false,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    // Event source detached; keep rendering headless.
                    self.control_open = false;
                    return false;
                }
            }
        }
    }

    fn hud_line(&self, layout: &Layout, stats: &RenderStats) -> String {
        let mut telemetry = self.telemetry.sample();
        // The view's autopilot toggle is authoritative for display.
        telemetry.autopilot = self.autopilot;

        let frames_received = self
            .ingest_metrics
            .as_ref()
            .map(|m| m.snapshot().payloads_received)
            .unwrap_or(stats.composed);

        let minimap = match layout {
            Layout::Overlay { minimap, .. } => Some(*minimap),
            _ => None,
        };

        describe_hud(&HudValues {
            telemetry,
            minimap,
            frames_received,
        })
    }
}

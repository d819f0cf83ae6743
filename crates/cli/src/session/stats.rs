//! Session statistics.

use ingestion::IngestSnapshot;
use render_loop::RenderStats;

/// Statistics from a view session run
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    /// Render loop statistics, including per-tick metric aggregation
    pub render: RenderStats,

    /// Ingestion counters at shutdown
    pub ingest: IngestSnapshot,

    /// Number of channels that were active
    pub active_channels: usize,

    /// Number of sinks that received composites
    pub active_sinks: usize,
}

impl SessionStats {
    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                     Session Statistics                       ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Duration: {:.2}s", self.render.duration.as_secs_f64());
        println!("   ├─ Ticks: {}", self.render.ticks);
        println!("   ├─ Composites: {}", self.render.composed);
        println!("   ├─ Skipped (incomplete): {}", self.render.skipped);
        println!("   ├─ FPS: {:.2}", self.render.fps());
        println!("   ├─ Active channels: {}", self.active_channels);
        println!("   └─ Active sinks: {}", self.active_sinks);

        println!("\n📥 Ingestion");
        println!("   ├─ Payloads received: {}", self.ingest.payloads_received);
        println!("   ├─ Frames projected: {}", self.ingest.frames_projected);
        println!("   └─ Format errors: {}", self.ingest.format_errors);

        let summary = self.render.metrics.summary();

        println!("\n📈 Compose Metrics");
        println!(
            "   ├─ Compose time: mean {:.3} ms, max {:.3} ms",
            summary.compose_ms_mean, summary.compose_ms_max
        );
        if summary.per_layout.is_empty() {
            println!("   └─ Per layout: (no composites)");
        } else {
            println!("   └─ Per layout:");
            for (layout, count) in &summary.per_layout {
                println!("        {}: {}", layout, count);
            }
        }

        println!();
    }
}

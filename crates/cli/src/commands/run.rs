//! `run` command implementation.

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::info;

use crate::cli::RunArgs;
use crate::session::{SessionConfig, ViewSession};

/// Execute the `run` command
pub async fn run_session(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    // Validate config path
    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    // Load and parse configuration
    let mut blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Apply CLI overrides
    if args.fps > 0.0 {
        info!(fps = args.fps, "Overriding target FPS from CLI");
        blueprint.view.target_fps = args.fps;
    }

    info!(
        channels = blueprint.channels.len(),
        layouts = ?blueprint.layouts,
        sinks = blueprint.sinks.len(),
        target_fps = blueprint.view.target_fps,
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&blueprint);
        return Ok(());
    }

    // Build session configuration
    let session_config = SessionConfig {
        blueprint,
        max_ticks: if args.max_ticks == 0 {
            None
        } else {
            Some(args.max_ticks)
        },
        timeout: if args.timeout == 0 {
            None
        } else {
            Some(Duration::from_secs(args.timeout))
        },
        initial_layout: args.layout.map(Into::into),
        cycle_every: if args.cycle_every == 0 {
            None
        } else {
            Some(Duration::from_secs(args.cycle_every))
        },
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
    };

    // Create and run session
    info!("Starting view session...");
    let session = ViewSession::new(session_config);
    let stats = session.run().await.context("Session execution failed")?;

    info!(
        ticks = stats.render.ticks,
        composites = stats.render.composed,
        duration_secs = stats.render.duration.as_secs_f64(),
        fps = format!("{:.2}", stats.render.fps()),
        "Session completed successfully"
    );

    // Print detailed statistics
    stats.print_summary();

    info!("Multiview finished");
    Ok(())
}

/// Print configuration summary for dry-run mode
fn print_config_summary(blueprint: &contracts::ViewBlueprint) {
    println!("\n=== Configuration Summary ===\n");
    println!("View:");
    println!("  Target FPS: {}", blueprint.view.target_fps);
    println!("  Layouts: {:?}", blueprint.layouts);

    println!("\nChannels ({}):", blueprint.channels.len());
    for channel in &blueprint.channels {
        println!(
            "  - {} ({}x{})",
            channel.channel, channel.width, channel.height
        );
    }

    println!("\nOverlay:");
    println!("  Primary: {}", blueprint.overlay.primary);
    println!(
        "  Minimap: {} px, cycle {:?}",
        blueprint.overlay.minimap_size, blueprint.overlay.minimap_cycle
    );

    if !blueprint.sinks.is_empty() {
        println!("\nSinks ({}):", blueprint.sinks.len());
        for sink in &blueprint.sinks {
            println!("  - {} ({:?})", sink.name, sink.sink_type);
        }
    }

    println!();
}

//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    view: ViewInfo,
    layouts: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    channels: Vec<ChannelInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sinks: Vec<SinkInfo>,
    overlay: OverlayInfo,
}

#[derive(Serialize)]
struct ViewInfo {
    target_fps: f64,
    bev_max_range_m: f64,
    bev_output_size: u32,
}

#[derive(Serialize)]
struct ChannelInfo {
    channel: String,
    width: u32,
    height: u32,
    #[serde(skip_serializing_if = "std::collections::HashMap::is_empty")]
    attributes: std::collections::HashMap<String, String>,
}

#[derive(Serialize)]
struct SinkInfo {
    name: String,
    sink_type: String,
}

#[derive(Serialize)]
struct OverlayInfo {
    primary: String,
    minimap_size: u32,
    minimap_cycle: Vec<String>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        let info = build_config_info(&blueprint, args);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&blueprint, args);
    }

    Ok(())
}

fn build_config_info(blueprint: &contracts::ViewBlueprint, args: &InfoArgs) -> ConfigInfo {
    let channels = if args.channels {
        blueprint
            .channels
            .iter()
            .map(|c| ChannelInfo {
                channel: c.channel.to_string(),
                width: c.width,
                height: c.height,
                attributes: c.attributes.clone(),
            })
            .collect()
    } else {
        Vec::new()
    };

    let sinks = if args.sinks {
        blueprint
            .sinks
            .iter()
            .map(|s| SinkInfo {
                name: s.name.clone(),
                sink_type: format!("{:?}", s.sink_type),
            })
            .collect()
    } else {
        Vec::new()
    };

    ConfigInfo {
        version: format!("{:?}", blueprint.version),
        view: ViewInfo {
            target_fps: blueprint.view.target_fps,
            bev_max_range_m: blueprint.bev.max_range_m,
            bev_output_size: blueprint.bev.output_size,
        },
        layouts: blueprint
            .layouts
            .iter()
            .map(|m| format!("{m:?}"))
            .collect(),
        channels,
        sinks,
        overlay: OverlayInfo {
            primary: blueprint.overlay.primary.to_string(),
            minimap_size: blueprint.overlay.minimap_size,
            minimap_cycle: blueprint
                .overlay
                .minimap_cycle
                .iter()
                .map(|c| c.to_string())
                .collect(),
        },
    }
}

fn print_config_info(blueprint: &contracts::ViewBlueprint, args: &InfoArgs) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               Multiview Configuration                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    // View info
    println!("🖥  View");
    println!("   ├─ Version: {:?}", blueprint.version);
    println!("   ├─ Target FPS: {}", blueprint.view.target_fps);
    println!(
        "   ├─ BEV window: ±{} m onto {} px",
        blueprint.bev.max_range_m, blueprint.bev.output_size
    );
    println!("   └─ Layouts: {:?}", blueprint.layouts);

    // Channels
    println!("\n📷 Channels ({})", blueprint.channels.len());
    for (i, channel) in blueprint.channels.iter().enumerate() {
        let is_last = i == blueprint.channels.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };

        if args.channels && !channel.attributes.is_empty() {
            println!(
                "   {} {} ({}x{}) {:?}",
                prefix, channel.channel, channel.width, channel.height, channel.attributes
            );
        } else {
            println!(
                "   {} {} ({}x{})",
                prefix, channel.channel, channel.width, channel.height
            );
        }
    }

    // Overlay settings
    let overlay = &blueprint.overlay;
    println!("\n⚙️  Overlay");
    println!("   ├─ Primary: {}", overlay.primary);
    println!("   ├─ Minimap size: {} px", overlay.minimap_size);
    println!("   └─ Minimap cycle: {:?}", overlay.minimap_cycle);

    // Sinks
    if !blueprint.sinks.is_empty() {
        println!("\n📤 Sinks ({})", blueprint.sinks.len());
        for (i, sink) in blueprint.sinks.iter().enumerate() {
            let is_last = i == blueprint.sinks.len() - 1;
            let prefix = if is_last { "└─" } else { "├─" };
            println!("   {} {} ({:?})", prefix, sink.name, sink.sink_type);
        }
    }

    println!();
}

//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    channel_count: usize,
    layout_count: usize,
    sink_count: usize,
    target_fps: f64,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    // Check file exists
    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    // Try to load and validate
    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", blueprint.version),
                    channel_count: blueprint.channels.len(),
                    layout_count: blueprint.layouts.len(),
                    sink_count: blueprint.sinks.len(),
                    target_fps: blueprint.view.target_fps,
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &contracts::ViewBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    // Check for empty sinks
    if blueprint.sinks.is_empty() {
        warnings.push("No sinks configured - composites will only reach the display".to_string());
    }

    // Channels that no configured layout reads
    for config in &blueprint.channels {
        let referenced = blueprint.layouts.iter().any(|mode| {
            let layout = match mode {
                contracts::LayoutMode::PanoramaStrip => contracts::Layout::PanoramaStrip,
                contracts::LayoutMode::CubemapGrid => contracts::Layout::CubemapGrid,
                contracts::LayoutMode::Overlay => contracts::Layout::Overlay {
                    primary: blueprint.overlay.primary,
                    minimap: blueprint.overlay.primary,
                },
            };
            layout.referenced_channels().contains(&config.channel)
        }) || blueprint.overlay.minimap_cycle.contains(&config.channel);

        if !referenced {
            warnings.push(format!(
                "Channel '{}' is configured but no layout displays it",
                config.channel
            ));
        }
    }

    warnings
}


fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Channels: {}", summary.channel_count);
            println!("  Layouts: {}", summary.layout_count);
            println!("  Sinks: {}", summary.sink_count);
            println!("  Target FPS: {}", summary.target_fps);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

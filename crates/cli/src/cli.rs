//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use contracts::LayoutMode;
use std::path::PathBuf;

/// Multiview - multi-sensor view compositing pipeline
#[derive(Parser, Debug)]
#[command(
    name = "multiview",
    author,
    version,
    about = "Multi-sensor view compositing pipeline",
    long_about = "Composites asynchronously arriving sensor frames into a single \n\
                  display surface (360 panorama strip, cubemap grid, or RGB with \n\
                  minimap overlay) at a fixed render cadence, decoupled from \n\
                  sensor arrival rates."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "MULTIVIEW_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "MULTIVIEW_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a view session with mock sensors
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "config.toml", env = "MULTIVIEW_CONFIG")]
    pub config: PathBuf,

    /// Maximum number of render ticks to drive (0 = unlimited)
    #[arg(long, default_value = "0", env = "MULTIVIEW_MAX_TICKS")]
    pub max_ticks: u64,

    /// Session timeout in seconds (0 = no timeout)
    #[arg(long, default_value = "0", env = "MULTIVIEW_TIMEOUT")]
    pub timeout: u64,

    /// Override target render cadence from configuration (0 = keep config)
    #[arg(long, default_value = "0", env = "MULTIVIEW_FPS")]
    pub fps: f64,

    /// Initial layout (defaults to the first configured layout)
    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Cycle to the next layout every N seconds (0 = no auto-cycling)
    #[arg(long, default_value = "0", env = "MULTIVIEW_CYCLE_EVERY")]
    pub cycle_every: u64,

    /// Validate configuration and exit without running the session
    #[arg(long)]
    pub dry_run: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "9000", env = "MULTIVIEW_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show detailed channel information
    #[arg(long)]
    pub channels: bool,

    /// Show sink configuration
    #[arg(long)]
    pub sinks: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

/// Layout selector for the CLI
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LayoutArg {
    Panorama,
    Cubemap,
    Overlay,
}

impl From<LayoutArg> for LayoutMode {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Panorama => LayoutMode::PanoramaStrip,
            LayoutArg::Cubemap => LayoutMode::CubemapGrid,
            LayoutArg::Overlay => LayoutMode::Overlay,
        }
    }
}

//! ViewBlueprint - Config Loader output
//!
//! Describes the full view session configuration: channels, layouts,
//! projection parameters, render cadence, output sinks. Read once at start;
//! not re-validated at runtime.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Channel, LayoutMode};

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete view session blueprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Render loop settings
    #[serde(default)]
    pub view: ViewConfig,

    /// Sensor channel definitions
    pub channels: Vec<ChannelConfig>,

    /// Layouts available for cycling, in order
    #[serde(default = "default_layouts")]
    pub layouts: Vec<LayoutMode>,

    /// LiDAR bird's-eye projection parameters
    #[serde(default)]
    pub bev: BevConfig,

    /// Overlay layout parameters
    #[serde(default)]
    pub overlay: OverlayConfig,

    /// Output routing configuration
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
}

/// Render loop settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Target render cadence (ticks per second)
    #[serde(default = "default_target_fps")]
    pub target_fps: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            target_fps: default_target_fps(),
        }
    }
}

fn default_target_fps() -> f64 {
    30.0
}

fn default_layouts() -> Vec<LayoutMode> {
    vec![
        LayoutMode::PanoramaStrip,
        LayoutMode::CubemapGrid,
        LayoutMode::Overlay,
    ]
}

/// One sensor channel definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Channel identifier
    pub channel: Channel,

    /// Output raster width requested from the sensor
    pub width: u32,

    /// Output raster height requested from the sensor
    pub height: u32,

    /// Sensor-specific attributes (fov, range, ...), passed opaquely to the
    /// sensor collaborator
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

/// LiDAR bird's-eye projection parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BevConfig {
    /// Half-width of the square ground window, meters; the raster covers
    /// `[-max_range_m, max_range_m]` on both axes
    #[serde(default = "default_max_range")]
    pub max_range_m: f64,

    /// Square raster edge length in pixels
    #[serde(default = "default_bev_size")]
    pub output_size: u32,
}

impl Default for BevConfig {
    fn default() -> Self {
        Self {
            max_range_m: default_max_range(),
            output_size: default_bev_size(),
        }
    }
}

fn default_max_range() -> f64 {
    50.0
}

fn default_bev_size() -> u32 {
    250
}

/// Overlay layout parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Channel filling the whole output
    #[serde(default = "default_overlay_primary")]
    pub primary: Channel,

    /// Minimap edge length in pixels
    #[serde(default = "default_minimap_size")]
    pub minimap_size: u32,

    /// Minimap channels in cycling order
    #[serde(default = "default_minimap_cycle")]
    pub minimap_cycle: Vec<Channel>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            primary: default_overlay_primary(),
            minimap_size: default_minimap_size(),
            minimap_cycle: default_minimap_cycle(),
        }
    }
}

fn default_overlay_primary() -> Channel {
    Channel::Rgb
}

fn default_minimap_size() -> u32 {
    250
}

fn default_minimap_cycle() -> Vec<Channel> {
    vec![Channel::Lidar, Channel::Depth, Channel::Semantic]
}

/// Sink output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Sink name
    pub name: String,

    /// Sink type
    pub sink_type: SinkType,

    /// Queue capacity
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Type-specific parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

fn default_queue_capacity() -> usize {
    100
}

/// Sink type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkType {
    /// Log a one-line summary per composite
    Log,
    /// Write composites to disk as PNG files
    Png,
}

impl ViewBlueprint {
    /// Configuration for one channel, if present.
    pub fn channel_config(&self, channel: Channel) -> Option<&ChannelConfig> {
        self.channels.iter().find(|c| c.channel == channel)
    }

    /// All configured channels in declaration order.
    pub fn configured_channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.channels.iter().map(|c| c.channel)
    }

    /// True when every listed channel is configured.
    pub fn has_channels(&self, channels: &[Channel]) -> bool {
        channels
            .iter()
            .all(|c| self.channels.iter().any(|cfg| cfg.channel == *c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_channel(channel: Channel, size: u32) -> ChannelConfig {
        ChannelConfig {
            channel,
            width: size,
            height: size,
            attributes: HashMap::new(),
        }
    }

    fn sample_blueprint() -> ViewBlueprint {
        ViewBlueprint {
            version: ConfigVersion::V1,
            view: ViewConfig::default(),
            channels: vec![
                sample_channel(Channel::Front, 400),
                sample_channel(Channel::Left, 400),
                sample_channel(Channel::Lidar, 250),
            ],
            layouts: vec![LayoutMode::PanoramaStrip],
            bev: BevConfig::default(),
            overlay: OverlayConfig::default(),
            sinks: vec![],
        }
    }

    #[test]
    fn defaults_match_original_session() {
        let bp = sample_blueprint();
        assert_eq!(bp.view.target_fps, 30.0);
        assert_eq!(bp.bev.max_range_m, 50.0);
        assert_eq!(bp.bev.output_size, 250);
        assert_eq!(bp.overlay.minimap_size, 250);
        assert_eq!(
            bp.overlay.minimap_cycle,
            vec![Channel::Lidar, Channel::Depth, Channel::Semantic]
        );
    }

    #[test]
    fn channel_lookup() {
        let bp = sample_blueprint();
        assert!(bp.channel_config(Channel::Front).is_some());
        assert!(bp.channel_config(Channel::Back).is_none());
        assert!(bp.has_channels(&[Channel::Front, Channel::Left]));
        assert!(!bp.has_channels(&[Channel::Front, Channel::Back]));
    }
}

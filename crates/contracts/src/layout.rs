//! Layout - static arrangement rules mapping channels to composite regions

use serde::{Deserialize, Serialize};

use crate::Channel;

/// Static arrangement of channels on the output raster.
///
/// Layout geometry is planar concatenation only; panorama and cubemap seams
/// show visible discontinuities because no projection correction is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Horizontal strip: left | front | right | back
    PanoramaStrip,

    /// Two stacked rows: {left, front, right} over {down, back, up}
    CubemapGrid,

    /// Full-size primary channel with a scaled minimap in the corner
    Overlay {
        /// Channel filling the whole output
        primary: Channel,
        /// Channel drawn scaled-down in the bottom-right corner
        minimap: Channel,
    },
}

/// Layout selector as it appears in configuration; the overlay's channels are
/// resolved from `OverlayConfig` at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    PanoramaStrip,
    CubemapGrid,
    Overlay,
}

impl Layout {
    /// Strip order for the panorama layout.
    pub const PANORAMA_CHANNELS: [Channel; 4] = [
        Channel::Left,
        Channel::Front,
        Channel::Right,
        Channel::Back,
    ];

    /// Row-major cell order for the cubemap grid.
    pub const CUBEMAP_ROWS: [[Channel; 3]; 2] = [
        [Channel::Left, Channel::Front, Channel::Right],
        [Channel::Down, Channel::Back, Channel::Up],
    ];

    /// Channels that must be present for composition to succeed.
    ///
    /// The overlay's minimap is deliberately not listed: its absence degrades
    /// the output instead of suppressing it.
    pub fn required_channels(&self) -> Vec<Channel> {
        match self {
            Layout::PanoramaStrip => Self::PANORAMA_CHANNELS.to_vec(),
            Layout::CubemapGrid => Self::CUBEMAP_ROWS.iter().flatten().copied().collect(),
            Layout::Overlay { primary, .. } => vec![*primary],
        }
    }

    /// All channels the layout reads, required or not.
    pub fn referenced_channels(&self) -> Vec<Channel> {
        match self {
            Layout::Overlay { primary, minimap } => vec![*primary, *minimap],
            _ => self.required_channels(),
        }
    }

    /// Human-readable layout name for HUD/log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Layout::PanoramaStrip => "panorama",
            Layout::CubemapGrid => "cubemap",
            Layout::Overlay { .. } => "overlay",
        }
    }

    /// Config-level selector for this layout.
    pub fn mode(&self) -> LayoutMode {
        match self {
            Layout::PanoramaStrip => LayoutMode::PanoramaStrip,
            Layout::CubemapGrid => LayoutMode::CubemapGrid,
            Layout::Overlay { .. } => LayoutMode::Overlay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panorama_requires_four_cameras() {
        let required = Layout::PanoramaStrip.required_channels();
        assert_eq!(
            required,
            vec![Channel::Left, Channel::Front, Channel::Right, Channel::Back]
        );
    }

    #[test]
    fn cubemap_requires_six_cameras() {
        assert_eq!(Layout::CubemapGrid.required_channels().len(), 6);
    }

    #[test]
    fn overlay_requires_only_primary() {
        let layout = Layout::Overlay {
            primary: Channel::Rgb,
            minimap: Channel::Lidar,
        };
        assert_eq!(layout.required_channels(), vec![Channel::Rgb]);
        assert_eq!(
            layout.referenced_channels(),
            vec![Channel::Rgb, Channel::Lidar]
        );
    }
}

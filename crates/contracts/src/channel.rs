//! Channel - named sensor output streams
//!
//! The channel set is closed and fixed at configuration time; no structural
//! mutation happens at runtime, which is what lets the frame store keep one
//! pre-allocated slot per channel without a global lock.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ViewError;

/// One named sensor output stream.
///
/// `front..down` are the six cubemap-facing RGB cameras; `rgb` is the
/// full-resolution forward camera used by the overlay layout; `depth`,
/// `semantic` and `lidar` feed the minimap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Front,
    Back,
    Left,
    Right,
    Up,
    Down,
    Rgb,
    Depth,
    Semantic,
    Lidar,
}

/// Payload family a channel delivers, deciding which projector decodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// Plain RGB camera (BGRA/RGBA passthrough)
    Camera,
    /// Depth camera (24-bit encoded depth, log-grayscale remap)
    Depth,
    /// Semantic segmentation camera (class tag palette remap)
    Semantic,
    /// LiDAR point cloud (bird's-eye raster)
    Lidar,
}

impl Channel {
    /// Number of channels; slot arrays are sized by this.
    pub const COUNT: usize = 10;

    /// All channels in stable `index()` order.
    pub const ALL: [Channel; Self::COUNT] = [
        Channel::Front,
        Channel::Back,
        Channel::Left,
        Channel::Right,
        Channel::Up,
        Channel::Down,
        Channel::Rgb,
        Channel::Depth,
        Channel::Semantic,
        Channel::Lidar,
    ];

    /// Stable slot index in `0..COUNT`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Which projector decodes this channel's payloads.
    pub const fn kind(self) -> ChannelKind {
        match self {
            Channel::Front
            | Channel::Back
            | Channel::Left
            | Channel::Right
            | Channel::Up
            | Channel::Down
            | Channel::Rgb => ChannelKind::Camera,
            Channel::Depth => ChannelKind::Depth,
            Channel::Semantic => ChannelKind::Semantic,
            Channel::Lidar => ChannelKind::Lidar,
        }
    }

    /// Lowercase name, matching the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Channel::Front => "front",
            Channel::Back => "back",
            Channel::Left => "left",
            Channel::Right => "right",
            Channel::Up => "up",
            Channel::Down => "down",
            Channel::Rgb => "rgb",
            Channel::Depth => "depth",
            Channel::Semantic => "semantic",
            Channel::Lidar => "lidar",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ViewError::config_validation("channel", format!("unknown channel '{s}'")))
    }
}

//! RawPayload - sensor callback output
//!
//! One payload per sensor callback invocation. Produced by the sensor
//! collaborator, consumed exactly once by a projector, then discarded.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::Channel;

/// Raw sensor payload as delivered by a sensor callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPayload {
    /// Channel this payload belongs to
    pub channel: Channel,

    /// Simulation timestamp (seconds, f64)
    pub timestamp: f64,

    /// Optional frame sequence number (diagnostics)
    pub frame_id: Option<u64>,

    /// Payload body (zero-copy)
    pub data: PayloadData,
}

/// Payload body variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PayloadData {
    /// Image data (RGB/Depth/Semantic cameras)
    Image(ImageData),

    /// LiDAR point cloud
    PointCloud(PointCloudData),
}

/// Image payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageData {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Pixel format of `data`
    pub format: PixelFormat,

    /// Raw pixel data, `width * height * 4` bytes, row-major
    pub data: Bytes,
}

/// Pixel format of a raw image payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// Blue, green, red, alpha (the simulator's native order)
    Bgra8,
    /// Red, green, blue, alpha
    Rgba8,
}

impl PixelFormat {
    /// Bytes per pixel; all supported formats are 4-byte.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        4
    }
}

/// LiDAR point cloud payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointCloudData {
    /// Point count
    pub num_points: u32,

    /// Bytes per point (16 for x,y,z,intensity as f32)
    pub point_stride: u32,

    /// Point data
    pub data: Bytes,
}

impl ImageData {
    /// Expected byte length given the declared dimensions.
    #[inline]
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.format.bytes_per_pixel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_len_uses_declared_dims() {
        let img = ImageData {
            width: 4,
            height: 2,
            format: PixelFormat::Bgra8,
            data: Bytes::new(),
        };
        assert_eq!(img.expected_len(), 32);
    }
}

//! Frame and CompositeFrame - decoded rasters
//!
//! A `Frame` is the projector's output for one payload: a canonical RGB24
//! raster. A `CompositeFrame` is the compositor's output for one render tick.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::Channel;

/// One decoded raster derived from a single sensor payload.
///
/// Pixels are RGB24, row-major, `width * height * 3` bytes. Frames are
/// immutable once built; the frame store hands them out behind `Arc` so a
/// reader can never observe a partially written buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    /// Channel this frame was decoded from
    pub channel: Channel,

    /// Raster width in pixels
    pub width: u32,

    /// Raster height in pixels
    pub height: u32,

    /// RGB24 pixel data, row-major
    pub pixels: Bytes,

    /// Simulation timestamp of the payload this frame derives from
    pub timestamp: f64,
}

impl Frame {
    /// Wrap an RGB24 buffer as a frame.
    pub fn new(
        channel: Channel,
        width: u32,
        height: u32,
        pixels: impl Into<Bytes>,
        timestamp: f64,
    ) -> Self {
        Self {
            channel,
            width,
            height,
            pixels: pixels.into(),
            timestamp,
        }
    }

    /// Single-colour frame, mainly for tests and warm-up fills.
    pub fn solid(channel: Channel, width: u32, height: u32, rgb: [u8; 3], timestamp: f64) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
        for _ in 0..width as usize * height as usize {
            pixels.extend_from_slice(&rgb);
        }
        Self::new(channel, width, height, pixels, timestamp)
    }

    /// Pixel at (x, y); callers must stay in bounds.
    #[inline]
    pub fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }
}

/// One assembled multi-channel output raster for one render tick.
///
/// Transient: built fresh each tick, never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeFrame {
    /// Output width in pixels
    pub width: u32,

    /// Output height in pixels
    pub height: u32,

    /// RGB24 pixel data, row-major
    pub pixels: Vec<u8>,

    /// Render tick that produced this composite
    pub tick: u64,

    /// Newest input-frame timestamp that contributed
    pub timestamp: f64,
}

impl CompositeFrame {
    /// Pixel at (x, y); callers must stay in bounds.
    #[inline]
    pub fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }
}

/// Compositor result.
///
/// `Incomplete` is the normal, expected outcome while required channels have
/// not delivered yet (cold start) - it is a value, not an error.
#[derive(Debug, Clone)]
pub enum Composed {
    /// All required channels present; composite assembled
    Frame(CompositeFrame),

    /// One or more required channels had no frame yet
    Incomplete {
        /// Channels the layout required but the store had no frame for
        missing: Vec<Channel>,
    },
}

impl Composed {
    /// True when required channels were missing.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Composed::Incomplete { .. })
    }

    /// Unwrap into the composite, if any.
    pub fn into_frame(self) -> Option<CompositeFrame> {
        match self {
            Composed::Frame(frame) => Some(frame),
            Composed::Incomplete { .. } => None,
        }
    }
}

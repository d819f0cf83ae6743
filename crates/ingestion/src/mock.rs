//! Mock sensor sources
//!
//! Implements `SensorSource` for development and tests without a simulator.
//! Each mock generates deterministic synthetic payloads at a fixed frequency
//! from a background thread, delivering them through the callback exactly like
//! a real sensor would.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use bytes::Bytes;
use contracts::{
    Channel, ChannelKind, ImageData, PayloadData, PixelFormat, PointCloudData, RawPayload,
    SensorDataCallback, SensorSource,
};
use tracing::{debug, trace};

/// Mock sensor configuration
#[derive(Debug, Clone)]
pub struct MockSensorConfig {
    /// Send frequency (Hz)
    pub frequency_hz: f64,

    /// Image width (camera-like channels)
    pub image_width: u32,

    /// Image height (camera-like channels)
    pub image_height: u32,

    /// Point count (lidar channel)
    pub lidar_points: u32,
}

impl Default for MockSensorConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 20.0,
            image_width: 400,
            image_height: 400,
            lidar_points: 2000,
        }
    }
}

/// Mock sensor
///
/// Generates simulated data at the configured frequency on a background
/// thread; the payload family follows the channel's kind.
pub struct MockSensor {
    channel: Channel,
    config: MockSensorConfig,
    listening: Arc<AtomicBool>,
}

impl MockSensor {
    /// Create a new mock sensor
    pub fn new(channel: Channel, config: MockSensorConfig) -> Self {
        Self {
            channel,
            config,
            listening: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Mock RGB camera on any camera channel
    pub fn camera(channel: Channel, frequency_hz: f64, width: u32, height: u32) -> Self {
        Self::new(
            channel,
            MockSensorConfig {
                frequency_hz,
                image_width: width,
                image_height: height,
                ..Default::default()
            },
        )
    }

    /// Mock depth camera
    pub fn depth(frequency_hz: f64, size: u32) -> Self {
        Self::camera_like(Channel::Depth, frequency_hz, size)
    }

    /// Mock semantic segmentation camera
    pub fn semantic(frequency_hz: f64, size: u32) -> Self {
        Self::camera_like(Channel::Semantic, frequency_hz, size)
    }

    /// Mock LiDAR
    pub fn lidar(frequency_hz: f64, num_points: u32) -> Self {
        Self::new(
            Channel::Lidar,
            MockSensorConfig {
                frequency_hz,
                lidar_points: num_points,
                ..Default::default()
            },
        )
    }

    fn camera_like(channel: Channel, frequency_hz: f64, size: u32) -> Self {
        Self::new(
            channel,
            MockSensorConfig {
                frequency_hz,
                image_width: size,
                image_height: size,
                ..Default::default()
            },
        )
    }

    /// Generate the synthetic payload body for one tick.
    fn generate_payload(config: &MockSensorConfig, channel: Channel, frame_id: u64) -> PayloadData {
        match channel.kind() {
            ChannelKind::Camera => {
                PayloadData::Image(gradient_image(config, channel, frame_id))
            }
            ChannelKind::Depth => PayloadData::Image(radial_depth_image(config)),
            ChannelKind::Semantic => PayloadData::Image(tag_band_image(config)),
            ChannelKind::Lidar => PayloadData::PointCloud(rotating_ring(config, frame_id)),
        }
    }
}

impl SensorSource for MockSensor {
    fn channel(&self) -> Channel {
        self.channel
    }

    fn listen(&self, callback: SensorDataCallback) {
        // Idempotent: if already listening, don't start again
        if self.listening.swap(true, Ordering::SeqCst) {
            return;
        }

        let channel = self.channel;
        let config = self.config.clone();
        let listening = self.listening.clone();

        let interval = Duration::from_secs_f64(1.0 / config.frequency_hz);

        thread::spawn(move || {
            let mut frame_id: u64 = 0;
            let start_time = std::time::Instant::now();

            debug!(
                channel = %channel,
                frequency_hz = config.frequency_hz,
                "mock sensor started"
            );

            while listening.load(Ordering::Relaxed) {
                frame_id += 1;
                let timestamp = start_time.elapsed().as_secs_f64();

                let payload = RawPayload {
                    channel,
                    timestamp,
                    frame_id: Some(frame_id),
                    data: MockSensor::generate_payload(&config, channel, frame_id),
                };

                callback(payload);

                trace!(channel = %channel, frame_id, timestamp, "mock payload sent");

                thread::sleep(interval);
            }

            debug!(channel = %channel, "mock sensor stopped");
        });
    }

    fn stop(&self) {
        self.listening.store(false, Ordering::SeqCst);
    }

    fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Relaxed)
    }
}

/// Channel-tinted BGRA gradient that drifts with the frame counter, so each
/// camera face is visually distinct and visibly live.
fn gradient_image(config: &MockSensorConfig, channel: Channel, frame_id: u64) -> ImageData {
    let (w, h) = (config.image_width, config.image_height);
    let tint = (channel.index() as u32 * 24) as u8;
    let drift = (frame_id * 3 % 256) as u8;

    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            let b = (x * 255 / w.max(1)) as u8;
            let g = (y * 255 / h.max(1)) as u8;
            let r = tint.wrapping_add(drift);
            data.extend_from_slice(&[b, g, r, 255]);
        }
    }

    ImageData {
        width: w,
        height: h,
        format: PixelFormat::Bgra8,
        data: Bytes::from(data),
    }
}

/// Radial 24-bit encoded depth: distance from the image centre, normalized to
/// the half-diagonal.
fn radial_depth_image(config: &MockSensorConfig) -> ImageData {
    let (w, h) = (config.image_width, config.image_height);
    let (cx, cy) = (w as f64 / 2.0, h as f64 / 2.0);
    let max_dist = (cx * cx + cy * cy).sqrt().max(1.0);

    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            let normalized = ((dx * dx + dy * dy).sqrt() / max_dist).min(1.0);
            let encoded = (normalized * 16_777_215.0) as u32;
            data.extend_from_slice(&[
                ((encoded >> 16) & 0xff) as u8, // B
                ((encoded >> 8) & 0xff) as u8,  // G
                (encoded & 0xff) as u8,         // R
                255,
            ]);
        }
    }

    ImageData {
        width: w,
        height: h,
        format: PixelFormat::Bgra8,
        data: Bytes::from(data),
    }
}

/// Horizontal class-tag bands cycling through the palette range.
fn tag_band_image(config: &MockSensorConfig) -> ImageData {
    let (w, h) = (config.image_width, config.image_height);

    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        let tag = (y * 8 / h.max(1) * 3 % 23) as u8;
        for _ in 0..w {
            data.extend_from_slice(&[0, 0, tag, 255]);
        }
    }

    ImageData {
        width: w,
        height: h,
        format: PixelFormat::Bgra8,
        data: Bytes::from(data),
    }
}

/// Ring of returns slowly rotating around the ego position.
fn rotating_ring(config: &MockSensorConfig, frame_id: u64) -> PointCloudData {
    let n = config.lidar_points;
    let phase = frame_id as f32 * 0.05;

    let mut data = Vec::with_capacity((n * 16) as usize);
    for i in 0..n {
        let angle = i as f32 / n.max(1) as f32 * std::f32::consts::TAU + phase;
        let radius = 12.0 + (i % 7) as f32;
        let x = radius * angle.cos();
        let y = radius * angle.sin();
        data.extend_from_slice(&x.to_le_bytes());
        data.extend_from_slice(&y.to_le_bytes());
        data.extend_from_slice(&0.0f32.to_le_bytes()); // z
        data.extend_from_slice(&1.0f32.to_le_bytes()); // intensity
    }

    PointCloudData {
        num_points: n,
        point_stride: 16,
        data: Bytes::from(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU64;

    #[test]
    fn mock_camera_delivers_payloads() {
        let sensor = MockSensor::camera(Channel::Front, 100.0, 32, 32);

        let count = Arc::new(AtomicU64::new(0));
        let count_clone = count.clone();

        sensor.listen(Arc::new(move |payload| {
            assert_eq!(payload.channel, Channel::Front);
            assert!(payload.frame_id.is_some());
            if let PayloadData::Image(img) = &payload.data {
                assert_eq!(img.width, 32);
                assert_eq!(img.data.len(), 32 * 32 * 4);
            } else {
                panic!("expected image payload");
            }
            count_clone.fetch_add(1, Ordering::Relaxed);
        }));

        thread::sleep(Duration::from_millis(60));
        sensor.stop();

        assert!(count.load(Ordering::Relaxed) > 0);
        assert!(!sensor.is_listening());
    }

    #[test]
    fn mock_lidar_payload_is_well_formed() {
        let points = rotating_ring(
            &MockSensorConfig {
                lidar_points: 100,
                ..Default::default()
            },
            1,
        );
        assert_eq!(points.num_points, 100);
        assert_eq!(points.data.len(), 100 * 16);
    }

    #[test]
    fn listen_is_idempotent() {
        let sensor = MockSensor::semantic(100.0, 16);

        let count = Arc::new(AtomicU64::new(0));
        let count1 = count.clone();
        let count2 = count.clone();

        sensor.listen(Arc::new(move |_| {
            count1.fetch_add(1, Ordering::Relaxed);
        }));

        // Second call should be ignored
        sensor.listen(Arc::new(move |_| {
            count2.fetch_add(1000, Ordering::Relaxed);
        }));

        thread::sleep(Duration::from_millis(60));
        sensor.stop();

        let total = count.load(Ordering::Relaxed);
        assert!(total > 0);
        assert!(total < 1000);
    }
}

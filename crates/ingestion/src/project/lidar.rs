//! LiDAR projector - point cloud to bird's-eye raster
//!
//! Splats each point's (x, y) onto a square top-down grid covering
//! `[-max_range, max_range]^2` in the ego frame. Later points overwrite
//! earlier ones at the same pixel; there is no blending or density
//! accumulation, so pixel-exact output is only deterministic for a fixed,
//! ordered input sequence. Out-of-window points are silently discarded.

use contracts::{BevConfig, Channel, Frame, PointCloudData, ViewError};

/// Colour of a splatted point.
pub const POINT_COLOR: [u8; 3] = [0, 255, 0];

/// Colour of the ego-vehicle marker at the raster centre.
pub const EGO_COLOR: [u8; 3] = [255, 0, 0];

/// Rasterize a point cloud into a bird's-eye RGB frame.
pub(crate) fn project_lidar(
    channel: Channel,
    points: &PointCloudData,
    bev: &BevConfig,
    timestamp: f64,
) -> Result<Frame, ViewError> {
    let stride = points.point_stride as usize;
    if stride < 8 || stride % 4 != 0 {
        return Err(ViewError::format(
            channel,
            format!("unsupported point stride {stride}"),
        ));
    }
    let expected = points.num_points as usize * stride;
    if points.data.len() != expected {
        return Err(ViewError::format(
            channel,
            format!(
                "declared {} points x {} bytes = {}, buffer has {}",
                points.num_points,
                stride,
                expected,
                points.data.len()
            ),
        ));
    }

    let size = bev.output_size as usize;
    let mut pixels = vec![0u8; size * size * 3];

    let scale = bev.output_size as f32 / (2.0 * bev.max_range_m as f32);
    let half = bev.output_size as f32 / 2.0;

    for point in points.data.chunks_exact(stride) {
        // Only (x, y) matter; z and intensity are dropped.
        let x = bytemuck::pod_read_unaligned::<f32>(&point[0..4]);
        let y = bytemuck::pod_read_unaligned::<f32>(&point[4..8]);

        let col = (x * scale + half) as i64;
        let row = (y * scale + half) as i64;
        if col < 0 || row < 0 || col >= size as i64 || row >= size as i64 {
            continue;
        }

        let idx = (row as usize * size + col as usize) * 3;
        pixels[idx..idx + 3].copy_from_slice(&POINT_COLOR);
    }

    stamp_ego_marker(&mut pixels, size);

    Ok(Frame::new(
        channel,
        bev.output_size,
        bev.output_size,
        pixels,
        timestamp,
    ))
}

/// Small block at the raster centre marking the ego vehicle, drawn last so it
/// stays visible over nearby returns. Geometry matches the original view:
/// 6 rows by 4 columns around the centre.
fn stamp_ego_marker(pixels: &mut [u8], size: usize) {
    let centre = size / 2;
    let row_lo = centre.saturating_sub(3);
    let row_hi = (centre + 3).min(size);
    let col_lo = centre.saturating_sub(2);
    let col_hi = (centre + 2).min(size);

    for row in row_lo..row_hi {
        for col in col_lo..col_hi {
            let idx = (row * size + col) * 3;
            pixels[idx..idx + 3].copy_from_slice(&EGO_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn cloud(points: &[(f32, f32)]) -> PointCloudData {
        let mut data = Vec::with_capacity(points.len() * 16);
        for &(x, y) in points {
            data.extend_from_slice(&x.to_le_bytes());
            data.extend_from_slice(&y.to_le_bytes());
            data.extend_from_slice(&0.0f32.to_le_bytes()); // z
            data.extend_from_slice(&1.0f32.to_le_bytes()); // intensity
        }
        PointCloudData {
            num_points: points.len() as u32,
            point_stride: 16,
            data: Bytes::from(data),
        }
    }

    fn bev() -> BevConfig {
        BevConfig {
            max_range_m: 50.0,
            output_size: 250,
        }
    }

    fn count_pixels(frame: &Frame, color: [u8; 3]) -> usize {
        frame.pixels.chunks_exact(3).filter(|px| *px == color).count()
    }

    /// Fixed ordered input; every coordinate is analytically checkable with
    /// scale 2.5 and centre 125.
    #[test]
    fn known_points_land_on_computed_pixels() {
        let points = cloud(&[(0.0, 0.0), (10.0, 0.0), (-10.0, 0.0), (0.0, 10.0)]);
        let frame = project_lidar(Channel::Lidar, &points, &bev(), 0.0).unwrap();

        assert_eq!(frame.width, 250);
        assert_eq!(frame.height, 250);

        // Ego marker sits at the centre; the (0, 0) return lands underneath it.
        assert_eq!(frame.rgb_at(125, 125), EGO_COLOR);

        assert_eq!(frame.rgb_at(150, 125), POINT_COLOR); // (10, 0)
        assert_eq!(frame.rgb_at(100, 125), POINT_COLOR); // (-10, 0)
        assert_eq!(frame.rgb_at(125, 150), POINT_COLOR); // (0, 10)

        // Exactly the three visible returns; no blending, no duplicates.
        assert_eq!(count_pixels(&frame, POINT_COLOR), 3);
    }

    #[test]
    fn out_of_range_points_are_silently_dropped() {
        let points = cloud(&[(1000.0, 0.0), (0.0, -1000.0)]);
        let frame = project_lidar(Channel::Lidar, &points, &bev(), 0.0).unwrap();
        assert_eq!(count_pixels(&frame, POINT_COLOR), 0);
    }

    #[test]
    fn coincident_points_overwrite_not_blend() {
        let points = cloud(&[(10.0, 0.0), (10.0, 0.0), (10.0, 0.0)]);
        let frame = project_lidar(Channel::Lidar, &points, &bev(), 0.0).unwrap();
        assert_eq!(count_pixels(&frame, POINT_COLOR), 1);
    }

    #[test]
    fn ego_marker_has_original_geometry() {
        let points = cloud(&[]);
        let frame = project_lidar(Channel::Lidar, &points, &bev(), 0.0).unwrap();
        // 6 rows x 4 columns
        assert_eq!(count_pixels(&frame, EGO_COLOR), 24);
        assert_eq!(frame.rgb_at(123, 122), EGO_COLOR);
        assert_eq!(frame.rgb_at(126, 127), EGO_COLOR);
        assert_eq!(frame.rgb_at(127, 125), [0, 0, 0]);
    }

    #[test]
    fn truncated_buffer_is_rejected() {
        let mut points = cloud(&[(0.0, 0.0)]);
        points.num_points = 2;
        let err = project_lidar(Channel::Lidar, &points, &bev(), 0.0).unwrap_err();
        assert!(matches!(err, ViewError::Format { .. }));
    }

    #[test]
    fn odd_stride_is_rejected() {
        let mut points = cloud(&[(0.0, 0.0)]);
        points.point_stride = 10;
        assert!(project_lidar(Channel::Lidar, &points, &bev(), 0.0).is_err());
    }
}
